//! Pairing generation.
//!
//! Turns a team list and a [`Format`] into the ordered list of required
//! [`Contest`]s. No time information is attached here.
//!
//! # Ordering
//!
//! Contests are emitted round by round. For structured formats, round `r`
//! of every group precedes round `r + 1` of any group, and groups appear in
//! partition order within a round. The return pass of a home-and-away
//! fixture follows the whole first pass. This order is the tie-break input
//! of the schedule builder and is fully deterministic.

mod groups;
mod round_robin;

pub use groups::partition;
pub use round_robin::{circle_rounds, Round};

use tracing::debug;

use crate::error::{FixtureError, Result};
use crate::models::{Contest, Format, ScheduleConfig, Team};

/// Builds the contest list for a format.
///
/// # Example
///
/// ```
/// use fixture_schedule::pairing::PairingGenerator;
/// use fixture_schedule::models::{Format, Team};
///
/// let teams: Vec<Team> = ["A", "B", "C", "D"]
///     .iter()
///     .map(|id| Team::new(*id, *id))
///     .collect();
/// let contests = PairingGenerator::new(Format::RoundRobin)
///     .generate(&teams)
///     .unwrap();
/// assert_eq!(contests.len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PairingGenerator {
    format: Format,
    home_and_away: bool,
    shuffle_seed: Option<u64>,
}

impl PairingGenerator {
    /// Creates a single-leg generator for a format.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            home_and_away: false,
            shuffle_seed: None,
        }
    }

    /// Creates a generator from the pairing-related config fields.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            format: config.format,
            home_and_away: config.home_and_away,
            shuffle_seed: config.shuffle_seed,
        }
    }

    /// Enables the return pass.
    pub fn with_home_and_away(mut self, enabled: bool) -> Self {
        self.home_and_away = enabled;
        self
    }

    /// Sets the group shuffle seed.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Generates the ordered contest list.
    ///
    /// # Errors
    /// [`FixtureError::Format`] with fewer than two teams, or when the team
    /// count does not fit the format's group size.
    pub fn generate(&self, teams: &[Team]) -> Result<Vec<Contest>> {
        if teams.len() < 2 {
            return Err(FixtureError::Format(format!(
                "at least 2 teams are required, got {}",
                teams.len()
            )));
        }

        let groups = match self.format.group_size() {
            None => vec![teams.to_vec()],
            Some(size) => partition(teams, size, self.shuffle_seed)?,
        };
        let grouped = self.format.group_size().is_some();

        let schedules: Vec<Vec<Round>> = groups.iter().map(|g| circle_rounds(g.len())).collect();
        let pass_rounds = schedules.iter().map(Vec::len).max().unwrap_or(0);

        let mut contests = Vec::new();
        for round in 0..pass_rounds {
            for (g, (group, rounds)) in groups.iter().zip(&schedules).enumerate() {
                let Some(pairs) = rounds.get(round) else {
                    continue;
                };
                for &(home, away) in pairs {
                    let mut contest = Contest::new(group[home].clone(), group[away].clone());
                    contest.round = Some(round);
                    if grouped {
                        contest.group = Some(g);
                    }
                    contests.push(contest);
                }
            }
        }

        if self.home_and_away {
            let second: Vec<Contest> = contests.iter().map(|c| c.reversed(pass_rounds)).collect();
            contests.extend(second);
        }

        debug!(
            format = %self.format,
            teams = teams.len(),
            groups = groups.len(),
            rounds = pass_rounds,
            contests = contests.len(),
            home_and_away = self.home_and_away,
            "generated pairings"
        );
        Ok(contests)
    }
}

/// Generates the ordered contest list without building a generator first.
pub fn generate_contests(
    teams: &[Team],
    format: Format,
    home_and_away: bool,
    shuffle_seed: Option<u64>,
) -> Result<Vec<Contest>> {
    PairingGenerator {
        format,
        home_and_away,
        shuffle_seed,
    }
    .generate(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Leg;
    use std::collections::{HashMap, HashSet};

    fn teams(n: usize) -> Vec<Team> {
        (0..n)
            .map(|i| {
                let id = ((b'A' + i as u8) as char).to_string();
                Team::new(id.clone(), id)
            })
            .collect()
    }

    #[test]
    fn test_round_robin_counts() {
        for n in 2..=9 {
            let contests = PairingGenerator::new(Format::RoundRobin)
                .generate(&teams(n))
                .unwrap();
            assert_eq!(contests.len(), n * (n - 1) / 2, "n = {n}");

            let mut per_team: HashMap<&str, usize> = HashMap::new();
            for c in &contests {
                *per_team.entry(&c.home.id).or_default() += 1;
                *per_team.entry(&c.away.id).or_default() += 1;
            }
            assert!(per_team.values().all(|&k| k == n - 1));

            let pairs: HashSet<_> = contests.iter().map(|c| c.pair_key()).collect();
            assert_eq!(pairs.len(), contests.len());
        }
    }

    #[test]
    fn test_round_robin_once_per_round() {
        let contests = PairingGenerator::new(Format::RoundRobin)
            .generate(&teams(7))
            .unwrap();
        let mut seen: HashSet<(usize, &str)> = HashSet::new();
        for c in &contests {
            let round = c.round.unwrap();
            assert!(seen.insert((round, c.home.id.as_str())));
            assert!(seen.insert((round, c.away.id.as_str())));
            assert!(c.group.is_none());
        }
        // Rounds are emitted in order.
        let rounds: Vec<usize> = contests.iter().map(|c| c.round.unwrap()).collect();
        assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_home_and_away() {
        let contests = PairingGenerator::new(Format::RoundRobin)
            .with_home_and_away(true)
            .generate(&teams(4))
            .unwrap();
        assert_eq!(contests.len(), 12);

        let oriented: HashSet<(&str, &str)> = contests
            .iter()
            .map(|c| (c.home.id.as_str(), c.away.id.as_str()))
            .collect();
        assert_eq!(oriented.len(), 12);
        for c in &contests {
            assert!(oriented.contains(&(c.away.id.as_str(), c.home.id.as_str())));
        }

        assert!(contests[..6].iter().all(|c| c.leg == Leg::First));
        assert!(contests[6..].iter().all(|c| c.leg == Leg::Second));
        assert_eq!(contests[6].round, Some(3));
    }

    #[test]
    fn test_groups_8x3() {
        let contests = PairingGenerator::new(Format::Groups8x3)
            .generate(&teams(6))
            .unwrap();
        // Two groups of three, three contests each.
        assert_eq!(contests.len(), 6);
        assert!(contests.iter().all(|c| c.group.is_some()));
        assert_eq!(contests.iter().filter(|c| c.group == Some(0)).count(), 3);

        // Round r of all groups precedes round r + 1.
        let rounds: Vec<usize> = contests.iter().map(|c| c.round.unwrap()).collect();
        assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_groups_4x6() {
        let contests = PairingGenerator::new(Format::Groups4x6)
            .with_home_and_away(true)
            .generate(&teams(12))
            .unwrap();
        assert_eq!(contests.len(), 2 * 2 * 15);
        // No contest crosses groups.
        let a = contests.iter().find(|c| c.group == Some(0)).unwrap();
        let b = contests.iter().find(|c| c.group == Some(1)).unwrap();
        assert!(!a.involves(&b.home.id) && !a.involves(&b.away.id));
    }

    #[test]
    fn test_format_error() {
        let err = PairingGenerator::new(Format::Groups8x3)
            .generate(&teams(4))
            .unwrap_err();
        assert!(matches!(err, FixtureError::Format(_)));

        let err = PairingGenerator::new(Format::RoundRobin)
            .generate(&teams(1))
            .unwrap_err();
        assert!(matches!(err, FixtureError::Format(_)));
    }

    #[test]
    fn test_generate_contests_matches_generator() {
        let direct = generate_contests(&teams(6), Format::Groups8x3, true, Some(3))
            .unwrap();
        let built = PairingGenerator::new(Format::Groups8x3)
            .with_home_and_away(true)
            .with_shuffle_seed(3)
            .generate(&teams(6))
            .unwrap();
        assert_eq!(direct, built);
        assert_eq!(direct.len(), 12);
    }

    #[test]
    fn test_deterministic() {
        let generator = PairingGenerator::new(Format::Groups8x3)
            .with_shuffle_seed(5);
        let a = generator.generate(&teams(9)).unwrap();
        let b = generator.generate(&teams(9)).unwrap();
        assert_eq!(a, b);
    }
}
