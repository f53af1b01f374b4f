//! Contest (pairing) model.
//!
//! A contest is a required encounter between two teams, without any time
//! information. Contests are produced once by the pairing generator and
//! consumed in order by the schedule builder.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Team;

/// Which pass of a fixture a contest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    /// Single or first pass.
    #[default]
    First,
    /// Return fixture with venue roles swapped.
    Second,
}

/// A required contest between two teams.
///
/// `home` and `away` are ordered; the orientation only carries meaning when
/// the fixture is played home-and-away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    /// Home (first-named) team.
    pub home: Team,
    /// Away (second-named) team.
    pub away: Team,
    /// Round index (0-based), shared across groups.
    pub round: Option<usize>,
    /// Group index (0-based) for structured formats.
    pub group: Option<usize>,
    /// Pass this contest belongs to.
    #[serde(default)]
    pub leg: Leg,
}

impl Contest {
    /// Creates a first-leg contest with no round or group.
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home,
            away,
            round: None,
            group: None,
            leg: Leg::First,
        }
    }

    /// Sets the round index.
    pub fn with_round(mut self, round: usize) -> Self {
        self.round = Some(round);
        self
    }

    /// Sets the group index.
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }

    /// Returns the return fixture: roles swapped, second leg, round offset.
    pub fn reversed(&self, round_offset: usize) -> Self {
        Self {
            home: self.away.clone(),
            away: self.home.clone(),
            round: self.round.map(|r| r + round_offset),
            group: self.group,
            leg: Leg::Second,
        }
    }

    /// Whether the given team takes part.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }

    /// Team IDs as an unordered key (lexicographically sorted).
    pub fn pair_key(&self) -> (&str, &str) {
        let (a, b) = (self.home.id.as_str(), self.away.id.as_str());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl fmt::Display for Contest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)?;
        if let Some(round) = self.round {
            write!(f, " (round {})", round + 1)?;
        }
        Ok(())
    }
}
