//! Group partitioning for structured formats.
//!
//! # Rule
//!
//! - If every team carries a zone label, the zones are the groups, in order
//!   of first appearance. Each zone must hold exactly the group size.
//! - Otherwise the team list (optionally shuffled with a seed) is dealt into
//!   `n / size` groups by serpentine seeding: seeds 1..g go to groups 1..g,
//!   seeds g+1..2g go back from group g to group 1, and so on. This spreads
//!   the head of the list (usually the strongest seeds) across groups.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{FixtureError, Result};
use crate::models::Team;

/// Splits `teams` into groups of exactly `size`.
///
/// # Errors
/// [`FixtureError::Format`] if the team count is not a positive multiple of
/// `size`, or if zone labels do not form groups of that size.
pub fn partition(teams: &[Team], size: usize, shuffle_seed: Option<u64>) -> Result<Vec<Vec<Team>>> {
    if size < 2 {
        return Err(FixtureError::Format(format!(
            "group size must be at least 2, got {size}"
        )));
    }
    if teams.is_empty() || teams.len() % size != 0 {
        return Err(FixtureError::Format(format!(
            "{} teams cannot be split into groups of {size}",
            teams.len()
        )));
    }

    if teams.iter().all(|t| t.zone.is_some()) {
        return by_zone(teams, size);
    }

    let mut order = teams.to_vec();
    if let Some(seed) = shuffle_seed {
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);
    }
    Ok(serpentine(order, teams.len() / size))
}

fn by_zone(teams: &[Team], size: usize) -> Result<Vec<Vec<Team>>> {
    let mut labels: Vec<&str> = Vec::new();
    let mut groups: Vec<Vec<Team>> = Vec::new();

    for team in teams {
        let zone = team.zone.as_deref().unwrap_or_default();
        match labels.iter().position(|&l| l == zone) {
            Some(idx) => groups[idx].push(team.clone()),
            None => {
                labels.push(zone);
                groups.push(vec![team.clone()]);
            }
        }
    }

    if let Some((label, group)) = labels.iter().zip(&groups).find(|(_, g)| g.len() != size) {
        return Err(FixtureError::Format(format!(
            "zone '{label}' has {} teams, expected {size}",
            group.len()
        )));
    }
    Ok(groups)
}

fn serpentine(order: Vec<Team>, group_count: usize) -> Vec<Vec<Team>> {
    let mut groups: Vec<Vec<Team>> = vec![Vec::new(); group_count];
    for (i, team) in order.into_iter().enumerate() {
        let pass = i / group_count;
        let pos = i % group_count;
        let g = if pass % 2 == 0 {
            pos
        } else {
            group_count - 1 - pos
        };
        groups[g].push(team);
    }
    groups
}
