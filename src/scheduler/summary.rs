//! Schedule summary metrics.
//!
//! Computes headline numbers from a completed schedule and its
//! configuration, for display by the export layer.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Matches | Number of scheduled matches |
//! | Capacity | days x fields x slots per field per day |
//! | Utilization | matches / capacity |
//! | Per day / per field | Match counts by day and by field |
//! | Per team | Match count by team ID |
//! | Last end | Latest match end on each day |

use std::collections::BTreeMap;

use crate::models::{Schedule, ScheduleConfig, TimeOfDay};
use crate::slots::SlotAllocator;

/// Schedule summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    /// Number of matches.
    pub total_matches: usize,
    /// Slots available in the grid.
    pub capacity: usize,
    /// Fraction of slots used (0.0..1.0).
    pub utilization: f64,
    /// Match count per day (index = day).
    pub matches_per_day: Vec<usize>,
    /// Match count per field across all days (index = field).
    pub matches_per_field: Vec<usize>,
    /// Match count per team ID.
    pub matches_per_team: BTreeMap<String, usize>,
    /// Latest match end per day (`None` for an empty day).
    pub last_end_per_day: Vec<Option<TimeOfDay>>,
}

impl ScheduleSummary {
    /// Computes the summary.
    ///
    /// Matches outside the configured grid are counted in the totals but
    /// not in the per-day or per-field breakdowns.
    pub fn calculate(schedule: &Schedule, config: &ScheduleConfig) -> Self {
        let capacity = SlotAllocator::new(config).total_capacity();
        let mut matches_per_day = vec![0; config.days as usize];
        let mut matches_per_field = vec![0; config.fields as usize];
        let mut matches_per_team: BTreeMap<String, usize> = BTreeMap::new();

        for m in schedule {
            if let Some(n) = matches_per_day.get_mut(m.slot.day as usize) {
                *n += 1;
            }
            if let Some(n) = matches_per_field.get_mut(m.slot.field as usize) {
                *n += 1;
            }
            for team in [&m.contest.home, &m.contest.away] {
                *matches_per_team.entry(team.id.clone()).or_insert(0) += 1;
            }
        }

        let last_end_per_day = (0..config.days)
            .map(|d| schedule.last_end_on_day(d))
            .collect();

        let utilization = if capacity == 0 {
            0.0
        } else {
            schedule.len() as f64 / capacity as f64
        };

        Self {
            total_matches: schedule.len(),
            capacity,
            utilization,
            matches_per_day,
            matches_per_field,
            matches_per_team,
            last_end_per_day,
        }
    }

    /// Number of days with at least one match.
    pub fn days_used(&self) -> usize {
        self.matches_per_day.iter().filter(|&&n| n > 0).count()
    }

    /// Difference between the busiest and the quietest team.
    pub fn team_spread(&self) -> usize {
        let max = self.matches_per_team.values().max().copied().unwrap_or(0);
        let min = self.matches_per_team.values().min().copied().unwrap_or(0);
        max - min
    }
}
