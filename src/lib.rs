//! Fixture generation engine.
//!
//! Assigns the pairwise contests of a tournament to concrete time slots
//! across several days and parallel fields, subject to rest, midday-break,
//! and daily-cap constraints. The engine is a pure function of
//! `(teams, config)`: it holds no state between calls, performs no I/O,
//! and returns either a complete schedule or a typed error.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Contest`, `ScheduleConfig`,
//!   `Slot`, `Match`, `Schedule`, `TimeOfDay`, `TimeWindow`
//! - **`pairing`**: Round-robin (circle method) and group pairings
//! - **`slots`**: Lazy enumeration of bookable slots per day and field
//! - **`scheduler`**: Greedy earliest-feasible-slot builder and summary
//! - **`validation`**: Config/team checks, capacity precheck, schedule audit
//!
//! # Pipeline
//!
//! `generate` validates the configuration and teams, generates pairings,
//! rejects grids that are too small, then assigns contests greedily.
//!
//! ```
//! use fixture_schedule::{generate, models::{ScheduleConfig, Team}};
//!
//! let teams: Vec<Team> = ["A", "B", "C", "D"]
//!     .iter()
//!     .map(|id| Team::new(*id, format!("Team {id}")))
//!     .collect();
//! let config = ScheduleConfig::new().with_rest(0);
//!
//! let schedule = generate(&teams, &config).unwrap();
//! assert_eq!(schedule.len(), 6);
//! ```
//!
//! # References
//!
//! - de Werra (1981), "Scheduling in sports"
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"

pub mod error;
pub mod models;
pub mod pairing;
pub mod scheduler;
pub mod slots;
pub mod validation;

pub use error::{CapacityError, ErrorKind, FixtureError, Result};

use tracing::info;

use crate::models::{Schedule, ScheduleConfig, Team};
use crate::pairing::PairingGenerator;
use crate::scheduler::ScheduleBuilder;
use crate::validation::{check_capacity, validate_config, validate_teams};

/// Generates a complete schedule for `teams` under `config`.
///
/// # Errors
/// - [`FixtureError::Config`]: malformed configuration or team list
/// - [`FixtureError::Format`]: team count incompatible with the format
/// - [`FixtureError::Capacity`]: the grid cannot host every contest
pub fn generate(teams: &[Team], config: &ScheduleConfig) -> Result<Schedule> {
    validate_config(config).map_err(FixtureError::Config)?;
    validate_teams(teams).map_err(FixtureError::Config)?;

    let contests = PairingGenerator::from_config(config).generate(teams)?;
    check_capacity(&contests, config)?;

    info!(
        teams = teams.len(),
        contests = contests.len(),
        format = %config.format,
        days = config.days,
        fields = config.fields,
        "generating fixture"
    );
    let schedule = ScheduleBuilder::new(config).build(&contests)?;
    debug_assert!(validation::verify_schedule(&schedule, config).is_empty());
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Format, Leg, TimeOfDay};
    use crate::validation::verify_schedule;
    use std::collections::HashSet;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn teams(n: usize) -> Vec<Team> {
        (0..n)
            .map(|i| {
                let id = ((b'A' + i as u8) as char).to_string();
                Team::new(id.clone(), format!("Team {id}"))
            })
            .collect()
    }

    #[test]
    fn test_four_teams_one_field_hourly() {
        init_tracing();
        let config = ScheduleConfig::new()
            .with_window(t("09:00"), t("18:00"))
            .with_match_duration(60)
            .with_rest(0);
        let schedule = generate(&teams(4), &config).unwrap();

        assert_eq!(schedule.len(), 6);
        assert!(schedule
            .iter()
            .all(|m| m.slot.day == 0 && m.slot.field == 0));
        let starts: Vec<String> = schedule.iter().map(|m| m.slot.start.to_string()).collect();
        assert_eq!(
            starts,
            vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00"]
        );
    }

    #[test]
    fn test_8x3_with_four_teams_is_format_error() {
        let config = ScheduleConfig::new().with_format(Format::Groups8x3);
        let err = generate(&teams(4), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_home_and_away_without_room_for_rest() {
        let config = ScheduleConfig::new()
            .with_window(t("09:00"), t("11:00"))
            .with_rest(60)
            .with_home_and_away(true);
        let err = generate(&teams(2), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        match err {
            FixtureError::Capacity(CapacityError::Unplaceable { contest }) => {
                assert_eq!(contest.leg, Leg::Second);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_capacity_boundary() {
        // 6 contests, 6 slots.
        let exact = ScheduleConfig::new()
            .with_window(t("09:00"), t("15:00"))
            .with_rest(0);
        assert_eq!(generate(&teams(4), &exact).unwrap().len(), 6);

        // 6 contests, 5 slots.
        let short = exact.clone().with_window(t("09:00"), t("14:00"));
        let err = generate(&teams(4), &short).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Capacity(CapacityError::Deficit {
                required: 6,
                available: 5
            })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = ScheduleConfig::new()
            .with_days(0)
            .with_window(t("18:00"), t("09:00"));
        let err = generate(&teams(4), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        match err {
            FixtureError::Config(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_grid_is_config_error() {
        let config = ScheduleConfig::new()
            .with_days(u32::MAX)
            .with_fields(u32::MAX);
        let err = generate(&teams(4), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_duplicate_teams() {
        let mut ts = teams(3);
        ts.push(Team::new("A", "Again"));
        let err = generate(&ts, &ScheduleConfig::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_full_constraints_hold() {
        init_tracing();
        let config = ScheduleConfig::new()
            .with_days(6)
            .with_fields(3)
            .with_window(t("09:00"), t("18:00"))
            .with_midday_break(t("13:00"), t("14:00"))
            .with_rest(30)
            .with_max_matches_per_day(3)
            .with_home_and_away(true);
        let schedule = generate(&teams(6), &config).unwrap();

        assert_eq!(schedule.len(), 30);
        assert!(verify_schedule(&schedule, &config).is_empty());

        let oriented: HashSet<(&str, &str)> = schedule
            .iter()
            .map(|m| (m.contest.home.id.as_str(), m.contest.away.id.as_str()))
            .collect();
        assert_eq!(oriented.len(), 30);
    }

    #[test]
    fn test_groups_schedule() {
        let config = ScheduleConfig::new()
            .with_format(Format::Groups4x6)
            .with_days(3)
            .with_fields(2)
            .with_rest(0)
            .with_shuffle_seed(11);
        let schedule = generate(&teams(12), &config).unwrap();
        assert_eq!(schedule.len(), 30);
        assert!(verify_schedule(&schedule, &config).is_empty());
    }

    #[test]
    fn test_odd_team_count() {
        let config = ScheduleConfig::new().with_fields(2).with_days(2);
        let schedule = generate(&teams(5), &config).unwrap();
        assert_eq!(schedule.len(), 10);
        for team in teams(5) {
            assert_eq!(schedule.matches_for_team(&team.id).len(), 4);
        }
        assert!(verify_schedule(&schedule, &config).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let config = ScheduleConfig::new()
            .with_days(5)
            .with_fields(2)
            .with_midday_break(t("12:00"), t("13:30"))
            .with_rest(15)
            .with_max_matches_per_day(2);
        let a = generate(&teams(8), &config).unwrap();
        let b = generate(&teams(8), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_request_payload() {
        let config: ScheduleConfig = serde_json::from_str(
            r#"{"system": "rr", "days": 3, "fields": 2, "rest": 0,
                "midday_break": ["13:00", "14:00"], "max_matches_per_day": 2}"#,
        )
        .unwrap();
        let schedule = generate(&teams(6), &config).unwrap();
        assert_eq!(schedule.len(), 15);
        assert!(verify_schedule(&schedule, &config).is_empty());

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["matches"].as_array().unwrap().len(), 15);
        assert!(json["matches"][0]["slot"]["start"].is_string());
    }
}
