//! Input validation and schedule verification.
//!
//! Checks structural integrity of the configuration and team list before
//! scheduling, rejects trivially infeasible grids before the greedy pass,
//! and audits finished schedules. Detects:
//! - Non-positive day/field counts and match duration
//! - Non-chronological daily window or midday break
//! - Duplicate or blank team IDs
//! - Contest count above grid capacity
//! - Teams needing more matches than the grid lets them play

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::error::CapacityError;
use crate::models::{Contest, Match, Schedule, ScheduleConfig, Team, Violation, ViolationType};
use crate::slots::SlotAllocator;

/// Largest accepted number of competition days.
pub const MAX_DAYS: u32 = 366;

/// Largest accepted number of parallel fields.
pub const MAX_FIELDS: u32 = 1024;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `days` is zero.
    ZeroDays,
    /// `fields` is zero.
    ZeroFields,
    /// `days` exceeds [`MAX_DAYS`].
    TooManyDays,
    /// `fields` exceeds [`MAX_FIELDS`].
    TooManyFields,
    /// `match_duration` is zero.
    ZeroMatchDuration,
    /// `max_matches_per_day` is zero.
    ZeroDailyCap,
    /// Daily window start is not before its end.
    WindowNotChronological,
    /// Midday break start is not before its end.
    BreakNotChronological,
    /// No slot fits in the daily window.
    WindowTooShort,
    /// Two teams share the same ID.
    DuplicateId,
    /// A team has a blank ID.
    EmptyId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the shape of a configuration.
///
/// Checks:
/// 1. `0 < days <= MAX_DAYS` and `0 < fields <= MAX_FIELDS`
/// 2. `match_duration > 0` (`rest` may be zero)
/// 3. `max_matches_per_day`, if set, is positive
/// 4. `start_time < end_time`
/// 5. Midday break, if set, has `start < end`
/// 6. At least one slot fits in the window once the break is removed
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &ScheduleConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroDays,
            "days must be positive",
        ));
    }
    if config.fields == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroFields,
            "fields must be positive",
        ));
    }
    if config.days > MAX_DAYS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyDays,
            format!("days must be at most {MAX_DAYS}, got {}", config.days),
        ));
    }
    if config.fields > MAX_FIELDS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyFields,
            format!("fields must be at most {MAX_FIELDS}, got {}", config.fields),
        ));
    }
    if config.match_duration == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroMatchDuration,
            "match_duration must be positive",
        ));
    }
    if config.max_matches_per_day == Some(0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroDailyCap,
            "max_matches_per_day must be positive when set",
        ));
    }

    let window = config.daily_window();
    if !window.is_chronological() {
        errors.push(ValidationError::new(
            ValidationErrorKind::WindowNotChronological,
            format!(
                "start_time {} must be before end_time {}",
                window.start, window.end
            ),
        ));
    }
    if let Some(brk) = config.midday_break {
        if !brk.is_chronological() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BreakNotChronological,
                format!(
                    "midday_break start {} must be before its end {}",
                    brk.start, brk.end
                ),
            ));
        }
    }

    // Only meaningful once the window and duration are sane.
    if errors.is_empty() && SlotAllocator::new(config).slots_per_field_day() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::WindowTooShort,
            format!(
                "no {}-minute match fits in {} outside the midday break",
                config.match_duration, window
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the team list.
///
/// Checks:
/// 1. No blank team IDs
/// 2. No duplicate team IDs
pub fn validate_teams(teams: &[Team]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for team in teams {
        if team.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Team '{}' has a blank ID", team.name),
            ));
            continue;
        }
        if !ids.insert(team.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", team.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rejects grids that cannot possibly host the contests.
///
/// Checks, in order:
/// 1. Total contests <= days x fields x slots per field per day
/// 2. Per team: required matches <= days x min(daily cap, slots per day).
///    A team can never play two matches in the same time slot, so a day
///    holds at most as many of its matches as one field has slots.
///
/// Passing does not guarantee the greedy pass succeeds; rest and the order
/// of assignment can still leave a contest unplaceable.
pub fn check_capacity(contests: &[Contest], config: &ScheduleConfig) -> Result<(), CapacityError> {
    let slots = SlotAllocator::new(config);
    let available = slots.total_capacity();
    if contests.len() > available {
        warn!(
            required = contests.len(),
            available,
            "contest count exceeds grid capacity"
        );
        return Err(CapacityError::Deficit {
            required: contests.len(),
            available,
        });
    }

    let per_day = match config.max_matches_per_day {
        Some(cap) => (cap as usize).min(slots.slots_per_field_day()),
        None => slots.slots_per_field_day(),
    };
    let allowed = per_day.saturating_mul(config.days as usize);

    let mut required: BTreeMap<&str, usize> = BTreeMap::new();
    for contest in contests {
        *required.entry(&contest.home.id).or_default() += 1;
        *required.entry(&contest.away.id).or_default() += 1;
    }
    if let Some((team_id, &count)) = required.iter().find(|(_, n)| **n > allowed) {
        warn!(
            team = *team_id,
            required = count,
            allowed,
            "team cannot fit its matches"
        );
        return Err(CapacityError::TeamOverCap {
            team_id: team_id.to_string(),
            required: count,
            allowed,
        });
    }

    Ok(())
}

/// Audits a schedule against every match invariant.
///
/// Returns all violations found (empty = valid). Violations are reported
/// in a deterministic order: per-match checks in schedule order, then
/// field overlaps, then per-team checks by team ID.
pub fn verify_schedule(schedule: &Schedule, config: &ScheduleConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let window = config.daily_window();

    for m in schedule {
        let slot = &m.slot;
        if slot.day >= config.days || slot.field >= config.fields {
            violations.push(Violation::new(
                ViolationType::OutsideWindow,
                grid_key(m),
                format!("{m} is outside the {}x{} grid", config.days, config.fields),
            ));
        }
        if !slot.window().is_chronological() || !window.encloses(&slot.window()) {
            violations.push(Violation::new(
                ViolationType::OutsideWindow,
                grid_key(m),
                format!("{m} is outside the daily window {window}"),
            ));
        }
        if let Some(brk) = config.midday_break {
            if slot.window().overlaps(&brk) {
                violations.push(Violation::new(
                    ViolationType::BreakIntersection,
                    grid_key(m),
                    format!("{m} intersects the midday break {brk}"),
                ));
            }
        }
    }

    let mut by_field: BTreeMap<(u32, u32), Vec<&Match>> = BTreeMap::new();
    for m in schedule {
        by_field
            .entry((m.slot.day, m.slot.field))
            .or_default()
            .push(m);
    }
    for ((day, field), mut matches) in by_field {
        matches.sort_by_key(|m| m.slot.start);
        for pair in matches.windows(2) {
            if pair[1].slot.start < pair[0].slot.end {
                violations.push(Violation::new(
                    ViolationType::FieldOverlap,
                    format!("{}/{}", day + 1, field + 1),
                    format!("{} overlaps {}", pair[1], pair[0]),
                ));
            }
        }
    }

    let mut by_team_day: BTreeMap<(&str, u32), Vec<&Match>> = BTreeMap::new();
    for m in schedule {
        for id in [&m.contest.home.id, &m.contest.away.id] {
            by_team_day
                .entry((id.as_str(), m.slot.day))
                .or_default()
                .push(m);
        }
    }
    for ((team_id, day), mut matches) in by_team_day {
        matches.sort_by_key(|m| m.slot.start);
        for pair in matches.windows(2) {
            let earliest = pair[0].slot.end.minutes().saturating_add(config.rest);
            if pair[1].slot.start.minutes() < earliest {
                violations.push(Violation::new(
                    ViolationType::InsufficientRest,
                    team_id,
                    format!(
                        "team {team_id} rests less than {} minutes between {} and {}",
                        config.rest, pair[0], pair[1]
                    ),
                ));
            }
        }
        if let Some(cap) = config.max_matches_per_day {
            if matches.len() > cap as usize {
                violations.push(Violation::new(
                    ViolationType::DailyCapExceeded,
                    team_id,
                    format!(
                        "team {team_id} plays {} matches on day {} (cap {cap})",
                        matches.len(),
                        day + 1
                    ),
                ));
            }
        }
    }

    violations
}

fn grid_key(m: &Match) -> String {
    format!("{}/{}", m.slot.day + 1, m.slot.field + 1)
}
