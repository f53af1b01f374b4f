//! Schedule (solution) model.
//!
//! A schedule is the ordered list of matches, each a contest bound to a
//! bookable slot. Matches are kept in assignment order, which follows the
//! pairing order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Contest, TimeOfDay, TimeWindow};

/// A bookable interval on one field of one day.
///
/// `day` and `field` are 0-based; display renders them 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day index (0-based).
    pub day: u32,
    /// Field index (0-based).
    pub field: u32,
    /// Start time (inclusive).
    pub start: TimeOfDay,
    /// End time (exclusive).
    pub end: TimeOfDay,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: u32, field: u32, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            day,
            field,
            start,
            end,
        }
    }

    /// The slot's time interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} field {} {}-{}",
            self.day + 1,
            self.field + 1,
            self.start,
            self.end
        )
    }
}

/// A contest bound to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The pairing being played.
    pub contest: Contest,
    /// When and where it is played.
    pub slot: Slot,
}

impl Match {
    /// Creates a new match.
    pub fn new(contest: Contest, slot: Slot) -> Self {
        Self { contest, slot }
    }

    /// Whether the given team plays in this match.
    #[inline]
    pub fn involves(&self, team_id: &str) -> bool {
        self.contest.involves(team_id)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.slot, self.contest)
    }
}

/// A complete fixture schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Matches in assignment order.
    pub matches: Vec<Match>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a match.
    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the schedule has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Iterates matches in assignment order.
    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// Returns all matches for a team, in assignment order.
    pub fn matches_for_team(&self, team_id: &str) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(team_id)).collect()
    }

    /// Returns all matches on a day.
    pub fn matches_on_day(&self, day: u32) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.slot.day == day).collect()
    }

    /// Returns all matches on a field of a day, sorted by start time.
    pub fn matches_on_field(&self, day: u32, field: u32) -> Vec<&Match> {
        let mut out: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| m.slot.day == day && m.slot.field == field)
            .collect();
        out.sort_by_key(|m| m.slot.start);
        out
    }

    /// Latest match end on a day.
    pub fn last_end_on_day(&self, day: u32) -> Option<TimeOfDay> {
        self.matches
            .iter()
            .filter(|m| m.slot.day == day)
            .map(|m| m.slot.end)
            .max()
    }

    /// Matches sorted chronologically (day, start, field), for display.
    pub fn chronological(&self) -> Vec<&Match> {
        let mut out: Vec<&Match> = self.matches.iter().collect();
        out.sort_by_key(|m| (m.slot.day, m.slot.start, m.slot.field));
        out
    }

    /// Consumes the schedule, returning its matches.
    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// A broken schedule invariant, as reported by
/// [`verify_schedule`](crate::validation::verify_schedule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (team ID or `day/field` key).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Match interval leaves the daily window (or the day/field grid).
    OutsideWindow,
    /// Two matches share a field at the same time.
    FieldOverlap,
    /// A team's consecutive matches are closer than the rest duration.
    InsufficientRest,
    /// Match intersects the midday break.
    BreakIntersection,
    /// A team exceeds the daily cap.
    DailyCapExceeded,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}
