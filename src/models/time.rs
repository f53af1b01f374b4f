//! Time-of-day and time window models.
//!
//! # Time Model
//! All times are minutes since midnight of the scheduling day. Days are
//! indexed separately (see [`Slot`](super::Slot)); a match never spans
//! midnight.
//!
//! Windows are half-open: a match ending at 13:00 does not intersect a
//! break starting at 13:00.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time within a day, in minutes since midnight.
///
/// Parsed from and rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

/// Minutes in a day. `24:00` is accepted as an end-of-day marker.
const DAY_MINUTES: u32 = 24 * 60;

impl TimeOfDay {
    /// Creates a time from hours and minutes.
    ///
    /// Returns `None` for out-of-range values.
    pub fn hm(hours: u32, minutes: u32) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .and_then(Self::from_minutes)
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= DAY_MINUTES).then_some(Self(minutes))
    }

    /// Whole hour, for compile-time constants. Callers pass hours <= 24.
    pub(crate) const fn at_hour(hours: u32) -> Self {
        Self(hours * 60)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Adds minutes, returning `None` past the end of the day.
    pub fn plus(self, minutes: u32) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("invalid time '{s}', expected HH:MM"))?;
        let hours: u32 = h
            .parse()
            .map_err(|_| format!("invalid hours in time '{s}'"))?;
        let minutes: u32 = m
            .parse()
            .map_err(|_| format!("invalid minutes in time '{s}'"))?;
        Self::hm(hours, minutes)
            .ok_or_else(|| format!("time '{s}' is out of range"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive).
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Duration of this window in minutes (0 if not chronological).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether `start < end`.
    #[inline]
    pub fn is_chronological(&self) -> bool {
        self.start < self.end
    }

    /// Whether a time falls within this window.
    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
