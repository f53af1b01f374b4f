//! Fixture configuration.
//!
//! [`ScheduleConfig`] is the single, fully-typed configuration consumed by
//! the engine. Defaults are applied once, in [`ScheduleConfig::new`] or when
//! deserializing the request payload, never inside the algorithms.
//!
//! # Payload
//!
//! | key | type | default |
//! |-----|------|---------|
//! | `system` | `"rr"` \| `"8x3"` \| `"4x6"` | `"rr"` |
//! | `days`, `fields` | integer | 1 |
//! | `start_time`, `end_time` | `"HH:MM"` | `"09:00"`, `"18:00"` |
//! | `match_duration` | minutes | 60 |
//! | `rest` | minutes | `match_duration` |
//! | `midday_break` | `["HH:MM", "HH:MM"]` or null | null |
//! | `home_and_away` | bool | false |
//! | `max_matches_per_day` | integer or null | null |
//! | `shuffle_seed` | integer or null | null |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{TimeOfDay, TimeWindow};

/// Tournament format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Format {
    /// Single round robin over all teams.
    #[default]
    #[serde(rename = "rr")]
    RoundRobin,
    /// Groups of three (eight groups for a full 24-team field).
    #[serde(rename = "8x3")]
    Groups8x3,
    /// Groups of six (four groups for a full 24-team field).
    #[serde(rename = "4x6")]
    Groups4x6,
}

impl Format {
    /// Required group size, or `None` for a single round robin.
    pub fn group_size(self) -> Option<usize> {
        match self {
            Format::RoundRobin => None,
            Format::Groups8x3 => Some(3),
            Format::Groups4x6 => Some(6),
        }
    }

    /// Selector string as used in the request payload.
    pub fn selector(self) -> &'static str {
        match self {
            Format::RoundRobin => "rr",
            Format::Groups8x3 => "8x3",
            Format::Groups4x6 => "4x6",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rr" => Ok(Format::RoundRobin),
            "8x3" => Ok(Format::Groups8x3),
            "4x6" => Ok(Format::Groups4x6),
            other => Err(format!(
                "unknown format selector '{other}', expected one of rr, 8x3, 4x6"
            )),
        }
    }
}

/// Complete fixture configuration.
///
/// All durations are in minutes. Shape checks (chronological windows,
/// positive counts) live in [`crate::validation::validate_config`] so that
/// every problem is reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigPayload", into = "ConfigPayload")]
pub struct ScheduleConfig {
    /// Pairing strategy.
    pub format: Format,
    /// Number of competition days.
    pub days: u32,
    /// Number of parallel fields per day.
    pub fields: u32,
    /// Daily bookable window start.
    pub start_time: TimeOfDay,
    /// Daily bookable window end.
    pub end_time: TimeOfDay,
    /// Length of one match (and of one slot).
    pub match_duration: u32,
    /// Minimum gap between a team's consecutive matches on the same day.
    pub rest: u32,
    /// Excluded interval repeated every day.
    pub midday_break: Option<TimeWindow>,
    /// Play every pairing twice with venue roles swapped.
    pub home_and_away: bool,
    /// Per-team daily match cap.
    pub max_matches_per_day: Option<u32>,
    /// Seed for shuffling teams before group partitioning.
    pub shuffle_seed: Option<u64>,
}

const DEFAULT_MATCH_DURATION: u32 = 60;

const DEFAULT_START: TimeOfDay = TimeOfDay::at_hour(9);
const DEFAULT_END: TimeOfDay = TimeOfDay::at_hour(18);

impl ScheduleConfig {
    /// Creates a configuration with defaults: round robin, one day, one
    /// field, 09:00-18:00, 60-minute matches, 60-minute rest, no break,
    /// single leg, no daily cap.
    pub fn new() -> Self {
        Self {
            format: Format::RoundRobin,
            days: 1,
            fields: 1,
            start_time: DEFAULT_START,
            end_time: DEFAULT_END,
            match_duration: DEFAULT_MATCH_DURATION,
            rest: DEFAULT_MATCH_DURATION,
            midday_break: None,
            home_and_away: false,
            max_matches_per_day: None,
            shuffle_seed: None,
        }
    }

    /// Sets the format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the number of days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Sets the number of fields.
    pub fn with_fields(mut self, fields: u32) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the daily window.
    pub fn with_window(mut self, start: TimeOfDay, end: TimeOfDay) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Sets the match duration (minutes).
    pub fn with_match_duration(mut self, minutes: u32) -> Self {
        self.match_duration = minutes;
        self
    }

    /// Sets the rest duration (minutes).
    pub fn with_rest(mut self, minutes: u32) -> Self {
        self.rest = minutes;
        self
    }

    /// Sets the midday break.
    pub fn with_midday_break(mut self, start: TimeOfDay, end: TimeOfDay) -> Self {
        self.midday_break = Some(TimeWindow::new(start, end));
        self
    }

    /// Enables or disables home-and-away.
    pub fn with_home_and_away(mut self, enabled: bool) -> Self {
        self.home_and_away = enabled;
        self
    }

    /// Sets the per-team daily cap.
    pub fn with_max_matches_per_day(mut self, max: u32) -> Self {
        self.max_matches_per_day = Some(max);
        self
    }

    /// Sets the group shuffle seed.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// The daily bookable window.
    pub fn daily_window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire shape of the configuration as sent by the request layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigPayload {
    system: Option<String>,
    days: Option<u32>,
    fields: Option<u32>,
    start_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
    match_duration: Option<u32>,
    rest: Option<u32>,
    midday_break: Option<Vec<TimeOfDay>>,
    home_and_away: Option<bool>,
    max_matches_per_day: Option<u32>,
    shuffle_seed: Option<u64>,
}

impl TryFrom<ConfigPayload> for ScheduleConfig {
    type Error = String;

    fn try_from(p: ConfigPayload) -> Result<Self, Self::Error> {
        let defaults = ScheduleConfig::new();
        let format = match p.system {
            Some(s) => s.parse()?,
            None => defaults.format,
        };
        let midday_break = match p.midday_break.as_deref() {
            None => None,
            Some([start, end]) => Some(TimeWindow::new(*start, *end)),
            Some(other) => {
                return Err(format!(
                    "midday_break must be [start, end], got {} value(s)",
                    other.len()
                ))
            }
        };
        let match_duration = p.match_duration.unwrap_or(defaults.match_duration);

        Ok(Self {
            format,
            days: p.days.unwrap_or(defaults.days),
            fields: p.fields.unwrap_or(defaults.fields),
            start_time: p.start_time.unwrap_or(defaults.start_time),
            end_time: p.end_time.unwrap_or(defaults.end_time),
            match_duration,
            rest: p.rest.unwrap_or(match_duration),
            midday_break,
            home_and_away: p.home_and_away.unwrap_or(defaults.home_and_away),
            max_matches_per_day: p.max_matches_per_day,
            shuffle_seed: p.shuffle_seed,
        })
    }
}

impl From<ScheduleConfig> for ConfigPayload {
    fn from(c: ScheduleConfig) -> Self {
        Self {
            system: Some(c.format.selector().to_string()),
            days: Some(c.days),
            fields: Some(c.fields),
            start_time: Some(c.start_time),
            end_time: Some(c.end_time),
            match_duration: Some(c.match_duration),
            rest: Some(c.rest),
            midday_break: c.midday_break.map(|w| vec![w.start, w.end]),
            home_and_away: Some(c.home_and_away),
            max_matches_per_day: c.max_matches_per_day,
            shuffle_seed: c.shuffle_seed,
        }
    }
}
