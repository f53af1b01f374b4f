//! Fixture domain models.
//!
//! Provides the data types shared by pairing, slot allocation, and schedule
//! building.
//!
//! # Domain Mappings
//!
//! | fixture-schedule | Football | Chess | Esports |
//! |------------------|----------|-------|---------|
//! | Team | Club | Player | Roster |
//! | Contest | Fixture | Pairing | Series |
//! | Slot | Pitch booking | Board & round | Server window |
//! | Schedule | Fixture list | Round schedule | Match calendar |

mod config;
mod contest;
mod schedule;
mod team;
mod time;

pub use config::{Format, ScheduleConfig};
pub use contest::{Contest, Leg};
pub use schedule::{Match, Schedule, Slot, Violation, ViolationType};
pub use team::Team;
pub use time::{TimeOfDay, TimeWindow};
