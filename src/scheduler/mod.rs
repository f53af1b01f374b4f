//! Greedy schedule building and summary metrics.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` uses a greedy, single-pass, earliest-feasible-slot
//! heuristic. It is not optimal (it may leave gaps a smarter search would
//! fill) but it is deterministic and fast.
//!
//! # Summary
//!
//! `ScheduleSummary` computes match counts per day, field and team, and
//! grid utilization.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"

mod builder;
mod summary;

pub use builder::ScheduleBuilder;
pub use summary::ScheduleSummary;
