//! Engine error types.
//!
//! Every failure aborts the whole generation call; no partial schedule is
//! ever returned.

use thiserror::Error;

use crate::models::Contest;
use crate::validation::ValidationError;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Coarse error category, for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or inconsistent configuration.
    Config,
    /// Team count incompatible with the chosen format.
    Format,
    /// The slot grid cannot host all contests.
    Capacity,
}

/// Fixture generation errors.
#[derive(Debug, Clone, Error)]
pub enum FixtureError {
    /// Configuration failed shape validation.
    #[error("invalid configuration: {}", join_messages(.0))]
    Config(Vec<ValidationError>),

    /// Team count does not fit the format.
    #[error("format error: {0}")]
    Format(String),

    /// Not enough room in the day/field/time grid.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Capacity failures, with the data needed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// More contests than slots in the whole grid.
    #[error("capacity exceeded: {required} contests but only {available} slots")]
    Deficit { required: usize, available: usize },

    /// A team needs more matches than it can play over all days, given the
    /// daily cap and the number of slots per day.
    #[error("team '{team_id}' needs {required} matches but at most {allowed} fit in the grid")]
    TeamOverCap {
        team_id: String,
        required: usize,
        allowed: usize,
    },

    /// No feasible slot exists for this contest.
    #[error("no feasible slot for contest {contest}")]
    Unplaceable { contest: Box<Contest> },
}

impl FixtureError {
    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FixtureError::Config(_) => ErrorKind::Config,
            FixtureError::Format(_) => ErrorKind::Format,
            FixtureError::Capacity(_) => ErrorKind::Capacity,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
