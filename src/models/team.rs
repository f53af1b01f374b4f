//! Team model.
//!
//! A team is a competing party. Teams are produced by the import layer and
//! never mutated by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A team taking part in the fixture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Zone (group) label assigned at import time, if any.
    ///
    /// When every team carries a zone, structured formats use the zones
    /// as groups instead of seeding their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Team {
    /// Creates a new team with the given ID and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone: None,
        }
    }

    /// Sets the zone label.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Display label: the name, or the ID if the name is blank.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
