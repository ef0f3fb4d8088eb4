//! Team: a ranked cup entrant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A team in the cup. Lower rank means a stronger seed.
///
/// Names are unique within a roster, so the name doubles as the team's identity.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub rank: u32,
    pub name: String,
}

impl Team {
    /// Create a team with the given rank and name.
    pub fn new(rank: u32, name: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
