//! Score and Outcome: a scoreline and who it favours.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side a scoreline favours.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A scoreline, used both for the match itself and for a penalty shoot-out.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    /// Outcome derived from the two scores; never stored.
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering::*;
        match self.home.cmp(&self.away) {
            Greater => Outcome::HomeWin,
            Less => Outcome::AwayWin,
            Equal => Outcome::Draw,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome() == Outcome::Draw
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}
