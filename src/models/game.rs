//! Match: a single cup tie between a home and an away team.

use crate::models::score::{Outcome, Score};
use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tie. The winner is derived from the scores, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub home: Team,
    pub away: Team,
    /// None if not yet played.
    #[serde(default)]
    pub result: Option<Score>,
    /// Shoot-out score; only meaningful when `result` is a draw.
    #[serde(default)]
    pub penalties: Option<Score>,
}

impl Match {
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home,
            away,
            result: None,
            penalties: None,
        }
    }

    /// The winning team, or `None` while the tie is undecided.
    ///
    /// A drawn result needs a non-drawn shoot-out before there is a winner.
    pub fn winner(&self) -> Option<&Team> {
        let result = self.result?;
        let decider = match result.outcome() {
            Outcome::Draw => self.penalties?,
            _ => result,
        };
        match decider.outcome() {
            Outcome::HomeWin => Some(&self.home),
            Outcome::AwayWin => Some(&self.away),
            Outcome::Draw => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// Record the result (and shoot-out, when the result is a draw).
    pub fn record(&mut self, result: Score, penalties: Option<Score>) {
        self.result = Some(result);
        self.penalties = if result.is_draw() { penalties } else { None };
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v {}", self.home, self.away)?;
        if let Some(result) = self.result {
            write!(f, " ({result}")?;
            if let Some(pens) = self.penalties {
                write!(f, ", {pens} pens")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
