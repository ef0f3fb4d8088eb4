//! Round: one stage of the cup with its entrants, byes and drawn matches.

use crate::models::game::Match;
use crate::models::team::Team;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No entrants assigned yet.
    NeedsEntrants,
    /// Entrants assigned, draw not made.
    NeedsDraw,
    /// Drawn; at least one match has no winner.
    AwaitingResults,
    Complete,
}

/// One stage of the cup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    /// How many entrants are drawn into matches.
    pub target_competitors: usize,
    /// How many of the strongest entrants skip this round.
    #[serde(default)]
    pub target_byes: usize,
    #[serde(default)]
    pub entrants: Vec<Team>,
    /// In draw order.
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub byes: Vec<Team>,
    /// Set by the progression step once every match has a winner.
    #[serde(default)]
    pub complete: bool,
}

impl Round {
    /// A round with no entrants yet.
    pub fn new(name: impl Into<String>, target_competitors: usize, target_byes: usize) -> Self {
        Self {
            name: name.into(),
            target_competitors,
            target_byes,
            entrants: Vec::new(),
            matches: Vec::new(),
            byes: Vec::new(),
            complete: false,
        }
    }

    pub fn has_entrants(&self) -> bool {
        !self.entrants.is_empty()
    }

    pub fn is_drawn(&self) -> bool {
        !self.matches.is_empty()
    }

    /// `2 * matches + byes == entrants`.
    fn counts_balance(&self) -> bool {
        self.matches.len() * 2 + self.byes.len() == self.entrants.len()
    }

    /// True when drawn, balanced, and every match has a winner. Never errors.
    pub fn is_complete(&self) -> bool {
        self.has_entrants()
            && self.is_drawn()
            && self.counts_balance()
            && self.matches.iter().all(Match::is_decided)
    }

    pub fn state(&self) -> RoundState {
        if !self.has_entrants() {
            RoundState::NeedsEntrants
        } else if !self.is_drawn() {
            RoundState::NeedsDraw
        } else if self.is_complete() {
            RoundState::Complete
        } else {
            RoundState::AwaitingResults
        }
    }

    /// Index of the first match (in draw order) without a winner.
    pub fn next_undecided(&self) -> Option<usize> {
        self.matches.iter().position(|m| !m.is_decided())
    }

    /// Match winners (in draw order) followed by the bye teams.
    ///
    /// Only valid once the round is complete.
    pub fn advancing_teams(&self) -> Result<Vec<Team>, TournamentError> {
        if !self.is_complete() {
            return Err(TournamentError::IndeterminateWinner(self.name.clone()));
        }
        let winners = self.matches.iter().filter_map(Match::winner).cloned();
        Ok(winners.chain(self.byes.iter().cloned()).collect())
    }
}
