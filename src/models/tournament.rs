//! CupTournament, its status, and the round plan.

use crate::models::round::Round;
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A bracket needs at least two teams.
    NotEnoughTeams { found: usize },
    /// The round was given fewer entrants than its byes plus competitors.
    NotEnoughEntrants {
        round: String,
        needed: usize,
        available: usize,
    },
    /// Competitors are paired, so the count must be even.
    OddCompetitorCount { round: String, count: usize },
    /// The round already has matches.
    AlreadyDrawn(String),
    /// Progress was requested before the round had entrants.
    NoEntrants(String),
    /// Winners were requested from a round that is not complete.
    IndeterminateWinner(String),
    /// Every match is decided but matches and byes do not cover the entrants.
    UnbalancedRound(String),
    /// No round at this index.
    RoundOutOfRange(usize),
    /// The score provider could not supply a score.
    ScoreUnavailable(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { found } => {
                write!(f, "Need at least 2 teams to form a bracket (found {})", found)
            }
            TournamentError::NotEnoughEntrants {
                round,
                needed,
                available,
            } => write!(
                f,
                "{} needs {} teams but only {} were added",
                round, needed, available
            ),
            TournamentError::OddCompetitorCount { round, count } => {
                write!(f, "{} cannot pair an odd number of teams ({})", round, count)
            }
            TournamentError::AlreadyDrawn(round) => write!(f, "{} has already been drawn", round),
            TournamentError::NoEntrants(round) => {
                write!(f, "Add teams to {} before progressing it", round)
            }
            TournamentError::IndeterminateWinner(round) => {
                write!(f, "{} still has matches without a winner", round)
            }
            TournamentError::UnbalancedRound(round) => {
                write!(f, "{} matches and byes do not account for every entrant", round)
            }
            TournamentError::RoundOutOfRange(index) => write!(f, "No round at index {}", index),
            TournamentError::ScoreUnavailable(reason) => write!(f, "No score available: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Overall progress of the tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TournamentStatus {
    /// `current_round` is the first round that is not complete.
    InProgress { current_round: usize },
    Complete,
}

impl TournamentStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, TournamentStatus::Complete)
    }
}

/// Full tournament state: roster and rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CupTournament {
    /// Persistence key, e.g. the roster file stem.
    pub name: String,
    /// Full entry list, fixed at creation.
    pub teams: Vec<Team>,
    /// Qualifying (if any) first, Final last.
    pub rounds: Vec<Round>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CupTournament {
    /// Create a tournament and its round plan. Rounds start empty.
    pub fn create(name: impl Into<String>, teams: Vec<Team>) -> Result<Self, TournamentError> {
        let rounds = round_plan(teams.len())?;
        let now = Utc::now();
        Ok(Self {
            name: name.into(),
            teams,
            rounds,
            created_at: now,
            updated_at: now,
        })
    }

    /// First incomplete round, or `Complete`.
    pub fn status(&self) -> TournamentStatus {
        match self.rounds.iter().position(|r| !r.is_complete()) {
            Some(current_round) => TournamentStatus::InProgress { current_round },
            None => TournamentStatus::Complete,
        }
    }

    pub fn round(&self, index: usize) -> Result<&Round, TournamentError> {
        self.rounds
            .get(index)
            .ok_or(TournamentError::RoundOutOfRange(index))
    }

    pub fn round_mut(&mut self, index: usize) -> Result<&mut Round, TournamentError> {
        self.rounds
            .get_mut(index)
            .ok_or(TournamentError::RoundOutOfRange(index))
    }

    /// Winner of the Final, once every round is complete.
    pub fn champion(&self) -> Option<&Team> {
        if !self.status().is_complete() {
            return None;
        }
        self.rounds.last()?.matches.first()?.winner()
    }
}

/// Display name for a bracket round with `size` competitors.
pub fn round_name(size: usize) -> String {
    match size {
        2 => "Final".to_string(),
        4 => "Semi Finals".to_string(),
        8 => "Quarter Finals".to_string(),
        _ => format!("Round of {}", size),
    }
}

/// Rounds for `team_count` teams: a Qualifying round that cuts the field to a
/// power of two (omitted when it already is one), then halving rounds down to the Final.
pub fn round_plan(team_count: usize) -> Result<Vec<Round>, TournamentError> {
    if team_count < 2 {
        return Err(TournamentError::NotEnoughTeams { found: team_count });
    }
    let bracket_size = largest_power_of_two(team_count);
    let to_eliminate = team_count - bracket_size;

    let mut rounds = Vec::new();
    if to_eliminate > 0 {
        let competitors = to_eliminate * 2;
        rounds.push(Round::new("Qualifying", competitors, team_count - competitors));
    }

    let mut size = bracket_size;
    while size >= 2 {
        rounds.push(Round::new(round_name(size), size, 0));
        size /= 2;
    }
    Ok(rounds)
}

/// Greatest power of two <= n (n >= 1).
fn largest_power_of_two(n: usize) -> usize {
    1 << (usize::BITS - 1 - n.leading_zeros())
}
