//! Round progression: one unit of work per call (draw, record one result, or complete).

use crate::logic::draw::draw_round;
use crate::models::{Match, Round, RoundState, Score, TournamentError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// What a requested score is for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreContext {
    Match,
    Penalties,
}

impl fmt::Display for ScoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreContext::Match => f.write_str("match"),
            ScoreContext::Penalties => f.write_str("penalties"),
        }
    }
}

/// Supplies scores for matches. Asked again for penalties while it returns a draw.
pub trait ScoreProvider {
    fn match_score(&mut self, fixture: &Match, context: ScoreContext) -> Result<Score, TournamentError>;
}

/// Scores handed out in order; runs dry with `ScoreUnavailable`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedScores {
    scores: VecDeque<Score>,
}

impl ScriptedScores {
    pub fn new(scores: impl IntoIterator<Item = Score>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
        }
    }

    pub fn push(&mut self, score: Score) {
        self.scores.push_back(score);
    }

    pub fn remaining(&self) -> usize {
        self.scores.len()
    }
}

impl ScoreProvider for ScriptedScores {
    fn match_score(&mut self, fixture: &Match, context: ScoreContext) -> Result<Score, TournamentError> {
        self.scores.pop_front().ok_or_else(|| {
            TournamentError::ScoreUnavailable(format!("no {} score left for {}", context, fixture))
        })
    }
}

/// What a single progression step did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum RoundProgress {
    Drawn,
    ResultRecorded { match_index: usize },
    Completed,
}

/// Advance a round by one step.
///
/// - No entrants: error.
/// - Not drawn: make the draw.
/// - All matches decided: mark complete (repeat calls are no-ops).
///   The flag is also set as soon as the last result is recorded.
/// - Otherwise: record a result for the first undecided match, with a
///   non-drawn shoot-out if the result is a draw.
pub fn progress_round<P, R>(
    round: &mut Round,
    provider: &mut P,
    rng: &mut R,
) -> Result<RoundProgress, TournamentError>
where
    P: ScoreProvider + ?Sized,
    R: Rng + ?Sized,
{
    match round.state() {
        RoundState::NeedsEntrants => {
            log::error!("Add teams to {} before progressing", round.name);
            Err(TournamentError::NoEntrants(round.name.clone()))
        }
        RoundState::NeedsDraw => {
            draw_round(round, rng)?;
            log::info!("{} drawn: {} matches", round.name, round.matches.len());
            Ok(RoundProgress::Drawn)
        }
        RoundState::Complete => {
            round.complete = true;
            log::info!("{} is complete", round.name);
            Ok(RoundProgress::Completed)
        }
        RoundState::AwaitingResults => {
            let Some(match_index) = round.next_undecided() else {
                return Err(TournamentError::UnbalancedRound(round.name.clone()));
            };
            let fixture = &round.matches[match_index];
            log::info!("Next incomplete match is {}", fixture);

            let result = provider.match_score(fixture, ScoreContext::Match)?;
            let penalties = if result.is_draw() {
                Some(penalty_score(fixture, provider)?)
            } else {
                None
            };
            round.matches[match_index].record(result, penalties);
            log::info!("Recorded {}", round.matches[match_index]);
            round.complete = round.is_complete();
            Ok(RoundProgress::ResultRecorded { match_index })
        }
    }
}

fn penalty_score<P: ScoreProvider + ?Sized>(
    fixture: &Match,
    provider: &mut P,
) -> Result<Score, TournamentError> {
    loop {
        let score = provider.match_score(fixture, ScoreContext::Penalties)?;
        if !score.is_draw() {
            return Ok(score);
        }
        log::warn!("Penalties cannot end in a draw ({}), asking again", score);
    }
}
