//! Data structures for the cup: teams, scores, matches, rounds, tournament.

mod game;
mod round;
mod score;
mod team;
mod tournament;

pub use game::Match;
pub use round::{Round, RoundState};
pub use score::{Outcome, Score};
pub use team::Team;
pub use tournament::{round_name, round_plan, CupTournament, TournamentError, TournamentStatus};
