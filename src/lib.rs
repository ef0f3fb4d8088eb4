//! Cup tournament manager: library with models, draw and progression logic,
//! and the persistence, roster, and score-entry collaborators.

pub mod config;
pub mod console;
pub mod logic;
pub mod models;
pub mod roster;
pub mod storage;

pub use config::Config;
pub use console::{parse_score, ConsoleScoreProvider};
pub use logic::{
    draw_permutation, draw_round, progress_round, seed_round, DriverError, DriverOptions,
    RoundProgress, ScoreContext, ScoreProvider, ScriptedScores, Step, TournamentDriver,
};
pub use models::{
    round_name, round_plan, CupTournament, Match, Outcome, Round, RoundState, Score, Team,
    TournamentError, TournamentStatus,
};
pub use roster::{
    check_unique_names, load_roster, parse_csv_roster, parse_json_roster, tournament_key,
    RosterError,
};
pub use storage::{InMemoryStore, JsonFileStore, StorageError, TournamentStore};
