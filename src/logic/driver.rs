//! Tournament driver: status -> seed -> progress -> save, one step at a time.

use crate::logic::progress::{progress_round, RoundProgress, ScoreProvider};
use crate::logic::setup::seed_round;
use crate::models::{CupTournament, Team, TournamentError, TournamentStatus};
use crate::roster::RosterError;
use crate::storage::{StorageError, TournamentStore};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Errors from driving a tournament: core rules, storage, or roster.
#[derive(Debug)]
pub enum DriverError {
    Tournament(TournamentError),
    Storage(StorageError),
    Roster(RosterError),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Tournament(e) => write!(f, "{}", e),
            DriverError::Storage(e) => write!(f, "{}", e),
            DriverError::Roster(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<TournamentError> for DriverError {
    fn from(e: TournamentError) -> Self {
        DriverError::Tournament(e)
    }
}

impl From<StorageError> for DriverError {
    fn from(e: StorageError) -> Self {
        DriverError::Storage(e)
    }
}

impl From<RosterError> for DriverError {
    fn from(e: RosterError) -> Self {
        DriverError::Roster(e)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DriverOptions {
    /// Fixed seed for reproducible draws; each round's draw is seeded with
    /// `seed + round index`.
    pub draw_seed: Option<u64>,
}

/// Result of one driver step.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Step {
    Progressed {
        round_index: usize,
        round_name: String,
        progress: RoundProgress,
    },
    /// Nothing left to do.
    Complete,
}

/// Moves a tournament forward and saves it after every step.
pub struct TournamentDriver<S> {
    store: S,
    options: DriverOptions,
}

impl<S: TournamentStore> TournamentDriver<S> {
    pub fn new(store: S, options: DriverOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the tournament saved under `key`, or create and save a new one
    /// from the roster returned by `roster`.
    pub fn load_or_create<F>(&mut self, key: &str, roster: F) -> Result<CupTournament, DriverError>
    where
        F: FnOnce() -> Result<Vec<Team>, RosterError>,
    {
        if let Some(tournament) = self.store.load(key)? {
            log::info!(
                "Tournament '{}' loaded, status {:?}",
                key,
                tournament.status()
            );
            return Ok(tournament);
        }
        log::info!("No saved tournament '{}', creating a new one", key);
        let tournament = CupTournament::create(key, roster()?)?;
        self.store.save(&tournament)?;
        log::info!(
            "New tournament saved with {} teams and {} rounds",
            tournament.teams.len(),
            tournament.rounds.len()
        );
        Ok(tournament)
    }

    /// One step: seed the current round if it has no entrants, progress it, save.
    pub fn step<P>(&mut self, tournament: &mut CupTournament, provider: &mut P) -> Result<Step, DriverError>
    where
        P: ScoreProvider + ?Sized,
    {
        let round_index = match tournament.status() {
            TournamentStatus::Complete => return Ok(Step::Complete),
            TournamentStatus::InProgress { current_round } => current_round,
        };
        log::info!("Tournament is not complete, current round is {}", round_index);

        if !tournament.round(round_index)?.has_entrants() {
            seed_round(tournament, round_index)?;
        }

        let mut rng = self.draw_rng(round_index);
        let round = tournament.round_mut(round_index)?;
        let progress = progress_round(round, provider, &mut rng)?;
        let round_name = round.name.clone();

        tournament.updated_at = Utc::now();
        self.store.save(tournament)?;
        log::info!("Saved after {:?} in {}", progress, round_name);

        Ok(Step::Progressed {
            round_index,
            round_name,
            progress,
        })
    }

    /// Step until the tournament is complete; returns the champion.
    pub fn run<P>(&mut self, tournament: &mut CupTournament, provider: &mut P) -> Result<Team, DriverError>
    where
        P: ScoreProvider + ?Sized,
    {
        while self.step(tournament, provider)? != Step::Complete {}
        tournament
            .champion()
            .cloned()
            .ok_or_else(|| TournamentError::IndeterminateWinner("Final".to_string()).into())
    }

    fn draw_rng(&self, round_index: usize) -> StdRng {
        match self.options.draw_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(round_index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}
