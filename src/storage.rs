//! Tournament persistence: a store keyed by tournament name.

use crate::models::CupTournament;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors reading or writing saved tournaments.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "Tournament file error: {}", e),
            StorageError::Json(e) => write!(f, "Tournament file is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Where tournaments are kept between runs.
pub trait TournamentStore {
    /// `Ok(None)` when no tournament is saved under `key`.
    fn load(&self, key: &str) -> Result<Option<CupTournament>, StorageError>;

    /// Save under the tournament's name, replacing any previous save.
    fn save(&mut self, tournament: &CupTournament) -> Result<(), StorageError>;
}

/// One pretty-printed JSON file per tournament in a data directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/CupTournament_<key>.json`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("CupTournament_{}.json", key))
    }
}

impl TournamentStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<CupTournament>, StorageError> {
        let path = self.path_for(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tournament = serde_json::from_str(&json)?;
        log::debug!("Loaded tournament from {}", path.display());
        Ok(Some(tournament))
    }

    fn save(&mut self, tournament: &CupTournament) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&tournament.name);
        let json = serde_json::to_string_pretty(tournament)?;
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Saved tournament to {}", path.display());
        Ok(())
    }
}

/// In-memory store for tests and throwaway runs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    tournaments: HashMap<String, CupTournament>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}

impl TournamentStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<CupTournament>, StorageError> {
        Ok(self.tournaments.get(key).cloned())
    }

    fn save(&mut self, tournament: &CupTournament) -> Result<(), StorageError> {
        self.tournaments
            .insert(tournament.name.clone(), tournament.clone());
        Ok(())
    }
}
