//! Roster loading: the ranked team list a tournament is created from.
//!
//! JSON rosters are an array of `{"rank": 1, "name": "..."}` objects (other fields
//! are ignored); CSV rosters have a `rank,name` header.

use crate::models::Team;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Errors loading a roster.
#[derive(Debug)]
pub enum RosterError {
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    /// File extension is neither `.json` nor `.csv`.
    UnsupportedFormat(String),
    /// Team names must be unique (case-insensitive).
    DuplicateName(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(e) => write!(f, "Could not read roster: {}", e),
            RosterError::Json(e) => write!(f, "Roster is not valid JSON: {}", e),
            RosterError::Csv(e) => write!(f, "Roster is not valid CSV: {}", e),
            RosterError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported roster format '{}' (use .json or .csv)", ext)
            }
            RosterError::DuplicateName(name) => write!(f, "Team '{}' appears more than once", name),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<io::Error> for RosterError {
    fn from(e: io::Error) -> Self {
        RosterError::Io(e)
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Json(e)
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// Load a roster, picking the parser from the file extension.
pub fn load_roster(path: &Path) -> Result<Vec<Team>, RosterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    log::info!("Teams will be loaded from {}", path.display());
    match ext.as_str() {
        "json" => parse_json_roster(&fs::read_to_string(path)?),
        "csv" => parse_csv_roster(fs::File::open(path)?),
        _ => Err(RosterError::UnsupportedFormat(ext)),
    }
}

pub fn parse_json_roster(json: &str) -> Result<Vec<Team>, RosterError> {
    let teams: Vec<Team> = serde_json::from_str(json)?;
    check_unique_names(teams)
}

pub fn parse_csv_roster<R: io::Read>(reader: R) -> Result<Vec<Team>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let teams = rdr.deserialize().collect::<Result<Vec<Team>, _>>()?;
    check_unique_names(teams)
}

/// Tournament key for a roster file: its file stem (`FullTeamsList.json` -> `FullTeamsList`).
pub fn tournament_key(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cup".to_string())
}

/// Reject rosters that name the same team twice (case-insensitive).
pub fn check_unique_names(teams: Vec<Team>) -> Result<Vec<Team>, RosterError> {
    let mut seen = HashSet::new();
    for team in &teams {
        if !seen.insert(team.name.to_lowercase()) {
            return Err(RosterError::DuplicateName(team.name.clone()));
        }
    }
    Ok(teams)
}
