//! Runtime configuration from environment variables.
//!
//! | Variable        | Default                              |
//! |-----------------|--------------------------------------|
//! | `CUP_DATA_DIR`  | `$HOME/CupTournamentManagerData`     |
//! | `CUP_ROSTER`    | `FullTeamsList.json`                 |
//! | `CUP_DRAW_SEED` | unset (draws use fresh entropy)      |
//! | `HOST`          | `0.0.0.0`                            |
//! | `PORT`          | `8080`                               |

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Directory holding saved tournaments.
    pub data_dir: PathBuf,
    /// Roster file a new tournament is created from.
    pub roster_path: PathBuf,
    /// Fixed seed for reproducible draws.
    pub draw_seed: Option<u64>,
    pub host: String,
    pub port: u16,
}

fn default_data_dir(home: Option<String>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("CupTournamentManagerData")
}

fn default_roster() -> PathBuf {
    PathBuf::from("FullTeamsList.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("CUP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(lookup("HOME")));
        let roster_path = lookup("CUP_ROSTER")
            .map(PathBuf::from)
            .unwrap_or_else(default_roster);
        let draw_seed = lookup("CUP_DRAW_SEED").and_then(|s| match s.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("Ignoring CUP_DRAW_SEED={:?}: not a number", s);
                None
            }
        });
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = match lookup("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                log::warn!("Ignoring PORT: not a valid port number");
                default_port()
            }
            None => default_port(),
        };
        Self {
            data_dir,
            roster_path,
            draw_seed,
            host,
            port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
