use std::path::PathBuf;

use thiserror::Error;

/// Startup failure while reading the roster or the map catalog.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("map entry {entry:?} is missing the `__` display-name delimiter")]
    InvalidMapName { entry: String },

    #[error("unknown game mode key {key:?}")]
    UnknownGameMode { key: String },

    #[error("game mode {key:?} is listed more than once")]
    DuplicateGameMode { key: String },

    #[error("game mode {mode:?} has no maps")]
    MissingGameMode { mode: &'static str },

    #[error("team name {entry:?} is reserved for drawn games")]
    ReservedTeamName { entry: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCountBoundaryWarning {
    #[error("Cannot have more than {0} games.")]
    Maximum(usize),

    #[error("Cannot have less than {0} games.")]
    Minimum(usize),
}

/// Rejected user selection. The board is left in a consistent state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("In {label}, both teams must be different ({team} picked twice).")]
    DuplicateTeamSelection { label: String, team: String },

    #[error(transparent)]
    GameCountBoundary(#[from] GameCountBoundaryWarning),

    #[error("In {label}, {winner} is not playing in this match.")]
    WinnerNotInMatch { label: String, winner: String },

    #[error("no match slot {index} (have {len})")]
    MatchOutOfRange { index: usize, len: usize },

    #[error("In {label}, there is no game {game}.")]
    GameOutOfRange { label: String, game: usize },

    #[error("the roster has an even team count, there is no bye slot")]
    ByeUnavailable,
}

/// First structural problem found at generation time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("In {label}, both teams must be selected.")]
    MissingTeam { label: String },

    #[error("In {label}, both teams are the same.")]
    SameTeams { label: String },

    #[error("In {label}, game {game} must have a map and a winner selected.")]
    IncompleteGame { label: String, game: usize },
}

impl ValidationError {
    pub fn label(&self) -> &str {
        match self {
            ValidationError::MissingTeam { label }
            | ValidationError::SameTeams { label }
            | ValidationError::IncompleteGame { label, .. } => label,
        }
    }
}

#[derive(Error, Debug)]
#[error("Failed to save last week's matches to {}: {source}", .path.display())]
pub struct ArchiveWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
