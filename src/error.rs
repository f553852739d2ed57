//! Error types for the softball league admin library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Credentials not provided and {env_var} environment variable not set")]
    MissingCredentials { env_var: String },

    #[error("Invalid user or password")]
    InvalidCredentials,

    #[error("Permission denied: {action}")]
    PermissionDenied { action: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("A team named '{name}' already exists")]
    DuplicateTeamName { name: String },

    #[error("Team not found: {id}")]
    TeamNotFound { id: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Match not found: {id}")]
    MatchNotFound { id: String },

    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    #[error("Invalid turn result: {code}")]
    InvalidTurnResult { code: String },
}

impl LeagueError {
    /// Shorthand for a validation failure with a user-facing message.
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for LeagueError {
    fn from(err: anyhow::Error) -> Self {
        LeagueError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for LeagueError {
    fn from(err: rusqlite::Error) -> Self {
        LeagueError::Storage {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
