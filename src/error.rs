//! Error types for configuration and session misuse

use thiserror::Error;

use crate::tuning::Difficulty;

/// Bad or unknown difficulty configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("difficulty {difficulty}: `{field}` must be a finite value greater than zero")]
    InvalidProfile {
        difficulty: Difficulty,
        field: &'static str,
    },
    #[error("malformed difficulty table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read difficulty table: {0}")]
    Io(#[from] std::io::Error),
}

/// Session operation invoked in the wrong lifecycle state or with bad arguments
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session state: {0}")]
    InvalidState(&'static str),
    #[error("playfield {width}x{height} has no area")]
    InvalidPlayfield { width: u32, height: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SessionError::InvalidState(_))
    }
}
