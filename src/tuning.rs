//! Difficulty profiles
//!
//! Static table mapping a difficulty id to its gameplay parameters. The
//! built-in table can be replaced by a JSON document for balancing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" | "med" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Actor auto-scroll per frame step (pixels)
    pub speed: f32,
    /// Customers placed at session start
    pub target_count: u32,
    /// Session length in whole seconds
    pub time_limit_secs: u32,
    /// Papers available for the whole session
    pub ammunition: u32,
    /// Shown on the HUD; nothing in the game takes them away
    pub lives: u32,
}

impl DifficultyProfile {
    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        let invalid = |field| ConfigError::InvalidProfile { difficulty, field };
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(invalid("speed"));
        }
        if self.target_count == 0 {
            return Err(invalid("target_count"));
        }
        if self.time_limit_secs == 0 {
            return Err(invalid("time_limit_secs"));
        }
        if self.ammunition == 0 {
            return Err(invalid("ammunition"));
        }
        if self.lives == 0 {
            return Err(invalid("lives"));
        }
        Ok(())
    }
}

/// One profile per difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyProfile,
    pub normal: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile {
                speed: 2.0,
                target_count: 5,
                time_limit_secs: 60,
                ammunition: 15,
                lives: 5,
            },
            normal: DifficultyProfile {
                speed: 3.0,
                target_count: 7,
                time_limit_secs: 45,
                ammunition: 10,
                lives: 3,
            },
            hard: DifficultyProfile {
                speed: 4.0,
                target_count: 10,
                time_limit_secs: 30,
                ammunition: 8,
                lives: 2,
            },
        }
    }
}

impl DifficultyTable {
    /// Load a replacement table, rejecting any non-positive parameter
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: DifficultyTable = serde_json::from_str(json)?;
        for difficulty in Difficulty::ALL {
            table.profile(difficulty).validate(difficulty)?;
        }
        log::info!("Loaded difficulty table override");
        Ok(table)
    }

    /// Read a replacement table from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    /// Resolve a textual difficulty id
    pub fn lookup(&self, id: &str) -> Result<(Difficulty, DifficultyProfile), ConfigError> {
        let difficulty: Difficulty = id.parse()?;
        Ok((difficulty, self.profile(difficulty)))
    }
}
