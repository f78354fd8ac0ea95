//! Finished-session results
//!
//! Append-only flat list, persisted to LocalStorage on the web. Sorting for
//! display belongs to the reader, never to the writer.

use serde::{Deserialize, Serialize};

use crate::sim::FinalResult;
use crate::tuning::Difficulty;

/// Receives each session's result exactly once, when it ends
pub trait ResultsStore {
    fn record(&mut self, result: FinalResult);
}

/// Every result recorded so far, in the order sessions ended
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResultLog {
    pub entries: Vec<FinalResult>,
}

impl ResultsStore for ResultLog {
    fn record(&mut self, result: FinalResult) {
        log::info!(
            "Recorded result: {} points on {}",
            result.score,
            result.difficulty
        );
        self.entries.push(result);
    }
}

impl ResultLog {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highScores";

    /// Create empty log
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Results ordered best first; ties keep recording order
    pub fn ranked(&self) -> Vec<&FinalResult> {
        let mut ranked: Vec<&FinalResult> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Best score recorded for a difficulty
    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .map(|e| e.score)
            .max()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// Load results from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(log) => {
                        log::info!("Loaded {} past results", log.len());
                        return log;
                    }
                    Err(e) => log::warn!("Discarding unreadable results: {}", e),
                }
            }
        }

        log::info!("No past results found, starting fresh");
        Self::new()
    }

    /// Save results to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Results saved ({} entries)", self.entries.len());
                }
                Err(e) => log::error!("Failed to serialize results: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
