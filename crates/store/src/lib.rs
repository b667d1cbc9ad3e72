//! Best-score persistence.
//!
//! A single record stored as JSON in the user's data directory. The
//! store is strictly best-effort: a missing file, unreadable JSON, or a
//! failed write never disturbs gameplay. Loading falls back to zero and
//! saving swallows I/O errors.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk record, versioned so the format can grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Handle to the persisted best score.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    /// None when no writable data directory exists; the store then
    /// degrades to an in-session no-op.
    path: Option<PathBuf>,
}

impl HighScoreStore {
    /// Store rooted in the platform data directory
    /// (e.g. `~/.local/share/block-drop/high_score.json`).
    pub fn open() -> Self {
        let path = dirs::data_dir().map(|dir| dir.join("block-drop").join("high_score.json"));
        Self { path }
    }

    /// Store rooted at an explicit file path, for tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// The best score on record, zero when absent or unreadable.
    pub fn load(&self) -> u32 {
        let Some(path) = &self.path else {
            return 0;
        };
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<HighScoreRecord>(&json).ok())
            .map(|record| record.high_score)
            .unwrap_or(0)
    }

    /// Persist `score` if it beats the stored best.
    ///
    /// Returns the best score after the call. Write failures are
    /// swallowed; the returned value still reflects the new best for
    /// the current session.
    pub fn save_if_best(&self, score: u32) -> u32 {
        let best = self.load();
        if score <= best {
            return best;
        }
        if let Some(path) = &self.path {
            let record = HighScoreRecord { high_score: score };
            if let Ok(json) = serde_json::to_string(&record) {
                if let Some(parent) = path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                let _ = fs::write(path, json);
            }
        }
        score
    }
}
