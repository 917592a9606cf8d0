//! High score persistence
//!
//! A single best score, stored as a bare JSON number. The running game owns
//! the live value; this type only moves it in and out of storage.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Best score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "rift_runner_highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Load from the store, falling back to zero on missing or bad data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        match serde_json::from_str::<u64>(&raw) {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score {:?}: {}", raw, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(&self.best) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("High score saved ({})", self.best);
                } else {
                    log::warn!("Failed to save high score");
                }
            }
            Err(e) => log::warn!("Failed to encode high score: {}", e),
        }
    }
}
