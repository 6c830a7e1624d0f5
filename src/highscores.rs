//! Best score persistence
//!
//! Persisted to LocalStorage. Autopilot runs never reach this: the
//! simulation only reports a new best for manual runs.

use serde::{Deserialize, Serialize};

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "iso_runner_highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Record a finished run. Returns true if it beat the stored best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScore>(&json) {
                    Ok(score) => {
                        log::info!("Loaded high score {}", score.best);
                        return score;
                    }
                    Err(e) => log::warn!("Ignoring stored high score: {e}"),
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save high score");
                    return;
                }
                log::info!("High score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_only_raises() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(50));
        assert!(!hs.submit(100));
        assert_eq!(hs.best, 100);
        assert!(hs.submit(101));
        assert_eq!(hs.best, 101);
    }

    #[test]
    fn test_json_shape() {
        let hs = HighScore::new(1234);
        let json = serde_json::to_string(&hs).unwrap();
        assert_eq!(json, r#"{"best":1234}"#);
        assert_eq!(serde_json::from_str::<HighScore>(&json).unwrap(), hs);
    }
}
