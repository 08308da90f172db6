//! Persisted high score
//!
//! A single scalar kept in LocalStorage, read once at startup and written at
//! most once per session (on game over, when beaten). Missing or corrupt
//! data degrades to 0.

use serde::{Deserialize, Serialize};

/// The best score seen across sessions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_high_score";

    pub fn new(score: u32) -> Self {
        Self { score }
    }

    /// Whether `score` beats the stored record
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.score
    }

    /// Load the high score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(high) = serde_json::from_str::<HighScore>(&json) {
                    log::info!("Loaded high score: {}", high.score);
                    return high;
                }
                log::warn!("High score entry unreadable, starting from 0");
            }
        }

        Self::default()
    }

    /// Save the high score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved: {}", self.score);
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
    fn test_default_is_zero() {
        assert_eq!(HighScore::default().score, 0);
    }

    #[test]
    fn test_beaten_only_by_strictly_higher() {
        let high = HighScore::new(80);
        assert!(high.beaten_by(95));
        assert!(!high.beaten_by(80));
        assert!(!high.beaten_by(50));
    }

    #[test]
    fn test_round_trips_through_json() {
        let high = HighScore::new(95);
        let json = serde_json::to_string(&high).unwrap();
        let back: HighScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 95);
    }
}
