//! Player preferences
//!
//! Persisted in LocalStorage, separate from the game config.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Skip the collect flash (markers vanish instead of scaling/fading)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective SFX gain (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Flip mute and return the new effective volume
    pub fn toggle_muted(&mut self) -> f32 {
        self.muted = !self.muted;
        self.effective_volume()
    }

    /// Parse stored JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "star_collector_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut s = Settings::default();
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
        s.muted = false;
        s.master_volume = 3.0;
        s.sfx_volume = 0.5;
        assert_eq!(s.effective_volume(), 0.5);
    }

    #[test]
    fn test_toggle_muted() {
        let mut s = Settings::default();
        assert_eq!(s.toggle_muted(), 0.0);
        assert!(s.muted);
        assert!((s.toggle_muted() - 0.8).abs() < 1e-6);
        assert!(!s.muted);

        let stored = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json_or_default(&stored), s);
    }

    #[test]
    fn test_from_json_or_default() {
        let s = Settings::from_json_or_default(r#"{ "muted": true }"#);
        assert!(s.muted);
        assert_eq!(s.sfx_volume, 1.0);
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
