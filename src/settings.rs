//! Game settings and preferences
//!
//! Persisted separately from game saves.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, SETTINGS_KEY, Storage};
use crate::tuning::{Difficulty, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Controls ===
    /// Scales the paddle axis (0.1 - 1.0)
    pub paddle_sensitivity: f32,
    /// Let the game play itself
    pub autoplay: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Host behaviour ===
    /// Pause when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            paddle_sensitivity: 1.0,
            autoplay: false,
            show_fps: true,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Balance for the chosen difficulty
    pub fn tuning(&self) -> Tuning {
        Tuning::for_difficulty(self.difficulty)
    }

    /// Apply sensitivity to a raw axis value, clamped to [-1, 1].
    /// Garbage from the host (NaN, infinities) reads as no input.
    pub fn scale_axis(&self, axis: f32) -> f32 {
        if !axis.is_finite() {
            return 0.0;
        }
        (axis * self.paddle_sensitivity.clamp(0.1, 1.0)).clamp(-1.0, 1.0)
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load::<Settings>(storage, SETTINGS_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> persistence::Result<()> {
        persistence::save(storage, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_tuning_follows_difficulty() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        assert_eq!(settings.tuning(), Tuning::for_difficulty(Difficulty::Hard));
    }

    #[test]
    fn test_scale_axis() {
        let settings = Settings {
            paddle_sensitivity: 0.5,
            ..Default::default()
        };
        assert_eq!(settings.scale_axis(1.0), 0.5);
        assert_eq!(Settings::default().scale_axis(3.0), 1.0);
        assert_eq!(Settings::default().scale_axis(f32::NAN), 0.0);
        assert_eq!(Settings::default().scale_axis(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"Easy"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert!(settings.pause_on_blur);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::default();
        let settings = Settings {
            autoplay: true,
            ..Default::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_unreadable_settings_fall_back() {
        let mut storage = MemoryStorage::default();
        storage.set(SETTINGS_KEY, "][").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
