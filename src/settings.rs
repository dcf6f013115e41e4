//! Physics tuning
//!
//! Persisted separately from level data in LocalStorage. Every field falls
//! back to the constant in [`crate::consts`] when missing.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Physics and input constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Inverse-square numerator for every emitter
    pub force_strength: f32,
    /// Per-emitter acceleration bound
    pub force_clamp: f32,
    /// Emitter hit-test radius (device pixels)
    pub force_radius: f32,
    /// Pull-back distance giving full power (device pixels)
    pub max_distance: f32,
    /// Launch speed at full power
    pub max_velocity: f32,
    /// Key restarting the ball
    pub reset_key: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            force_strength: FORCE_STRENGTH,
            force_clamp: FORCE_CLAMP,
            force_radius: FORCE_RADIUS,
            max_distance: MAX_DISTANCE,
            max_velocity: MAX_VELOCITY,
            reset_key: RESET_KEY.to_string(),
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gravity_golf_tuning";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Launch speed for a pull-back of `distance` device pixels
    pub fn launch_speed(&self, distance: f32) -> f32 {
        (distance / self.max_distance).min(1.0) * self.max_velocity
    }

    /// True if `key` is the reset key (case-insensitive)
    pub fn is_reset_key(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.reset_key)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from an optional JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let tuning = Self::from_json(&json)?;
                log::info!("Loaded tuning from {}", path.display());
                Ok(tuning)
            }
            None => {
                log::info!("Using default tuning");
                Ok(Self::default())
            }
        }
    }
}
