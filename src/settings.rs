//! Player preferences
//!
//! Loaded from LocalStorage on the web. Only preferences live here; no game
//! progress is ever stored.

use serde::{Deserialize, Serialize};

use crate::consts::{DRAG_STEP, PADDLE_SPEED};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Paddle pixels per frame while an arrow key is held
    pub key_paddle_speed: f32,
    /// Paddle pixels per touch/pointer drag event
    pub drag_paddle_step: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause_on_hide: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_paddle_speed: PADDLE_SPEED,
            drag_paddle_step: DRAG_STEP,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            auto_pause_on_hide: true,
        }
    }
}

/// Positive finite value, or the fallback
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn key_paddle_speed(&self) -> f32 {
        positive_or(self.key_paddle_speed, PADDLE_SPEED)
    }

    pub fn drag_paddle_step(&self) -> f32 {
        positive_or(self.drag_paddle_step, DRAG_STEP)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
