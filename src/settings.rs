//! Player preferences
//!
//! Persisted separately from tuning in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{POWER_MAX, POWER_STEP};
use crate::error::ConfigError;
use crate::sim::SimState;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the aiming arc while the ball is idle
    pub show_trajectory: bool,
    /// Let the camera orbit around the court
    pub orbit_camera: bool,
    /// Power change per W/S press (percent)
    pub power_step: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_trajectory: false,
            orbit_camera: true,
            power_step: POWER_STEP,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "hoop_shot_settings";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Keep the power step usable (1..=100)
    pub fn validated(mut self) -> Self {
        if self.power_step == 0 || self.power_step > POWER_MAX {
            log::warn!("power_step {} out of range, using {}", self.power_step, POWER_STEP);
            self.power_step = POWER_STEP;
        }
        self
    }

    /// Signed power change for one press
    pub fn power_delta(&self, up: bool) -> i32 {
        let step = self.power_step as i32;
        if up { step } else { -step }
    }

    /// Push preferences into a fresh simulation
    pub fn apply(&self, state: &mut SimState) {
        state.preview_enabled = self.show_trajectory;
        state.orbit_camera = self.orbit_camera;
    }

    /// Pull toggles back out of the simulation
    ///
    /// Returns true when anything changed and the settings should be saved.
    pub fn capture(&mut self, state: &SimState) -> bool {
        let changed = self.show_trajectory != state.preview_enabled
            || self.orbit_camera != state.orbit_camera;
        self.show_trajectory = state.preview_enabled;
        self.orbit_camera = state.orbit_camera;
        changed
    }

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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
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
                log::debug!("Settings saved under {}", Self::STORAGE_KEY);
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
        log::debug!("Settings not persisted on native ({})", Self::STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "show_trajectory": true }"#).unwrap();
        assert!(settings.show_trajectory);
        assert!(settings.orbit_camera);
        assert_eq!(settings.power_step, POWER_STEP);
    }

    #[test]
    fn test_bad_power_step_repaired() {
        let settings = Settings::from_json(r#"{ "power_step": 0 }"#).unwrap();
        assert_eq!(settings.power_step, POWER_STEP);
        let settings = Settings::from_json(r#"{ "power_step": 200 }"#).unwrap();
        assert_eq!(settings.power_step, POWER_STEP);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_power_delta_sign() {
        let settings = Settings {
            power_step: 10,
            ..Default::default()
        };
        assert_eq!(settings.power_delta(true), 10);
        assert_eq!(settings.power_delta(false), -10);
    }

    #[test]
    fn test_apply_and_capture() {
        let mut state = SimState::new(3);
        let mut settings = Settings {
            show_trajectory: true,
            orbit_camera: false,
            ..Default::default()
        };
        settings.apply(&mut state);
        assert!(state.preview_enabled);
        assert!(!state.orbit_camera);
        assert!(!settings.capture(&state));

        state.orbit_camera = true;
        assert!(settings.capture(&state));
        assert!(settings.orbit_camera);
    }
}
