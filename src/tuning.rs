//! Data-driven game balance
//!
//! Defaults reproduce the classic arcade feel. A page may override any subset
//! through a JSON document; unknown fields are ignored and missing ones keep
//! their default.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;
use crate::error::TuningError;

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at session start and the pickup cap
    pub max_lives: u8,
    /// Craft speed per tick while a direction key is held
    pub craft_speed: f32,
    /// Projectile upward speed per tick
    pub projectile_speed: f32,
    /// Asteroid speed range per tick, `[min, max)`
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    /// Power-up fall speed per tick
    pub power_up_speed: f32,
    /// Wall-clock spawn periods
    pub asteroid_spawn_interval_ms: u32,
    pub power_up_spawn_interval_ms: u32,
    /// Shield window granted by a pickup
    pub shield_duration_ms: f64,
    /// Explosion animation advance per tick
    pub explosion_frame_step: f32,
    /// Releasing any direction key stops both axes (arcade cabinet quirk)
    pub legacy_key_release: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_lives: MAX_LIVES,
            craft_speed: 5.0,
            projectile_speed: 7.0,
            asteroid_speed_min: 2.0,
            asteroid_speed_max: 5.0,
            power_up_speed: 2.0,
            asteroid_spawn_interval_ms: 2000,
            power_up_spawn_interval_ms: 10_000,
            shield_duration_ms: 7000.0,
            explosion_frame_step: 0.2,
            legacy_key_release: false,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field| Err(TuningError::Invalid { field });

        if self.max_lives == 0 || self.max_lives > MAX_LIVES {
            return invalid("max_lives");
        }
        if !(self.craft_speed >= 0.0) {
            return invalid("craft_speed");
        }
        if !(self.projectile_speed > 0.0) {
            return invalid("projectile_speed");
        }
        if !(self.asteroid_speed_min > 0.0 && self.asteroid_speed_min < self.asteroid_speed_max) {
            return invalid("asteroid_speed_min");
        }
        if !(self.power_up_speed > 0.0) {
            return invalid("power_up_speed");
        }
        // Browser timers take an i32 delay
        let period_ok = |ms: u32| ms > 0 && i32::try_from(ms).is_ok();
        if !period_ok(self.asteroid_spawn_interval_ms) {
            return invalid("asteroid_spawn_interval_ms");
        }
        if !period_ok(self.power_up_spawn_interval_ms) {
            return invalid("power_up_spawn_interval_ms");
        }
        if !(self.shield_duration_ms >= 0.0) {
            return invalid("shield_duration_ms");
        }
        if !(self.explosion_frame_step > 0.0) {
            return invalid("explosion_frame_step");
        }
        Ok(())
    }

    /// Read overrides from `<script id="tuning" type="application/json">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(err) => {
                    log::warn!("Ignoring tuning overrides: {err}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
