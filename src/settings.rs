//! Physics settings
//!
//! Constants are immutable once a simulation is built from them. Stored as
//! JSON next to the level files; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Constants consumed by the force model and the integrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Coulomb-like constant `k`
    pub coulomb: f64,
    /// Friction coefficient
    pub friction_coeff: f64,
    /// Gravitational constant, used only to scale friction
    pub gravity: f64,
    /// Per-axis speed limit of the player
    pub player_max_speed: f32,
    /// Clamp for the elapsed time of a single tick (seconds)
    pub max_time_step: f32,
    /// Divisor applied to pixel distances before the force law
    pub distance_scale: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            coulomb: COULOMB_CONSTANT,
            friction_coeff: FRICTION_COEFF,
            gravity: GRAVITY,
            player_max_speed: PLAYER_MAX_SPEED,
            max_time_step: MAX_TIME_STEP,
            distance_scale: DISTANCE_SCALE,
        }
    }
}

impl PhysicsConstants {
    /// Reject values that would turn the integration into inf/NaN
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn check(name: &'static str, value: f64, ok: bool) -> Result<(), SettingsError> {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(SettingsError::OutOfRange { name, value })
            }
        }

        check("coulomb", self.coulomb, true)?;
        check("friction_coeff", self.friction_coeff, self.friction_coeff >= 0.0)?;
        check("gravity", self.gravity, self.gravity >= 0.0)?;
        check(
            "player_max_speed",
            self.player_max_speed as f64,
            self.player_max_speed > 0.0,
        )?;
        check(
            "max_time_step",
            self.max_time_step as f64,
            self.max_time_step > 0.0,
        )?;
        check(
            "distance_scale",
            self.distance_scale,
            self.distance_scale > 0.0,
        )?;
        Ok(())
    }
}

/// Everything the game reads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConstants,
    /// Initial window size
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Frames per second the renderer aims for (also the demo tick rate)
    pub target_framerate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConstants::default(),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            target_framerate: 60,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.physics.validate()?;
        if self.viewport_width == 0 {
            return Err(SettingsError::OutOfRange {
                name: "viewport_width",
                value: 0.0,
            });
        }
        if self.viewport_height == 0 {
            return Err(SettingsError::OutOfRange {
                name: "viewport_height",
                value: 0.0,
            });
        }
        if self.target_framerate == 0 {
            return Err(SettingsError::OutOfRange {
                name: "target_framerate",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Seconds per frame at the target framerate
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_framerate as f32
    }
}
