//! Charge Game - steer a charged body through a field of fixed charges
//!
//! Core modules:
//! - `sim`: Deterministic physics (forces, integration, collisions, tick)
//! - `level`: Level layout and its JSON form
//! - `settings`: Physical constants and viewport defaults
//! - `error`: Error types shared by the modules above

pub mod error;
pub mod level;
pub mod settings;
pub mod sim;

pub use error::{BodyError, LevelError, SettingsError};
pub use level::Level;
pub use settings::{PhysicsConstants, Settings};

/// Game configuration constants
pub mod consts {
    /// Default window size
    pub const VIEWPORT_WIDTH: u32 = 1024;
    pub const VIEWPORT_HEIGHT: u32 = 512;

    /// Coulomb-like constant (gameplay units, not SI)
    pub const COULOMB_CONSTANT: f64 = 8.988e2;
    pub const FRICTION_COEFF: f64 = 10.0;
    /// Only scales the friction force
    pub const GRAVITY: f64 = 9.81;
    /// Per-axis speed limit (units/s)
    pub const PLAYER_MAX_SPEED: f32 = 500.0;
    /// Longest step the integrator will take (s). Window drags stall the loop.
    pub const MAX_TIME_STEP: f32 = 0.0165;
    /// Pixel distances are divided by this before the force law
    pub const DISTANCE_SCALE: f64 = 1000.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 7.0;
    pub const PLAYER_CHARGE: f64 = 1.0;
    pub const PLAYER_MASS: f64 = 15.0;

    /// Obstacles placed with the mouse
    pub const OBSTACLE_RADIUS: f32 = 7.0;
    pub const OBSTACLE_CHARGE: f64 = 1500.0;

    /// Cosmetic spin of the player sprite (degrees per tick)
    pub const PLAYER_SPIN_DEG: f32 = 0.1;
    /// Obstacles never fade below this intensity
    pub const MIN_OBSTACLE_INTENSITY: f32 = 0.65;
}
