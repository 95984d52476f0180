//! Error types
//!
//! The physics step itself never fails; these cover construction of bodies,
//! settings and levels.

/// Rejected attributes when building a player or obstacle
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BodyError {
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f64),
    #[error("collision radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("charge must be finite, got {0}")]
    InvalidCharge(f64),
    #[error("position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },
}

/// Failure to load or validate [`Settings`](crate::Settings)
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("setting `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("malformed settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings file")]
    Io(#[from] std::io::Error),
}

/// Failure to edit or decode a [`Level`](crate::Level)
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("invalid level name {0:?}")]
    InvalidName(String),
    #[error("no obstacle at index {index} (level has {len})")]
    NoSuchObstacle { index: usize, len: usize },
    #[error("level has an empty size {width}x{height}")]
    EmptySize { width: u32, height: u32 },
    #[error("obstacle {index} is invalid")]
    InvalidObstacle {
        index: usize,
        #[source]
        source: BodyError,
    },
    #[error("malformed level JSON")]
    Parse(#[from] serde_json::Error),
}
