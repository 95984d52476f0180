//! Level layout
//!
//! A level is a named set of obstacles, a window size and the player's start
//! position. Reading and writing the level files is left to the caller; this
//! module only converts between [`Level`] and its JSON text.
//!
//! ```json
//! {
//!   "name": "tutorial",
//!   "size": { "x": 1024, "y": 512 },
//!   "playerStartPos": { "x": 512.0, "y": 256.0 },
//!   "obstacles": [
//!     { "charge": -1500.0, "position": { "x": 700.0, "y": 256.0 }, "radius": 7.0 }
//!   ]
//! }
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LevelError;
use crate::sim::{ChargedBody, Obstacle, SimContext, Viewport};

/// Vec2 as `{ "x": .., "y": .. }`
mod xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Xy { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let p = Xy::deserialize(d)?;
        Ok(Vec2::new(p.x, p.y))
    }
}

/// Window size a level was designed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSize {
    pub x: u32,
    pub y: u32,
}

/// One obstacle as stored in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub charge: f64,
    #[serde(with = "xy")]
    pub position: Vec2,
    pub radius: f32,
}

impl ObstacleSpec {
    pub fn new(charge: f64, position: Vec2, radius: f32) -> Self {
        Self {
            charge,
            position,
            radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    name: String,
    pub size: LevelSize,
    #[serde(rename = "playerStartPos", with = "xy")]
    pub player_start: Vec2,
    #[serde(default)]
    obstacles: Vec<ObstacleSpec>,
}

impl Default for Level {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            name: "empty_level".to_string(),
            size: LevelSize {
                x: viewport.width,
                y: viewport.height,
            },
            player_start: viewport.center(),
            obstacles: Vec::new(),
        }
    }
}

/// Names end up as file names, so keep them to a single plain path component
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/' || c == '\\')
}

impl Level {
    /// Empty level filling `viewport`, player starting at its centre
    pub fn new(name: &str, viewport: Viewport) -> Result<Self, LevelError> {
        let mut level = Self {
            size: LevelSize {
                x: viewport.width,
                y: viewport.height,
            },
            player_start: viewport.center(),
            ..Self::default()
        };
        level.set_name(name)?;
        level.viewport()?;
        Ok(level)
    }

    /// Snapshot the obstacles and start position of a running simulation
    pub fn from_context(name: &str, ctx: &SimContext) -> Result<Self, LevelError> {
        let mut level = Self::new(name, ctx.viewport)?;
        level.player_start = ctx.player_start;
        level.obstacles = ctx
            .obstacles
            .iter()
            .map(|o| ObstacleSpec::new(o.charge(), o.position(), o.collision_radius()))
            .collect();
        Ok(level)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), LevelError> {
        if !is_valid_name(name) {
            return Err(LevelError::InvalidName(name.to_string()));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn obstacles(&self) -> &[ObstacleSpec] {
        &self.obstacles
    }

    pub fn viewport(&self) -> Result<Viewport, LevelError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(LevelError::EmptySize {
                width: self.size.x,
                height: self.size.y,
            });
        }
        Ok(Viewport::new(self.size.x, self.size.y))
    }

    pub fn add_obstacle(&mut self, spec: ObstacleSpec) -> Result<(), LevelError> {
        let index = self.obstacles.len();
        Obstacle::new(spec.radius, spec.charge, spec.position, self.viewport()?)
            .map_err(|source| LevelError::InvalidObstacle { index, source })?;
        self.obstacles.push(spec);
        log::debug!("obstacle count: {}", self.obstacles.len());
        Ok(())
    }

    /// Obstacle with the stock radius, as placed by a mouse click
    pub fn place_obstacle(&mut self, charge: f64, position: Vec2) -> Result<(), LevelError> {
        self.add_obstacle(ObstacleSpec::new(charge, position, OBSTACLE_RADIUS))
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Result<ObstacleSpec, LevelError> {
        if index >= self.obstacles.len() {
            return Err(LevelError::NoSuchObstacle {
                index,
                len: self.obstacles.len(),
            });
        }
        Ok(self.obstacles.remove(index))
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Live obstacles for this level, positions clamped into `viewport`
    pub fn build_obstacles(&self, viewport: Viewport) -> Result<Vec<Obstacle>, LevelError> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Obstacle::new(spec.radius, spec.charge, spec.position, viewport)
                    .map_err(|source| LevelError::InvalidObstacle { index, source })
            })
            .collect()
    }

    /// Decode and validate a level
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        if !is_valid_name(&level.name) {
            return Err(LevelError::InvalidName(level.name));
        }
        level.build_obstacles(level.viewport()?)?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BodyError;
    use crate::settings::Settings;

    const TUTORIAL: &str = r#"{
        "name": "tutorial",
        "size": { "x": 800, "y": 400 },
        "playerStartPos": { "x": 100.0, "y": 200.0 },
        "obstacles": [
            { "charge": -1500.0, "position": { "x": 700.0, "y": 200.0 }, "radius": 7.0 },
            { "charge": 1500.0, "position": { "x": 400.0, "y": 120.0 }, "radius": 12.5 }
        ]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = Level::from_json(TUTORIAL).unwrap();
        assert_eq!(level.name(), "tutorial");
        assert_eq!(level.size, LevelSize { x: 800, y: 400 });
        assert_eq!(level.player_start, Vec2::new(100.0, 200.0));
        assert_eq!(level.obstacles().len(), 2);
        assert_eq!(level.obstacles()[1].radius, 12.5);
    }

    #[test]
    fn test_json_layout() {
        let level = Level::from_json(TUTORIAL).unwrap();
        let value: serde_json::Value = serde_json::from_str(&level.to_json().unwrap()).unwrap();
        assert_eq!(value["playerStartPos"]["x"], 100.0);
        assert_eq!(value["size"]["y"], 400);
        assert_eq!(value["obstacles"][0]["position"]["x"], 700.0);
        assert_eq!(Level::from_json(&level.to_json().unwrap()).unwrap(), level);
    }

    #[test]
    fn test_missing_obstacles_is_empty_level() {
        let json = r#"{"name": "blank", "size": {"x": 10, "y": 10}, "playerStartPos": {"x": 5, "y": 5}}"#;
        assert!(Level::from_json(json).unwrap().obstacles().is_empty());
    }

    #[test]
    fn test_rejects_bad_levels() {
        let bad_name = TUTORIAL.replace("tutorial", "../escape");
        assert!(matches!(
            Level::from_json(&bad_name),
            Err(LevelError::InvalidName(_))
        ));

        let empty = TUTORIAL.replace("\"x\": 800", "\"x\": 0");
        assert!(matches!(
            Level::from_json(&empty),
            Err(LevelError::EmptySize { .. })
        ));

        let bad_radius = TUTORIAL.replace("12.5", "-1.0");
        assert!(matches!(
            Level::from_json(&bad_radius),
            Err(LevelError::InvalidObstacle {
                index: 1,
                source: BodyError::InvalidRadius(_)
            })
        ));

        assert!(matches!(Level::from_json("[]"), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_set_name() {
        let mut level = Level::default();
        assert!(level.set_name("level_2").is_ok());
        assert_eq!(level.name(), "level_2");
        assert!(level.set_name("").is_err());
        assert!(level.set_name("two words").is_err());
        assert!(level.set_name("a/b").is_err());
        assert_eq!(level.name(), "level_2");
    }

    #[test]
    fn test_edit_obstacles() {
        let mut level = Level::new("edit", Viewport::new(200, 200)).unwrap();
        level.place_obstacle(OBSTACLE_CHARGE, Vec2::new(10.0, 10.0)).unwrap();
        level.place_obstacle(-OBSTACLE_CHARGE, Vec2::new(20.0, 10.0)).unwrap();
        assert_eq!(level.obstacles().len(), 2);

        let removed = level.remove_obstacle(0).unwrap();
        assert_eq!(removed.charge, OBSTACLE_CHARGE);
        assert!(matches!(
            level.remove_obstacle(3),
            Err(LevelError::NoSuchObstacle { index: 3, len: 1 })
        ));

        level.clear_obstacles();
        assert!(level.obstacles().is_empty());
    }

    #[test]
    fn test_load_into_context() {
        let level = Level::from_json(TUTORIAL).unwrap();
        let mut ctx = SimContext::new(&Settings::default()).unwrap();
        ctx.launch(Vec2::new(10.0, 10.0));
        ctx.paused = true;

        ctx.load_level(&level).unwrap();
        assert_eq!(ctx.viewport, Viewport::new(800, 400));
        assert_eq!(ctx.obstacles.len(), 2);
        assert_eq!(ctx.player.position(), Vec2::new(100.0, 200.0));
        assert_eq!(ctx.player.velocity(), Vec2::ZERO);
        assert!(!ctx.paused);

        let saved = Level::from_context("tutorial", &ctx).unwrap();
        assert_eq!(saved, level);
    }
}
