//! Simulation state and charged bodies
//!
//! Everything a tick reads or writes lives in [`SimContext`]; there are no
//! globals, so independent simulations can run side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cache::PhysicsFrame;
use super::tick::TickStage;
use crate::consts::*;
use crate::error::{BodyError, LevelError, SettingsError};
use crate::level::Level;
use crate::settings::{PhysicsConstants, Settings};

/// What the force and collision code needs to know about a body
pub trait ChargedBody {
    fn position(&self) -> Vec2;
    /// Signed charge; like signs repel
    fn charge(&self) -> f64;
    fn collision_radius(&self) -> f32;
}

/// Visible window area. Body positions are clamped into it on every set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Clamp a point into `[0, width] x [0, height]`
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.size())
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.clamp(pos) == pos
    }
}

fn check_attributes(charge: f64, radius: f32, pos: Vec2) -> Result<(), BodyError> {
    if !charge.is_finite() {
        return Err(BodyError::InvalidCharge(charge));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(BodyError::InvalidRadius(radius));
    }
    if !pos.is_finite() {
        return Err(BodyError::InvalidPosition { x: pos.x, y: pos.y });
    }
    Ok(())
}

/// The body the player steers
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    charge: f64,
    mass: f64,
    collision_radius: f32,
}

impl Player {
    pub fn new(
        radius: f32,
        charge: f64,
        mass: f64,
        pos: Vec2,
        viewport: Viewport,
    ) -> Result<Self, BodyError> {
        check_attributes(charge, radius, pos)?;
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::InvalidMass(mass));
        }
        Ok(Self {
            position: viewport.clamp(pos),
            velocity: Vec2::ZERO,
            charge,
            mass,
            collision_radius: radius,
        })
    }

    /// Player with the stock radius, charge and mass
    pub fn with_defaults(pos: Vec2, viewport: Viewport) -> Result<Self, BodyError> {
        Self::new(PLAYER_RADIUS, PLAYER_CHARGE, PLAYER_MASS, pos, viewport)
    }

    /// Stock player at an already-valid position
    fn stock(pos: Vec2, viewport: Viewport) -> Self {
        Self {
            position: viewport.clamp(pos),
            velocity: Vec2::ZERO,
            charge: PLAYER_CHARGE,
            mass: PLAYER_MASS,
            collision_radius: PLAYER_RADIUS,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_position(&mut self, pos: Vec2, viewport: Viewport) {
        self.position = viewport.clamp(pos);
    }

    /// Set velocity, limiting each axis to `±max_speed`
    pub fn set_velocity(&mut self, vel: Vec2, max_speed: f32) {
        self.velocity = vel.clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed));
    }

    /// Bounce off a vertical wall
    pub fn reflect_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    /// Bounce off a horizontal wall
    pub fn reflect_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }
}

impl ChargedBody for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn charge(&self) -> f64 {
        self.charge
    }

    fn collision_radius(&self) -> f32 {
        self.collision_radius
    }
}

/// A fixed charge in the level
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    position: Vec2,
    charge: f64,
    collision_radius: f32,
    /// Relation to the player as of the start of the last tick
    pub(super) frame: PhysicsFrame,
}

impl Obstacle {
    pub fn new(radius: f32, charge: f64, pos: Vec2, viewport: Viewport) -> Result<Self, BodyError> {
        check_attributes(charge, radius, pos)?;
        Ok(Self {
            position: viewport.clamp(pos),
            charge,
            collision_radius: radius,
            frame: PhysicsFrame::default(),
        })
    }

    pub fn set_position(&mut self, pos: Vec2, viewport: Viewport) {
        self.position = viewport.clamp(pos);
    }

    #[inline]
    pub fn frame(&self) -> &PhysicsFrame {
        &self.frame
    }

    /// Cached `obstacle - player` displacement
    #[inline]
    pub fn vector_to_player(&self) -> Vec2 {
        self.frame.vector_to_player
    }

    #[inline]
    pub fn distance_squared_to_player(&self) -> f32 {
        self.frame.distance_squared
    }
}

impl ChargedBody for Obstacle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn charge(&self) -> f64 {
        self.charge
    }

    fn collision_radius(&self) -> f32 {
        self.collision_radius
    }
}

/// Complete simulation state for one game session
#[derive(Debug, Clone)]
pub struct SimContext {
    pub constants: PhysicsConstants,
    /// Resizing does not move bodies; the boundary check bounces them back in
    pub viewport: Viewport,
    pub player: Player,
    /// Iterated in insertion order every tick
    pub obstacles: Vec<Obstacle>,
    /// Set by obstacle collisions, toggled by the pause command
    pub paused: bool,
    /// Where the player goes on reset
    pub player_start: Vec2,
    /// Cosmetic rotation of the player sprite (degrees)
    pub player_spin: f32,
    /// Completed physics ticks
    pub time_ticks: u64,
    pub(super) stage: TickStage,
}

impl SimContext {
    /// Empty level with the player at the viewport centre
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let viewport = Viewport::new(settings.viewport_width, settings.viewport_height);
        let player = Player::stock(viewport.center(), viewport);
        Self::with_player(settings.physics, viewport, player)
    }

    /// Context around an existing player; rejects constants that would break
    /// the integrator
    pub fn with_player(
        constants: PhysicsConstants,
        viewport: Viewport,
        player: Player,
    ) -> Result<Self, SettingsError> {
        constants.validate()?;
        let player_start = player.position();
        Ok(Self {
            constants,
            viewport,
            player,
            obstacles: Vec::new(),
            paused: false,
            player_start,
            player_spin: 0.0,
            time_ticks: 0,
            stage: TickStage::Idle,
        })
    }

    /// Stage the orchestrator last reached
    pub fn stage(&self) -> TickStage {
        self.stage
    }

    /// Replace the obstacle set and restart the player from the level's start
    pub fn load_level(&mut self, level: &Level) -> Result<(), LevelError> {
        let viewport = level.viewport()?;
        let obstacles = level.build_obstacles(viewport)?;

        self.viewport = viewport;
        self.obstacles = obstacles;
        self.player_start = viewport.clamp(level.player_start);
        self.reset_player();
        log::info!(
            "Loaded level {:?} ({} obstacles, {}x{})",
            level.name(),
            self.obstacles.len(),
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    /// Put the player back at the start, at rest, and resume
    pub fn reset_player(&mut self) {
        self.player.set_position(self.player_start, self.viewport);
        self.player.set_velocity(Vec2::ZERO, self.constants.player_max_speed);
        self.paused = false;
    }

    /// Drop the player at `pos` with zero velocity (mouse drag)
    pub fn place_player(&mut self, pos: Vec2) {
        self.player.set_position(pos, self.viewport);
        self.player.set_velocity(Vec2::ZERO, self.constants.player_max_speed);
    }

    /// Give the player its starting velocity
    pub fn launch(&mut self, velocity: Vec2) {
        self.player
            .set_velocity(velocity, self.constants.player_max_speed);
    }

    /// Place a new obstacle with the stock radius (mouse click)
    pub fn add_obstacle(&mut self, charge: f64, pos: Vec2) -> Result<(), BodyError> {
        let obstacle = Obstacle::new(OBSTACLE_RADIUS, charge, pos, self.viewport)?;
        self.obstacles.push(obstacle);
        log::debug!("obstacle count: {}", self.obstacles.len());
        Ok(())
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Option<Obstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamped_on_construction() {
        let viewport = Viewport::new(100, 50);
        let player = Player::with_defaults(Vec2::new(-10.0, 80.0), viewport).unwrap();
        assert_eq!(player.position(), Vec2::new(0.0, 50.0));

        let obstacle = Obstacle::new(7.0, 1.0, Vec2::new(150.0, 25.0), viewport).unwrap();
        assert_eq!(obstacle.position(), Vec2::new(100.0, 25.0));
    }

    #[test]
    fn test_invalid_mass_rejected() {
        let viewport = Viewport::default();
        assert_eq!(
            Player::new(7.0, 1.0, 0.0, Vec2::ZERO, viewport),
            Err(BodyError::InvalidMass(0.0))
        );
        assert_eq!(
            Player::new(7.0, 1.0, -3.0, Vec2::ZERO, viewport),
            Err(BodyError::InvalidMass(-3.0))
        );
        assert!(Player::new(7.0, 1.0, f64::NAN, Vec2::ZERO, viewport).is_err());
    }

    #[test]
    fn test_invalid_obstacle_rejected() {
        let viewport = Viewport::default();
        assert!(matches!(
            Obstacle::new(-1.0, 1.0, Vec2::ZERO, viewport),
            Err(BodyError::InvalidRadius(_))
        ));
        assert!(matches!(
            Obstacle::new(1.0, f64::INFINITY, Vec2::ZERO, viewport),
            Err(BodyError::InvalidCharge(_))
        ));
        assert!(matches!(
            Obstacle::new(1.0, 1.0, Vec2::new(f32::NAN, 0.0), viewport),
            Err(BodyError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_set_velocity_clamps_each_axis() {
        let mut player = Player::with_defaults(Vec2::ZERO, Viewport::default()).unwrap();
        player.set_velocity(Vec2::new(900.0, -700.0), 500.0);
        assert_eq!(player.velocity(), Vec2::new(500.0, -500.0));
        player.set_velocity(Vec2::new(12.0, -3.0), 500.0);
        assert_eq!(player.velocity(), Vec2::new(12.0, -3.0));
    }

    #[test]
    fn test_reset_player() {
        let mut ctx = SimContext::new(&Settings::default()).unwrap();
        let start = ctx.player_start;
        ctx.place_player(Vec2::new(10.0, 10.0));
        ctx.launch(Vec2::new(100.0, 50.0));
        ctx.paused = true;

        ctx.reset_player();
        assert_eq!(ctx.player.position(), start);
        assert_eq!(ctx.player.velocity(), Vec2::ZERO);
        assert!(!ctx.paused);
    }

    #[test]
    fn test_with_player_rejects_bad_constants() {
        let viewport = Viewport::default();
        let player = Player::with_defaults(viewport.center(), viewport).unwrap();
        for constants in [
            PhysicsConstants {
                max_time_step: -0.5,
                ..Default::default()
            },
            PhysicsConstants {
                player_max_speed: 0.0,
                ..Default::default()
            },
            PhysicsConstants {
                distance_scale: -1.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                SimContext::with_player(constants, viewport, player.clone()),
                Err(SettingsError::OutOfRange { .. })
            ));
        }
        assert!(SimContext::with_player(PhysicsConstants::default(), viewport, player).is_ok());
    }

    #[test]
    fn test_obstacle_editing() {
        let mut ctx = SimContext::new(&Settings::default()).unwrap();
        ctx.add_obstacle(-OBSTACLE_CHARGE, Vec2::new(10.0, 10.0)).unwrap();
        ctx.add_obstacle(OBSTACLE_CHARGE, Vec2::new(20.0, 10.0)).unwrap();
        assert_eq!(ctx.obstacles.len(), 2);

        let removed = ctx.remove_obstacle(0).unwrap();
        assert_eq!(removed.charge(), -OBSTACLE_CHARGE);
        assert!(ctx.remove_obstacle(5).is_none());

        ctx.clear_obstacles();
        assert!(ctx.obstacles.is_empty());
    }
}
