//! Cosmetic feedback derived from the physics frame
//!
//! Obstacles brighten and grow as the player approaches; the player sprite
//! spins at a constant rate. Nothing here feeds back into the physics.

use super::cache::PhysicsFrame;
use super::state::{ChargedBody, SimContext, Viewport};
use crate::consts::{MIN_OBSTACLE_INTENSITY, PLAYER_SPIN_DEG};

/// Which texture an obstacle is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleShade {
    /// Pulls the player in
    Attract,
    /// Pushes the player away
    Repulse,
    /// No charge on one side
    Neutral,
}

impl ObstacleShade {
    pub fn for_charges(obstacle_charge: f64, player_charge: f64) -> Self {
        let product = obstacle_charge * player_charge;
        if product > 0.0 {
            ObstacleShade::Repulse
        } else if product < 0.0 {
            ObstacleShade::Attract
        } else {
            ObstacleShade::Neutral
        }
    }
}

/// How an obstacle should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleVisual {
    pub shade: ObstacleShade,
    /// Colour and scale factor in `[MIN_OBSTACLE_INTENSITY, 1]`
    pub intensity: f32,
}

/// Squared distance over which obstacle intensity fades out
pub fn intensity_falloff(viewport: Viewport) -> f32 {
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    (w * w + h * h).sqrt() * w + h * h / 2.0
}

/// Intensity of an obstacle given its cached distance to the player
pub fn obstacle_intensity(frame: &PhysicsFrame, viewport: Viewport) -> f32 {
    let falloff = intensity_falloff(viewport);
    if falloff <= 0.0 {
        return 1.0;
    }
    (1.0 - frame.distance_squared / falloff).clamp(MIN_OBSTACLE_INTENSITY, 1.0)
}

/// Visuals for every obstacle, in collection order
pub fn obstacle_visuals(ctx: &SimContext) -> Vec<ObstacleVisual> {
    let player_charge = ctx.player.charge();
    ctx.obstacles
        .iter()
        .map(|obstacle| ObstacleVisual {
            shade: ObstacleShade::for_charges(obstacle.charge(), player_charge),
            intensity: obstacle_intensity(obstacle.frame(), ctx.viewport),
        })
        .collect()
}

/// Rotate the player sprite by one tick's worth, wrapped to `[0, 360)`
#[inline]
pub fn advance_spin(degrees: f32) -> f32 {
    (degrees + PLAYER_SPIN_DEG).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_shade_from_charge_signs() {
        assert_eq!(ObstacleShade::for_charges(1500.0, 1.0), ObstacleShade::Repulse);
        assert_eq!(ObstacleShade::for_charges(-1500.0, 1.0), ObstacleShade::Attract);
        assert_eq!(ObstacleShade::for_charges(-1500.0, -1.0), ObstacleShade::Repulse);
        assert_eq!(ObstacleShade::for_charges(0.0, 1.0), ObstacleShade::Neutral);
    }

    #[test]
    fn test_intensity_bounds() {
        let viewport = Viewport::default();
        let touching = PhysicsFrame::between(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(obstacle_intensity(&touching, viewport), 1.0);

        let far = PhysicsFrame::between(Vec2::ZERO, viewport.size());
        assert_eq!(obstacle_intensity(&far, viewport), MIN_OBSTACLE_INTENSITY);
    }

    #[test]
    fn test_intensity_decreases_with_distance() {
        let viewport = Viewport::default();
        let near = PhysicsFrame::between(Vec2::new(100.0, 0.0), Vec2::ZERO);
        let mid = PhysicsFrame::between(Vec2::new(300.0, 0.0), Vec2::ZERO);
        assert!(obstacle_intensity(&near, viewport) > obstacle_intensity(&mid, viewport));
    }

    #[test]
    fn test_spin_wraps() {
        assert!((advance_spin(0.0) - 0.1).abs() < 1e-6);
        assert!(advance_spin(359.95) < 0.1);
    }
}
