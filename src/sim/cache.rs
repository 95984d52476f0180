//! Per-obstacle distance cache
//!
//! Each tick starts by recording where every obstacle sits relative to the
//! player. Both the force model and the obstacle shading read this frame, so
//! the two never disagree about distances within a tick.

use glam::Vec2;

use super::state::{ChargedBody, Obstacle};

/// An obstacle's relation to the player at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsFrame {
    /// `obstacle_position - player_position`
    pub vector_to_player: Vec2,
    /// `|vector_to_player|²`, never negative
    pub distance_squared: f32,
}

impl PhysicsFrame {
    pub fn between(obstacle_pos: Vec2, player_pos: Vec2) -> Self {
        let vector_to_player = obstacle_pos - player_pos;
        let distance_squared = (vector_to_player.x * vector_to_player.x
            + vector_to_player.y * vector_to_player.y)
            .max(0.0);
        Self {
            vector_to_player,
            distance_squared,
        }
    }
}

/// Recompute the frame of every obstacle against `player_pos`
pub fn refresh_distance_cache(player_pos: Vec2, obstacles: &mut [Obstacle]) {
    for obstacle in obstacles.iter_mut() {
        obstacle.frame = PhysicsFrame::between(obstacle.position(), player_pos);
    }
}
