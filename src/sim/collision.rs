//! Collision detection and response
//!
//! Two rules, applied every tick regardless of prior state:
//! - touching any obstacle pauses the simulation
//! - leaving the viewport (or pushing against its edge) reflects the
//!   velocity component on that axis, as off a wall of infinite mass

use super::state::{ChargedBody, Obstacle, Player, Viewport};

/// Result of a collision check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Indices of obstacles the player overlaps
    pub obstacle_hits: Vec<usize>,
    /// Velocity x was negated
    pub reflected_x: bool,
    /// Velocity y was negated
    pub reflected_y: bool,
}

impl CollisionReport {
    pub fn hit_obstacle(&self) -> bool {
        !self.obstacle_hits.is_empty()
    }
}

/// Whether two circles overlap, given the squared distance between centres
#[inline]
pub fn circles_overlap(distance_squared: f32, radius_a: f32, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    distance_squared <= reach * reach
}

/// Whether a body at `pos` moving with `vel` should bounce off `[0, extent]`
///
/// Outside the range always bounces. On the edge itself it bounces only when
/// heading further out; the integrator clamps positions onto the edge, so this
/// is how the player actually rebounds in play.
#[inline]
pub fn wall_bounce(pos: f32, vel: f32, extent: f32) -> bool {
    pos < 0.0 || pos > extent || (pos <= 0.0 && vel < 0.0) || (pos >= extent && vel > 0.0)
}

/// Indices of obstacles overlapping the player, from the cached distances
pub fn obstacle_hits(player: &Player, obstacles: &[Obstacle]) -> Vec<usize> {
    obstacles
        .iter()
        .enumerate()
        .filter(|(_, obstacle)| {
            circles_overlap(
                obstacle.distance_squared_to_player(),
                player.collision_radius(),
                obstacle.collision_radius(),
            )
        })
        .map(|(i, _)| i)
        .collect()
}

/// Check the player against obstacles and walls
///
/// Sets `paused` on any obstacle hit (never clears it) and reflects velocity
/// off the viewport edges.
pub fn check_collisions(
    player: &mut Player,
    obstacles: &[Obstacle],
    viewport: Viewport,
    paused: &mut bool,
) -> CollisionReport {
    let obstacle_hits = obstacle_hits(player, obstacles);
    if !obstacle_hits.is_empty() {
        *paused = true;
    }

    let pos = player.position();
    let vel = player.velocity();
    let size = viewport.size();

    let reflected_x = wall_bounce(pos.x, vel.x, size.x);
    if reflected_x {
        player.reflect_x();
    }
    let reflected_y = wall_bounce(pos.y, vel.y, size.y);
    if reflected_y {
        player.reflect_y();
    }

    CollisionReport {
        obstacle_hits,
        reflected_x,
        reflected_y,
    }
}
