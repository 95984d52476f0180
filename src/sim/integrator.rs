//! Semi-implicit Euler integration of the player
//!
//! Velocity is updated and clamped first, then the clamped velocity moves the
//! player. Deterministic for identical inputs.

use glam::Vec2;

use super::state::{ChargedBody, Player, Viewport};
use crate::settings::PhysicsConstants;

/// Limit a caller-supplied elapsed time to `[0, max_step]`
///
/// Long stalls in the event loop (window drag, resize) would otherwise fling
/// the player across the level in one step.
#[inline]
pub fn clamp_time_step(dt: f32, max_step: f32) -> f32 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, max_step.max(0.0))
    }
}

/// Advance the player under `net_force` for `dt` seconds
///
/// Returns the time step actually used.
pub fn integrate(
    player: &mut Player,
    net_force: Vec2,
    dt: f32,
    constants: &PhysicsConstants,
    viewport: Viewport,
) -> f32 {
    let dt = clamp_time_step(dt, constants.max_time_step);
    let acceleration = (net_force.as_dvec2() / player.mass()).as_vec2();

    let velocity = player.velocity() + acceleration * dt;
    player.set_velocity(velocity, constants.player_max_speed);

    let position = player.position() + player.velocity() * dt;
    player.set_position(position, viewport);

    dt
}
