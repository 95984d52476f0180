//! Force model
//!
//! Electric attraction/repulsion from every obstacle plus a friction term
//! linear in velocity. Accumulation runs in f64 since charges and mass are f64.
//!
//! The electric law is inverse square: each obstacle contributes
//! `q * r / |r|³` with `r` pointing from the obstacle to the player, which is
//! a Coulomb field. Distances are divided by `distance_scale` first so pixel
//! coordinates land in a playable range.

use glam::{DVec2, Vec2};

use super::state::{ChargedBody, Obstacle, Player};
use crate::settings::PhysicsConstants;

/// Summed electric force on the player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElectricForce {
    pub force: Vec2,
    /// Obstacles left out because they sit on top of the player
    pub skipped: usize,
}

/// Every force acting on the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetForce {
    pub electric: Vec2,
    pub friction: Vec2,
    /// `electric - friction`
    pub net: Vec2,
    pub skipped: usize,
}

/// Electric force on `player` from the cached obstacle frames
///
/// An obstacle at zero distance has no defined direction; its contribution
/// is dropped for the tick and counted in [`ElectricForce::skipped`].
pub fn electric_force(
    player: &impl ChargedBody,
    obstacles: &[Obstacle],
    constants: &PhysicsConstants,
) -> ElectricForce {
    let scale = constants.distance_scale;
    let mut sum = DVec2::ZERO;
    let mut skipped = 0;

    for obstacle in obstacles {
        let frame = obstacle.frame();
        // Cached vector points from the player to the obstacle; flip it so like charges push apart
        let r = -frame.vector_to_player.as_dvec2() / scale;
        let d2 = frame.distance_squared as f64 / (scale * scale);

        if d2 <= 0.0 {
            skipped += 1;
            continue;
        }

        let contribution = r * (obstacle.charge() / (d2 * d2.sqrt()));
        if !contribution.is_finite() {
            skipped += 1;
            continue;
        }
        sum += contribution;
    }

    if skipped > 0 {
        log::debug!("{} obstacle(s) coincide with the player, skipped", skipped);
    }

    ElectricForce {
        force: (sum * constants.coulomb * player.charge()).as_vec2(),
        skipped,
    }
}

/// Viscous friction; subtract from the driving force
pub fn friction_force(velocity: Vec2, mass: f64, constants: &PhysicsConstants) -> Vec2 {
    let relative = velocity.as_dvec2() / constants.player_max_speed as f64;
    (relative * constants.friction_coeff * mass * constants.gravity).as_vec2()
}

/// Electric force minus friction
pub fn net_force(player: &Player, obstacles: &[Obstacle], constants: &PhysicsConstants) -> NetForce {
    let electric = electric_force(player, obstacles, constants);
    let friction = friction_force(player.velocity(), player.mass(), constants);
    NetForce {
        electric: electric.force,
        friction,
        net: electric.force - friction,
        skipped: electric.skipped,
    }
}
