//! Deterministic physics module
//!
//! Everything that moves the player lives here. This module must stay pure:
//! - No rendering, input or file access
//! - Obstacles iterated in collection order
//! - Identical inputs give identical trajectories

pub mod cache;
pub mod collision;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod tick;
pub mod visual;

pub use cache::{PhysicsFrame, refresh_distance_cache};
pub use collision::{CollisionReport, check_collisions};
pub use forces::{ElectricForce, NetForce, electric_force, friction_force, net_force};
pub use integrator::{clamp_time_step, integrate};
pub use state::{ChargedBody, Obstacle, Player, SimContext, Viewport};
pub use tick::{TickInput, TickReport, TickStage, tick, update_player};
pub use visual::{ObstacleShade, ObstacleVisual, obstacle_intensity, obstacle_visuals};
