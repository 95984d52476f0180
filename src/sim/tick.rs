//! Per-tick physics step
//!
//! One call advances the player by the elapsed wall time. Each tick walks the
//! same fixed sequence of stages:
//!
//! `Idle -> CacheRefreshed -> ForceComputed -> Integrated -> CollisionChecked -> Idle`

use glam::Vec2;

use super::cache::refresh_distance_cache;
use super::collision::{CollisionReport, check_collisions};
use super::forces::{NetForce, net_force};
use super::integrator::integrate;
use super::state::{ChargedBody, SimContext};
use super::visual::advance_spin;

/// Where the orchestrator is within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickStage {
    /// No tick in progress
    #[default]
    Idle,
    CacheRefreshed,
    ForceComputed,
    Integrated,
    CollisionChecked,
}

impl TickStage {
    /// The only stage allowed to follow this one
    pub fn next(self) -> Self {
        match self {
            TickStage::Idle => TickStage::CacheRefreshed,
            TickStage::CacheRefreshed => TickStage::ForceComputed,
            TickStage::ForceComputed => TickStage::Integrated,
            TickStage::Integrated => TickStage::CollisionChecked,
            TickStage::CollisionChecked => TickStage::Idle,
        }
    }
}

impl SimContext {
    fn enter(&mut self, stage: TickStage) {
        debug_assert_eq!(
            self.stage.next(),
            stage,
            "tick stage {:?} cannot follow {:?}",
            stage,
            self.stage
        );
        self.stage = stage;
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Time step after clamping
    pub dt: f32,
    pub forces: NetForce,
    pub collisions: CollisionReport,
}

/// Input commands applied before a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Set the player's velocity (launch gesture)
    pub launch: Option<Vec2>,
    /// Restart from the level's start position
    pub reset: bool,
}

/// Advance the player by `dt` seconds
///
/// The caller must not invoke this while `ctx.paused` is set; [`tick`] does
/// that gating. Obstacle frames afterwards describe the start of this tick.
pub fn update_player(ctx: &mut SimContext, dt: f32) -> TickReport {
    ctx.enter(TickStage::CacheRefreshed);
    refresh_distance_cache(ctx.player.position(), &mut ctx.obstacles);

    ctx.enter(TickStage::ForceComputed);
    let forces = net_force(&ctx.player, &ctx.obstacles, &ctx.constants);
    log::debug!(
        "total force: {:.3}  x: {:.3}  y: {:.3}",
        forces.net.length(),
        forces.net.x,
        forces.net.y
    );

    ctx.enter(TickStage::Integrated);
    let dt = integrate(
        &mut ctx.player,
        forces.net,
        dt,
        &ctx.constants,
        ctx.viewport,
    );
    ctx.player_spin = advance_spin(ctx.player_spin);
    let speed = ctx.player.velocity();
    log::debug!(
        "dt: {:.4}  speed: {:.3}  x: {:.3}  y: {:.3}",
        dt,
        speed.length(),
        speed.x,
        speed.y
    );

    ctx.enter(TickStage::CollisionChecked);
    let was_paused = ctx.paused;
    let collisions = check_collisions(
        &mut ctx.player,
        &ctx.obstacles,
        ctx.viewport,
        &mut ctx.paused,
    );
    if ctx.paused && !was_paused {
        log::info!(
            "Player hit obstacle(s) {:?} at tick {}",
            collisions.obstacle_hits,
            ctx.time_ticks
        );
    }

    ctx.enter(TickStage::Idle);
    ctx.time_ticks += 1;

    TickReport {
        dt,
        forces,
        collisions,
    }
}

/// Apply input, then advance one tick unless paused
pub fn tick(ctx: &mut SimContext, input: &TickInput, dt: f32) -> Option<TickReport> {
    if input.reset {
        ctx.reset_player();
    }
    if input.pause {
        ctx.paused = !ctx.paused;
    }
    if let Some(velocity) = input.launch {
        ctx.launch(velocity);
    }

    if ctx.paused {
        return None;
    }
    Some(update_player(ctx, dt))
}
