//! Charge Game entry point
//!
//! Headless run of the physics core: loads a level, launches the player and
//! logs the trajectory until it hits an obstacle or the time runs out.
//!
//! Usage: `charge-game [level.json] [settings.json]`

use std::path::Path;

use charge_game::sim::{ChargedBody, SimContext, TickInput, obstacle_visuals, tick};
use charge_game::{Level, Settings};
use glam::Vec2;

/// Built-in level used when no file is given
const DEMO_LEVEL: &str = r#"{
    "name": "demo",
    "size": { "x": 1024, "y": 512 },
    "playerStartPos": { "x": 120.0, "y": 256.0 },
    "obstacles": [
        { "charge": 1500.0, "position": { "x": 400.0, "y": 140.0 }, "radius": 7.0 },
        { "charge": 1500.0, "position": { "x": 400.0, "y": 372.0 }, "radius": 7.0 },
        { "charge": -1500.0, "position": { "x": 760.0, "y": 256.0 }, "radius": 7.0 },
        { "charge": 1500.0, "position": { "x": 900.0, "y": 90.0 }, "radius": 7.0 }
    ]
}"#;

const RUN_SECONDS: f32 = 10.0;

const LAUNCH_VELOCITY: Vec2 = Vec2::new(150.0, -40.0);

fn run(settings: &Settings, level_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let level = match level_path {
        Some(path) => Level::from_json(&std::fs::read_to_string(path)?)?,
        None => Level::from_json(DEMO_LEVEL)?,
    };

    let mut ctx = SimContext::new(settings)?;
    ctx.load_level(&level)?;

    let dt = settings.frame_time();
    let total_ticks = (RUN_SECONDS * settings.target_framerate as f32) as u64;
    let mut input = TickInput {
        launch: Some(LAUNCH_VELOCITY),
        ..Default::default()
    };

    for _ in 0..total_ticks {
        let Some(report) = tick(&mut ctx, &input, dt) else {
            log::info!(
                "Stopped after {:.2}s at ({:.1}, {:.1})",
                ctx.time_ticks as f32 * dt,
                ctx.player.position().x,
                ctx.player.position().y
            );
            break;
        };
        input = TickInput::default();

        if ctx.time_ticks % settings.target_framerate as u64 == 0 {
            let pos = ctx.player.position();
            log::info!(
                "t={:.1}s pos=({:.1}, {:.1}) speed={:.1} force={:.1}",
                ctx.time_ticks as f32 * dt,
                pos.x,
                pos.y,
                ctx.player.velocity().length(),
                report.forces.net.length()
            );
        }
    }

    for (i, visual) in obstacle_visuals(&ctx).iter().enumerate() {
        log::debug!("obstacle {}: {:?} intensity {:.2}", i, visual.shade, visual.intensity);
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Charge Game (headless) starting...");

    let mut args = std::env::args().skip(1);
    let level_path = args.next();
    let settings = args
        .next()
        .map(|path| Settings::load_or_default(Path::new(&path)))
        .unwrap_or_default();

    match run(&settings, level_path.as_deref().map(Path::new)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
