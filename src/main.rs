//! Planetoids headless runner
//!
//! Runs the simulation without a window: a simple autopilot presses the keys
//! and every frame is drawn into an instance batch, as a renderer would.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use planetoids::render::{Drawable, InstanceBatch};
use planetoids::sim::Wave;
use planetoids::{AppState, Application, FrameInput, LevelData, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "planetoids", about = "Run a headless Planetoids game")]
struct Args {
    /// Level JSON file (default: generate one from the seed)
    #[arg(long)]
    level: Option<PathBuf>,
    /// Balance tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Settings file
    #[arg(long, default_value = Settings::FILE_NAME)]
    settings: PathBuf,
    /// Seed for generated levels (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate before giving up
    #[arg(long, default_value_t = 3600)]
    frames: u64,
}

/// Turn toward the nearest asteroid and shoot once lined up
fn steer(wave: &Wave) -> FrameInput {
    let Some(ship) = wave.ship() else {
        return FrameInput::default();
    };
    let nearest = wave.asteroids().iter().min_by(|a, b| {
        let da = a.position().distance_squared(ship.position());
        let db = b.position().distance_squared(ship.position());
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(target) = nearest else {
        return FrameInput::default();
    };

    let to_target = target.position() - ship.position();
    let off_by = ship.facing().angle_to(to_target);
    let aligned = off_by.abs() < 0.1;
    FrameInput {
        turn_left: !aligned && off_by > 0.0,
        turn_right: !aligned && off_by < 0.0,
        thrust: false,
        fire: aligned,
        start: false,
    }
}

fn autopilot(app: &Application) -> FrameInput {
    match app.state() {
        AppState::Inactive | AppState::Paused => FrameInput {
            start: true,
            ..Default::default()
        },
        AppState::Active => app.wave().map(steer).unwrap_or_default(),
        _ => FrameInput::default(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = Settings::load(&args.settings);
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let level = match &args.level {
        Some(path) => LevelData::load(path)
            .with_context(|| format!("loading level from {}", path.display()))?,
        None => {
            let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
            log::info!("Generating level with seed {}", seed);
            LevelData::generate(seed, settings.asteroid_count, &tuning)
        }
    };

    let mut app = Application::new(level, tuning)?.with_settings(&settings);
    let mut batch = InstanceBatch::new();

    log::info!("Planetoids (headless) starting...");
    let mut frames = 0;
    while frames < args.frames && app.state() != AppState::Complete {
        let input = autopilot(&app);
        app.update(&input);
        batch.clear();
        app.draw(&mut batch);
        frames += 1;
    }

    log::info!(
        "Stopped after {} frames in {:?}: score {}, lives {}{}",
        frames,
        app.state(),
        app.score(),
        app.lives(),
        if app.has_won() { " (cleared)" } else { "" }
    );
    if let Some(message) = &app.hud().message {
        println!("{}", message);
    }
    println!("{}  {}", app.hud().score, app.hud().lives);
    Ok(())
}
