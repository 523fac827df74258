//! Wanderbot host simulation runner.
//!
//! Runs the navigator against the kinematic simulator and logs every event.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  SimRobot (Sensor + Motion + StopSignal)   LogEventSink    │
//! │                                                            │
//! │  ───────────────── Port Trait Boundary ─────────────────   │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │            Navigator (pure logic)                    │  │
//! │  │  Phase FSM · ForwardDriver · HeadingController       │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `wanderbot-sim [config.json]`.  Without an argument the path in
//! `WANDERBOT_CONFIG` is used, and without that the built-in defaults.
//! `RUST_LOG` controls verbosity (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use wanderbot::adapters::log_sink::LogEventSink;
use wanderbot::adapters::sim::{Arena, SimParams, SimRobot};
use wanderbot::app::service::Navigator;
use wanderbot::config::NavConfig;
use wanderbot::fsm::TerminationReason;

/// Simulated minutes before the operator "presses stop".
const RUN_BUDGET_MS: u64 = 5 * 60 * 1000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    let mut navigator = Navigator::new(config.clone()).context("invalid navigation config")?;

    let arena = Arena::new(300.0, 200.0)
        .with_tape(20.0, config.boundary_floor)
        .with_obstacle(120.0, 60.0, 150.0, 90.0)
        .with_obstacle(200.0, 130.0, 230.0, 150.0);
    let params = SimParams {
        unit: config.distance_unit,
        ..SimParams::default()
    };
    let mut robot = SimRobot::new(arena, params, 60.0, 100.0, 0.0).with_budget_ms(RUN_BUDGET_MS);
    let mut sink = LogEventSink::new();

    let reason = navigator.run(&mut robot, &mut sink);

    let (x, y, heading) = robot.pose();
    info!(
        "Finished: {} after {:.1}s simulated | {} segments, {} probes | pose ({:.1}, {:.1}) {:.0}\u{00b0}",
        reason.name(),
        robot.elapsed_ms() as f32 / 1000.0,
        sink.segments(),
        sink.probes(),
        x,
        y,
        heading
    );
    if robot.collisions() > 0 {
        warn!("Robot was held back by a wall {} times", robot.collisions());
    }
    if reason == TerminationReason::DeadEnd {
        info!("Dead end reached, motors stopped");
    }

    Ok(())
}

fn load_config() -> Result<NavConfig> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("WANDERBOT_CONFIG").map(PathBuf::from));

    let Some(path) = path else {
        info!("No config given, using defaults");
        return Ok(NavConfig::default());
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = NavConfig::from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
