//! Headless exploration run over a built-in room.
//!
//! Usage:
//!   cargo run --example explore_headless -- --ticks 2000 --seed 7
//!   RUST_LOG=anveshan=debug cargo run --example explore_headless

use clap::Parser;
use std::path::Path;

use anveshan::core::{Polyline, WorldPoint};
use anveshan::{EngineConfig, Environment, ExplorationEngine};

/// Headless exploration example
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/explore.yaml")]
    config: String,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 3000)]
    ticks: u64,

    /// Seed for the dwell random source (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Environment width
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Environment height
    #[arg(long, default_value_t = 600.0)]
    height: f32,
}

/// Two interior walls with doorways plus a free-standing box
fn demo_room(width: f32, height: f32) -> Vec<Polyline> {
    let p = |fx: f32, fy: f32| WorldPoint::new(fx * width, fy * height);
    vec![
        Polyline::new(vec![p(0.35, 0.0), p(0.35, 0.4)]),
        Polyline::new(vec![p(0.35, 0.55), p(0.35, 1.0)]),
        Polyline::new(vec![p(0.35, 0.55), p(0.55, 0.55)]),
        Polyline::new(vec![p(0.7, 0.3), p(1.0, 0.3)]),
        Polyline::closed(vec![p(0.6, 0.65), p(0.8, 0.65), p(0.8, 0.8), p(0.6, 0.8)]),
    ]
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config_path = Path::new(&args.config);
    let mut config = if config_path.exists() {
        EngineConfig::load(config_path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            EngineConfig::default()
        })
    } else {
        println!(
            "Config not found at {}, using defaults",
            config_path.display()
        );
        EngineConfig::default()
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let environment = match Environment::new(args.width, args.height, demo_room(args.width, args.height)) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Invalid environment: {}", e);
            std::process::exit(1);
        }
    };
    let mut engine = match ExplorationEngine::new(config, environment) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to create engine: {}", e);
            std::process::exit(1);
        }
    };

    let start = engine.pose();
    println!(
        "Starting at ({:.1}, {:.1}, {:.1}°) in a {}x{} room",
        start.position.x,
        start.position.y,
        start.heading.to_degrees(),
        args.width,
        args.height
    );

    let mut anomalies = 0usize;
    let mut plans = 0usize;
    for _ in 0..args.ticks {
        let report = engine.advance();
        anomalies += report.anomalies.len();
        plans += usize::from(report.replanned);

        if report.tick % 250 == 0 {
            let pose = engine.pose();
            println!(
                "tick {:5}  coverage {:5.1}%  state {:13}  pos ({:6.1}, {:6.1})  walls {:2}  graph {}/{}",
                report.tick,
                engine.coverage() * 100.0,
                report.state.name(),
                pose.position.x,
                pose.position.y,
                report.virtual_walls,
                report.graph_nodes,
                report.graph_edges
            );
        }
    }

    println!();
    println!("=== Exploration Summary ===");
    println!("Ticks:     {}", engine.tick_count());
    println!("Coverage:  {:.1}%", engine.coverage() * 100.0);
    println!("Plans:     {}", plans);
    println!("Anomalies: {}", anomalies);
}
