//! Shared fixtures.

#![allow(dead_code)]

use anveshan::core::{Polyline, WorldPoint};
use anveshan::{EngineConfig, Environment, ExplorationEngine};

pub fn p(x: f32, y: f32) -> WorldPoint {
    WorldPoint::new(x, y)
}

/// Route engine logs to the test output when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 300x300 room split by a wall with a doorway, plus a box
pub fn room() -> Environment {
    let obstacles = vec![
        Polyline::new(vec![p(150.0, 0.0), p(150.0, 120.0)]),
        Polyline::new(vec![p(150.0, 180.0), p(150.0, 300.0)]),
        Polyline::rectangle(p(200.0, 200.0), p(250.0, 250.0)),
    ];
    Environment::new(300.0, 300.0, obstacles).unwrap()
}

pub fn seeded_engine(environment: Environment, seed: u64) -> ExplorationEngine {
    ExplorationEngine::new(EngineConfig::default().with_seed(seed), environment).unwrap()
}

/// Even-odd point-in-polygon over a closed outline
pub fn polygon_contains(outline: &[WorldPoint], q: WorldPoint) -> bool {
    let mut inside = false;
    for w in outline.windows(2) {
        let (a, b) = (w[0], w[1]);
        if (a.y > q.y) != (b.y > q.y) {
            let x = a.x + (q.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if q.x < x {
                inside = !inside;
            }
        }
    }
    inside
}
