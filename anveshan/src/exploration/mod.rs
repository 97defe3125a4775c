//! Autonomous exploration.
//!
//! [`ExplorationEngine`] owns the discovery grid, the visit history, the
//! virtual walls and the visibility graph, and moves the agent one tick at a
//! time. The caller supplies an [`Environment`](crate::Environment) and reads
//! back snapshots for display.
//!
//! # State machine
//!
//! ```text
//!   Idle ──plan──► FollowingPath ──path empty──► Idle (target demoted)
//!                        │
//!                  one waypoint left
//!                        ▼
//!              RotatingCW / RotatingCCW ──random stop──► Idle
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use anveshan::{EngineConfig, Environment, ExplorationEngine};
//!
//! let env = Environment::new(800.0, 600.0, obstacles)?;
//! let mut engine = ExplorationEngine::new(EngineConfig::default().with_seed(7), env)?;
//!
//! loop {
//!     let report = engine.advance();
//!     for anomaly in &report.anomalies {
//!         eprintln!("{}", anomaly);
//!     }
//!
//!     draw(engine.grid(), engine.virtual_walls(), engine.path(), engine.pose());
//!
//!     if engine.coverage() > 0.99 {
//!         break;
//!     }
//! }
//! ```

mod engine;
mod motion;
mod potential;
mod state;

pub use engine::{EngineSnapshot, ExplorationEngine};
pub use motion::{
    Agent, AgentPose, FollowOutcome, MotionController, MoveOutcome, Rotation, SteerCommand,
};
pub use potential::{
    PotentialField, Target, TargetSelection, TargetSelector, is_eligible_cell, refinement_threshold,
};
pub use state::{ControlMode, ExplorationState, TickReport};
