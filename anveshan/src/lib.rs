//! # Anveshan: Frontier Exploration in a 2D Environment
//!
//! An agent with a limited field of view explores a bounded rectangle
//! containing static polyline obstacles. Each tick it:
//!
//! 1. marks the grid cells its sensor sector can see,
//! 2. traces virtual walls around the undiscovered region,
//! 3. rebuilds a visibility graph over obstacle and virtual-wall pivots,
//! 4. when idle, picks a target from a frontier potential field and plans an
//!    A* path to it over the graph,
//! 5. moves along the path with bounded linear and angular speed.
//!
//! Exploration is greedy and re-planned continuously; full coverage is not
//! guaranteed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anveshan::{EngineConfig, Environment, ExplorationEngine};
//! use anveshan::core::{Polyline, WorldPoint};
//!
//! let obstacles = vec![Polyline::closed(vec![
//!     WorldPoint::new(300.0, 200.0),
//!     WorldPoint::new(400.0, 200.0),
//!     WorldPoint::new(400.0, 300.0),
//! ])];
//! let env = Environment::new(800.0, 600.0, obstacles).unwrap();
//! let mut engine = ExplorationEngine::new(EngineConfig::default().with_seed(1), env).unwrap();
//!
//! for _ in 0..500 {
//!     engine.advance();
//! }
//! println!("coverage {:.1}%", engine.coverage() * 100.0);
//! ```
//!
//! ## Coordinate Frame
//!
//! Screen convention: X right, Y down, angles in radians measured from +X
//! towards +Y. An increasing heading therefore turns clockwise on screen.
//! Grid cell `(i, j)` stands for the world point `(i * cell_size, j * cell_size)`.
//!
//! ## Architecture
//!
//! - [`core`]: Points, segments, polylines and angle helpers
//! - [`config`]: YAML-loadable engine configuration
//! - [`grid`]: Discovery grid, sensor discovery and visit history
//! - [`boundary`]: Virtual walls around undiscovered components
//! - [`visibility`]: Pivot generation and the visibility graph
//! - [`pathfinding`]: A* with per-query start and goal injection
//! - [`exploration`]: Potential field, motion and the tick engine

pub mod boundary;
pub mod config;
pub mod core;
pub mod environment;
pub mod error;
pub mod exploration;
pub mod grid;
pub mod pathfinding;
pub mod visibility;

// Re-export main types at crate root
pub use config::EngineConfig;
pub use environment::Environment;
pub use error::{Anomaly, Error, Result};
pub use exploration::{
    ControlMode, EngineSnapshot, ExplorationEngine, ExplorationState, SteerCommand, TickReport,
};

pub use boundary::{BoundaryTracer, VirtualWall};
pub use grid::OccupancyGrid;
pub use pathfinding::{AStarPlanner, PathResult};
pub use visibility::{GraphBuilder, VisibilityGraph};
