//! Path planning.
//!
//! ```rust,ignore
//! use anveshan::pathfinding::AStarPlanner;
//!
//! let planner = AStarPlanner::new(&graph, agent_position);
//! let result = planner.find_path(target);
//! if result.success {
//!     println!("Path found with {} waypoints", result.path_world.len());
//! }
//! ```

pub mod astar;

pub use astar::{AStarPlanner, PathFailure, PathResult, find_path, path_exists};
