//! A* search over the visibility graph.
//!
//! The start and goal are injected per query and never stored in the graph.
//! Edge costs and the heuristic are Euclidean, so the heuristic is admissible
//! and consistent.

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{PathFailure, PathResult};

use crate::core::WorldPoint;
use crate::visibility::VisibilityGraph;

/// One-off path query
pub fn find_path(graph: &VisibilityGraph, start: WorldPoint, goal: WorldPoint) -> PathResult {
    AStarPlanner::new(graph, start).find_path(goal)
}

/// Check if a path exists
pub fn path_exists(graph: &VisibilityGraph, start: WorldPoint, goal: WorldPoint) -> bool {
    find_path(graph, start, goal).success
}
