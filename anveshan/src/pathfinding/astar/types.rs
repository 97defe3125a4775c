//! A* pathfinding types.

use crate::core::WorldPoint;
use std::cmp::Ordering;

/// A node in the A* open set.
///
/// Ordered for a max-heap so that the best node pops first: lowest `f`,
/// then lowest `h` (closest to the goal), then earliest insertion.
#[derive(Clone, Debug)]
pub(super) struct SearchNode {
    pub id: usize,
    pub g_cost: f32, // Cost from start
    pub h_cost: f32, // Heuristic to goal
    pub f_cost: f32, // g_cost + h_cost
    pub seq: u64,    // Insertion order
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.h_cost.total_cmp(&self.h_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of an A* query
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Waypoints from start to goal (empty if no path found)
    pub path_world: Vec<WorldPoint>,
    /// Total path length
    pub cost: f32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a successful result
    pub(super) fn found(path_world: Vec<WorldPoint>, cost: f32, nodes_expanded: usize) -> Self {
        Self {
            path_world,
            cost,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }

    /// Create a failed result
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path_world: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.path_world.len()
    }

    /// True when no path was found
    pub fn is_empty(&self) -> bool {
        self.path_world.is_empty()
    }

    /// Length along the waypoints
    pub fn length(&self) -> f32 {
        self.path_world
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Open set exhausted without reaching the goal
    NoPath,
    /// Start or goal has non-finite coordinates
    InvalidEndpoint,
}
