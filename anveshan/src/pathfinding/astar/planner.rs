//! A* planner over a visibility graph with injected endpoints.

use crate::core::WorldPoint;
use crate::visibility::VisibilityGraph;
use log::{debug, trace};
use std::collections::BinaryHeap;

use super::types::{PathFailure, PathResult, SearchNode};

/// A* pathfinder from a fixed start point.
///
/// The start and each goal are injected as ephemeral nodes: the graph itself
/// is never modified. Visibility from the start is computed once at
/// construction, so several goals can be costed from the same start cheaply.
pub struct AStarPlanner<'a> {
    graph: &'a VisibilityGraph,
    start: WorldPoint,
    /// Graph nodes visible from the start, with distances
    start_links: Vec<(usize, f32)>,
}

impl<'a> AStarPlanner<'a> {
    /// Create a planner rooted at `start`
    pub fn new(graph: &'a VisibilityGraph, start: WorldPoint) -> Self {
        let start_links = graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, p)| graph.is_visible(start, **p))
            .map(|(i, p)| (i, start.distance(p)))
            .collect();
        Self {
            graph,
            start,
            start_links,
        }
    }

    /// The query start
    #[inline]
    pub fn start(&self) -> WorldPoint {
        self.start
    }

    /// Shortest path from the start to `goal`.
    ///
    /// Edge cost and heuristic are both Euclidean distance. Ties on `f` go to
    /// the lower heuristic, then to the earliest inserted node. Returns an
    /// empty path when the goal is unreachable.
    pub fn find_path(&self, goal: WorldPoint) -> PathResult {
        let start = self.start;
        trace!(
            "[AStar] find_path: start=({:.1},{:.1}) goal=({:.1},{:.1})",
            start.x, start.y, goal.x, goal.y
        );

        if !(start.x.is_finite() && start.y.is_finite() && goal.x.is_finite() && goal.y.is_finite())
        {
            debug!("[AStar] FAILED: InvalidEndpoint");
            return PathResult::failed(PathFailure::InvalidEndpoint, 0);
        }

        let n = self.graph.node_count();
        let start_id = n;
        let goal_id = n + 1;
        let position = |id: usize| match id {
            _ if id == start_id => start,
            _ if id == goal_id => goal,
            _ => self.graph.nodes()[id],
        };

        let goal_visible: Vec<bool> = self
            .graph
            .nodes()
            .iter()
            .map(|p| self.graph.is_visible(*p, goal))
            .collect();
        let direct = self.graph.is_visible(start, goal);

        // A* search
        let mut open_set = BinaryHeap::new();
        let mut closed = vec![false; n + 2];
        let mut came_from: Vec<Option<usize>> = vec![None; n + 2];
        let mut g_scores = vec![f32::INFINITY; n + 2];
        let mut seq = 0u64;
        let mut links: Vec<(usize, f32)> = Vec::new();

        let h_start = start.distance(&goal);
        g_scores[start_id] = 0.0;
        open_set.push(SearchNode {
            id: start_id,
            g_cost: 0.0,
            h_cost: h_start,
            f_cost: h_start,
            seq,
        });

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            if closed[current.id] {
                continue;
            }

            // Goal reached
            if current.id == goal_id {
                let mut path_world = Vec::new();
                let mut id = Some(goal_id);
                while let Some(i) = id {
                    path_world.push(position(i));
                    id = came_from[i];
                }
                path_world.reverse();
                debug!(
                    "[AStar] found {} waypoints, cost {:.1}, expanded {} nodes",
                    path_world.len(),
                    current.g_cost,
                    nodes_expanded
                );
                return PathResult::found(path_world, current.g_cost, nodes_expanded);
            }

            closed[current.id] = true;
            nodes_expanded += 1;

            links.clear();
            let here = position(current.id);
            if current.id == start_id {
                links.extend_from_slice(&self.start_links);
                if direct {
                    links.push((goal_id, h_start));
                }
            } else {
                links.extend_from_slice(self.graph.neighbors(current.id));
                if goal_visible[current.id] {
                    links.push((goal_id, here.distance(&goal)));
                }
            }

            for &(neighbor, cost) in &links {
                if closed[neighbor] {
                    continue;
                }
                let tentative_g = g_scores[current.id] + cost;
                if tentative_g < g_scores[neighbor] {
                    came_from[neighbor] = Some(current.id);
                    g_scores[neighbor] = tentative_g;
                    let h = position(neighbor).distance(&goal);
                    seq += 1;
                    open_set.push(SearchNode {
                        id: neighbor,
                        g_cost: tentative_g,
                        h_cost: h,
                        f_cost: tentative_g + h,
                        seq,
                    });
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Shortest distance from the start to every graph node (Dijkstra).
    ///
    /// Unreachable nodes stay at infinity. Pair with [`cost_to`](Self::cost_to)
    /// to cost many goals with one search.
    pub fn node_costs(&self) -> Vec<f32> {
        let n = self.graph.node_count();
        let mut costs = vec![f32::INFINITY; n];
        let mut closed = vec![false; n];
        let mut open_set = BinaryHeap::new();
        let mut seq = 0u64;

        for &(id, cost) in &self.start_links {
            if cost < costs[id] {
                costs[id] = cost;
                seq += 1;
                open_set.push(SearchNode {
                    id,
                    g_cost: cost,
                    h_cost: 0.0,
                    f_cost: cost,
                    seq,
                });
            }
        }

        while let Some(current) = open_set.pop() {
            if closed[current.id] {
                continue;
            }
            closed[current.id] = true;
            for &(neighbor, cost) in self.graph.neighbors(current.id) {
                let tentative = current.g_cost + cost;
                if !closed[neighbor] && tentative < costs[neighbor] {
                    costs[neighbor] = tentative;
                    seq += 1;
                    open_set.push(SearchNode {
                        id: neighbor,
                        g_cost: tentative,
                        h_cost: 0.0,
                        f_cost: tentative,
                        seq,
                    });
                }
            }
        }
        costs
    }

    /// Shortest path length from the start to `goal`, given [`node_costs`](Self::node_costs).
    ///
    /// Infinite when the goal is unreachable.
    pub fn cost_to(&self, node_costs: &[f32], goal: WorldPoint) -> f32 {
        let mut best = if self.graph.is_visible(self.start, goal) {
            self.start.distance(&goal)
        } else {
            f32::INFINITY
        };
        for (node, &cost) in self.graph.nodes().iter().zip(node_costs) {
            let total = cost + node.distance(&goal);
            if total < best && self.graph.is_visible(*node, goal) {
                best = total;
            }
        }
        best
    }
}
