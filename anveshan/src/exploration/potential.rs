//! Frontier potential field and exploration target selection.
//!
//! Every discovered cell whose four orthogonal neighbors are also discovered
//! is scored by the undiscovered environment cells in a square window around
//! it, each weighted by `gain / grid distance`, minus the cell's visit score.
//! All other cells are ineligible (`-inf`).
//!
//! Selection takes the best-scoring cell, then prefers whichever near-best
//! candidate has the shortest planned path from the agent. All near-best
//! candidates are costed from a single search over the visibility graph.

use log::{debug, trace};

use crate::config::TargetSection;
use crate::core::{GridCoord, WorldPoint};
use crate::grid::{OccupancyGrid, VisitField};
use crate::pathfinding::{AStarPlanner, PathResult};
use crate::visibility::VisibilityGraph;

/// Whether a cell may become a target: discovered, as are its 4 neighbors
pub fn is_eligible_cell(grid: &OccupancyGrid, coord: GridCoord) -> bool {
    grid.is_discovered(coord) && coord.neighbors_4().iter().all(|n| grid.is_discovered(*n))
}

/// Minimum potential a refinement candidate must reach
#[inline]
pub fn refinement_threshold(max_potential: f32, ratio: f32) -> f32 {
    max_potential - (1.0 - ratio) * max_potential.abs()
}

/// Potential per grid cell, recomputed for each selection.
#[derive(Clone, Debug)]
pub struct PotentialField {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl PotentialField {
    /// Score every cell of `grid`
    pub fn compute(grid: &OccupancyGrid, visits: &VisitField, settings: &TargetSection) -> Self {
        let w = settings.window as i32;
        let kernel: Vec<(i32, i32, f32)> = (-w..=w)
            .flat_map(|dx| (-w..=w).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                (dx, dy, settings.frontier_gain / dist)
            })
            .collect();

        let (width, height) = (grid.width(), grid.height());
        let mut values = vec![f32::NEG_INFINITY; width * height];
        for coord in grid.coords_column_major() {
            if !is_eligible_cell(grid, coord) {
                continue;
            }
            let frontier: f32 = kernel
                .iter()
                .filter(|(dx, dy, _)| {
                    let n = coord.offset(*dx, *dy);
                    grid.in_environment(n) && !grid.is_discovered(n)
                })
                .map(|(_, _, weight)| weight)
                .sum();
            values[coord.y as usize * width + coord.x as usize] = frontier - visits.value(coord);
        }

        Self {
            values,
            width,
            height,
        }
    }

    /// Potential at a cell (`-inf` outside the field)
    pub fn value(&self, coord: GridCoord) -> f32 {
        if coord.x < 0 || coord.y < 0 {
            return f32::NEG_INFINITY;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x >= self.width || y >= self.height {
            return f32::NEG_INFINITY;
        }
        self.values[y * self.width + x]
    }

    /// Column-major iteration over eligible cells and their potentials
    pub fn eligible(&self) -> impl Iterator<Item = (GridCoord, f32)> + '_ {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w)
            .flat_map(move |x| (0..h).map(move |y| GridCoord::new(x, y)))
            .map(|c| (c, self.value(c)))
            .filter(|(_, v)| v.is_finite())
    }

    /// Best eligible cell. Ties keep the first in column-major order.
    pub fn argmax(&self) -> Option<(GridCoord, f32)> {
        self.eligible()
            .fold(None, |best: Option<(GridCoord, f32)>, (c, v)| match best {
                Some((_, bv)) if v <= bv => best,
                _ => Some((c, v)),
            })
    }

    /// Eligible cells with potential at least `threshold`, column-major
    pub fn candidates(&self, threshold: f32) -> Vec<(GridCoord, f32)> {
        self.eligible().filter(|(_, v)| *v >= threshold).collect()
    }
}

/// A chosen exploration goal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Grid cell
    pub cell: GridCoord,
    /// World point of the cell
    pub point: WorldPoint,
    /// Potential when selected
    pub potential: f32,
}

/// Target plus the path planned to it
#[derive(Clone, Debug)]
pub struct TargetSelection {
    pub target: Target,
    /// Empty when no candidate was reachable
    pub path: PathResult,
}

/// Picks exploration targets from the potential field.
#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    settings: TargetSection,
}

impl TargetSelector {
    /// Create a selector
    pub fn new(settings: TargetSection) -> Self {
        Self { settings }
    }

    /// Selection settings
    pub fn settings(&self) -> &TargetSection {
        &self.settings
    }

    /// Select a target and plan a path to it from `agent`.
    ///
    /// Returns `None` when no cell is eligible. Otherwise every cell within
    /// the refinement ratio of the best potential (and not on top of the
    /// agent) is costed with one shortest-path search from the agent, and the
    /// shortest path wins; ties keep the stronger, then column-major first,
    /// candidate. If none is reachable the best cell is returned with its
    /// (empty) path.
    pub fn select(
        &self,
        grid: &OccupancyGrid,
        visits: &VisitField,
        graph: &VisibilityGraph,
        agent: WorldPoint,
    ) -> Option<TargetSelection> {
        let field = PotentialField::compute(grid, visits, &self.settings);
        let (best_cell, best) = field.argmax()?;
        let threshold = refinement_threshold(best, self.settings.refinement_ratio);

        let mut candidates: Vec<(GridCoord, f32)> = field
            .candidates(threshold)
            .into_iter()
            .filter(|(c, _)| grid.cell_to_world(*c).distance(&agent) > self.settings.min_target_distance)
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        trace!(
            "[Target] best ({},{}) potential {:.3}, {} candidates above {:.3}",
            best_cell.x,
            best_cell.y,
            best,
            candidates.len(),
            threshold
        );

        let planner = AStarPlanner::new(graph, agent);
        let node_costs = planner.node_costs();
        let mut chosen: Option<(Target, f32)> = None;
        for (cell, potential) in candidates {
            let point = grid.cell_to_world(cell);
            let cost = planner.cost_to(&node_costs, point);
            if cost.is_finite() && chosen.as_ref().is_none_or(|(_, c)| cost < *c) {
                chosen = Some((
                    Target {
                        cell,
                        point,
                        potential,
                    },
                    cost,
                ));
            }
        }

        let target = chosen.map_or_else(
            || Target {
                cell: best_cell,
                point: grid.cell_to_world(best_cell),
                potential: best,
            },
            |(target, _)| target,
        );
        let selection = TargetSelection {
            target,
            path: planner.find_path(target.point),
        };
        debug!(
            "[Target] selected ({},{}) potential {:.3}, path {} waypoints, length {:.1}",
            selection.target.cell.x,
            selection.target.cell.y,
            selection.target.potential,
            selection.path.len(),
            selection.path.length()
        );
        Some(selection)
    }
}
