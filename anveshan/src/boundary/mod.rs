//! Virtual walls around undiscovered space.
//!
//! Every tick the tracer turns the occupancy grid into polylines that hug
//! the edge of the unknown, so the planner never routes through unseen
//! space:
//!
//! 1. [`labeling`]: undiscovered cells are grouped into 8-connected components
//! 2. [`contour`]: each component's border is walked into a cell chain
//! 3. [`simplify`]: collinear runs are merged
//!
//! The result is recomputed from scratch each call and depends only on the
//! grid, so tracing an unchanged grid twice yields identical walls.
//!
//! # Example
//!
//! ```rust,ignore
//! use anveshan::boundary::BoundaryTracer;
//!
//! let tracer = BoundaryTracer::new(1e-3);
//! for wall in tracer.trace(&grid) {
//!     println!("component {} -> {} points", wall.component, wall.outline.len());
//! }
//! ```

pub mod contour;
pub mod labeling;
pub mod simplify;

use log::{debug, trace};

use crate::core::Polyline;
use crate::grid::OccupancyGrid;

pub use contour::{CONTOUR_SEED_DIRECTION, Contour, trace_contour};
pub use labeling::{ComponentLabels, label_components};
pub use simplify::simplify_collinear;

/// A synthetic one-sided obstacle along the edge of an undiscovered component.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualWall {
    /// The wall geometry (closed when the contour walk closed)
    pub outline: Polyline,
    /// Label of the undiscovered component it encloses
    pub component: u32,
    /// Number of boundary cells the walk visited
    pub cells: usize,
}

impl VirtualWall {
    /// True if the contour walk returned to its start
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.outline.is_closed()
    }

    /// True for a multi-cell contour that could not be closed
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.cells > 1 && !self.is_closed()
    }
}

/// Builds [`VirtualWall`]s from an occupancy grid.
#[derive(Clone, Debug)]
pub struct BoundaryTracer {
    simplify_epsilon: f32,
}

impl BoundaryTracer {
    /// Create a tracer merging segments whose directions differ by less than `simplify_epsilon`
    pub fn new(simplify_epsilon: f32) -> Self {
        Self { simplify_epsilon }
    }

    /// Trace one wall per undiscovered component that touches discovered space.
    ///
    /// Walls are ordered by component label.
    pub fn trace(&self, grid: &OccupancyGrid) -> Vec<VirtualWall> {
        let labels = label_components(grid);
        let mut walls = Vec::with_capacity(labels.component_count());

        for component in labels.components() {
            let Some(contour) = trace_contour(&labels, grid, component) else {
                trace!(
                    "[Boundary] component {} ({} cells) touches no discovered cell",
                    component,
                    labels.component_size(component)
                );
                continue;
            };
            walls.push(self.to_wall(grid, &contour));
        }

        debug!(
            "[Boundary] {} components -> {} virtual walls ({} open)",
            labels.component_count(),
            walls.len(),
            walls.iter().filter(|w| !w.is_closed()).count()
        );
        walls
    }

    fn to_wall(&self, grid: &OccupancyGrid, contour: &Contour) -> VirtualWall {
        let mut points: Vec<_> = contour
            .cells
            .iter()
            .map(|&c| grid.cell_to_world(c))
            .collect();
        if contour.closed {
            points.push(points[0]);
        }
        let simplified = simplify_collinear(&points, self.simplify_epsilon);
        trace!(
            "[Boundary] component {}: {} cells -> {} points, closed={}",
            contour.component,
            contour.cells.len(),
            simplified.len(),
            contour.closed
        );
        VirtualWall {
            outline: Polyline::new(simplified),
            component: contour.component,
            cells: contour.cells.len(),
        }
    }
}

impl Default for BoundaryTracer {
    fn default() -> Self {
        Self::new(1e-3)
    }
}
