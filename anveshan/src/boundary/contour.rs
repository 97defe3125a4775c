//! Moore-neighbor contour walk around an undiscovered component.

use std::collections::HashSet;

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

use super::labeling::ComponentLabels;

/// Compass index (into [`COMPASS`](crate::core::COMPASS)) the walk treats as
/// its arrival direction at the start cell: east.
///
/// The start cell is the first boundary cell of its component in a
/// column-major scan, so no boundary cell of the component lies west of it.
/// Arriving "from the west" makes the first look point at that empty side,
/// and the clockwise scan then picks up the contour in a fixed orientation.
pub const CONTOUR_SEED_DIRECTION: usize = 2;

/// Minimum number of cells walked before stepping back onto the start closes
/// the loop. Anything shorter would just be the walk turning around.
const MIN_CLOSED_CELLS: usize = 3;

/// Ordered boundary cells of one undiscovered component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    /// Component label
    pub component: u32,
    /// Cells in walk order, starting at the start cell
    pub cells: Vec<GridCoord>,
    /// True if the walk returned to its start
    pub closed: bool,
}

/// Whether `coord` belongs to `component` and touches discovered space.
pub fn is_boundary_cell(
    labels: &ComponentLabels,
    grid: &OccupancyGrid,
    coord: GridCoord,
    component: u32,
) -> bool {
    labels.label(coord) == Some(component)
        && coord.neighbors_8().iter().any(|n| grid.is_discovered(*n))
}

/// First boundary cell of `component`, scanning columns left to right and
/// rows top to bottom within each column.
pub fn find_start(
    labels: &ComponentLabels,
    grid: &OccupancyGrid,
    component: u32,
) -> Option<GridCoord> {
    grid.coords_column_major()
        .find(|&c| is_boundary_cell(labels, grid, c, component))
}

/// Walk the boundary of `component`.
///
/// From the current cell the 8 neighbors are scanned clockwise starting at
/// the backtrack direction `(dir + 4) % 8`. The walk steps onto the first
/// unconsumed boundary cell, closes when it can step back onto the start,
/// and stops open when neither is possible. Every cell is consumed once, so
/// the walk terminates.
///
/// Returns `None` if the component has no boundary cell (it touches no
/// discovered space).
pub fn trace_contour(
    labels: &ComponentLabels,
    grid: &OccupancyGrid,
    component: u32,
) -> Option<Contour> {
    let start = find_start(labels, grid, component)?;
    let mut consumed = HashSet::from([start]);
    let mut cells = vec![start];
    let mut current = start;
    let mut dir = CONTOUR_SEED_DIRECTION;
    let mut closed = false;

    'walk: loop {
        for k in 0..8 {
            let look = (dir + 4 + k) % 8;
            let next = current.step(look);
            if next == start && cells.len() >= MIN_CLOSED_CELLS {
                closed = true;
                break 'walk;
            }
            if !consumed.contains(&next) && is_boundary_cell(labels, grid, next, component) {
                consumed.insert(next);
                cells.push(next);
                current = next;
                dir = look;
                continue 'walk;
            }
        }
        break;
    }

    Some(Contour {
        component,
        cells,
        closed,
    })
}
