//! Connected-component labeling of undiscovered space.

use std::collections::VecDeque;

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// Label of cells that belong to no undiscovered component
pub const BLOCKED_LABEL: u32 = 1;

/// First label handed out to an undiscovered component
pub const FIRST_COMPONENT_LABEL: u32 = 2;

const UNLABELED: u32 = 0;

/// Per-cell component labels over an [`OccupancyGrid`].
///
/// Discovered cells and cells outside the environment carry
/// [`BLOCKED_LABEL`]. Every 8-connected region of undiscovered cells carries
/// its own label, starting at [`FIRST_COMPONENT_LABEL`] in scan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentLabels {
    labels: Vec<u32>,
    width: usize,
    height: usize,
    sizes: Vec<usize>,
}

impl ComponentLabels {
    /// Label of a cell, `None` outside the grid
    #[inline]
    pub fn label(&self, coord: GridCoord) -> Option<u32> {
        self.index(coord).map(|i| self.labels[i])
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        (coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of undiscovered components
    #[inline]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Component labels in ascending order
    pub fn components(&self) -> impl Iterator<Item = u32> + use<> {
        FIRST_COMPONENT_LABEL..FIRST_COMPONENT_LABEL + self.sizes.len() as u32
    }

    /// Cell count of a component (0 for unknown labels)
    pub fn component_size(&self, label: u32) -> usize {
        label
            .checked_sub(FIRST_COMPONENT_LABEL)
            .and_then(|i| self.sizes.get(i as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// Label every undiscovered region of the grid.
///
/// Cells are seeded in column-major order and each region is flooded
/// breadth-first over 8-connectivity. O(grid size).
pub fn label_components(grid: &OccupancyGrid) -> ComponentLabels {
    let (width, height) = (grid.width(), grid.height());
    let mut labels = vec![UNLABELED; width * height];

    for coord in grid.coords_column_major() {
        if grid.is_discovered(coord) || !grid.in_environment(coord) {
            labels[coord.y as usize * width + coord.x as usize] = BLOCKED_LABEL;
        }
    }

    let mut result = ComponentLabels {
        labels,
        width,
        height,
        sizes: Vec::new(),
    };
    let mut queue = VecDeque::new();

    for seed in grid.coords_column_major() {
        if result.label(seed) != Some(UNLABELED) {
            continue;
        }
        let label = FIRST_COMPONENT_LABEL + result.sizes.len() as u32;
        let mut size = 0;
        if let Some(i) = result.index(seed) {
            result.labels[i] = label;
        }
        queue.push_back(seed);

        while let Some(cell) = queue.pop_front() {
            size += 1;
            for n in cell.neighbors_8() {
                if let Some(i) = result.index(n)
                    && result.labels[i] == UNLABELED
                {
                    result.labels[i] = label;
                    queue.push_back(n);
                }
            }
        }
        result.sizes.push(size);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(discovered: &[(i32, i32)]) -> OccupancyGrid {
        // 0..=9 inside the environment, column and row 10 are margin
        let mut grid = OccupancyGrid::new(90.0, 90.0, 10.0, 2);
        for &(x, y) in discovered {
            grid.mark_discovered(GridCoord::new(x, y));
        }
        grid
    }

    #[test]
    fn test_fully_undiscovered_is_one_component() {
        let labels = label_components(&grid_with(&[]));
        assert_eq!(labels.component_count(), 1);
        assert_eq!(labels.component_size(FIRST_COMPONENT_LABEL), 100);
        assert_eq!(labels.label(GridCoord::new(0, 0)), Some(FIRST_COMPONENT_LABEL));
        assert_eq!(labels.label(GridCoord::new(10, 0)), Some(BLOCKED_LABEL));
        assert_eq!(labels.label(GridCoord::new(-1, 0)), None);
    }

    #[test]
    fn test_discovered_wall_splits_components() {
        let column: Vec<(i32, i32)> = (0..10).map(|y| (4, y)).collect();
        let labels = label_components(&grid_with(&column));
        assert_eq!(labels.component_count(), 2);
        assert_eq!(labels.label(GridCoord::new(0, 0)), Some(2));
        assert_eq!(labels.label(GridCoord::new(9, 9)), Some(3));
        assert_eq!(labels.component_size(2), 40);
        assert_eq!(labels.component_size(3), 50);
    }

    #[test]
    fn test_diagonal_gap_stays_connected() {
        // A discovered anti-diagonal still leaves an 8-connected passage
        let diagonal: Vec<(i32, i32)> = (0..10).map(|i| (i, 9 - i)).collect();
        let labels = label_components(&grid_with(&diagonal));
        assert_eq!(labels.component_count(), 1);
    }

    #[test]
    fn test_enclosed_hole_is_own_component() {
        let mut ring = Vec::new();
        for x in 2..=6 {
            for y in 2..=6 {
                if x == 2 || x == 6 || y == 2 || y == 6 {
                    ring.push((x, y));
                }
            }
        }
        let labels = label_components(&grid_with(&ring));
        assert_eq!(labels.component_count(), 2);
        assert_eq!(labels.label(GridCoord::new(4, 4)), Some(3));
        assert_eq!(labels.component_size(3), 9);
        let ids: Vec<u32> = labels.components().collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
