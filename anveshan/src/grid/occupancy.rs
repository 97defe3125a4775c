//! Discovered/undiscovered occupancy grid.

use crate::core::{GridCoord, WorldPoint};

/// Boolean grid of discovered cells.
///
/// The grid uses a coordinate system where:
/// - Cell `(i, j)` is represented by the world point `(i * cell_size, j * cell_size)`
/// - Dimensions are `ceil(extent / cell_size) + margin` along each axis
/// - Storage is row-major (`index = y * width + x`)
///
/// Discovery is monotonic: a cell, once discovered, is never reset.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    discovered: Vec<bool>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// World units per cell
    cell_size: f32,
    /// Environment extent the grid was sized for
    extent: WorldPoint,
    /// Discovered cells inside the environment
    discovered_in_bounds: usize,
    /// Total cells inside the environment
    cells_in_bounds: usize,
}

impl OccupancyGrid {
    /// Create an all-undiscovered grid covering `[0, width] × [0, height]`
    pub fn new(env_width: f32, env_height: f32, cell_size: f32, margin: usize) -> Self {
        let width = (env_width / cell_size).ceil().max(0.0) as usize + margin;
        let height = (env_height / cell_size).ceil().max(0.0) as usize + margin;
        let extent = WorldPoint::new(env_width, env_height);
        let mut grid = Self {
            discovered: vec![false; width * height],
            width,
            height,
            cell_size,
            extent,
            discovered_in_bounds: 0,
            cells_in_bounds: 0,
        };
        grid.cells_in_bounds = grid
            .coords_column_major()
            .filter(|c| grid.in_environment(*c))
            .count();
        grid
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

    /// World units per cell
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Check if a coordinate is inside the grid
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Row-major index of a coordinate, if valid
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        self.is_valid_coord(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Whether a cell is discovered. Coordinates outside the grid are not.
    #[inline]
    pub fn is_discovered(&self, coord: GridCoord) -> bool {
        self.index(coord).is_some_and(|i| self.discovered[i])
    }

    /// Mark a cell discovered. Returns true if it was not discovered before.
    pub fn mark_discovered(&mut self, coord: GridCoord) -> bool {
        let Some(idx) = self.index(coord) else {
            return false;
        };
        if self.discovered[idx] {
            return false;
        }
        self.discovered[idx] = true;
        if self.in_environment(coord) {
            self.discovered_in_bounds += 1;
        }
        true
    }

    /// World point represented by a cell
    #[inline]
    pub fn cell_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            coord.x as f32 * self.cell_size,
            coord.y as f32 * self.cell_size,
        )
    }

    /// Nearest cell to a world point, clamped into the grid
    pub fn world_to_cell(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            self.clamp_axis(point.x, self.width),
            self.clamp_axis(point.y, self.height),
        )
    }

    fn clamp_axis(&self, value: f32, cells: usize) -> i32 {
        let max = cells.saturating_sub(1) as f32;
        let idx = (value / self.cell_size).round();
        // NaN fails both comparisons and lands on 0
        if idx >= max {
            max as i32
        } else if idx > 0.0 {
            idx as i32
        } else {
            0
        }
    }

    /// Clamp a coordinate into the grid
    pub fn clamp_coord(&self, coord: GridCoord) -> GridCoord {
        GridCoord::new(
            coord.x.clamp(0, self.width.saturating_sub(1) as i32),
            coord.y.clamp(0, self.height.saturating_sub(1) as i32),
        )
    }

    /// Whether a cell's world point lies inside the environment rectangle.
    ///
    /// Margin cells outside it can never be seen.
    #[inline]
    pub fn in_environment(&self, coord: GridCoord) -> bool {
        if !self.is_valid_coord(coord) {
            return false;
        }
        let p = self.cell_to_world(coord);
        p.x <= self.extent.x && p.y <= self.extent.y
    }

    /// Number of discovered cells inside the environment
    #[inline]
    pub fn discovered_count(&self) -> usize {
        self.discovered_in_bounds
    }

    /// Number of cells inside the environment
    #[inline]
    pub fn environment_cell_count(&self) -> usize {
        self.cells_in_bounds
    }

    /// Discovered fraction of in-environment cells, in [0, 1]
    pub fn coverage(&self) -> f32 {
        if self.cells_in_bounds == 0 {
            return 0.0;
        }
        self.discovered_in_bounds as f32 / self.cells_in_bounds as f32
    }

    /// All coordinates, columns left to right, rows top to bottom within a column
    pub fn coords_column_major(&self) -> impl Iterator<Item = GridCoord> + use<> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| GridCoord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_include_margin() {
        let grid = OccupancyGrid::new(800.0, 600.0, 10.0, 2);
        assert_eq!(grid.width(), 82);
        assert_eq!(grid.height(), 62);

        let grid = OccupancyGrid::new(95.0, 40.0, 10.0, 2);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 6);
    }

    #[test]
    fn test_world_to_cell_clamps() {
        let grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        assert_eq!(grid.world_to_cell(WorldPoint::new(34.0, 46.0)), GridCoord::new(3, 5));
        assert_eq!(grid.world_to_cell(WorldPoint::new(-50.0, 5000.0)), GridCoord::new(0, 11));
        assert_eq!(grid.world_to_cell(WorldPoint::new(f32::NAN, 0.0)), GridCoord::new(0, 0));
    }

    #[test]
    fn test_out_of_grid_reads_are_safe() {
        let mut grid = OccupancyGrid::new(50.0, 50.0, 10.0, 2);
        assert!(!grid.is_discovered(GridCoord::new(-1, 3)));
        assert!(!grid.is_discovered(GridCoord::new(100, 3)));
        assert!(!grid.mark_discovered(GridCoord::new(-1, 3)));
    }

    #[test]
    fn test_mark_is_monotonic() {
        let mut grid = OccupancyGrid::new(50.0, 50.0, 10.0, 2);
        let c = GridCoord::new(2, 2);
        assert!(grid.mark_discovered(c));
        assert!(!grid.mark_discovered(c));
        assert!(grid.is_discovered(c));
        assert_eq!(grid.discovered_count(), 1);
    }

    #[test]
    fn test_environment_cells_and_coverage() {
        let mut grid = OccupancyGrid::new(50.0, 50.0, 10.0, 2);
        // Cells 0..=5 on each axis are inside [0, 50]
        assert_eq!(grid.environment_cell_count(), 36);
        assert!(grid.in_environment(GridCoord::new(5, 5)));
        assert!(!grid.in_environment(GridCoord::new(6, 0)));

        // Margin cells do not count towards coverage
        grid.mark_discovered(GridCoord::new(6, 6));
        assert_eq!(grid.discovered_count(), 0);
        grid.mark_discovered(GridCoord::new(0, 0));
        assert!((grid.coverage() - 1.0 / 36.0).abs() < 1e-6);
    }

    #[test]
    fn test_column_major_order() {
        let grid = OccupancyGrid::new(10.0, 10.0, 10.0, 2);
        let coords: Vec<_> = grid.coords_column_major().collect();
        assert_eq!(coords[0], GridCoord::new(0, 0));
        assert_eq!(coords[1], GridCoord::new(0, 1));
        assert_eq!(coords[2], GridCoord::new(0, 2));
        assert_eq!(coords[3], GridCoord::new(1, 0));
    }
}
