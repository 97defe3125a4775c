//! Sensor discovery: marking the cells the agent can currently see.
//!
//! A cell is seen when its world point is strictly within sensor range,
//! inside the heading sector, and not occluded by any solid wall.

use log::{debug, trace};

use crate::core::{GridCoord, Segment, WorldPoint, angle_in_sector};

use super::OccupancyGrid;

/// Field of view of the agent's sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorSector {
    /// Sensor position
    pub origin: WorldPoint,
    /// Facing direction (radians)
    pub heading: f32,
    /// Range (exclusive)
    pub range: f32,
    /// Half of the field-of-view angle (radians)
    pub half_angle: f32,
}

impl SensorSector {
    /// Create a sensor sector
    pub fn new(origin: WorldPoint, heading: f32, range: f32, half_angle: f32) -> Self {
        Self {
            origin,
            heading,
            range,
            half_angle,
        }
    }

    /// Whether `p` is inside range and angular span (occlusion not considered)
    pub fn contains(&self, p: &WorldPoint) -> bool {
        let dist = self.origin.distance(p);
        if dist >= self.range {
            return false;
        }
        // The sensor's own cell has no direction
        if dist <= f32::EPSILON {
            return true;
        }
        angle_in_sector(self.origin.angle_to(p), self.heading, self.half_angle)
    }

    /// Cell bounds of the square `[origin - range, origin + range]²`, clamped into the grid
    fn cell_window(&self, grid: &OccupancyGrid) -> (GridCoord, GridCoord) {
        let cs = grid.cell_size();
        let lo = GridCoord::new(
            ((self.origin.x - self.range) / cs).floor() as i32,
            ((self.origin.y - self.range) / cs).floor() as i32,
        );
        let hi = GridCoord::new(
            ((self.origin.x + self.range) / cs).ceil() as i32,
            ((self.origin.y + self.range) / cs).ceil() as i32,
        );
        (grid.clamp_coord(lo), grid.clamp_coord(hi))
    }
}

/// Whether any wall cuts the open segment from `from` to `to`.
///
/// Contact exactly at either end does not count, so a cell lying on a wall
/// is still visible, and so is a cell seen from a point on a wall.
pub fn is_occluded(from: WorldPoint, to: WorldPoint, walls: &[Segment]) -> bool {
    let ray = Segment::new(from, to);
    walls.iter().any(|wall| ray.blocked_by(wall))
}

/// Mark every visible cell discovered.
///
/// Returns the number of newly discovered cells. Running it again with the
/// same pose discovers nothing.
pub fn discover(grid: &mut OccupancyGrid, sector: &SensorSector, walls: &[Segment]) -> usize {
    let (lo, hi) = sector.cell_window(grid);
    let mut newly = 0;

    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            let coord = GridCoord::new(x, y);
            if grid.is_discovered(coord) {
                continue;
            }
            let center = grid.cell_to_world(coord);
            if !sector.contains(&center) || is_occluded(sector.origin, center, walls) {
                continue;
            }
            if grid.mark_discovered(coord) {
                trace!("[Discovery] cell ({},{})", x, y);
                newly += 1;
            }
        }
    }

    debug!(
        "[Discovery] pose=({:.1},{:.1}) heading={:.2} new_cells={} coverage={:.1}%",
        sector.origin.x,
        sector.origin.y,
        sector.heading,
        newly,
        grid.coverage() * 100.0
    );
    newly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Polyline;
    use crate::environment::Environment;
    use std::f32::consts::FRAC_PI_4;

    fn sector(x: f32, y: f32, heading: f32) -> SensorSector {
        SensorSector::new(WorldPoint::new(x, y), heading, 30.0, FRAC_PI_4)
    }

    #[test]
    fn test_discovers_cells_in_front() {
        let env = Environment::empty(100.0, 100.0).unwrap();
        let mut grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        let newly = discover(&mut grid, &sector(50.0, 50.0, 0.0), &env.solid_walls());

        assert!(newly > 0);
        assert!(grid.is_discovered(GridCoord::new(5, 5)));
        assert!(grid.is_discovered(GridCoord::new(7, 5)));
        // Range is exclusive
        assert!(!grid.is_discovered(GridCoord::new(8, 5)));
        // Behind the agent
        assert!(!grid.is_discovered(GridCoord::new(3, 5)));
        // Below the sector edge but above 0 degrees wrap
        assert!(grid.is_discovered(GridCoord::new(7, 4)));
        assert!(grid.is_discovered(GridCoord::new(7, 6)));
        // Outside the 45 degree half angle
        assert!(!grid.is_discovered(GridCoord::new(6, 3)));
    }

    #[test]
    fn test_discovery_is_idempotent() {
        let env = Environment::empty(100.0, 100.0).unwrap();
        let walls = env.solid_walls();
        let mut grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        let s = sector(50.0, 50.0, 1.0);
        let first = discover(&mut grid, &s, &walls);
        let count = grid.discovered_count();
        assert_eq!(discover(&mut grid, &s, &walls), 0);
        assert_eq!(grid.discovered_count(), count);
        assert!(first > 0);
    }

    #[test]
    fn test_wall_occludes_cells_behind_it() {
        let wall = Polyline::new(vec![WorldPoint::new(65.0, 0.0), WorldPoint::new(65.0, 100.0)]);
        let env = Environment::new(100.0, 100.0, vec![wall]).unwrap();
        let mut grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        discover(&mut grid, &sector(50.0, 50.0, 0.0), &env.solid_walls());

        assert!(grid.is_discovered(GridCoord::new(6, 5)));
        assert!(!grid.is_discovered(GridCoord::new(7, 5)));
    }

    #[test]
    fn test_window_clamped_at_grid_edge() {
        let env = Environment::empty(100.0, 100.0).unwrap();
        let mut grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        // Facing straight out of the grid from the corner: must not panic
        let newly = discover(&mut grid, &sector(0.0, 0.0, std::f32::consts::PI), &env.solid_walls());
        assert_eq!(grid.discovered_count(), newly);
        assert!(grid.is_discovered(GridCoord::new(0, 0)));
    }

    #[test]
    fn test_sector_contains() {
        let s = sector(0.0, 0.0, 0.0);
        assert!(s.contains(&WorldPoint::new(10.0, 0.0)));
        assert!(s.contains(&WorldPoint::new(10.0, -9.0)));
        assert!(!s.contains(&WorldPoint::new(-10.0, 0.0)));
        assert!(!s.contains(&WorldPoint::new(30.0, 0.0)));
        assert!(s.contains(&WorldPoint::ZERO));
    }
}
