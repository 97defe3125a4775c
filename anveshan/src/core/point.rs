//! Point and coordinate types for the exploration grid and world plane.
//!
//! World coordinates follow screen convention: X grows to the right and
//! Y grows downward, so a positive heading change turns clockwise on screen.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// The 8 compass offsets in clockwise screen order, starting at north.
///
/// Index arithmetic over this table is what contour tracing relies on:
/// `(d + 4) % 8` is always the opposite direction of `d`.
pub const COMPASS: [(i32, i32); 8] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
];

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (max of x and y distance) - used for 8-connected grids
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Coordinate shifted by the given offset
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> GridCoord {
        GridCoord::new(self.x + dx, self.y + dy)
    }

    /// Neighbor in compass direction `dir` (index into [`COMPASS`], taken mod 8)
    #[inline]
    pub fn step(&self, dir: usize) -> GridCoord {
        let (dx, dy) = COMPASS[dir % 8];
        self.offset(dx, dy)
    }

    /// Get the 4 cardinal neighbors (N, E, S, W)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [self.step(0), self.step(2), self.step(4), self.step(6)]
    }

    /// Get the 8 neighbors in [`COMPASS`] order
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        std::array::from_fn(|dir| self.step(dir))
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (environment units, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle from this point to another (radians, from +X toward +Y)
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length. Zero vectors stay zero.
    #[inline]
    pub fn normalize(&self) -> WorldPoint {
        let len = self.length();
        if len > 0.0 {
            WorldPoint::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Vector rotated by a quarter turn (from +X toward +Y)
    #[inline]
    pub fn perpendicular(&self) -> WorldPoint {
        WorldPoint::new(-self.y, self.x)
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &WorldPoint) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component)
    #[inline]
    pub fn cross(&self, other: &WorldPoint) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Exact bitwise key, usable in hash maps.
    ///
    /// `0.0` and `-0.0` are folded together so equal points share a key.
    #[inline]
    pub fn key(&self) -> (u32, u32) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for WorldPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        WorldPoint::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compass_opposites() {
        for dir in 0..8 {
            let (dx, dy) = COMPASS[dir];
            let (ox, oy) = COMPASS[(dir + 4) % 8];
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_neighbors_4_are_cardinal() {
        let c = GridCoord::new(3, 3);
        for n in c.neighbors_4() {
            assert_eq!(c.manhattan_distance(&n), 1);
        }
    }

    #[test]
    fn test_neighbors_8_unique() {
        let c = GridCoord::new(0, 0);
        let n = c.neighbors_8();
        for i in 0..8 {
            assert_eq!(c.chebyshev_distance(&n[i]), 1);
            for j in (i + 1)..8 {
                assert_ne!(n[i], n[j]);
            }
        }
    }

    #[test]
    fn test_world_point_ops() {
        let a = WorldPoint::new(3.0, 4.0);
        assert_relative_eq!(a.length(), 5.0);
        assert_relative_eq!(a.normalize().length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(a.dot(&a.perpendicular()), 0.0);
        assert_relative_eq!(WorldPoint::new(1.0, 0.0).cross(&WorldPoint::new(0.0, 1.0)), 1.0);
        assert_eq!(a - a, WorldPoint::ZERO);
        assert_eq!(-a + a, WorldPoint::ZERO);
    }

    #[test]
    fn test_point_key_folds_negative_zero() {
        assert_eq!(WorldPoint::new(0.0, 1.0).key(), WorldPoint::new(-0.0, 1.0).key());
    }
}
