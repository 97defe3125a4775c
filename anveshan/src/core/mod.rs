//! Core geometry for the exploration engine.
//!
//! - [`GridCoord`] and [`WorldPoint`]: coordinate types
//! - [`Segment`]: bounded intersection and distance tests
//! - [`Polyline`]: obstacle and virtual-wall shapes
//! - [`math`]: angle normalization and sector membership

pub mod math;
mod point;
mod polyline;
mod segment;

pub use math::{angle_diff, angle_in_sector, normalize_angle, normalize_angle_positive};
pub use point::{COMPASS, GridCoord, WorldPoint};
pub use polyline::Polyline;
pub use segment::{INTERSECT_EPS, Segment};
