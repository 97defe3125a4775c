//! Occupancy grid and sensor discovery.
//!
//! - [`OccupancyGrid`]: monotonic discovered/undiscovered cells
//! - [`discover`]: marks the cells inside the sensor sector, with occlusion
//! - [`VisitField`]: decayed visitation scores

pub mod discovery;
mod occupancy;
mod visits;

pub use discovery::{SensorSector, discover, is_occluded};
pub use occupancy::OccupancyGrid;
pub use visits::VisitField;
