//! Visibility graph construction.
//!
//! - [`pivots`]: offset waypoints around obstacle and virtual-wall vertices
//! - [`VisibilityGraph`]: symmetric adjacency between mutually visible pivots
//! - [`GraphBuilder`]: caches static pivots, merges virtual ones each tick

mod graph;
pub mod pivots;

pub use graph::{GraphBuilder, VisibilityGraph, is_visible};
