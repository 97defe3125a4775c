//! Polylines: the shape of every obstacle and virtual wall.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;
use super::segment::Segment;

/// Ordered sequence of points.
///
/// A polyline whose first and last points coincide is *closed* and
/// describes a loop obstacle; otherwise it is an *open* wall chain.
/// A single point is a valid, degenerate obstacle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<WorldPoint>,
}

impl Polyline {
    /// Create a polyline from its points
    pub fn new(points: Vec<WorldPoint>) -> Self {
        Self { points }
    }

    /// Create a closed polyline, appending the first point if needed
    pub fn closed(mut points: Vec<WorldPoint>) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last())
            && (points.len() == 1 || first != last)
        {
            points.push(first);
        }
        Self { points }
    }

    /// Axis-aligned rectangle as a closed polyline
    pub fn rectangle(min: WorldPoint, max: WorldPoint) -> Self {
        Self::closed(vec![
            min,
            WorldPoint::new(max.x, min.y),
            max,
            WorldPoint::new(min.x, max.y),
        ])
    }

    /// Points in order
    #[inline]
    pub fn points(&self) -> &[WorldPoint] {
        &self.points
    }

    /// Number of stored points (a closed polyline counts its start twice)
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the polyline has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if first and last points coincide and there is more than one point
    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Consecutive segments. Zero-length steps are skipped.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| Segment::new(w[0], w[1]))
    }

    /// Total length along the polyline
    pub fn length(&self) -> f32 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Distinct vertices: consecutive duplicates dropped, closing point dropped.
    pub fn vertices(&self) -> Vec<WorldPoint> {
        let mut out: Vec<WorldPoint> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }
}

impl From<Vec<WorldPoint>> for Polyline {
    fn from(points: Vec<WorldPoint>) -> Self {
        Self::new(points)
    }
}
