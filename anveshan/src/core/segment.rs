//! Line segments and the intersection tests that drive occlusion,
//! visibility and collision checks.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Parametric tolerance for bounded intersection tests.
///
/// Contact at an endpoint counts as an intersection, so a sight line that
/// grazes a vertex is rejected rather than slipping through on rounding.
pub const INTERSECT_EPS: f32 = 1e-5;

/// Relative threshold under which two directions are treated as parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// Straight segment between two world points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point
    pub start: WorldPoint,
    /// End point
    pub end: WorldPoint,
}

impl Segment {
    /// Create a new segment
    #[inline]
    pub fn new(start: WorldPoint, end: WorldPoint) -> Self {
        Self { start, end }
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> WorldPoint {
        self.end - self.start
    }

    /// Whether either endpoint exactly equals `p`
    #[inline]
    pub fn has_endpoint(&self, p: &WorldPoint) -> bool {
        self.start == *p || self.end == *p
    }

    /// Parameter of the orthogonal projection of `p` onto the carrying line.
    ///
    /// 0 at `start`, 1 at `end`, unclamped. Degenerate segments return 0.
    pub fn project(&self, p: &WorldPoint) -> f32 {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        (*p - self.start).dot(&d) / len_sq
    }

    /// Point at parameter `t` along the segment
    #[inline]
    pub fn point_at(&self, t: f32) -> WorldPoint {
        self.start + self.direction() * t
    }

    /// Shortest distance from `p` to any point of the segment
    pub fn distance_to_point(&self, p: &WorldPoint) -> f32 {
        let t = self.project(p).clamp(0.0, 1.0);
        self.point_at(t).distance(p)
    }

    /// Parameter range `[t_lo, t_hi]` along `self` where the two segments touch.
    ///
    /// A proper crossing yields a single parameter (`t_lo == t_hi`); collinear
    /// overlap yields the overlapping span. `None` when the segments are disjoint.
    pub fn contact_span(&self, other: &Segment) -> Option<(f32, f32)> {
        let r = self.direction();
        let s = other.direction();
        let r_len = r.length();
        let s_len = s.length();

        if r_len <= f32::EPSILON {
            return (other.distance_to_point(&self.start) <= INTERSECT_EPS * s_len.max(1.0))
                .then_some((0.0, 0.0));
        }
        if s_len <= f32::EPSILON {
            if self.distance_to_point(&other.start) > INTERSECT_EPS * r_len {
                return None;
            }
            let t = self.project(&other.start).clamp(0.0, 1.0);
            return Some((t, t));
        }

        let qp = other.start - self.start;
        let denom = r.cross(&s);

        if denom.abs() <= PARALLEL_EPS * r_len * s_len {
            // Parallel: only collinear overlap counts
            if qp.cross(&r).abs() > PARALLEL_EPS * r_len * qp.length().max(1.0) {
                return None;
            }
            let t0 = self.project(&other.start);
            let t1 = self.project(&other.end);
            let lo = t0.min(t1).max(0.0);
            let hi = t0.max(t1).min(1.0);
            return (lo <= hi + INTERSECT_EPS).then_some((lo.min(hi), hi.max(lo)));
        }

        let t = qp.cross(&s) / denom;
        let u = qp.cross(&r) / denom;
        let inside = |v: f32| (-INTERSECT_EPS..=1.0 + INTERSECT_EPS).contains(&v);
        (inside(t) && inside(u)).then_some((t, t))
    }

    /// Bounded intersection test, endpoints inclusive.
    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        self.contact_span(other).is_some()
    }

    /// Whether `other` touches this segment strictly between its endpoints.
    ///
    /// Contact exactly at `self.start` or `self.end` is ignored, which makes
    /// this the test for an open segment (occlusion, raycasts).
    pub fn blocked_by(&self, other: &Segment) -> bool {
        match self.contact_span(other) {
            Some((lo, hi)) => hi > INTERSECT_EPS && lo < 1.0 - INTERSECT_EPS,
            None => false,
        }
    }

    /// Whether `other` touches this segment anywhere past its start point.
    ///
    /// Used for movement raycasts: an agent resting against a wall may always
    /// leave it, but may never end a step on or beyond one.
    pub fn blocked_after_start(&self, other: &Segment) -> bool {
        match self.contact_span(other) {
            Some((_, hi)) => hi > INTERSECT_EPS,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
        Segment::new(WorldPoint::new(ax, ay), WorldPoint::new(bx, by))
    }

    #[test]
    fn test_crossing_segments() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let (lo, hi) = a.contact_span(&b).unwrap();
        assert_relative_eq!(lo, 0.5, epsilon = 1e-6);
        assert_relative_eq!(hi, 0.5, epsilon = 1e-6);
        assert!(a.blocked_by(&b));
    }

    #[test]
    fn test_disjoint_segments() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 5.0, 10.0, 6.0);
        assert!(!a.intersects(&b));
        // Lines would cross beyond b's end
        let c = seg(20.0, -5.0, 20.0, 5.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_endpoint_counts_as_intersection() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        // ...but not as a block of the open segment
        assert!(!a.blocked_by(&b));
    }

    #[test]
    fn test_t_junction_blocks_open_segment() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 5.0, 10.0);
        assert!(a.blocked_by(&b));
    }

    #[test]
    fn test_collinear_overlap() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        let (lo, hi) = a.contact_span(&b).unwrap();
        assert_relative_eq!(lo, 0.5, epsilon = 1e-6);
        assert_relative_eq!(hi, 1.0, epsilon = 1e-6);
        assert!(a.blocked_by(&b));

        let c = seg(11.0, 0.0, 15.0, 0.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_parallel_offset_not_intersecting() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 1.0, 10.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_blocked_after_start() {
        let wall = seg(0.0, 0.0, 0.0, 10.0);
        // Leaving a wall from a point on it is allowed
        let away = seg(0.0, 5.0, 5.0, 5.0);
        assert!(!away.blocked_after_start(&wall));
        // Ending on the wall is not
        let onto = seg(5.0, 5.0, 0.0, 5.0);
        assert!(onto.blocked_after_start(&wall));
    }

    #[test]
    fn test_distance_to_point() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        assert_relative_eq!(a.distance_to_point(&WorldPoint::new(5.0, 3.0)), 3.0);
        assert_relative_eq!(a.distance_to_point(&WorldPoint::new(-3.0, 4.0)), 5.0);
        assert_relative_eq!(a.project(&WorldPoint::new(15.0, 2.0)), 1.5);
    }

    #[test]
    fn test_degenerate_segment() {
        let dot = seg(5.0, 0.0, 5.0, 0.0);
        let a = seg(0.0, 0.0, 10.0, 0.0);
        assert!(dot.intersects(&a));
        assert!(a.intersects(&dot));
        assert!(!dot.intersects(&seg(0.0, 1.0, 10.0, 1.0)));
    }
}
