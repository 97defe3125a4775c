//! Collinear-run simplification for traced contours.

use crate::core::{WorldPoint, angle_diff};

/// Drop interior points where the direction changes by less than `epsilon` radians.
///
/// The incoming direction is measured from the last *kept* point, so a long
/// straight run collapses to its two ends. First and last points are always
/// kept (a closed polyline stays closed). Consecutive duplicates are dropped.
pub fn simplify_collinear(points: &[WorldPoint], epsilon: f32) -> Vec<WorldPoint> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = vec![first];
    for w in points[1..].windows(2) {
        let (cur, next) = (w[0], w[1]);
        let prev = out[out.len() - 1];
        if cur == prev || cur == next {
            continue;
        }
        let incoming = prev.angle_to(&cur);
        let outgoing = cur.angle_to(&next);
        if angle_diff(incoming, outgoing).abs() >= epsilon {
            out.push(cur);
        }
    }
    out.push(last);
    out
}
