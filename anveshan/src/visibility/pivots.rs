//! Pivot generation: offset waypoints around polyline vertices.
//!
//! Pivots keep path waypoints off exact vertices, where sight lines would
//! graze the wall they turn around.

use crate::core::{Polyline, WorldPoint};

/// Bisector length below which the angle at a vertex is treated as straight.
const STRAIGHT_EPS: f32 = 1e-6;

/// Two pivots on the bisector line of angle `a-b-c`, one on each side of `b`.
///
/// For a straight angle the bisector is the perpendicular at `b`.
pub fn vertex_pivots(a: WorldPoint, b: WorldPoint, c: WorldPoint, offset: f32) -> [WorldPoint; 2] {
    let to_a = (a - b).normalize();
    let to_c = (c - b).normalize();
    let mut bisector = to_a + to_c;
    if bisector.length() < STRAIGHT_EPS {
        bisector = to_a.perpendicular();
    }
    let step = bisector.normalize() * offset;
    [b + step, b - step]
}

/// Two pivots beyond the free end `end` of an open chain whose next vertex is `inner`.
///
/// Both sit `offset` past the end along the terminal segment and `offset`
/// to either side of it, so sight lines can wrap around the free end.
pub fn end_pivots(end: WorldPoint, inner: WorldPoint, offset: f32) -> [WorldPoint; 2] {
    let dir = (end - inner).normalize();
    let base = end + dir * offset;
    let side = dir.perpendicular() * offset;
    [base + side, base - side]
}

/// Four axis-aligned pivots around an isolated point.
pub fn point_pivots(p: WorldPoint, offset: f32) -> [WorldPoint; 4] {
    [
        WorldPoint::new(p.x + offset, p.y),
        WorldPoint::new(p.x, p.y + offset),
        WorldPoint::new(p.x - offset, p.y),
        WorldPoint::new(p.x, p.y - offset),
    ]
}

/// Every pivot of a polyline, both sides kept.
///
/// - single point: 4 axis pivots
/// - closed loop: 2 per vertex, the start vertex using the last and second points
/// - open chain: 2 per interior vertex plus 2 beyond each free end
pub fn polyline_pivots(polyline: &Polyline, offset: f32) -> Vec<WorldPoint> {
    let v = polyline.vertices();
    let n = v.len();
    let mut out = Vec::with_capacity(2 * n + 4);

    match n {
        0 => {}
        1 => out.extend(point_pivots(v[0], offset)),
        _ if polyline.is_closed() && n >= 3 => {
            for i in 0..n {
                let a = v[(i + n - 1) % n];
                let c = v[(i + 1) % n];
                out.extend(vertex_pivots(a, v[i], c, offset));
            }
        }
        _ => {
            for i in 1..n - 1 {
                out.extend(vertex_pivots(v[i - 1], v[i], v[i + 1], offset));
            }
            out.extend(end_pivots(v[0], v[1], offset));
            out.extend(end_pivots(v[n - 1], v[n - 2], offset));
        }
    }
    out
}
