//! Mathematical utilities for angles.
//!
//! All angles are in radians, measured from +X toward +Y.

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Slack applied to sector boundaries so cells lying exactly on an edge
/// are not lost to rounding.
const SECTOR_SLACK: f32 = 1e-5;

/// Normalize angle to [-π, π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Normalize angle to [0, 2π).
#[inline]
pub fn normalize_angle_positive(angle: f32) -> f32 {
    let a = angle.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly TWO_PI for tiny negative inputs
    if a >= TWO_PI { 0.0 } else { a }
}

/// Signed shortest angular difference from `from` to `to`, in [-π, π).
///
/// Positive result means rotating with increasing angle.
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Check if two angles are approximately equal (within tolerance).
#[inline]
pub fn angles_approx_equal(a: f32, b: f32, tolerance: f32) -> bool {
    angle_diff(a, b).abs() <= tolerance
}

/// Whether `angle` lies in the sector `[heading - half_span, heading + half_span]`.
///
/// Both the sector start and the tested angle are mapped into [0, 2π). When
/// the sector end would wrap past 2π the tested angle is also tried one turn
/// up, so a sector straddling 0° behaves like any other.
pub fn angle_in_sector(angle: f32, heading: f32, half_span: f32) -> bool {
    if half_span >= PI {
        return true;
    }
    let start = normalize_angle_positive(heading - half_span);
    let end = start + 2.0 * half_span;
    let a = normalize_angle_positive(angle);
    let within = |x: f32| x >= start - SECTOR_SLACK && x <= end + SECTOR_SLACK;
    within(a) || within(a + TWO_PI)
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}
