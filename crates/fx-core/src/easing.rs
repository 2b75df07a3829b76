//! Exponential smoothing toward a moving target.

use crate::constants::SNAP_EPSILON;
use glam::Vec2;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn snap_to_zero(v: f32) -> f32 {
    if v.abs() < SNAP_EPSILON {
        0.0
    } else {
        v
    }
}

/// One smoothing step: each axis moves `factor` of the remaining distance,
/// and values that end up within [`SNAP_EPSILON`] of zero are pinned to zero
/// so a released element actually comes to rest.
#[inline]
pub fn ease_toward(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        snap_to_zero(lerp(current.x, target.x, factor)),
        snap_to_zero(lerp(current.y, target.y, factor)),
    )
}
