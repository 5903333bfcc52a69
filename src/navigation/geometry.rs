// src/navigation/geometry.rs
// Planar geometry used by the control law: yaw extraction, angle wrapping and
// bearings between points.

use nalgebra::{Point2, Quaternion};

/// Extract the yaw (rotation about the vertical axis) of an orientation.
///
/// Pitch and roll are ignored. The quaternion is expected to be unit-norm and
/// is not re-normalized here, so a non-unit input gives a meaningless yaw.
/// The result lies in (-π, π].
pub fn yaw_from_quaternion(q: &Quaternion<f64>) -> f64 {
    let siny_cosp = 2.0 * (q.w * q.k + q.i * q.j);
    let cosy_cosp = 1.0 - 2.0 * (q.j * q.j + q.k * q.k);
    siny_cosp.atan2(cosy_cosp)
}

/// Wrap an angle into (-π, π] so that it describes the shortest turn.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Bearing of `to` as seen from `from`, in the world frame
pub fn heading_to(from: &Point2<f64>, to: &Point2<f64>) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
