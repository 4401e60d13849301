use nalgebra::{Unit, Vector3};

use super::constants::VECTOR_EPSILON;

/// Sign of `x` with `signum0(0.0) == 0.0`. `f64::signum` returns 1.0 for +0.0, which
/// makes quadratic drag push a resting axis back and forth.
#[inline]
pub fn signum0(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Wraps an angle in degrees into `[-180, 180)`.
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Angle in radians between two vectors, `None` when either is (near) zero length.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    let na = a.norm();
    let nb = b.norm();
    if na < VECTOR_EPSILON || nb < VECTOR_EPSILON {
        return None;
    }
    let cos = (a.dot(b) / (na * nb)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Unit rotation axis through `a × b`, `None` when the vectors are parallel or zero.
pub fn rotation_axis(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new(a.cross(b), VECTOR_EPSILON)
}

/// Rescales `v` so its magnitude does not exceed `max`, keeping its direction.
/// Returns whether the vector was clamped.
pub fn clamp_magnitude(v: &mut Vector3<f64>, max: f64) -> bool {
    let norm = v.norm();
    if norm > max && norm > 0.0 {
        *v *= max / norm;
        true
    } else {
        false
    }
}

/// Horizontal (x/z) speed of a velocity in the Y-up world frame.
#[inline]
pub fn horizontal_speed(v: &Vector3<f64>) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}
