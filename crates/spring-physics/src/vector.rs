//! 2D vector type and the few geometric helpers the sandbox needs
//!
//! `Vector2` is glam's `DVec2`: a `Copy` value type, so every operation
//! already returns a fresh instance. The helpers here always take plain
//! positions; callers extract a body's position first.

use crate::constants::LENGTH_EPSILON;
use glam::DVec2;

pub type Vector2 = DVec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    (b - a).length()
}

/// Unit vector pointing from `from` towards `to`.
///
/// Coincident points have no direction; the zero vector is returned instead
/// of dividing by zero.
#[inline]
pub fn unit_towards(from: Vector2, to: Vector2) -> Vector2 {
    normalized(to - from)
}

/// Normalize, mapping (near) zero-length vectors to zero
#[inline]
pub fn normalized(v: Vector2) -> Vector2 {
    let len = v.length();
    if len <= LENGTH_EPSILON {
        Vector2::ZERO
    } else {
        v / len
    }
}

#[inline]
pub fn midpoint(a: Vector2, b: Vector2) -> Vector2 {
    (a + b) * 0.5
}

/// True when every component is finite
#[inline]
pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_zero_is_zero() {
        assert_eq!(normalized(Vector2::ZERO), Vector2::ZERO);
    }

    #[test]
    fn test_unit_towards() {
        let u = unit_towards(Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
        assert!((u - Vector2::new(0.6, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_unit_towards_coincident() {
        let p = Vector2::new(3.0, -2.0);
        assert_eq!(unit_towards(p, p), Vector2::ZERO);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(6.0, 8.0);
        assert_eq!(distance(a, b), 10.0);
        assert_eq!(midpoint(a, b), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(Vector2::new(1.0, 2.0)));
        assert!(!is_finite(Vector2::new(f64::NAN, 0.0)));
        assert!(!is_finite(Vector2::new(0.0, f64::INFINITY)));
    }
}
