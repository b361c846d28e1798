//! Primitive operations on 3-component vectors.
//!
//! These work on any [`mint::Vector3`][`mint::Vector3`] whose components implement
//! [`Float`][`Float`], so they can be used with the vector types of most maths
//! libraries.
//!
//! [`mint::Vector3`]: https://docs.rs/mint/0.5/mint/struct.Vector3.html
//! [`Float`]: https://docs.rs/num-traits/0.2/num_traits/float/trait.Float.html

use mint::Vector3;
use num_traits::{one, zero, Float};

/// Returns the euclidean length of `v`.
///
/// # Example
///
/// ```
/// # use arcball::vector;
/// let v: mint::Vector3<f32> = [3.0, 4.0, 0.0].into();
/// assert_eq!(vector::length(v), 5.0);
/// ```
#[inline]
pub fn length<T: Float>(v: Vector3<T>) -> T {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

/// Returns the dot product of `a` and `b`.
#[inline]
pub fn dot<T: Float>(a: Vector3<T>, b: Vector3<T>) -> T {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Returns the cross product `a × b`.
///
/// # Example
///
/// ```
/// # use arcball::vector;
/// let x: mint::Vector3<f32> = [1.0, 0.0, 0.0].into();
/// let y: mint::Vector3<f32> = [0.0, 1.0, 0.0].into();
/// let z: mint::Vector3<f32> = [0.0, 0.0, 1.0].into();
/// assert_eq!(vector::cross(x, y), z);
/// ```
#[inline]
pub fn cross<T: Float>(a: Vector3<T>, b: Vector3<T>) -> Vector3<T> {
    Vector3 {
        x: a.y * b.z - b.y * a.z,
        y: b.x * a.z - a.x * b.z,
        z: a.x * b.y - b.x * a.y,
    }
}

/// Scales `v` so that the sum of the absolute values of its components is `1`.
///
/// # Notes
///
/// This is an L1 normalisation: the result points in the same direction as `v`,
/// but is generally *not* of unit euclidean length.
///
/// The zero vector has no direction, so every component of the result is NaN.
/// Use [`is_degenerate`][`is_degenerate`] to detect this.
///
/// # Example
///
/// ```
/// # use arcball::vector;
/// let v: mint::Vector3<f32> = [2.0, -2.0, 4.0].into();
/// let expected: mint::Vector3<f32> = [0.25, -0.25, 0.5].into();
/// assert_eq!(vector::normalize(v), expected);
/// ```
///
/// [`is_degenerate`]: fn.is_degenerate.html
#[inline]
pub fn normalize<T: Float>(v: Vector3<T>) -> Vector3<T> {
    let total = v.x.abs() + v.y.abs() + v.z.abs();
    Vector3 {
        x: v.x / total,
        y: v.y / total,
        z: v.z / total,
    }
}

/// Returns `true` if `v` cannot be used as a direction: either every component
/// is zero, or any component is NaN.
#[inline]
pub fn is_degenerate<T: Float>(v: Vector3<T>) -> bool {
    let _0 = zero::<T>();
    (v.x == _0 && v.y == _0 && v.z == _0) || v.x.is_nan() || v.y.is_nan() || v.z.is_nan()
}

/// Returns the cosine of the angle between `a` and `b`, clamped to `[-1, 1]`.
///
/// Rounding can push the raw quotient slightly outside of the range for
/// (anti)parallel vectors, which would put it out of the domain of `acos`.
/// A NaN is passed through unchanged, which happens when either vector is
/// of zero length.
#[inline]
pub fn cos_angle<T: Float>(a: Vector3<T>, b: Vector3<T>) -> T {
    let _1 = one::<T>();
    let cos = dot(a, b) / (length(a) * length(b));
    if cos > _1 {
        _1
    } else if cos < -_1 {
        -_1
    } else {
        cos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        [x, y, z].into()
    }

    #[test]
    fn test_cross_is_perpendicular() {
        let a = v(0.125, 0.0, 0.612);
        let b = v(0.0, 0.0625, 0.622);
        let c = cross(a, b);

        assert!(dot(a, c).abs() < 1e-6);
        assert!(dot(b, c).abs() < 1e-6);
    }

    #[test]
    fn test_cross_is_anticommutative() {
        let a = v(1.0, 2.0, 3.0);
        let b = v(-4.0, 0.5, 2.0);
        let ab = cross(a, b);
        let ba = cross(b, a);

        assert_eq!(ab, v(-ba.x, -ba.y, -ba.z));
    }

    #[test]
    fn test_normalize_is_l1() {
        let n = normalize(v(3.0, -1.0, 0.0));
        assert_eq!(n, v(0.75, -0.25, 0.0));
        assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1.0);
        assert!(length(n) < 1.0);
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = normalize(v(0.0, 0.0, 0.0));
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
        assert!(is_degenerate(n));
    }

    #[test]
    fn test_is_degenerate() {
        assert!(is_degenerate(v(0.0, 0.0, 0.0)));
        assert!(is_degenerate(v(1.0, f32::NAN, 0.0)));
        assert!(!is_degenerate(v(0.0, 0.0, 1e-20)));
        assert!(!is_degenerate(v(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_cos_angle_is_clamped() {
        let a = v(0.1, 0.2, 0.3);
        let big = v(1e3, 2e3, 3e3);
        let flipped = v(-0.3, -0.6, -0.9);

        for &(x, y) in &[(a, a), (a, big), (a, flipped), (big, flipped)] {
            let cos = cos_angle(x, y);
            assert!(cos >= -1.0 && cos <= 1.0, "{} out of range", cos);
            assert!(!cos.acos().is_nan());
        }

        assert_eq!(cos_angle(v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)), 0.0);
    }

    #[test]
    fn test_cos_angle_zero_length() {
        assert!(cos_angle(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn test_generic_over_f64() {
        let a: Vector3<f64> = [0.0, 3.0, 4.0].into();
        assert_eq!(length(a), 5.0);
        assert_eq!(dot(a, a), 25.0);
    }
}
