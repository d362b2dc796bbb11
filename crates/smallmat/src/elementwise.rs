//! Element-wise functions.
//!
//! Every function here is defined on floating-point scalars first. Vectors apply the scalar
//! definition to each element independently, so `f(v)[i] == f(v[i])` for every function `f`:
//!
//! ```
//! # use smallmat::*;
//! use smallmat::elementwise::{round, smoothstep};
//!
//! let v = vec3(-1.5, 0.25, 2.5);
//! assert_eq!(round(v), vec3(round(-1.5), round(0.25), round(2.5)));
//!
//! let (lo, hi) = (Vec3d::ZERO, Vec3d::ONE);
//! assert_eq!(smoothstep(lo, hi, v)[1], smoothstep(0.0, 1.0, 0.25));
//! ```
//!
//! [`abs`], [`sign`], [`min`], [`max`] and [`clamp`] are also available for integers and integer
//! vectors. Unsigned values are their own absolute value, and their sign is `0` or `1`.

use crate::{
    fuzzy::iseq,
    kernels::{Algebra, Lanes},
    MinMax, Real, Sign, Vector,
};

/// Element-wise rounding, stepping and interpolation.
///
/// Implemented for [`f32`], [`f64`], and [`Vector`]s of them.
pub trait Elementwise: Sized {
    /// Rounds to the nearest integer, with ties rounded away from zero.
    fn round(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;

    /// Floored modulo: `self - v * floor(self / v)`.
    ///
    /// The result has the sign of `v`. If `v` is [fuzzy-equal][iseq] to zero, `self` is returned
    /// unchanged.
    fn modulo(self, v: Self) -> Self;

    /// A box approximation of the Dirac delta of width `e`.
    ///
    /// Returns `1 / e` if `e > 0` and `|u| < e`, and `0` otherwise.
    fn dirac(e: Self, u: Self) -> Self;

    /// Returns `0` if `u < edge`, and `1` otherwise.
    fn step(edge: Self, u: Self) -> Self;

    /// Cubic Hermite interpolation: `x * x * (3 - 2 * x)` with `x = (u - lo) / (hi - lo)` clamped
    /// to `[0, 1]`.
    fn smoothstep(lo: Self, hi: Self, u: Self) -> Self;

    /// Linear interpolation: `lo * (1 - u) + hi * u`.
    ///
    /// `u` is not clamped, so values outside of `[0, 1]` extrapolate.
    fn lerp(lo: Self, hi: Self, u: Self) -> Self;

    /// Converts degrees to radians.
    fn radians(self) -> Self;
    /// Converts radians to degrees.
    fn degrees(self) -> Self;
}

macro_rules! scalar_elementwise {
    ($($types:ident),+) => {
        $(
            impl Elementwise for $types {
                #[inline]
                fn round(self) -> Self {
                    $types::round(self)
                }

                #[inline]
                fn floor(self) -> Self {
                    $types::floor(self)
                }

                #[inline]
                fn ceil(self) -> Self {
                    $types::ceil(self)
                }

                fn modulo(self, v: Self) -> Self {
                    if iseq(v, 0.0) {
                        self
                    } else {
                        self - v * $types::floor(self / v)
                    }
                }

                fn dirac(e: Self, u: Self) -> Self {
                    if e > 0.0 && $types::abs(u) < e {
                        1.0 / e
                    } else {
                        0.0
                    }
                }

                fn step(edge: Self, u: Self) -> Self {
                    if u < edge {
                        0.0
                    } else {
                        1.0
                    }
                }

                fn smoothstep(lo: Self, hi: Self, u: Self) -> Self {
                    let x = MinMax::clamp((u - lo) / (hi - lo), 0.0, 1.0);
                    x * x * (3.0 - 2.0 * x)
                }

                #[inline]
                fn lerp(lo: Self, hi: Self, u: Self) -> Self {
                    lo * (1.0 - u) + hi * u
                }

                #[inline]
                fn radians(self) -> Self {
                    self * <$types as Real>::DEG_TO_RAD
                }

                #[inline]
                fn degrees(self) -> Self {
                    self * <$types as Real>::RAD_TO_DEG
                }
            }
        )+
    };
}
scalar_elementwise!(f32, f64);

impl<T: Algebra<N>, const N: usize> Elementwise for Vector<T, N> {
    #[inline]
    fn round(self) -> Self {
        T::lane_round(self.into_array()).into()
    }

    #[inline]
    fn floor(self) -> Self {
        T::lane_floor(self.into_array()).into()
    }

    #[inline]
    fn ceil(self) -> Self {
        T::lane_ceil(self.into_array()).into()
    }

    #[inline]
    fn modulo(self, v: Self) -> Self {
        T::lane_mod(self.into_array(), v.into_array()).into()
    }

    #[inline]
    fn dirac(e: Self, u: Self) -> Self {
        T::lane_dirac(e.into_array(), u.into_array()).into()
    }

    #[inline]
    fn step(edge: Self, u: Self) -> Self {
        T::lane_step(edge.into_array(), u.into_array()).into()
    }

    #[inline]
    fn smoothstep(lo: Self, hi: Self, u: Self) -> Self {
        T::lane_smoothstep(lo.into_array(), hi.into_array(), u.into_array()).into()
    }

    #[inline]
    fn lerp(lo: Self, hi: Self, u: Self) -> Self {
        T::lane_lerp(lo.into_array(), hi.into_array(), u.into_array()).into()
    }

    #[inline]
    fn radians(self) -> Self {
        T::lane_radians(self.into_array()).into()
    }

    #[inline]
    fn degrees(self) -> Self {
        T::lane_degrees(self.into_array()).into()
    }
}

impl<T: Lanes<N>, const N: usize> Sign for Vector<T, N> {
    #[inline]
    fn abs(self) -> Self {
        T::lane_abs(self.into_array()).into()
    }

    #[inline]
    fn sign(self) -> Self {
        T::lane_sign(self.into_array()).into()
    }
}

impl<T: Lanes<N>, const N: usize> MinMax for Vector<T, N> {
    /// Element-wise minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let a = vec3(-1.0, 2.0, f64::NAN);
    /// let b = vec3(3.0, f64::NEG_INFINITY, 0.0);
    /// assert_eq!(a.min(b), vec3(-1.0, f64::NEG_INFINITY, 0.0));
    /// ```
    #[inline]
    fn min(self, other: Self) -> Self {
        T::lane_min(self.into_array(), other.into_array()).into()
    }

    /// Element-wise maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let a = vec3(-1, 2, 7);
    /// let b = vec3(3, -4, 0);
    /// assert_eq!(a.max(b), vec3(3, 2, 7));
    /// ```
    #[inline]
    fn max(self, other: Self) -> Self {
        T::lane_max(self.into_array(), other.into_array()).into()
    }

    #[inline]
    fn clamp(self, min: Self, max: Self) -> Self {
        T::lane_clamp(self.into_array(), min.into_array(), max.into_array()).into()
    }
}

/// Rounds `u` (element-wise) to the nearest integer, with ties rounded away from zero.
pub fn round<T: Elementwise>(u: T) -> T {
    u.round()
}

pub fn floor<T: Elementwise>(u: T) -> T {
    u.floor()
}

pub fn ceil<T: Elementwise>(u: T) -> T {
    u.ceil()
}

/// Floored modulo of `u` by `v`; see [`Elementwise::modulo`].
///
/// # Examples
///
/// ```
/// use smallmat::elementwise::modulo;
///
/// assert_eq!(modulo(7.0, 3.0), 1.0);
/// assert_eq!(modulo(-7.0, 3.0), 2.0);
/// assert_eq!(modulo(7.0, -3.0), -2.0);
/// assert_eq!(modulo(7.0, 0.0), 7.0);
/// ```
pub fn modulo<T: Elementwise>(u: T, v: T) -> T {
    u.modulo(v)
}

/// See [`Elementwise::dirac`].
///
/// # Examples
///
/// ```
/// use smallmat::elementwise::dirac;
///
/// assert_eq!(dirac(0.5, 0.25), 2.0);
/// assert_eq!(dirac(0.5, 0.5), 0.0);
/// assert_eq!(dirac(-0.5, 0.0), 0.0);
/// ```
pub fn dirac<T: Elementwise>(e: T, u: T) -> T {
    T::dirac(e, u)
}

pub fn step<T: Elementwise>(edge: T, u: T) -> T {
    T::step(edge, u)
}

/// See [`Elementwise::smoothstep`].
///
/// # Examples
///
/// ```
/// use smallmat::elementwise::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
/// assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smoothstep(0.0, 2.0, 9.0), 1.0);
/// ```
pub fn smoothstep<T: Elementwise>(lo: T, hi: T, u: T) -> T {
    T::smoothstep(lo, hi, u)
}

/// See [`Elementwise::lerp`].
///
/// # Examples
///
/// ```
/// use smallmat::elementwise::lerp;
///
/// assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
/// assert_eq!(lerp(2.0, 4.0, 2.0), 6.0);
/// ```
pub fn lerp<T: Elementwise>(lo: T, hi: T, u: T) -> T {
    T::lerp(lo, hi, u)
}

pub fn radians<T: Elementwise>(u: T) -> T {
    u.radians()
}

pub fn degrees<T: Elementwise>(u: T) -> T {
    u.degrees()
}

pub fn abs<T: Sign>(u: T) -> T {
    u.abs()
}

/// Returns `1`, `-1` or `0` (element-wise) depending on the sign of `u`.
pub fn sign<T: Sign>(u: T) -> T {
    u.sign()
}

pub fn min<T: MinMax>(a: T, b: T) -> T {
    a.min(b)
}

pub fn max<T: MinMax>(a: T, b: T) -> T {
    a.max(b)
}

/// Restricts `u` (element-wise) to `[lo, hi]`, as `min(max(u, lo), hi)`.
pub fn clamp<T: MinMax>(u: T, lo: T, hi: T) -> T {
    u.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{vec2, vec3, vec4, Vec3f};

    use super::*;

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round(0.5), 1.0);
        assert_eq!(round(-0.5), -1.0);
        assert_eq!(round(2.5f32), 3.0);
        assert_eq!(round(-2.5f32), -3.0);
        assert_eq!(round(vec4(1.5, -1.5, 0.49, -0.49)), vec4(2.0, -2.0, 0.0, -0.0));
    }

    #[test]
    fn floor_ceil() {
        assert_eq!(floor(vec3(1.5, -1.5, 2.0)), vec3(1.0, -2.0, 2.0));
        assert_eq!(ceil(vec3(1.5, -1.5, 2.0)), vec3(2.0, -1.0, 2.0));
    }

    #[test]
    fn modulo_sign_of_divisor() {
        assert_eq!(
            modulo(vec3(7.0, -7.0, 7.0), vec3(3.0, 3.0, -3.0)),
            vec3(1.0, 2.0, -2.0)
        );
        // Divisors fuzzy-equal to zero leave `u` unchanged.
        assert_eq!(modulo(5.0f32, 1e-5), 5.0);
        assert_eq!(modulo(vec2(5.0, 5.0), vec2(0.0, 2.0)), vec2(5.0, 1.0));
    }

    #[test]
    fn dirac_box() {
        let e = vec3(0.5, 0.5, -1.0);
        let u = vec3(0.0, 0.75, 0.0);
        assert_eq!(dirac(e, u), vec3(2.0, 0.0, 0.0));
        assert_eq!(dirac(0.0, 0.0), 0.0);
    }

    #[test]
    fn step_edge() {
        assert_eq!(step(Vec3f::splat(1.0), vec3(0.0, 1.0, 2.0)), vec3(0.0, 1.0, 1.0));
    }

    #[test]
    fn smoothstep_hermite() {
        let lo = Vector::splat(0.0);
        let hi = Vector::splat(4.0);
        let u = vec4(-1.0, 1.0, 3.0, 5.0);
        // x = 0.25 -> 0.15625, x = 0.75 -> 0.84375
        assert_eq!(smoothstep(lo, hi, u), vec4(0.0, 0.15625, 0.84375, 1.0));
    }

    #[test]
    fn lerp_extrapolates() {
        let lo = vec2(0.0, 10.0);
        let hi = vec2(10.0, 20.0);
        assert_eq!(lerp(lo, hi, Vector::splat(0.5)), vec2(5.0, 15.0));
        assert_eq!(lerp(lo, hi, Vector::splat(-1.0)), vec2(-10.0, 0.0));
    }

    #[test]
    fn angles() {
        assert_relative_eq!(radians(180.0), std::f64::consts::PI);
        let d = degrees(vec2(std::f64::consts::PI, 0.0));
        assert_relative_eq!(d[0], 180.0);
        assert_eq!(d[1], 0.0);
    }

    #[test]
    fn integer_vectors() {
        let v = vec3(-3, 0, 5);
        assert_eq!(abs(v), vec3(3, 0, 5));
        assert_eq!(sign(v), vec3(-1, 0, 1));
        assert_eq!(min(v, Vector::splat(1)), vec3(-3, 0, 1));
        assert_eq!(max(v, Vector::splat(1)), vec3(1, 1, 5));
        assert_eq!(clamp(v, Vector::splat(-1), Vector::splat(2)), vec3(-1, 0, 2));
    }

    #[test]
    fn sign_of_zero_and_nan() {
        assert_eq!(sign(vec4(-0.0, 0.0, f64::NAN, -2.0)), vec4(0.0, 0.0, 0.0, -1.0));
    }
}
