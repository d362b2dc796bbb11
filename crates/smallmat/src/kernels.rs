//! Per-element-type kernel selection.
//!
//! The traits in here are public but unreachable from outside the crate, so downstream code can
//! name them only through [`Float`][crate::Float] and cannot implement them. Every method defaults
//! to the matching function in [`generic`]; the AVX module overrides them for `f64`.

use std::ops::Neg;

use crate::{generic, MinMax, Number, Real, Sign};

/// Element-wise arithmetic on `N` lanes.
pub trait Lanes<const N: usize>: Number + MinMax + Sign {
    #[inline]
    fn lane_add(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::add(a, b)
    }

    #[inline]
    fn lane_sub(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::sub(a, b)
    }

    #[inline]
    fn lane_mul(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::mul(a, b)
    }

    #[inline]
    fn lane_div(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::div(a, b)
    }

    #[inline]
    fn lane_neg(a: [Self; N]) -> [Self; N]
    where
        Self: Neg<Output = Self>,
    {
        generic::neg(a)
    }

    #[inline]
    fn splat_add(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_add(a, s)
    }

    #[inline]
    fn splat_sub(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_sub(a, s)
    }

    #[inline]
    fn splat_mul(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_mul(a, s)
    }

    #[inline]
    fn splat_div(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_div(a, s)
    }

    #[inline]
    fn splat_rsub(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_rsub(a, s)
    }

    #[inline]
    fn splat_rdiv(a: [Self; N], s: Self) -> [Self; N] {
        generic::splat_rdiv(a, s)
    }

    #[inline]
    fn lane_abs(a: [Self; N]) -> [Self; N] {
        generic::abs(a)
    }

    #[inline]
    fn lane_sign(a: [Self; N]) -> [Self; N] {
        generic::sign(a)
    }

    #[inline]
    fn lane_min(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::min(a, b)
    }

    #[inline]
    fn lane_max(a: [Self; N], b: [Self; N]) -> [Self; N] {
        generic::max(a, b)
    }

    #[inline]
    fn lane_clamp(u: [Self; N], lo: [Self; N], hi: [Self; N]) -> [Self; N] {
        generic::clamp(u, lo, hi)
    }

    #[inline]
    fn lane_transpose(m: [[Self; N]; N]) -> [[Self; N]; N] {
        generic::transpose(m)
    }
}

/// Floating-point element-wise functions and the `N`-dimensional algebra.
///
/// `mat_det` and `mat_inverse` have no default since the closed-form expansion differs per `N`.
pub trait Algebra<const N: usize>: Lanes<N> + Real {
    #[inline]
    fn lane_round(a: [Self; N]) -> [Self; N] {
        generic::round(a)
    }

    #[inline]
    fn lane_floor(a: [Self; N]) -> [Self; N] {
        generic::floor(a)
    }

    #[inline]
    fn lane_ceil(a: [Self; N]) -> [Self; N] {
        generic::ceil(a)
    }

    #[inline]
    fn lane_mod(u: [Self; N], v: [Self; N]) -> [Self; N] {
        generic::modulo(u, v)
    }

    #[inline]
    fn lane_dirac(e: [Self; N], u: [Self; N]) -> [Self; N] {
        generic::dirac(e, u)
    }

    #[inline]
    fn lane_step(edge: [Self; N], u: [Self; N]) -> [Self; N] {
        generic::step(edge, u)
    }

    #[inline]
    fn lane_smoothstep(lo: [Self; N], hi: [Self; N], u: [Self; N]) -> [Self; N] {
        generic::smoothstep(lo, hi, u)
    }

    #[inline]
    fn lane_lerp(lo: [Self; N], hi: [Self; N], u: [Self; N]) -> [Self; N] {
        generic::lerp(lo, hi, u)
    }

    #[inline]
    fn lane_radians(a: [Self; N]) -> [Self; N] {
        generic::radians(a)
    }

    #[inline]
    fn lane_degrees(a: [Self; N]) -> [Self; N] {
        generic::degrees(a)
    }

    #[inline]
    fn lane_dot(a: [Self; N], b: [Self; N]) -> Self {
        generic::dot(a, b)
    }

    #[inline]
    fn mat_vec(m: [[Self; N]; N], v: [Self; N]) -> [Self; N] {
        generic::mat_vec(m, v)
    }

    #[inline]
    fn mat_mat(a: [[Self; N]; N], b: [[Self; N]; N]) -> [[Self; N]; N] {
        generic::mat_mat(a, b)
    }

    fn mat_det(m: [[Self; N]; N]) -> Self;

    fn mat_inverse(m: [[Self; N]; N]) -> [[Self; N]; N];
}

/// The 3-dimensional cross product.
pub trait Cross: Number {
    #[inline]
    fn lane_cross(a: [Self; 3], b: [Self; 3]) -> [Self; 3] {
        generic::cross(a, b)
    }
}

macro_rules! portable_lanes {
    ($($types:ty),+) => {
        $(
            impl Lanes<2> for $types {}
            impl Lanes<3> for $types {}
            impl Lanes<4> for $types {}
        )+
    };
}
portable_lanes!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32);
#[cfg(not(avx_kernels))]
portable_lanes!(f64);

macro_rules! portable_algebra {
    ($($types:ty),+) => {
        $(
            impl Algebra<2> for $types {
                #[inline]
                fn mat_det(m: [[Self; 2]; 2]) -> Self {
                    generic::determinant2(m)
                }

                #[inline]
                fn mat_inverse(m: [[Self; 2]; 2]) -> [[Self; 2]; 2] {
                    generic::inverse2(m)
                }
            }

            impl Algebra<3> for $types {
                #[inline]
                fn mat_det(m: [[Self; 3]; 3]) -> Self {
                    generic::determinant3(m)
                }

                #[inline]
                fn mat_inverse(m: [[Self; 3]; 3]) -> [[Self; 3]; 3] {
                    generic::inverse3(m)
                }
            }

            impl Algebra<4> for $types {
                #[inline]
                fn mat_det(m: [[Self; 4]; 4]) -> Self {
                    generic::determinant4(m)
                }

                #[inline]
                fn mat_inverse(m: [[Self; 4]; 4]) -> [[Self; 4]; 4] {
                    generic::inverse4(m)
                }
            }

            impl Cross for $types {}
        )+
    };
}
portable_algebra!(f32);
#[cfg(not(avx_kernels))]
portable_algebra!(f64);
