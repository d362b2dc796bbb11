//! AVX kernels for `f64`.
//!
//! This module is only compiled when `build.rs` found the `avx` target feature enabled for the
//! whole build, so the intrinsics below are always available on the executing CPU.
//!
//! 2-element vectors live in an `__m128d`. 3- and 4-element vectors live in an `__m256d`; the
//! 3-element variant is loaded and stored through a lane mask, so its fourth lane is zero after a
//! load and is never written back.
//!
//! No fused multiply-add is used anywhere, and horizontal sums add lanes left to right, so the
//! results match the portable kernels in [`generic`][crate::generic] bit for bit as long as no
//! NaN payloads or signed zeros are involved.

// Depending on the compiler version, some of these intrinsics are safe to call when the target
// feature is statically enabled.
#![allow(unused_unsafe)]

use std::arch::x86_64::*;

use crate::kernels::{Algebra, Cross, Lanes};

mod lanes;
mod matrix;

/// A SIMD register holding `N` lanes of `f64`.
///
/// Comparisons return lane masks with all bits set where the comparison holds.
trait Reg<const N: usize>: Copy {
    fn load(a: [f64; N]) -> Self;
    fn store(self) -> [f64; N];
    fn splat(x: f64) -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    /// Hardware minimum: returns `rhs` if either operand is NaN.
    fn min(self, rhs: Self) -> Self;
    /// Hardware maximum: returns `rhs` if either operand is NaN.
    fn max(self, rhs: Self) -> Self;

    fn and(self, rhs: Self) -> Self;
    /// `!self & rhs`
    fn andnot(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;

    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;

    fn lt(self, rhs: Self) -> Self;
    fn gt(self, rhs: Self) -> Self;
    fn le(self, rhs: Self) -> Self;
    fn ge(self, rhs: Self) -> Self;
    /// Unordered not-equal: also true if either operand is NaN.
    fn ne(self, rhs: Self) -> Self;
    /// True where either operand is NaN.
    fn unord(self, rhs: Self) -> Self;

    /// Picks `a` where `mask` is set and `b` elsewhere.
    fn select(mask: Self, a: Self, b: Self) -> Self;

    /// Adds up the `N` lanes from left to right.
    fn sum(self) -> f64;
}

#[derive(Clone, Copy)]
struct F64x2(__m128d);

#[derive(Clone, Copy)]
struct F64x3(__m256d);

#[derive(Clone, Copy)]
struct F64x4(__m256d);

macro_rules! binary {
    ($($method:ident => $intrinsic:ident),+ $(,)?) => {
        $(
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self(unsafe { $intrinsic(self.0, rhs.0) })
            }
        )+
    };
}

macro_rules! unary {
    ($($method:ident => $intrinsic:ident),+ $(,)?) => {
        $(
            #[inline(always)]
            fn $method(self) -> Self {
                Self(unsafe { $intrinsic(self.0) })
            }
        )+
    };
}

macro_rules! compare {
    ($cmp:ident: $($method:ident => $predicate:ident),+ $(,)?) => {
        $(
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self(unsafe { $cmp::<$predicate>(self.0, rhs.0) })
            }
        )+
    };
}

impl Reg<2> for F64x2 {
    #[inline(always)]
    fn load(a: [f64; 2]) -> Self {
        Self(unsafe { _mm_loadu_pd(a.as_ptr()) })
    }

    #[inline(always)]
    fn store(self) -> [f64; 2] {
        let mut out = [0.0; 2];
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn splat(x: f64) -> Self {
        Self(unsafe { _mm_set1_pd(x) })
    }

    binary! {
        add => _mm_add_pd,
        sub => _mm_sub_pd,
        mul => _mm_mul_pd,
        div => _mm_div_pd,
        min => _mm_min_pd,
        max => _mm_max_pd,
        and => _mm_and_pd,
        andnot => _mm_andnot_pd,
        or => _mm_or_pd,
        xor => _mm_xor_pd,
    }

    unary! {
        floor => _mm_floor_pd,
        ceil => _mm_ceil_pd,
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self(unsafe { _mm_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    compare! {
        _mm_cmp_pd:
        lt => _CMP_LT_OQ,
        gt => _CMP_GT_OQ,
        le => _CMP_LE_OQ,
        ge => _CMP_GE_OQ,
        ne => _CMP_NEQ_UQ,
        unord => _CMP_UNORD_Q,
    }

    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        Self(unsafe { _mm_blendv_pd(b.0, a.0, mask.0) })
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe { _mm_cvtsd_f64(_mm_hadd_pd(self.0, self.0)) }
    }
}

/// The operations that are identical for both `__m256d` based registers.
macro_rules! wide_ops {
    () => {
        #[inline(always)]
        fn splat(x: f64) -> Self {
            Self(unsafe { _mm256_set1_pd(x) })
        }

        binary! {
            add => _mm256_add_pd,
            sub => _mm256_sub_pd,
            mul => _mm256_mul_pd,
            div => _mm256_div_pd,
            min => _mm256_min_pd,
            max => _mm256_max_pd,
            and => _mm256_and_pd,
            andnot => _mm256_andnot_pd,
            or => _mm256_or_pd,
            xor => _mm256_xor_pd,
        }

        unary! {
            floor => _mm256_floor_pd,
            ceil => _mm256_ceil_pd,
        }

        #[inline(always)]
        fn trunc(self) -> Self {
            Self(unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
        }

        compare! {
            _mm256_cmp_pd:
            lt => _CMP_LT_OQ,
            gt => _CMP_GT_OQ,
            le => _CMP_LE_OQ,
            ge => _CMP_GE_OQ,
            ne => _CMP_NEQ_UQ,
            unord => _CMP_UNORD_Q,
        }

        #[inline(always)]
        fn select(mask: Self, a: Self, b: Self) -> Self {
            Self(unsafe { _mm256_blendv_pd(b.0, a.0, mask.0) })
        }
    };
}

/// Lane mask selecting the first three lanes.
#[inline(always)]
fn mask3() -> __m256i {
    unsafe { _mm256_setr_epi64x(-1, -1, -1, 0) }
}

/// `(lane0 + lane1) + lane2`, ignoring lane 3.
#[inline(always)]
fn sum3(v: __m256d) -> __m128d {
    unsafe {
        let lo = _mm256_castpd256_pd128(v);
        let hi = _mm256_extractf128_pd::<1>(v);
        _mm_add_sd(_mm_hadd_pd(lo, lo), hi)
    }
}

impl Reg<3> for F64x3 {
    #[inline(always)]
    fn load(a: [f64; 3]) -> Self {
        // The masked-out lane is not read from memory and is set to zero.
        Self(unsafe { _mm256_maskload_pd(a.as_ptr(), mask3()) })
    }

    #[inline(always)]
    fn store(self) -> [f64; 3] {
        let mut out = [0.0; 3];
        unsafe { _mm256_maskstore_pd(out.as_mut_ptr(), mask3(), self.0) };
        out
    }

    wide_ops!();

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe { _mm_cvtsd_f64(sum3(self.0)) }
    }
}

impl Reg<4> for F64x4 {
    #[inline(always)]
    fn load(a: [f64; 4]) -> Self {
        Self(unsafe { _mm256_loadu_pd(a.as_ptr()) })
    }

    #[inline(always)]
    fn store(self) -> [f64; 4] {
        let mut out = [0.0; 4];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    wide_ops!();

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe {
            let hi = _mm256_extractf128_pd::<1>(self.0);
            _mm_cvtsd_f64(_mm_add_sd(sum3(self.0), _mm_unpackhi_pd(hi, hi)))
        }
    }
}

macro_rules! avx_kernels {
    ($($n:literal => $reg:ty: $transpose:ident, $det:ident, $inverse:ident;)+) => {
        $(
            impl Lanes<$n> for f64 {
                #[inline]
                fn lane_add(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::add::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_sub(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::sub::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_mul(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::mul::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_div(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::div::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_neg(a: [Self; $n]) -> [Self; $n] {
                    lanes::neg::<$reg, $n>(a)
                }

                #[inline]
                fn splat_add(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_add::<$reg, $n>(a, s)
                }

                #[inline]
                fn splat_sub(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_sub::<$reg, $n>(a, s)
                }

                #[inline]
                fn splat_mul(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_mul::<$reg, $n>(a, s)
                }

                #[inline]
                fn splat_div(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_div::<$reg, $n>(a, s)
                }

                #[inline]
                fn splat_rsub(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_rsub::<$reg, $n>(a, s)
                }

                #[inline]
                fn splat_rdiv(a: [Self; $n], s: Self) -> [Self; $n] {
                    lanes::splat_rdiv::<$reg, $n>(a, s)
                }

                #[inline]
                fn lane_abs(a: [Self; $n]) -> [Self; $n] {
                    lanes::abs::<$reg, $n>(a)
                }

                #[inline]
                fn lane_sign(a: [Self; $n]) -> [Self; $n] {
                    lanes::sign::<$reg, $n>(a)
                }

                #[inline]
                fn lane_min(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::min::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_max(a: [Self; $n], b: [Self; $n]) -> [Self; $n] {
                    lanes::max::<$reg, $n>(a, b)
                }

                #[inline]
                fn lane_clamp(u: [Self; $n], lo: [Self; $n], hi: [Self; $n]) -> [Self; $n] {
                    lanes::clamp::<$reg, $n>(u, lo, hi)
                }

                #[inline]
                fn lane_transpose(m: [[Self; $n]; $n]) -> [[Self; $n]; $n] {
                    matrix::$transpose(m)
                }
            }

            impl Algebra<$n> for f64 {
                #[inline]
                fn lane_round(a: [Self; $n]) -> [Self; $n] {
                    lanes::round::<$reg, $n>(a)
                }

                #[inline]
                fn lane_floor(a: [Self; $n]) -> [Self; $n] {
                    lanes::floor::<$reg, $n>(a)
                }

                #[inline]
                fn lane_ceil(a: [Self; $n]) -> [Self; $n] {
                    lanes::ceil::<$reg, $n>(a)
                }

                #[inline]
                fn lane_mod(u: [Self; $n], v: [Self; $n]) -> [Self; $n] {
                    lanes::modulo::<$reg, $n>(u, v)
                }

                #[inline]
                fn lane_dirac(e: [Self; $n], u: [Self; $n]) -> [Self; $n] {
                    lanes::dirac::<$reg, $n>(e, u)
                }

                #[inline]
                fn lane_step(edge: [Self; $n], u: [Self; $n]) -> [Self; $n] {
                    lanes::step::<$reg, $n>(edge, u)
                }

                #[inline]
                fn lane_smoothstep(lo: [Self; $n], hi: [Self; $n], u: [Self; $n]) -> [Self; $n] {
                    lanes::smoothstep::<$reg, $n>(lo, hi, u)
                }

                #[inline]
                fn lane_lerp(lo: [Self; $n], hi: [Self; $n], u: [Self; $n]) -> [Self; $n] {
                    lanes::lerp::<$reg, $n>(lo, hi, u)
                }

                #[inline]
                fn lane_radians(a: [Self; $n]) -> [Self; $n] {
                    lanes::radians::<$reg, $n>(a)
                }

                #[inline]
                fn lane_degrees(a: [Self; $n]) -> [Self; $n] {
                    lanes::degrees::<$reg, $n>(a)
                }

                #[inline]
                fn lane_dot(a: [Self; $n], b: [Self; $n]) -> Self {
                    lanes::dot::<$reg, $n>(a, b)
                }

                #[inline]
                fn mat_vec(m: [[Self; $n]; $n], v: [Self; $n]) -> [Self; $n] {
                    matrix::mat_vec::<$reg, $n>(m, v)
                }

                #[inline]
                fn mat_mat(a: [[Self; $n]; $n], b: [[Self; $n]; $n]) -> [[Self; $n]; $n] {
                    matrix::mat_mat::<$reg, $n>(a, b)
                }

                #[inline]
                fn mat_det(m: [[Self; $n]; $n]) -> Self {
                    matrix::$det(m)
                }

                #[inline]
                fn mat_inverse(m: [[Self; $n]; $n]) -> [[Self; $n]; $n] {
                    matrix::$inverse(m)
                }
            }
        )+
    };
}

avx_kernels! {
    2 => F64x2: transpose2, determinant2, inverse2;
    3 => F64x3: transpose3, determinant3, inverse3;
    4 => F64x4: transpose4, determinant4, inverse4;
}

impl Cross for f64 {
    #[inline]
    fn lane_cross(a: [Self; 3], b: [Self; 3]) -> [Self; 3] {
        matrix::cross(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_lane() {
        let v = F64x3::load([1.0, 2.0, 3.0]);
        assert_eq!(v.sum(), 6.0);
        // The hidden lane computes 0/0 here, which must not leak into the sum.
        let q = v.div(F64x3::load([1.0; 3]));
        assert_eq!(q.sum(), 6.0);
        assert_eq!(q.store(), [1.0, 2.0, 3.0]);
        let nan = F64x3::splat(0.0).div(F64x3::splat(0.0));
        assert!(nan.store().iter().all(|x| x.is_nan()));
        assert_eq!(F64x3::load([1.0, 1.0, 1.0]).mul(F64x3::splat(2.0)).sum(), 6.0);
    }

    #[test]
    fn sums() {
        assert_eq!(F64x2::load([1.0, 2.0]).sum(), 3.0);
        assert_eq!(F64x4::load([1.0, 2.0, 3.0, 4.0]).sum(), 10.0);
        // Left to right: `((1e16 + 1) + -1e16) + 1 == 1`.
        assert_eq!(F64x4::load([1e16, 1.0, -1e16, 1.0]).sum(), 1.0);
    }

    #[test]
    fn select() {
        let a = F64x4::load([1.0, 2.0, 3.0, 4.0]);
        let b = F64x4::splat(2.5);
        let picked = F64x4::select(a.lt(b), a, b);
        assert_eq!(picked.store(), [1.0, 2.0, 2.5, 2.5]);
    }
}
