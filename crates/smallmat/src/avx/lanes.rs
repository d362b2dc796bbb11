//! Element-wise kernels, generic over the register width.

use crate::Real;

use super::Reg;

#[inline(always)]
fn map<R: Reg<N>, const N: usize>(a: [f64; N], f: impl FnOnce(R) -> R) -> [f64; N] {
    f(R::load(a)).store()
}

#[inline(always)]
fn zip<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N], f: impl FnOnce(R, R) -> R) -> [f64; N] {
    f(R::load(a), R::load(b)).store()
}

/// `f64::min` semantics: a NaN operand yields the other operand.
#[inline(always)]
fn fmin<R: Reg<N>, const N: usize>(a: R, b: R) -> R {
    R::select(b.unord(b), a, a.min(b))
}

/// `f64::max` semantics: a NaN operand yields the other operand.
#[inline(always)]
fn fmax<R: Reg<N>, const N: usize>(a: R, b: R) -> R {
    R::select(b.unord(b), a, a.max(b))
}

#[inline(always)]
fn fabs<R: Reg<N>, const N: usize>(a: R) -> R {
    R::splat(-0.0).andnot(a)
}

pub(super) fn add<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, R::add)
}

pub(super) fn sub<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, R::sub)
}

pub(super) fn mul<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, R::mul)
}

pub(super) fn div<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, R::div)
}

pub(super) fn neg<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, |a: R| a.xor(R::splat(-0.0)))
}

pub(super) fn splat_add<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| a.add(R::splat(s)))
}

pub(super) fn splat_sub<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| a.sub(R::splat(s)))
}

pub(super) fn splat_mul<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| a.mul(R::splat(s)))
}

pub(super) fn splat_div<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| a.div(R::splat(s)))
}

pub(super) fn splat_rsub<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| R::splat(s).sub(a))
}

pub(super) fn splat_rdiv<R: Reg<N>, const N: usize>(a: [f64; N], s: f64) -> [f64; N] {
    map(a, |a: R| R::splat(s).div(a))
}

pub(super) fn abs<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, fabs::<R, N>)
}

pub(super) fn sign<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, |a: R| {
        let (zero, one) = (R::splat(0.0), R::splat(1.0));
        a.gt(zero).and(one).sub(a.lt(zero).and(one))
    })
}

pub(super) fn min<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, fmin::<R, N>)
}

pub(super) fn max<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    zip(a, b, fmax::<R, N>)
}

pub(super) fn clamp<R: Reg<N>, const N: usize>(u: [f64; N], lo: [f64; N], hi: [f64; N]) -> [f64; N] {
    fmin(fmax(R::load(u), R::load(lo)), R::load(hi)).store()
}

/// Half away from zero, like [`f64::round`].
pub(super) fn round<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, |a: R| {
        let t = a.trunc();
        // `a - t` is exact, so there is no double rounding near `x.5`.
        let frac = fabs(a.sub(t));
        let away = R::splat(-0.0).and(a).or(R::splat(1.0));
        R::select(frac.ge(R::splat(0.5)), t.add(away), t)
    })
}

pub(super) fn floor<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, R::floor)
}

pub(super) fn ceil<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, R::ceil)
}

pub(super) fn modulo<R: Reg<N>, const N: usize>(u: [f64; N], v: [f64; N]) -> [f64; N] {
    zip(u, v, |u: R, v: R| {
        let tol = R::splat(f64::EPSILON.sqrt());
        let wrapped = u.sub(v.mul(u.div(v).floor()));
        R::select(fabs(v).le(tol), u, wrapped)
    })
}

pub(super) fn dirac<R: Reg<N>, const N: usize>(e: [f64; N], u: [f64; N]) -> [f64; N] {
    zip(e, u, |e: R, u: R| {
        let inside = e.gt(R::splat(0.0)).and(fabs(u).lt(e));
        R::splat(1.0).div(e).and(inside)
    })
}

pub(super) fn step<R: Reg<N>, const N: usize>(edge: [f64; N], u: [f64; N]) -> [f64; N] {
    zip(edge, u, |edge: R, u: R| u.lt(edge).andnot(R::splat(1.0)))
}

pub(super) fn smoothstep<R: Reg<N>, const N: usize>(
    lo: [f64; N],
    hi: [f64; N],
    u: [f64; N],
) -> [f64; N] {
    let (lo, hi, u) = (R::load(lo), R::load(hi), R::load(u));
    let x = u.sub(lo).div(hi.sub(lo));
    let x = fmin(fmax(x, R::splat(0.0)), R::splat(1.0));
    x.mul(x).mul(R::splat(3.0).sub(R::splat(2.0).mul(x))).store()
}

pub(super) fn lerp<R: Reg<N>, const N: usize>(lo: [f64; N], hi: [f64; N], u: [f64; N]) -> [f64; N] {
    let (lo, hi, u) = (R::load(lo), R::load(hi), R::load(u));
    lo.mul(R::splat(1.0).sub(u)).add(hi.mul(u)).store()
}

pub(super) fn radians<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, |a: R| a.mul(R::splat(<f64 as Real>::DEG_TO_RAD)))
}

pub(super) fn degrees<R: Reg<N>, const N: usize>(a: [f64; N]) -> [f64; N] {
    map(a, |a: R| a.mul(R::splat(<f64 as Real>::RAD_TO_DEG)))
}

pub(super) fn dot<R: Reg<N>, const N: usize>(a: [f64; N], b: [f64; N]) -> f64 {
    R::load(a).mul(R::load(b)).sum()
}

#[cfg(test)]
mod tests {
    use crate::{avx::F64x4, generic};

    use super::*;

    const SAMPLES: [f64; 4] = [-2.5, 0.49999999999999994, f64::NAN, -0.0];

    #[test]
    fn round_ties() {
        assert_eq!(
            round::<F64x4, 4>([-2.5, 2.5, -0.5, 0.5]),
            [-3.0, 3.0, -1.0, 1.0]
        );
        let big = 4503599627370497.0;
        assert_eq!(
            round::<F64x4, 4>([1.4, -1.6, 1e300, big]),
            [1.0, -2.0, 1e300, big]
        );
        let r = round::<F64x4, 4>(SAMPLES);
        assert_eq!(r[..2], [-3.0, 0.0]);
        assert!(r[2].is_nan());
    }

    #[test]
    fn nan_min_max() {
        let other = [1.0; 4];
        let min = min::<F64x4, 4>(SAMPLES, other);
        assert_eq!(min, [-2.5, 0.49999999999999994, 1.0, -0.0]);
        let max = max::<F64x4, 4>(other, SAMPLES);
        assert_eq!(max, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            clamp::<F64x4, 4>(SAMPLES, [0.0; 4], [1.0; 4]),
            generic::clamp(SAMPLES, [0.0; 4], [1.0; 4])
        );
    }

    #[test]
    fn sign_masks() {
        assert_eq!(sign::<F64x4, 4>(SAMPLES), [-1.0, 1.0, 0.0, 0.0]);
        assert_eq!(step::<F64x4, 4>([0.0; 4], SAMPLES), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(dirac::<F64x4, 4>([1.0; 4], SAMPLES), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn modulo_zero_divisor() {
        let u = [5.5, -5.5, 3.0, 7.0];
        let v = [2.0, 2.0, 1e-9, -3.0];
        assert_eq!(modulo::<F64x4, 4>(u, v), [1.5, 0.5, 3.0, -2.0]);
    }
}
