//! Fuzzy floating-point comparisons.
//!
//! All predicates in this module use a tolerance of `eps = sqrt(T::EPSILON)`, which is much wider
//! than machine epsilon. This keeps chained computations (dot products, determinants, inverses)
//! from producing false negatives due to accumulated rounding error.
//!
//! [`iseq`], [`islt`] and [`isgt`] are *not* complements of each other: there is a band of values
//! around equality for which neither [`islt`] nor [`isgt`] holds, yet [`iseq`] may also be false
//! when the values are large and differ by more than the absolute tolerance.
//!
//! The predicates are bounded by [`Real`], which only floating-point types implement:
//!
//! ```compile_fail
//! # use smallmat::fuzzy::iseq;
//! iseq(1, 1);
//! ```

use std::{fmt, panic::Location};

use crate::{Matrix, MinMax, Real, Sign, Vector};

#[inline]
fn tolerance<T: Real>() -> T {
    T::EPSILON.sqrt()
}

/// Returns whether `u` and `v` are approximately equal.
///
/// This is true iff `|u - v| <= max(eps, eps * min(|u|, |v|))`. Near zero the absolute tolerance
/// `eps` applies, everywhere else it is relative to the smaller magnitude.
///
/// # Examples
///
/// ```
/// # use smallmat::fuzzy::iseq;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_ne!(one, 1.0);
/// assert!(iseq(one, 1.0));
/// assert!(!iseq(1.0, 1.001));
/// ```
pub fn iseq<T: Real>(u: T, v: T) -> bool {
    let eps = tolerance::<T>();
    let (au, av) = (Sign::abs(u), Sign::abs(v));
    Sign::abs(u - v) <= MinMax::max(eps, eps * MinMax::min(au, av))
}

/// Returns whether `u` is less than `v` by more than the fuzzy tolerance.
///
/// This is true iff `(v - u) > eps * max(|u|, |v|)`.
///
/// # Examples
///
/// ```
/// # use smallmat::fuzzy::islt;
/// assert!(islt(1.0, 2.0));
/// assert!(!islt(1.0, 1.0 + 1e-12));
/// ```
pub fn islt<T: Real>(u: T, v: T) -> bool {
    let eps = tolerance::<T>();
    v - u > eps * MinMax::max(Sign::abs(u), Sign::abs(v))
}

/// Returns whether `u` is greater than `v` by more than the fuzzy tolerance.
///
/// This is true iff `(u - v) > eps * max(|u|, |v|)`.
///
/// # Examples
///
/// ```
/// # use smallmat::fuzzy::isgt;
/// assert!(isgt(2.0f32, 1.0));
/// assert!(!isgt(1.0 + 1e-12, 1.0));
/// ```
pub fn isgt<T: Real>(u: T, v: T) -> bool {
    let eps = tolerance::<T>();
    u - v > eps * MinMax::max(Sign::abs(u), Sign::abs(v))
}

/// Types that can be compared with [`iseq`].
///
/// Compound types are considered equal if all of their elements are.
pub trait FuzzyEq {
    fn fuzzy_eq(&self, other: &Self) -> bool;
}

impl FuzzyEq for f32 {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        iseq(*self, *other)
    }
}

impl FuzzyEq for f64 {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        iseq(*self, *other)
    }
}

impl<T: FuzzyEq, const N: usize> FuzzyEq for [T; N] {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.fuzzy_eq(b))
    }
}

impl<T: FuzzyEq, const N: usize> FuzzyEq for Vector<T, N> {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.as_array().fuzzy_eq(other.as_array())
    }
}

impl<T: FuzzyEq, const N: usize> FuzzyEq for Matrix<T, N> {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.as_rows().fuzzy_eq(other.as_rows())
    }
}

#[doc(hidden)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

#[doc(hidden)]
#[track_caller]
pub fn assert_fuzzy<T: FuzzyEq + fmt::Debug>(
    left: &T,
    right: &T,
    kind: AssertionKind,
    msg: Option<fmt::Arguments<'_>>,
) {
    let equal = left.fuzzy_eq(right);
    if (!equal && kind == AssertionKind::Eq) || (equal && kind == AssertionKind::Ne) {
        assert_failed_inner(left, right, kind, Location::caller(), msg);
    }
}

fn assert_failed_inner(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    args: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    match args {
        Some(args) => panic!(
            r#"assertion `left {op} right` failed at {location}: {args}
  left: {left:?}
 right: {right:?}"#
        ),
        None => panic!(
            r#"assertion `left {op} right` failed at {location}
  left: {left:?}
 right: {right:?}"#
        ),
    }
}

/// Asserts that two expressions are fuzzy-equal to each other (using [`FuzzyEq`]).
///
/// This macro functions identically to [`assert_eq!`], except in that it compares the values with
/// [`iseq`] (element-wise for vectors and matrices).
///
/// Also see [`assert_fuzzy_ne!`].
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_fuzzy_eq!(one, 1.0);
/// assert_fuzzy_eq!(vec2(one, 2.0), vec2(1.0, 2.0), "vectors differ");
/// ```
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::fuzzy::assert_fuzzy(
            &$lhs,
            &$rhs,
            $crate::fuzzy::AssertionKind::Eq,
            ::core::option::Option::None
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::fuzzy::assert_fuzzy(
            &$lhs,
            &$rhs,
            $crate::fuzzy::AssertionKind::Eq,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

/// Asserts that two expressions are *not* fuzzy-equal to each other (using [`FuzzyEq`]).
///
/// Also see [`assert_fuzzy_eq!`].
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// assert_fuzzy_ne!(100.0, 99.0);
/// assert_fuzzy_ne!(Vec3d::X, Vec3d::Y);
/// ```
#[macro_export]
macro_rules! assert_fuzzy_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::fuzzy::assert_fuzzy(
            &$lhs,
            &$rhs,
            $crate::fuzzy::AssertionKind::Ne,
            ::core::option::Option::None
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::fuzzy::assert_fuzzy(
            &$lhs,
            &$rhs,
            $crate::fuzzy::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::Mat2f;

    use super::*;

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_fuzzy_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_fuzzy_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "my message")]
    fn assertion_message() {
        assert_fuzzy_eq!(1.0, 2.0, "my message");
    }

    #[test]
    fn absolute_near_zero() {
        let eps = f64::EPSILON.sqrt();
        assert!(iseq(0.0, eps));
        assert!(iseq(-eps / 2.0, eps / 2.0));
        assert!(!iseq(0.0, eps * 2.0));
    }

    #[test]
    fn relative_far_from_zero() {
        let eps = f64::EPSILON.sqrt();
        assert!(iseq(1e6, 1e6 * (1.0 + eps / 2.0)));
        assert!(!iseq(1e6, 1e6 * (1.0 + eps * 4.0)));
    }

    #[test]
    fn fuzzy_band() {
        let eps = f64::EPSILON.sqrt();
        let (u, v) = (1000.0, 1000.0 * (1.0 + eps * 0.99));
        assert!(!islt(u, v));
        assert!(!isgt(v, u));

        // Not equal, since the absolute difference exceeds the relative tolerance.
        let (u, v) = (10.0, 10.0 + 15.0 * eps);
        assert!(!iseq(u, v));
        assert!(!isgt(u, v));
        assert!(islt(u, v));
    }

    #[test]
    fn nan() {
        assert!(!iseq(f64::NAN, f64::NAN));
        assert!(!islt(f64::NAN, 0.0));
        assert!(!isgt(0.0, f32::NAN));
    }

    #[test]
    fn compound() {
        let a = Vector::from([1.0, 2.0, 3.0]);
        let b = a + Vector::splat(1e-12);
        assert_fuzzy_eq!(a, b);
        assert_fuzzy_ne!(a, Vector::from([1.0, 2.0, 3.1]));

        let m = Matrix::from_rows([[1.0f32, 0.0], [0.0, 1.0]]);
        assert_fuzzy_eq!(m, Mat2f::IDENTITY);
        assert_fuzzy_ne!(m, Matrix::ZERO);
    }
}
