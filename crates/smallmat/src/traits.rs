use std::{fmt, ops};

use crate::{
    elementwise::Elementwise,
    kernels::{Algebra, Cross},
};

/// Types that support the trigonometric functions.
pub trait Trig {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively). Built-in integer types implement it in terms of
/// [`Ord::min`] and [`Ord::max`].
///
/// [`Vector`][crate::Vector]s implement it element-wise.
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// Restricts `self` to the range `[min, max]`.
    ///
    /// Unlike [`f32::clamp`], this never panics: it is defined as `self.max(min).min(max)`.
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}
macro_rules! ord_min_max {
    ($($types:ty),+) => {
        $(
            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
        )+
    };
}
ord_min_max!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
impl MinMax for f32 {
    fn min(self, other: Self) -> Self {
        self.min(other)
    }

    fn max(self, other: Self) -> Self {
        self.max(other)
    }
}
impl MinMax for f64 {
    fn min(self, other: Self) -> Self {
        self.min(other)
    }

    fn max(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Types with an absolute value and a sign.
///
/// [`Vector`][crate::Vector]s implement it element-wise.
pub trait Sign {
    /// Returns the absolute value of `self`.
    fn abs(self) -> Self;

    /// Returns `1` if `self` is positive, `-1` if it is negative, and `0` otherwise.
    ///
    /// Note that this differs from [`f32::signum`], which returns `±1.0` for `±0.0`. Zero and NaN
    /// both map to `0`.
    fn sign(self) -> Self;
}
macro_rules! int_sign {
    ($($types:ty),+) => {
        $(
            impl Sign for $types {
                fn abs(self) -> Self {
                    <$types>::abs(self)
                }

                fn sign(self) -> Self {
                    <$types>::signum(self)
                }
            }
        )+
    };
}
int_sign!(i8, i16, i32, i64, i128);
macro_rules! uint_sign {
    ($($types:ty),+) => {
        $(
            impl Sign for $types {
                fn abs(self) -> Self {
                    self
                }

                fn sign(self) -> Self {
                    (self != 0).into()
                }
            }
        )+
    };
}
uint_sign!(u8, u16, u32, u64, u128);
macro_rules! float_sign {
    ($($types:ident),+) => {
        $(
            impl Sign for $types {
                fn abs(self) -> Self {
                    $types::abs(self)
                }

                fn sign(self) -> Self {
                    if self > 0.0 {
                        1.0
                    } else if self < 0.0 {
                        -1.0
                    } else {
                        0.0
                    }
                }
            }
        )+
    };
}
float_sign!(f32, f64);

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
///
/// Negation is not part of this, so unsigned integers qualify.
pub trait Number:
    Zero
    + One
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// Floating-point scalars.
///
/// This is the bound used by the [fuzzy comparisons][crate::fuzzy] and the scalar definitions of
/// the [element-wise functions][crate::elementwise]. It is only implemented for [`f32`] and
/// [`f64`], so using those APIs with an integer type is a compile-time error.
pub trait Real:
    Number
    + ops::Neg<Output = Self>
    + PartialOrd
    + MinMax
    + Sign
    + Sqrt
    + Trig
    + Elementwise
    + fmt::Debug
{
    /// Machine epsilon: the difference between `1.0` and the next larger representable number.
    const EPSILON: Self;
    /// Archimedes' constant (π).
    const PI: Self;
    /// `π / 180`, the factor converting degrees to radians.
    const DEG_TO_RAD: Self;
    /// `180 / π`, the factor converting radians to degrees.
    const RAD_TO_DEG: Self;

    /// Converts a small integer literal to `Self`.
    fn from_u8(n: u8) -> Self;
}

/// Floating-point scalars that the vector and matrix algebra is defined for.
///
/// This bundles [`Real`] with the (sealed) kernel traits for dimensions 2, 3 and 4. `f32` always
/// uses the portable kernels; `f64` uses the AVX kernels when they are compiled in (see
/// [`Backend`][crate::Backend]).
///
/// Algebra operations like [`determinant`][crate::algebra::determinant] are bounded by this trait,
/// so attempting to use them with an integer element type fails to compile:
///
/// ```compile_fail
/// # use smallmat::*;
/// let m = Matrix::from_rows([[1, 2], [3, 4]]);
/// let _ = m.determinant();
/// ```
pub trait Float: Real + Algebra<2> + Algebra<3> + Algebra<4> + Cross {}

impl<T> Float for T where T: Real + Algebra<2> + Algebra<3> + Algebra<4> + Cross {}

macro_rules! zero_one {
    ($zero:literal, $one:literal: $($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = $zero;
            }
            impl One for $types {
                const ONE: Self = $one;
            }
        )+
    };
}
zero_one!(0.0, 1.0: f32, f64);
zero_one!(0, 1: u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

macro_rules! float_traits {
    ($($types:ident),+) => {
        $(
            impl Trig for $types {
                fn sin(self) -> Self {
                    $types::sin(self)
                }

                fn cos(self) -> Self {
                    $types::cos(self)
                }

                fn tan(self) -> Self {
                    $types::tan(self)
                }
            }

            impl Sqrt for $types {
                fn sqrt(self) -> Self {
                    $types::sqrt(self)
                }
            }

            impl Real for $types {
                const EPSILON: Self = $types::EPSILON;
                const PI: Self = std::$types::consts::PI;
                const DEG_TO_RAD: Self = std::$types::consts::PI / 180.0;
                const RAD_TO_DEG: Self = 180.0 / std::$types::consts::PI;

                fn from_u8(n: u8) -> Self {
                    n.into()
                }
            }
        )+
    };
}
float_traits!(f32, f64);

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn sign() {
        assert_eq!(Sign::sign(-3i32), -1);
        assert_eq!(Sign::sign(0i8), 0);
        assert_eq!(Sign::sign(7i64), 1);
        assert_eq!(Sign::sign(-0.5f64), -1.0);
        assert_eq!(Sign::sign(0.0f32), 0.0);
        assert_eq!(Sign::sign(-0.0f64), 0.0);
        assert_eq!(Sign::sign(f64::NAN), 0.0);

        assert_eq!(Sign::sign(0u8), 0);
        assert_eq!(Sign::sign(200u8), 1);
        assert_eq!(Sign::abs(u64::MAX), u64::MAX);
    }

    #[test]
    fn clamp_never_panics() {
        // `f64::clamp` would panic here.
        assert_eq!(MinMax::clamp(5.0f64, 3.0, 1.0), 1.0);
        assert_eq!(MinMax::clamp(-2, 0, 10), 0);
        assert_eq!(MinMax::clamp(f32::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn angle_factors() {
        assert_relative_eq!(180.0 * f64::DEG_TO_RAD, std::f64::consts::PI);
        assert_relative_eq!(std::f32::consts::PI * f32::RAD_TO_DEG, 180.0);
        assert_relative_eq!(f64::DEG_TO_RAD * f64::RAD_TO_DEG, 1.0);
    }
}
