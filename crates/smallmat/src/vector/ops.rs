//! Implementations of `std::ops`.
//!
//! Arithmetic goes through the lane kernels of the element type, so `f64` vectors use the AVX
//! kernels when they are compiled in.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::kernels::Lanes;

use super::Vector;

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

// More general impl than what the derive generates.
impl<T, U, const N: usize> PartialEq<Vector<U, N>> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U, N>) -> bool {
        self.0 == other.0
    }
}

impl<T, const N: usize> Eq for Vector<T, N> where T: Eq {}

impl<T, U, const N: usize> PartialEq<[U; N]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.0.eq(other)
    }
}

impl<T, U, const N: usize> PartialEq<Vector<U, N>> for [T; N]
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U, N>) -> bool {
        *self == other.0
    }
}

impl<T, U, const N: usize> PartialEq<[U]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.0.eq(other)
    }
}

/// Element-wise negation.
impl<T: Lanes<N> + Neg<Output = T>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(T::lane_neg(self.0))
    }
}

macro_rules! binary_ops {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $lane:ident, $splat:ident;)+) => {
        $(
            /// Element-wise operation.
            impl<T: Lanes<N>, const N: usize> $op<Vector<T, N>> for Vector<T, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Vector<T, N>) -> Self {
                    Self(T::$lane(self.0, rhs.0))
                }
            }

            /// Element-wise operation.
            impl<T: Lanes<N>, const N: usize> $assign<Vector<T, N>> for Vector<T, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: Vector<T, N>) {
                    self.0 = T::$lane(self.0, rhs.0);
                }
            }

            /// Vector-Scalar operation (the scalar is broadcast to every element).
            impl<T: Lanes<N>, const N: usize> $op<T> for Vector<T, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: T) -> Self {
                    Self(T::$splat(self.0, rhs))
                }
            }

            /// Vector-Scalar operation (the scalar is broadcast to every element).
            impl<T: Lanes<N>, const N: usize> $assign<T> for Vector<T, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: T) {
                    self.0 = T::$splat(self.0, rhs);
                }
            }
        )+
    };
}

binary_ops! {
    Add::add, AddAssign::add_assign => lane_add, splat_add;
    Sub::sub, SubAssign::sub_assign => lane_sub, splat_sub;
    Mul::mul, MulAssign::mul_assign => lane_mul, splat_mul;
    Div::div, DivAssign::div_assign => lane_div, splat_div;
}

// Scalar-Vector operations can't be generic over the scalar type due to coherence, so they are
// generated for every element type.
macro_rules! scalar_lhs_ops {
    ($($types:ty),+) => {
        $(
            impl<const N: usize> Add<Vector<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Vector<$types, N>;

                #[inline]
                fn add(self, rhs: Vector<$types, N>) -> Self::Output {
                    Vector(<$types as Lanes<N>>::splat_add(rhs.0, self))
                }
            }

            impl<const N: usize> Sub<Vector<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Vector<$types, N>;

                #[inline]
                fn sub(self, rhs: Vector<$types, N>) -> Self::Output {
                    Vector(<$types as Lanes<N>>::splat_rsub(rhs.0, self))
                }
            }

            impl<const N: usize> Mul<Vector<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Vector<$types, N>;

                #[inline]
                fn mul(self, rhs: Vector<$types, N>) -> Self::Output {
                    Vector(<$types as Lanes<N>>::splat_mul(rhs.0, self))
                }
            }

            impl<const N: usize> Div<Vector<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Vector<$types, N>;

                #[inline]
                fn div(self, rhs: Vector<$types, N>) -> Self::Output {
                    Vector(<$types as Lanes<N>>::splat_rdiv(rhs.0, self))
                }
            }
        )+
    };
}
scalar_lhs_ops!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

#[cfg(test)]
mod tests {
    use crate::{vec2, vec3, vec4, MinMax, One, Sign, Vec3d, Vector};

    #[test]
    fn vector_vector() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a + b, vec3(5.0, 7.0, 9.0));
        assert_eq!(a - b, vec3(-3.0, -3.0, -3.0));
        assert_eq!(a * b, vec3(4.0, 10.0, 18.0));
        assert_eq!(b / a, vec3(4.0, 2.5, 2.0));
        assert_eq!(-a, vec3(-1.0, -2.0, -3.0));
    }

    #[test]
    fn vector_scalar() {
        let v = vec4(1, -2, 3, -4);
        assert_eq!(v + 1, vec4(2, -1, 4, -3));
        assert_eq!(v - 1, vec4(0, -3, 2, -5));
        assert_eq!(v * 2, vec4(2, -4, 6, -8));
        assert_eq!(v / 2, vec4(0, -1, 1, -2));
    }

    #[test]
    fn unsigned() {
        let v = vec3(1u32, 2, 3);
        assert_eq!(v + 1, vec3(2u32, 3, 4));
        assert_eq!(v + vec3(1u32, 1, 1), vec3(2u32, 3, 4));
        assert_eq!(10 - v, vec3(9u32, 8, 7));
        assert_eq!(v * v, vec3(1u32, 4, 9));
        assert_eq!(7u8 / vec2(2u8, 3), vec2(3u8, 2));
        assert_eq!(v.max(Vector::splat(2)), vec3(2u32, 2, 3));
        assert_eq!(MinMax::clamp(v, Vector::splat(2), Vector::splat(2)), Vector::splat(2u32));
        assert_eq!(Sign::sign(vec4(0u64, 5, 0, 1)), vec4(0u64, 1, 0, 1));
    }

    #[test]
    fn scalar_vector() {
        let v = vec2(2.0f32, 4.0);
        assert_eq!(1.0 + v, vec2(3.0, 5.0));
        assert_eq!(1.0 - v, vec2(-1.0, -3.0));
        assert_eq!(3.0 * v, vec2(6.0, 12.0));
        assert_eq!(8.0 / v, vec2(4.0, 2.0));
        assert_eq!(10i64 - vec2(1, 2), vec2(9, 8));
    }

    #[test]
    fn assign() {
        let mut v = vec3(1.0, 2.0, 3.0);
        v += vec3(1.0, 1.0, 1.0);
        v *= 2.0;
        v -= Vec3d::X;
        v /= vec3(1.0, 2.0, 4.0);
        assert_eq!(v, vec3(3.0, 3.0, 2.0));

        // Increment and decrement.
        let mut i = vec2(1i16, 5);
        i += i16::ONE;
        assert_eq!(i, vec2(2, 6));
        i -= i16::ONE;
        assert_eq!(i, vec2(1, 5));
    }

    #[test]
    fn three_lanes() {
        // The hidden fourth lane of the AVX kernels must never leak into results.
        let a = vec3(f64::MAX, 1.0, -1.0);
        let b = vec3(0.5, 0.5, 0.5);
        assert_eq!(a * b, vec3(f64::MAX * 0.5, 0.5, -0.5));
        assert_eq!((a / b).as_slice().len(), 3);
    }
}
