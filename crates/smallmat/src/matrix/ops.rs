//! Element-wise operators.
//!
//! `Matrix * Matrix` is the Hadamard product; see [`Dot`][crate::Dot] for the matrix product.

use std::{
    array,
    ops::{
        Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
    },
};

use crate::kernels::Lanes;

use super::Matrix;

impl<T, const N: usize> Index<(usize, usize)> for Matrix<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.0[row][col]
    }
}

impl<T, const N: usize> IndexMut<(usize, usize)> for Matrix<T, N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.0[row][col]
    }
}

// More general `PartialEq` impl than what the derive generates.
impl<T, U, const N: usize> PartialEq<Matrix<U, N>> for Matrix<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U, N>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T, const N: usize> Eq for Matrix<T, N> where T: Eq {}

/// Element-wise negation.
impl<T: Lanes<N> + Neg<Output = T>, const N: usize> Neg for Matrix<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(T::lane_neg))
    }
}

macro_rules! binary_ops {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $lane:ident, $splat:ident;)+) => {
        $(
            /// Element-wise operation.
            impl<T: Lanes<N>, const N: usize> $op<Matrix<T, N>> for Matrix<T, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Matrix<T, N>) -> Self {
                    Self(array::from_fn(|i| T::$lane(self.0[i], rhs.0[i])))
                }
            }

            /// Element-wise operation.
            impl<T: Lanes<N>, const N: usize> $assign<Matrix<T, N>> for Matrix<T, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: Matrix<T, N>) {
                    for (row, other) in self.0.iter_mut().zip(rhs.0) {
                        *row = T::$lane(*row, other);
                    }
                }
            }

            /// Matrix-Scalar operation (the scalar is broadcast to every element).
            impl<T: Lanes<N>, const N: usize> $op<T> for Matrix<T, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: T) -> Self {
                    Self(self.0.map(|row| T::$splat(row, rhs)))
                }
            }

            /// Matrix-Scalar operation (the scalar is broadcast to every element).
            impl<T: Lanes<N>, const N: usize> $assign<T> for Matrix<T, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: T) {
                    for row in &mut self.0 {
                        *row = T::$splat(*row, rhs);
                    }
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

macro_rules! scalar_lhs_ops {
    ($($types:ty),+) => {
        $(
            impl<const N: usize> Add<Matrix<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Matrix<$types, N>;

                #[inline]
                fn add(self, rhs: Matrix<$types, N>) -> Self::Output {
                    Matrix(rhs.0.map(|row| <$types as Lanes<N>>::splat_add(row, self)))
                }
            }

            impl<const N: usize> Sub<Matrix<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Matrix<$types, N>;

                #[inline]
                fn sub(self, rhs: Matrix<$types, N>) -> Self::Output {
                    Matrix(rhs.0.map(|row| <$types as Lanes<N>>::splat_rsub(row, self)))
                }
            }

            impl<const N: usize> Mul<Matrix<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Matrix<$types, N>;

                #[inline]
                fn mul(self, rhs: Matrix<$types, N>) -> Self::Output {
                    Matrix(rhs.0.map(|row| <$types as Lanes<N>>::splat_mul(row, self)))
                }
            }

            impl<const N: usize> Div<Matrix<$types, N>> for $types
            where
                $types: Lanes<N>,
            {
                type Output = Matrix<$types, N>;

                #[inline]
                fn div(self, rhs: Matrix<$types, N>) -> Self::Output {
                    Matrix(rhs.0.map(|row| <$types as Lanes<N>>::splat_rdiv(row, self)))
                }
            }
        )+
    };
}
scalar_lhs_ops!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);
