//! Vector and matrix algebra.
//!
//! The functions here are thin wrappers around the methods on [`Vector`] and [`Matrix`], for
//! code that prefers the `dot(a, b)` style. All of them require a [`Float`] element type.
//!
//! ```
//! # use smallmat::*;
//! use smallmat::algebra::{cross, dot, normalize};
//!
//! let a = vec3(1.0, 1.0, 1.0);
//! let b = vec3(-1.0, 1.0, 1.0);
//! assert_eq!(dot(a, b), 1.0);
//! assert_eq!(cross(a, b), vec3(0.0, -2.0, 2.0));
//! assert_fuzzy_eq!(dot(normalize(a), normalize(a)), 1.0);
//! ```

use crate::{kernels::Algebra, Float, Matrix, Vector};

/// Inner products and matrix products.
///
/// The output type depends on the operands:
///
/// | `self`        | `rhs`         | `Output`      |
/// |---------------|---------------|---------------|
/// | `Vector<T, N>` | `Vector<T, N>` | `T`           |
/// | `Matrix<T, N>` | `Vector<T, N>` | `Vector<T, N>` |
/// | `Matrix<T, N>` | `Matrix<T, N>` | `Matrix<T, N>` |
///
/// This is separate from `*`, which is always the element-wise product.
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// let m = Matrix::from_rows([
///     [1.0, 2.0],
///     [3.0, 4.0],
/// ]);
/// assert_eq!(m.dot(vec2(1.0, 1.0)), vec2(3.0, 7.0));
/// assert_eq!(m.dot(Mat2d::IDENTITY), m);
/// assert_eq!(vec2(1.0, 2.0).dot(vec2(3.0, 4.0)), 11.0);
/// ```
pub trait Dot<Rhs = Self> {
    type Output;

    fn dot(self, rhs: Rhs) -> Self::Output;
}

impl<T: Algebra<N>, const N: usize> Dot for Vector<T, N> {
    type Output = T;

    #[inline]
    fn dot(self, rhs: Self) -> T {
        T::lane_dot(self.into_array(), rhs.into_array())
    }
}

impl<T: Algebra<N>, const N: usize> Dot<Vector<T, N>> for Matrix<T, N> {
    type Output = Vector<T, N>;

    #[inline]
    fn dot(self, rhs: Vector<T, N>) -> Vector<T, N> {
        T::mat_vec(self.into_rows(), rhs.into_array()).into()
    }
}

impl<T: Algebra<N>, const N: usize> Dot for Matrix<T, N> {
    type Output = Self;

    #[inline]
    fn dot(self, rhs: Self) -> Self {
        T::mat_mat(self.into_rows(), rhs.into_rows()).into()
    }
}

/// Computes `a · b`; see [`Dot`].
#[inline]
pub fn dot<A: Dot<B>, B>(a: A, b: B) -> A::Output {
    a.dot(b)
}

#[inline]
pub fn norm<T: Float + Algebra<N>, const N: usize>(v: Vector<T, N>) -> T {
    v.norm()
}

/// Returns `v / norm(v)`. The zero vector yields NaN elements.
#[inline]
pub fn normalize<T: Float + Algebra<N>, const N: usize>(v: Vector<T, N>) -> Vector<T, N> {
    v.normalize()
}

#[inline]
pub fn distance<T: Float + Algebra<N>, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T {
    a.distance(b)
}

#[inline]
pub fn cross<T: Float>(a: Vector<T, 3>, b: Vector<T, 3>) -> Vector<T, 3> {
    a.cross(b)
}

#[inline]
pub fn transpose<T: Float + Algebra<N>, const N: usize>(m: Matrix<T, N>) -> Matrix<T, N> {
    m.transpose()
}

#[inline]
pub fn determinant<T: Float + Algebra<N>, const N: usize>(m: Matrix<T, N>) -> T {
    m.determinant()
}

/// Returns the inverse of `m`, or the zero matrix if its determinant is exactly zero.
#[inline]
pub fn inverse<T: Float + Algebra<N>, const N: usize>(m: Matrix<T, N>) -> Matrix<T, N> {
    m.inverse()
}

#[cfg(test)]
mod tests {
    use crate::{assert_fuzzy_eq, vec2, vec3, vec4, Mat2d, Mat3f, Mat4d, Matrix, Vec3d};

    use super::*;

    #[test]
    fn vector_products() {
        let a = vec3(1.0, 1.0, 1.0);
        let b = vec3(-1.0, 1.0, 1.0);
        assert_eq!(dot(a, b), 1.0);
        assert_eq!(cross(a, b), vec3(0.0, -2.0, 2.0));
        assert_eq!(dot(cross(a, b), a), 0.0);
        assert_eq!(dot(cross(a, b), b), 0.0);
        assert_fuzzy_eq!(norm(normalize(b)), 1.0);
        assert_eq!(distance(a, b), 2.0);

        assert_eq!(dot(vec4(1.0f32, 2.0, 3.0, 4.0), vec4(4.0, 3.0, 2.0, 1.0)), 20.0);
        assert_eq!(dot(vec2(3.0, -1.0), vec2(2.0, 6.0)), 0.0);
    }

    #[test]
    fn matrix_products() {
        #[rustfmt::skip]
        let m = Matrix::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(dot(m, Mat4d::IDENTITY), m);
        assert_eq!(dot(Mat4d::IDENTITY, m), m);
        assert_eq!(dot(m, vec4(1.0, 0.0, 0.0, 0.0)), m.column(0));
        assert_eq!(dot(m, vec4(1.0, 1.0, 1.0, 1.0)), vec4(10.0, 26.0, 42.0, 58.0));
        assert_eq!(transpose(dot(m, m)), dot(transpose(m), transpose(m)));

        let a = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_rows([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(dot(a, b), Matrix::from_rows([[19.0, 22.0], [43.0, 50.0]]));
        assert_eq!(a * b, Matrix::from_rows([[5.0, 12.0], [21.0, 32.0]]));
    }

    #[test]
    fn inverses() {
        let m = Matrix::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        assert_eq!(determinant(m), 10.0);
        assert_fuzzy_eq!(dot(inverse(m), m), Mat2d::IDENTITY);

        #[rustfmt::skip]
        let m = Matrix::from_rows([
            [ 2.0f32, -1.0,  0.0],
            [-1.0,     2.0, -1.0],
            [ 0.0,    -1.0,  2.0],
        ]);
        assert_fuzzy_eq!(determinant(m), 4.0);
        assert_fuzzy_eq!(dot(m, inverse(m)), Mat3f::IDENTITY);

        #[rustfmt::skip]
        let m = Matrix::from_rows([
            [ 2.0, -1.0,  0.0,  3.0],
            [ 1.0,  4.0, -2.0,  0.5],
            [ 0.0,  1.0,  5.0, -1.0],
            [-3.0,  2.0,  1.0,  2.0],
        ]);
        assert_fuzzy_eq!(dot(inverse(m), m), Mat4d::IDENTITY);
        assert_fuzzy_eq!(inverse(inverse(m)), m);
        assert_fuzzy_eq!(determinant(inverse(m)), 1.0 / determinant(m));

        assert_eq!(inverse(Mat4d::ZERO), Mat4d::ZERO);
        assert_eq!(inverse(Mat4d::ONE), Mat4d::ZERO);
    }

    #[test]
    fn normalize_zero() {
        let n = normalize(Vec3d::ZERO);
        assert!(n.as_slice().iter().all(|x| x.is_nan()));
    }
}
