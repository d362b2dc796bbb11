use std::{array, fmt};

use crate::{
    generic,
    kernels::{Algebra, Lanes},
    Number, One, Vector, Zero,
};

mod access;
mod ops;

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 2x2 matrix with [`f64`] elements.
pub type Mat2d = Mat2<f64>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 3x3 matrix with [`f64`] elements.
pub type Mat3d = Mat3<f64>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;
/// A 4x4 matrix with [`f64`] elements.
pub type Mat4d = Mat4<f64>;

/// A square, row-major `N`x`N` matrix with element type `T`.
///
/// Like [`Vector`], the arithmetic operators act *element-wise*: `a * b` is the Hadamard product
/// of `a` and `b`. The matrix product is [`Dot::dot`][crate::Dot::dot].
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] allow filling a matrix with raw elements,
///   as well as creating them from an array of row or column vectors.
/// - [`Matrix::from_fn`] will create each element by invoking a closure with its row and column.
/// - [`Matrix::from_diagonal`] creates a matrix with a specified diagonal and zero outside of it.
///
/// Additionally, some associated constants for commonly used matrices are defined:
///
/// - [`Matrix::ZERO`] is a matrix with every element set to 0.
/// - [`Matrix::ONE`] is a matrix with every element set to 1.
/// - `Matrix::IDENTITY` has 1 on its diagonal and 0 everywhere else.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row*, the second is the *column*, matching common
/// mathematical notation. Indices are 0-based.
///
/// ```
/// # use smallmat::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1],
///     [2, 3],
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// The same elements are also available by name (`xx`, `xy`, ... for row `x`, column `y`) and in
/// row-major order through [`Matrix::as_slice`]:
///
/// ```
/// # use smallmat::*;
/// let mat = Matrix::from_rows([
///     [0, 1],
///     [2, 3],
/// ]);
/// assert_eq!(mat.yx(), 2);
/// assert_eq!(mat.as_slice(), &[0, 1, 2, 3]);
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const N: usize>([[T; N]; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Matrix<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Matrix<T, N> {}

impl<T: Zero + Copy, const N: usize> Matrix<T, N> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([[T::ZERO; N]; N]);
}

impl<T: One + Copy, const N: usize> Matrix<T, N> {
    /// A matrix with every element set to 1.
    pub const ONE: Self = Self([[T::ONE; N]; N]);
}

impl<T: Zero + One> Matrix<T, 2> {
    /// The identity matrix.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        [T::ONE, T::ZERO],
        [T::ZERO, T::ONE],
    ]);
}

impl<T: Zero + One> Matrix<T, 3> {
    /// The identity matrix.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        [T::ONE, T::ZERO, T::ZERO],
        [T::ZERO, T::ONE, T::ZERO],
        [T::ZERO, T::ZERO, T::ONE],
    ]);
}

impl<T: Zero + One> Matrix<T, 4> {
    /// The identity matrix.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        [T::ONE, T::ZERO, T::ZERO, T::ZERO],
        [T::ZERO, T::ONE, T::ZERO, T::ZERO],
        [T::ZERO, T::ZERO, T::ONE, T::ZERO],
        [T::ZERO, T::ZERO, T::ZERO, T::ONE],
    ]);
}

impl<T, const N: usize> Matrix<T, N> {
    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, N>>>(rows: [U; N]) -> Self {
        Self(rows.map(|row| row.into().into_array()))
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, N>>>(columns: [U; N]) -> Self
    where
        T: Copy,
    {
        Self(generic::transpose(columns.map(|col| col.into().into_array())))
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1],
    ///     [10, 11],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|row| array::from_fn(|col| cb(row, col))))
    }

    /// Applies a closure to each element, returning a new matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let mat = mat.map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 2],
    ///     [4, 6],
    /// ]));
    /// ```
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, N>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|row| row.map(&mut f)))
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Some(&0));
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(row).and_then(|row| row.get(col))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(row).and_then(|row| row.get_mut(col))
    }

    /// Returns the rows of this matrix.
    #[inline]
    pub const fn as_rows(&self) -> &[[T; N]; N] {
        &self.0
    }

    /// Converts this matrix into an array of its rows.
    #[inline]
    pub fn into_rows(self) -> [[T; N]; N] {
        self.0
    }

    /// Returns all elements in row-major order.
    ///
    /// Element `i * N + j` of the slice is the element at `(i, j)`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_flattened()
    }

    /// Returns all elements in row-major order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_flattened_mut()
    }

    /// Returns row `i` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> Vector<T, N>
    where
        T: Copy,
    {
        self.0[i].into()
    }

    /// Returns column `j` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `j` is out of bounds.
    pub fn column(&self, j: usize) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self.0[i][j])
    }

    /// Returns a [`Vector`] holding the diagonal elements of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self.0[i][i])
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal will be initialized with zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Matrix::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        Self::from_fn(|row, col| if row == col { diag[row] } else { T::ZERO })
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag.trace(), 1 + 2 + 3);
    ///
    /// assert_eq!(Mat3f::IDENTITY.trace(), 3.0);
    /// ```
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self.0[i][i])
    }
}

impl<T: Lanes<N>, const N: usize> Matrix<T, N> {
    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    ///     [6, 7, 8],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3, 6],
    ///     [1, 4, 7],
    ///     [2, 5, 8],
    /// ]));
    /// ```
    #[inline]
    pub fn transpose(self) -> Self {
        Self(T::lane_transpose(self.0))
    }
}

impl<T: Algebra<N>, const N: usize> Matrix<T, N> {
    /// Returns the [determinant] of the matrix.
    ///
    /// This is a closed-form cofactor expansion along the first row. 4x4 matrices use the six 2x2
    /// minors of the last two rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [-2.0, -1.0,  2.0],
    ///     [ 2.0,  1.0,  4.0],
    ///     [-3.0,  3.0, -1.0],
    /// ]);
    /// assert_eq!(mat.determinant(), 54.0);
    /// ```
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        T::mat_det(self.0)
    }

    /// Inverts this matrix by dividing its adjugate by its determinant.
    ///
    /// If the determinant is exactly zero, the matrix is not invertible and the result is the
    /// zero matrix. No tolerance is applied, so nearly singular matrices produce very large
    /// elements instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smallmat::*;
    /// let mat = Matrix::from_rows([
    ///     [4.0, 7.0],
    ///     [2.0, 6.0],
    /// ]);
    /// assert_fuzzy_eq!(mat.inverse().dot(mat), Mat2d::IDENTITY);
    ///
    /// let singular = Matrix::from_rows([
    ///     [1.0, 1.0],
    ///     [1.0, 1.0],
    /// ]);
    /// assert_eq!(singular.inverse(), Mat2d::ZERO);
    /// ```
    #[inline]
    pub fn inverse(&self) -> Self {
        Self(T::mat_inverse(self.0))
    }
}

impl<T, const N: usize> Default for Matrix<T, N>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

impl<T, const N: usize> From<[[T; N]; N]> for Matrix<T, N> {
    /// Creates a matrix from an array of rows.
    #[inline]
    fn from(rows: [[T; N]; N]) -> Self {
        Self(rows)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug>(&'a [T]);
        impl<'a, T: fmt::Debug> fmt::Debug for FormatRow<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (col, elem) in self.0.iter().enumerate() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in &self.0 {
            list.entry(&FormatRow(row));
        }
        list.finish()
    }
}
