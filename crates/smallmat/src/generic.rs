//! Portable reference kernels.
//!
//! These operate on plain arrays and are what every element type uses by default. When the AVX
//! kernels are compiled in (see [`Backend`][crate::Backend]), `f64` vectors and matrices use those
//! instead, and the functions in this module remain available to compare against.
//!
//! Matrices are passed as arrays of rows.

use std::{array, ops::Neg};

use crate::{elementwise::Elementwise, MinMax, Number, Sign};

pub fn add<T: Number, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| a[i] + b[i])
}

pub fn sub<T: Number, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| a[i] - b[i])
}

pub fn mul<T: Number, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| a[i] * b[i])
}

pub fn div<T: Number, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| a[i] / b[i])
}

pub fn neg<T: Number + Neg<Output = T>, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(|x| -x)
}

/// `a[i] + s`
pub fn splat_add<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| x + s)
}

/// `a[i] - s`
pub fn splat_sub<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| x - s)
}

/// `a[i] * s`
pub fn splat_mul<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| x * s)
}

/// `a[i] / s`
pub fn splat_div<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| x / s)
}

/// `s - a[i]`
pub fn splat_rsub<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| s - x)
}

/// `s / a[i]`
pub fn splat_rdiv<T: Number, const N: usize>(a: [T; N], s: T) -> [T; N] {
    a.map(|x| s / x)
}

pub fn abs<T: Sign, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Sign::abs)
}

pub fn sign<T: Sign, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Sign::sign)
}

pub fn min<T: MinMax + Copy, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| MinMax::min(a[i], b[i]))
}

pub fn max<T: MinMax + Copy, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    array::from_fn(|i| MinMax::max(a[i], b[i]))
}

pub fn clamp<T: MinMax + Copy, const N: usize>(u: [T; N], lo: [T; N], hi: [T; N]) -> [T; N] {
    array::from_fn(|i| MinMax::clamp(u[i], lo[i], hi[i]))
}

pub fn round<T: Elementwise + Copy, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Elementwise::round)
}

pub fn floor<T: Elementwise + Copy, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Elementwise::floor)
}

pub fn ceil<T: Elementwise + Copy, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Elementwise::ceil)
}

pub fn modulo<T: Elementwise + Copy, const N: usize>(u: [T; N], v: [T; N]) -> [T; N] {
    array::from_fn(|i| Elementwise::modulo(u[i], v[i]))
}

pub fn dirac<T: Elementwise + Copy, const N: usize>(e: [T; N], u: [T; N]) -> [T; N] {
    array::from_fn(|i| T::dirac(e[i], u[i]))
}

pub fn step<T: Elementwise + Copy, const N: usize>(edge: [T; N], u: [T; N]) -> [T; N] {
    array::from_fn(|i| T::step(edge[i], u[i]))
}

pub fn smoothstep<T: Elementwise + Copy, const N: usize>(
    lo: [T; N],
    hi: [T; N],
    u: [T; N],
) -> [T; N] {
    array::from_fn(|i| T::smoothstep(lo[i], hi[i], u[i]))
}

pub fn lerp<T: Elementwise + Copy, const N: usize>(lo: [T; N], hi: [T; N], u: [T; N]) -> [T; N] {
    array::from_fn(|i| T::lerp(lo[i], hi[i], u[i]))
}

pub fn radians<T: Elementwise + Copy, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Elementwise::radians)
}

pub fn degrees<T: Elementwise + Copy, const N: usize>(a: [T; N]) -> [T; N] {
    a.map(Elementwise::degrees)
}

/// Inner product, summed left to right.
pub fn dot<T: Number, const N: usize>(a: [T; N], b: [T; N]) -> T {
    a.into_iter()
        .zip(b)
        .fold(T::ZERO, |acc, (a, b)| acc + a * b)
}

/// Matrix-vector product.
pub fn mat_vec<T: Number, const N: usize>(m: [[T; N]; N], v: [T; N]) -> [T; N] {
    m.map(|row| dot(row, v))
}

/// Matrix-matrix product.
pub fn mat_mat<T: Number, const N: usize>(a: [[T; N]; N], b: [[T; N]; N]) -> [[T; N]; N] {
    array::from_fn(|i| array::from_fn(|j| (0..N).fold(T::ZERO, |acc, k| acc + a[i][k] * b[k][j])))
}

pub fn transpose<T: Copy, const N: usize>(m: [[T; N]; N]) -> [[T; N]; N] {
    array::from_fn(|i| array::from_fn(|j| m[j][i]))
}

pub fn cross<T: Number>(a: [T; 3], b: [T; 3]) -> [T; 3] {
    let [a1, a2, a3] = a;
    let [b1, b2, b3] = b;

    #[rustfmt::skip]
    let cross = [
        a2 * b3 - a3 * b2,
        a3 * b1 - a1 * b3,
        a1 * b2 - a2 * b1,
    ];
    cross
}

/// `p*x - q*y`
#[inline]
fn c2<T: Number>(p: T, x: T, q: T, y: T) -> T {
    p * x - q * y
}

/// `p*x - q*y + r*z`
#[inline]
fn c3<T: Number>(p: T, x: T, q: T, y: T, r: T, z: T) -> T {
    p * x - q * y + r * z
}

/// The six 2x2 minors of rows `r0` and `r1`, in column-pair order (01, 02, 03, 12, 13, 23).
#[inline]
fn minors<T: Number>(r0: [T; 4], r1: [T; 4]) -> [T; 6] {
    [
        c2(r0[0], r1[1], r0[1], r1[0]),
        c2(r0[0], r1[2], r0[2], r1[0]),
        c2(r0[0], r1[3], r0[3], r1[0]),
        c2(r0[1], r1[2], r0[2], r1[1]),
        c2(r0[1], r1[3], r0[3], r1[1]),
        c2(r0[2], r1[3], r0[3], r1[2]),
    ]
}

fn adjugate2<T: Number + Neg<Output = T>>(m: [[T; 2]; 2]) -> [[T; 2]; 2] {
    let [[a, b], [c, d]] = m;
    [[d, -b], [-c, a]]
}

fn adjugate3<T: Number + Neg<Output = T>>(m: [[T; 3]; 3]) -> [[T; 3]; 3] {
    let [[a, b, c], [d, e, f], [g, h, i]] = m;

    #[rustfmt::skip]
    let adj = [
        [ c2(e, i, f, h), -c2(b, i, c, h),  c2(b, f, c, e)],
        [-c2(d, i, f, g),  c2(a, i, c, g), -c2(a, f, c, d)],
        [ c2(d, h, e, g), -c2(a, h, b, g),  c2(a, e, b, d)],
    ];
    adj
}

/// First column of the 4x4 adjugate (the cofactors of the first row).
fn first_cofactors4<T: Number + Neg<Output = T>>(m: [[T; 4]; 4]) -> [T; 4] {
    let [_, [m10, m11, m12, m13], r2, r3] = m;
    let [b0, b1, b2, b3, b4, b5] = minors(r2, r3);
    [
        c3(m11, b5, m12, b4, m13, b3),
        -c3(m10, b5, m12, b2, m13, b1),
        c3(m10, b4, m11, b2, m13, b0),
        -c3(m10, b3, m11, b1, m12, b0),
    ]
}

fn adjugate4<T: Number + Neg<Output = T>>(m: [[T; 4]; 4]) -> [[T; 4]; 4] {
    let [r0, r1, r2, r3] = m;
    let [a0, a1, a2, a3, a4, a5] = minors(r0, r1);
    let [b0, b1, b2, b3, b4, b5] = minors(r2, r3);
    let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23], [m30, m31, m32, m33]] =
        m;

    [
        [
            c3(m11, b5, m12, b4, m13, b3),
            -c3(m01, b5, m02, b4, m03, b3),
            c3(m31, a5, m32, a4, m33, a3),
            -c3(m21, a5, m22, a4, m23, a3),
        ],
        [
            -c3(m10, b5, m12, b2, m13, b1),
            c3(m00, b5, m02, b2, m03, b1),
            -c3(m30, a5, m32, a2, m33, a1),
            c3(m20, a5, m22, a2, m23, a1),
        ],
        [
            c3(m10, b4, m11, b2, m13, b0),
            -c3(m00, b4, m01, b2, m03, b0),
            c3(m30, a4, m31, a2, m33, a0),
            -c3(m20, a4, m21, a2, m23, a0),
        ],
        [
            -c3(m10, b3, m11, b1, m12, b0),
            c3(m00, b3, m01, b1, m02, b0),
            -c3(m30, a3, m31, a1, m32, a0),
            c3(m20, a3, m21, a1, m22, a0),
        ],
    ]
}

/// Laplace expansion along the first row, given the first column of the adjugate.
#[inline]
fn expand_first_row<T: Number, const N: usize>(row: [T; N], cofactors: [T; N]) -> T {
    dot(row, cofactors)
}

/// Divides the adjugate by `det`, or returns the zero matrix if `det` is exactly zero.
fn scale_adjugate<T, const N: usize>(adj: [[T; N]; N], det: T) -> [[T; N]; N]
where
    T: Number + Sign + PartialOrd,
{
    if Sign::abs(det) <= T::ZERO {
        return [[T::ZERO; N]; N];
    }
    adj.map(|row| splat_div(row, det))
}

pub fn determinant2<T: Number>(m: [[T; 2]; 2]) -> T {
    let [[a, b], [c, d]] = m;
    c2(a, d, b, c)
}

pub fn determinant3<T: Number + Neg<Output = T>>(m: [[T; 3]; 3]) -> T {
    let adj = adjugate3(m);
    expand_first_row(m[0], [adj[0][0], adj[1][0], adj[2][0]])
}

pub fn determinant4<T: Number + Neg<Output = T>>(m: [[T; 4]; 4]) -> T {
    expand_first_row(m[0], first_cofactors4(m))
}

pub fn inverse2<T>(m: [[T; 2]; 2]) -> [[T; 2]; 2]
where
    T: Number + Neg<Output = T> + Sign + PartialOrd,
{
    scale_adjugate(adjugate2(m), determinant2(m))
}

pub fn inverse3<T>(m: [[T; 3]; 3]) -> [[T; 3]; 3]
where
    T: Number + Neg<Output = T> + Sign + PartialOrd,
{
    let adj = adjugate3(m);
    let det = expand_first_row(m[0], [adj[0][0], adj[1][0], adj[2][0]]);
    scale_adjugate(adj, det)
}

pub fn inverse4<T>(m: [[T; 4]; 4]) -> [[T; 4]; 4]
where
    T: Number + Neg<Output = T> + Sign + PartialOrd,
{
    let adj = adjugate4(m);
    let det = expand_first_row(m[0], [adj[0][0], adj[1][0], adj[2][0], adj[3][0]]);
    scale_adjugate(adj, det)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const M4: [[f64; 4]; 4] = [
        [ 2.0, -1.0,  0.0,  3.0],
        [ 1.0,  4.0, -2.0,  0.5],
        [ 0.0,  1.0,  5.0, -1.0],
        [-3.0,  2.0,  1.0,  2.0],
    ];

    #[test]
    fn determinants() {
        assert_eq!(determinant2([[1, 2], [3, 4]]), -2);
        #[rustfmt::skip]
        let m = [
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ];
        assert_eq!(determinant3(m), 54);
        assert_eq!(determinant3(transpose(m)), 54);

        // Integer copy of `M4`, scaled by 2 to stay exact.
        let mi = M4.map(|row| row.map(|x| (x * 2.0) as i64));
        let det = determinant4(mi);
        assert_eq!(det, determinant4(transpose(mi)));
        assert_eq!(det as f64, determinant4(M4) * 16.0);
    }

    #[test]
    fn cofactors_match_adjugate() {
        let adj = adjugate4(M4);
        assert_eq!(
            first_cofactors4(M4),
            [adj[0][0], adj[1][0], adj[2][0], adj[3][0]]
        );
    }

    #[test]
    fn adjugate_identity() {
        // `m * adj(m) == det(m) * I`, exactly for small integers.
        let mi = M4.map(|row| row.map(|x| (x * 2.0) as i64));
        let det = determinant4(mi);
        let prod = mat_mat(mi, adjugate4(mi));
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(prod[i][j], if i == j { det } else { 0 });
            }
        }
    }

    #[test]
    fn singular() {
        assert_eq!(inverse2([[1.0, 1.0], [1.0, 1.0]]), [[0.0; 2]; 2]);
        assert_eq!(inverse3([[1.0f32; 3]; 3]), [[0.0; 3]; 3]);
        assert_eq!(inverse4([[2.0; 4]; 4]), [[0.0; 4]; 4]);
    }

    #[test]
    fn products() {
        let a = [[1, 2], [3, 4]];
        let b = [[5, 6], [7, 8]];
        assert_eq!(mat_mat(a, b), [[19, 22], [43, 50]]);
        assert_eq!(mat_vec(a, [1, 1]), [3, 7]);
        assert_eq!(dot([1, 3, -5], [4, -2, -1]), 3);
        assert_eq!(cross([1, 0, 0], [0, 1, 0]), [0, 0, 1]);
    }
}
