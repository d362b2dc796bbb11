//! Products, transposition, determinants and inverses.
//!
//! Determinants and inverses use the same cofactor grouping as the portable kernels: the
//! adjugate is computed one row at a time, with the cofactor signs applied as a sign-bit mask.

use std::{arch::x86_64::*, array};

use super::{F64x2, F64x3, F64x4, Reg};

pub(super) fn mat_vec<R: Reg<N>, const N: usize>(m: [[f64; N]; N], v: [f64; N]) -> [f64; N] {
    let v = R::load(v);
    m.map(|row| R::load(row).mul(v).sum())
}

/// Row `i` of the product is `sum_k a[i][k] * b[k]`, accumulated in `k` order.
pub(super) fn mat_mat<R: Reg<N>, const N: usize>(
    a: [[f64; N]; N],
    b: [[f64; N]; N],
) -> [[f64; N]; N] {
    let b = b.map(R::load);
    a.map(|row| {
        let mut acc = R::splat(0.0);
        for (k, b) in b.iter().enumerate() {
            acc = acc.add(R::splat(row[k]).mul(*b));
        }
        acc.store()
    })
}

pub(super) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    let [a1, a2, a3] = a;
    let [b1, b2, b3] = b;
    let lhs = F64x3::load([a2, a3, a1]).mul(F64x3::load([b3, b1, b2]));
    let rhs = F64x3::load([a3, a1, a2]).mul(F64x3::load([b2, b3, b1]));
    lhs.sub(rhs).store()
}

fn transpose_wide([r0, r1, r2, r3]: [__m256d; 4]) -> [__m256d; 4] {
    unsafe {
        let t0 = _mm256_unpacklo_pd(r0, r1);
        let t1 = _mm256_unpackhi_pd(r0, r1);
        let t2 = _mm256_unpacklo_pd(r2, r3);
        let t3 = _mm256_unpackhi_pd(r2, r3);
        [
            _mm256_permute2f128_pd::<0x20>(t0, t2),
            _mm256_permute2f128_pd::<0x20>(t1, t3),
            _mm256_permute2f128_pd::<0x31>(t0, t2),
            _mm256_permute2f128_pd::<0x31>(t1, t3),
        ]
    }
}

pub(super) fn transpose2(m: [[f64; 2]; 2]) -> [[f64; 2]; 2] {
    let [r0, r1] = m.map(F64x2::load);
    unsafe {
        [
            F64x2(_mm_unpacklo_pd(r0.0, r1.0)).store(),
            F64x2(_mm_unpackhi_pd(r0.0, r1.0)).store(),
        ]
    }
}

pub(super) fn transpose3(m: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let [r0, r1, r2] = m.map(|row| F64x3::load(row).0);
    let zero = unsafe { _mm256_setzero_pd() };
    let [c0, c1, c2, _] = transpose_wide([r0, r1, r2, zero]);
    [c0, c1, c2].map(|c| F64x3(c).store())
}

pub(super) fn transpose4(m: [[f64; 4]; 4]) -> [[f64; 4]; 4] {
    transpose_wide(m.map(|row| F64x4::load(row).0)).map(|c| F64x4(c).store())
}

/// Divides each adjugate row by `det`, masking to zero when `det == 0`.
fn scale_adjugate<R: Reg<N>, const N: usize>(adj: [R; N], det: f64) -> [[f64; N]; N] {
    let det = R::splat(det);
    let invertible = det.ne(R::splat(0.0));
    adj.map(|row| row.div(det).and(invertible).store())
}

pub(super) fn determinant2(m: [[f64; 2]; 2]) -> f64 {
    let [[a, b], [c, d]] = m;
    let products = F64x2::load([a, b]).mul(F64x2::load([d, c]));
    unsafe { _mm_cvtsd_f64(_mm_hsub_pd(products.0, products.0)) }
}

pub(super) fn inverse2(m: [[f64; 2]; 2]) -> [[f64; 2]; 2] {
    let [[a, b], [c, d]] = m;
    let adj = [F64x2::load([d, -b]), F64x2::load([-c, a])];
    scale_adjugate(adj, determinant2(m))
}

/// `p*x - q*y`, per lane.
#[inline(always)]
fn c2<R: Reg<N>, const N: usize>(p: [f64; N], x: [f64; N], q: [f64; N], y: [f64; N]) -> R {
    R::load(p).mul(R::load(x)).sub(R::load(q).mul(R::load(y)))
}

fn adjugate3(m: [[f64; 3]; 3]) -> [F64x3; 3] {
    let [[a, b, c], [d, e, f], [g, h, i]] = m;
    let even = F64x3::load([0.0, -0.0, 0.0]);
    let odd = F64x3::load([-0.0, 0.0, -0.0]);

    [
        c2::<F64x3, 3>([e, b, b], [i, i, f], [f, c, c], [h, h, e]).xor(even),
        c2::<F64x3, 3>([d, a, a], [i, i, f], [f, c, c], [g, g, d]).xor(odd),
        c2::<F64x3, 3>([d, a, a], [h, h, e], [e, b, b], [g, g, d]).xor(even),
    ]
}

/// Laplace expansion along the first row, given the adjugate rows.
fn expand_first_row<R: Reg<N>, const N: usize>(row: [f64; N], adj: [R; N]) -> f64 {
    let adj = adj.map(R::store);
    let cofactors = array::from_fn(|i| adj[i][0]);
    R::load(row).mul(R::load(cofactors)).sum()
}

pub(super) fn determinant3(m: [[f64; 3]; 3]) -> f64 {
    expand_first_row(m[0], adjugate3(m))
}

pub(super) fn inverse3(m: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let adj = adjugate3(m);
    scale_adjugate(adj, expand_first_row(m[0], adj))
}

/// The six 2x2 minors of rows `r0` and `r1`, in column-pair order (01, 02, 03, 12, 13, 23).
fn minors(r0: [f64; 4], r1: [f64; 4]) -> [f64; 6] {
    let [m01, m02, m03, m12] = c2::<F64x4, 4>(
        [r0[0], r0[0], r0[0], r0[1]],
        [r1[1], r1[2], r1[3], r1[2]],
        [r0[1], r0[2], r0[3], r0[2]],
        [r1[0], r1[0], r1[0], r1[1]],
    )
    .store();
    let [m13, m23] = c2::<F64x2, 2>([r0[1], r0[2]], [r1[3], r1[3]], [r0[3], r0[3]], [r1[1], r1[2]])
        .store();
    [m01, m02, m03, m12, m13, m23]
}

fn adjugate4(m: [[f64; 4]; 4]) -> [F64x4; 4] {
    let [r0, r1, r2, r3] = m;
    let a = minors(r0, r1);
    let b = minors(r2, r3);

    // `k[c]` holds column `c` of rows 1, 0, 3, 2; `x(i)` pairs minor `i` of the bottom rows with
    // minor `i` of the top rows.
    let k = transpose_wide([r1, r0, r3, r2].map(|row| F64x4::load(row).0)).map(F64x4);
    let x = |i: usize| F64x4::load([b[i], b[i], a[i], a[i]]);
    let even = F64x4::load([0.0, -0.0, 0.0, -0.0]);
    let odd = F64x4::load([-0.0, 0.0, -0.0, 0.0]);

    [
        k[1].mul(x(5)).sub(k[2].mul(x(4))).add(k[3].mul(x(3))).xor(even),
        k[0].mul(x(5)).sub(k[2].mul(x(2))).add(k[3].mul(x(1))).xor(odd),
        k[0].mul(x(4)).sub(k[1].mul(x(2))).add(k[3].mul(x(0))).xor(even),
        k[0].mul(x(3)).sub(k[1].mul(x(1))).add(k[2].mul(x(0))).xor(odd),
    ]
}

pub(super) fn determinant4(m: [[f64; 4]; 4]) -> f64 {
    expand_first_row(m[0], adjugate4(m))
}

pub(super) fn inverse4(m: [[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let adj = adjugate4(m);
    scale_adjugate(adj, expand_first_row(m[0], adj))
}

#[cfg(test)]
mod tests {
    use crate::generic;

    use super::*;

    #[rustfmt::skip]
    const M4: [[f64; 4]; 4] = [
        [ 2.0, -1.0,  0.5,  3.0],
        [ 1.0,  4.0, -2.0,  0.5],
        [ 0.25, 1.0,  5.0, -1.0],
        [-3.0,  2.0,  1.0,  2.0],
    ];

    #[rustfmt::skip]
    const M3: [[f64; 3]; 3] = [
        [ 1.5, -1.0,  2.0],
        [ 2.0,  1.0,  4.0],
        [-3.0,  3.0, -1.0],
    ];

    const M2: [[f64; 2]; 2] = [[4.0, 7.0], [2.0, 6.0]];

    #[test]
    fn transposes() {
        assert_eq!(transpose2(M2), generic::transpose(M2));
        assert_eq!(transpose3(M3), generic::transpose(M3));
        assert_eq!(transpose4(M4), generic::transpose(M4));
    }

    #[test]
    fn products() {
        assert_eq!(mat_mat::<F64x4, 4>(M4, M4), generic::mat_mat(M4, M4));
        assert_eq!(mat_mat::<F64x3, 3>(M3, M3), generic::mat_mat(M3, M3));
        assert_eq!(mat_mat::<F64x2, 2>(M2, M2), generic::mat_mat(M2, M2));
        assert_eq!(mat_vec::<F64x4, 4>(M4, M4[2]), generic::mat_vec(M4, M4[2]));
        assert_eq!(mat_vec::<F64x3, 3>(M3, M3[0]), generic::mat_vec(M3, M3[0]));
        assert_eq!(cross(M3[0], M3[1]), generic::cross(M3[0], M3[1]));
    }

    #[test]
    fn same_cofactors() {
        assert_eq!(determinant2(M2), generic::determinant2(M2));
        assert_eq!(determinant3(M3), generic::determinant3(M3));
        assert_eq!(determinant4(M4), generic::determinant4(M4));
        assert_eq!(inverse2(M2), generic::inverse2(M2));
        assert_eq!(inverse3(M3), generic::inverse3(M3));
        assert_eq!(inverse4(M4), generic::inverse4(M4));
    }

    #[test]
    fn singular_mask() {
        assert_eq!(inverse2([[1.0, 2.0], [2.0, 4.0]]), [[0.0; 2]; 2]);
        assert_eq!(inverse3([[1.0; 3]; 3]), [[0.0; 3]; 3]);
        assert_eq!(inverse4([[3.0; 4]; 4]), [[0.0; 4]; 4]);

        let nan = inverse4([[f64::NAN; 4]; 4]);
        assert!(nan.iter().flatten().all(|x| x.is_nan()));
    }
}
