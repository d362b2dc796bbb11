//! Checks that the kernels selected for `f64` agree with the portable ones in [`smallmat::generic`].
//!
//! With the portable backend both sides run the same code. With the AVX backend the results are
//! expected to match exactly, up to the sign of zeros.

use fastrand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use smallmat::{elementwise as ew, fuzzy::iseq, generic, Backend, Dot, Matrix, MinMax, Sign, Vector};

const ROUNDS: u64 = 5000;
const SEED: u64 = 0x0b5e_77a1_c3d2_4f19;

fn rounds(check: impl Fn(&mut Rng) + Sync) {
    (0..ROUNDS).into_par_iter().for_each(|round| {
        let mut rng = Rng::with_seed(SEED ^ round.rotate_left(17));
        check(&mut rng);
    });
}

/// Mostly uniform values, with some exact zeros, halves and tiny magnitudes mixed in.
fn scalar(rng: &mut Rng) -> f64 {
    match rng.u8(..8) {
        0 => 0.0,
        1 => f64::from(rng.i32(-16..16)) * 0.5,
        2 => (rng.f64() - 0.5) * 1e-9,
        _ => rng.f64() * 200.0 - 100.0,
    }
}

fn array<const N: usize>(rng: &mut Rng) -> [f64; N] {
    std::array::from_fn(|_| scalar(rng))
}

fn rows<const N: usize>(rng: &mut Rng) -> [[f64; N]; N] {
    std::array::from_fn(|_| array(rng))
}

fn agree(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan()) || iseq(a, b)
}

#[track_caller]
fn check<const N: usize>(what: &str, simd: impl AsRef<[f64]>, portable: [f64; N]) {
    let simd = simd.as_ref();
    assert_eq!(simd.len(), N);
    for (i, (&a, &b)) in simd.iter().zip(&portable).enumerate() {
        assert!(
            agree(a, b),
            "{what}[{i}] differs on {} kernels: {a} vs. {b}",
            Backend::active()
        );
    }
}

macro_rules! parity {
    ($($module:ident: $n:literal => $det:ident, $inv:ident;)+) => {
        $(
            mod $module {
                use super::*;

                const N: usize = $n;

                #[test]
                fn arithmetic() {
                    rounds(|rng| {
                        let (a, b) = (array::<N>(rng), array::<N>(rng));
                        let s = scalar(rng);
                        let (u, v) = (Vector::from(a), Vector::from(b));

                        check("add", u + v, generic::add(a, b));
                        check("sub", u - v, generic::sub(a, b));
                        check("mul", u * v, generic::mul(a, b));
                        check("div", u / v, generic::div(a, b));
                        check("neg", -u, generic::neg(a));
                        check("splat_add", u + s, generic::splat_add(a, s));
                        check("splat_sub", u - s, generic::splat_sub(a, s));
                        check("splat_mul", u * s, generic::splat_mul(a, s));
                        check("splat_div", u / s, generic::splat_div(a, s));
                        check("splat_rsub", s - u, generic::splat_rsub(a, s));
                        check("splat_rdiv", s / u, generic::splat_rdiv(a, s));
                    });
                }

                #[test]
                fn elementwise() {
                    rounds(|rng| {
                        let (a, b, c) = (array::<N>(rng), array::<N>(rng), array::<N>(rng));
                        let (u, v, w) = (Vector::from(a), Vector::from(b), Vector::from(c));
                        let (lo, hi) = (generic::min(b, c), generic::max(b, c));
                        let (vlo, vhi) = (Vector::from(lo), Vector::from(hi));

                        check("abs", Sign::abs(u), generic::abs(a));
                        check("sign", Sign::sign(u), generic::sign(a));
                        check("min", MinMax::min(u, v), generic::min(a, b));
                        check("max", MinMax::max(u, v), generic::max(a, b));
                        check("clamp", MinMax::clamp(u, vlo, vhi), generic::clamp(a, lo, hi));
                        check("round", ew::round(u), generic::round(a));
                        check("floor", ew::floor(u), generic::floor(a));
                        check("ceil", ew::ceil(u), generic::ceil(a));
                        check("modulo", ew::modulo(u, v), generic::modulo(a, b));
                        check("dirac", ew::dirac(w, u), generic::dirac(c, a));
                        check("step", ew::step(v, u), generic::step(b, a));
                        check(
                            "smoothstep",
                            ew::smoothstep(vlo, vhi, u),
                            generic::smoothstep(lo, hi, a),
                        );
                        check("lerp", ew::lerp(v, w, u), generic::lerp(b, c, a));
                        check("radians", ew::radians(u), generic::radians(a));
                        check("degrees", ew::degrees(u), generic::degrees(a));
                    });
                }

                #[test]
                fn products() {
                    rounds(|rng| {
                        let (a, b) = (array::<N>(rng), array::<N>(rng));
                        let (m, n) = (rows::<N>(rng), rows::<N>(rng));
                        let (u, v) = (Vector::from(a), Vector::from(b));
                        let (p, q) = (Matrix::from(m), Matrix::from(n));

                        check("dot", [u.dot(v)], [generic::dot(a, b)]);
                        check("mat_vec", p.dot(u), generic::mat_vec(m, a));
                        check("mat_mat", p.dot(q).as_slice(), generic::mat_mat(m, n).concat_rows());
                        check(
                            "transpose",
                            p.transpose().as_slice(),
                            generic::transpose(m).concat_rows(),
                        );
                    });
                }

                #[test]
                fn inverses() {
                    rounds(|rng| {
                        let m = rows::<N>(rng);
                        let p = Matrix::from(m);

                        check("determinant", [p.determinant()], [generic::$det(m)]);
                        check(
                            "inverse",
                            p.inverse().as_slice(),
                            generic::$inv(m).concat_rows(),
                        );
                    });
                }
            }
        )+
    };
}

parity! {
    dim2: 2 => determinant2, inverse2;
    dim3: 3 => determinant3, inverse3;
    dim4: 4 => determinant4, inverse4;
}

/// Flattens a row-major matrix.
trait ConcatRows<const M: usize> {
    fn concat_rows(self) -> [f64; M];
}

macro_rules! concat_rows {
    ($($n:literal => $m:literal),+) => {
        $(
            impl ConcatRows<$m> for [[f64; $n]; $n] {
                fn concat_rows(self) -> [f64; $m] {
                    std::array::from_fn(|i| self[i / $n][i % $n])
                }
            }
        )+
    };
}

concat_rows!(2 => 4, 3 => 9, 4 => 16);

#[test]
fn cross_products() {
    rounds(|rng| {
        let (a, b) = (array::<3>(rng), array::<3>(rng));
        let (u, v) = (Vector::from(a), Vector::from(b));
        check("cross", u.cross(v), generic::cross(a, b));
    });
}

#[test]
fn singular_literals() {
    let rank_one = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [-1.0, -2.0, -3.0]];
    let p = Matrix::from(rank_one);
    assert_eq!(p.determinant(), 0.0);
    assert_eq!(generic::determinant3(rank_one), 0.0);
    assert_eq!(p.inverse(), Matrix::<f64, 3>::ZERO);
    assert_eq!(generic::inverse3(rank_one), [[0.0; 3]; 3]);

    let nan = [[f64::NAN, 1.0], [0.0, 1.0]];
    assert!(Matrix::from(nan).determinant().is_nan());
    assert!(Matrix::from(nan).inverse().as_slice().iter().all(|x| x.is_nan()));
    assert!(generic::inverse2(nan).concat_rows().iter().all(|x| x.is_nan()));
}
