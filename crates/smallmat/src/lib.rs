//! Fixed-size vector and matrix algebra for 2, 3 and 4 dimensions.
//!
//! # Overview
//!
//! [`Vector`] and [`Matrix`] are thin wrappers around arrays. Arithmetic operators work
//! element-wise for every integer and floating-point type; actual linear algebra
//! ([`Dot`], [`Matrix::determinant`], [`Matrix::inverse`], ...) is only available for [`f32`] and
//! [`f64`] elements.
//!
//! ```
//! use smallmat::*;
//!
//! let a = vec3(1.0, 1.0, 1.0);
//! let b = vec3(-1.0, 1.0, 1.0);
//! assert_eq!(a.dot(b), 1.0);
//! assert_eq!(a.norm(), 3.0f64.sqrt());
//! assert_eq!(a.cross(b), vec3(0.0, -2.0, 2.0));
//!
//! let m = Matrix::from_rows([
//!     [2.0, 0.0],
//!     [1.0, 1.0],
//! ]);
//! assert_eq!(m.inverse().dot(m), Mat2d::IDENTITY);
//! ```
//!
//! # Kernels
//!
//! Every operation is implemented by a per-element-type kernel. The portable kernels in
//! [`generic`] are used by default. For [`f64`], an AVX implementation is compiled in instead when
//! the `simd` feature is enabled (the default) and the build targets `x86_64` with the `avx`
//! target feature enabled. The selection happens entirely at compile time; [`Backend::active`]
//! reports which one was chosen.
//!
//! # Goals & Non-Goals
//!
//! - Only support dimensions 2, 3 and 4, and square matrices. Anything larger is better served by
//!   a general-purpose linear algebra library.
//! - Use a single, row-major, unpadded data layout. Vectors and matrices are [`bytemuck::Pod`]
//!   when their elements are, so slices of them can be reinterpreted as slices of scalars.
//! - Never fail at runtime. Degenerate inputs produce well-defined fallback values (a singular
//!   matrix inverts to the zero matrix), and misuse like computing the determinant of an integer
//!   matrix is a compile-time error.
//! - Compare floating-point results with the tolerances in [`fuzzy`] rather than exactly.

pub mod algebra;
#[cfg(avx_kernels)]
mod avx;
mod backend;
pub mod elementwise;
pub mod fuzzy;
pub mod generic;
mod kernels;
mod matrix;
mod onb;
mod traits;
pub mod transform;
mod vector;

pub use algebra::Dot;
pub use backend::Backend;
pub use elementwise::Elementwise;
pub use fuzzy::FuzzyEq;
pub use matrix::*;
pub use onb::Onb;
pub use traits::*;
pub use vector::*;

use log::LevelFilter;

#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    let installed = env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("smallmat kernels: {}", Backend::active());
    }
}

/// Initializes logging to *stderr*.
///
/// The calling crate and smallmat will log at *debug* level, unless overridden by `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
