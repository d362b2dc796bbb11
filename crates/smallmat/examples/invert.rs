//! Prints the determinant and inverse of a matrix given on the command line in row-major order.
//!
//! ```text
//! cargo run --example invert -- 2 0 1 1
//! ```

use anyhow::{bail, Context};
use smallmat::{Backend, Mat2d, Mat3d, Mat4d};

macro_rules! invert {
    ($mat:ty, $n:literal, $values:expr) => {{
        let m = <$mat>::from_fn(|row, col| $values[row * $n + col]);
        println!("matrix:      {m:?}");
        println!("determinant: {}", m.determinant());
        let inverse = m.inverse();
        if inverse == <$mat>::ZERO {
            log::warn!("matrix is singular, inverse is all zeroes");
        }
        println!("inverse:     {inverse:?}");
    }};
}

fn main() -> anyhow::Result<()> {
    smallmat::init_logger!();
    Backend::log();

    let values = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<f64>()
                .with_context(|| format!("invalid matrix element '{arg}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match values.len() {
        4 => invert!(Mat2d, 2, values),
        9 => invert!(Mat3d, 3, values),
        16 => invert!(Mat4d, 4, values),
        n => bail!("usage: invert <4, 9 or 16 numbers>, got {n} numbers"),
    }

    Ok(())
}
