//! Named element access.
//!
//! Element `(i, j)` is named after the axis letters of row `i` and column `j`, so `xy` is row 0,
//! column 1.

use super::Matrix;

macro_rules! named_elements {
    ($dim:literal: $($name:ident / $name_mut:ident => ($row:literal, $col:literal)),+ $(,)?) => {
        impl<T: Copy> Matrix<T, $dim> {
            $(
                #[doc = concat!("Returns the element at (", stringify!($row), ", ", stringify!($col), ").")]
                #[inline]
                pub fn $name(&self) -> T {
                    self.0[$row][$col]
                }
            )+
        }

        impl<T> Matrix<T, $dim> {
            $(
                #[doc = concat!("Returns a mutable reference to the element at (", stringify!($row), ", ", stringify!($col), ").")]
                #[inline]
                pub fn $name_mut(&mut self) -> &mut T {
                    &mut self.0[$row][$col]
                }
            )+
        }
    };
}

named_elements!(2:
    xx / xx_mut => (0, 0), xy / xy_mut => (0, 1),
    yx / yx_mut => (1, 0), yy / yy_mut => (1, 1),
);
named_elements!(3:
    xx / xx_mut => (0, 0), xy / xy_mut => (0, 1), xz / xz_mut => (0, 2),
    yx / yx_mut => (1, 0), yy / yy_mut => (1, 1), yz / yz_mut => (1, 2),
    zx / zx_mut => (2, 0), zy / zy_mut => (2, 1), zz / zz_mut => (2, 2),
);
named_elements!(4:
    xx / xx_mut => (0, 0), xy / xy_mut => (0, 1), xz / xz_mut => (0, 2), xw / xw_mut => (0, 3),
    yx / yx_mut => (1, 0), yy / yy_mut => (1, 1), yz / yz_mut => (1, 2), yw / yw_mut => (1, 3),
    zx / zx_mut => (2, 0), zy / zy_mut => (2, 1), zz / zz_mut => (2, 2), zw / zw_mut => (2, 3),
    wx / wx_mut => (3, 0), wy / wy_mut => (3, 1), wz / wz_mut => (3, 2), ww / ww_mut => (3, 3),
);

#[cfg(test)]
mod tests {
    use crate::Matrix;

    #[test]
    fn names_alias_positions() {
        let mut m = Matrix::<usize, 4>::from_fn(|row, col| row * 10 + col);
        assert_eq!(m.xx(), 0);
        assert_eq!(m.xw(), 3);
        assert_eq!(m.zy(), 21);
        assert_eq!(m.wz(), 32);

        *m.yz_mut() = 777;
        assert_eq!(m[(1, 2)], 777);
        assert_eq!(m.as_slice()[4 + 2], 777);
    }
}
