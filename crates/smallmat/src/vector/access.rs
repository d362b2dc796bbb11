//! Named element access.

use super::Vector;

macro_rules! named_elements {
    ($dim:literal: $($name:ident / $name_mut:ident => $index:literal),+) => {
        impl<T: Copy> Vector<T, $dim> {
            $(
                #[doc = concat!("Returns element ", stringify!($index), " (`", stringify!($name), "`).")]
                #[inline]
                pub fn $name(&self) -> T {
                    self.0[$index]
                }
            )+
        }

        impl<T> Vector<T, $dim> {
            $(
                #[doc = concat!("Returns a mutable reference to element ", stringify!($index), " (`", stringify!($name), "`).")]
                #[inline]
                pub fn $name_mut(&mut self) -> &mut T {
                    &mut self.0[$index]
                }
            )+
        }
    };
}

named_elements!(2: x / x_mut => 0, y / y_mut => 1);
named_elements!(3: x / x_mut => 0, y / y_mut => 1, z / z_mut => 2);
named_elements!(4: x / x_mut => 0, y / y_mut => 1, z / z_mut => 2, w / w_mut => 3);

#[cfg(test)]
mod tests {
    use crate::{vec2, Vec3f, Vec4f};

    #[test]
    fn access() {
        assert_eq!(Vec3f::X.x(), 1.0);
        assert_eq!(Vec3f::X[0], 1.0);
        assert_eq!(Vec3f::X[1], 0.0);
        assert_eq!(Vec3f::X[2], 0.0);
        assert_eq!(Vec3f::X.y(), 0.0);
        assert_eq!(Vec3f::Y.y(), 1.0);
        assert_eq!(Vec3f::Y.z(), 0.0);
        assert_eq!(Vec4f::W.w(), 1.0);

        let mut v = vec2(0, 1);
        assert_eq!(v.x(), 0);
        assert_eq!(v.y(), 1);

        *v.x_mut() = 777;
        assert_eq!(v.x(), 777);
        assert_eq!(v[0], 777);
        assert_eq!(v.as_slice(), &[777, 1]);

        v[1] = 9;
        assert_eq!(v.y(), 9);
        assert_eq!(v.as_array(), &[777, 9]);
    }
}
