use crate::{fuzzy::iseq, Dot, Float, Mat3, Matrix, Sign, Vec3};

/// A right-handed orthonormal basis.
///
/// The three axes are unit vectors, pairwise orthogonal, and satisfy `w == u.cross(v)`. Every
/// constructor normalizes its inputs and derives the missing axes with cross products, so the
/// inputs only need to be non-zero and not parallel to each other.
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// let onb = Onb::from_w(vec3(0.0, 0.0, 2.0));
/// assert!(onb.is_orthonormal());
///
/// let p = vec3(1.0, -2.0, 0.5);
/// assert_fuzzy_eq!(onb.to_world(onb.to_local(p)), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb<T> {
    u: Vec3<T>,
    v: Vec3<T>,
    w: Vec3<T>,
}

/// A unit axis that is far from parallel to `v`.
fn helper_axis<T: Float>(v: Vec3<T>) -> Vec3<T> {
    if Sign::abs(v.x()) > T::from_u8(9) / T::from_u8(10) {
        Vec3::Y
    } else {
        Vec3::X
    }
}

impl<T: Float> Onb<T> {
    /// Builds a basis whose `w` axis points along `n`.
    pub fn from_w(n: Vec3<T>) -> Self {
        let w = n.normalize();
        let v = w.cross(helper_axis(w)).normalize();
        let u = v.cross(w);
        Self { u, v, w }
    }

    /// Builds a basis whose `u` axis points along `n`.
    pub fn from_u(n: Vec3<T>) -> Self {
        let u = n.normalize();
        let w = u.cross(helper_axis(u)).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Builds a basis with `u` along `u`, and `v` in the plane spanned by `u` and `v`.
    pub fn from_uv(u: Vec3<T>, v: Vec3<T>) -> Self {
        let u = u.normalize();
        let w = u.cross(v).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Builds a basis with `w` along `w`, and `v` in the plane spanned by `w` and `v`.
    pub fn from_wv(w: Vec3<T>, v: Vec3<T>) -> Self {
        let w = w.normalize();
        let u = v.cross(w).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    pub fn u(&self) -> Vec3<T> {
        self.u
    }

    pub fn v(&self) -> Vec3<T> {
        self.v
    }

    pub fn w(&self) -> Vec3<T> {
        self.w
    }

    /// Expresses the world-space vector `a` in this basis.
    pub fn to_local(&self, a: Vec3<T>) -> Vec3<T> {
        self.to_matrix().dot(a)
    }

    /// Converts the basis coordinates `a` back to world space.
    pub fn to_world(&self, a: Vec3<T>) -> Vec3<T> {
        self.u * a.x() + self.v * a.y() + self.w * a.z()
    }

    /// Returns the matrix with rows `u`, `v` and `w`, which maps world space to basis
    /// coordinates. Its transpose (and inverse) maps back.
    pub fn to_matrix(&self) -> Mat3<T> {
        Matrix::from_rows([self.u, self.v, self.w])
    }

    /// Checks the basis invariants with [`iseq`].
    pub fn is_orthonormal(&self) -> bool {
        let Self { u, v, w } = *self;
        let unit = [u, v, w].into_iter().all(|a| iseq(a.dot(a), T::ONE));
        let orthogonal = [(u, v), (v, w), (w, u)]
            .into_iter()
            .all(|(a, b)| iseq(a.dot(b), T::ZERO));
        let right_handed = u.cross(v).zip(w).as_array().iter().all(|&(a, b)| iseq(a, b));
        unit && orthogonal && right_handed
    }
}
