//! Affine and projective 4x4 transforms.
//!
//! All matrices here act on column vectors (`m.dot(v)`) in a right-handed coordinate system, and
//! the projections map view-space depth to an OpenGL-style `[-1, 1]` NDC range. Angles are in
//! radians.
//!
//! Every constructor has a [`Mat4`] method of the same name that applies the transform *after* an
//! existing one, so `m.translate(t)` is `translate(t).dot(m)`:
//!
//! ```
//! # use smallmat::*;
//! use smallmat::transform::{scale, translate};
//!
//! let m = Mat4d::IDENTITY.scale(vec3(2.0, 2.0, 2.0)).translate(vec3(1.0, 0.0, 0.0));
//! assert_eq!(m, translate(vec3(1.0, 0.0, 0.0)).dot(scale(vec3(2.0, 2.0, 2.0))));
//! assert_eq!(m.dot(vec4(1.0, 1.0, 1.0, 1.0)), vec4(3.0, 2.0, 2.0, 1.0));
//! ```

use crate::{fuzzy::iseq, Dot, Float, Mat3, Mat4, Matrix, Sign, Vec3};

/// Places a 3x3 linear map in the upper left of an otherwise identity 4x4 matrix.
fn embed<T: Float>(m: Mat3<T>) -> Mat4<T> {
    Matrix::from_fn(|row, col| match (row, col) {
        (0..=2, 0..=2) => m[(row, col)],
        _ if row == col => T::ONE,
        _ => T::ZERO,
    })
}

/// The matrix `K` such that `K.dot(v) == k.cross(v)`.
fn cross_matrix<T: Float>(k: Vec3<T>) -> Mat3<T> {
    let [x, y, z] = k.into_array();
    let o = T::ZERO;

    #[rustfmt::skip]
    let k = Matrix::from_rows([
        [ o, -z,  y],
        [ z,  o, -x],
        [-y,  x,  o],
    ]);
    k
}

/// The outer product `a * bᵀ`.
fn outer<T: Float>(a: Vec3<T>, b: Vec3<T>) -> Mat3<T> {
    Matrix::from_fn(|row, col| a[row] * b[col])
}

/// Returns a unit vector orthogonal to `v`, using the coordinate axis `v` is least aligned with.
fn orthogonal<T: Float>(v: Vec3<T>) -> Vec3<T> {
    let [x, y, z] = v.into_array().map(Sign::abs);
    let axis = if x <= y && x <= z {
        Vec3::X
    } else if y <= z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    v.cross(axis).normalize()
}

/// Moves points by `t`.
pub fn translate<T: Float>(t: Vec3<T>) -> Mat4<T> {
    let mut m = Mat4::IDENTITY;
    for (row, t) in t.into_array().into_iter().enumerate() {
        m[(row, 3)] = t;
    }
    m
}

/// Scales each axis by the matching element of `s`.
pub fn scale<T: Float>(s: Vec3<T>) -> Mat4<T> {
    Matrix::from_diagonal(s.extend(T::ONE))
}

/// Rotates counterclockwise by `angle` around `axis` (Rodrigues' rotation formula).
///
/// `axis` does not need to be normalized, but must not be the zero vector.
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// use smallmat::transform::rotate;
///
/// let quarter = rotate(Vec3d::Z, std::f64::consts::FRAC_PI_2);
/// assert_fuzzy_eq!(quarter.dot(Vec4d::X), Vec4d::Y);
/// ```
pub fn rotate<T: Float>(axis: Vec3<T>, angle: T) -> Mat4<T> {
    let k = cross_matrix(axis.normalize());
    embed(Mat3::IDENTITY + k * angle.sin() + k.dot(k) * (T::ONE - angle.cos()))
}

/// Returns the rotation that turns direction `from` into direction `to`.
///
/// If the directions already agree, this is the identity. If they are opposite, the rotation is
/// a half turn around an arbitrary axis orthogonal to `from`.
///
/// # Examples
///
/// ```
/// # use smallmat::*;
/// use smallmat::transform::align;
///
/// let from = vec3(1.0, 1.0, 0.0);
/// let to = vec3(0.0, 0.0, -3.0);
/// let m = align(from, to);
/// assert_fuzzy_eq!(m.dot(from.normalize().extend(0.0)), to.normalize().extend(0.0));
///
/// assert_eq!(align(from, from * 2.0), Mat4d::IDENTITY);
/// ```
pub fn align<T: Float>(from: Vec3<T>, to: Vec3<T>) -> Mat4<T> {
    let (from, to) = (from.normalize(), to.normalize());
    let cos = from.dot(to);
    if iseq(cos, T::ONE) {
        return Mat4::IDENTITY;
    }
    if iseq(cos, -T::ONE) {
        let axis = orthogonal(from);
        return embed(outer(axis, axis) * T::from_u8(2) - Mat3::IDENTITY);
    }

    // Rodrigues with an unnormalized axis: `|k| = sin`, so `(1 - cos) / sin² = 1 / (1 + cos)`.
    let k = cross_matrix(from.cross(to));
    embed(Mat3::IDENTITY + k + k.dot(k) / (T::ONE + cos))
}

/// A right-handed view matrix for a camera at `eye` looking at `center`.
///
/// The camera looks down its negative Z axis, with `up` projected onto its Y axis.
pub fn lookat<T: Float>(eye: Vec3<T>, center: Vec3<T>, up: Vec3<T>) -> Mat4<T> {
    let f = (center - eye).normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);
    let (o, l) = (T::ZERO, T::ONE);

    #[rustfmt::skip]
    let view = Matrix::from_rows([
        [ s.x(),  s.y(),  s.z(), -s.dot(eye)],
        [ u.x(),  u.y(),  u.z(), -u.dot(eye)],
        [-f.x(), -f.y(), -f.z(),  f.dot(eye)],
        [ o,      o,      o,      l],
    ]);
    view
}

/// A perspective projection with a vertical field of view of `fovy` radians.
///
/// Points at depth `-near` map to NDC `z = -1`, points at `-far` map to `z = 1`.
pub fn perspective<T: Float>(fovy: T, aspect: T, near: T, far: T) -> Mat4<T> {
    let (o, l, two) = (T::ZERO, T::ONE, T::from_u8(2));
    let f = l / (fovy / two).tan();
    let depth = near - far;

    #[rustfmt::skip]
    let proj = Matrix::from_rows([
        [f / aspect, o, o,                   o],
        [o,          f, o,                   o],
        [o,          o, (far + near) / depth, two * far * near / depth],
        [o,          o, -l,                  o],
    ]);
    proj
}

/// An orthographic projection of the given view volume onto the `[-1, 1]` cube.
pub fn ortho<T: Float>(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Mat4<T> {
    let (o, l, two) = (T::ZERO, T::ONE, T::from_u8(2));
    let (w, h, d) = (right - left, top - bottom, far - near);

    #[rustfmt::skip]
    let proj = Matrix::from_rows([
        [two / w, o,       o,        -(right + left) / w],
        [o,       two / h, o,        -(top + bottom) / h],
        [o,       o,       -two / d, -(far + near) / d],
        [o,       o,       o,        l],
    ]);
    proj
}

impl<T: Float> Matrix<T, 4> {
    /// Applies [`translate`] after `self`.
    pub fn translate(self, t: Vec3<T>) -> Self {
        translate(t).dot(self)
    }

    /// Applies [`scale`] after `self`.
    pub fn scale(self, s: Vec3<T>) -> Self {
        scale(s).dot(self)
    }

    /// Applies [`rotate`] after `self`.
    pub fn rotate(self, axis: Vec3<T>, angle: T) -> Self {
        rotate(axis, angle).dot(self)
    }

    /// Applies [`align`] after `self`.
    pub fn align(self, from: Vec3<T>, to: Vec3<T>) -> Self {
        align(from, to).dot(self)
    }

    /// Applies [`lookat`] after `self`.
    pub fn lookat(self, eye: Vec3<T>, center: Vec3<T>, up: Vec3<T>) -> Self {
        lookat(eye, center, up).dot(self)
    }

    /// Applies [`perspective`] after `self`.
    pub fn perspective(self, fovy: T, aspect: T, near: T, far: T) -> Self {
        perspective(fovy, aspect, near, far).dot(self)
    }

    /// Applies [`ortho`] after `self`.
    pub fn ortho(self, left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        ortho(left, right, bottom, top, near, far).dot(self)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{assert_fuzzy_eq, vec3, vec4, Mat4d, Vec3d, Vec4d};

    use super::*;

    /// Applies `m` to a point and performs the perspective divide.
    fn project(m: Mat4d, p: Vec3d) -> Vec3d {
        let clip = m.dot(p.extend(1.0));
        clip.truncate() / clip.w()
    }

    #[test]
    fn translate_scale() {
        let p = vec4(1.0, 2.0, 3.0, 1.0);
        assert_eq!(translate(vec3(1.0, -1.0, 0.5)).dot(p), vec4(2.0, 1.0, 3.5, 1.0));
        assert_eq!(scale(vec3(2.0, 3.0, -1.0)).dot(p), vec4(2.0, 6.0, -3.0, 1.0));

        // Directions are unaffected by translation.
        let dir = vec4(1.0, 0.0, 0.0, 0.0);
        assert_eq!(translate(vec3(5.0, 5.0, 5.0)).dot(dir), dir);
    }

    #[test]
    fn rotations() {
        let m = rotate(Vec3d::Z, FRAC_PI_2);
        assert_fuzzy_eq!(m.dot(Vec4d::X), Vec4d::Y);
        assert_fuzzy_eq!(m.dot(Vec4d::Y), -Vec4d::X);
        assert_fuzzy_eq!(m.determinant(), 1.0);

        // The axis is normalized first and is left in place.
        let axis = vec3(1.0, 1.0, 1.0);
        let m = rotate(axis * 3.0, 2.0 * PI / 3.0);
        assert_fuzzy_eq!(m.dot(axis.extend(0.0)), axis.extend(0.0));
        assert_fuzzy_eq!(m.dot(Vec4d::X), Vec4d::Y);

        assert_fuzzy_eq!(rotate(Vec3d::X, 0.0), Mat4d::IDENTITY);
    }

    #[test]
    fn alignment() {
        let m = align(Vec3d::X, Vec3d::Y);
        assert_fuzzy_eq!(m.dot(Vec4d::X), Vec4d::Y);
        assert_fuzzy_eq!(m, rotate(Vec3d::Z, FRAC_PI_2));

        let v = vec3(0.3, -2.0, 1.0);
        assert_eq!(align(v, v), Mat4d::IDENTITY);

        // Antiparallel: half turn, still a proper rotation.
        let m = align(v, -v);
        assert_fuzzy_eq!(m.dot(v.extend(0.0)), -v.extend(0.0));
        assert_fuzzy_eq!(m.determinant(), 1.0);
        assert_fuzzy_eq!(m.dot(m.transpose()), Mat4d::IDENTITY);
    }

    #[test]
    fn view() {
        let eye = vec3(0.0, 0.0, 5.0);
        let m = lookat(eye, Vec3d::ZERO, Vec3d::Y);
        assert_fuzzy_eq!(m.dot(eye.extend(1.0)), Vec4d::W);
        assert_fuzzy_eq!(m.dot(Vec4d::W), vec4(0.0, 0.0, -5.0, 1.0));
        assert_fuzzy_eq!(m.dot(vec4(0.0, 1.0, 0.0, 1.0)), vec4(0.0, 1.0, -5.0, 1.0));
    }

    #[test]
    fn projections() {
        let (near, far) = (0.5, 20.0);
        let m = perspective(FRAC_PI_2, 2.0, near, far);
        assert_fuzzy_eq!(project(m, vec3(0.0, 0.0, -near)).z(), -1.0);
        assert_fuzzy_eq!(project(m, vec3(0.0, 0.0, -far)).z(), 1.0);
        // 90° vertical FOV: the top edge of the frustum is at `y == -z`.
        assert_fuzzy_eq!(project(m, vec3(0.0, 3.0, -3.0)).y(), 1.0);
        assert_fuzzy_eq!(project(m, vec3(6.0, 0.0, -3.0)).x(), 1.0);

        let m = ortho(-2.0, 2.0, -1.0, 1.0, 1.0, 10.0);
        assert_fuzzy_eq!(project(m, vec3(-2.0, -1.0, -1.0)), vec3(-1.0, -1.0, -1.0));
        assert_fuzzy_eq!(project(m, vec3(2.0, 1.0, -10.0)), vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn premultiply() {
        let base = rotate(vec3(0.0, 1.0, 1.0), 0.7);
        let t = vec3(1.0, 2.0, 3.0);
        assert_eq!(base.translate(t), translate(t).dot(base));
        assert_eq!(base.scale(t), scale(t).dot(base));
        assert_eq!(base.rotate(t, 0.1), rotate(t, 0.1).dot(base));
        assert_eq!(base.align(t, -t), align(t, -t).dot(base));
        assert_eq!(
            base.perspective(1.0, 1.5, 0.1, 100.0),
            perspective(1.0, 1.5, 0.1, 100.0).dot(base)
        );
        assert_eq!(
            Mat4d::IDENTITY.lookat(t, Vec3d::ZERO, Vec3d::Z),
            lookat(t, Vec3d::ZERO, Vec3d::Z)
        );
        assert_eq!(
            Mat4d::IDENTITY.ortho(0.0, 1.0, 0.0, 1.0, 0.0, 1.0),
            ortho(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)
        );
    }
}
