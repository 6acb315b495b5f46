//! 3D transform support for layer geometry.
//!
//! `Transform3D` is a 4×4 homogeneous transform covering translation,
//! anisotropic scale, axis-angle rotation, concatenation and inversion, plus
//! projection down to the 2D affine form used by flat layers.
//!
//! The matrix is row-major with the row-vector convention: a point
//! `v = [x y z 1]` maps through `v' = v · M`, so translation lives in the
//! fourth row.
//!
//! Degenerate geometric inputs never fail; they fall back to defined values:
//! a zero-length rotation axis produces the identity, and inverting a
//! singular matrix returns the matrix unchanged.

use serde::{Deserialize, Serialize};

use crate::affine::Affine2D;

/// Below this magnitude a projected w component is treated as degenerate and
/// the perspective divide is skipped.
const PERSPECTIVE_EPSILON: f64 = 1e-12;

/// A 4×4 homogeneous transform.
///
/// Stored row-major:
/// ```text
/// | m11 m12 m13 m14 |
/// | m21 m22 m23 m24 |
/// | m31 m32 m33 m34 |
/// | tx  ty  tz  m44 |
/// ```
///
/// Plain value semantics: `Copy`, independently owned by each holder.
/// Equality is exact component-wise comparison over all 16 entries, with no
/// epsilon. Transforms built through different arithmetic paths may compare
/// unequal even when geometrically equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Matrix entries, `m[row][column]`.
    pub m: [[f64; 4]; 4],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create a translation by `(tx, ty, tz)`.
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [tx, ty, tz, 1.0],
            ],
        }
    }

    /// Create a scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            m: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Create a rotation of `angle` radians about the axis `(x, y, z)`.
    ///
    /// The axis is normalized internally. A zero-length axis yields the
    /// identity transform.
    pub fn rotation(angle: f64, x: f64, y: f64, z: f64) -> Self {
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        let (x, y, z) = (x / len, y / len, z / len);

        let cos = angle.cos();
        let sin = angle.sin();
        let t = 1.0 - cos;

        // Rodrigues rotation, transposed for the row-vector convention.
        Self {
            m: [
                [t * x * x + cos, t * x * y + sin * z, t * x * z - sin * y, 0.0],
                [t * x * y - sin * z, t * y * y + cos, t * y * z + sin * x, 0.0],
                [t * x * z + sin * y, t * y * z - sin * x, t * z * z + cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Check whether this is exactly the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Concatenate: the matrix product `self × other`.
    ///
    /// Under the row-vector convention the result applies `self` first, then
    /// `other`. `Transform3D::IDENTITY.concatenating(t)` equals `t` exactly.
    pub fn concatenating(self, other: Self) -> Self {
        let mut m = [[0.0f64; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        Self { m }
    }

    /// Concatenate in place: `self = self × other`.
    pub fn concatenate(&mut self, other: Self) {
        *self = self.concatenating(other);
    }

    /// Return `self` translated by `(tx, ty, tz)`.
    ///
    /// The translation applies before the receiver:
    /// `t.translated_by(..)` equals `translation(..) × t`.
    pub fn translated_by(self, tx: f64, ty: f64, tz: f64) -> Self {
        Self::translation(tx, ty, tz).concatenating(self)
    }

    /// Return `self` scaled by `(sx, sy, sz)`; the scale applies before the
    /// receiver.
    pub fn scaled_by(self, sx: f64, sy: f64, sz: f64) -> Self {
        Self::scale(sx, sy, sz).concatenating(self)
    }

    /// Return `self` rotated by `angle` radians about `(x, y, z)`; the
    /// rotation applies before the receiver.
    ///
    /// A zero-length axis leaves the transform unchanged.
    pub fn rotated_by(self, angle: f64, x: f64, y: f64, z: f64) -> Self {
        Self::rotation(angle, x, y, z).concatenating(self)
    }

    /// Translate in place by `(tx, ty, tz)`.
    pub fn translate_by(&mut self, tx: f64, ty: f64, tz: f64) {
        *self = self.translated_by(tx, ty, tz);
    }

    /// Scale in place by `(sx, sy, sz)`.
    pub fn scale_by(&mut self, sx: f64, sy: f64, sz: f64) {
        *self = self.scaled_by(sx, sy, sz);
    }

    /// Rotate in place by `angle` radians about `(x, y, z)`.
    pub fn rotate_by(&mut self, angle: f64, x: f64, y: f64, z: f64) {
        *self = self.rotated_by(angle, x, y, z);
    }

    /// Calculate the determinant.
    pub fn determinant(&self) -> f64 {
        let det3 = |a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64, h: f64, i: f64| {
            a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
        };
        let [r0, r1, r2, r3] = self.m;
        r0[0] * det3(r1[1], r1[2], r1[3], r2[1], r2[2], r2[3], r3[1], r3[2], r3[3])
            - r0[1] * det3(r1[0], r1[2], r1[3], r2[0], r2[2], r2[3], r3[0], r3[2], r3[3])
            + r0[2] * det3(r1[0], r1[1], r1[3], r2[0], r2[1], r2[3], r3[0], r3[1], r3[3])
            - r0[3] * det3(r1[0], r1[1], r1[2], r2[0], r2[1], r2[2], r3[0], r3[1], r3[2])
    }

    /// Return the inverse transform.
    ///
    /// If the matrix has no inverse, the original transform is returned
    /// unchanged.
    pub fn inverted(self) -> Self {
        // Gauss-Jordan elimination carrying the identity alongside. Pivots
        // stay on the diagonal unless the diagonal entry is zero, so the
        // inverses of pure translations and scales come out exact.
        let mut a = self.m;
        let mut inv = Self::IDENTITY.m;

        for col in 0..4 {
            if a[col][col] == 0.0 {
                let Some(pivot) = ((col + 1)..4).find(|&row| a[row][col] != 0.0) else {
                    return self;
                };
                a.swap(pivot, col);
                inv.swap(pivot, col);
            }
            let p = a[col][col];
            if !p.is_finite() {
                return self;
            }

            let inv_p = 1.0 / p;
            for j in 0..4 {
                a[col][j] *= inv_p;
                inv[col][j] *= inv_p;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..4 {
                    a[row][j] -= factor * a[col][j];
                    inv[row][j] -= factor * inv[col][j];
                }
            }
        }

        Self { m: inv }
    }

    /// Invert in place. A singular matrix is left unchanged.
    pub fn invert(&mut self) {
        *self = self.inverted();
    }

    /// Apply the transform to a point, performing the perspective divide when
    /// the projected w component permits.
    pub fn apply_point(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let m = &self.m;
        let tx = x * m[0][0] + y * m[1][0] + z * m[2][0] + m[3][0];
        let ty = x * m[0][1] + y * m[1][1] + z * m[2][1] + m[3][1];
        let tz = x * m[0][2] + y * m[1][2] + z * m[2][2] + m[3][2];
        let tw = x * m[0][3] + y * m[1][3] + z * m[2][3] + m[3][3];
        if tw.abs() < PERSPECTIVE_EPSILON {
            (tx, ty, tz)
        } else {
            (tx / tw, ty / tw, tz / tw)
        }
    }

    /// Check whether the transform can be represented exactly as a 2D affine
    /// transform.
    ///
    /// True iff there are no perspective terms and the z row and column match
    /// the identity: no z mixing and no z translation. `translation(0, 0, 1)`
    /// is therefore not affine.
    pub fn is_affine(&self) -> bool {
        let m = &self.m;
        m[0][2] == 0.0
            && m[0][3] == 0.0
            && m[1][2] == 0.0
            && m[1][3] == 0.0
            && m[2][0] == 0.0
            && m[2][1] == 0.0
            && m[2][2] == 1.0
            && m[2][3] == 0.0
            && m[3][2] == 0.0
            && m[3][3] == 1.0
    }

    /// Project to the equivalent 2D affine transform by dropping the z terms.
    ///
    /// The result is only meaningful when [`is_affine`](Self::is_affine)
    /// holds; callers are expected to check first.
    pub fn affine_transform(&self) -> Affine2D {
        Affine2D {
            a: self.m[0][0],
            b: self.m[0][1],
            c: self.m[1][0],
            d: self.m[1][1],
            tx: self.m[3][0],
            ty: self.m[3][1],
        }
    }
}

static_assertions::assert_impl_all!(Transform3D: Copy, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const X: f64 = 5.0;
    const Y: f64 = 10.0;
    const Z: f64 = 20.0;
    const ANGLE: f64 = PI / 3.0;

    fn translation() -> Transform3D {
        Transform3D::translation(X, Y, Z)
    }

    fn scale() -> Transform3D {
        Transform3D::scale(X, Y, Z)
    }

    fn rotation() -> Transform3D {
        Transform3D::rotation(ANGLE, X, Y, Z)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn approx_eq_transform(a: Transform3D, b: Transform3D) -> bool {
        a.m.iter()
            .flatten()
            .zip(b.m.iter().flatten())
            .all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn identity_is_identity() {
        assert!(Transform3D::IDENTITY.is_identity());
        assert!(Transform3D::default().is_identity());
        assert!(!translation().is_identity());
        assert!(!scale().is_identity());
        assert!(!rotation().is_identity());
    }

    #[test]
    fn constructors_match_composed_identity() {
        assert_eq!(Transform3D::IDENTITY.translated_by(X, Y, Z), translation());
        assert_eq!(Transform3D::IDENTITY.scaled_by(X, Y, Z), scale());
        assert_eq!(Transform3D::IDENTITY.rotated_by(ANGLE, X, Y, Z), rotation());
    }

    #[test]
    fn concat_left_identity() {
        assert_eq!(Transform3D::IDENTITY.concatenating(translation()), translation());
        assert_eq!(Transform3D::IDENTITY.concatenating(scale()), scale());
        assert_eq!(Transform3D::IDENTITY.concatenating(rotation()), rotation());
    }

    #[test]
    fn mutating_variants_agree() {
        let mut t = Transform3D::IDENTITY;
        t.translate_by(X, Y, Z);
        assert_eq!(t, translation());

        let mut t = Transform3D::IDENTITY;
        t.scale_by(X, Y, Z);
        assert_eq!(t, scale());

        let mut t = Transform3D::IDENTITY;
        t.rotate_by(ANGLE, X, Y, Z);
        assert_eq!(t, rotation());

        let mut t = Transform3D::IDENTITY;
        t.concatenate(rotation());
        assert_eq!(t, rotation());

        let mut t = translation();
        t.invert();
        assert_eq!(t, translation().inverted());
    }

    #[test]
    fn invert_identity() {
        assert_eq!(Transform3D::IDENTITY.inverted(), Transform3D::IDENTITY);

        let mut t = Transform3D::IDENTITY;
        t.invert();
        assert_eq!(t, Transform3D::IDENTITY);
    }

    #[test]
    fn invert_translation() {
        assert_eq!(translation().inverted(), Transform3D::translation(-X, -Y, -Z));
    }

    #[test]
    fn invert_scale() {
        assert_eq!(
            scale().inverted(),
            Transform3D::scale(1.0 / X, 1.0 / Y, 1.0 / Z)
        );
    }

    #[test]
    fn invert_rotation_roundtrip() {
        let r = rotation();
        let roundtrip = r.concatenating(r.inverted());
        assert!(approx_eq_transform(roundtrip, Transform3D::IDENTITY));
    }

    #[test]
    fn invert_singular_returns_original() {
        let flat = Transform3D::scale(1.0, 1.0, 0.0);
        assert_eq!(flat.inverted(), flat);

        let mut t = flat;
        t.invert();
        assert_eq!(t, flat);
    }

    #[test]
    fn rotation_about_zero_axis_is_identity() {
        assert!(Transform3D::rotation(ANGLE, 0.0, 0.0, 0.0).is_identity());
        assert_eq!(translation().rotated_by(ANGLE, 0.0, 0.0, 0.0), translation());
    }

    #[test]
    fn rotation_is_not_identity() {
        assert!(!rotation().is_identity());
    }

    #[test]
    fn rotation_maps_points() {
        // Quarter turn about z takes +x to +y.
        let r = Transform3D::rotation(PI / 2.0, 0.0, 0.0, 1.0);
        let (x, y, z) = r.apply_point(1.0, 0.0, 0.0);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
        assert!(approx_eq(z, 0.0));
    }

    #[test]
    fn composition_order() {
        // scaled_by applies the scale before the receiver's translation.
        let t = Transform3D::IDENTITY.translated_by(X, Y, Z).scaled_by(2.0, 2.0, 2.0);
        let (x, y, z) = t.apply_point(1.0, 1.0, 1.0);
        assert!(approx_eq(x, 2.0 + X));
        assert!(approx_eq(y, 2.0 + Y));
        assert!(approx_eq(z, 2.0 + Z));
    }

    #[test]
    fn determinant_of_elementary_transforms() {
        assert!(approx_eq(Transform3D::IDENTITY.determinant(), 1.0));
        assert!(approx_eq(translation().determinant(), 1.0));
        assert!(approx_eq(scale().determinant(), X * Y * Z));
        assert!(approx_eq(rotation().determinant(), 1.0));
        assert!(approx_eq(Transform3D::scale(1.0, 1.0, 0.0).determinant(), 0.0));
    }

    #[test]
    fn affine_check() {
        assert!(Transform3D::IDENTITY.is_affine());
        assert!(Transform3D::translation(X, Y, 0.0).is_affine());
        assert!(!Transform3D::translation(0.0, 0.0, 1.0).is_affine());
        assert!(!rotation().is_affine());
    }

    #[test]
    fn affine_projection() {
        assert_eq!(Transform3D::IDENTITY.affine_transform(), Affine2D::IDENTITY);
        // z translation is dropped by the projection.
        assert_eq!(
            Transform3D::translation(X, Y, 1.0).affine_transform(),
            Affine2D::translation(X, Y)
        );
        assert_eq!(
            Transform3D::translation(X, Y, 0.0).affine_transform(),
            Affine2D::translation(X, Y)
        );
    }
}
