#![warn(missing_docs)]

//! Math types for the taperlabel outline kernel.
//!
//! Thin wrappers around nalgebra providing the 2D types used when
//! flattening a frustum: points, planar affine transforms and the
//! cylinder tolerance.

use nalgebra::{Matrix3, Vector3};

/// A point in the flattened outline plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A 3x3 homogeneous affine transformation of the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 2)] = dx;
        m[(1, 2)] = dy;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy)`.
    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        Self { matrix: m }
    }

    /// Mirror across the horizontal line `y = height / 2`.
    ///
    /// Maps `y` to `height - y`, so a shape whose bounding box is
    /// `[0, height]` keeps the same box.
    pub fn mirror_vertical(height: f64) -> Self {
        Self::translation(0.0, height).then(&Self::scale(1.0, -1.0))
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// As with matrix products, the right-hand transform is applied first.
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v.x, v.y)
    }

    /// Whether this transform reverses orientation (negative determinant).
    ///
    /// Arcs drawn through a reflecting transform change their sweep direction.
    pub fn is_reflection(&self) -> bool {
        self.matrix.fixed_view::<2, 2>(0, 0).determinant() < 0.0
    }

    /// The six affine coefficients `[a, b, c, d, e, f]` in the order used by
    /// SVG's `matrix(a b c d e f)`.
    pub fn affine_coefficients(&self) -> [f64; 6] {
        let m = &self.matrix;
        [
            m[(0, 0)],
            m[(1, 0)],
            m[(0, 1)],
            m[(1, 1)],
            m[(0, 2)],
            m[(1, 2)],
        ]
    }
}

/// Tolerance constants for label geometry.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Diameter difference below which a frustum is treated as a cylinder,
    /// in the same unit as the inputs.
    pub cylinder: f64,
}

impl Tolerance {
    /// Default label tolerance (0.001 cylinder threshold).
    pub const DEFAULT: Self = Self { cylinder: 1e-3 };

    /// Check if two diameters are close enough to describe a cylinder.
    pub fn is_cylindrical(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.cylinder
    }
}

/// Polar angle of `p` around `center`, in radians in `(-π, π]`.
pub fn polar_angle(center: &Point2, p: &Point2) -> f64 {
    let d = p - center;
    d.y.atan2(d.x)
}
