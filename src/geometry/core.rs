//! Ellipse cores: second-moment and axis parametrizations.
//!
//! ## Purpose
//!
//! This module defines the two interchangeable descriptions of an ellipse's
//! shape: the symmetric second-moment matrix ([`Quadrupole`]) used by every
//! numerical routine, and the semi-axis form ([`Axes`]) that is convenient
//! for constructing test cases and reporting shapes.
//!
//! ## Design notes
//!
//! * **Closed-form roots**: for a symmetric positive 2x2 matrix `Q` with
//!   `s = sqrt(det Q)` and `t = sqrt(trace Q + 2s)`, the principal square
//!   root is `(Q + s I) / t` and its inverse is `adj(Q + s I) / (s t)`.
//!   Both are evaluated directly instead of through an eigendecomposition.
//! * **Degenerate shapes**: [`Quadrupole::matrix_sqrt`] degrades gracefully
//!   to rank-1 and zero matrices, so convolution can accept delta-function
//!   components. [`Quadrupole::inverse_sqrt`] cannot, and reports
//!   [`SingularEllipse`](crate::primitives::errors::ShapeletError::SingularEllipse)
//!   for non-positive-definite moments.
//!
//! ## Invariants
//!
//! * `matrix_sqrt` composed with itself reproduces the quadrupole.
//! * `det(inverse_sqrt(Q)) == 1 / sqrt(det Q)` whenever `Q` is positive
//!   definite.

// Internal dependencies
use crate::geometry::transforms::LinearTransform;
use crate::primitives::errors::ShapeletError;

// ============================================================================
// Quadrupole
// ============================================================================

/// Ellipse shape as symmetric second moments `(ixx, iyy, ixy)`.
///
/// For a Gaussian profile these are the covariance-matrix entries; the
/// ellipse boundary is the 1-sigma contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrupole {
    /// Second moment along x.
    pub ixx: f64,
    /// Second moment along y.
    pub iyy: f64,
    /// Cross moment.
    pub ixy: f64,
}

impl Quadrupole {
    /// Construct from moments.
    #[inline]
    pub const fn new(ixx: f64, iyy: f64, ixy: f64) -> Self {
        Quadrupole { ixx, iyy, ixy }
    }

    /// The unit circle (`ixx = iyy = 1`, `ixy = 0`).
    #[inline]
    pub const fn unit_circle() -> Self {
        Quadrupole::new(1.0, 1.0, 0.0)
    }

    /// A circle with the given radius.
    #[inline]
    pub fn circle(radius: f64) -> Self {
        Quadrupole::new(radius * radius, radius * radius, 0.0)
    }

    /// Determinant of the moment matrix.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.ixx * self.iyy - self.ixy * self.ixy
    }

    /// Trace of the moment matrix.
    #[inline]
    pub fn trace(&self) -> f64 {
        self.ixx + self.iyy
    }

    /// The quadrupole of this shape convolved with `other`.
    ///
    /// Gaussian convolution adds second moments element-wise.
    #[inline]
    pub fn convolved(&self, other: &Quadrupole) -> Quadrupole {
        Quadrupole::new(
            self.ixx + other.ixx,
            self.iyy + other.iyy,
            self.ixy + other.ixy,
        )
    }

    /// The shape grown by `factor` in linear size (moments scale by
    /// `factor^2`).
    #[inline]
    pub fn scaled(&self, factor: f64) -> Quadrupole {
        let f2 = factor * factor;
        Quadrupole::new(self.ixx * f2, self.iyy * f2, self.ixy * f2)
    }

    /// Principal square root of the moment matrix.
    ///
    /// Tolerates semi-definite input: a rank-1 quadrupole yields a rank-1
    /// root and the zero quadrupole yields the zero map, so delta-function
    /// shapes pass through convolution unchanged.
    pub fn matrix_sqrt(&self) -> LinearTransform {
        let s = self.determinant().max(0.0).sqrt();
        let t2 = self.trace() + 2.0 * s;
        if t2 <= 0.0 {
            return LinearTransform::zero();
        }
        let t = t2.sqrt();
        LinearTransform::new(
            (self.ixx + s) / t,
            self.ixy / t,
            self.ixy / t,
            (self.iyy + s) / t,
        )
    }

    /// Inverse of the principal square root.
    ///
    /// Requires a positive-definite moment matrix; the determinant of the
    /// returned map is `1 / sqrt(det Q)`.
    pub fn inverse_sqrt(&self) -> Result<LinearTransform, ShapeletError> {
        let det = self.determinant();
        if !det.is_finite() || det <= 0.0 || self.trace() <= 0.0 {
            return Err(ShapeletError::SingularEllipse { determinant: det });
        }
        let s = det.sqrt();
        let t = (self.trace() + 2.0 * s).sqrt();
        let scale = 1.0 / (s * t);
        Ok(LinearTransform::new(
            (self.iyy + s) * scale,
            -self.ixy * scale,
            -self.ixy * scale,
            (self.ixx + s) * scale,
        ))
    }
}

impl Default for Quadrupole {
    fn default() -> Self {
        Quadrupole::unit_circle()
    }
}

// ============================================================================
// Axes
// ============================================================================

/// Ellipse shape as semi-axes and position angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    /// Semi-major axis.
    pub a: f64,
    /// Semi-minor axis.
    pub b: f64,
    /// Position angle of the major axis, in radians.
    pub theta: f64,
}

impl Axes {
    /// Construct from semi-axes and position angle.
    #[inline]
    pub const fn new(a: f64, b: f64, theta: f64) -> Self {
        Axes { a, b, theta }
    }
}

impl From<Axes> for Quadrupole {
    fn from(axes: Axes) -> Quadrupole {
        let (sin, cos) = axes.theta.sin_cos();
        let a2 = axes.a * axes.a;
        let b2 = axes.b * axes.b;
        Quadrupole::new(
            a2 * cos * cos + b2 * sin * sin,
            a2 * sin * sin + b2 * cos * cos,
            (a2 - b2) * sin * cos,
        )
    }
}

impl From<Quadrupole> for Axes {
    fn from(q: Quadrupole) -> Axes {
        let mean = 0.5 * q.trace();
        let spread = (0.25 * (q.ixx - q.iyy) * (q.ixx - q.iyy) + q.ixy * q.ixy).sqrt();
        Axes::new(
            (mean + spread).max(0.0).sqrt(),
            (mean - spread).max(0.0).sqrt(),
            0.5 * (2.0 * q.ixy).atan2(q.ixx - q.iyy),
        )
    }
}
