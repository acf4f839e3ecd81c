//! Ellipses: a shape plus a center.
//!
//! ## Purpose
//!
//! An [`Ellipse`] pairs a [`Quadrupole`] core with a center point and is the
//! geometric argument of every matrix-builder evaluation: it describes where
//! a source sits and how it is shaped, and [`Ellipse::grid_transform`] turns
//! that description into the affine map onto the unit circle that the basis
//! functions are defined on.

// Internal dependencies
use crate::geometry::core::Quadrupole;
use crate::geometry::transforms::{AffineTransform, Point2};
use crate::primitives::errors::ShapeletError;

// ============================================================================
// Ellipse
// ============================================================================

/// An elliptical footprint in the sample plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ellipse {
    /// Shape of the footprint.
    pub core: Quadrupole,
    /// Center of the footprint.
    pub center: Point2,
}

impl Ellipse {
    /// Construct from a core and a center.
    #[inline]
    pub const fn new(core: Quadrupole, center: Point2) -> Self {
        Ellipse { core, center }
    }

    /// An ellipse centered at the origin.
    #[inline]
    pub const fn from_core(core: Quadrupole) -> Self {
        Ellipse::new(core, Point2::origin())
    }

    /// The affine map from sample coordinates onto the unit circle.
    ///
    /// The linear part is `core.inverse_sqrt()` and the translation moves
    /// the center to the origin, so a point on the 1-sigma contour lands on
    /// the unit circle. Fails with
    /// [`SingularEllipse`](ShapeletError::SingularEllipse) when the core is
    /// not positive definite.
    pub fn grid_transform(&self) -> Result<AffineTransform, ShapeletError> {
        let linear = self.core.inverse_sqrt()?;
        let shift = linear.apply(self.center);
        Ok(AffineTransform::new(
            linear,
            Point2::new(-shift.x, -shift.y),
        ))
    }

    /// This ellipse convolved with `other`: cores and centers both add.
    #[inline]
    pub fn convolved(&self, other: &Ellipse) -> Ellipse {
        Ellipse::new(
            self.core.convolved(&other.core),
            Point2::new(
                self.center.x + other.center.x,
                self.center.y + other.center.y,
            ),
        )
    }

    /// The ellipse grown by `factor` in linear size; the center is
    /// unchanged.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Ellipse {
        Ellipse::new(self.core.scaled(factor), self.center)
    }
}
