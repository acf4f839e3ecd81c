//! Points and coordinate transforms.
//!
//! ## Purpose
//!
//! Small, copyable value types for positions and 2x2 linear maps. These are
//! the currency between ellipse geometry and the evaluation kernels: an
//! ellipse turns into an [`AffineTransform`] that maps image coordinates
//! onto the unit circle where the basis functions live.

// ============================================================================
// Point2
// ============================================================================

/// A position in the 2-d sample plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// Construct from coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// The origin `(0, 0)`.
    #[inline]
    pub const fn origin() -> Self {
        Point2 { x: 0.0, y: 0.0 }
    }
}

// ============================================================================
// LinearTransform
// ============================================================================

/// A 2x2 linear map, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    /// Row 0, column 0.
    pub xx: f64,
    /// Row 0, column 1.
    pub xy: f64,
    /// Row 1, column 0.
    pub yx: f64,
    /// Row 1, column 1.
    pub yy: f64,
}

impl LinearTransform {
    /// Construct from row-major elements.
    #[inline]
    pub const fn new(xx: f64, xy: f64, yx: f64, yy: f64) -> Self {
        LinearTransform { xx, xy, yx, yy }
    }

    /// The identity map.
    #[inline]
    pub const fn identity() -> Self {
        LinearTransform::new(1.0, 0.0, 0.0, 1.0)
    }

    /// The zero map.
    #[inline]
    pub const fn zero() -> Self {
        LinearTransform::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Apply the map to a point.
    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(self.xx * p.x + self.xy * p.y, self.yx * p.x + self.yy * p.y)
    }

    /// Determinant of the map.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// The map with every element multiplied by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        LinearTransform::new(
            self.xx * factor,
            self.xy * factor,
            self.yx * factor,
            self.yy * factor,
        )
    }

    /// The composition `self * other`, applying `other` first.
    #[inline]
    pub fn compose(&self, other: &LinearTransform) -> Self {
        LinearTransform::new(
            self.xx * other.xx + self.xy * other.yx,
            self.xx * other.xy + self.xy * other.yy,
            self.yx * other.xx + self.yy * other.yx,
            self.yx * other.xy + self.yy * other.yy,
        )
    }
}

impl Default for LinearTransform {
    fn default() -> Self {
        LinearTransform::identity()
    }
}

// ============================================================================
// AffineTransform
// ============================================================================

/// A linear map followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffineTransform {
    /// The linear part.
    pub linear: LinearTransform,
    /// The translation applied after the linear part.
    pub translation: Point2,
}

impl AffineTransform {
    /// Construct from parts.
    #[inline]
    pub const fn new(linear: LinearTransform, translation: Point2) -> Self {
        AffineTransform {
            linear,
            translation,
        }
    }

    /// Apply the map to a point.
    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        let q = self.linear.apply(p);
        Point2::new(q.x + self.translation.x, q.y + self.translation.y)
    }
}
