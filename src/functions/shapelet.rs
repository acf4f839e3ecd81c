//! Shapelet functions: Gauss-Hermite expansions attached to an ellipse.
//!
//! ## Purpose
//!
//! A [`ShapeletFunction`] is a 2-d function expressed as coefficients in the
//! Gauss-Hermite basis, together with the ellipse that sets the basis scale,
//! orientation, and center. It is the building block for PSF models and the
//! output of analytic convolution.
//!
//! ## Key concepts
//!
//! * **Evaluation convention**: with affine grid transform `A` (linear part
//!   determinant `det`), the function value is
//!   `f(p) = det * sum_i c_i * psi_i(A p)` where `psi_i` are the unit-circle
//!   basis functions. The determinant keeps total flux independent of the
//!   ellipse size.
//! * **Flux**: the order-0 basis function integrates to
//!   [`ShapeletFunction::FLUX_FACTOR`] `= 2 * sqrt(pi)` regardless of the
//!   ellipse, so a coefficient vector `(F / FLUX_FACTOR, 0, ...)` has total
//!   flux `F`.
//!
//! ## Invariants
//!
//! * `coefficients.len() == basis_size(order)` at all times.
//! * [`ShapeletFunction::integrate`] does not depend on the ellipse.

// Internal dependencies
use crate::functions::convolution::GaussHermiteConvolution;
use crate::geometry::ellipse::Ellipse;
use crate::geometry::transforms::AffineTransform;
use crate::math::hermite::{fill_hermite_point, hermite_integral_1d};
use crate::primitives::errors::ShapeletError;
use crate::primitives::index::{basis_size, PackedIndex};

// ============================================================================
// ShapeletFunction
// ============================================================================

/// A Gauss-Hermite expansion attached to an ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeletFunction {
    order: usize,
    ellipse: Ellipse,
    coefficients: Vec<f64>,
}

impl ShapeletFunction {
    /// Total flux of the order-0 basis function with unit coefficient.
    ///
    /// Equal to `2 * sqrt(pi)`; independent of the ellipse because the
    /// grid-transform determinant in the evaluation convention cancels the
    /// area scaling.
    pub const FLUX_FACTOR: f64 = 3.544_907_701_811_032;

    /// Construct from an order, an ellipse, and packed coefficients.
    ///
    /// `coefficients` must have exactly `basis_size(order)` entries, ordered
    /// by [`PackedIndex`].
    pub fn new(
        order: usize,
        ellipse: Ellipse,
        coefficients: Vec<f64>,
    ) -> Result<Self, ShapeletError> {
        let expected = basis_size(order);
        if coefficients.len() != expected {
            return Err(ShapeletError::InvalidCoefficients {
                expected,
                got: coefficients.len(),
            });
        }
        Ok(ShapeletFunction {
            order,
            ellipse,
            coefficients,
        })
    }

    /// An order-0 (elliptical Gaussian) function with the given total flux.
    pub fn gaussian(ellipse: Ellipse, flux: f64) -> Self {
        ShapeletFunction {
            order: 0,
            ellipse,
            coefficients: vec![flux / Self::FLUX_FACTOR],
        }
    }

    /// Basis order of the expansion.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The ellipse the basis is attached to.
    #[inline]
    pub fn ellipse(&self) -> &Ellipse {
        &self.ellipse
    }

    /// Mutable access to the ellipse.
    #[inline]
    pub fn ellipse_mut(&mut self) -> &mut Ellipse {
        &mut self.ellipse
    }

    /// Packed coefficients, ordered by [`PackedIndex`].
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Mutable access to the coefficients.
    #[inline]
    pub fn coefficients_mut(&mut self) -> &mut [f64] {
        &mut self.coefficients
    }

    /// Create an evaluator for pointwise evaluation.
    ///
    /// Fails when the ellipse core is not positive definite.
    pub fn evaluator(&self) -> Result<ShapeletFunctionEvaluator, ShapeletError> {
        ShapeletFunctionEvaluator::new(self)
    }

    /// Total flux (integral over the plane).
    ///
    /// Analytic: odd-degree basis functions integrate to zero and the even
    /// ones have closed-form integrals, so no ellipse and no quadrature is
    /// involved.
    pub fn integrate(&self) -> f64 {
        let mut total = 0.0;
        for i in PackedIndex::range(self.order) {
            let weight = hermite_integral_1d(i.x()) * hermite_integral_1d(i.y());
            if weight != 0.0 {
                total += self.coefficients[i.index()] * weight;
            }
        }
        total
    }

    /// Rescale the coefficients so the total flux equals `flux`.
    ///
    /// If the current integral is zero the coefficients become non-finite;
    /// callers normalize only functions with net flux.
    pub fn normalize(&mut self, flux: f64) {
        let factor = flux / self.integrate();
        for c in &mut self.coefficients {
            *c *= factor;
        }
    }

    /// Analytic convolution with another shapelet function.
    ///
    /// The result has order `self.order() + psf.order()` and is attached to
    /// the convolved ellipse (moments and centers add).
    pub fn convolved(&self, psf: &ShapeletFunction) -> Result<ShapeletFunction, ShapeletError> {
        let mut convolution = GaussHermiteConvolution::new(self.order, psf);
        let mut ellipse = self.ellipse;
        let row_size = convolution.row_size();
        let col_size = convolution.col_size();
        let matrix = convolution.evaluate(&mut ellipse)?;

        let mut coefficients = vec![0.0; row_size];
        for (r, out) in coefficients.iter_mut().enumerate() {
            let row = &matrix[r * col_size..(r + 1) * col_size];
            *out = row
                .iter()
                .zip(&self.coefficients)
                .map(|(&m, &c)| m * c)
                .sum();
        }
        ShapeletFunction::new(self.order + psf.order, ellipse, coefficients)
    }
}

// ============================================================================
// ShapeletFunctionEvaluator
// ============================================================================

/// Pointwise evaluator for a [`ShapeletFunction`].
///
/// Owns the grid transform and per-axis recurrence scratch, so repeated
/// evaluation allocates nothing. Evaluation takes `&mut self` because the
/// scratch tables are reused.
#[derive(Debug, Clone)]
pub struct ShapeletFunctionEvaluator {
    order: usize,
    transform: AffineTransform,
    det_factor: f64,
    coefficients: Vec<f64>,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

impl ShapeletFunctionEvaluator {
    fn new(function: &ShapeletFunction) -> Result<Self, ShapeletError> {
        let transform = function.ellipse.grid_transform()?;
        Ok(ShapeletFunctionEvaluator {
            order: function.order,
            transform,
            det_factor: transform.linear.determinant(),
            coefficients: function.coefficients.clone(),
            x_values: vec![0.0; function.order + 1],
            y_values: vec![0.0; function.order + 1],
        })
    }

    /// Evaluate the function at `(x, y)`.
    pub fn evaluate(&mut self, x: f64, y: f64) -> f64 {
        let u = self.transform.apply(crate::geometry::transforms::Point2::new(x, y));
        fill_hermite_point(&mut self.x_values, u.x);
        fill_hermite_point(&mut self.y_values, u.y);
        let envelope = (-0.5 * (u.x * u.x + u.y * u.y)).exp();

        let mut sum = 0.0;
        for i in PackedIndex::range(self.order) {
            sum += self.coefficients[i.index()] * self.x_values[i.x()] * self.y_values[i.y()];
        }
        self.det_factor * envelope * sum
    }
}
