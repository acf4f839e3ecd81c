//! High-level API for building shapelet design matrices.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements
//! a fluent builder pattern for describing a source model (a raw
//! Gauss-Hermite order or a multi-component basis, optionally convolved
//! with a PSF) over fixed sample coordinates, and produces a reusable
//! [`MatrixBuilder`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: fluent builder; the variant selection rules live in the
//!   [`MatrixBuilder`] constructors, not in user code.
//! * **Validated**: parameters are checked once, when [`build`] is called;
//!   setting a parameter twice is reported instead of silently overwritten.
//! * **Type-Safe**: generic over the output precision via [`BasisLinalg`].
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: create via `DesignMatrix::new()`, chain
//!   `.samples()`, one of `.order()` / `.basis()`, optionally a PSF, then
//!   `.build()`.
//! * **Model exclusivity**: `.order()` and `.basis()` describe the same
//!   thing two ways; supplying both is an error, not a precedence rule.
//!
//! [`build`]: DesignMatrixBuilder::build

// External dependencies
use core::fmt::Debug;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::variants::MatrixBuilder;
pub use crate::functions::basis::{MultiShapeletBasis, MultiShapeletBasisComponent};
pub use crate::functions::convolution::GaussHermiteConvolution;
pub use crate::functions::multi::{MultiShapeletFunction, MultiShapeletFunctionEvaluator};
pub use crate::functions::shapelet::{ShapeletFunction, ShapeletFunctionEvaluator};
pub use crate::geometry::core::{Axes, Quadrupole};
pub use crate::geometry::ellipse::Ellipse;
pub use crate::geometry::transforms::{AffineTransform, LinearTransform, Point2};
pub use crate::math::products::BasisLinalg;
pub use crate::primitives::errors::ShapeletError;
pub use crate::primitives::index::{basis_offset, basis_size, PackedIndex, PackedIndexRange};

// ============================================================================
// DesignMatrixBuilder
// ============================================================================

/// Fluent configuration for a [`MatrixBuilder`].
///
/// Re-exported in the prelude as `DesignMatrix`.
///
/// ```
/// use shapelet_rs::prelude::*;
///
/// let x = vec![-1.0, 0.0, 1.0, 2.0];
/// let y = vec![0.0, 0.5, 1.0, 1.5];
/// let mut builder = DesignMatrix::<f64>::new()
///     .samples(&x, &y)
///     .order(2)
///     .build()?;
///
/// let ellipse = Ellipse::from_core(Quadrupole::unit_circle());
/// let matrix = builder.to_matrix(&ellipse)?;
/// assert_eq!(matrix.len(), x.len() * builder.basis_size());
/// # Ok::<(), ShapeletError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DesignMatrixBuilder<T: BasisLinalg + Debug + Send + Sync> {
    /// Sample x coordinates.
    pub x: Option<Vec<T>>,

    /// Sample y coordinates.
    pub y: Option<Vec<T>>,

    /// Gauss-Hermite order of a raw single-expansion model.
    pub order: Option<usize>,

    /// PSF to convolve the model with.
    pub psf: Option<MultiShapeletFunction>,

    /// Multi-component basis describing the model.
    pub basis: Option<MultiShapeletBasis>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: BasisLinalg + Debug + Send + Sync> Default for DesignMatrixBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BasisLinalg + Debug + Send + Sync> DesignMatrixBuilder<T> {
    /// Create a new builder with nothing configured.
    pub fn new() -> Self {
        Self {
            x: None,
            y: None,
            order: None,
            psf: None,
            basis: None,
            duplicate_param: None,
        }
    }

    /// Set the sample coordinates (one matrix row per sample).
    pub fn samples(mut self, x: &[T], y: &[T]) -> Self {
        if self.x.is_some() {
            self.duplicate_param = Some("samples");
        }
        self.x = Some(x.to_vec());
        self.y = Some(y.to_vec());
        self
    }

    /// Model the source as a single Gauss-Hermite expansion of this order.
    pub fn order(mut self, order: usize) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order);
        self
    }

    /// Model the source through a multi-component basis.
    pub fn basis(mut self, basis: &MultiShapeletBasis) -> Self {
        if self.basis.is_some() {
            self.duplicate_param = Some("basis");
        }
        self.basis = Some(basis.clone());
        self
    }

    /// Convolve the model with a one-component PSF.
    pub fn psf(mut self, psf: &ShapeletFunction) -> Self {
        if self.psf.is_some() {
            self.duplicate_param = Some("psf");
        }
        self.psf = Some(MultiShapeletFunction::from(psf.clone()));
        self
    }

    /// Convolve the model with a multi-component PSF.
    ///
    /// Shares the `psf` slot with [`psf`](Self::psf); setting both counts
    /// as a duplicate.
    pub fn multi_psf(mut self, psf: &MultiShapeletFunction) -> Self {
        if self.psf.is_some() {
            self.duplicate_param = Some("psf");
        }
        self.psf = Some(psf.clone());
        self
    }

    /// Validate the configuration and construct the matrix builder.
    pub fn build(self) -> Result<MatrixBuilder<T>, ShapeletError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let (x, y) = match (self.x, self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(ShapeletError::MissingParameter {
                    parameter: "samples",
                })
            }
        };

        match (self.order, self.basis) {
            (Some(_), Some(_)) => Err(ShapeletError::ConflictingParameters {
                first: "order",
                second: "basis",
            }),
            (None, None) => Err(ShapeletError::MissingParameter {
                parameter: "order or basis",
            }),
            (Some(order), None) => match self.psf {
                None => MatrixBuilder::with_order(&x, &y, order),
                Some(psf) => MatrixBuilder::with_multi_psf(&x, &y, order, &psf),
            },
            (None, Some(basis)) => match self.psf {
                None => MatrixBuilder::with_basis(&x, &y, &basis),
                Some(psf) => MatrixBuilder::with_convolved_basis(&x, &y, &basis, &psf),
            },
        }
    }
}
