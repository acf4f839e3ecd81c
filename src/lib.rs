//! # shapelet-rs — Gauss-Hermite design matrices for source fitting
//!
//! A fast builder of shapelet (Gauss-Hermite) design matrices for fitting
//! astronomical sources, with analytic PSF convolution and multi-component
//! profile bases.
//!
//! ## What are shapelets?
//!
//! Shapelets are a complete 2-d basis built from Hermite polynomials under
//! a Gaussian envelope, attached to an ellipse that sets their scale,
//! orientation, and center. Galaxy and PSF profiles are compact in this
//! basis: a handful of coefficients captures realistic shapes, convolution
//! with a Gaussian-cored PSF is analytic, and for a *fixed* ellipse a
//! source model is linear in its coefficients.
//!
//! That linearity is what this crate exploits. For sample coordinates
//! `(x[s], y[s])` and a model with `basis_size` free amplitudes, the design
//! matrix holds each basis function evaluated at each sample; fitting the
//! amplitudes is then a linear least-squares problem, and an outer loop
//! only has to search over ellipse parameters.
//!
//! **Key features:**
//! - One matrix row per sample, rebuilt for a new ellipse with no
//!   allocation
//! - Analytic convolution with shapelet PSF models of any order
//! - Multi-component bases (sums of profiles at different radii) behind a
//!   shared amplitude vector
//! - Specialized evaluation paths, from a closed-form Gaussian column up
//!   to fully convolved multi-component models
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use shapelet_rs::prelude::*;
//!
//! // Pixel coordinates of a postage stamp.
//! let mut xs = Vec::new();
//! let mut ys = Vec::new();
//! for iy in -8..=8 {
//!     for ix in -8..=8 {
//!         xs.push(f64::from(ix));
//!         ys.push(f64::from(iy));
//!     }
//! }
//!
//! // An order-2 source model convolved with a Gaussian PSF.
//! let psf_ellipse = Ellipse::from_core(Quadrupole::circle(1.5));
//! let psf = ShapeletFunction::gaussian(psf_ellipse, 1.0);
//! let mut builder = DesignMatrix::<f64>::new()
//!     .samples(&xs, &ys)
//!     .order(2)
//!     .psf(&psf)
//!     .build()?;
//!
//! // Rebuild the matrix for each trial ellipse of an outer fitting loop.
//! let mut matrix = vec![0.0; builder.sample_count() * builder.basis_size()];
//! builder.apply(&mut matrix, &Ellipse::from_core(Quadrupole::new(4.0, 3.0, 0.5)))?;
//! # Result::<(), ShapeletError>::Ok(())
//! ```
//!
//! The matrix is sample-major: the value of basis function `i` at sample
//! `s` is `matrix[s * builder.basis_size() + i]`.
//!
//! ### Shapelet functions directly
//!
//! ```rust
//! use shapelet_rs::prelude::*;
//!
//! // A Gaussian with total flux 2 on a unit-circle ellipse.
//! let ellipse = Ellipse::from_core(Quadrupole::unit_circle());
//! let f = ShapeletFunction::gaussian(ellipse, 2.0);
//! assert!((f.integrate() - 2.0).abs() < 1e-12);
//!
//! // Pointwise evaluation through an evaluator (reuses scratch).
//! let mut evaluator = f.evaluator()?;
//! let peak = evaluator.evaluate(0.0, 0.0);
//! assert!(peak > 0.0);
//!
//! // Analytic convolution of two expansions.
//! let psf = ShapeletFunction::gaussian(Ellipse::from_core(Quadrupole::circle(0.7)), 1.0);
//! let convolved = f.convolved(&psf)?;
//! assert!((convolved.integrate() - 2.0).abs() < 1e-9);
//! # Result::<(), ShapeletError>::Ok(())
//! ```
//!
//! ## Model families
//!
//! The builder picks a specialized evaluation variant from the
//! configuration:
//!
//! | Model | PSF | Variant |
//! |-------|-----|---------|
//! | `order(0)` | none | closed-form Gaussian column |
//! | `order(0)` | one order-0 component | Gaussian column on the convolved ellipse |
//! | `order(n)` | none | direct Gauss-Hermite columns |
//! | `order(n)` | one component | staged block times convolution matrix |
//! | `basis(..)` | none | per-component blocks times remapping matrices |
//! | `basis(..)` | any | per-pairing blocks times convolution and remapping |
//!
//! A raw `order(n)` model with a multi-component PSF is rejected; remap
//! the model through a [`MultiShapeletBasis`](prelude::MultiShapeletBasis)
//! to use a richer PSF.
//!
//! ## Precision
//!
//! Builders are generic over the output element type. `f64` routes the hot
//! accumulation loops through explicit two-lane SIMD; `f32` halves the
//! matrix memory for large sample grids and uses scalar loops. Geometry
//! and convolution matrices are always computed in `f64`.
//!
//! ## Feature flags
//!
//! - `dev`: exposes internal modules under `internals` for white-box
//!   testing and benchmarking. Not for production use.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors, packed indexing, scratch buffers.
//
// Contains the error type, the packed triangular ordering of 2-d basis
// functions, and the preallocated workspace arena.
mod primitives;

// Layer 2: Math - pure numerical kernels.
//
// Contains Gauss-Hermite recurrences, quadrature rules, and the dense
// accumulation/mixing products (with SIMD dispatch).
mod math;

// Layer 3: Geometry - ellipses and coordinate transforms.
//
// Contains quadrupole/axes shape parametrizations, ellipses, and the
// affine grid transforms they induce.
mod geometry;

// Layer 4: Functions - shapelet models.
//
// Contains single and multi-component shapelet functions, multi-component
// bases, and analytic Gauss-Hermite convolution.
mod functions;

// Layer 5: Engine - design-matrix assembly.
//
// Contains coordinate normalization, the shared evaluation kernels, the
// builder variants, and buffer validation.
mod engine;

// High-level fluent API for configuring matrix builders.
//
// Provides the `DesignMatrix` builder and the public re-exports.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use shapelet_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        basis_offset, basis_size, AffineTransform, Axes, BasisLinalg,
        DesignMatrixBuilder as DesignMatrix, Ellipse, GaussHermiteConvolution, LinearTransform,
        MatrixBuilder, MultiShapeletBasis, MultiShapeletBasisComponent, MultiShapeletFunction,
        MultiShapeletFunctionEvaluator, PackedIndex, PackedIndexRange, Point2, Quadrupole,
        ShapeletError, ShapeletFunction, ShapeletFunctionEvaluator,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math kernels.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal geometry types.
    pub mod geometry {
        pub use crate::geometry::*;
    }
    /// Internal shapelet models.
    pub mod functions {
        pub use crate::functions::*;
    }
    /// Internal assembly engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
