//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numerical kernels behind shapelet
//! evaluation:
//! - Gauss-Hermite recurrences for basis-function values
//! - Gauss-Hermite quadrature rules for convolution integrals
//! - Dense accumulation and mixing products for matrix assembly
//!
//! These are reusable building blocks with no knowledge of ellipses,
//! shapelet functions, or builder variants.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Functions
//!   ↓
//! Layer 3: Geometry
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Gauss-Hermite recurrence kernels and analytic integrals.
pub mod hermite;

/// Dense accumulation kernels and small matrix products.
pub mod products;

/// Gauss-Hermite quadrature rules.
pub mod quadrature;
