//! Layer 4: Functions
//!
//! # Purpose
//!
//! This layer represents concrete shapelet models:
//! - Single Gauss-Hermite expansions and their pointwise evaluators
//! - Sums of expansions for realistic PSF models
//! - Multi-component bases spanned by shared amplitudes
//! - Analytic convolution between expansions
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Functions ← You are here
//!   ↓
//! Layer 3: Geometry
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Multi-component shapelet bases.
pub mod basis;

/// Analytic convolution of Gauss-Hermite expansions.
pub mod convolution;

/// Sums of shapelet functions.
pub mod multi;

/// Single shapelet functions and evaluators.
pub mod shapelet;
