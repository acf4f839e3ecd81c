//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer assembles design matrices:
//! - Coordinate normalization against an ellipse
//! - Shared evaluation kernels (Gaussian column, envelope, packed block)
//! - The six builder variants behind [`MatrixBuilder`](variants::MatrixBuilder)
//! - Validation of caller-provided buffers
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Functions
//!   ↓
//! Layer 3: Geometry
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Shared evaluation kernels over normalized coordinates.
pub mod evaluators;

/// Coordinate normalization against an ellipse.
pub mod normalizer;

/// Input validation for builder buffers.
pub mod validator;

/// The matrix builder and its evaluation variants.
pub mod variants;
