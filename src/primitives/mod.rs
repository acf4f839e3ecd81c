//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides foundational types shared by every other layer:
//! - The crate-wide error enum
//! - The packed ordering of 2-d Hermite degrees
//! - Preallocated scratch storage for evaluation
//!
//! Nothing here evaluates a basis function; higher layers build on these
//! contracts.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Reusable workspace arena for evaluation scratch.
pub mod buffer;

/// The crate-wide error enum.
pub mod errors;

/// Packed (x degree, y degree) ordering and size helpers.
pub mod index;
