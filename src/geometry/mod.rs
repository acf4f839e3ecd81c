//! Layer 3: Geometry
//!
//! # Purpose
//!
//! This layer describes elliptical footprints and the coordinate transforms
//! they induce:
//! - Second-moment and semi-axis shape parametrizations
//! - Ellipses (shape plus center) with convolution and scaling
//! - Points and the affine maps used to normalize sample coordinates
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
//! Layer 3: Geometry ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Quadrupole and axes parametrizations of ellipse shapes.
pub mod core;

/// Ellipses combining a shape with a center.
pub mod ellipse;

/// Points and linear/affine coordinate transforms.
pub mod transforms;
