//! Input validation for matrix builders.
//!
//! ## Purpose
//!
//! This module checks the sample arrays and output buffers handed to the
//! matrix builders. Geometry and model parameters are validated where they
//! are constructed (ellipse roots, basis components, the front-door
//! builder); what remains here are the shape contracts between caller
//! buffers and builder configuration.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: validation stops at the first error encountered.
//! * **Generics**: checks are generic over `Float` element types.
//! * **No value policing**: non-finite sample coordinates are not rejected;
//!   they propagate through evaluation with IEEE semantics.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ShapeletError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for builder inputs.
///
/// Provides static methods returning `Result<(), ShapeletError>` that fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    /// Validate the sample coordinate arrays.
    pub fn validate_samples<T: Float>(x: &[T], y: &[T]) -> Result<(), ShapeletError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(ShapeletError::EmptyInput);
        }

        // Check 2: Matching lengths
        if x.len() != y.len() {
            return Err(ShapeletError::MismatchedSamples {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        Ok(())
    }

    /// Validate an output buffer against the builder's matrix size.
    pub fn validate_output<T: Float>(output: &[T], expected: usize) -> Result<(), ShapeletError> {
        if output.len() != expected {
            return Err(ShapeletError::OutputSize {
                expected,
                got: output.len(),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), ShapeletError> {
        if let Some(param) = duplicate_param {
            return Err(ShapeletError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
