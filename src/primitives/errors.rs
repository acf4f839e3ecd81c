//! Error types for shapelet design-matrix construction.
//!
//! ## Purpose
//!
//! This module defines the single error enum used across the crate. Every
//! failure mode carries enough context to print a one-line diagnostic without
//! chasing the call site.
//!
//! ## Design notes
//!
//! * **Synchronous**: errors abort the current construction or `apply` call;
//!   nothing is retried internally.
//! * **No partial results**: after an error the output buffer contents are
//!   unspecified and must not be read.

// External dependencies
use core::fmt;

/// Errors that can occur during builder construction or matrix evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeletError {
    /// Input coordinate arrays are empty.
    EmptyInput,

    /// The x and y sample arrays have different lengths.
    MismatchedSamples {
        /// Number of x samples.
        x_len: usize,
        /// Number of y samples.
        y_len: usize,
    },

    /// The output buffer does not match (sample count x basis size).
    OutputSize {
        /// Expected element count.
        expected: usize,
        /// Provided element count.
        got: usize,
    },

    /// The requested PSF/basis pairing has no implemented variant.
    UnsupportedCombination {
        /// Short description of the rejected request.
        detail: &'static str,
    },

    /// An ellipse core is degenerate and has no unit-circle transform.
    SingularEllipse {
        /// Determinant of the quadrupole matrix.
        determinant: f64,
    },

    /// A basis component radius is not a positive finite number.
    InvalidRadius(f64),

    /// A component mixing matrix does not match (basis size x basis width).
    ComponentShape {
        /// Expected element count (rows x columns).
        expected: usize,
        /// Provided element count.
        got: usize,
    },

    /// A coefficient vector does not match the basis size of its order.
    InvalidCoefficients {
        /// Basis size implied by the order.
        expected: usize,
        /// Provided coefficient count.
        got: usize,
    },

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// Two mutually exclusive builder parameters were both set.
    ConflictingParameters {
        /// First parameter name.
        first: &'static str,
        /// Second parameter name.
        second: &'static str,
    },

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for ShapeletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedSamples { x_len, y_len } => {
                write!(f, "Length mismatch: x has {} points, y has {}", x_len, y_len)
            }
            Self::OutputSize { expected, got } => {
                write!(
                    f,
                    "Output buffer has {} elements (need sample count x basis size = {})",
                    got, expected
                )
            }
            Self::UnsupportedCombination { detail } => {
                write!(f, "Unsupported combination: {}", detail)
            }
            Self::SingularEllipse { determinant } => {
                write!(
                    f,
                    "Singular ellipse: quadrupole determinant {} (must be > 0)",
                    determinant
                )
            }
            Self::InvalidRadius(radius) => {
                write!(f, "Invalid radius: {} (must be positive and finite)", radius)
            }
            Self::ComponentShape { expected, got } => {
                write!(
                    f,
                    "Component matrix has {} elements (need basis size x width = {})",
                    got, expected
                )
            }
            Self::InvalidCoefficients { expected, got } => {
                write!(
                    f,
                    "Coefficient vector has {} entries (order implies {})",
                    got, expected
                )
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Parameter '{}' is required but was not set", parameter)
            }
            Self::ConflictingParameters { first, second } => {
                write!(
                    f,
                    "Parameters '{}' and '{}' cannot be combined",
                    first, second
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                    parameter
                )
            }
        }
    }
}

impl std::error::Error for ShapeletError {}
