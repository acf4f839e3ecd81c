//! Gauss-Hermite recurrence kernels.
//!
//! ## Purpose
//!
//! This module fills tables of 1-d Gauss-Hermite function values using the
//! standard three-term recurrence. The basis functions are
//!
//! ```text
//! phi_j(t) = H_j(t) / sqrt(2^j * j! * sqrt(pi)) * exp(-t^2 / 2)
//! ```
//!
//! where `H_j` is the physicists' Hermite polynomial. The Gaussian envelope
//! is *not* applied here; callers multiply it in separately so that one
//! envelope evaluation can be shared by every basis function at a sample.
//!
//! ## Design notes
//!
//! * **Recurrence over closed forms**: the three-term recurrence
//!   `v[j] = sqrt(2/j) * t * v[j-1] - sqrt((j-1)/j) * v[j-2]` is numerically
//!   stable for the normalized functions and costs two multiplies per degree.
//! * **Degree-major tables**: batch fills write `(degree + 1)` contiguous
//!   rows of sample values, so the packed-index accumulation loops read each
//!   degree as one contiguous slice.
//! * **f64 coefficients**: recurrence coefficients are computed in `f64` and
//!   converted once per degree, not once per sample.
//!
//! ## Invariants
//!
//! * `hermite_value(0, t)` equals [`BASIS_NORMALIZATION`] for every `t`.
//! * With the envelope applied, the functions are orthonormal on the real
//!   line: `integral(phi_i * phi_j) = delta_ij`.

// External dependencies
use num_traits::Float;

// ============================================================================
// Constants
// ============================================================================

/// Normalization of the degree-0 Gauss-Hermite function: `pi^(-1/4)`.
pub const BASIS_NORMALIZATION: f64 = 0.751_125_544_464_942_5;

// ============================================================================
// Recurrence helpers
// ============================================================================

/// `sqrt(num / den)` as `T`, computed in `f64`.
#[inline]
fn rational_sqrt<T: Float>(num: usize, den: usize) -> T {
    T::from((num as f64 / den as f64).sqrt()).unwrap()
}

// ============================================================================
// Table fills
// ============================================================================

/// Fill a degree-major table of Gauss-Hermite values at many sample points.
///
/// `table` must hold at least `(degree + 1) * coords.len()` entries; row `j`
/// (the slice `table[j * n..(j + 1) * n]`) receives `phi_j` evaluated at
/// every coordinate, without the Gaussian envelope.
pub fn fill_hermite_series<T: Float>(table: &mut [T], degree: usize, coords: &[T]) {
    let n = coords.len();
    debug_assert!(table.len() >= (degree + 1) * n);

    let norm = T::from(BASIS_NORMALIZATION).unwrap();
    for value in &mut table[..n] {
        *value = norm;
    }
    if degree == 0 {
        return;
    }

    let sqrt_2 = T::from(core::f64::consts::SQRT_2).unwrap();
    let (row_0, rest) = table.split_at_mut(n);
    for s in 0..n {
        rest[s] = sqrt_2 * coords[s] * row_0[s];
    }

    for j in 2..=degree {
        let c_prev = rational_sqrt::<T>(2, j);
        let c_prev2 = rational_sqrt::<T>(j - 1, j);
        let (lower, current) = table.split_at_mut(j * n);
        let row_1 = &lower[(j - 1) * n..];
        let row_2 = &lower[(j - 2) * n..(j - 1) * n];
        for s in 0..n {
            current[s] = c_prev * coords[s] * row_1[s] - c_prev2 * row_2[s];
        }
    }
}

/// Fill `values[j] = phi_j(coord)` for `j` in `0..values.len()`, without the
/// Gaussian envelope.
///
/// Single-point counterpart of [`fill_hermite_series`], used by function
/// evaluators and the convolution operator where coordinates arrive one at
/// a time.
#[inline]
pub fn fill_hermite_point<T: Float>(values: &mut [T], coord: T) {
    if values.is_empty() {
        return;
    }
    values[0] = T::from(BASIS_NORMALIZATION).unwrap();
    if values.len() == 1 {
        return;
    }
    values[1] = T::from(core::f64::consts::SQRT_2).unwrap() * coord * values[0];
    for j in 2..values.len() {
        values[j] = rational_sqrt::<T>(2, j) * coord * values[j - 1]
            - rational_sqrt::<T>(j - 1, j) * values[j - 2];
    }
}

// ============================================================================
// Analytic integrals
// ============================================================================

/// Integral of the 1-d Gauss-Hermite function `phi_j` (envelope included)
/// over the real line.
///
/// Odd degrees integrate to zero by symmetry. Even degrees satisfy the
/// recurrence `I(2m) = I(2m - 2) * sqrt((2m - 1) / (2m))` starting from
/// `I(0) = sqrt(2 * pi) * pi^(-1/4)`, which follows from the generating
/// function of the Hermite polynomials.
pub fn hermite_integral_1d(degree: usize) -> f64 {
    if degree % 2 == 1 {
        return 0.0;
    }
    let mut value = (2.0 * core::f64::consts::PI).sqrt() * BASIS_NORMALIZATION;
    let mut j = 2usize;
    while j <= degree {
        value *= ((j - 1) as f64 / j as f64).sqrt();
        j += 2;
    }
    value
}
