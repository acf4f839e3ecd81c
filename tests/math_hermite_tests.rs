#![cfg(feature = "dev")]
//! Tests for the Gauss-Hermite recurrence kernels.
//!
//! These tests verify the 1-d basis evaluation against the explicit
//! physicists' Hermite polynomials:
//! - BASIS_NORMALIZATION constant
//! - fill_hermite_point and fill_hermite_series recurrences
//! - hermite_integral_1d analytic integrals
//!
//! ## Test Organization
//!
//! 1. **Normalization** - The degree-0 constant
//! 2. **Recurrence vs Closed Form** - Explicit polynomials through degree 6
//! 3. **Batch Fill** - Degree-major tables match the single-point path
//! 4. **Analytic Integrals** - Recurrence anchors and closed form

use approx::assert_relative_eq;
use std::f64::consts::PI;

use shapelet_rs::internals::math::hermite::{
    fill_hermite_point, fill_hermite_series, hermite_integral_1d, BASIS_NORMALIZATION,
};

/// Gauss-Hermite function of `degree` at `t` from the explicit physicists'
/// Hermite polynomials, without the Gaussian envelope:
/// `H_degree(t) / sqrt(2^degree * degree! * sqrt(pi))`.
fn phi_direct(degree: usize, t: f64) -> f64 {
    let h = match degree {
        0 => 1.0,
        1 => 2.0 * t,
        2 => 4.0 * t * t - 2.0,
        3 => 8.0 * t.powi(3) - 12.0 * t,
        4 => 16.0 * t.powi(4) - 48.0 * t * t + 12.0,
        5 => 32.0 * t.powi(5) - 160.0 * t.powi(3) + 120.0 * t,
        6 => 64.0 * t.powi(6) - 480.0 * t.powi(4) + 720.0 * t * t - 120.0,
        _ => panic!("phi_direct only covers degrees 0..=6"),
    };
    let mut norm_sq = PI.sqrt();
    for j in 1..=degree {
        norm_sq *= 2.0 * j as f64;
    }
    h / norm_sq.sqrt()
}

// ============================================================================
// Normalization
// ============================================================================

/// Test the degree-0 normalization constant.
#[test]
fn test_basis_normalization_value() {
    assert_relative_eq!(BASIS_NORMALIZATION, PI.powf(-0.25), epsilon = 1e-15);
    // pi^(-1/4) squared times sqrt(pi) is exactly one.
    assert_relative_eq!(
        BASIS_NORMALIZATION * BASIS_NORMALIZATION * PI.sqrt(),
        1.0,
        epsilon = 1e-15
    );
}

/// Test that degree 0 is constant in t.
#[test]
fn test_degree_zero_constant() {
    for &t in &[-4.0, -0.5, 0.0, 1.0, 7.5] {
        let mut values = [0.0f64; 1];
        fill_hermite_point(&mut values, t);
        assert_eq!(values[0], BASIS_NORMALIZATION);
    }
}

/// Test that an empty output slice is accepted.
#[test]
fn test_fill_point_empty() {
    let mut values: [f64; 0] = [];
    fill_hermite_point(&mut values, 1.0);
}

// ============================================================================
// Recurrence vs Closed Form
// ============================================================================

/// Test fill_hermite_point against explicit polynomials through degree 6.
#[test]
fn test_fill_point_matches_closed_form() {
    for &t in &[-2.5, -1.0, -0.3, 0.0, 0.7, 1.9, 3.2] {
        let mut values = [0.0f64; 7];
        fill_hermite_point(&mut values, t);
        for degree in 0..=6 {
            assert_relative_eq!(values[degree], phi_direct(degree, t), epsilon = 1e-12);
        }
    }
}

/// Test odd-degree antisymmetry and even-degree symmetry.
#[test]
fn test_fill_point_parity() {
    let t = 1.37;
    let mut pos = [0.0f64; 7];
    let mut neg = [0.0f64; 7];
    fill_hermite_point(&mut pos, t);
    fill_hermite_point(&mut neg, -t);
    for degree in 0..=6 {
        let sign = if degree % 2 == 0 { 1.0 } else { -1.0 };
        assert_relative_eq!(neg[degree], sign * pos[degree], epsilon = 1e-14);
    }
}

/// Test the f32 recurrence against the f64 one.
#[test]
fn test_fill_point_f32() {
    let mut values_64 = [0.0f64; 5];
    let mut values_32 = [0.0f32; 5];
    fill_hermite_point(&mut values_64, 1.25);
    fill_hermite_point(&mut values_32, 1.25f32);
    for degree in 0..5 {
        assert_relative_eq!(values_32[degree] as f64, values_64[degree], epsilon = 1e-5);
    }
}

// ============================================================================
// Batch Fill
// ============================================================================

/// Test that fill_hermite_series rows equal fill_hermite_point values.
#[test]
fn test_series_matches_point() {
    let coords = [-1.5, 0.25, 2.0];
    let mut table = vec![0.0f64; 7 * coords.len()];
    fill_hermite_series(&mut table, 6, &coords);

    for (s, &t) in coords.iter().enumerate() {
        let mut column = [0.0f64; 7];
        fill_hermite_point(&mut column, t);
        for degree in 0..=6 {
            // Same recurrence, same operation order: bitwise equal.
            assert_eq!(table[degree * coords.len() + s], column[degree]);
        }
    }
}

/// Test the degree-0 batch fill writes only the first row.
#[test]
fn test_series_degree_zero() {
    let coords = [0.5, 1.5];
    let mut table = vec![-1.0f64; 3 * coords.len()];
    fill_hermite_series(&mut table, 0, &coords);
    assert_eq!(&table[..2], &[BASIS_NORMALIZATION, BASIS_NORMALIZATION]);
    // Rows beyond the requested degree are untouched.
    assert_eq!(&table[2..], &[-1.0, -1.0, -1.0, -1.0]);
}

/// Test batch fill with an empty coordinate slice.
#[test]
fn test_series_no_coords() {
    let mut table: Vec<f64> = Vec::new();
    fill_hermite_series(&mut table, 4, &[]);
    assert!(table.is_empty());
}

// ============================================================================
// Analytic Integrals
// ============================================================================

/// Test that odd degrees integrate to exactly zero.
#[test]
fn test_integral_odd_zero() {
    for degree in [1, 3, 5, 7, 11] {
        assert_eq!(hermite_integral_1d(degree), 0.0);
    }
}

/// Test the recurrence anchors.
#[test]
fn test_integral_anchors() {
    // I(0) = sqrt(2*pi) * pi^(-1/4)
    let i0 = (2.0 * PI).sqrt() * PI.powf(-0.25);
    assert_relative_eq!(hermite_integral_1d(0), i0, epsilon = 1e-15);
    // I(2) = I(0) / sqrt(2)
    assert_relative_eq!(hermite_integral_1d(2), i0 * 0.5f64.sqrt(), epsilon = 1e-14);
    // I(4) = I(0) * sqrt(3/8)
    assert_relative_eq!(
        hermite_integral_1d(4),
        i0 * (3.0f64 / 8.0).sqrt(),
        epsilon = 1e-14
    );
}

/// Test the even-degree closed form `sqrt(2pi) (j-1)!! / sqrt(j! sqrt(pi))`.
#[test]
fn test_integral_closed_form() {
    for degree in (0..=8).step_by(2) {
        let mut double_fact = 1.0;
        let mut fact = 1.0;
        for j in 1..=degree {
            fact *= j as f64;
            if j % 2 == 1 {
                double_fact *= j as f64;
            }
        }
        let expected = (2.0 * PI).sqrt() * double_fact / (fact * PI.sqrt()).sqrt();
        assert_relative_eq!(hermite_integral_1d(degree), expected, epsilon = 1e-13);
    }
}

/// Test that even-degree integrals decrease monotonically.
#[test]
fn test_integral_monotone_decreasing() {
    let mut previous = hermite_integral_1d(0);
    for degree in (2..=12).step_by(2) {
        let current = hermite_integral_1d(degree);
        assert!(current > 0.0);
        assert!(current < previous);
        previous = current;
    }
}
