#![cfg(feature = "dev")]
//! Tests for the per-variant evaluation kernels.
//!
//! These tests verify the shared inner steps of matrix evaluation over
//! normalized coordinates:
//! - the closed-form Gaussian column
//! - the shared envelope fill
//! - packed basis accumulation from the recurrence tables
//!
//! ## Test Organization
//!
//! 1. **Gaussian Column** - Values and accumulation
//! 2. **Envelope** - Assignment semantics
//! 3. **Basis Accumulation** - Hand loop comparison at order 1

use approx::assert_relative_eq;
use std::f64::consts::PI;

use shapelet_rs::internals::engine::evaluators::{
    accumulate_basis, fill_envelope, fill_gaussian, fill_tables,
};
use shapelet_rs::internals::math::hermite::{fill_hermite_series, BASIS_NORMALIZATION};

// ============================================================================
// Gaussian Column
// ============================================================================

/// Test Gaussian column values against the closed form.
#[test]
fn test_fill_gaussian_values() {
    // out[s] = det / sqrt(pi) * exp(-0.5 r^2)
    let xt = [0.0, 1.0, 0.0];
    let yt = [0.0, 0.0, 3.0];
    let mut out = [0.0f64; 3];
    fill_gaussian(&mut out, &xt, &yt, 2.0);

    let norm = 2.0 / PI.sqrt();
    assert_relative_eq!(out[0], norm, epsilon = 1e-14);
    assert_relative_eq!(out[1], norm * (-0.5f64).exp(), epsilon = 1e-14);
    assert_relative_eq!(out[2], norm * (-4.5f64).exp(), epsilon = 1e-14);
}

/// Test that the Gaussian column accumulates.
#[test]
fn test_fill_gaussian_accumulates() {
    let xt = [0.0];
    let yt = [0.0];
    let mut out = [0.0f64; 1];
    fill_gaussian(&mut out, &xt, &yt, 1.0);
    fill_gaussian(&mut out, &xt, &yt, 1.0);
    assert_relative_eq!(out[0], 2.0 / PI.sqrt(), epsilon = 1e-14);
}

// ============================================================================
// Envelope
// ============================================================================

/// Test envelope values and assignment semantics.
#[test]
fn test_fill_envelope_assigns() {
    let xt = [0.0, 1.0];
    let yt = [0.0, 1.0];
    let mut envelope = [99.0f64; 2];
    fill_envelope(&mut envelope, &xt, &yt, 0.5);

    // Prior contents are overwritten, not accumulated.
    assert_relative_eq!(envelope[0], 0.5, epsilon = 1e-15);
    assert_relative_eq!(envelope[1], 0.5 * (-1.0f64).exp(), epsilon = 1e-14);
}

/// Test that fill_tables matches the series fill per axis.
#[test]
fn test_fill_tables() {
    let xt = [0.5, -1.0];
    let yt = [2.0, 0.0];
    let mut x_table = [0.0f64; 6];
    let mut y_table = [0.0f64; 6];
    fill_tables(&mut x_table, &mut y_table, 2, &xt, &yt);

    let mut expected_x = [0.0f64; 6];
    let mut expected_y = [0.0f64; 6];
    fill_hermite_series(&mut expected_x, 2, &xt);
    fill_hermite_series(&mut expected_y, 2, &yt);
    assert_eq!(x_table, expected_x);
    assert_eq!(y_table, expected_y);
}

// ============================================================================
// Basis Accumulation
// ============================================================================

/// Test order-1 accumulation against a hand loop.
#[test]
fn test_accumulate_basis_order_one() {
    let xt = [0.3, -1.2, 2.0];
    let yt = [1.0, 0.4, -0.5];
    let n = xt.len();

    let mut envelope = [0.0f64; 3];
    fill_envelope(&mut envelope, &xt, &yt, 1.0);
    let mut x_table = vec![0.0f64; 2 * n];
    let mut y_table = vec![0.0f64; 2 * n];
    fill_tables(&mut x_table, &mut y_table, 1, &xt, &yt);

    let mut out = vec![0.0f64; n * 3];
    accumulate_basis(&mut out, 3, 1, &envelope, &x_table, &y_table);

    // Columns in packed order: (0,0), (1,0), (0,1).
    let norm = BASIS_NORMALIZATION;
    for s in 0..n {
        let phi0_x = norm;
        let phi1_x = 2.0f64.sqrt() * xt[s] * norm;
        let phi0_y = norm;
        let phi1_y = 2.0f64.sqrt() * yt[s] * norm;
        assert_relative_eq!(out[s * 3], envelope[s] * phi0_x * phi0_y, epsilon = 1e-14);
        assert_relative_eq!(out[s * 3 + 1], envelope[s] * phi1_x * phi0_y, epsilon = 1e-14);
        assert_relative_eq!(out[s * 3 + 2], envelope[s] * phi0_x * phi1_y, epsilon = 1e-14);
    }
}

/// Test that basis accumulation adds onto existing contents.
#[test]
fn test_accumulate_basis_accumulates() {
    let xt = [0.0];
    let yt = [0.0];
    let envelope = [1.0f64];
    let mut x_table = [0.0f64; 1];
    let mut y_table = [0.0f64; 1];
    fill_tables(&mut x_table, &mut y_table, 0, &xt, &yt);

    let mut out = [1.0f64];
    accumulate_basis(&mut out, 1, 0, &envelope, &x_table, &y_table);
    assert_relative_eq!(
        out[0],
        1.0 + BASIS_NORMALIZATION * BASIS_NORMALIZATION,
        epsilon = 1e-14
    );
}
