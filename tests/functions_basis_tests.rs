#![cfg(feature = "dev")]
//! Tests for multi-component shapelet bases.
//!
//! These tests verify the amplitude-to-coefficient remapping machinery:
//! - component validation and chaining
//! - radius scaling and basis merging
//! - flux normalization of amplitude columns
//! - materializing functions from amplitude vectors
//!
//! ## Test Organization
//!
//! 1. **Construction** - Widths, components, validation
//! 2. **Scaling and Merging** - Radius updates and column padding
//! 3. **Normalization** - Unit-flux amplitudes
//! 4. **Materialization** - make_function output

use approx::assert_relative_eq;

use shapelet_rs::internals::functions::basis::MultiShapeletBasis;
use shapelet_rs::internals::functions::shapelet::ShapeletFunction;
use shapelet_rs::internals::geometry::core::Quadrupole;
use shapelet_rs::internals::geometry::ellipse::Ellipse;
use shapelet_rs::internals::geometry::transforms::Point2;
use shapelet_rs::internals::primitives::errors::ShapeletError;

const FLUX: f64 = ShapeletFunction::FLUX_FACTOR;

// ============================================================================
// Construction
// ============================================================================

/// Test an empty basis.
#[test]
fn test_empty_basis() {
    let basis = MultiShapeletBasis::new(2);
    assert_eq!(basis.width(), 2);
    assert!(basis.components().is_empty());
}

/// Test component accessors after adding.
#[test]
fn test_add_component() {
    let mut basis = MultiShapeletBasis::new(2);
    basis.add_component(1.5, 1, vec![0.0; 6]).unwrap();

    let component = &basis.components()[0];
    assert_eq!(component.radius(), 1.5);
    assert_eq!(component.order(), 1);
    assert_eq!(component.matrix().len(), 6);
}

/// Test that add_component chains.
#[test]
fn test_add_component_chaining() {
    let mut basis = MultiShapeletBasis::new(1);
    basis
        .add_component(1.0, 0, vec![1.0])
        .unwrap()
        .add_component(2.0, 0, vec![0.5])
        .unwrap();
    assert_eq!(basis.components().len(), 2);
}

/// Test radius validation.
#[test]
fn test_add_component_invalid_radius() {
    let mut basis = MultiShapeletBasis::new(1);
    let err = basis.add_component(0.0, 0, vec![1.0]).unwrap_err();
    assert!(matches!(err, ShapeletError::InvalidRadius(r) if r == 0.0));

    assert!(basis.add_component(-2.0, 0, vec![1.0]).is_err());
    assert!(basis.add_component(f64::NAN, 0, vec![1.0]).is_err());
    assert!(basis.add_component(f64::INFINITY, 0, vec![1.0]).is_err());
    assert!(basis.components().is_empty());
}

/// Test matrix-shape validation.
#[test]
fn test_add_component_wrong_shape() {
    // Order 1 with width 2 needs a 3 x 2 matrix.
    let mut basis = MultiShapeletBasis::new(2);
    let err = basis.add_component(1.0, 1, vec![0.0; 5]).unwrap_err();
    match err {
        ShapeletError::ComponentShape { expected, got } => {
            assert_eq!(expected, 6);
            assert_eq!(got, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Scaling and Merging
// ============================================================================

/// Test that scale touches radii and nothing else.
#[test]
fn test_scale() {
    let mut basis = MultiShapeletBasis::new(1);
    basis
        .add_component(1.0, 0, vec![2.0])
        .unwrap()
        .add_component(3.0, 0, vec![5.0])
        .unwrap();

    basis.scale(2.0);
    assert_eq!(basis.components()[0].radius(), 2.0);
    assert_eq!(basis.components()[1].radius(), 6.0);
    assert_eq!(basis.components()[0].matrix(), &[2.0]);
    assert_eq!(basis.components()[1].matrix(), &[5.0]);
}

/// Test merged widths and column padding.
#[test]
fn test_merged_layout() {
    let mut left = MultiShapeletBasis::new(1);
    left.add_component(1.0, 0, vec![2.0]).unwrap();
    let mut right = MultiShapeletBasis::new(2);
    right.add_component(2.0, 0, vec![3.0, 4.0]).unwrap();

    let merged = left.merged(&right);
    assert_eq!(merged.width(), 3);
    assert_eq!(merged.components().len(), 2);
    // Left components fill the leading column, right ones the trailing two.
    assert_eq!(merged.components()[0].matrix(), &[2.0, 0.0, 0.0]);
    assert_eq!(merged.components()[1].matrix(), &[0.0, 3.0, 4.0]);
}

/// Test merged padding across multiple matrix rows.
#[test]
fn test_merged_multi_row() {
    let mut left = MultiShapeletBasis::new(1);
    left.add_component(1.0, 0, vec![9.0]).unwrap();
    let mut right = MultiShapeletBasis::new(2);
    right
        .add_component(1.0, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .unwrap();

    let merged = left.merged(&right);
    assert_eq!(
        merged.components()[1].matrix(),
        &[0.0, 1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 6.0]
    );
}

// ============================================================================
// Normalization
// ============================================================================

/// Test normalizing a single-Gaussian amplitude.
#[test]
fn test_normalize_single() {
    let mut basis = MultiShapeletBasis::new(1);
    basis.add_component(1.0, 0, vec![1.0]).unwrap();
    basis.normalize();
    assert_relative_eq!(basis.components()[0].matrix()[0], 1.0 / FLUX, epsilon = 1e-14);

    // The materialized profile now has unit flux.
    let function = basis
        .make_function(&Ellipse::from_core(Quadrupole::circle(1.3)), &[1.0])
        .unwrap();
    assert_relative_eq!(function.integrate(), 1.0, epsilon = 1e-13);
}

/// Test that a zero-flux amplitude column is left unchanged.
#[test]
fn test_normalize_zero_flux_column() {
    // Column 0 carries flux through the leading row; column 1 only feeds
    // odd basis functions and has none.
    let mut basis = MultiShapeletBasis::new(2);
    basis
        .add_component(1.0, 1, vec![1.0, 0.0, 0.0, 3.0, 0.0, 0.0])
        .unwrap();
    basis.normalize();

    let matrix = basis.components()[0].matrix();
    assert_relative_eq!(matrix[0], 1.0 / FLUX, epsilon = 1e-14);
    assert_eq!(matrix[3], 3.0);
}

/// Test normalization spanning two components.
#[test]
fn test_normalize_across_components() {
    // One amplitude feeding two Gaussians: total flux 3 F, so both entries
    // shrink by that factor.
    let mut basis = MultiShapeletBasis::new(1);
    basis
        .add_component(1.0, 0, vec![1.0])
        .unwrap()
        .add_component(2.0, 0, vec![2.0])
        .unwrap();
    basis.normalize();

    assert_relative_eq!(basis.components()[0].matrix()[0], 1.0 / (3.0 * FLUX), epsilon = 1e-14);
    assert_relative_eq!(basis.components()[1].matrix()[0], 2.0 / (3.0 * FLUX), epsilon = 1e-14);

    let function = basis
        .make_function(&Ellipse::from_core(Quadrupole::unit_circle()), &[1.0])
        .unwrap();
    assert_relative_eq!(function.integrate(), 1.0, epsilon = 1e-13);
}

// ============================================================================
// Materialization
// ============================================================================

/// Test amplitude mixing into packed coefficients.
#[test]
fn test_make_function_mixing() {
    let mut basis = MultiShapeletBasis::new(2);
    basis.add_component(1.0, 0, vec![0.5, 1.5]).unwrap();

    let function = basis
        .make_function(&Ellipse::from_core(Quadrupole::unit_circle()), &[2.0, 3.0])
        .unwrap();
    // 0.5*2 + 1.5*3 = 5.5
    assert_eq!(function.components()[0].coefficients(), &[5.5]);
}

/// Test row-wise mixing for an order-1 component.
#[test]
fn test_make_function_mixing_rows() {
    let mut basis = MultiShapeletBasis::new(2);
    basis
        .add_component(1.0, 1, vec![1.0, 0.0, 0.0, 2.0, 0.0, 0.0])
        .unwrap();

    let function = basis
        .make_function(&Ellipse::from_core(Quadrupole::unit_circle()), &[2.0, 3.0])
        .unwrap();
    assert_eq!(function.components()[0].coefficients(), &[2.0, 6.0, 0.0]);
}

/// Test that component radii scale the reference ellipse.
#[test]
fn test_make_function_scales_ellipse() {
    let mut basis = MultiShapeletBasis::new(1);
    basis.add_component(2.5, 0, vec![1.0]).unwrap();

    let reference = Ellipse::new(Quadrupole::circle(1.0), Point2::new(1.0, -1.0));
    let function = basis.make_function(&reference, &[1.0]).unwrap();

    let component = &function.components()[0];
    assert_eq!(component.ellipse().core, Quadrupole::circle(2.5));
    assert_eq!(component.ellipse().center, Point2::new(1.0, -1.0));
}

/// Test total flux across components.
#[test]
fn test_make_function_total_flux() {
    let mut basis = MultiShapeletBasis::new(2);
    basis
        .add_component(1.0, 0, vec![0.5, 1.5])
        .unwrap()
        .add_component(2.0, 0, vec![1.0, 0.0])
        .unwrap();

    let function = basis
        .make_function(&Ellipse::from_core(Quadrupole::unit_circle()), &[2.0, 3.0])
        .unwrap();
    // Component fluxes (5.5 + 2.0) * FLUX_FACTOR.
    assert_relative_eq!(function.integrate(), 7.5 * FLUX, epsilon = 1e-12);
}

/// Test the amplitude-count validation.
#[test]
fn test_make_function_wrong_count() {
    let mut basis = MultiShapeletBasis::new(2);
    basis.add_component(1.0, 0, vec![1.0, 0.0]).unwrap();

    let err = basis
        .make_function(&Ellipse::default(), &[1.0, 2.0, 3.0])
        .unwrap_err();
    match err {
        ShapeletError::InvalidCoefficients { expected, got } => {
            assert_eq!(expected, 2);
            assert_eq!(got, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
