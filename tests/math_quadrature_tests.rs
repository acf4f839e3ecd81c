#![cfg(feature = "dev")]
//! Tests for Gauss-Hermite quadrature rules.
//!
//! These tests verify the Golub-Welsch construction against closed-form
//! rules and analytic Gaussian moments:
//! - node/weight values for small rules
//! - total weight, symmetry, ordering
//! - polynomial exactness and basis orthonormality
//!
//! ## Test Organization
//!
//! 1. **Small Rules** - Closed-form nodes and weights for n = 1, 2, 3
//! 2. **Structure** - Total weight, symmetry, ascending order
//! 3. **Exactness** - Gaussian moments at the minimal rule size
//! 4. **Orthonormality** - Weighted products of basis functions

use approx::assert_relative_eq;
use std::f64::consts::PI;

use shapelet_rs::internals::math::hermite::fill_hermite_point;
use shapelet_rs::internals::math::quadrature::GaussHermiteRule;

/// Integrate `f(t) exp(-t^2)` with the given rule.
fn integrate(rule: &GaussHermiteRule, f: impl Fn(f64) -> f64) -> f64 {
    rule.points()
        .iter()
        .zip(rule.weights())
        .map(|(&t, &w)| w * f(t))
        .sum()
}

// ============================================================================
// Small Rules
// ============================================================================

/// Test the one-point rule: node 0, weight sqrt(pi).
#[test]
fn test_rule_one_point() {
    let rule = GaussHermiteRule::new(1);
    assert_eq!(rule.len(), 1);
    assert_relative_eq!(rule.points()[0], 0.0, epsilon = 1e-14);
    assert_relative_eq!(rule.weights()[0], PI.sqrt(), epsilon = 1e-14);
}

/// Test the two-point rule: nodes +/- 1/sqrt(2), weights sqrt(pi)/2.
#[test]
fn test_rule_two_point() {
    let rule = GaussHermiteRule::new(2);
    let node = 0.5f64.sqrt();
    assert_relative_eq!(rule.points()[0], -node, epsilon = 1e-13);
    assert_relative_eq!(rule.points()[1], node, epsilon = 1e-13);
    assert_relative_eq!(rule.weights()[0], PI.sqrt() / 2.0, epsilon = 1e-13);
    assert_relative_eq!(rule.weights()[1], PI.sqrt() / 2.0, epsilon = 1e-13);
}

/// Test the three-point rule: nodes 0 and +/- sqrt(3/2).
#[test]
fn test_rule_three_point() {
    let rule = GaussHermiteRule::new(3);
    let node = 1.5f64.sqrt();
    assert_relative_eq!(rule.points()[0], -node, epsilon = 1e-13);
    assert_relative_eq!(rule.points()[1], 0.0, epsilon = 1e-13);
    assert_relative_eq!(rule.points()[2], node, epsilon = 1e-13);
    // Outer weights sqrt(pi)/6, central weight 2 sqrt(pi)/3.
    assert_relative_eq!(rule.weights()[0], PI.sqrt() / 6.0, epsilon = 1e-12);
    assert_relative_eq!(rule.weights()[1], 2.0 * PI.sqrt() / 3.0, epsilon = 1e-12);
    assert_relative_eq!(rule.weights()[2], PI.sqrt() / 6.0, epsilon = 1e-12);
}

// ============================================================================
// Structure
// ============================================================================

/// Test that weights sum to sqrt(pi) for every rule size.
#[test]
fn test_total_weight() {
    for n in 1..=10 {
        let rule = GaussHermiteRule::new(n);
        let total: f64 = rule.weights().iter().sum();
        assert_relative_eq!(total, PI.sqrt(), epsilon = 1e-13);
    }
}

/// Test node symmetry about the origin.
#[test]
fn test_node_symmetry() {
    for n in [2, 5, 8, 20] {
        let rule = GaussHermiteRule::new(n);
        let points = rule.points();
        for i in 0..n {
            assert_relative_eq!(points[i], -points[n - 1 - i], epsilon = 1e-12);
        }
    }
}

/// Test that nodes come out in ascending order.
#[test]
fn test_nodes_ascending() {
    let rule = GaussHermiteRule::new(12);
    for pair in rule.points().windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

/// Test that all weights are positive.
#[test]
fn test_weights_positive() {
    for n in [1, 4, 9, 16] {
        let rule = GaussHermiteRule::new(n);
        assert!(rule.weights().iter().all(|&w| w > 0.0));
    }
}

/// Test len and is_empty.
#[test]
fn test_len() {
    let rule = GaussHermiteRule::new(6);
    assert_eq!(rule.len(), 6);
    assert_eq!(rule.points().len(), 6);
    assert_eq!(rule.weights().len(), 6);
    assert!(!rule.is_empty());
}

/// Test Clone and Debug.
#[test]
fn test_rule_clone_debug() {
    let rule = GaussHermiteRule::new(4);
    let cloned = rule.clone();
    assert_eq!(rule.points(), cloned.points());
    assert_eq!(rule.weights(), cloned.weights());
    assert!(format!("{:?}", rule).contains("GaussHermiteRule"));
}

// ============================================================================
// Exactness
// ============================================================================

/// Test Gaussian moments at the minimal exact rule size.
#[test]
fn test_moments_minimal_rules() {
    // integral(t^2 exp(-t^2)) = sqrt(pi)/2, degree 2, exact at n = 2.
    let rule = GaussHermiteRule::new(2);
    assert_relative_eq!(integrate(&rule, |t| t * t), PI.sqrt() / 2.0, epsilon = 1e-12);

    // integral(t^4 exp(-t^2)) = 3 sqrt(pi)/4, degree 4, exact at n = 3.
    let rule = GaussHermiteRule::new(3);
    assert_relative_eq!(
        integrate(&rule, |t| t.powi(4)),
        3.0 * PI.sqrt() / 4.0,
        epsilon = 1e-12
    );

    // integral(t^6 exp(-t^2)) = 15 sqrt(pi)/8, degree 6, exact at n = 4.
    let rule = GaussHermiteRule::new(4);
    assert_relative_eq!(
        integrate(&rule, |t| t.powi(6)),
        15.0 * PI.sqrt() / 8.0,
        epsilon = 1e-12
    );
}

/// Test even moments with a generous rule.
#[test]
fn test_moments_large_rule() {
    let rule = GaussHermiteRule::new(10);
    // integral(t^(2m) exp(-t^2)) = (2m - 1)!! sqrt(pi) / 2^m
    let mut expected = PI.sqrt();
    for m in 1..=6 {
        expected *= (2 * m - 1) as f64 / 2.0;
        assert_relative_eq!(
            integrate(&rule, |t| t.powi(2 * m as i32)),
            expected,
            epsilon = 1e-11
        );
    }
}

/// Test that odd moments vanish.
#[test]
fn test_odd_moments_vanish() {
    let rule = GaussHermiteRule::new(7);
    for power in [1, 3, 5] {
        let value = integrate(&rule, |t| t.powi(power));
        assert!(value.abs() < 1e-13);
    }
}

// ============================================================================
// Orthonormality
// ============================================================================

/// Test basis orthonormality under the rule weight.
///
/// Without the Gaussian envelope the basis values satisfy
/// `integral(h_i h_j exp(-t^2)) = delta_ij`; an 8-point rule is exact for
/// every product with i + j <= 12.
#[test]
fn test_basis_orthonormality() {
    let rule = GaussHermiteRule::new(8);
    let mut values = vec![[0.0f64; 7]; rule.len()];
    for (k, &t) in rule.points().iter().enumerate() {
        fill_hermite_point(&mut values[k], t);
    }

    for i in 0..=6 {
        for j in 0..=6 {
            let sum: f64 = rule
                .weights()
                .iter()
                .enumerate()
                .map(|(k, &w)| w * values[k][i] * values[k][j])
                .sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(sum, expected, epsilon = 1e-12);
        }
    }
}
