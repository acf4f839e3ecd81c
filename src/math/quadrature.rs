//! Gauss-Hermite quadrature rules.
//!
//! ## Purpose
//!
//! This module builds quadrature rules for integrals of the form
//! `integral(f(t) * exp(-t^2) dt)` over the real line. An `n`-point rule is
//! exact whenever `f` is a polynomial of degree at most `2n - 1`, which is
//! precisely the situation in the convolution operator: every integrand
//! there is a product of Hermite polynomials under a Gaussian weight.
//!
//! ## Design notes
//!
//! * **Golub-Welsch**: nodes are the eigenvalues of the symmetric
//!   tridiagonal Jacobi matrix of the Hermite polynomials (zero diagonal,
//!   off-diagonal `sqrt(k / 2)`), and each weight is `sqrt(pi)` times the
//!   squared first component of the corresponding normalized eigenvector.
//! * **Built once**: rules are constructed when an operator is configured
//!   and reused for every evaluation, so the eigendecomposition cost is
//!   amortized away.

// External dependencies
use nalgebra::DMatrix;

// ============================================================================
// GaussHermiteRule
// ============================================================================

/// An `n`-point Gauss-Hermite quadrature rule for the weight `exp(-t^2)`.
#[derive(Debug, Clone)]
pub struct GaussHermiteRule {
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussHermiteRule {
    /// Build the rule with `points` nodes.
    ///
    /// The rule integrates `p(t) * exp(-t^2)` exactly for polynomials `p`
    /// of degree at most `2 * points - 1`.
    pub fn new(points: usize) -> Self {
        debug_assert!(points > 0);
        let mut jacobi = DMatrix::<f64>::zeros(points, points);
        for k in 1..points {
            let beta = (k as f64 / 2.0).sqrt();
            jacobi[(k, k - 1)] = beta;
            jacobi[(k - 1, k)] = beta;
        }

        let eigen = jacobi.symmetric_eigen();
        let total = core::f64::consts::PI.sqrt();
        let mut rule: Vec<(f64, f64)> = (0..points)
            .map(|i| {
                let first = eigen.eigenvectors[(0, i)];
                (eigen.eigenvalues[i], total * first * first)
            })
            .collect();
        rule.sort_by(|a, b| a.0.total_cmp(&b.0));

        GaussHermiteRule {
            points: rule.iter().map(|&(t, _)| t).collect(),
            weights: rule.iter().map(|&(_, w)| w).collect(),
        }
    }

    /// Quadrature nodes in ascending order.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Weights matching [`points`](Self::points) element-wise.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the rule has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
