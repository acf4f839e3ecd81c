//! Analytic convolution of Gauss-Hermite expansions.
//!
//! ## Purpose
//!
//! Convolving two Gauss-Hermite expansions yields another Gauss-Hermite
//! expansion on the convolved ellipse, with order equal to the sum of the
//! input orders. [`GaussHermiteConvolution`] computes the matrix of that
//! linear map from model coefficients to convolved coefficients, for a
//! fixed PSF and a model ellipse supplied per evaluation.
//!
//! ## Design notes
//!
//! The matrix is evaluated in the Fourier domain, where convolution is a
//! product and the basis functions are their own transforms up to phases:
//!
//! ```text
//! C[i, j] = 2 pi * sum_k b_k * sign(i, j, k)
//!         * integral( h_i(v) * h_j(Mm v) * h_k(Mp v) * exp(-|v|^2) dv )
//! ```
//!
//! with `Mm = Qm^(1/2) Qc^(-1/2)`, `Mp = Qp^(1/2) Qc^(-1/2)`, `Qc = Qm + Qp`,
//! `b_k` the PSF coefficients, and `h_n` the envelope-free Hermite products.
//! The three Gaussian envelopes merge into the single weight `exp(-|v|^2)`
//! after substituting `kappa = Qc^(-1/2) v`, which also turns the
//! convolved-basis argument into `v` itself. The `i^(|i| - |j| - |k|)`
//! phase from the Fourier eigenrelation reduces to a sign because terms
//! with odd `|i| + |j| + |k|` vanish by parity; those terms are skipped
//! outright instead of being left to cancel in floating point.
//!
//! The integrand is a polynomial of degree at most `2 * row_order` under a
//! Gaussian weight, so a tensor Gauss-Hermite rule with `row_order + 1`
//! points per axis evaluates it exactly. The rule, the sign table, and all
//! scratch live in the operator; evaluation allocates nothing.
//!
//! ## Invariants
//!
//! * `row_order == col_order + psf.order()`.
//! * With a zero-size PSF of coefficient `FLUX_FACTOR`, the matrix is the
//!   identity embedding (scaled by `FLUX_FACTOR * b_0` in general).

// Internal dependencies
use crate::functions::shapelet::ShapeletFunction;
use crate::geometry::ellipse::Ellipse;
use crate::geometry::transforms::Point2;
use crate::math::hermite::fill_hermite_point;
use crate::math::quadrature::GaussHermiteRule;
use crate::primitives::errors::ShapeletError;
use crate::primitives::index::{basis_size, PackedIndex};

// ============================================================================
// GaussHermiteConvolution
// ============================================================================

/// Matrix of the linear map from model coefficients to convolved
/// coefficients, for a fixed PSF.
#[derive(Debug, Clone)]
pub struct GaussHermiteConvolution {
    col_order: usize,
    row_order: usize,
    psf_order: usize,
    psf_ellipse: Ellipse,
    psf_coefficients: Vec<f64>,
    rule: GaussHermiteRule,
    /// Parity/sign per `(k, i, j)` triple: `0` when the integral vanishes,
    /// otherwise `+1` or `-1`.
    signs: Vec<i8>,
    result: Vec<f64>,
    convolved_x: Vec<f64>,
    convolved_y: Vec<f64>,
    model_x: Vec<f64>,
    model_y: Vec<f64>,
    psf_x: Vec<f64>,
    psf_y: Vec<f64>,
    convolved_packed: Vec<f64>,
    model_packed: Vec<f64>,
}

impl GaussHermiteConvolution {
    /// Configure the operator for a model of order `col_order` and the
    /// given PSF.
    pub fn new(col_order: usize, psf: &ShapeletFunction) -> Self {
        let psf_order = psf.order();
        let row_order = col_order + psf_order;
        let row_size = basis_size(row_order);
        let col_size = basis_size(col_order);
        let psf_size = basis_size(psf_order);

        let mut signs = vec![0i8; psf_size * row_size * col_size];
        for k in PackedIndex::range(psf_order) {
            for i in PackedIndex::range(row_order) {
                let base = (k.index() * row_size + i.index()) * col_size;
                for j in PackedIndex::range(col_order) {
                    if (i.order() + j.order() + k.order()) % 2 != 0 {
                        continue;
                    }
                    let half = (i.order() as i64 - j.order() as i64 - k.order() as i64) / 2;
                    signs[base + j.index()] = if half % 2 == 0 { 1 } else { -1 };
                }
            }
        }

        GaussHermiteConvolution {
            col_order,
            row_order,
            psf_order,
            psf_ellipse: *psf.ellipse(),
            psf_coefficients: psf.coefficients().to_vec(),
            rule: GaussHermiteRule::new(row_order + 1),
            signs,
            result: vec![0.0; row_size * col_size],
            convolved_x: vec![0.0; row_order + 1],
            convolved_y: vec![0.0; row_order + 1],
            model_x: vec![0.0; col_order + 1],
            model_y: vec![0.0; col_order + 1],
            psf_x: vec![0.0; psf_order + 1],
            psf_y: vec![0.0; psf_order + 1],
            convolved_packed: vec![0.0; row_size],
            model_packed: vec![0.0; col_size],
        }
    }

    /// Order indexing the matrix rows (convolved expansion).
    #[inline]
    pub fn row_order(&self) -> usize {
        self.row_order
    }

    /// Order indexing the matrix columns (model expansion).
    #[inline]
    pub fn col_order(&self) -> usize {
        self.col_order
    }

    /// Number of matrix rows, `basis_size(row_order)`.
    #[inline]
    pub fn row_size(&self) -> usize {
        basis_size(self.row_order)
    }

    /// Number of matrix columns, `basis_size(col_order)`.
    #[inline]
    pub fn col_size(&self) -> usize {
        basis_size(self.col_order)
    }

    /// Compute the convolution matrix for a model on `ellipse`.
    ///
    /// On success `ellipse` is replaced by the convolved ellipse (moments
    /// and centers add) and the returned slice holds the row-major
    /// `row_size x col_size` matrix, valid until the next evaluation.
    ///
    /// Fails with [`SingularEllipse`](ShapeletError::SingularEllipse) when
    /// the *convolved* core is not positive definite; either input core on
    /// its own may be degenerate.
    pub fn evaluate(&mut self, ellipse: &mut Ellipse) -> Result<&[f64], ShapeletError> {
        let q_model = ellipse.core;
        let q_psf = self.psf_ellipse.core;
        let q_convolved = q_model.convolved(&q_psf);

        let unit_map = q_convolved.inverse_sqrt()?;
        let model_map = q_model.matrix_sqrt().compose(&unit_map);
        let psf_map = q_psf.matrix_sqrt().compose(&unit_map);
        *ellipse = ellipse.convolved(&self.psf_ellipse);

        let row_size = self.row_size();
        let col_size = self.col_size();
        self.result.fill(0.0);

        let points = self.rule.points();
        let weights = self.rule.weights();
        for a in 0..points.len() {
            for b in 0..points.len() {
                let node = Point2::new(points[a], points[b]);
                let weight = weights[a] * weights[b];
                let model_arg = model_map.apply(node);
                let psf_arg = psf_map.apply(node);

                fill_hermite_point(&mut self.convolved_x, node.x);
                fill_hermite_point(&mut self.convolved_y, node.y);
                fill_hermite_point(&mut self.model_x, model_arg.x);
                fill_hermite_point(&mut self.model_y, model_arg.y);
                fill_hermite_point(&mut self.psf_x, psf_arg.x);
                fill_hermite_point(&mut self.psf_y, psf_arg.y);
                for i in PackedIndex::range(self.row_order) {
                    self.convolved_packed[i.index()] =
                        self.convolved_x[i.x()] * self.convolved_y[i.y()];
                }
                for j in PackedIndex::range(self.col_order) {
                    self.model_packed[j.index()] = self.model_x[j.x()] * self.model_y[j.y()];
                }

                for k in PackedIndex::range(self.psf_order) {
                    let psf_value = self.psf_coefficients[k.index()]
                        * self.psf_x[k.x()]
                        * self.psf_y[k.y()];
                    let node_weight = weight * psf_value;
                    if node_weight == 0.0 {
                        continue;
                    }
                    for i in 0..row_size {
                        let row_weight = node_weight * self.convolved_packed[i];
                        let signs =
                            &self.signs[(k.index() * row_size + i) * col_size..][..col_size];
                        let row = &mut self.result[i * col_size..(i + 1) * col_size];
                        for j in 0..col_size {
                            let sign = signs[j];
                            if sign != 0 {
                                row[j] += f64::from(sign) * row_weight * self.model_packed[j];
                            }
                        }
                    }
                }
            }
        }

        let norm = 2.0 * core::f64::consts::PI;
        for value in &mut self.result {
            *value *= norm;
        }
        Ok(&self.result)
    }
}
