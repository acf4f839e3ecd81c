//! Per-variant evaluation kernels.
//!
//! ## Purpose
//!
//! The builder variants share three kernels over normalized coordinates:
//! accumulating a pure Gaussian column, filling the shared Gaussian
//! envelope, and accumulating the full packed Gauss-Hermite block from the
//! per-axis recurrence tables.
//!
//! ## Key concepts
//!
//! * **Envelope sharing**: `exp(-0.5 r^2) * det_factor` is computed once
//!   per sample and reused by every basis column; the per-function
//!   normalizations live in the Hermite tables.
//! * **Accumulation**: all kernels add into their output, so callers zero
//!   exactly once per evaluation and components can stack.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::hermite::fill_hermite_series;
use crate::math::products::BasisLinalg;
use crate::primitives::index::PackedIndex;

/// Normalization of the unit 2-d Gaussian basis function, `1 / sqrt(pi)`.
const GAUSSIAN_NORM: f64 = 0.564_189_583_547_756_3;

/// Accumulate the single Gaussian column into `out`.
///
/// `out[s] += GAUSSIAN_NORM * det_factor * exp(-0.5 * r^2)` with `r` the
/// normalized radius of sample `s`.
pub fn fill_gaussian<T: Float>(out: &mut [T], xt: &[T], yt: &[T], det_factor: T) {
    let half = T::from(0.5).unwrap();
    let norm = T::from(GAUSSIAN_NORM).unwrap() * det_factor;
    for s in 0..xt.len() {
        let r2 = xt[s] * xt[s] + yt[s] * yt[s];
        out[s] = out[s] + norm * (-half * r2).exp();
    }
}

/// Fill the shared envelope: `envelope[s] = det_factor * exp(-0.5 * r^2)`.
pub fn fill_envelope<T: Float>(envelope: &mut [T], xt: &[T], yt: &[T], det_factor: T) {
    let half = T::from(0.5).unwrap();
    for s in 0..xt.len() {
        let r2 = xt[s] * xt[s] + yt[s] * yt[s];
        envelope[s] = det_factor * (-half * r2).exp();
    }
}

/// Fill both per-axis Hermite tables up to `order`.
pub fn fill_tables<T: Float>(
    x_table: &mut [T],
    y_table: &mut [T],
    order: usize,
    xt: &[T],
    yt: &[T],
) {
    fill_hermite_series(x_table, order, xt);
    fill_hermite_series(y_table, order, yt);
}

/// Accumulate every packed basis column of `order` into a sample-major
/// output with the given column stride.
///
/// Column `i` receives `envelope[s] * x_table[i.x()][s] * y_table[i.y()][s]`
/// per sample, routed through the precision-specific kernel of
/// [`BasisLinalg`].
pub fn accumulate_basis<T: BasisLinalg>(
    out: &mut [T],
    stride: usize,
    order: usize,
    envelope: &[T],
    x_table: &[T],
    y_table: &[T],
) {
    let n = envelope.len();
    for i in PackedIndex::range(order) {
        let x_values = &x_table[i.x() * n..][..n];
        let y_values = &y_table[i.y() * n..][..n];
        T::accumulate_column(out, stride, i.index(), envelope, x_values, y_values);
    }
}
