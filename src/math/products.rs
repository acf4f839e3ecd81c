//! Dense accumulation kernels for design-matrix assembly.
//!
//! ## Purpose
//!
//! This module holds the inner loops that dominate matrix assembly: the
//! per-column accumulation `out[s] += envelope[s] * x[s] * y[s]` over all
//! samples, and the small dense products that mix staged basis blocks
//! through remapping or convolution matrices.
//!
//! ## Design notes
//!
//! * **Precision-based dispatch**: the [`BasisLinalg`] trait routes `f64`
//!   through an explicit two-lane SIMD path (via the `wide` crate) and
//!   `f32` through a scalar path, mirroring how the rest of the crate is
//!   generic over `Float`.
//! * **Strided output**: output matrices are sample-major, so one basis
//!   column lives at a fixed offset with stride `basis_size`. The SIMD path
//!   therefore vectorizes the loads (envelope and table rows are
//!   contiguous) and scatters two scalar stores per iteration.
//! * **Mixing matrices stay `f64`**: remapping and convolution matrices are
//!   computed in `f64` and converted element-wise during the product, which
//!   is a no-op when `T = f64`.

// External dependencies
use num_traits::Float;
use wide::f64x2;

// ============================================================================
// BasisLinalg
// ============================================================================

/// Floating-point scalars that can drive the assembly kernels.
///
/// Implemented for `f32` (scalar loops) and `f64` (SIMD loops). The methods
/// are associated functions so callers dispatch on the element type of the
/// output matrix, exactly where the precision decision lives.
pub trait BasisLinalg: Float {
    /// Accumulate one basis column into a sample-major output matrix:
    ///
    /// ```text
    /// out[s * stride + offset] += envelope[s] * x_values[s] * y_values[s]
    /// ```
    ///
    /// for every sample `s`.
    fn accumulate_column(
        out: &mut [Self],
        stride: usize,
        offset: usize,
        envelope: &[Self],
        x_values: &[Self],
        y_values: &[Self],
    );
}

impl BasisLinalg for f64 {
    #[inline]
    fn accumulate_column(
        out: &mut [f64],
        stride: usize,
        offset: usize,
        envelope: &[f64],
        x_values: &[f64],
        y_values: &[f64],
    ) {
        accumulate_column_simd(out, stride, offset, envelope, x_values, y_values);
    }
}

impl BasisLinalg for f32 {
    #[inline]
    fn accumulate_column(
        out: &mut [f32],
        stride: usize,
        offset: usize,
        envelope: &[f32],
        x_values: &[f32],
        y_values: &[f32],
    ) {
        accumulate_column_scalar(out, stride, offset, envelope, x_values, y_values);
    }
}

// ============================================================================
// Column accumulation kernels
// ============================================================================

/// Scalar column accumulation, generic over `Float`.
#[inline]
pub fn accumulate_column_scalar<T: Float>(
    out: &mut [T],
    stride: usize,
    offset: usize,
    envelope: &[T],
    x_values: &[T],
    y_values: &[T],
) {
    let n = envelope.len();
    debug_assert_eq!(x_values.len(), n);
    debug_assert_eq!(y_values.len(), n);
    for s in 0..n {
        let cell = s * stride + offset;
        out[cell] = out[cell] + envelope[s] * x_values[s] * y_values[s];
    }
}

/// SIMD column accumulation for `f64` using two-lane vectors.
///
/// The three input slices are contiguous, so loads vectorize cleanly; the
/// strided output cells are updated with two scalar stores per iteration.
#[inline]
pub fn accumulate_column_simd(
    out: &mut [f64],
    stride: usize,
    offset: usize,
    envelope: &[f64],
    x_values: &[f64],
    y_values: &[f64],
) {
    let n = envelope.len();
    debug_assert_eq!(x_values.len(), n);
    debug_assert_eq!(y_values.len(), n);
    debug_assert!(out.len() >= n.saturating_sub(1) * stride + offset + 1 || n == 0);

    let mut s = 0;
    while s + 2 <= n {
        // SAFETY: s + 1 < n is guaranteed by the loop condition, and the
        // output cells lie below the bound asserted above.
        unsafe {
            let env = f64x2::new([*envelope.get_unchecked(s), *envelope.get_unchecked(s + 1)]);
            let xs = f64x2::new([*x_values.get_unchecked(s), *x_values.get_unchecked(s + 1)]);
            let ys = f64x2::new([*y_values.get_unchecked(s), *y_values.get_unchecked(s + 1)]);
            let products = (env * xs * ys).to_array();
            *out.get_unchecked_mut(s * stride + offset) += products[0];
            *out.get_unchecked_mut((s + 1) * stride + offset) += products[1];
        }
        s += 2;
    }
    while s < n {
        out[s * stride + offset] += envelope[s] * x_values[s] * y_values[s];
        s += 1;
    }
}

// ============================================================================
// Block products
// ============================================================================

/// Accumulate a staged basis block through a mixing matrix:
///
/// ```text
/// out[s * cols + c] += sum_r block[s * rows + r] * matrix[r * cols + c]
/// ```
///
/// `block` is sample-major with `rows` staged columns per sample; `matrix`
/// is row-major `rows x cols`.
pub fn accumulate_product<T: Float>(
    out: &mut [T],
    block: &[T],
    matrix: &[f64],
    samples: usize,
    rows: usize,
    cols: usize,
) {
    debug_assert!(out.len() >= samples * cols);
    debug_assert!(block.len() >= samples * rows);
    debug_assert!(matrix.len() >= rows * cols);
    for s in 0..samples {
        let staged = &block[s * rows..(s + 1) * rows];
        let target = &mut out[s * cols..(s + 1) * cols];
        for (r, &value) in staged.iter().enumerate() {
            let weights = &matrix[r * cols..(r + 1) * cols];
            for (cell, &w) in target.iter_mut().zip(weights) {
                *cell = *cell + value * T::from(w).unwrap();
            }
        }
    }
}

/// Overwrite `out` with a staged basis block times a mixing matrix.
///
/// Same shapes as [`accumulate_product`], but every output cell is assigned
/// rather than accumulated.
pub fn assign_product<T: Float>(
    out: &mut [T],
    block: &[T],
    matrix: &[f64],
    samples: usize,
    rows: usize,
    cols: usize,
) {
    debug_assert!(out.len() >= samples * cols);
    for cell in &mut out[..samples * cols] {
        *cell = T::zero();
    }
    accumulate_product(out, block, matrix, samples, rows, cols);
}

/// Row-major `f64` matrix product: `out = a * b` with `a` of shape
/// `rows x inner` and `b` of shape `inner x cols`.
pub fn multiply_into(
    out: &mut [f64],
    a: &[f64],
    b: &[f64],
    rows: usize,
    inner: usize,
    cols: usize,
) {
    debug_assert!(out.len() >= rows * cols);
    debug_assert!(a.len() >= rows * inner);
    debug_assert!(b.len() >= inner * cols);
    out[..rows * cols].fill(0.0);
    for r in 0..rows {
        let target = &mut out[r * cols..(r + 1) * cols];
        for k in 0..inner {
            let value = a[r * inner + k];
            if value == 0.0 {
                continue;
            }
            let weights = &b[k * cols..(k + 1) * cols];
            for (cell, &w) in target.iter_mut().zip(weights) {
                *cell += value * w;
            }
        }
    }
}
