//! Coordinate normalization against an ellipse.
//!
//! ## Purpose
//!
//! Every builder variant starts an evaluation the same way: map the sample
//! coordinates through the ellipse's grid transform so the basis functions
//! can be evaluated on the unit circle. This module owns that step and the
//! cheap radius rescaling used between components that share an ellipse.
//!
//! ## Key concepts
//!
//! * **Determinant factor**: [`read_ellipse`] returns `det(L)` of the grid
//!   transform's linear part. Multiplying sample values by it keeps total
//!   flux independent of the ellipse size.
//! * **Rescaling**: growing the ellipse by `factor` divides the normalized
//!   coordinates by `factor`, including the translated center. The
//!   determinant factor from the original read is *not* adjusted; component
//!   columns of a multi-component evaluation share the base determinant.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::geometry::ellipse::Ellipse;
use crate::primitives::errors::ShapeletError;

/// Fill `xt`/`yt` with the grid-transformed sample coordinates and return
/// the determinant factor.
///
/// Fails when the ellipse core is not positive definite; `xt`/`yt` are
/// unspecified afterwards.
pub fn read_ellipse<T: Float>(
    xt: &mut [T],
    yt: &mut [T],
    x: &[T],
    y: &[T],
    ellipse: &Ellipse,
) -> Result<T, ShapeletError> {
    let transform = ellipse.grid_transform()?;
    let xx = T::from(transform.linear.xx).unwrap();
    let xy = T::from(transform.linear.xy).unwrap();
    let yx = T::from(transform.linear.yx).unwrap();
    let yy = T::from(transform.linear.yy).unwrap();
    let tx = T::from(transform.translation.x).unwrap();
    let ty = T::from(transform.translation.y).unwrap();

    for s in 0..x.len() {
        xt[s] = xx * x[s] + xy * y[s] + tx;
        yt[s] = yx * x[s] + yy * y[s] + ty;
    }
    Ok(T::from(transform.linear.determinant()).unwrap())
}

/// Rescale normalized coordinates in place for an ellipse grown by
/// `factor`.
pub fn rescale<T: Float>(xt: &mut [T], yt: &mut [T], factor: T) {
    for value in xt.iter_mut() {
        *value = *value / factor;
    }
    for value in yt.iter_mut() {
        *value = *value / factor;
    }
}
