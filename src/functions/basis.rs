//! Multi-component shapelet bases.
//!
//! ## Purpose
//!
//! A [`MultiShapeletBasis`] defines a family of multi-component profiles
//! spanned by a small number of free amplitudes. Each component carries a
//! radius (scaling the reference ellipse), a Gauss-Hermite order, and a
//! remapping matrix from the shared amplitude vector to that component's
//! packed coefficients. Approximations to Sersic profiles as sums of
//! Gaussians take exactly this shape, and the matrix builders consume it
//! directly.
//!
//! ## Key concepts
//!
//! * **Width**: the number of shared amplitudes; every remapping matrix has
//!   `width` columns.
//! * **Remapping matrix**: row-major `basis_size(order) x width`; column `c`
//!   holds the packed coefficients contributed by amplitude `c`.
//!
//! ## Invariants
//!
//! * Component radii are finite and strictly positive.
//! * Every component matrix has exactly `basis_size(order) * width` entries.

// Internal dependencies
use crate::functions::multi::MultiShapeletFunction;
use crate::functions::shapelet::ShapeletFunction;
use crate::geometry::ellipse::Ellipse;
use crate::math::hermite::hermite_integral_1d;
use crate::primitives::errors::ShapeletError;
use crate::primitives::index::{basis_size, PackedIndex};

// ============================================================================
// MultiShapeletBasisComponent
// ============================================================================

/// One component of a [`MultiShapeletBasis`].
#[derive(Debug, Clone, PartialEq)]
pub struct MultiShapeletBasisComponent {
    radius: f64,
    order: usize,
    matrix: Vec<f64>,
}

impl MultiShapeletBasisComponent {
    /// Radius factor applied to the reference ellipse.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Gauss-Hermite order of the component.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Row-major `basis_size(order) x width` remapping matrix.
    #[inline]
    pub fn matrix(&self) -> &[f64] {
        &self.matrix
    }
}

// ============================================================================
// MultiShapeletBasis
// ============================================================================

/// A basis of multi-component profiles over `width` shared amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiShapeletBasis {
    width: usize,
    components: Vec<MultiShapeletBasisComponent>,
}

impl MultiShapeletBasis {
    /// An empty basis over `width` amplitudes.
    pub fn new(width: usize) -> Self {
        MultiShapeletBasis {
            width,
            components: Vec::new(),
        }
    }

    /// Number of shared amplitudes.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The components added so far.
    #[inline]
    pub fn components(&self) -> &[MultiShapeletBasisComponent] {
        &self.components
    }

    /// Add a component with the given radius, order, and row-major
    /// `basis_size(order) x width` remapping matrix.
    pub fn add_component(
        &mut self,
        radius: f64,
        order: usize,
        matrix: Vec<f64>,
    ) -> Result<&mut Self, ShapeletError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeletError::InvalidRadius(radius));
        }
        let expected = basis_size(order) * self.width;
        if matrix.len() != expected {
            return Err(ShapeletError::ComponentShape {
                expected,
                got: matrix.len(),
            });
        }
        self.components.push(MultiShapeletBasisComponent {
            radius,
            order,
            matrix,
        });
        Ok(self)
    }

    /// Multiply every component radius by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for component in &mut self.components {
            component.radius *= factor;
        }
    }

    /// Concatenate two bases over independent amplitude vectors.
    ///
    /// The result has `self.width() + other.width()` amplitudes; components
    /// of `self` use the leading block and components of `other` the
    /// trailing block.
    pub fn merged(&self, other: &MultiShapeletBasis) -> MultiShapeletBasis {
        let width = self.width + other.width;
        let mut components =
            Vec::with_capacity(self.components.len() + other.components.len());
        for component in &self.components {
            components.push(MultiShapeletBasisComponent {
                radius: component.radius,
                order: component.order,
                matrix: pad_columns(
                    &component.matrix,
                    basis_size(component.order),
                    self.width,
                    0,
                    width,
                ),
            });
        }
        for component in &other.components {
            components.push(MultiShapeletBasisComponent {
                radius: component.radius,
                order: component.order,
                matrix: pad_columns(
                    &component.matrix,
                    basis_size(component.order),
                    other.width,
                    self.width,
                    width,
                ),
            });
        }
        MultiShapeletBasis { width, components }
    }

    /// Rescale each amplitude so the profile it generates has unit flux.
    ///
    /// The per-amplitude flux is analytic and radius-independent, so this
    /// is a pure column scaling. Columns with zero net flux are left
    /// unchanged.
    pub fn normalize(&mut self) {
        let mut fluxes = vec![0.0; self.width];
        for component in &self.components {
            for i in PackedIndex::range(component.order) {
                let weight = hermite_integral_1d(i.x()) * hermite_integral_1d(i.y());
                if weight == 0.0 {
                    continue;
                }
                let row = &component.matrix[i.index() * self.width..][..self.width];
                for (flux, &value) in fluxes.iter_mut().zip(row) {
                    *flux += weight * value;
                }
            }
        }
        for component in &mut self.components {
            for row in component.matrix.chunks_exact_mut(self.width) {
                for (value, &flux) in row.iter_mut().zip(&fluxes) {
                    if flux != 0.0 {
                        *value /= flux;
                    }
                }
            }
        }
    }

    /// Materialize the profile for an amplitude vector on a reference
    /// ellipse.
    ///
    /// `coefficients` must have `width` entries. Each component becomes a
    /// [`ShapeletFunction`] on the reference ellipse scaled by the component
    /// radius.
    pub fn make_function(
        &self,
        ellipse: &Ellipse,
        coefficients: &[f64],
    ) -> Result<MultiShapeletFunction, ShapeletError> {
        if coefficients.len() != self.width {
            return Err(ShapeletError::InvalidCoefficients {
                expected: self.width,
                got: coefficients.len(),
            });
        }
        let mut components = Vec::with_capacity(self.components.len());
        for component in &self.components {
            let size = basis_size(component.order);
            let mut packed = vec![0.0; size];
            for (r, out) in packed.iter_mut().enumerate() {
                let row = &component.matrix[r * self.width..(r + 1) * self.width];
                *out = row.iter().zip(coefficients).map(|(&m, &c)| m * c).sum();
            }
            components.push(ShapeletFunction::new(
                component.order,
                ellipse.scaled(component.radius),
                packed,
            )?);
        }
        Ok(MultiShapeletFunction::new(components))
    }
}

/// Copy a `rows x cols` row-major matrix into the column window starting at
/// `offset` of a zero matrix with `width` columns.
fn pad_columns(matrix: &[f64], rows: usize, cols: usize, offset: usize, width: usize) -> Vec<f64> {
    let mut padded = vec![0.0; rows * width];
    for r in 0..rows {
        padded[r * width + offset..r * width + offset + cols]
            .copy_from_slice(&matrix[r * cols..(r + 1) * cols]);
    }
    padded
}
