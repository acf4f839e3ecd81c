//! Matrix builders: one specialized variant per model family.
//!
//! ## Purpose
//!
//! A [`MatrixBuilder`] evaluates the design matrix of a linear source
//! model: one row per sample, one column per free amplitude, each cell the
//! value that amplitude's basis function takes at that sample for a given
//! ellipse. Fitting loops call [`MatrixBuilder::apply`] with a fresh
//! ellipse on every iteration, so construction does all sizing and
//! allocation and `apply` does none.
//!
//! ## Design notes
//!
//! * **Specialization over generality**: the six variants are not
//!   progressive refinements of one code path; each skips work the others
//!   need. A pure Gaussian never touches recurrence tables, the direct
//!   shapelet variant writes columns straight into the output, and only
//!   the convolved variants stage blocks at the higher pre-mixing order.
//! * **Variant choice is a constructor concern**: the `with_*` constructors
//!   encode the dispatch rules, so the enum stays an implementation detail
//!   and `apply` is a single match.
//! * **Exclusive access**: `apply` takes `&mut self` for the scratch
//!   workspace. Builders are cheap enough to construct per thread; there
//!   is no internal sharing to synchronize.
//!
//! ## Invariants
//!
//! * The output buffer is sample-major with stride
//!   [`MatrixBuilder::basis_size`]; `apply` validates its exact length.
//! * Every `apply` starts from a zeroed output and accumulates, so the
//!   result never depends on the previous contents.
//!
//! ## Non-goals
//!
//! * Solving the linear fit; this crate only builds the matrix.
//! * Pixel-grid PSF convolution; PSFs here are shapelet expansions.

// Internal dependencies
use crate::engine::evaluators::{accumulate_basis, fill_envelope, fill_gaussian, fill_tables};
use crate::engine::normalizer::{read_ellipse, rescale};
use crate::engine::validator::Validator;
use crate::functions::basis::MultiShapeletBasis;
use crate::functions::convolution::GaussHermiteConvolution;
use crate::functions::multi::MultiShapeletFunction;
use crate::functions::shapelet::ShapeletFunction;
use crate::geometry::ellipse::Ellipse;
use crate::math::products::{accumulate_product, assign_product, multiply_into, BasisLinalg};
use crate::primitives::buffer::{Workspace, WorkspacePlan, WorkspaceParts};
use crate::primitives::errors::ShapeletError;
use crate::primitives::index::basis_size;

// ============================================================================
// MatrixBuilder
// ============================================================================

/// Reusable design-matrix evaluator for one model family on fixed samples.
#[derive(Debug, Clone)]
pub struct MatrixBuilder<T: BasisLinalg> {
    x: Vec<T>,
    y: Vec<T>,
    basis_size: usize,
    kind: BuilderKind<T>,
}

#[derive(Debug, Clone)]
enum BuilderKind<T: BasisLinalg> {
    Gaussian(GaussianVariant<T>),
    ConvolvedGaussian(ConvolvedGaussianVariant<T>),
    Shapelet(ShapeletVariant<T>),
    ConvolvedShapelet(ConvolvedShapeletVariant<T>),
    MultiShapelet(MultiShapeletVariant<T>),
    ConvolvedMultiShapelet(ConvolvedMultiShapeletVariant<T>),
}

impl<T: BasisLinalg> MatrixBuilder<T> {
    /// Builder for a single Gauss-Hermite expansion of the given order.
    ///
    /// Order 0 selects the closed-form Gaussian variant; higher orders use
    /// the recurrence tables.
    pub fn with_order(x: &[T], y: &[T], order: usize) -> Result<Self, ShapeletError> {
        Validator::validate_samples(x, y)?;
        let samples = x.len();
        let kind = if order == 0 {
            BuilderKind::Gaussian(GaussianVariant {
                workspace: Workspace::new(WorkspacePlan::gaussian(samples)),
            })
        } else {
            BuilderKind::Shapelet(ShapeletVariant {
                order,
                workspace: Workspace::new(WorkspacePlan::shapelet(samples, order)),
            })
        };
        Ok(MatrixBuilder {
            x: x.to_vec(),
            y: y.to_vec(),
            basis_size: basis_size(order),
            kind,
        })
    }

    /// Builder for a single expansion convolved with a one-component PSF.
    ///
    /// An order-0 model under an order-0 PSF short-circuits to a scaled
    /// Gaussian column; everything else goes through the analytic
    /// convolution matrix at each evaluation.
    pub fn with_psf(
        x: &[T],
        y: &[T],
        order: usize,
        psf: &ShapeletFunction,
    ) -> Result<Self, ShapeletError> {
        Validator::validate_samples(x, y)?;
        let samples = x.len();
        let kind = if order == 0 && psf.order() == 0 {
            BuilderKind::ConvolvedGaussian(ConvolvedGaussianVariant {
                psf_ellipse: *psf.ellipse(),
                scale: psf.coefficients()[0] / ShapeletFunction::FLUX_FACTOR,
                workspace: Workspace::new(WorkspacePlan::gaussian(samples)),
            })
        } else {
            let convolution = GaussHermiteConvolution::new(order, psf);
            let workspace = Workspace::new(WorkspacePlan::blocked(
                samples,
                convolution.row_order(),
                convolution.row_size(),
            ));
            BuilderKind::ConvolvedShapelet(ConvolvedShapeletVariant {
                convolution,
                workspace,
            })
        };
        Ok(MatrixBuilder {
            x: x.to_vec(),
            y: y.to_vec(),
            basis_size: basis_size(order),
            kind,
        })
    }

    /// Builder for a single expansion convolved with a multi-component PSF.
    ///
    /// Only single-component PSFs can drive a raw-order model; wrap the
    /// model in a [`MultiShapeletBasis`] to use a richer PSF.
    pub fn with_multi_psf(
        x: &[T],
        y: &[T],
        order: usize,
        psf: &MultiShapeletFunction,
    ) -> Result<Self, ShapeletError> {
        match psf.components() {
            [single] => Self::with_psf(x, y, order, single),
            _ => Err(ShapeletError::UnsupportedCombination {
                detail: "a raw-order model requires a one-component PSF; \
                         remap the model through a basis instead",
            }),
        }
    }

    /// Builder for a multi-component basis without convolution.
    pub fn with_basis(x: &[T], y: &[T], basis: &MultiShapeletBasis) -> Result<Self, ShapeletError> {
        Validator::validate_samples(x, y)?;
        let samples = x.len();
        let mut max_order = 0;
        let mut max_size = 0;
        let components = basis
            .components()
            .iter()
            .map(|component| {
                max_order = max_order.max(component.order());
                max_size = max_size.max(basis_size(component.order()));
                MultiComponent {
                    radius: component.radius(),
                    order: component.order(),
                    size: basis_size(component.order()),
                    matrix: component.matrix().to_vec(),
                }
            })
            .collect();
        Ok(MatrixBuilder {
            x: x.to_vec(),
            y: y.to_vec(),
            basis_size: basis.width(),
            kind: BuilderKind::MultiShapelet(MultiShapeletVariant {
                components,
                width: basis.width(),
                workspace: Workspace::new(WorkspacePlan::blocked(samples, max_order, max_size)),
            }),
        })
    }

    /// Builder for a multi-component basis convolved with a
    /// multi-component PSF.
    ///
    /// Each (basis component, PSF component) pair gets its own convolution
    /// operator; their contributions accumulate into the shared amplitude
    /// columns.
    pub fn with_convolved_basis(
        x: &[T],
        y: &[T],
        basis: &MultiShapeletBasis,
        psf: &MultiShapeletFunction,
    ) -> Result<Self, ShapeletError> {
        Validator::validate_samples(x, y)?;
        let samples = x.len();
        let width = basis.width();
        let mut max_row_order = 0;
        let mut max_row_size = 0;
        let mut pairs = Vec::with_capacity(basis.components().len() * psf.components().len());
        for component in basis.components() {
            for kernel in psf.components() {
                let convolution = GaussHermiteConvolution::new(component.order(), kernel);
                max_row_order = max_row_order.max(convolution.row_order());
                max_row_size = max_row_size.max(convolution.row_size());
                pairs.push(ConvolvedPair {
                    convolution,
                    radius: component.radius(),
                    matrix: component.matrix().to_vec(),
                });
            }
        }
        Ok(MatrixBuilder {
            x: x.to_vec(),
            y: y.to_vec(),
            basis_size: width,
            kind: BuilderKind::ConvolvedMultiShapelet(ConvolvedMultiShapeletVariant {
                pairs,
                width,
                staging: vec![0.0; max_row_size * width],
                workspace: Workspace::new(WorkspacePlan::blocked(
                    samples,
                    max_row_order,
                    max_row_size,
                )),
            }),
        })
    }

    /// Number of samples (output rows).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.x.len()
    }

    /// Number of basis functions (output columns).
    #[inline]
    pub fn basis_size(&self) -> usize {
        self.basis_size
    }

    /// Evaluate the design matrix for `ellipse` into `output`.
    ///
    /// `output` must have exactly `sample_count() * basis_size()` elements
    /// and is written sample-major: the cell for sample `s` and basis
    /// function `i` is `output[s * basis_size() + i]`. The buffer is zeroed
    /// first, so its previous contents never leak into the result.
    pub fn apply(&mut self, output: &mut [T], ellipse: &Ellipse) -> Result<(), ShapeletError> {
        Validator::validate_output(output, self.x.len() * self.basis_size)?;
        output.fill(T::zero());
        match &mut self.kind {
            BuilderKind::Gaussian(variant) => variant.apply(&self.x, &self.y, output, ellipse),
            BuilderKind::ConvolvedGaussian(variant) => {
                variant.apply(&self.x, &self.y, output, ellipse)
            }
            BuilderKind::Shapelet(variant) => variant.apply(&self.x, &self.y, output, ellipse),
            BuilderKind::ConvolvedShapelet(variant) => {
                variant.apply(&self.x, &self.y, output, ellipse)
            }
            BuilderKind::MultiShapelet(variant) => {
                variant.apply(&self.x, &self.y, output, ellipse)
            }
            BuilderKind::ConvolvedMultiShapelet(variant) => {
                variant.apply(&self.x, &self.y, output, ellipse)
            }
        }
    }

    /// Allocate a fresh output buffer and evaluate into it.
    pub fn to_matrix(&mut self, ellipse: &Ellipse) -> Result<Vec<T>, ShapeletError> {
        let mut output = vec![T::zero(); self.x.len() * self.basis_size];
        self.apply(&mut output, ellipse)?;
        Ok(output)
    }
}

// ============================================================================
// Gaussian variants
// ============================================================================

/// Order-0 model: one closed-form Gaussian column.
#[derive(Debug, Clone)]
struct GaussianVariant<T> {
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> GaussianVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let WorkspaceParts { xt, yt, .. } = self.workspace.parts();
        let det_factor = read_ellipse(xt, yt, x, y, ellipse)?;
        fill_gaussian(output, xt, yt, det_factor);
        Ok(())
    }
}

/// Order-0 model under an order-0 PSF: a Gaussian column on the convolved
/// ellipse, scaled by `psf_coefficient / FLUX_FACTOR`.
///
/// The scale makes a PSF with coefficient `FLUX_FACTOR` (flux
/// `FLUX_FACTOR`) the exact identity kernel for this variant.
#[derive(Debug, Clone)]
struct ConvolvedGaussianVariant<T> {
    psf_ellipse: Ellipse,
    scale: f64,
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> ConvolvedGaussianVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let convolved = ellipse.convolved(&self.psf_ellipse);
        let WorkspaceParts { xt, yt, .. } = self.workspace.parts();
        let det_factor = read_ellipse(xt, yt, x, y, &convolved)?;
        fill_gaussian(output, xt, yt, det_factor * T::from(self.scale).unwrap());
        Ok(())
    }
}

// ============================================================================
// Shapelet variants
// ============================================================================

/// Direct Gauss-Hermite expansion: columns written straight to the output.
#[derive(Debug, Clone)]
struct ShapeletVariant<T> {
    order: usize,
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> ShapeletVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let WorkspaceParts {
            xt,
            yt,
            envelope,
            x_table,
            y_table,
            ..
        } = self.workspace.parts();
        let det_factor = read_ellipse(xt, yt, x, y, ellipse)?;
        fill_envelope(envelope, xt, yt, det_factor);
        fill_tables(x_table, y_table, self.order, xt, yt);
        accumulate_basis(
            output,
            basis_size(self.order),
            self.order,
            envelope,
            x_table,
            y_table,
        );
        Ok(())
    }
}

/// Expansion under a one-component PSF: stage the basis at the convolved
/// order, then project through the convolution matrix.
#[derive(Debug, Clone)]
struct ConvolvedShapeletVariant<T> {
    convolution: GaussHermiteConvolution,
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> ConvolvedShapeletVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let row_order = self.convolution.row_order();
        let row_size = self.convolution.row_size();
        let col_size = self.convolution.col_size();

        let mut convolved = *ellipse;
        let matrix = self.convolution.evaluate(&mut convolved)?;

        let WorkspaceParts {
            xt,
            yt,
            envelope,
            x_table,
            y_table,
            block,
        } = self.workspace.parts();
        let det_factor = read_ellipse(xt, yt, x, y, &convolved)?;
        fill_envelope(envelope, xt, yt, det_factor);
        fill_tables(x_table, y_table, row_order, xt, yt);
        block.fill(T::zero());
        accumulate_basis(block, row_size, row_order, envelope, x_table, y_table);
        assign_product(output, block, matrix, x.len(), row_size, col_size);
        Ok(())
    }
}

// ============================================================================
// Multi-component variants
// ============================================================================

/// One basis component flattened for evaluation.
#[derive(Debug, Clone)]
struct MultiComponent {
    radius: f64,
    order: usize,
    size: usize,
    /// Row-major `size x width` remapping matrix.
    matrix: Vec<f64>,
}

/// Multi-component basis without convolution: components share one
/// coordinate read and rescale between radii.
#[derive(Debug, Clone)]
struct MultiShapeletVariant<T> {
    components: Vec<MultiComponent>,
    width: usize,
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> MultiShapeletVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let samples = x.len();
        let WorkspaceParts {
            xt,
            yt,
            envelope,
            x_table,
            y_table,
            block,
        } = self.workspace.parts();
        let det_factor = read_ellipse(xt, yt, x, y, ellipse)?;

        let mut current_radius = 1.0;
        for component in &self.components {
            if component.radius != current_radius {
                rescale(xt, yt, T::from(component.radius / current_radius).unwrap());
                current_radius = component.radius;
            }
            fill_envelope(envelope, xt, yt, det_factor);
            fill_tables(x_table, y_table, component.order, xt, yt);
            let staged = &mut block[..samples * component.size];
            staged.fill(T::zero());
            accumulate_basis(
                staged,
                component.size,
                component.order,
                envelope,
                x_table,
                y_table,
            );
            accumulate_product(
                output,
                staged,
                &component.matrix,
                samples,
                component.size,
                self.width,
            );
        }
        Ok(())
    }
}

/// One (basis component, PSF component) pairing of the convolved
/// multi-component variant.
#[derive(Debug, Clone)]
struct ConvolvedPair {
    convolution: GaussHermiteConvolution,
    radius: f64,
    /// Row-major `col_size x width` remapping matrix.
    matrix: Vec<f64>,
}

/// Multi-component basis under a multi-component PSF: every pairing stages
/// at its own convolved order and accumulates through the product of its
/// convolution and remapping matrices.
#[derive(Debug, Clone)]
struct ConvolvedMultiShapeletVariant<T> {
    pairs: Vec<ConvolvedPair>,
    width: usize,
    /// Row-major `row_size x width` product of convolution and remapping
    /// matrices, rebuilt per pair.
    staging: Vec<f64>,
    workspace: Workspace<T>,
}

impl<T: BasisLinalg> ConvolvedMultiShapeletVariant<T> {
    fn apply(
        &mut self,
        x: &[T],
        y: &[T],
        output: &mut [T],
        ellipse: &Ellipse,
    ) -> Result<(), ShapeletError> {
        let samples = x.len();
        let Self {
            pairs,
            width,
            staging,
            workspace,
        } = self;
        let width = *width;
        let WorkspaceParts {
            xt,
            yt,
            envelope,
            x_table,
            y_table,
            block,
        } = workspace.parts();

        for pair in pairs.iter_mut() {
            let row_order = pair.convolution.row_order();
            let row_size = pair.convolution.row_size();
            let col_size = pair.convolution.col_size();

            let mut convolved = ellipse.scaled(pair.radius);
            let conv_matrix = pair.convolution.evaluate(&mut convolved)?;
            multiply_into(
                &mut staging[..row_size * width],
                conv_matrix,
                &pair.matrix,
                row_size,
                col_size,
                width,
            );

            let det_factor = read_ellipse(xt, yt, x, y, &convolved)?;
            fill_envelope(envelope, xt, yt, det_factor);
            fill_tables(x_table, y_table, row_order, xt, yt);
            let staged = &mut block[..samples * row_size];
            staged.fill(T::zero());
            accumulate_basis(staged, row_size, row_order, envelope, x_table, y_table);
            accumulate_product(
                output,
                staged,
                &staging[..row_size * width],
                samples,
                row_size,
                width,
            );
        }
        Ok(())
    }
}
