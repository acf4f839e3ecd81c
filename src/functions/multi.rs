//! Sums of shapelet functions.
//!
//! ## Purpose
//!
//! A [`MultiShapeletFunction`] is a plain sum of [`ShapeletFunction`]
//! components, each with its own order, ellipse, and coefficients. This is
//! the standard representation for realistic PSF models, where a single
//! Gauss-Hermite expansion cannot capture broad wings.

// Internal dependencies
use crate::functions::shapelet::{ShapeletFunction, ShapeletFunctionEvaluator};
use crate::primitives::errors::ShapeletError;

// ============================================================================
// MultiShapeletFunction
// ============================================================================

/// A sum of shapelet functions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiShapeletFunction {
    components: Vec<ShapeletFunction>,
}

impl MultiShapeletFunction {
    /// Construct from components.
    pub fn new(components: Vec<ShapeletFunction>) -> Self {
        MultiShapeletFunction { components }
    }

    /// The components of the sum.
    #[inline]
    pub fn components(&self) -> &[ShapeletFunction] {
        &self.components
    }

    /// Mutable access to the components.
    #[inline]
    pub fn components_mut(&mut self) -> &mut [ShapeletFunction] {
        &mut self.components
    }

    /// Append a component.
    pub fn push(&mut self, component: ShapeletFunction) {
        self.components.push(component);
    }

    /// Create an evaluator for pointwise evaluation.
    pub fn evaluator(&self) -> Result<MultiShapeletFunctionEvaluator, ShapeletError> {
        let evaluators = self
            .components
            .iter()
            .map(|c| c.evaluator())
            .collect::<Result<_, _>>()?;
        Ok(MultiShapeletFunctionEvaluator { evaluators })
    }

    /// Total flux: the sum of the component fluxes.
    pub fn integrate(&self) -> f64 {
        self.components.iter().map(ShapeletFunction::integrate).sum()
    }

    /// Rescale every component so the total flux equals `flux`.
    ///
    /// If the current integral is zero the coefficients become non-finite;
    /// callers normalize only functions with net flux.
    pub fn normalize(&mut self, flux: f64) {
        let factor = flux / self.integrate();
        for component in &mut self.components {
            for c in component.coefficients_mut() {
                *c *= factor;
            }
        }
    }

    /// Analytic convolution: every component of `self` convolved with every
    /// component of `psf`.
    pub fn convolved(
        &self,
        psf: &MultiShapeletFunction,
    ) -> Result<MultiShapeletFunction, ShapeletError> {
        let mut components = Vec::with_capacity(self.components.len() * psf.components.len());
        for model in &self.components {
            for kernel in &psf.components {
                components.push(model.convolved(kernel)?);
            }
        }
        Ok(MultiShapeletFunction { components })
    }
}

impl From<ShapeletFunction> for MultiShapeletFunction {
    fn from(component: ShapeletFunction) -> Self {
        MultiShapeletFunction {
            components: vec![component],
        }
    }
}

// ============================================================================
// MultiShapeletFunctionEvaluator
// ============================================================================

/// Pointwise evaluator for a [`MultiShapeletFunction`].
#[derive(Debug, Clone)]
pub struct MultiShapeletFunctionEvaluator {
    evaluators: Vec<ShapeletFunctionEvaluator>,
}

impl MultiShapeletFunctionEvaluator {
    /// Evaluate the sum at `(x, y)`.
    pub fn evaluate(&mut self, x: f64, y: f64) -> f64 {
        self.evaluators.iter_mut().map(|e| e.evaluate(x, y)).sum()
    }
}
