//! Preallocated scratch memory for matrix evaluation.
//!
//! ## Purpose
//!
//! Design matrices are rebuilt on every iteration of an outer fitting loop, so
//! all scratch space is sized once at builder construction and reused across
//! `apply` calls. This module provides that scratch as a single contiguous
//! allocation (`Workspace`) carved into named disjoint regions on demand.
//!
//! ## Design notes
//!
//! * **One allocation**: region offsets are fixed by a [`WorkspacePlan`]
//!   computed from (sample count, maximum order) at construction; `apply`
//!   never allocates.
//! * **Safe carving**: [`Workspace::parts`] splits the backing storage with
//!   `split_at_mut`, so regions can be read and written simultaneously
//!   without aliasing.
//!
//! ## Invariants
//!
//! * Region contents are scratch only: no region is meaningful between
//!   `apply` calls.
//! * Plans are monotonic in the inputs; an empty region has length zero and
//!   costs nothing.
//!
//! ## Non-goals
//!
//! * Sharing scratch between builder instances; each matrix builder owns
//!   its own workspace and takes `&mut self` to evaluate.

// External dependencies
use num_traits::Float;

// ============================================================================
// WorkspacePlan
// ============================================================================

/// Element counts for each scratch region of a builder workspace.
///
/// `coords` covers the two normalized coordinate sequences (each `coords`
/// long); `table` covers the two per-axis Hermite degree tables (each `table`
/// long). `envelope` and `block` are single regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspacePlan {
    /// Length of each normalized coordinate sequence (sample count).
    pub coords: usize,
    /// Length of the shared Gaussian envelope buffer.
    pub envelope: usize,
    /// Length of each per-axis Hermite value table, `(degree + 1) * samples`.
    pub table: usize,
    /// Length of the dense basis staging block, `samples * block_columns`.
    pub block: usize,
}

impl WorkspacePlan {
    /// Plan for a single-Gaussian evaluation: coordinates only.
    pub const fn gaussian(samples: usize) -> Self {
        Self {
            coords: samples,
            envelope: 0,
            table: 0,
            block: 0,
        }
    }

    /// Plan for a direct shapelet evaluation at `degree`.
    pub const fn shapelet(samples: usize, degree: usize) -> Self {
        Self {
            coords: samples,
            envelope: samples,
            table: (degree + 1) * samples,
            block: 0,
        }
    }

    /// Plan with an additional `samples x block_columns` staging block.
    pub const fn blocked(samples: usize, degree: usize, block_columns: usize) -> Self {
        Self {
            coords: samples,
            envelope: samples,
            table: (degree + 1) * samples,
            block: samples * block_columns,
        }
    }

    /// Total backing-store length.
    pub const fn total(&self) -> usize {
        2 * self.coords + self.envelope + 2 * self.table + self.block
    }
}

// ============================================================================
// Workspace
// ============================================================================

/// Contiguous scratch storage owned by one builder instance.
#[derive(Debug, Clone)]
pub struct Workspace<T> {
    data: Vec<T>,
    plan: WorkspacePlan,
}

impl<T: Float> Workspace<T> {
    /// Allocate scratch according to `plan`.
    pub fn new(plan: WorkspacePlan) -> Self {
        Self {
            data: vec![T::zero(); plan.total()],
            plan,
        }
    }

    /// The plan this workspace was sized with.
    #[inline]
    pub fn plan(&self) -> &WorkspacePlan {
        &self.plan
    }

    /// Carve the backing store into disjoint mutable regions.
    #[inline]
    pub fn parts(&mut self) -> WorkspaceParts<'_, T> {
        let plan = self.plan;
        let (xt, rest) = self.data.split_at_mut(plan.coords);
        let (yt, rest) = rest.split_at_mut(plan.coords);
        let (envelope, rest) = rest.split_at_mut(plan.envelope);
        let (x_table, rest) = rest.split_at_mut(plan.table);
        let (y_table, block) = rest.split_at_mut(plan.table);
        WorkspaceParts {
            xt,
            yt,
            envelope,
            x_table,
            y_table,
            block,
        }
    }
}

/// Disjoint views into one [`Workspace`], valid for a single `apply` call.
#[derive(Debug)]
pub struct WorkspaceParts<'a, T> {
    /// Normalized x coordinates.
    pub xt: &'a mut [T],
    /// Normalized y coordinates.
    pub yt: &'a mut [T],
    /// Shared Gaussian envelope, `exp(-0.5 r^2) * det_factor`.
    pub envelope: &'a mut [T],
    /// Hermite values per x degree, degree-major.
    pub x_table: &'a mut [T],
    /// Hermite values per y degree, degree-major.
    pub y_table: &'a mut [T],
    /// Dense basis staging block, sample-major.
    pub block: &'a mut [T],
}
