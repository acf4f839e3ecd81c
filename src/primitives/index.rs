//! Packed ordering of two-dimensional Hermite degrees.
//!
//! ## Purpose
//!
//! This module defines the canonical enumeration of `(x_degree, y_degree)`
//! pairs used for design-matrix columns and coefficient vectors. Pairs are
//! ordered by increasing total order; within one order the x degree descends:
//!
//! ```text
//! (0,0) | (1,0) (0,1) | (2,0) (1,1) (0,2) | (3,0) (2,1) (1,2) (0,3) | ...
//! ```
//!
//! ## Invariants
//!
//! * The mapping between packed indices and degree pairs is a bijection.
//! * The ordering is a caller-visible contract: coefficient vectors and
//!   matrix columns must use it exactly.
//!
//! ## Example
//!
//! ```
//! use shapelet_rs::prelude::*;
//!
//! let pairs: Vec<(usize, usize)> = PackedIndex::range(1)
//!     .map(|i| (i.x(), i.y()))
//!     .collect();
//! assert_eq!(pairs, vec![(0, 0), (1, 0), (0, 1)]);
//! ```

// ============================================================================
// Size helpers
// ============================================================================

/// Number of basis functions with total order `<= order`.
///
/// This is the triangular count `(order + 1)(order + 2) / 2` and equals the
/// number of design-matrix columns for a shapelet expansion of that order.
#[inline]
pub const fn basis_size(order: usize) -> usize {
    (order + 1) * (order + 2) / 2
}

/// Packed index of the first basis function with total order `order`.
///
/// Cumulative count of the lower orders, `order (order + 1) / 2`; equal to
/// [`basis_size`]`(order - 1)` for positive orders.
#[inline]
pub const fn basis_offset(order: usize) -> usize {
    order * (order + 1) / 2
}

// ============================================================================
// PackedIndex
// ============================================================================

/// One position in the packed degree ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedIndex {
    index: usize,
    x: usize,
    y: usize,
}

impl PackedIndex {
    /// Packed position of the degree pair `(x, y)`.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self {
            index: basis_offset(x + y) + y,
            x,
            y,
        }
    }

    /// Degree pair at flat position `index`.
    pub fn from_index(index: usize) -> Self {
        let mut order = 0;
        while basis_offset(order + 1) <= index {
            order += 1;
        }
        let y = index - basis_offset(order);
        Self {
            index,
            x: order - y,
            y,
        }
    }

    /// Iterator over all packed indices with total order `<= order`,
    /// in packed order.
    pub fn range(order: usize) -> PackedIndexRange {
        PackedIndexRange {
            next: PackedIndex::new(0, 0),
            end: basis_size(order),
        }
    }

    /// Degree along the x axis.
    #[inline]
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Degree along the y axis.
    #[inline]
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Total order `x + y`.
    #[inline]
    pub const fn order(&self) -> usize {
        self.x + self.y
    }

    /// Flat column/coefficient position.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Successor in packed order.
    #[inline]
    fn step(self) -> Self {
        if self.x == 0 {
            // Wrap to the start of the next total order.
            PackedIndex {
                index: self.index + 1,
                x: self.y + 1,
                y: 0,
            }
        } else {
            PackedIndex {
                index: self.index + 1,
                x: self.x - 1,
                y: self.y + 1,
            }
        }
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Iterator over packed indices up to a fixed order.
#[derive(Debug, Clone)]
pub struct PackedIndexRange {
    next: PackedIndex,
    end: usize,
}

impl Iterator for PackedIndexRange {
    type Item = PackedIndex;

    #[inline]
    fn next(&mut self) -> Option<PackedIndex> {
        if self.next.index >= self.end {
            return None;
        }
        let current = self.next;
        self.next = current.step();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next.index.min(self.end);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PackedIndexRange {}
