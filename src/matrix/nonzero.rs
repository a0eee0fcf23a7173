//! Nonzero entries and the capability contracts every matrix-like source satisfies
//!
//! A source only has to describe its shape and hand out a fresh, finite pass
//! over its stored entries each time [`NonzeroSource::nonzeros`] is called.
//! The construction pipeline and the validators both rely on being able to
//! restart that pass.

use crate::error::{Result, SparrowError};

/// A single stored entry of a sparse matrix
///
/// `seq` is the position of the entry in the storage that produced it, so a
/// derived view (transpose, union) can say where an entry came from without
/// copying any storage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Nonzero<T> {
    pub row: usize,
    pub column: usize,
    pub value: T,
    pub seq: usize,
}

impl<T> Nonzero<T> {
    pub fn new(row: usize, column: usize, value: T, seq: usize) -> Self {
        Self {
            row,
            column,
            value,
            seq,
        }
    }

    /// Swap the row and column of this entry, keeping value and provenance
    pub fn transposed(self) -> Self {
        Self {
            row: self.column,
            column: self.row,
            value: self.value,
            seq: self.seq,
        }
    }
}

/// The minimal contract of anything that can be read as a sparse matrix
pub trait NonzeroSource {
    /// The value type of stored entries
    type Value: Copy;

    /// Matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of entries a full pass over [`nonzeros`](Self::nonzeros) yields
    fn nnz(&self) -> usize;

    /// Start a new pass over all stored entries
    ///
    /// Every call restarts from the first entry.
    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<Self::Value>> + '_;

    fn n_rows(&self) -> usize {
        self.dimensions().0
    }

    fn n_cols(&self) -> usize {
        self.dimensions().1
    }
}

/// Sources that can hand out the entries of a single row efficiently
pub trait RowAccess: NonzeroSource {
    /// Entries stored in row `row`
    ///
    /// Fails with [`SparrowError::IndexOutOfRange`] if `row >= n_rows()`.
    fn row_nonzeros(&self, row: usize)
        -> Result<impl Iterator<Item = Nonzero<Self::Value>> + '_>;

    /// Look up the value stored at (`row`, `col`) by scanning one row
    ///
    /// Returns the first stored entry for `col`, or `None` if the position is
    /// not stored. This is a linear fallback, not random access.
    fn value_at(&self, row: usize, col: usize) -> Result<Option<Self::Value>> {
        let n_cols = self.n_cols();
        if col >= n_cols {
            return Err(SparrowError::IndexOutOfRange {
                index: col,
                bound: n_cols,
            });
        }
        Ok(self
            .row_nonzeros(row)?
            .find(|nz| nz.column == col)
            .map(|nz| nz.value))
    }
}

impl<S: NonzeroSource + ?Sized> NonzeroSource for &S {
    type Value = S::Value;

    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn nnz(&self) -> usize {
        (**self).nnz()
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<Self::Value>> + '_ {
        (**self).nonzeros()
    }
}
