//! Owned triplet list used as an in-memory nonzero source
//!
//! Entries are kept exactly in insertion order, duplicates included. Nothing
//! is validated on insertion; bounds are checked by whoever consumes the
//! source (usually the construction pipeline), which is what lets malformed
//! data be reported instead of silently clamped.

use crate::matrix::nonzero::{Nonzero, NonzeroSource};

/// A sparse matrix stored as unsorted (row, column, value) triplets
#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
}

impl<T: Copy> TripletMatrix<T> {
    /// Creates an empty triplet list with declared dimensions
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a triplet list from parallel coordinate and value arrays
    ///
    /// The three arrays are truncated to the shortest of them.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        let len = rows.len().min(cols.len()).min(values.len());
        let mut rows = rows;
        let mut cols = cols;
        let mut values = values;
        rows.truncate(len);
        cols.truncate(len);
        values.truncate(len);

        Self {
            n_rows,
            n_cols,
            rows,
            cols,
            values,
        }
    }

    /// Creates a triplet list whose dimensions are the largest index seen plus one
    pub fn with_inferred_dimensions(entries: impl IntoIterator<Item = (usize, usize, T)>) -> Self {
        let mut matrix = Self::new(0, 0);
        for (row, col, value) in entries {
            matrix.n_rows = matrix.n_rows.max(row + 1);
            matrix.n_cols = matrix.n_cols.max(col + 1);
            matrix.push(row, col, value);
        }
        matrix
    }

    /// Appends one entry
    pub fn push(&mut self, row: usize, col: usize, value: T) {
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Copy> NonzeroSource for TripletMatrix<T> {
    type Value = T;

    fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<T>> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .enumerate()
            .map(|(seq, ((&row, &col), &value))| Nonzero::new(row, col, value, seq))
    }
}
