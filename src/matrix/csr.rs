//! Compressed Sparse Row (CSR) store and its iteration views

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

use num_traits::Num;

use crate::error::{Result, SparrowError};
use crate::matrix::nonzero::{Nonzero, NonzeroSource, RowAccess};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Row `r` occupies exactly `col_idx[row_ptr[r]..row_ptr[r + 1]]`. Within a
/// row, entries are in storage order; they are only column-sorted once
/// [`sort`](CsrMatrix::sort) has run.
#[derive(Clone, PartialEq)]
pub struct CsrMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: Copy + Num,
{
    /// Takes ownership of buffers that already satisfy the CSR invariant
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `nnz` - Number of stored entries
    /// * `row_ptr` - Row offsets, `n_rows + 1` long, starting at 0 and ending at `nnz`
    /// * `col_idx` - Column indices
    /// * `values` - Stored values
    ///
    /// # Errors
    ///
    /// [`SparrowError::InvalidDimensions`] if the offsets are not a valid
    /// non-decreasing prefix array ending at `nnz`, or the column/value arrays
    /// are not `nnz` long. [`SparrowError::IndexOutOfRange`] if a column
    /// index is `>= n_cols`.
    pub fn build(
        n_rows: usize,
        n_cols: usize,
        nnz: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len() != n_rows + 1 {
            return Err(SparrowError::invalid_dimensions(format!(
                "row_ptr.len() = {} but n_rows + 1 = {}",
                row_ptr.len(),
                n_rows + 1
            )));
        }
        if row_ptr[n_rows] != nnz {
            return Err(SparrowError::invalid_dimensions(format!(
                "row_ptr[n_rows] = {} but nnz = {}",
                row_ptr[n_rows], nnz
            )));
        }
        if col_idx.len() != nnz || values.len() != nnz {
            return Err(SparrowError::invalid_dimensions(format!(
                "col_idx.len() = {}, values.len() = {}, nnz = {}",
                col_idx.len(),
                values.len(),
                nnz
            )));
        }
        if row_ptr[0] != 0 {
            return Err(SparrowError::invalid_dimensions("row_ptr[0] must be 0"));
        }
        if let Some(r) = row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(SparrowError::invalid_dimensions(format!(
                "row_ptr decreases between rows {} and {}",
                r,
                r + 1
            )));
        }
        if let Some(&col) = col_idx.iter().find(|&&col| col >= n_cols) {
            return Err(SparrowError::IndexOutOfRange {
                index: col,
                bound: n_cols,
            });
        }

        Ok(Self::from_parts_unchecked(
            n_rows, n_cols, row_ptr, col_idx, values,
        ))
    }

    /// Like [`build`](Self::build), taking the column count as the largest
    /// stored column plus one
    pub fn with_inferred_columns(
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let n_rows = row_ptr.len().checked_sub(1).ok_or_else(|| {
            SparrowError::invalid_dimensions("row_ptr must hold at least one offset")
        })?;
        let n_cols = col_idx.iter().max().map_or(0, |&c| c + 1);
        let nnz = col_idx.len();
        Self::build(n_rows, n_cols, nnz, row_ptr, col_idx, values)
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::from_parts_unchecked(n_rows, n_cols, vec![0; n_rows + 1], Vec::new(), Vec::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let row_ptr = (0..=n).collect();
        let col_idx = (0..n).collect();
        let values = vec![T::one(); n];

        Self::from_parts_unchecked(n, n, row_ptr, col_idx, values)
    }
}

impl<T> CsrMatrix<T> {
    /// Assembles a store from buffers the caller has already validated
    pub(crate) fn from_parts_unchecked(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), n_rows + 1);
        debug_assert_eq!(row_ptr[n_rows], col_idx.len());
        debug_assert_eq!(col_idx.len(), values.len());

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Mutable access to all three buffers at once, for storage maintenance
    pub(crate) fn raw_parts_mut(&mut self) -> (&mut Vec<usize>, &mut Vec<usize>, &mut Vec<T>) {
        (&mut self.row_ptr, &mut self.col_idx, &mut self.values)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.row_ptr[self.n_rows]
    }

    /// Matrix dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Gives back the (row_ptr, col_idx, values) buffers
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_ptr, self.col_idx, self.values)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.n_rows {
            return Err(SparrowError::IndexOutOfRange {
                index: row,
                bound: self.n_rows,
            });
        }
        Ok(())
    }

    /// Column and value slices of row `row`
    pub fn row(&self, row: usize) -> Result<(&[usize], &[T])> {
        self.check_row(row)?;
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        Ok((&self.col_idx[range.clone()], &self.values[range]))
    }

    /// Number of entries stored in row `row`
    pub fn row_degree(&self, row: usize) -> Result<usize> {
        self.check_row(row)?;
        Ok(self.row_ptr[row + 1] - self.row_ptr[row])
    }

    /// Entries of the contiguous row range `rows`, row-major
    pub fn row_range_nonzeros(&self, rows: Range<usize>) -> Result<CsrNonzeros<'_, T>> {
        if rows.start > rows.end || rows.end > self.n_rows {
            return Err(SparrowError::IndexOutOfRange {
                index: rows.end.max(rows.start),
                bound: self.n_rows,
            });
        }
        Ok(CsrNonzeros::new(self, rows.start, rows.end))
    }

    /// All entries, row-major, in storage order within each row
    pub fn iter(&self) -> CsrNonzeros<'_, T> {
        CsrNonzeros::new(self, 0, self.n_rows)
    }
}

/// Iterator over the entries of a run of CSR rows
///
/// Tracks the current row label through any number of consecutive empty rows,
/// so an entry is never attributed to a row whose slice is empty.
#[derive(Debug, Clone)]
pub struct CsrNonzeros<'a, T> {
    row_ptr: &'a [usize],
    col_idx: &'a [usize],
    values: &'a [T],
    row: usize,
    idx: usize,
    end: usize,
}

impl<'a, T> CsrNonzeros<'a, T> {
    fn new(matrix: &'a CsrMatrix<T>, first_row: usize, end_row: usize) -> Self {
        Self {
            row_ptr: &matrix.row_ptr,
            col_idx: &matrix.col_idx,
            values: &matrix.values,
            row: first_row,
            idx: matrix.row_ptr[first_row],
            end: matrix.row_ptr[end_row],
        }
    }
}

impl<T: Copy> Iterator for CsrNonzeros<'_, T> {
    type Item = Nonzero<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.end {
            return None;
        }

        // idx < end guarantees a non-empty row lies ahead before end_row
        while self.row_ptr[self.row + 1] <= self.idx {
            self.row += 1;
        }

        let nz = Nonzero::new(self.row, self.col_idx[self.idx], self.values[self.idx], self.idx);
        self.idx += 1;
        Some(nz)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl<T: Copy> ExactSizeIterator for CsrNonzeros<'_, T> {}

impl<T: Copy> FusedIterator for CsrNonzeros<'_, T> {}

impl<T: Copy> NonzeroSource for CsrMatrix<T> {
    type Value = T;

    fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    fn nnz(&self) -> usize {
        self.row_ptr[self.n_rows]
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<T>> + '_ {
        self.iter()
    }
}

impl<T: Copy> RowAccess for CsrMatrix<T> {
    fn row_nonzeros(&self, row: usize) -> Result<impl Iterator<Item = Nonzero<T>> + '_> {
        self.check_row(row)?;
        Ok(CsrNonzeros::new(self, row, row + 1))
    }
}

/// Rows and entries per row shown by `Debug`
const DEBUG_SAMPLE: usize = 5;

impl<T: fmt::Debug> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let shown_rows = self.n_rows.min(DEBUG_SAMPLE);
        if shown_rows > 0 {
            writeln!(f, "  content sample:")?;
        }

        for i in 0..shown_rows {
            let (cols, vals) = self.row(i).map_err(|_| fmt::Error)?;
            write!(f, "    row {}: ", i)?;
            if cols.is_empty() {
                writeln!(f, "(empty)")?;
                continue;
            }
            for (col, val) in cols.iter().zip(vals).take(DEBUG_SAMPLE) {
                write!(f, "({}, {:?}) ", col, val)?;
            }
            if cols.len() > DEBUG_SAMPLE {
                write!(f, "... ({} more)", cols.len() - DEBUG_SAMPLE)?;
            }
            writeln!(f)?;
        }

        if self.n_rows > shown_rows {
            writeln!(f, "    ... ({} more rows)", self.n_rows - shown_rows)?;
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrMatrix<i32> {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        CsrMatrix::build(3, 3, 5, vec![0, 2, 3, 5], vec![0, 1, 1, 0, 2], vec![1, 2, 3, 4, 5])
            .unwrap()
    }

    #[test]
    fn test_build_matrix() {
        let matrix = sample();

        assert_eq!(matrix.dimensions(), (3, 3));
        assert_eq!(matrix.nnz(), 5);
    }

    #[test]
    fn test_row_nonzeros() {
        let matrix = sample();

        let row0: Vec<_> = matrix.row_nonzeros(0).unwrap().map(|nz| (nz.column, nz.value)).collect();
        assert_eq!(row0, vec![(0, 1), (1, 2)]);

        let row2: Vec<_> = matrix.row_nonzeros(2).unwrap().collect();
        assert_eq!(row2, vec![Nonzero::new(2, 0, 4, 3), Nonzero::new(2, 2, 5, 4)]);
    }

    #[test]
    fn test_row_nonzeros_out_of_range() {
        let matrix = sample();
        assert!(matches!(
            matrix.row_nonzeros(3),
            Err(SparrowError::IndexOutOfRange { index: 3, bound: 3 })
        ));
    }

    #[test]
    fn test_nonzeros_skip_runs_of_empty_rows() {
        // rows 0, 2, 3 and 5 are empty
        let matrix = CsrMatrix::build(
            6,
            4,
            3,
            vec![0, 0, 2, 2, 2, 3, 3],
            vec![3, 1, 0],
            vec![10, 20, 30],
        )
        .unwrap();

        let entries: Vec<_> = matrix.nonzeros().map(|nz| (nz.row, nz.column, nz.value)).collect();
        assert_eq!(entries, vec![(1, 3, 10), (1, 1, 20), (4, 0, 30)]);
    }

    #[test]
    fn test_nonzeros_all_rows_empty() {
        let matrix = CsrMatrix::<f64>::zeros(4, 4);
        assert_eq!(matrix.nonzeros().count(), 0);
    }

    #[test]
    fn test_row_range_nonzeros() {
        let matrix = sample();
        let entries: Vec<_> = matrix
            .row_range_nonzeros(1..3)
            .unwrap()
            .map(|nz| (nz.row, nz.column))
            .collect();
        assert_eq!(entries, vec![(1, 1), (2, 0), (2, 2)]);

        assert_eq!(matrix.row_range_nonzeros(2..2).unwrap().count(), 0);
        assert!(matrix.row_range_nonzeros(1..4).is_err());
    }

    #[test]
    fn test_identity() {
        let identity = CsrMatrix::<i32>::identity(3);

        assert_eq!(identity.dimensions(), (3, 3));
        assert_eq!(identity.nnz(), 3);

        assert_eq!(identity.row_ptr(), &[0, 1, 2, 3]);
        assert_eq!(identity.col_idx(), &[0, 1, 2]);
        assert_eq!(identity.values(), &[1, 1, 1]);
    }

    #[test]
    fn test_invalid_row_ptr_length() {
        let result = CsrMatrix::build(
            3,
            3,
            5,
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        assert!(matches!(result, Err(SparrowError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_row_ptr_end_must_match_nnz() {
        let result = CsrMatrix::build(3, 3, 5, vec![0, 2, 3, 4], vec![0, 1, 1, 0, 2], vec![1; 5]);
        assert!(matches!(result, Err(SparrowError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_column_out_of_range() {
        let result = CsrMatrix::build(2, 2, 2, vec![0, 1, 2], vec![0, 2], vec![1, 1]);
        assert!(matches!(
            result,
            Err(SparrowError::IndexOutOfRange { index: 2, bound: 2 })
        ));
    }

    #[test]
    fn test_with_inferred_columns() {
        let matrix = CsrMatrix::with_inferred_columns(vec![0, 1, 3], vec![4, 0, 2], vec![1, 1, 1])
            .unwrap();
        assert_eq!(matrix.dimensions(), (2, 5));
    }

    #[test]
    fn test_value_at_scans_one_row() {
        let matrix = sample();
        assert_eq!(matrix.value_at(2, 2).unwrap(), Some(5));
        assert_eq!(matrix.value_at(1, 0).unwrap(), None);
        assert!(matrix.value_at(0, 3).is_err());
        assert!(matrix.value_at(3, 0).is_err());
    }

    #[test]
    fn test_debug_marks_empty_rows() {
        let matrix = CsrMatrix::build(2, 2, 1, vec![0, 0, 1], vec![1], vec![7]).unwrap();
        let rendered = format!("{:?}", matrix);
        assert!(rendered.contains("row 0: (empty)"));
        assert!(rendered.contains("(1, 7)"));
    }

    #[test]
    fn test_debug_truncates_long_rows_and_many_rows() {
        let wide = CsrMatrix::build(1, 7, 7, vec![0, 7], (0..7).collect(), vec![1; 7]).unwrap();
        let rendered = format!("{:?}", wide);
        assert!(rendered.contains("(4, 1) ... (2 more)"));
        assert!(!rendered.contains("(5, 1)"));

        let tall: CsrMatrix<i32> = CsrMatrix::identity(7);
        let rendered = format!("{:?}", tall);
        assert!(rendered.contains("row 4: (4, 1)"));
        assert!(!rendered.contains("row 5:"));
        assert!(rendered.contains("... (2 more rows)"));
    }
}
