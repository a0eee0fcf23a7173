//! Utilities for converting between our matrix formats and external libraries

use num_traits::Num;
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::csr::CsrMatrix;
use crate::matrix::nonzero::{Nonzero, NonzeroSource};

/// Converts our CSR matrix to sprs CsMat format
///
/// sprs requires every row to be sorted and free of repeats, so this works on
/// a packed, sorted copy: duplicate entries are summed in the result.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let (n_rows, n_cols) = matrix.dimensions();
    let mut canonical = matrix.clone();
    canonical.pack();
    canonical.sort();

    let (row_ptr, col_idx, values) = canonical.into_raw_parts();
    CsMat::new((n_rows, n_cols), row_ptr, col_idx, values)
}

/// Converts a sprs CsMat (CSR or CSC) to our CSR matrix format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let nnz = matrix.nnz();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::build(n_rows, n_cols, nnz, indptr, indices, data)
}

/// A sprs matrix can feed the construction pipeline directly
impl<T: Copy> NonzeroSource for CsMat<T> {
    type Value = T;

    fn dimensions(&self) -> (usize, usize) {
        self.shape()
    }

    fn nnz(&self) -> usize {
        CsMat::nnz(self)
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<T>> + '_ {
        self.iter()
            .enumerate()
            .map(|(seq, (&value, (row, column)))| Nonzero::new(row, column, value, seq))
    }
}
