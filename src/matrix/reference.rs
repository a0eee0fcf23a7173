//! Dense reference computations used to validate sparse results
//!
//! These are deliberately simple: materialize a source as an `ndarray`
//! matrix, or multiply a CSR matrix by a dense vector one row at a time.

use std::ops::AddAssign;

use ndarray::{Array1, Array2, ArrayView1};
use num_traits::Num;

use crate::error::{Result, SparrowError};
use crate::matrix::csr::CsrMatrix;
use crate::matrix::nonzero::NonzeroSource;

/// Materializes any source as a dense matrix
///
/// Entries stored more than once at the same position are summed, which is
/// the same result `pack` gives.
pub fn to_dense<S>(source: &S) -> Result<Array2<S::Value>>
where
    S: NonzeroSource,
    S::Value: Num + AddAssign,
{
    let (n_rows, n_cols) = source.dimensions();
    let mut dense = Array2::zeros((n_rows, n_cols));

    for nz in source.nonzeros() {
        if nz.row >= n_rows {
            return Err(SparrowError::IndexOutOfRange {
                index: nz.row,
                bound: n_rows,
            });
        }
        if nz.column >= n_cols {
            return Err(SparrowError::IndexOutOfRange {
                index: nz.column,
                bound: n_cols,
            });
        }
        dense[[nz.row, nz.column]] += nz.value;
    }

    Ok(dense)
}

/// Computes `y = A x` for a CSR matrix and a dense vector
pub fn mul_vec<T>(matrix: &CsrMatrix<T>, x: ArrayView1<'_, T>) -> Result<Array1<T>>
where
    T: Copy + Num + AddAssign,
{
    let (n_rows, n_cols) = matrix.dimensions();
    if x.len() != n_cols {
        return Err(SparrowError::invalid_dimensions(format!(
            "vector of length {} cannot multiply a matrix with {} columns",
            x.len(),
            n_cols
        )));
    }

    let row_ptr = matrix.row_ptr();
    let col_idx = matrix.col_idx();
    let values = matrix.values();

    let y = (0..n_rows)
        .map(|i| {
            let mut sum = T::zero();
            for k in row_ptr[i]..row_ptr[i + 1] {
                sum += values[k] * x[col_idx[k]];
            }
            sum
        })
        .collect();

    Ok(y)
}
