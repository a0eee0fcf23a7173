//! The adjacency contract graph algorithms consume

use num_traits::Num;
use tracing::{debug, instrument};

use crate::error::{Result, SparrowError};
use crate::matrix::conversion::build_csr_from_source;
use crate::matrix::csr::CsrMatrix;
use crate::matrix::views::{Transpose, Union};

/// Read-only access to the out-edges of each vertex
pub trait Adjacency {
    /// Weight carried by each edge
    type Weight: Copy;

    /// Number of vertices, numbered `0..vertex_count()`
    fn vertex_count(&self) -> usize;

    /// Edges leaving `v` as `(target, weight)` pairs
    ///
    /// # Panics
    ///
    /// May panic if `v >= vertex_count()`.
    fn out_edges(&self, v: usize) -> impl Iterator<Item = (usize, Self::Weight)> + '_;

    fn out_degree(&self, v: usize) -> usize {
        self.out_edges(v).count()
    }
}

impl<T: Copy> Adjacency for CsrMatrix<T> {
    type Weight = T;

    fn vertex_count(&self) -> usize {
        self.dimensions().0
    }

    fn out_edges(&self, v: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_ptr()[v]..self.row_ptr()[v + 1];
        self.col_idx()[range.clone()]
            .iter()
            .copied()
            .zip(self.values()[range].iter().copied())
    }

    fn out_degree(&self, v: usize) -> usize {
        self.row_ptr()[v + 1] - self.row_ptr()[v]
    }
}

/// Builds `A + Aᵗ` as a packed, column-sorted CSR matrix
///
/// The result stores an edge in both directions wherever `A` stores it in
/// either. Values at mirrored positions are summed, so an edge stored both
/// ways in `A` (or a self-loop) ends up with twice its weight.
///
/// Fails with [`SparrowError::InvalidDimensions`] unless `A` is square.
#[instrument(level = "debug", skip_all)]
pub fn symmetrize<T>(matrix: &CsrMatrix<T>) -> Result<CsrMatrix<T>>
where
    T: Copy + Num,
{
    let (n_rows, n_cols) = matrix.dimensions();
    if n_rows != n_cols {
        return Err(SparrowError::invalid_dimensions(format!(
            "only square matrices can be symmetrized, got {}x{}",
            n_rows, n_cols
        )));
    }

    let transpose = Transpose::new(matrix);
    let union = Union::new(matrix, &transpose)?;
    let mut symmetric = build_csr_from_source(&union, None)?;
    symmetric.pack();
    symmetric.sort();

    debug!(nnz = matrix.nnz(), symmetric_nnz = symmetric.nnz(), "symmetrized");
    Ok(symmetric)
}
