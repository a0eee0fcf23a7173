//! Zero-copy views that re-derive a nonzero stream from other sources
//!
//! Views borrow their operands and expose only [`NonzeroSource`]. They never
//! offer row-indexed access, since a transformed stream has no cheap way to
//! find one row.

use crate::error::{Result, SparrowError};

use super::nonzero::{Nonzero, NonzeroSource};

/// The transpose of a source, computed entry by entry as it is iterated
#[derive(Debug, Clone, Copy)]
pub struct Transpose<'a, S> {
    source: &'a S,
}

impl<'a, S: NonzeroSource> Transpose<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// The underlying source
    pub fn inner(&self) -> &'a S {
        self.source
    }
}

impl<'a, S: NonzeroSource> NonzeroSource for Transpose<'a, S> {
    type Value = S::Value;

    fn dimensions(&self) -> (usize, usize) {
        let (rows, cols) = self.source.dimensions();
        (cols, rows)
    }

    fn nnz(&self) -> usize {
        self.source.nnz()
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<Self::Value>> + '_ {
        self.source.nonzeros().map(Nonzero::transposed)
    }
}

/// All entries of `A` followed by all entries of `B`, without deduplication
///
/// Both operands must have the same shape. [`nnz`](NonzeroSource::nnz) is
/// the sum of both counts, so it over-counts positions stored in both. Feed a
/// union through the construction pipeline and `pack` to merge them.
#[derive(Debug, Clone, Copy)]
pub struct Union<'a, A, B> {
    first: &'a A,
    second: &'a B,
}

impl<'a, A, B> Union<'a, A, B>
where
    A: NonzeroSource,
    B: NonzeroSource<Value = A::Value>,
{
    /// Fails with `InvalidDimensions` if the operands differ in shape
    pub fn new(first: &'a A, second: &'a B) -> Result<Self> {
        let (a, b) = (first.dimensions(), second.dimensions());
        if a != b {
            return Err(SparrowError::invalid_dimensions(format!(
                "union operands differ in shape: {}x{} and {}x{}",
                a.0, a.1, b.0, b.1
            )));
        }
        Ok(Self { first, second })
    }
}

impl<'a, A, B> NonzeroSource for Union<'a, A, B>
where
    A: NonzeroSource,
    B: NonzeroSource<Value = A::Value>,
{
    type Value = A::Value;

    fn dimensions(&self) -> (usize, usize) {
        self.first.dimensions()
    }

    fn nnz(&self) -> usize {
        self.first.nnz() + self.second.nnz()
    }

    fn nonzeros(&self) -> impl Iterator<Item = Nonzero<Self::Value>> + '_ {
        self.first.nonzeros().chain(self.second.nonzeros())
    }
}
