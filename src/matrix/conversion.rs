//! Construction pipeline: nonzero sources into CSR storage
//!
//! The pipeline is a counting sort on the row index. One pass over the source
//! counts entries per row (skipped when the row degrees are already known),
//! a prefix sum turns the counts into row starts, and a second pass drops
//! every entry into the next free slot of its row. The row starts double as
//! per-row write cursors during the second pass and are shifted back into
//! place afterwards, so the only auxiliary storage is the offset array itself.

use std::path::Path;

use num_traits::{Num, Zero};
use tracing::{debug, instrument, warn};

use crate::error::{Result, SparrowError};
use crate::matrix::config::LoadConfig;
use crate::matrix::nonzero::{Nonzero, NonzeroSource};
use crate::matrix::CsrMatrix;
use crate::utils::degrees::load_side_channel_degrees;
use crate::utils::inclusive_scan_in_place;

/// Coordinates of the most recent entry that passed the bounds check
#[derive(Debug, Default, Clone, Copy)]
struct LastValid {
    row: usize,
    column: usize,
    seq: usize,
}

impl LastValid {
    fn record<T>(&mut self, nz: &Nonzero<T>) {
        self.row = nz.row;
        self.column = nz.column;
        self.seq = nz.seq;
    }

    fn malformed(&self, row: usize, column: usize) -> SparrowError {
        SparrowError::MalformedMatrixData {
            row,
            column,
            last_valid_row: self.row,
            last_valid_column: self.column,
            last_valid_seq: self.seq,
        }
    }
}

/// Builds a CSR store from any nonzero source
///
/// # Arguments
///
/// * `source` - Any matrix-like source; it is read twice (once when
///   `known_row_degrees` is supplied)
/// * `known_row_degrees` - Optional per-row entry counts, `n_rows` long,
///   which replace the counting pass
///
/// # Errors
///
/// * [`SparrowError::InvalidDimensions`] if the source has no rows or the
///   degrees are not `n_rows` long
/// * [`SparrowError::MalformedMatrixData`] on the first entry outside the
///   declared shape
/// * [`SparrowError::NonzeroCountMismatch`] if the entries seen differ from
///   the declared `nnz` (or the degrees do not sum to it)
/// * [`SparrowError::DegreeMismatch`] if a supplied degree is wrong
///
/// # Examples
///
/// ```
/// use sparrow::{build_csr_from_source, TripletMatrix};
///
/// let source = TripletMatrix::from_triplets(2, 2, vec![1, 0, 1, 0], vec![1, 1, 0, 0], vec![1.0; 4]);
/// let csr = build_csr_from_source(&source, None).unwrap();
/// assert_eq!(csr.row_ptr(), &[0, 2, 4]);
/// ```
#[instrument(level = "debug", skip_all)]
pub fn build_csr_from_source<S>(
    source: &S,
    known_row_degrees: Option<&[usize]>,
) -> Result<CsrMatrix<S::Value>>
where
    S: NonzeroSource,
    S::Value: Num,
{
    let (n_rows, n_cols) = source.dimensions();
    let nnz = source.nnz();

    if n_rows == 0 {
        return Err(SparrowError::invalid_dimensions("invalid number of rows: 0"));
    }

    debug!(
        n_rows,
        n_cols,
        nnz,
        precomputed_degrees = known_row_degrees.is_some(),
        "building CSR store"
    );

    // 1. Row counts land one slot to the right so the scan yields row starts
    let mut row_ptr = vec![0usize; n_rows + 1];
    match known_row_degrees {
        Some(degrees) => {
            if degrees.len() != n_rows {
                return Err(SparrowError::invalid_dimensions(format!(
                    "{} row degrees supplied for {} rows",
                    degrees.len(),
                    n_rows
                )));
            }
            let total = degree_total(degrees).ok_or_else(|| {
                SparrowError::invalid_dimensions("row degrees sum past usize::MAX")
            })?;
            if total != nnz {
                return Err(SparrowError::NonzeroCountMismatch {
                    expected: nnz,
                    actual: total,
                });
            }
            row_ptr[1..].copy_from_slice(degrees);
        }
        None => count_row_entries(source, &mut row_ptr)?,
    }

    // 2. row_ptr[r] is now the first slot of row r
    inclusive_scan_in_place(&mut row_ptr);

    // 3. Fill, consuming row_ptr[r] as the write cursor of row r
    let mut col_idx = vec![0usize; nnz];
    let mut values = vec![<S::Value as Zero>::zero(); nnz];
    let mut last_valid = LastValid::default();
    let mut written = 0usize;

    let mut entries = source.nonzeros();
    while let Some(nz) = entries.next() {
        if nz.row >= n_rows || nz.column >= n_cols {
            return Err(last_valid.malformed(nz.row, nz.column));
        }

        let slot = row_ptr[nz.row];
        if slot >= nnz {
            let rest = entries.count();
            return Err(match known_row_degrees {
                Some(degrees) => {
                    let row_start: usize = degrees[..nz.row].iter().sum();
                    SparrowError::DegreeMismatch {
                        row: nz.row,
                        expected: degrees[nz.row],
                        actual: slot - row_start + 1,
                    }
                }
                None => SparrowError::NonzeroCountMismatch {
                    expected: nnz,
                    actual: written + 1 + rest,
                },
            });
        }

        col_idx[slot] = nz.column;
        values[slot] = nz.value;
        row_ptr[nz.row] += 1;
        written += 1;
        last_valid.record(&nz);
    }

    // 4. Every declared slot must have been filled
    if written != nnz {
        return Err(SparrowError::NonzeroCountMismatch {
            expected: nnz,
            actual: written,
        });
    }

    if let Some(degrees) = known_row_degrees {
        check_filled_degrees(&row_ptr, degrees)?;
    }

    // The cursors now hold row ends; shift them down one row
    row_ptr.copy_within(0..n_rows, 1);
    row_ptr[0] = 0;

    Ok(CsrMatrix::from_parts_unchecked(
        n_rows, n_cols, row_ptr, col_idx, values,
    ))
}

/// First pass: per-row entry counts into `row_ptr[row + 1]`, with bounds checks
fn count_row_entries<S: NonzeroSource>(source: &S, row_ptr: &mut [usize]) -> Result<()> {
    let (n_rows, n_cols) = source.dimensions();
    let mut last_valid = LastValid::default();
    let mut count = 0usize;

    for nz in source.nonzeros() {
        if nz.row >= n_rows || nz.column >= n_cols {
            return Err(last_valid.malformed(nz.row, nz.column));
        }
        row_ptr[nz.row + 1] += 1;
        count += 1;
        last_valid.record(&nz);
    }

    if count != source.nnz() {
        return Err(SparrowError::NonzeroCountMismatch {
            expected: source.nnz(),
            actual: count,
        });
    }

    Ok(())
}

/// Sum of the row degrees, `None` if it overflows
fn degree_total(degrees: &[usize]) -> Option<usize> {
    degrees.iter().try_fold(0usize, |acc, &d| acc.checked_add(d))
}

/// After the fill pass `cursors[r]` is one past the last slot written for row r
fn check_filled_degrees(cursors: &[usize], degrees: &[usize]) -> Result<()> {
    let mut row_start = 0;
    for (row, &expected) in degrees.iter().enumerate() {
        let actual = cursors[row] - row_start;
        if actual != expected {
            return Err(SparrowError::DegreeMismatch {
                row,
                expected,
                actual,
            });
        }
        row_start += expected;
    }
    Ok(())
}

/// Builds a CSR store, taking row degrees from a side-channel file when one exists
///
/// Looks for `matrix_path` + `config.degrees_suffix`. Degrees that are present
/// but inconsistent with the source's shape or nonzero count are ignored with
/// a warning and the counting pass runs instead.
#[instrument(level = "debug", skip(source, matrix_path, config), fields(path = %matrix_path.as_ref().display()))]
pub fn build_csr_with_side_channel<S, P>(
    source: &S,
    matrix_path: P,
    config: &LoadConfig,
) -> Result<CsrMatrix<S::Value>>
where
    S: NonzeroSource,
    S::Value: Num,
    P: AsRef<Path>,
{
    let n_rows = source.n_rows();
    let degrees = if config.use_side_channel {
        load_side_channel_degrees(matrix_path.as_ref(), n_rows, config)?
    } else {
        None
    };

    let degrees = degrees.filter(|degrees| {
        let total = degree_total(degrees);
        let consistent = degrees.len() == n_rows && total == Some(source.nnz());
        if !consistent {
            warn!(
                len = degrees.len(),
                ?total,
                n_rows,
                nnz = source.nnz(),
                "ignoring side-channel degrees inconsistent with the source"
            );
        }
        consistent
    });

    build_csr_from_source(source, degrees.as_deref())
}
