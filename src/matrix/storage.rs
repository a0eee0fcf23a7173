//! Storage maintenance for CSR matrices: merging duplicates and sorting rows

use num_traits::Num;
use tracing::{debug, instrument};

use super::csr::CsrMatrix;
use super::sort::sort_paired;

/// Marker for a column not yet seen in the current row
const UNSEEN: usize = usize::MAX;

impl<T: Copy + Num> CsrMatrix<T> {
    /// Merges duplicate `(row, column)` entries by summing their values
    pub fn pack(&mut self) {
        self.pack_with(|a, b| a + b);
    }
}

impl<T: Copy> CsrMatrix<T> {
    /// Merges duplicate `(row, column)` entries with `combine`
    ///
    /// Each row keeps its columns in first-occurrence order; entries that
    /// repeat a column are folded into the first one. Surviving entries are
    /// compacted to the front of the arrays and the arrays are shortened.
    #[instrument(level = "debug", skip_all)]
    pub fn pack_with<F>(&mut self, mut combine: F)
    where
        F: FnMut(T, T) -> T,
    {
        let (n_rows, n_cols) = self.dimensions();
        let before = self.nnz();
        let (row_ptr, col_idx, values) = self.raw_parts_mut();

        // slot of each column's first entry in the row being packed
        let mut slot_of = vec![UNSEEN; n_cols];
        let mut write = 0;
        let mut start = row_ptr[0];

        for row in 0..n_rows {
            let end = row_ptr[row + 1];
            let row_begin = write;

            for read in start..end {
                let col = col_idx[read];
                match slot_of[col] {
                    UNSEEN => {
                        slot_of[col] = write;
                        col_idx[write] = col;
                        values[write] = values[read];
                        write += 1;
                    }
                    slot => values[slot] = combine(values[slot], values[read]),
                }
            }

            // reset only the columns this row touched
            for &col in &col_idx[row_begin..write] {
                slot_of[col] = UNSEEN;
            }

            row_ptr[row + 1] = write;
            start = end;
        }

        col_idx.truncate(write);
        values.truncate(write);
        debug!(before, after = write, "packed duplicate entries");
    }

    /// Sorts every row by ascending column, keeping values attached
    #[instrument(level = "debug", skip_all)]
    pub fn sort(&mut self) {
        let (n_rows, _) = self.dimensions();
        let (row_ptr, col_idx, values) = self.raw_parts_mut();

        for row in 0..n_rows {
            let range = row_ptr[row]..row_ptr[row + 1];
            if range.len() > 1 {
                sort_paired(&mut col_idx[range.clone()], &mut values[range]);
            }
        }
    }

    /// True if every row lists its columns in non-decreasing order
    pub fn is_sorted(&self) -> bool {
        self.row_ptr()
            .windows(2)
            .all(|w| self.col_idx()[w[0]..w[1]].windows(2).all(|c| c[0] <= c[1]))
    }

    /// True if no row lists the same column twice
    pub fn is_packed(&self) -> bool {
        let (_, n_cols) = self.dimensions();
        let mut seen_in_row = vec![usize::MAX; n_cols];

        for (row, w) in self.row_ptr().windows(2).enumerate() {
            for &col in &self.col_idx()[w[0]..w[1]] {
                if seen_in_row[col] == row {
                    return false;
                }
                seen_in_row[col] = row;
            }
        }
        true
    }
}
