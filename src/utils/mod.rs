//! Utility functions and helpers

pub mod degrees;
pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

/// Turns per-slot counts into running totals, in place
///
/// `[a, b, c]` becomes `[a, a + b, a + b + c]`.
pub fn inclusive_scan_in_place(values: &mut [usize]) {
    let mut sum = 0;
    for v in values.iter_mut() {
        sum += *v;
        *v = sum;
    }
}

/// Replaces each count by the sum of the counts before it, in place
///
/// `[a, b, c]` becomes `[0, a, a + b]`. Returns the grand total.
pub fn exclusive_scan_in_place(values: &mut [usize]) -> usize {
    let mut sum = 0;
    for v in values.iter_mut() {
        let count = *v;
        *v = sum;
        sum += count;
    }
    sum
}
