//! In-place sort of a key slice with a companion value slice
//!
//! Every compare-exchange on the keys performs the same exchange on the
//! values, so each value stays attached to its key. Introsort: quicksort with
//! a median-of-three pivot, insertion sort for short runs and a heapsort
//! fallback once the recursion gets too deep. Not stable.

/// Runs at or below this length are finished with insertion sort
const INSERTION_THRESHOLD: usize = 16;

/// Sorts `keys` ascending, applying the same permutation to `values`
///
/// # Panics
///
/// Panics if the slices have different lengths.
pub fn sort_paired<T>(keys: &mut [usize], values: &mut [T]) {
    assert_eq!(keys.len(), values.len(), "keys and values must have the same length");
    let depth_limit = 2 * (usize::BITS - keys.len().leading_zeros()) as usize;
    introsort(keys, values, depth_limit);
}

#[inline]
fn swap_pair<T>(keys: &mut [usize], values: &mut [T], a: usize, b: usize) {
    keys.swap(a, b);
    values.swap(a, b);
}

fn introsort<T>(keys: &mut [usize], values: &mut [T], depth: usize) {
    let len = keys.len();
    if len <= INSERTION_THRESHOLD {
        insertion_sort(keys, values);
        return;
    }
    if depth == 0 {
        heapsort(keys, values);
        return;
    }

    let p = partition(keys, values);
    let (left_keys, right_keys) = keys.split_at_mut(p);
    let (left_values, right_values) = values.split_at_mut(p);

    // right_keys[0] is the pivot, already in its final place
    introsort(left_keys, left_values, depth - 1);
    introsort(&mut right_keys[1..], &mut right_values[1..], depth - 1);
}

/// Lomuto partition around the median of first, middle and last keys
///
/// Returns the final index of the pivot.
fn partition<T>(keys: &mut [usize], values: &mut [T]) -> usize {
    let last = keys.len() - 1;
    let mid = keys.len() / 2;

    if keys[mid] < keys[0] {
        swap_pair(keys, values, 0, mid);
    }
    if keys[last] < keys[0] {
        swap_pair(keys, values, 0, last);
    }
    if keys[mid] < keys[last] {
        swap_pair(keys, values, mid, last);
    }

    let pivot = keys[last];
    let mut store = 0;
    for i in 0..last {
        if keys[i] < pivot {
            swap_pair(keys, values, i, store);
            store += 1;
        }
    }
    swap_pair(keys, values, store, last);
    store
}

fn insertion_sort<T>(keys: &mut [usize], values: &mut [T]) {
    for i in 1..keys.len() {
        let mut j = i;
        while j > 0 && keys[j - 1] > keys[j] {
            swap_pair(keys, values, j - 1, j);
            j -= 1;
        }
    }
}

fn heapsort<T>(keys: &mut [usize], values: &mut [T]) {
    let len = keys.len();
    for root in (0..len / 2).rev() {
        sift_down(keys, values, root, len);
    }
    for end in (1..len).rev() {
        swap_pair(keys, values, 0, end);
        sift_down(keys, values, 0, end);
    }
}

fn sift_down<T>(keys: &mut [usize], values: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && keys[child] < keys[child + 1] {
            child += 1;
        }
        if keys[root] >= keys[child] {
            break;
        }
        swap_pair(keys, values, root, child);
        root = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_sorted_and_attached(keys: &[usize], values: &[usize]) {
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        // values were built as key * 10 so attachment is checkable
        for (k, v) in keys.iter().zip(values) {
            assert_eq!(*v, k * 10);
        }
    }

    #[test]
    fn test_short_run() {
        let mut keys = vec![3, 1, 2];
        let mut values = vec![30, 10, 20];
        sort_paired(&mut keys, &mut values);
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    fn test_long_run_with_duplicates() {
        let mut keys: Vec<usize> = (0..500).map(|i| (i * 7919) % 97).collect();
        let mut values: Vec<usize> = keys.iter().map(|k| k * 10).collect();
        sort_paired(&mut keys, &mut values);
        check_sorted_and_attached(&keys, &values);
    }

    #[test]
    fn test_reverse_sorted() {
        let mut keys: Vec<usize> = (0..300).rev().collect();
        let mut values: Vec<usize> = keys.iter().map(|k| k * 10).collect();
        sort_paired(&mut keys, &mut values);
        assert_eq!(keys, (0..300).collect::<Vec<_>>());
        check_sorted_and_attached(&keys, &values);
    }

    #[test]
    fn test_heapsort_fallback() {
        let mut keys: Vec<usize> = (0..200).map(|i| (i * 31) % 53).collect();
        let mut values: Vec<usize> = keys.iter().map(|k| k * 10).collect();
        heapsort(&mut keys, &mut values);
        check_sorted_and_attached(&keys, &values);
    }

    #[test]
    fn test_all_equal_keys() {
        let mut keys = vec![4; 64];
        let mut values = vec![40; 64];
        sort_paired(&mut keys, &mut values);
        check_sorted_and_attached(&keys, &values);
    }

    #[test]
    fn test_empty() {
        let mut keys: Vec<usize> = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        sort_paired(&mut keys, &mut values);
        assert!(keys.is_empty());
    }
}
