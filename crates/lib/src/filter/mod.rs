//! Predicate-driven filtering over slices and vectors.
//!
//! Two complementary forms are provided:
//!
//! * [`filter`] copies the surviving elements into a new vector, preserving
//!   their order and leaving the input untouched.
//! * [`compact`] and [`filter_in_place`] shrink a sequence to its surviving
//!   elements without allocating. Removed slots at the front are refilled
//!   with survivors pulled from the back, so element order is not preserved.
//!
//! ```
//! use strand::filter::{filter, filter_in_place};
//!
//! let input: Vec<i32> = (1..=10).collect();
//! assert_eq!(filter(&input, |_, v| *v >= 5), vec![5, 6, 7, 8, 9, 10]);
//!
//! let mut values = input.clone();
//! filter_in_place(&mut values, |v| *v >= 5);
//! assert_eq!(values, vec![10, 9, 8, 7, 5, 6]);
//! ```

use tracing::trace;

/// Returns the elements of `input` for which `keep` returns true, in their
/// original order.
///
/// `keep` receives each element's index and a reference to it.
pub fn filter<T, F>(input: &[T], mut keep: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(usize, &T) -> bool,
{
    let mut kept = Vec::with_capacity(input.len());
    for (index, value) in input.iter().enumerate() {
        if keep(index, value) {
            kept.push(value.clone());
        }
    }
    kept
}

/// Moves every element of `seq` for which `keep` returns true into the front
/// of the slice and returns how many there are.
///
/// `keep` is called exactly once per element. Order among the survivors is
/// not preserved, and the contents of `seq[len..]` after the call are
/// unspecified (they hold the discarded elements in no particular order).
/// Runs in O(n) time without allocating.
pub fn compact<T, F>(seq: &mut [T], mut keep: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut len = seq.len();
    let mut i = 0;
    'scan: while i < len {
        if keep(&seq[i]) {
            i += 1;
            continue;
        }

        // Pull the last surviving element from the back into slot `i`
        loop {
            len -= 1;
            if len == i {
                break 'scan;
            }
            if keep(&seq[len]) {
                seq.swap(i, len);
                i += 1;
                break;
            }
        }
    }
    len
}

/// Keeps only the elements of `vec` for which `keep` returns true, dropping
/// the rest. Does not preserve order; see [`compact`].
pub fn filter_in_place<T, F>(vec: &mut Vec<T>, keep: F)
where
    F: FnMut(&T) -> bool,
{
    let before = vec.len();
    let len = compact(vec.as_mut_slice(), keep);
    vec.truncate(len);
    trace!(before, after = len, "Compacted vector in place");
}

/// Returns true if `input` contains an element equal to `value`.
pub fn contains<T: PartialEq>(input: &[T], value: &T) -> bool {
    input.iter().any(|v| v == value)
}
