//! Error types for linked list operations.
//!
//! A list operation can fail in exactly two ways: the index does not name an
//! existing element, or the call tried to change the list while a traversal
//! of it was still running. Both are detected before anything is modified,
//! so a failed call never leaves the list half-changed.

use thiserror::Error;

/// Structured error types for [`LinkedList`](super::LinkedList) operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The index does not correspond to an element of the list
    #[error("list index out of bounds: the len is {len} but the index is {index}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A mutation was attempted from inside a `for_each` callback
    #[error("cannot modify a list while iterating over it ({depth} traversal(s) active)")]
    MutationDuringTraversal { depth: usize },
}

impl ListError {
    /// Check if this error is an out-of-bounds access
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, ListError::IndexOutOfBounds { .. })
    }

    /// Check if this error is a rejected mutation during traversal
    pub fn is_reentrant_mutation(&self) -> bool {
        matches!(self, ListError::MutationDuringTraversal { .. })
    }

    /// Get the offending index if this is an out-of-bounds error
    pub fn index(&self) -> Option<usize> {
        match self {
            ListError::IndexOutOfBounds { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// Conversion from ListError to the main Error type
impl From<ListError> for crate::Error {
    fn from(err: ListError) -> Self {
        crate::Error::List(err)
    }
}
