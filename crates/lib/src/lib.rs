//!
//! Strand: generic containers and filtering helpers.
//!
//! ## Core Concepts
//!
//! * **Linked list (`list::LinkedList`)**: A singly-linked sequence with O(1) head and tail
//!   insertion, indexed access, search, and traversal. Traversals hold a reentrancy guard
//!   that rejects structural changes made from inside the traversal callback.
//! * **Filters (`filter`)**: A copying, order-preserving filter over slices and an
//!   allocation-free compaction filter that trades element order for zero allocation.
//!
//! ## Errors
//!
//! List operations fail in one of two ways, both reported as [`list::ListError`] before
//! anything is modified:
//!
//! * `IndexOutOfBounds`: `get`, `set`, `delete_at`, or `insert_at` named an index with no
//!   element (or, for `insert_at`, past the end).
//! * `MutationDuringTraversal`: `insert_at` or `delete_at` was called while a traversal of
//!   the same list was running. `set` is rejected in that case too, because the traversal
//!   holds a reference to the values and one of them may be the one being overwritten.
//!
//! None of the types here are safe for concurrent use; callers that share them across
//! threads must provide their own locking.

pub mod filter;
pub mod list;

/// Re-export the `LinkedList` struct for easier access.
pub use list::LinkedList;

/// Result type used throughout the Strand library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Strand library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured list errors from the list module
    #[error(transparent)]
    List(list::ListError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::List(_) => "list",
        }
    }

    /// Check if this error is an out-of-bounds access.
    pub fn is_out_of_bounds(&self) -> bool {
        match self {
            Error::List(list_err) => list_err.is_out_of_bounds(),
        }
    }

    /// Check if this error is a mutation rejected by an active traversal.
    pub fn is_reentrant_mutation(&self) -> bool {
        match self {
            Error::List(list_err) => list_err.is_reentrant_mutation(),
        }
    }
}
