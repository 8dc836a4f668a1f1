//! A generic singly-linked list with a traversal reentrancy guard.
//!
//! [`LinkedList`] keeps an owned chain of nodes, a cached pointer to the last
//! node for O(1) appends, and an element count. Head insert/delete and tail
//! insert are O(1); deleting the tail and every other indexed operation walk
//! the chain from the head.
//!
//! Traversals ([`LinkedList::for_each`] and everything built on it) mark the
//! list as busy. While any traversal is active, including nested ones,
//! operations that change the list return
//! [`ListError::MutationDuringTraversal`] instead of touching it.
//!
//! The list is not safe for concurrent use and is neither `Send` nor `Sync`.

mod errors;
mod guard;
mod node;

use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::{debug, trace};

pub use errors::ListError;
use guard::TraversalGuard;
use node::Chain;

/// A singly-linked list of `V`.
///
/// The default value is a valid empty list.
///
/// Mutating methods take `&self` so that a traversal callback can reach the
/// list it is visiting; the reentrancy guard, not the borrow checker, is what
/// rejects changes made from inside a traversal.
///
/// # Examples
///
/// ```
/// use strand::list::LinkedList;
///
/// let list = LinkedList::new();
/// list.insert_tail(1).unwrap();
/// list.insert_tail(3).unwrap();
/// list.insert_at(1, 2).unwrap();
///
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// assert_eq!(list.search(&3), Some(2));
/// assert_eq!(list.to_string(), "[1, 2, 3]");
/// ```
pub struct LinkedList<V> {
    chain: RefCell<Chain<V>>,
    /// Number of active traversals. Mutation is refused while non-zero.
    block_mod: Cell<isize>,
}

impl<V> LinkedList<V> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            chain: RefCell::new(Chain::new()),
            block_mod: Cell::new(0),
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.chain.borrow().size
    }

    /// Returns true if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if there is an element at `index`.
    pub fn exists(&self, index: usize) -> bool {
        index < self.len()
    }

    fn ensure_mutable(&self, operation: &'static str) -> Result<(), ListError> {
        let depth = self.block_mod.get();
        if depth > 0 {
            debug!(operation, depth, "Rejected list mutation during traversal");
            return Err(ListError::MutationDuringTraversal {
                depth: depth as usize,
            });
        }
        Ok(())
    }

    /// Inserts `value` so that it becomes the element at `index`, shifting
    /// every following element one position later.
    ///
    /// Valid indices are `0..=len()`; `len()` appends at the tail.
    ///
    /// # Errors
    /// - [`ListError::IndexOutOfBounds`] if `index > len()`
    /// - [`ListError::MutationDuringTraversal`] if called from a traversal
    pub fn insert_at(&self, index: usize, value: V) -> Result<(), ListError> {
        self.ensure_mutable("insert_at")?;
        let mut chain = self.chain.borrow_mut();
        chain.insert(index, value).inspect_err(|err| {
            debug!(index, error = %err, "List insert failed");
        })?;
        trace!(index, len = chain.size, "Inserted list element");
        Ok(())
    }

    /// Inserts `value` at the head of the list.
    pub fn insert_head(&self, value: V) -> Result<(), ListError> {
        self.insert_at(0, value)
    }

    /// Inserts `value` after the last element of the list.
    pub fn insert_tail(&self, value: V) -> Result<(), ListError> {
        self.insert_at(self.len(), value)
    }

    /// Overwrites the element at `index`, returning the previous value.
    ///
    /// # Errors
    /// - [`ListError::IndexOutOfBounds`] if `index >= len()`
    /// - [`ListError::MutationDuringTraversal`] if called from a traversal,
    ///   since the traversal may be holding a reference to the element
    pub fn set(&self, index: usize, value: V) -> Result<V, ListError> {
        self.ensure_mutable("set")?;
        let mut chain = self.chain.borrow_mut();
        let len = chain.size;
        let node = chain
            .node_mut(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })?;
        Ok(std::mem::replace(&mut node.value, value))
    }

    /// Removes the element at `index`, shifting every following element one
    /// position earlier, and returns it.
    ///
    /// Deleting index 0 of an empty list is a no-op and returns `Ok(None)`.
    ///
    /// # Errors
    /// - [`ListError::IndexOutOfBounds`] if `index > 0` and `index >= len()`
    /// - [`ListError::MutationDuringTraversal`] if called from a traversal
    pub fn delete_at(&self, index: usize) -> Result<Option<V>, ListError> {
        self.ensure_mutable("delete_at")?;
        let mut chain = self.chain.borrow_mut();
        let removed = chain.remove(index).inspect_err(|err| {
            debug!(index, error = %err, "List delete failed");
        })?;
        if removed.is_some() {
            trace!(index, len = chain.size, "Deleted list element");
        }
        Ok(removed)
    }

    /// Calls `f` with each index and value in order from head to tail.
    ///
    /// Returning `true` from `f` stops the traversal immediately. The
    /// callback may read the list, including starting nested traversals, but
    /// any attempt to modify it fails with
    /// [`ListError::MutationDuringTraversal`].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, &V) -> bool,
    {
        let _guard = TraversalGuard::enter(&self.block_mod);
        let chain = self.chain.borrow();

        for (index, value) in chain.iter().enumerate() {
            if f(index, value) {
                return;
            }
        }
    }

    /// Returns the index of the first element equal to `value`.
    pub fn search(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        let mut found = None;
        self.for_each(|index, v| {
            if v == value {
                found = Some(index);
                return true;
            }
            false
        });
        found
    }

    /// Returns true if any element equals `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.search(value).is_some()
    }
}

impl<V: Clone> LinkedList<V> {
    /// Returns a copy of the element at `index`.
    ///
    /// The clone runs under the traversal guard, so a `Clone` impl that
    /// reaches back into this list cannot modify it.
    ///
    /// # Errors
    /// [`ListError::IndexOutOfBounds`] if `index >= len()`
    pub fn get(&self, index: usize) -> Result<V, ListError> {
        let _guard = TraversalGuard::enter(&self.block_mod);
        let chain = self.chain.borrow();
        chain
            .node(index)
            .map(|node| node.value.clone())
            .ok_or(ListError::IndexOutOfBounds {
                index,
                len: chain.size,
            })
    }

    /// Copies every element, in list order, into a new vector.
    pub fn to_vec(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.len());
        self.for_each(|_, value| {
            values.push(value.clone());
            false
        });
        values
    }
}

impl<V> Default for LinkedList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Display> fmt::Display for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut result = Ok(());
        self.for_each(|index, value| {
            if index != 0 {
                result = f.write_str(", ");
            }
            if result.is_ok() {
                result = write!(f, "{value}");
            }
            result.is_err()
        });
        result?;
        f.write_str("]")
    }
}

impl<V: fmt::Debug> fmt::Debug for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.for_each(|_, value| {
            list.entry(value);
            false
        });
        list.finish()
    }
}

impl<V> Extend<V> for LinkedList<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        // `&mut self` rules out an active traversal
        let chain = self.chain.get_mut();
        for value in iter {
            chain.push_tail(value);
        }
    }
}

impl<V> FromIterator<V> for LinkedList<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Consuming iterator over a [`LinkedList`], from head to tail.
pub struct IntoIter<V> {
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.chain.pop_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.size, Some(self.chain.size))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for LinkedList<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            chain: self.chain.into_inner(),
        }
    }
}
