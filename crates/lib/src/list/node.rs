//! Chain storage for [`LinkedList`](super::LinkedList).
//!
//! Everything here assumes exclusive access. The reentrancy checks live one
//! level up in the list itself.
//!
//! Links are raw pointers produced by `Box::into_raw` and released with
//! `Box::from_raw`. No `Box` owns a node while it is linked, so the tail
//! alias and the predecessor's link are equal-standing copies of the same
//! pointer and moving one never invalidates the other.

use std::marker::PhantomData;
use std::ptr::NonNull;

use super::errors::ListError;

pub(crate) type Link<V> = Option<NonNull<Node<V>>>;

/// A single element plus the link to its successor.
pub(crate) struct Node<V> {
    pub(crate) value: V,
    next: Link<V>,
}

/// The chain of nodes plus its cached tail.
///
/// The chain owns every node reachable from `head`: each one was allocated
/// by `splice_after` and is freed exactly once, by `remove`, `pop_head`, or
/// `Drop`. `tail` is a non-owning copy of the last node's pointer and is
/// `None` exactly when `head` is.
pub(crate) struct Chain<V> {
    head: Link<V>,
    tail: Link<V>,
    pub(crate) size: usize,
    _owns: PhantomData<Box<Node<V>>>,
}

impl<V> Chain<V> {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            size: 0,
            _owns: PhantomData,
        }
    }

    fn out_of_bounds(&self, index: usize) -> ListError {
        ListError::IndexOutOfBounds {
            index,
            len: self.size,
        }
    }

    /// Pointer to the node at `index`, or `None` when the chain ends first.
    fn node_ptr(&self, index: usize) -> Link<V> {
        let mut cur = self.head;
        for _ in 0..index {
            // SAFETY: every link reachable from `head` points at a live node
            // owned by this chain.
            cur = unsafe { cur?.as_ref() }.next;
        }
        cur
    }

    pub(crate) fn node(&self, index: usize) -> Option<&Node<V>> {
        // SAFETY: the node is live and the shared borrow of `self` keeps the
        // chain from changing while the reference exists.
        self.node_ptr(index).map(|node| unsafe { node.as_ref() })
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> Option<&mut Node<V>> {
        // SAFETY: the node is live and `&mut self` rules out any other
        // reference into the chain.
        self.node_ptr(index).map(|mut node| unsafe { node.as_mut() })
    }

    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            next: self.head,
            _chain: PhantomData,
        }
    }

    /// Inserts `value` so that it becomes the element at `index`.
    ///
    /// Index 0 and index `size` never walk the chain; anything in between
    /// walks to the predecessor at `index - 1`.
    pub(crate) fn insert(&mut self, index: usize, value: V) -> Result<(), ListError> {
        let len = self.size;
        if index > len {
            return Err(self.out_of_bounds(index));
        }

        let prev = if index == 0 {
            None
        } else if index == len {
            self.tail
        } else {
            Some(
                self.node_ptr(index - 1)
                    .ok_or(ListError::IndexOutOfBounds { index, len })?,
            )
        };

        self.splice_after(prev, value);
        Ok(())
    }

    /// Appends `value` after the cached tail.
    pub(crate) fn push_tail(&mut self, value: V) {
        self.splice_after(self.tail, value);
    }

    /// Links a new node after `prev`, or in front of the head when `prev` is
    /// `None`. `prev` must point into this chain.
    fn splice_after(&mut self, prev: Link<V>, value: V) {
        let next = match prev {
            None => self.head,
            // SAFETY: `prev` is a live node of this chain (the tail cache or
            // the result of a walk from the head).
            Some(prev) => unsafe { prev.as_ref() }.next,
        };

        let node = Box::into_raw(Box::new(Node { value, next }));
        // SAFETY: `Box::into_raw` never returns null.
        let node = unsafe { NonNull::new_unchecked(node) };

        match prev {
            None => self.head = Some(node),
            // SAFETY: as above; `&mut self` means nothing else references it.
            Some(mut prev) => unsafe { prev.as_mut() }.next = Some(node),
        }

        // Only the tail has no successor
        if next.is_none() {
            self.tail = Some(node);
        }
        self.size += 1;
    }

    /// Removes the element at `index` and returns its value.
    ///
    /// Removing index 0 from an empty chain is a no-op that returns `None`.
    /// Removing the last element moves the tail cache to its predecessor.
    pub(crate) fn remove(&mut self, index: usize) -> Result<Option<V>, ListError> {
        if index == 0 {
            return Ok(self.pop_head());
        }
        if index >= self.size {
            return Err(self.out_of_bounds(index));
        }

        let len = self.size;
        let mut prev = self
            .node_ptr(index - 1)
            .ok_or(ListError::IndexOutOfBounds { index, len })?;
        // SAFETY: `prev` is a live node and `&mut self` is exclusive.
        let prev_node = unsafe { prev.as_mut() };
        let removed = prev_node
            .next
            .ok_or(ListError::IndexOutOfBounds { index, len })?;

        // SAFETY: `removed` came from `Box::into_raw` in `splice_after` and is
        // unlinked right here, so this is the only place that frees it.
        let removed = unsafe { Box::from_raw(removed.as_ptr()) };
        prev_node.next = removed.next;
        if prev_node.next.is_none() {
            self.tail = Some(prev);
        }
        self.size -= 1;
        Ok(Some(removed.value))
    }

    /// Unlinks the head node and returns its value.
    pub(crate) fn pop_head(&mut self) -> Option<V> {
        self.head.map(|head| {
            // SAFETY: the head came from `Box::into_raw` and is unlinked below
            // before anything else can reach it.
            let node = unsafe { Box::from_raw(head.as_ptr()) };
            self.head = node.next;
            self.size -= 1;
            if self.head.is_none() {
                self.tail = None;
            }
            node.value
        })
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // One node at a time, so a long chain is not dropped recursively
        while self.pop_head().is_some() {}
    }
}

/// Borrowing iterator over the values of a [`Chain`], head to tail.
pub(crate) struct Iter<'a, V> {
    next: Link<V>,
    _chain: PhantomData<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.next.map(|node| {
            // SAFETY: the iterator borrows the chain for `'a`, so the node
            // stays live and unchanged for that long.
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            &node.value
        })
    }
}
