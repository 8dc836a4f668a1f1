//! Scoped bookkeeping for active traversals.

use std::cell::Cell;

/// Marks one traversal of a list as active for as long as it is alive.
///
/// The counter is incremented on creation and decremented on drop, so it is
/// released on every exit path of a traversal: normal completion, early stop,
/// and unwinding out of a panicking callback. Nested traversals each hold
/// their own guard.
pub(crate) struct TraversalGuard<'a> {
    depth: &'a Cell<isize>,
}

impl<'a> TraversalGuard<'a> {
    pub(crate) fn enter(depth: &'a Cell<isize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for TraversalGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}
