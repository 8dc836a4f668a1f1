//! The traversal guard: nested reads are allowed, mutation is not.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};

use strand::list::{LinkedList, ListError};

use crate::helpers::*;

#[test]
fn test_insert_and_delete_rejected_inside_for_each() {
    let list = list_from(&[1, 2, 3]);
    let mut results = Vec::new();

    list.for_each(|index, _| {
        results.push(list.insert_at(index, 0));
        results.push(list.insert_tail(0));
        results.push(list.delete_at(index).map(|_| ()));
        false
    });

    assert_eq!(results.len(), 9);
    for result in results {
        assert_eq!(result, Err(ListError::MutationDuringTraversal { depth: 1 }));
    }
    assert_list_eq(&list, &[1, 2, 3]);
}

#[test]
fn test_delete_head_rejected_inside_traversal() {
    let list = list_from(&[1]);
    let mut result = Ok(None);

    list.for_each(|_, _| {
        result = list.delete_at(0);
        true
    });

    assert!(result.unwrap_err().is_reentrant_mutation());
    assert_list_eq(&list, &[1]);
}

#[test]
fn test_nested_traversals_read_freely() {
    let list = list_from(&[1, 2, 3]);
    let mut pairs = Vec::new();

    list.for_each(|_, a| {
        list.for_each(|_, b| {
            pairs.push((*a, *b));
            false
        });
        false
    });

    assert_eq!(pairs.len(), 9);
    assert_eq!(pairs[0], (1, 1));
    assert_eq!(pairs[8], (3, 3));
}

#[test]
fn test_nested_traversal_reports_depth() {
    let list = list_from(&[1, 2]);
    let mut inner_error = None;

    list.for_each(|_, _| {
        list.for_each(|_, _| {
            inner_error = list.insert_head(0).err();
            true
        });
        true
    });

    assert_eq!(
        inner_error,
        Some(ListError::MutationDuringTraversal { depth: 2 })
    );
    assert_list_eq(&list, &[1, 2]);
}

#[test]
fn test_reads_allowed_inside_traversal() {
    let list = list_from(&[5, 6, 7]);
    let mut snapshot = Vec::new();

    list.for_each(|index, value| {
        assert_eq!(list.get(index), Ok(*value));
        assert_eq!(list.len(), 3);
        assert!(list.exists(index));
        assert_eq!(list.search(value), Some(index));
        snapshot.push(list.to_vec());
        false
    });

    assert_eq!(snapshot, vec![vec![5, 6, 7]; 3]);
}

#[test]
fn test_display_inside_traversal() {
    let list = list_from(&[1, 2]);
    let mut rendered = String::new();
    list.for_each(|_, _| {
        rendered = list.to_string();
        true
    });
    assert_eq!(rendered, "[1, 2]");
}

#[test]
fn test_guard_released_after_early_stop() {
    let list = list_from(&[1, 2, 3]);
    list.for_each(|_, _| true);

    list.insert_head(0).unwrap();
    assert_eq!(list.delete_at(3), Ok(Some(3)));
    assert_list_eq(&list, &[0, 1, 2]);
}

#[test]
fn test_guard_released_after_panicking_callback() {
    let list = list_from(&[1, 2, 3]);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        list.for_each(|index, _| {
            if index == 1 {
                panic!("callback failed");
            }
            false
        });
    }));
    assert!(outcome.is_err());

    list.insert_tail(4).unwrap();
    assert_list_eq(&list, &[1, 2, 3, 4]);
}

#[test]
fn test_crate_error_from_rejected_mutation() {
    fn append_during_traversal(list: &LinkedList<i32>) -> strand::Result<()> {
        let mut outcome = Ok(());
        list.for_each(|_, _| {
            outcome = list.insert_tail(9).map_err(strand::Error::from);
            true
        });
        outcome
    }

    let list = list_from(&[1]);
    let err = append_during_traversal(&list).unwrap_err();
    assert!(err.is_reentrant_mutation());
    assert_eq!(err.module(), "list");
}

thread_local! {
    static ECHO_LIST: LinkedList<Echo> = const { LinkedList::new() };
}

/// Remembers whether cloning it managed to modify `ECHO_LIST`.
#[derive(Debug)]
struct Echo {
    rejected: Option<ListError>,
}

static ECHO_ARMED: AtomicBool = AtomicBool::new(false);

impl Clone for Echo {
    fn clone(&self) -> Self {
        if !ECHO_ARMED.load(Ordering::SeqCst) {
            return Echo { rejected: None };
        }
        let rejected = ECHO_LIST.with(|list| {
            list.insert_head(Echo { rejected: None })
                .and_then(|()| list.delete_at(0).map(|_| ()))
                .err()
        });
        Echo { rejected }
    }
}

#[test]
fn test_clone_reaching_back_into_list_is_rejected() {
    ECHO_LIST.with(|list| {
        list.insert_tail(Echo { rejected: None }).unwrap();
        ECHO_ARMED.store(true, Ordering::SeqCst);

        let copy = list.get(0).unwrap();
        assert_eq!(
            copy.rejected,
            Some(ListError::MutationDuringTraversal { depth: 1 })
        );

        let copies = list.to_vec();
        assert!(copies[0].rejected.as_ref().unwrap().is_reentrant_mutation());

        ECHO_ARMED.store(false, Ordering::SeqCst);
        assert_eq!(list.len(), 1);
        list.delete_at(0).unwrap();
        assert!(list.is_empty());
    });
}
