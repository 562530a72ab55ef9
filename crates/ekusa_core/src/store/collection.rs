//! By-identifier helpers for singleton collections.
//!
//! Callers load the whole array, apply one of these in memory, then save
//! the whole array back.

use crate::model::Record;

pub fn find_by_id<'a, T: Record>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.record_id() == id)
}

/// Applies `update` to the record with `id`. Returns `false` when absent.
pub fn update_by_id<T, F>(items: &mut [T], id: &str, update: F) -> bool
where
    T: Record,
    F: FnOnce(&mut T),
{
    match items.iter_mut().find(|item| item.record_id() == id) {
        Some(item) => {
            update(item);
            true
        }
        None => false,
    }
}

/// Removes every record with `id`. Returns `false` when nothing matched.
pub fn remove_by_id<T: Record>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.record_id() != id);
    items.len() != before
}
