use crate::dates;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Record identifier as it arrives over the wire: a JSON number or a string.
/// Freshly created records and server-returned records may disagree on the
/// representation, so comparisons go through the normalized string key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl RecordId {
    pub fn key(&self) -> String {
        match self {
            RecordId::Num(n) => n.to_string(),
            RecordId::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Num(value)
    }
}

/// Anything the list manager can order: an optional identifier and an
/// optional date value.
pub trait ListEntry {
    fn entry_id(&self) -> Option<&RecordId>;
    fn entry_date(&self) -> Option<&str>;
}

fn time_value<T: ListEntry>(item: &T) -> f64 {
    dates::time_value(item.entry_date())
}

fn id_key<T: ListEntry>(item: &T) -> Option<String> {
    item.entry_id().map(RecordId::key)
}

/// Sorts by date descending. Only for the initial load; point mutations go
/// through `insert_by_date_desc` / `upsert_by_id` afterwards. Invalid dates
/// sink to the end; the sort is stable, so their relative order is preserved.
pub fn sort_initial_by_date_desc<T: ListEntry + Clone>(items: &[T]) -> Vec<T> {
    let mut next = items.to_vec();
    next.sort_by(|a, b| {
        time_value(b)
            .partial_cmp(&time_value(a))
            .unwrap_or(Ordering::Equal)
    });
    next
}

/// Binary search for the insertion index in a date-descending sequence.
/// Equal timestamps steer right, so a new record lands after every existing
/// record sharing its date.
fn insertion_index<T: ListEntry>(items: &[T], t: f64) -> usize {
    let mut lo = 0;
    let mut hi = items.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if time_value(&items[mid]) >= t {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Inserts into an already date-descending sequence without re-sorting.
pub fn insert_by_date_desc<T: ListEntry + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    let idx = insertion_index(&next, time_value(&item));
    next.insert(idx, item);
    next
}

/// Update-or-insert keyed by id: removes the existing record with the same
/// id, then re-inserts at the position its (possibly changed) date calls for.
/// A record without an id is treated as new.
pub fn upsert_by_id<T: ListEntry + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    if let Some(key) = id_key(&item) {
        if let Some(pos) = next.iter().position(|x| id_key(x).as_deref() == Some(key.as_str())) {
            next.remove(pos);
        }
    }
    let idx = insertion_index(&next, time_value(&item));
    next.insert(idx, item);
    next
}

/// Removes every record whose id matches. No-op when none does.
pub fn remove_by_id<T: ListEntry + Clone>(items: &[T], id: &RecordId) -> Vec<T> {
    let key = id.key();
    items
        .iter()
        .filter(|x| id_key(*x).as_deref() != Some(key.as_str()))
        .cloned()
        .collect()
}
