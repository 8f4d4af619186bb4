//! Shared plumbing for the in-memory stores.

use std::collections::BTreeMap;
use std::sync::PoisonError;

use crate::StoreError;

/// Rows keyed by integer id, with a monotonically increasing id sequence.
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Reserve the next id. Ids are never reused, even after deletes.
    pub fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn insert(&mut self, id: i64, row: T) {
        self.rows.insert(id, row);
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// All rows in id order.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

pub(crate) fn poisoned<G>(_: PoisonError<G>) -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}
