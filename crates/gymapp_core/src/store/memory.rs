//! In-memory record collection.
//!
//! Used as the injectable fake when unit-testing gateway fallback logic,
//! and as a throwaway backend where no durability is wanted.

use crate::store::{RecordCollection, StoreResult, StoredRecord};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// BTreeMap-backed collection with the same contract as the persistent
/// adapters. Single-threaded by design, like the rest of the core.
#[derive(Default)]
pub struct MemoryCollection<T> {
    records: RefCell<BTreeMap<String, T>>,
}

impl<T: StoredRecord> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl<T: StoredRecord> RecordCollection<T> for MemoryCollection<T> {
    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.records.borrow().get(id).cloned())
    }

    fn put(&self, record: &T) -> StoreResult<()> {
        self.records
            .borrow_mut()
            .insert(record.record_id().to_string(), record.clone());
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.records.borrow().values().cloned().collect())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.records.borrow_mut().remove(id);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.records.borrow_mut().clear();
        Ok(())
    }
}
