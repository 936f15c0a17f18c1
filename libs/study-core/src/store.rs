//! Record store abstraction.
//!
//! The scheduler only needs keyed get/put access plus key enumeration;
//! where and how records are persisted is up to the store owner.

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::types::ReviewRecord;

/// Keyed access to review records.
pub trait ReviewStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, card_id: &str) -> Result<Option<ReviewRecord>, Self::Error>;

    fn put(&mut self, card_id: &str, record: ReviewRecord) -> Result<(), Self::Error>;

    /// Identifiers of every card with a record.
    fn keys(&self) -> Result<Vec<String>, Self::Error>;

    /// All records in the store.
    fn records(&self) -> Result<Vec<ReviewRecord>, Self::Error> {
        let mut records = Vec::new();
        for key in self.keys()? {
            if let Some(record) = self.get(&key)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

impl<S: ReviewStore + ?Sized> ReviewStore for &mut S {
    type Error = S::Error;

    fn get(&self, card_id: &str) -> Result<Option<ReviewRecord>, Self::Error> {
        (**self).get(card_id)
    }

    fn put(&mut self, card_id: &str, record: ReviewRecord) -> Result<(), Self::Error> {
        (**self).put(card_id, record)
    }

    fn keys(&self) -> Result<Vec<String>, Self::Error> {
        (**self).keys()
    }

    fn records(&self) -> Result<Vec<ReviewRecord>, Self::Error> {
        (**self).records()
    }
}

/// In-memory store keyed by card id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    records: BTreeMap<String, ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove a record. The scheduler never calls this; it is for the store owner.
    pub fn remove(&mut self, card_id: &str) -> Option<ReviewRecord> {
        self.records.remove(card_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReviewRecord)> {
        self.records.iter()
    }
}

impl From<BTreeMap<String, ReviewRecord>> for MemoryStore {
    fn from(records: BTreeMap<String, ReviewRecord>) -> Self {
        Self { records }
    }
}

impl From<MemoryStore> for BTreeMap<String, ReviewRecord> {
    fn from(store: MemoryStore) -> Self {
        store.records
    }
}

impl ReviewStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, card_id: &str) -> Result<Option<ReviewRecord>, Self::Error> {
        Ok(self.records.get(card_id).cloned())
    }

    fn put(&mut self, card_id: &str, record: ReviewRecord) -> Result<(), Self::Error> {
        self.records.insert(card_id.to_string(), record);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.records.keys().cloned().collect())
    }

    fn records(&self) -> Result<Vec<ReviewRecord>, Self::Error> {
        Ok(self.records.values().cloned().collect())
    }
}
