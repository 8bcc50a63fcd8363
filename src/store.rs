//! Record storage behind a repository interface.
//!
//! DESIGN
//! ======
//! Every storefront collection (products, templates, cart lines, ...) is a
//! `Repository<T>` keyed by a positive integer id. Services hold an
//! `Arc<dyn Repository<T>>` injected through `AppState`, so tests and the
//! binary can swap stores without touching service code. `MemoryStore` is
//! the only backend: an ordered map behind a tokio `RwLock`, lost when the
//! process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Record identifier. `0` is never a valid id.
pub type RecordId = u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },
    #[error("invalid id: {0}")]
    InvalidId(RecordId),
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::InvalidId(_) => "E_INVALID_ID",
        }
    }
}

/// A value stored in a repository.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable collection name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
}

/// CRUD interface over one record collection.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in ascending id order.
    async fn list(&self) -> Vec<T>;

    /// # Errors
    ///
    /// `InvalidId` for id 0, `NotFound` when absent.
    async fn get(&self, id: RecordId) -> Result<T, StoreError>;

    /// Store `record` under a fresh id (`max + 1`) and return the stored copy.
    async fn insert(&self, record: T) -> T;

    /// Replace the record with `record.id()`.
    ///
    /// # Errors
    ///
    /// `InvalidId` for id 0, `NotFound` when absent.
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// # Errors
    ///
    /// `InvalidId` for id 0, `NotFound` when absent.
    async fn remove(&self, id: RecordId) -> Result<T, StoreError>;

    /// Remove every record, returning them in id order.
    async fn clear(&self) -> Vec<T>;
}

/// In-memory repository backend.
pub struct MemoryStore<T> {
    records: RwLock<BTreeMap<RecordId, T>>,
}

impl<T: Record> MemoryStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { records: RwLock::new(BTreeMap::new()) }
    }

    /// Build a store from seed records, keeping their ids. Records with id 0
    /// are assigned fresh ids after the seeded ones.
    #[must_use]
    pub fn seeded(seed: Vec<T>) -> Self {
        let mut records = BTreeMap::new();
        let mut unassigned = Vec::new();
        for record in seed {
            if record.id() == 0 {
                unassigned.push(record);
            } else {
                records.insert(record.id(), record);
            }
        }
        for mut record in unassigned {
            let id = next_id(&records);
            record.set_id(id);
            records.insert(id, record);
        }
        Self { records: RwLock::new(records) }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id<T>(records: &BTreeMap<RecordId, T>) -> RecordId {
    records.keys().next_back().map_or(1, |max| max + 1)
}

fn check_id(id: RecordId) -> Result<(), StoreError> {
    if id == 0 { Err(StoreError::InvalidId(id)) } else { Ok(()) }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryStore<T> {
    async fn list(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    async fn get(&self, id: RecordId) -> Result<T, StoreError> {
        check_id(id)?;
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }

    async fn insert(&self, mut record: T) -> T {
        let mut records = self.records.write().await;
        let id = next_id(&records);
        record.set_id(id);
        records.insert(id, record.clone());
        record
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let id = record.id();
        check_id(id)?;
        let mut records = self.records.write().await;
        let slot = records.get_mut(&id).ok_or(StoreError::NotFound { kind: T::KIND, id })?;
        *slot = record.clone();
        Ok(record)
    }

    async fn remove(&self, id: RecordId) -> Result<T, StoreError> {
        check_id(id)?;
        self.records
            .write()
            .await
            .remove(&id)
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }

    async fn clear(&self) -> Vec<T> {
        let mut records = self.records.write().await;
        std::mem::take(&mut *records).into_values().collect()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
