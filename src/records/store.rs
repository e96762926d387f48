//! Whole-collection persistence over a key-value backend.

use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};
use crate::records::seed::{default_packages, default_users, SeedReport};
use crate::records::{Collection, SESSION_KEY};
use crate::subscriptions::SubscriptionManager;
use crate::types::{Timestamp, User};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Reads and writes whole collections as JSON arrays.
///
/// Every mutation is a read-modify-write of the entire collection. Writers
/// sharing one `RecordStore` are serialized; separate stores over the same
/// data race and the last full snapshot written wins.
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    events: Arc<SubscriptionManager>,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_events(backend, Arc::new(SubscriptionManager::new()))
    }

    pub fn with_events(backend: Arc<dyn KeyValueStore>, events: Arc<SubscriptionManager>) -> Self {
        Self {
            backend,
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Subscription manager receiving this store's change events.
    pub fn events(&self) -> &Arc<SubscriptionManager> {
        &self.events
    }

    /// Seed default data into any collection that is absent.
    ///
    /// Existing keys are never overwritten, so calling this again is a no-op.
    pub fn initialize(&self, now: Timestamp) -> Result<SeedReport> {
        let _lock = self.write_lock.lock();
        let mut report = SeedReport::default();

        for collection in Collection::ALL {
            if self.backend.contains(collection.key())? {
                continue;
            }
            match collection {
                Collection::Users => self.put(collection, &default_users(now))?,
                Collection::Packages => self.put(collection, &default_packages())?,
                Collection::Orders | Collection::Transactions => {
                    self.put::<serde_json::Value>(collection, &[])?
                }
            }
            report.seeded.push(collection);
        }

        if !report.is_empty() {
            tracing::info!(seeded = ?report.seeded, "seeded default collections");
        }
        Ok(report)
    }

    /// All records in `collection`, in insertion order. Missing key reads as empty.
    pub fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match self.backend.get(collection.key())? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::deserialization(collection.key(), e)),
            None => Ok(Vec::new()),
        }
    }

    /// Replace `collection` with `records`.
    pub fn write_collection<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let _lock = self.write_lock.lock();
        self.put(collection, records)
    }

    /// Read, let `f` mutate, and write back if `f` reports a change.
    ///
    /// Returns whether a write happened.
    pub fn modify<T, F>(&self, collection: Collection, f: F) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let _lock = self.write_lock.lock();
        let mut records: Vec<T> = self.read_collection(collection)?;
        if !f(&mut records) {
            return Ok(false);
        }
        self.put(collection, &records)?;
        Ok(true)
    }

    fn put<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(collection.key(), &raw)?;
        tracing::debug!(collection = %collection, len = records.len(), "collection written");
        self.events.broadcast_collection(collection, records.len());
        Ok(())
    }

    // --- Session ---

    /// The persisted logged-in user, if any.
    pub fn read_session(&self) -> Result<Option<User>> {
        match self.backend.get(SESSION_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::deserialization(SESSION_KEY, e)),
            None => Ok(None),
        }
    }

    pub fn write_session(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(SESSION_KEY, &raw)?;
        self.events.broadcast_session(Some(user.id.clone()));
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        self.backend.remove(SESSION_KEY)?;
        self.events.broadcast_session(None);
        Ok(())
    }
}
