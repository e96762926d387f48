//! Generic CRUD over one collection.

use super::entity::Entity;
use crate::error::Result;
use crate::records::RecordStore;
use std::marker::PhantomData;

/// Typed view of one collection.
///
/// Every call reads the whole collection; mutations write it all back.
/// Lookups scan linearly and return the first match.
pub struct Table<'a, T: Entity> {
    records: &'a RecordStore,
    _marker: PhantomData<T>,
}

impl<'a, T: Entity> Table<'a, T> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self {
            records,
            _marker: PhantomData,
        }
    }

    /// All records, in insertion order.
    pub fn get_all(&self) -> Result<Vec<T>> {
        self.records.read_collection(T::COLLECTION)
    }

    /// First record with this id.
    pub fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        self.find(|r| r.id() == id)
    }

    /// First record matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.get_all()?.into_iter().find(|r| predicate(r)))
    }

    /// All records matching `predicate`, in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Result<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| predicate(r))
            .collect())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.get_all()?.len())
    }

    /// Append a record. The caller picks the id; duplicates are not checked.
    pub fn add(&self, record: T) -> Result<()> {
        record.validate()?;
        self.records.modify(T::COLLECTION, |all: &mut Vec<T>| {
            all.push(record);
            true
        })?;
        Ok(())
    }

    /// Merge `patch` into the first record with `id`.
    ///
    /// Returns whether a record matched; a missing id is a silent no-op.
    /// A patch leaving the record invalid is rejected and nothing is written.
    pub fn update(&self, id: &str, patch: T::Patch) -> Result<bool> {
        let mut rejected = None;
        let changed = self.records.modify(T::COLLECTION, |all: &mut Vec<T>| {
            let Some(record) = all.iter_mut().find(|r| r.id() == id) else {
                return false;
            };
            let mut next = record.clone();
            next.apply(patch);
            if let Err(e) = next.validate() {
                rejected = Some(e);
                return false;
            }
            *record = next;
            true
        })?;
        match rejected {
            Some(e) => Err(e),
            None => Ok(changed),
        }
    }

    /// Remove every record with `id`. Dependent records elsewhere are untouched.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.records.modify(T::COLLECTION, |all: &mut Vec<T>| {
            let before = all.len();
            all.retain(|r| r.id() != id);
            all.len() != before
        })
    }
}
