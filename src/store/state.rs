//! Pure state transitions for record stores.
//!
//! A store's contents are a [`StoreState`]. Every mutation is expressed as
//! a [`StoreAction`] and applied by [`StoreState::reduce`], which returns a
//! new state or an error and never modifies the state it was called on.
//! A failed action therefore leaves nothing half-applied.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};

use super::record::{Record, RecordId, Stored};

/// A mutation of a store's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction<T> {
    /// Append records, all or none.
    Insert(Vec<Stored<T>>),
    /// Replace the record with the same id, keeping its position.
    Replace(Stored<T>),
    /// Remove the record with this id.
    Remove(RecordId),
}

/// The records of one store, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    records: Vec<Stored<T>>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> StoreState<T> {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from existing records, checking ids and natural keys.
    pub fn from_records(records: Vec<Stored<T>>) -> EngineResult<Self> {
        Self::new().reduce(StoreAction::Insert(records))
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Stored<T>] {
        &self.records
    }

    /// Looks up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Stored<T>> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The identifier the next created record receives: one more than the
    /// largest id present, or 1 for an empty store.
    pub fn next_id(&self) -> RecordId {
        self.records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
    }

    /// Applies `action`, returning the resulting state.
    ///
    /// # Errors
    ///
    /// - `NotFound` when replacing or removing an id that is absent
    /// - `DuplicateEntry` when an inserted id is already taken, or when an
    ///   inserted or replaced record's natural key collides with another record
    pub fn reduce(&self, action: StoreAction<T>) -> EngineResult<Self> {
        match action {
            StoreAction::Insert(batch) => self.insert(batch),
            StoreAction::Replace(record) => self.replace(record),
            StoreAction::Remove(id) => self.remove(id),
        }
    }

    fn insert(&self, batch: Vec<Stored<T>>) -> EngineResult<Self> {
        let mut ids: HashSet<RecordId> = self.records.iter().map(|r| r.id).collect();
        let mut keys: HashSet<String> = self
            .records
            .iter()
            .filter_map(|r| r.data.unique_key())
            .collect();

        for record in &batch {
            if !ids.insert(record.id) {
                return Err(duplicate::<T>(format!("id {}", record.id)));
            }
            if let Some(key) = record.data.unique_key() {
                if !keys.insert(key.clone()) {
                    return Err(duplicate::<T>(key));
                }
            }
        }

        let mut records = self.records.clone();
        records.extend(batch);
        Ok(Self { records })
    }

    fn replace(&self, record: Stored<T>) -> EngineResult<Self> {
        let position = self.position(record.id)?;

        if let Some(key) = record.data.unique_key() {
            let collides = self.records.iter().any(|other| {
                other.id != record.id && other.data.unique_key().as_ref() == Some(&key)
            });
            if collides {
                return Err(duplicate::<T>(key));
            }
        }

        let mut records = self.records.clone();
        records[position] = record;
        Ok(Self { records })
    }

    fn remove(&self, id: RecordId) -> EngineResult<Self> {
        let position = self.position(id)?;
        let mut records = self.records.clone();
        records.remove(position);
        Ok(Self { records })
    }

    fn position(&self, id: RecordId) -> EngineResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::not_found(T::ENTITY, id))
    }
}

fn duplicate<T: Record>(key: String) -> EngineError {
    EngineError::DuplicateEntry {
        entity: T::ENTITY.to_string(),
        key,
    }
}
