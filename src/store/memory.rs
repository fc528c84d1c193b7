//! The in-memory record store.

use std::sync::Arc;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::clock::{Clock, SystemClock};
use super::record::{Record, RecordId, Stored};
use super::state::{StoreAction, StoreState};

/// A single-writer, in-memory collection of one entity type.
///
/// Holds the current [`StoreState`] and applies every mutation through
/// [`StoreState::reduce`]. Each call either fully applies or returns an
/// error with the store unchanged. Reads hand out shared references;
/// changes go back through [`update`](Self::update).
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, EmployeePatch};
/// use payroll_engine::store::RecordStore;
/// use rust_decimal::Decimal;
///
/// let mut store = RecordStore::new();
/// let id = store.create(Employee::new("John", "Smith", "john@company.com", Decimal::new(85000, 0)))?;
/// assert_eq!(id, 1);
///
/// let patch = EmployeePatch { salary: Some(Decimal::new(90000, 0)), ..EmployeePatch::default() };
/// let updated = store.update(id, patch)?;
/// assert_eq!(updated.salary, Decimal::new(90000, 0));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    state: StoreState<T>,
    clock: Arc<dyn Clock>,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> {
    /// Creates an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store stamping records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: StoreState::new(),
            clock,
        }
    }

    /// Creates a store holding `records` as they are.
    pub fn from_records(records: Vec<Stored<T>>, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        Ok(Self {
            state: StoreState::from_records(records)?,
            clock,
        })
    }

    /// The current state snapshot.
    pub fn state(&self) -> &StoreState<T> {
        &self.state
    }

    /// Applies a raw action to the current state.
    pub fn dispatch(&mut self, action: StoreAction<T>) -> EngineResult<()> {
        self.state = self.state.reduce(action)?;
        Ok(())
    }

    /// Validates `data`, assigns it the next id and stores it.
    pub fn create(&mut self, data: T) -> EngineResult<RecordId> {
        let ids = self.create_many(vec![data])?;
        Ok(ids[0])
    }

    /// Stores several records at once, all or none.
    ///
    /// Ids are assigned consecutively from the next free id.
    pub fn create_many(&mut self, batch: Vec<T>) -> EngineResult<Vec<RecordId>> {
        for data in &batch {
            data.validate()?;
        }

        let now = self.clock.now();
        let first_id = self.state.next_id();
        let records: Vec<Stored<T>> = batch
            .into_iter()
            .zip(first_id..)
            .map(|(data, id)| Stored::new(id, data, now))
            .collect();
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();

        self.dispatch(StoreAction::Insert(records))?;
        debug!(entity = T::ENTITY, ids = ?ids, "Created records");
        Ok(ids)
    }

    /// Merges `patch` onto the record with `id` and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this id
    /// - Any error from the entity's merge or validation
    /// - `DuplicateEntry` if the merged record's natural key is taken
    pub fn update(&mut self, id: RecordId, patch: T::Patch) -> EngineResult<Stored<T>> {
        let existing = self.require(id)?;
        let data = existing.data.merge(id, patch)?;
        data.validate()?;

        let updated = Stored {
            id,
            created_at: existing.created_at,
            updated_at: self.clock.now(),
            data,
        };
        self.dispatch(StoreAction::Replace(updated.clone()))?;
        debug!(entity = T::ENTITY, id, "Updated record");
        Ok(updated)
    }

    /// Removes the record with `id`, returning it. Does not cascade.
    pub fn delete(&mut self, id: RecordId) -> EngineResult<Stored<T>> {
        let removed = self.require(id)?.clone();
        self.dispatch(StoreAction::Remove(id))?;
        debug!(entity = T::ENTITY, id, "Deleted record");
        Ok(removed)
    }

    /// Looks up a record by id.
    pub fn get_by_id(&self, id: RecordId) -> Option<&Stored<T>> {
        self.state.get(id)
    }

    /// Looks up a record by id, failing with `NotFound`.
    pub fn require(&self, id: RecordId) -> EngineResult<&Stored<T>> {
        self.state
            .get(id)
            .ok_or_else(|| EngineError::not_found(T::ENTITY, id))
    }

    /// All records in insertion order.
    pub fn list(&self) -> Vec<&Stored<T>> {
        self.state.records().iter().collect()
    }

    /// Records matching `predicate`, in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&Stored<T>>
    where
        P: Fn(&Stored<T>) -> bool,
    {
        self.state.records().iter().filter(|r| predicate(r)).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.state.records().len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.records().is_empty()
    }
}
