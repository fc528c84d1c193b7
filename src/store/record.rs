//! The stored-record envelope and the per-entity record contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use crate::error::EngineResult;
use crate::models::{
    Employee, EmployeePatch, PayPeriod, PayPeriodPatch, PayrollEntry, PayrollEntryPatch,
};

/// Identifier assigned by a record store.
///
/// Identifiers are `max(existing) + 1` within one store, starting at 1.
pub type RecordId = u64;

/// A record held by a [`RecordStore`](super::RecordStore): the entity data
/// plus its generated identifier and timestamps.
///
/// Serializes flat, with `id`, `created_at` and `updated_at` next to the
/// entity fields. Dereferences to the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<T> {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// The entity.
    #[serde(flatten)]
    pub data: T,
}

impl<T> Stored<T> {
    /// Wraps freshly created data.
    pub fn new(id: RecordId, data: T, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            data,
        }
    }

    /// Consumes the envelope, returning the entity.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// The contract an entity must meet to live in a record store.
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// Entity name used in errors and log events.
    const ENTITY: &'static str;

    /// Partial update accepted by [`RecordStore::update`](super::RecordStore::update).
    type Patch;

    /// Checks the field contracts. Run on every create and update.
    fn validate(&self) -> EngineResult<()>;

    /// Produces the merged record without touching `self`.
    ///
    /// May reject the patch (for example an illegal status transition).
    fn merge(&self, id: RecordId, patch: Self::Patch) -> EngineResult<Self>;

    /// Natural key that must be unique within the store, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

impl Record for Employee {
    const ENTITY: &'static str = "employee";
    type Patch = EmployeePatch;

    fn validate(&self) -> EngineResult<()> {
        Employee::validate(self)
    }

    fn merge(&self, id: RecordId, patch: EmployeePatch) -> EngineResult<Self> {
        patch.apply_to(id, self)
    }
}

impl Record for PayPeriod {
    const ENTITY: &'static str = "pay_period";
    type Patch = PayPeriodPatch;

    fn validate(&self) -> EngineResult<()> {
        PayPeriod::validate(self)
    }

    fn merge(&self, id: RecordId, patch: PayPeriodPatch) -> EngineResult<Self> {
        patch.apply_to(id, self)
    }
}

impl Record for PayrollEntry {
    const ENTITY: &'static str = "payroll_entry";
    type Patch = PayrollEntryPatch;

    fn validate(&self) -> EngineResult<()> {
        PayrollEntry::validate(self)
    }

    fn merge(&self, _id: RecordId, patch: PayrollEntryPatch) -> EngineResult<Self> {
        Ok(patch.apply_to(self))
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.key().to_string())
    }
}
