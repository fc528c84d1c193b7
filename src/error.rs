//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculator, the record stores and the payroll
//! context can report.

use thiserror::Error;

use crate::models::PayPeriodStatus;
use crate::store::RecordId;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type. Failures are
/// reported synchronously and never partially applied.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee".to_string(),
///     id: 42,
/// };
/// assert_eq!(error.to_string(), "employee 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A numeric, textual or date input failed validation.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The requested record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The identifier that was not found.
        id: RecordId,
    },

    /// A record with the same natural key already exists.
    #[error("Duplicate {entity}: {key} already exists")]
    DuplicateEntry {
        /// The kind of record that was duplicated.
        entity: String,
        /// The natural key that collided.
        key: String,
    },

    /// A status change outside the allowed state machine.
    #[error("Invalid transition for {entity} {id}: {from} -> {to}")]
    InvalidTransition {
        /// The kind of record being transitioned.
        entity: String,
        /// The record identifier.
        id: RecordId,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// Entries of the period can no longer be created, changed or removed.
    #[error("Pay period {period_id} is {status}; its payroll entries are locked")]
    PeriodLocked {
        /// The period that owns the entries.
        period_id: RecordId,
        /// The period status that locks it.
        status: PayPeriodStatus,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// An [`EngineError::InvalidInput`] for a value whose arithmetic
    /// overflowed.
    pub fn overflow(field: impl Into<String>) -> Self {
        Self::invalid_input(field, "value is too large to compute")
    }

    /// Shorthand for an [`EngineError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: RecordId) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
