//! Pay period model and its status state machine.
//!
//! This module contains the [`PayPeriod`] type, the [`PayPeriodStatus`]
//! lifecycle and the partial-update type used by the record store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::employee::{PayFrequency, require_text};
use crate::error::{EngineError, EngineResult};
use crate::store::RecordId;

/// Processing status of a pay period.
///
/// The lifecycle is forward-only:
///
/// ```text
/// pending -> processing -> processed
///                 \
///                  -> failed
/// ```
///
/// `processed` and `failed` are terminal. A failed run is retried by
/// creating a new period, never by reopening the failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriodStatus {
    /// Created, not yet being processed.
    Pending,
    /// Payroll is being computed and reviewed.
    Processing,
    /// Payroll has been paid out. Entries are immutable.
    Processed,
    /// Processing failed.
    Failed,
}

impl PayPeriodStatus {
    /// Returns the snake_case name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    /// Returns true if the state machine allows moving from `self` to `next`.
    ///
    /// Re-asserting the current status is always allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriodStatus;
    ///
    /// assert!(PayPeriodStatus::Pending.can_transition_to(PayPeriodStatus::Processing));
    /// assert!(PayPeriodStatus::Processing.can_transition_to(PayPeriodStatus::Failed));
    /// assert!(!PayPeriodStatus::Processed.can_transition_to(PayPeriodStatus::Pending));
    /// assert!(!PayPeriodStatus::Pending.can_transition_to(PayPeriodStatus::Processed));
    /// ```
    pub fn can_transition_to(&self, next: PayPeriodStatus) -> bool {
        use PayPeriodStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Processing, Processed) | (Processing, Failed)
        ) || *self == next
    }

    /// Returns true if entries of a period in this status may still be
    /// created, recomputed or deleted.
    pub fn allows_entry_changes(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl fmt::Display for PayPeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a pay period: the date range worked and the date it is paid.
///
/// Invariant: `start_date <= end_date <= pay_date`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayFrequency, PayPeriod, PayPeriodStatus};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     "January 1-15, 2024",
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
///     PayFrequency::SemiMonthly,
/// );
///
/// assert_eq!(period.status, PayPeriodStatus::Pending);
/// assert!(period.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Human-readable label.
    pub label: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// The day the period is paid.
    pub pay_date: NaiveDate,
    /// Informational period type.
    pub period_type: PayFrequency,
    /// Processing status.
    pub status: PayPeriodStatus,
}

impl PayPeriod {
    /// Creates a pending pay period.
    pub fn new(
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pay_date: NaiveDate,
        period_type: PayFrequency,
    ) -> Self {
        Self {
            label: label.into(),
            start_date,
            end_date,
            pay_date,
            period_type,
            status: PayPeriodStatus::Pending,
        }
    }

    /// Checks the label and the date ordering.
    pub fn validate(&self) -> EngineResult<()> {
        require_text("label", &self.label)?;
        if self.end_date < self.start_date {
            return Err(EngineError::invalid_input(
                "end_date",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        if self.pay_date < self.end_date {
            return Err(EngineError::invalid_input(
                "pay_date",
                format!(
                    "pay date {} is before end date {}",
                    self.pay_date, self.end_date
                ),
            ));
        }
        Ok(())
    }
}

/// A partial update of a [`PayPeriod`]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPeriodPatch {
    /// New label.
    pub label: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
    /// New pay date.
    pub pay_date: Option<NaiveDate>,
    /// New period type.
    pub period_type: Option<PayFrequency>,
    /// New status. Must be a legal transition.
    pub status: Option<PayPeriodStatus>,
}

impl PayPeriodPatch {
    /// A patch that only changes the status.
    pub fn status(status: PayPeriodStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merges the patch onto `period`, enforcing the status state machine.
    pub(crate) fn apply_to(self, id: RecordId, period: &PayPeriod) -> EngineResult<PayPeriod> {
        let mut merged = period.clone();
        if let Some(status) = self.status {
            if !period.status.can_transition_to(status) {
                return Err(EngineError::InvalidTransition {
                    entity: "pay_period".to_string(),
                    id,
                    from: period.status.to_string(),
                    to: status.to_string(),
                });
            }
            merged.status = status;
        }
        if let Some(label) = self.label {
            merged.label = label;
        }
        if let Some(start_date) = self.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            merged.end_date = end_date;
        }
        if let Some(pay_date) = self.pay_date {
            merged.pay_date = pay_date;
        }
        if let Some(period_type) = self.period_type {
            merged.period_type = period_type;
        }
        Ok(merged)
    }
}
