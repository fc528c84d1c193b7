//! Read helpers composed from the record stores.
//!
//! Nothing here is cached. Every call walks the current store contents,
//! so results always reflect the latest mutation.

use crate::calculation::summarize;
use crate::error::EngineResult;
use crate::models::{Employee, PayPeriod, PayPeriodStatus, PayrollEntry, PayrollSummary};
use crate::store::{RecordId, RecordStore, Stored};

/// A read-only view over the employee, period and entry stores.
///
/// Obtained from [`Payroll::queries`](super::Payroll::queries).
#[derive(Debug, Clone, Copy)]
pub struct PayrollQueries<'a> {
    employees: &'a RecordStore<Employee>,
    periods: &'a RecordStore<PayPeriod>,
    entries: &'a RecordStore<PayrollEntry>,
}

impl<'a> PayrollQueries<'a> {
    /// Creates a view over the three stores.
    pub fn new(
        employees: &'a RecordStore<Employee>,
        periods: &'a RecordStore<PayPeriod>,
        entries: &'a RecordStore<PayrollEntry>,
    ) -> Self {
        Self {
            employees,
            periods,
            entries,
        }
    }

    /// Entries belonging to a pay period, in insertion order.
    pub fn entries_by_period(&self, period_id: RecordId) -> Vec<&'a Stored<PayrollEntry>> {
        self.entries.filter(|e| e.period_id == period_id)
    }

    /// Entries paid to an employee, in insertion order.
    pub fn entries_by_employee(&self, employee_id: RecordId) -> Vec<&'a Stored<PayrollEntry>> {
        self.entries.filter(|e| e.employee_id == employee_id)
    }

    /// Totals over the entries of a pay period.
    ///
    /// A period with no entries, or an unknown period id, yields an
    /// all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a total overflows.
    pub fn summary_by_period(&self, period_id: RecordId) -> EngineResult<PayrollSummary> {
        let entries = self.entries_by_period(period_id);
        summarize(entries.into_iter().map(|e| &e.data))
    }

    /// Employees with status `active`.
    pub fn active_employees(&self) -> Vec<&'a Stored<Employee>> {
        self.employees.filter(|e| e.is_active())
    }

    /// Employees in a department. Matching is exact.
    pub fn employees_by_department(&self, department: &str) -> Vec<&'a Stored<Employee>> {
        self.employees.filter(|e| e.department == department)
    }

    /// Periods with the given status.
    pub fn periods_with_status(&self, status: PayPeriodStatus) -> Vec<&'a Stored<PayPeriod>> {
        self.periods.filter(|p| p.status == status)
    }

    /// Periods awaiting processing.
    pub fn pending_periods(&self) -> Vec<&'a Stored<PayPeriod>> {
        self.periods_with_status(PayPeriodStatus::Pending)
    }

    /// Periods currently being processed.
    pub fn processing_periods(&self) -> Vec<&'a Stored<PayPeriod>> {
        self.periods_with_status(PayPeriodStatus::Processing)
    }

    /// Periods that have been paid out.
    pub fn processed_periods(&self) -> Vec<&'a Stored<PayPeriod>> {
        self.periods_with_status(PayPeriodStatus::Processed)
    }

    /// Periods whose processing failed.
    pub fn failed_periods(&self) -> Vec<&'a Stored<PayPeriod>> {
        self.periods_with_status(PayPeriodStatus::Failed)
    }

    /// Looks up an employee.
    pub fn employee_by_id(&self, id: RecordId) -> Option<&'a Stored<Employee>> {
        self.employees.get_by_id(id)
    }

    /// Looks up a pay period.
    pub fn period_by_id(&self, id: RecordId) -> Option<&'a Stored<PayPeriod>> {
        self.periods.get_by_id(id)
    }

    /// Looks up a payroll entry.
    pub fn entry_by_id(&self, id: RecordId) -> Option<&'a Stored<PayrollEntry>> {
        self.entries.get_by_id(id)
    }
}
