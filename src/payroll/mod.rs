//! The payroll application context.
//!
//! [`Payroll`] owns one record store per entity type together with the
//! rate configuration. It is the single entry point for mutations that
//! span stores: computing entries needs the employee, the period and the
//! rates, and entry changes are refused once the owning period is locked.

mod queries;

pub use queries::PayrollQueries;

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::compute_entry;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeePatch, EmploymentStatus, HoursInput, PayPeriod, PayPeriodPatch,
    PayPeriodStatus, PayrollEntry, PayrollEntryPatch,
};
use crate::store::{Clock, RecordId, RecordStore, Stored, SystemClock};

/// Employees, pay periods and payroll entries, with the rates used to
/// compute pay.
///
/// Constructed explicitly and passed to whatever needs it; there is no
/// global instance.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, PayFrequency, PayPeriod};
/// use payroll_engine::payroll::Payroll;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let mut payroll = Payroll::new(PayrollConfig::default());
/// payroll.add_employee(Employee::new("John", "Smith", "john@company.com", Decimal::new(83200, 0)))?;
/// let period_id = payroll.add_period(PayPeriod::new(
///     "January 1-15, 2024",
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
///     PayFrequency::SemiMonthly,
/// ))?;
///
/// payroll.run_payroll(period_id, &HashMap::new())?;
/// let summary = payroll.queries().summary_by_period(period_id)?;
/// assert_eq!(summary.total_net_pay, Decimal::new(209120, 2));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Payroll {
    config: PayrollConfig,
    employees: RecordStore<Employee>,
    periods: RecordStore<PayPeriod>,
    entries: RecordStore<PayrollEntry>,
}

impl Payroll {
    /// Creates an empty payroll using the system clock.
    pub fn new(config: PayrollConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty payroll whose stores stamp records with `clock`.
    pub fn with_clock(config: PayrollConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            employees: RecordStore::with_clock(clock.clone()),
            periods: RecordStore::with_clock(clock.clone()),
            entries: RecordStore::with_clock(clock),
        }
    }

    /// The rate configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// The employee store.
    pub fn employees(&self) -> &RecordStore<Employee> {
        &self.employees
    }

    /// The pay period store.
    pub fn periods(&self) -> &RecordStore<PayPeriod> {
        &self.periods
    }

    /// The payroll entry store.
    pub fn entries(&self) -> &RecordStore<PayrollEntry> {
        &self.entries
    }

    /// Read helpers over the current contents of the stores.
    pub fn queries(&self) -> PayrollQueries<'_> {
        PayrollQueries::new(&self.employees, &self.periods, &self.entries)
    }

    /// Adds an employee.
    pub fn add_employee(&mut self, employee: Employee) -> EngineResult<RecordId> {
        self.employees.create(employee)
    }

    /// Updates an employee. Existing entries keep the pay they were
    /// computed with.
    pub fn update_employee(
        &mut self,
        id: RecordId,
        patch: EmployeePatch,
    ) -> EngineResult<Stored<Employee>> {
        self.employees.update(id, patch)
    }

    /// Removes an employee. Their entries are kept.
    pub fn delete_employee(&mut self, id: RecordId) -> EngineResult<Stored<Employee>> {
        self.employees.delete(id)
    }

    /// Adds a pay period.
    pub fn add_period(&mut self, period: PayPeriod) -> EngineResult<RecordId> {
        self.periods.create(period)
    }

    /// Updates a pay period. Status changes must follow the period state
    /// machine.
    pub fn update_period(
        &mut self,
        id: RecordId,
        patch: PayPeriodPatch,
    ) -> EngineResult<Stored<PayPeriod>> {
        self.periods.update(id, patch)
    }

    /// Moves a pay period to `status`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the period does not exist
    /// - `InvalidTransition` if the state machine does not allow the change
    pub fn transition_period(
        &mut self,
        id: RecordId,
        status: PayPeriodStatus,
    ) -> EngineResult<Stored<PayPeriod>> {
        self.update_period(id, PayPeriodPatch::status(status))
    }

    /// Removes a pay period. Its entries are kept.
    pub fn delete_period(&mut self, id: RecordId) -> EngineResult<Stored<PayPeriod>> {
        self.periods.delete(id)
    }

    /// Computes and stores one entry per active employee for a period.
    ///
    /// Hours come from `hours_by_employee`, falling back to the configured
    /// default hours. Either every entry is stored or none is.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the period does not exist
    /// - `PeriodLocked` if the period is processed or failed
    /// - `DuplicateEntry` if any active employee already has an entry in
    ///   the period
    /// - `InvalidInput` from the calculation
    pub fn run_payroll(
        &mut self,
        period_id: RecordId,
        hours_by_employee: &HashMap<RecordId, HoursInput>,
    ) -> EngineResult<Vec<RecordId>> {
        self.unlocked_period(period_id)?;

        let rates = &self.config.rates;
        let default_hours = self.config.default_hours;
        let drafts = self
            .employees
            .filter(|e| e.is_active())
            .into_iter()
            .map(|employee| {
                let hours = hours_by_employee
                    .get(&employee.id)
                    .unwrap_or(&default_hours);
                compute_entry(employee, period_id, hours, rates)
            })
            .collect::<EngineResult<Vec<PayrollEntry>>>()?;

        let total_net_pay = drafts.iter().try_fold(Decimal::ZERO, |total, entry| {
            total
                .checked_add(entry.pay.net_pay)
                .ok_or_else(|| EngineError::overflow("total_net_pay"))
        })?;
        let ids = self.entries.create_many(drafts)?;

        info!(
            period_id,
            entries = ids.len(),
            total_net_pay = %total_net_pay,
            "Payroll run complete"
        );
        Ok(ids)
    }

    /// Computes and stores the entry of one employee for a period.
    ///
    /// Inactive employees may be paid this way; terminated ones may not.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the period or employee does not exist
    /// - `PeriodLocked` if the period is processed or failed
    /// - `InvalidInput` if the employee is terminated, or from the calculation
    /// - `DuplicateEntry` if the employee already has an entry in the period
    pub fn add_entry(
        &mut self,
        period_id: RecordId,
        employee_id: RecordId,
        hours: HoursInput,
    ) -> EngineResult<RecordId> {
        self.unlocked_period(period_id)?;

        let employee = self.employees.require(employee_id)?;
        if employee.status == EmploymentStatus::Terminated {
            return Err(EngineError::invalid_input(
                "employee_id",
                format!("employee {employee_id} is terminated"),
            ));
        }

        let entry = compute_entry(employee, period_id, &hours, &self.config.rates)?;
        self.entries.create(entry)
    }

    /// Recomputes an entry with new hours and the employee's current
    /// salary, deductions and withholding.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the entry, its period or its employee does not exist
    /// - `PeriodLocked` if the period is processed or failed
    /// - `InvalidInput` from the calculation
    pub fn recompute_entry(
        &mut self,
        entry_id: RecordId,
        hours: HoursInput,
    ) -> EngineResult<Stored<PayrollEntry>> {
        let entry = self.entries.require(entry_id)?;
        self.unlocked_period(entry.period_id)?;

        let employee = self.employees.require(entry.employee_id)?;
        let recomputed = compute_entry(employee, entry.period_id, &hours, &self.config.rates)?;

        self.entries.update(
            entry_id,
            PayrollEntryPatch {
                hours: Some(recomputed.hours),
                pay: Some(recomputed.pay),
            },
        )
    }

    /// Removes an entry.
    ///
    /// Entries whose period no longer exists can always be removed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the entry does not exist
    /// - `PeriodLocked` if the period is processed or failed
    pub fn delete_entry(&mut self, entry_id: RecordId) -> EngineResult<Stored<PayrollEntry>> {
        let entry = self.entries.require(entry_id)?;
        if self.periods.get_by_id(entry.period_id).is_some() {
            self.unlocked_period(entry.period_id)?;
        }
        self.entries.delete(entry_id)
    }

    fn unlocked_period(&self, period_id: RecordId) -> EngineResult<&Stored<PayPeriod>> {
        let period = self.periods.require(period_id)?;
        if !period.status.allows_entry_changes() {
            return Err(EngineError::PeriodLocked {
                period_id,
                status: period.status,
            });
        }
        Ok(period)
    }
}
