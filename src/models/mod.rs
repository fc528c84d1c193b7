//! Core data models for the payroll engine.
//!
//! This module contains the entity model: employees, pay periods, payroll
//! entries and the derived summary, plus boundary parsing for form input.

mod audit;
mod employee;
mod input;
mod pay_period;
mod payroll_entry;
mod summary;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{
    BankAccount, ContactInfo, Deduction, DeductionFrequency, Employee, EmployeePatch,
    EmploymentStatus, FilingStatus, PayFrequency, TaxProfile,
};
pub use input::{parse_amount, parse_count};
pub use pay_period::{PayPeriod, PayPeriodPatch, PayPeriodStatus};
pub use payroll_entry::{EntryKey, HoursInput, PayBreakdown, PayrollEntry, PayrollEntryPatch};
pub use summary::PayrollSummary;
