//! Payroll calculation.
//!
//! This module turns an employee and the hours they worked into a rounded
//! [`PayBreakdown`](crate::models::PayBreakdown): hourly rate derivation,
//! regular and overtime pay, flat-rate tax withholding, per-paycheck
//! deductions and net pay. Each stage records an audit step. The
//! aggregator folds computed entries into a period summary.

mod deductions;
mod entry;
mod gross_pay;
mod hourly_rate;
mod net_pay;
mod rounding;
mod summarize;
mod withholding;

pub use deductions::{DeductionsResult, calculate_deductions};
pub use entry::{PayCalculation, calculate_pay, compute_entry};
pub use gross_pay::{GrossPayResult, calculate_gross_pay};
pub use hourly_rate::{HourlyRateResult, calculate_hourly_rate};
pub use net_pay::{NEGATIVE_NET_PAY, NetPayResult, calculate_net_pay};
pub use rounding::round_currency;
pub use summarize::summarize;
pub use withholding::{WithholdingResult, calculate_withholding};
