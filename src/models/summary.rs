//! Payroll summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over the payroll entries of one pay period.
///
/// Derived on demand from the entries and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Sum of gross pay.
    pub total_gross_pay: Decimal,
    /// Sum of federal, state, FICA and Medicare taxes.
    pub total_taxes: Decimal,
    /// Sum of deductions (including additional withholding).
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
    /// Number of entries summarized.
    pub employees_paid: usize,
    /// Sum of regular and overtime hours.
    pub total_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Net pay divided by employees paid, rounded to cents. Zero when empty.
    pub average_net_pay: Decimal,
}
