//! Hourly rate derivation.
//!
//! Salaried employees are paid by the hour: the annual salary is spread
//! over a fixed working year (2080 hours by default).

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of deriving an hourly rate, including the audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// Salary divided by annual hours, unrounded.
    pub rate: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the hourly rate from an annual salary.
///
/// # Errors
///
/// Returns `InvalidInput` if the salary is negative or the configured
/// annual hours are zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_hourly_rate;
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let result = calculate_hourly_rate(Decimal::new(83200, 0), &PayrollRates::default(), 1).unwrap();
/// assert_eq!(result.rate, Decimal::new(40, 0));
/// ```
pub fn calculate_hourly_rate(
    salary: Decimal,
    rates: &PayrollRates,
    step_number: u32,
) -> EngineResult<HourlyRateResult> {
    if salary < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "salary",
            format!("must not be negative (got {salary})"),
        ));
    }

    let rate = salary.checked_div(rates.annual_hours).ok_or_else(|| {
        EngineError::invalid_input("rates.annual_hours", "must be greater than zero")
    })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Hourly Rate".to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "annual_hours": rates.annual_hours.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": rate.to_string()
        }),
        reasoning: format!(
            "${} annual salary / {} hours = ${}/hr",
            salary, rates.annual_hours, rate
        ),
    };

    Ok(HourlyRateResult { rate, audit_step })
}
