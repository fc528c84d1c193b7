//! Gross pay calculation.
//!
//! Regular hours are paid at the hourly rate and overtime hours at the
//! hourly rate times the overtime multiplier (1.5 by default).

use rust_decimal::Decimal;

use super::rounding::{checked_add, checked_mul};
use crate::config::PayrollRates;
use crate::error::EngineResult;
use crate::models::{AuditStep, HoursInput};

/// The result of a gross pay calculation. Amounts are unrounded.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates regular, overtime and gross pay for the given hours.
///
/// # Errors
///
/// Returns `InvalidInput` for negative hours or if the result overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_gross_pay;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::HoursInput;
/// use rust_decimal::Decimal;
///
/// let hours = HoursInput::new(Decimal::new(80, 0), Decimal::new(2, 0));
/// let result = calculate_gross_pay(Decimal::new(40, 0), &hours, &PayrollRates::default(), 2).unwrap();
/// assert_eq!(result.overtime_pay, Decimal::new(120, 0));
/// assert_eq!(result.gross_pay, Decimal::new(3320, 0));
/// ```
pub fn calculate_gross_pay(
    hourly_rate: Decimal,
    hours: &HoursInput,
    rates: &PayrollRates,
    step_number: u32,
) -> EngineResult<GrossPayResult> {
    hours.validate()?;

    let regular_pay = checked_mul("regular_pay", hours.regular_hours, hourly_rate)?;
    let overtime_rate = checked_mul("overtime_pay", hourly_rate, rates.overtime_multiplier)?;
    let overtime_pay = checked_mul("overtime_pay", hours.overtime_hours, overtime_rate)?;
    let gross_pay = checked_add("gross_pay", regular_pay, overtime_pay)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.to_string(),
            "regular_hours": hours.regular_hours.to_string(),
            "overtime_hours": hours.overtime_hours.to_string(),
            "overtime_multiplier": rates.overtime_multiplier.to_string()
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.to_string(),
            "overtime_pay": overtime_pay.to_string(),
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "{} regular hrs x ${} + {} overtime hrs x ${} x {} = ${}",
            hours.regular_hours,
            hourly_rate,
            hours.overtime_hours,
            hourly_rate,
            rates.overtime_multiplier,
            gross_pay
        ),
    };

    Ok(GrossPayResult {
        regular_pay,
        overtime_pay,
        gross_pay,
        audit_step,
    })
}
