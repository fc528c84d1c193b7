//! Tax withholding calculation.
//!
//! Withholding uses a flat-rate model: federal, state, FICA and Medicare
//! taxes are each a fixed proportion of gross pay. Filing status and
//! allowances are recorded on the employee but do not change the rates.

use rust_decimal::Decimal;

use super::rounding::{checked_add, checked_mul};
use crate::config::PayrollRates;
use crate::error::EngineResult;
use crate::models::AuditStep;

/// The result of a withholding calculation. Amounts are unrounded.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Federal income tax.
    pub federal_tax: Decimal,
    /// State income tax.
    pub state_tax: Decimal,
    /// Social security tax.
    pub fica_tax: Decimal,
    /// Medicare tax.
    pub medicare_tax: Decimal,
    /// Sum of the four taxes.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the four flat-rate taxes on a gross amount.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding;
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let result = calculate_withholding(Decimal::new(3200, 0), &PayrollRates::default(), 3).unwrap();
/// assert_eq!(result.federal_tax, Decimal::new(704, 0));
/// assert_eq!(result.medicare_tax, Decimal::new(4640, 2));
/// ```
pub fn calculate_withholding(
    gross_pay: Decimal,
    rates: &PayrollRates,
    step_number: u32,
) -> EngineResult<WithholdingResult> {
    let federal_tax = checked_mul("federal_tax", gross_pay, rates.federal_rate)?;
    let state_tax = checked_mul("state_tax", gross_pay, rates.state_rate)?;
    let fica_tax = checked_mul("fica_tax", gross_pay, rates.fica_rate)?;
    let medicare_tax = checked_mul("medicare_tax", gross_pay, rates.medicare_rate)?;

    let total = [state_tax, fica_tax, medicare_tax]
        .into_iter()
        .try_fold(federal_tax, |sum, tax| checked_add("total_taxes", sum, tax))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding".to_string(),
        rule_name: "Tax Withholding".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "federal_rate": rates.federal_rate.to_string(),
            "state_rate": rates.state_rate.to_string(),
            "fica_rate": rates.fica_rate.to_string(),
            "medicare_rate": rates.medicare_rate.to_string()
        }),
        output: serde_json::json!({
            "federal_tax": federal_tax.to_string(),
            "state_tax": state_tax.to_string(),
            "fica_tax": fica_tax.to_string(),
            "medicare_tax": medicare_tax.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "${} gross x {} combined flat rate = ${} withheld",
            gross_pay,
            rates.total_tax_rate(),
            total
        ),
    };

    Ok(WithholdingResult {
        federal_tax,
        state_tax,
        fica_tax,
        medicare_tax,
        total,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_gross() {
        let result = calculate_withholding(dec("3200"), &PayrollRates::default(), 3).unwrap();
        assert_eq!(result.federal_tax, dec("704"));
        assert_eq!(result.state_tax, dec("160"));
        assert_eq!(result.fica_tax, dec("198.4"));
        assert_eq!(result.medicare_tax, dec("46.4"));
        assert_eq!(result.total, dec("1108.8"));
    }

    #[test]
    fn test_zero_gross_withholds_nothing() {
        let result = calculate_withholding(Decimal::ZERO, &PayrollRates::default(), 3).unwrap();
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_custom_rates() {
        let rates = PayrollRates {
            state_rate: Decimal::ZERO,
            ..PayrollRates::default()
        };
        let result = calculate_withholding(dec("1000"), &rates, 3).unwrap();
        assert_eq!(result.state_tax, Decimal::ZERO);
        assert_eq!(result.total, dec("296.5"));
    }

    #[test]
    fn test_audit_step() {
        let result = calculate_withholding(dec("1000"), &PayrollRates::default(), 3).unwrap();
        assert_eq!(result.audit_step.rule_id, "withholding");
        assert_eq!(result.audit_step.step_number, 3);
        assert!(result.audit_step.reasoning.contains("0.3465"));
    }
}
