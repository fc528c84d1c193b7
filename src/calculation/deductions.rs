//! Deduction calculation.
//!
//! Only per-paycheck deductions are taken from a paycheck. Monthly
//! deductions are recorded on the employee but never applied here. The
//! employee's additional withholding is taken alongside the deductions.

use rust_decimal::Decimal;

use super::rounding::checked_add;
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee};

/// The result of a deduction calculation.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// Sum of the per-paycheck deductions.
    pub per_paycheck: Decimal,
    /// The employee's additional withholding.
    pub additional_withholding: Decimal,
    /// Per-paycheck deductions plus additional withholding.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Totals the amounts taken from an employee's paycheck besides taxes.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::models::{Deduction, DeductionFrequency, Employee};
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new("John", "Smith", "john@company.com", Decimal::new(83200, 0));
/// employee.deductions.push(Deduction {
///     deduction_type: "401k".to_string(),
///     amount: Decimal::new(50, 0),
///     frequency: DeductionFrequency::PerPaycheck,
/// });
///
/// let result = calculate_deductions(&employee, 4).unwrap();
/// assert_eq!(result.total, Decimal::new(50, 0));
/// ```
pub fn calculate_deductions(employee: &Employee, step_number: u32) -> EngineResult<DeductionsResult> {
    let per_paycheck = employee.per_paycheck_deductions()?;

    let additional_withholding = employee.tax_profile.additional_withholding;
    let total = checked_add("deductions_total", per_paycheck, additional_withholding)?;

    let applied: Vec<serde_json::Value> = employee
        .deductions
        .iter()
        .map(|d| {
            serde_json::json!({
                "type": d.deduction_type,
                "amount": d.amount.to_string(),
                "frequency": d.frequency,
                "applied": d.is_per_paycheck()
            })
        })
        .collect();

    let skipped = employee
        .deductions
        .iter()
        .filter(|d| !d.is_per_paycheck())
        .count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Deductions".to_string(),
        input: serde_json::json!({
            "deductions": applied,
            "additional_withholding": additional_withholding.to_string()
        }),
        output: serde_json::json!({
            "per_paycheck": per_paycheck.to_string(),
            "total": total.to_string()
        }),
        reasoning: if skipped == 0 {
            format!(
                "${} per-paycheck deductions + ${} additional withholding = ${}",
                per_paycheck, additional_withholding, total
            )
        } else {
            format!(
                "${} per-paycheck deductions + ${} additional withholding = ${} ({} monthly deduction(s) not applied)",
                per_paycheck, additional_withholding, total, skipped
            )
        },
    };

    Ok(DeductionsResult {
        per_paycheck,
        additional_withholding,
        total,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deduction, DeductionFrequency};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deduction(kind: &str, amount: &str, frequency: DeductionFrequency) -> Deduction {
        Deduction {
            deduction_type: kind.to_string(),
            amount: dec(amount),
            frequency,
        }
    }

    fn create_test_employee() -> Employee {
        Employee::new("Sarah", "Johnson", "sarah.johnson@company.com", dec("95000"))
    }

    #[test]
    fn test_no_deductions() {
        let result = calculate_deductions(&create_test_employee(), 4).unwrap();
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_deductions_are_not_applied() {
        let mut employee = create_test_employee();
        employee.deductions = vec![
            deduction("401k", "150", DeductionFrequency::PerPaycheck),
            deduction("Health Insurance", "200", DeductionFrequency::Monthly),
            deduction("Dental", "25.50", DeductionFrequency::PerPaycheck),
        ];

        let result = calculate_deductions(&employee, 4).unwrap();
        assert_eq!(result.per_paycheck, dec("175.50"));
        assert_eq!(result.total, dec("175.50"));
        assert_eq!(result.audit_step.input["deductions"][1]["applied"], false);
        assert!(result.audit_step.reasoning.contains("1 monthly deduction(s) not applied"));
    }

    #[test]
    fn test_additional_withholding_included() {
        let mut employee = create_test_employee();
        employee.tax_profile.additional_withholding = dec("25");
        employee.deductions = vec![deduction("401k", "100", DeductionFrequency::PerPaycheck)];

        let result = calculate_deductions(&employee, 4).unwrap();
        assert_eq!(result.per_paycheck, dec("100"));
        assert_eq!(result.additional_withholding, dec("25"));
        assert_eq!(result.total, dec("125"));
    }

    #[test]
    fn test_overflowing_deductions_rejected() {
        let mut employee = create_test_employee();
        employee.deductions = vec![
            deduction("401k", "1", DeductionFrequency::PerPaycheck),
            deduction("Dental", "1", DeductionFrequency::PerPaycheck),
        ];
        employee.deductions[0].amount = Decimal::MAX;

        assert!(matches!(
            calculate_deductions(&employee, 4),
            Err(crate::error::EngineError::InvalidInput { field, .. }) if field == "deductions"
        ));
    }
}
