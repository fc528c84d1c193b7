//! Payroll entry assembly.
//!
//! Runs the calculation stages in order, rounds every monetary output to
//! cents and assembles the result. Stages work on unrounded amounts, so
//! net pay is derived from exact gross, tax and deduction values and only
//! rounded once.

use super::deductions::calculate_deductions;
use super::gross_pay::calculate_gross_pay;
use super::hourly_rate::calculate_hourly_rate;
use super::net_pay::calculate_net_pay;
use super::rounding::round_currency;
use super::withholding::calculate_withholding;
use crate::config::PayrollRates;
use crate::error::EngineResult;
use crate::models::{AuditTrace, Employee, HoursInput, PayBreakdown, PayrollEntry};
use crate::store::{RecordId, Stored};

/// A pay calculation together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayCalculation {
    /// The rounded monetary outcome.
    pub breakdown: PayBreakdown,
    /// Every stage of the calculation, in order.
    pub audit_trace: AuditTrace,
}

/// Calculates an employee's pay for the given hours.
///
/// Does not look at the employee's status; callers decide who is paid.
///
/// # Errors
///
/// Returns `InvalidInput` for negative hours, a negative salary, or
/// amounts too large to compute.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::PayrollRates;
/// use payroll_engine::models::{Employee, HoursInput};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("John", "Smith", "john@company.com", Decimal::new(83200, 0));
/// let hours = HoursInput::new(Decimal::new(80, 0), Decimal::ZERO);
///
/// let result = calculate_pay(&employee, &hours, &PayrollRates::default()).unwrap();
/// assert_eq!(result.breakdown.gross_pay, Decimal::new(320000, 2));
/// assert_eq!(result.breakdown.net_pay, Decimal::new(209120, 2));
/// assert_eq!(result.audit_trace.steps.len(), 5);
/// ```
pub fn calculate_pay(
    employee: &Employee,
    hours: &HoursInput,
    rates: &PayrollRates,
) -> EngineResult<PayCalculation> {
    let mut audit_trace = AuditTrace::default();
    let mut step_number = 1;

    let hourly = calculate_hourly_rate(employee.salary, rates, step_number)?;
    audit_trace.steps.push(hourly.audit_step);
    step_number += 1;

    let gross = calculate_gross_pay(hourly.rate, hours, rates, step_number)?;
    audit_trace.steps.push(gross.audit_step);
    step_number += 1;

    let taxes = calculate_withholding(gross.gross_pay, rates, step_number)?;
    audit_trace.steps.push(taxes.audit_step);
    step_number += 1;

    let deductions = calculate_deductions(employee, step_number)?;
    audit_trace.steps.push(deductions.audit_step);
    step_number += 1;

    let net = calculate_net_pay(gross.gross_pay, taxes.total, deductions.total, step_number)?;
    audit_trace.steps.push(net.audit_step);
    audit_trace.warnings.extend(net.warning);

    let breakdown = PayBreakdown {
        hourly_rate: round_currency(hourly.rate),
        regular_pay: round_currency(gross.regular_pay),
        overtime_pay: round_currency(gross.overtime_pay),
        gross_pay: round_currency(gross.gross_pay),
        federal_tax: round_currency(taxes.federal_tax),
        state_tax: round_currency(taxes.state_tax),
        fica_tax: round_currency(taxes.fica_tax),
        medicare_tax: round_currency(taxes.medicare_tax),
        deductions_total: round_currency(deductions.total),
        net_pay: round_currency(net.net_pay),
    };

    Ok(PayCalculation {
        breakdown,
        audit_trace,
    })
}

/// Computes the payroll entry for a stored employee in a pay period.
///
/// # Errors
///
/// Same as [`calculate_pay`].
pub fn compute_entry(
    employee: &Stored<Employee>,
    period_id: RecordId,
    hours: &HoursInput,
    rates: &PayrollRates,
) -> EngineResult<PayrollEntry> {
    let calculation = calculate_pay(employee, hours, rates)?;
    Ok(PayrollEntry {
        period_id,
        employee_id: employee.id,
        hours: *hours,
        pay: calculation.breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::NEGATIVE_NET_PAY;
    use crate::error::EngineError;
    use crate::models::{Deduction, DeductionFrequency};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(salary: &str) -> Employee {
        Employee::new("John", "Smith", "john.smith@company.com", dec(salary))
    }

    fn hours(regular: &str, overtime: &str) -> HoursInput {
        HoursInput::new(dec(regular), dec(overtime))
    }

    fn expected_net_without_deductions(
        salary: Decimal,
        hours: Decimal,
        rates: &PayrollRates,
    ) -> Option<Decimal> {
        let gross = salary.checked_div(rates.annual_hours)?.checked_mul(hours)?;
        let retained = Decimal::ONE.checked_sub(rates.total_tax_rate())?;
        gross.checked_mul(retained).map(round_currency)
    }

    fn per_paycheck(kind: &str, amount: &str) -> Deduction {
        Deduction {
            deduction_type: kind.to_string(),
            amount: dec(amount),
            frequency: DeductionFrequency::PerPaycheck,
        }
    }

    #[test]
    fn test_reference_paycheck() {
        let result = calculate_pay(
            &create_test_employee("83200"),
            &hours("80", "0"),
            &PayrollRates::default(),
        )
        .unwrap();

        let pay = result.breakdown;
        assert_eq!(pay.hourly_rate, dec("40.00"));
        assert_eq!(pay.gross_pay, dec("3200.00"));
        assert_eq!(pay.federal_tax, dec("704.00"));
        assert_eq!(pay.state_tax, dec("160.00"));
        assert_eq!(pay.fica_tax, dec("198.40"));
        assert_eq!(pay.medicare_tax, dec("46.40"));
        assert_eq!(pay.deductions_total, Decimal::ZERO);
        assert_eq!(pay.net_pay, dec("2091.20"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_reference_paycheck_with_deduction() {
        let mut employee = create_test_employee("83200");
        employee.deductions.push(per_paycheck("401k", "50"));

        let pay = calculate_pay(&employee, &hours("80", "0"), &PayrollRates::default())
            .unwrap()
            .breakdown;
        assert_eq!(pay.deductions_total, dec("50.00"));
        assert_eq!(pay.net_pay, dec("2041.20"));
    }

    #[test]
    fn test_overtime_paycheck() {
        let pay = calculate_pay(
            &create_test_employee("83200"),
            &hours("80", "5"),
            &PayrollRates::default(),
        )
        .unwrap()
        .breakdown;
        assert_eq!(pay.regular_pay, dec("3200.00"));
        assert_eq!(pay.overtime_pay, dec("300.00"));
        assert_eq!(pay.gross_pay, dec("3500.00"));
        assert_eq!(pay.net_pay, dec("2287.25"));
    }

    #[test]
    fn test_outputs_are_rounded_to_cents() {
        let pay = calculate_pay(
            &create_test_employee("85000"),
            &hours("80", "3.5"),
            &PayrollRates::default(),
        )
        .unwrap()
        .breakdown;

        for value in [
            pay.hourly_rate,
            pay.regular_pay,
            pay.overtime_pay,
            pay.gross_pay,
            pay.federal_tax,
            pay.state_tax,
            pay.fica_tax,
            pay.medicare_tax,
            pay.net_pay,
        ] {
            assert_eq!(value, value.round_dp(2));
        }
        assert_eq!(pay.hourly_rate, dec("40.87"));
        assert_eq!(pay.regular_pay, dec("3269.23"));
    }

    #[test]
    fn test_net_matches_closed_form_without_deductions() {
        let rates = PayrollRates::default();
        for salary in ["31234.56", "52000", "85000", "123456.78"] {
            let pay = calculate_pay(&create_test_employee(salary), &hours("80", "0"), &rates)
                .unwrap()
                .breakdown;
            assert_eq!(
                Some(pay.net_pay),
                expected_net_without_deductions(dec(salary), dec("80"), &rates)
            );
        }
    }

    #[test]
    fn test_negative_net_is_flagged_not_clamped() {
        let mut employee = create_test_employee("20800");
        employee.deductions.push(per_paycheck("garnishment", "500"));

        let result = calculate_pay(&employee, &hours("10", "0"), &PayrollRates::default()).unwrap();
        assert_eq!(result.breakdown.gross_pay, dec("100.00"));
        assert_eq!(result.breakdown.net_pay, dec("-434.65"));
        assert!(result.breakdown.is_negative_net());
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, NEGATIVE_NET_PAY);
    }

    #[test]
    fn test_audit_trace_order() {
        let result = calculate_pay(
            &create_test_employee("83200"),
            &hours("80", "0"),
            &PayrollRates::default(),
        )
        .unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["hourly_rate", "gross_pay", "withholding", "deductions", "net_pay"]
        );
        for (i, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_status_is_not_consulted() {
        let mut employee = create_test_employee("83200");
        employee.status = crate::models::EmploymentStatus::Terminated;
        assert!(calculate_pay(&employee, &hours("80", "0"), &PayrollRates::default()).is_ok());
    }

    #[test]
    fn test_rejects_negative_inputs() {
        let rates = PayrollRates::default();
        assert!(matches!(
            calculate_pay(&create_test_employee("-1"), &hours("80", "0"), &rates),
            Err(EngineError::InvalidInput { field, .. }) if field == "salary"
        ));
        assert!(matches!(
            calculate_pay(&create_test_employee("50000"), &hours("80", "-1"), &rates),
            Err(EngineError::InvalidInput { field, .. }) if field == "overtime_hours"
        ));
    }

    #[test]
    fn test_compute_entry_links_ids_and_hours() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let employee = Stored::new(7, create_test_employee("83200"), now);

        let entry = compute_entry(&employee, 3, &hours("80", "0"), &PayrollRates::default()).unwrap();
        assert_eq!(entry.employee_id, 7);
        assert_eq!(entry.period_id, 3);
        assert_eq!(entry.hours, hours("80", "0"));
        assert_eq!(entry.pay.net_pay, dec("2091.20"));
    }
}
