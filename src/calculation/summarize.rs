//! Payroll summary aggregation.

use rust_decimal::Decimal;

use super::rounding::{checked_add, round_currency};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollEntry, PayrollSummary};

/// Folds payroll entries into period totals.
///
/// Every entry passed in is counted once; the caller selects which
/// entries belong to the period. An empty input yields an all-zero
/// summary.
///
/// # Errors
///
/// Returns `InvalidInput` if a total overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::summarize;
/// use payroll_engine::models::{PayrollEntry, PayrollSummary};
///
/// let entries: Vec<PayrollEntry> = Vec::new();
/// assert_eq!(summarize(&entries).unwrap(), PayrollSummary::default());
/// ```
pub fn summarize<'a, I>(entries: I) -> EngineResult<PayrollSummary>
where
    I: IntoIterator<Item = &'a PayrollEntry>,
{
    let mut summary = entries
        .into_iter()
        .try_fold(PayrollSummary::default(), |mut summary, entry| {
            let pay = &entry.pay;
            summary.total_gross_pay =
                checked_add("total_gross_pay", summary.total_gross_pay, pay.gross_pay)?;
            summary.total_taxes = checked_add("total_taxes", summary.total_taxes, pay.total_taxes()?)?;
            summary.total_deductions =
                checked_add("total_deductions", summary.total_deductions, pay.deductions_total)?;
            summary.total_net_pay = checked_add("total_net_pay", summary.total_net_pay, pay.net_pay)?;
            summary.total_hours = checked_add("total_hours", summary.total_hours, entry.total_hours()?)?;
            summary.total_overtime_hours = checked_add(
                "total_overtime_hours",
                summary.total_overtime_hours,
                entry.hours.overtime_hours,
            )?;
            summary.employees_paid += 1;
            Ok::<_, EngineError>(summary)
        })?;

    if summary.employees_paid > 0 {
        let average = summary
            .total_net_pay
            .checked_div(Decimal::from(summary.employees_paid))
            .ok_or_else(|| EngineError::overflow("average_net_pay"))?;
        summary.average_net_pay = round_currency(average);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HoursInput, PayBreakdown};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_entry(employee_id: u64, gross: &str, deductions: &str, net: &str) -> PayrollEntry {
        let gross = dec(gross);
        PayrollEntry {
            period_id: 1,
            employee_id,
            hours: HoursInput::new(dec("80"), dec("2")),
            pay: PayBreakdown {
                hourly_rate: dec("40.00"),
                regular_pay: gross,
                overtime_pay: Decimal::ZERO,
                gross_pay: gross,
                federal_tax: dec("10.00"),
                state_tax: dec("5.00"),
                fica_tax: dec("2.00"),
                medicare_tax: dec("1.00"),
                deductions_total: dec(deductions),
                net_pay: dec(net),
            },
        }
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&Vec::<PayrollEntry>::new()).unwrap();
        assert_eq!(summary.total_gross_pay, Decimal::ZERO);
        assert_eq!(summary.total_net_pay, Decimal::ZERO);
        assert_eq!(summary.total_deductions, Decimal::ZERO);
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.employees_paid, 0);
        assert_eq!(summary.average_net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_totals_are_field_wise_sums() {
        let entries = vec![
            create_test_entry(1, "3200.00", "50.00", "2041.20"),
            create_test_entry(2, "1000.00", "0.00", "653.50"),
            create_test_entry(3, "1500.50", "25.25", "955.34"),
        ];
        let summary = summarize(&entries).unwrap();

        assert_eq!(summary.total_gross_pay, dec("5700.50"));
        assert_eq!(summary.total_taxes, dec("54.00"));
        assert_eq!(summary.total_deductions, dec("75.25"));
        assert_eq!(summary.total_net_pay, dec("3650.04"));
        assert_eq!(summary.employees_paid, 3);
        assert_eq!(summary.total_hours, dec("246"));
        assert_eq!(summary.total_overtime_hours, dec("6"));
        assert_eq!(summary.average_net_pay, dec("1216.68"));
    }

    #[test]
    fn test_negative_net_is_summed_as_is() {
        let entries = vec![
            create_test_entry(1, "100.00", "500.00", "-434.65"),
            create_test_entry(2, "1000.00", "0.00", "653.50"),
        ];
        let summary = summarize(entries.iter()).unwrap();
        assert_eq!(summary.total_net_pay, dec("218.85"));
        assert_eq!(summary.average_net_pay, dec("109.43"));
    }

    #[test]
    fn test_overflowing_totals_are_reported() {
        let mut first = create_test_entry(1, "1.00", "0.00", "1.00");
        first.pay.gross_pay = Decimal::MAX;
        let second = create_test_entry(2, "1.00", "0.00", "1.00");
        assert_eq!(
            summarize(&[first, second]),
            Err(EngineError::overflow("total_gross_pay"))
        );
    }

    #[test]
    fn test_overflowing_hours_are_reported() {
        let mut entry = create_test_entry(1, "0.00", "0.00", "0.00");
        entry.hours = HoursInput::new(Decimal::MAX, Decimal::MAX);
        assert_eq!(
            summarize(&[entry]),
            Err(EngineError::overflow("total_hours"))
        );
    }
}
