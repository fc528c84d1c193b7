//! Payroll entry model.
//!
//! A [`PayrollEntry`] is the computed earnings, withholding and net pay of
//! one employee for one pay period. Entries reference their employee and
//! period by id and never embed them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::employee::require_non_negative;
use super::input::parse_amount;
use crate::error::{EngineError, EngineResult};
use crate::store::RecordId;

/// Hours worked in a pay period, as supplied by the operator.
///
/// # Example
///
/// ```
/// use payroll_engine::models::HoursInput;
/// use rust_decimal::Decimal;
///
/// let hours = HoursInput::parse("80", "4.5").unwrap();
/// assert_eq!(hours.regular_hours, Decimal::new(80, 0));
/// assert_eq!(hours.total().unwrap(), Decimal::new(845, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursInput {
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    #[serde(default)]
    pub overtime_hours: Decimal,
}

impl HoursInput {
    /// Creates an hours input without validating it.
    pub fn new(regular_hours: Decimal, overtime_hours: Decimal) -> Self {
        Self {
            regular_hours,
            overtime_hours,
        }
    }

    /// Parses raw form values. An empty overtime value counts as zero.
    pub fn parse(regular: &str, overtime: &str) -> EngineResult<Self> {
        let regular_hours = parse_amount("regular_hours", regular)?;
        let overtime_hours = if overtime.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_amount("overtime_hours", overtime)?
        };
        Ok(Self::new(regular_hours, overtime_hours))
    }

    /// Regular plus overtime hours.
    pub fn total(&self) -> EngineResult<Decimal> {
        self.regular_hours
            .checked_add(self.overtime_hours)
            .ok_or_else(|| EngineError::overflow("total_hours"))
    }

    /// Rejects negative hours.
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("regular_hours", self.regular_hours)?;
        require_non_negative("overtime_hours", self.overtime_hours)
    }
}

/// The monetary outcome of a pay calculation.
///
/// Every field is rounded to cents. `net_pay` may be negative when
/// deductions exceed gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Annual salary divided by the annual hours.
    pub hourly_rate: Decimal,
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// Federal income tax withheld.
    pub federal_tax: Decimal,
    /// State income tax withheld.
    pub state_tax: Decimal,
    /// Social security (FICA) tax withheld.
    pub fica_tax: Decimal,
    /// Medicare tax withheld.
    pub medicare_tax: Decimal,
    /// Per-paycheck deductions plus additional withholding.
    pub deductions_total: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
}

impl PayBreakdown {
    /// Sum of the four taxes.
    pub fn total_taxes(&self) -> EngineResult<Decimal> {
        [self.state_tax, self.fica_tax, self.medicare_tax]
            .into_iter()
            .try_fold(self.federal_tax, |sum, tax| sum.checked_add(tax))
            .ok_or_else(|| EngineError::overflow("total_taxes"))
    }

    /// Returns true if deductions and taxes exceed gross pay.
    pub fn is_negative_net(&self) -> bool {
        self.net_pay < Decimal::ZERO
    }
}

/// The `(period_id, employee_id)` pair that identifies an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    /// The owning pay period.
    pub period_id: RecordId,
    /// The paid employee.
    pub employee_id: RecordId,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "period {} / employee {}", self.period_id, self.employee_id)
    }
}

/// Represents one employee's payroll for one pay period.
///
/// Serializes flat: hours and pay fields appear next to the ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The owning pay period.
    pub period_id: RecordId,
    /// The paid employee.
    pub employee_id: RecordId,
    /// Hours worked.
    #[serde(flatten)]
    pub hours: HoursInput,
    /// Computed pay.
    #[serde(flatten)]
    pub pay: PayBreakdown,
}

impl PayrollEntry {
    /// The uniqueness key of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            period_id: self.period_id,
            employee_id: self.employee_id,
        }
    }

    /// Regular plus overtime hours.
    pub fn total_hours(&self) -> EngineResult<Decimal> {
        self.hours.total()
    }

    /// Rejects negative hours.
    pub fn validate(&self) -> EngineResult<()> {
        self.hours.validate()
    }
}

/// A replacement of an entry's hours and pay, produced by recomputation.
///
/// The period and employee of an entry never change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollEntryPatch {
    /// New hours.
    pub hours: Option<HoursInput>,
    /// New pay.
    pub pay: Option<PayBreakdown>,
}

impl PayrollEntryPatch {
    pub(crate) fn apply_to(self, entry: &PayrollEntry) -> PayrollEntry {
        let mut merged = *entry;
        if let Some(hours) = self.hours {
            merged.hours = hours;
        }
        if let Some(pay) = self.pay {
            merged.pay = pay;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_breakdown() -> PayBreakdown {
        PayBreakdown {
            hourly_rate: dec("40.00"),
            regular_pay: dec("3200.00"),
            overtime_pay: dec("0.00"),
            gross_pay: dec("3200.00"),
            federal_tax: dec("704.00"),
            state_tax: dec("160.00"),
            fica_tax: dec("198.40"),
            medicare_tax: dec("46.40"),
            deductions_total: dec("0.00"),
            net_pay: dec("2091.20"),
        }
    }

    fn create_test_entry() -> PayrollEntry {
        PayrollEntry {
            period_id: 1,
            employee_id: 2,
            hours: HoursInput::new(dec("80"), dec("0")),
            pay: create_test_breakdown(),
        }
    }

    #[test]
    fn test_hours_parse_trims_and_defaults_overtime() {
        let hours = HoursInput::parse(" 72.5 ", "").unwrap();
        assert_eq!(hours.regular_hours, dec("72.5"));
        assert_eq!(hours.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_hours_parse_rejects_negative_and_garbage() {
        assert!(matches!(
            HoursInput::parse("-1", "0"),
            Err(EngineError::InvalidInput { field, .. }) if field == "regular_hours"
        ));
        assert!(matches!(
            HoursInput::parse("80", "ten"),
            Err(EngineError::InvalidInput { field, .. }) if field == "overtime_hours"
        ));
    }

    #[test]
    fn test_hours_validate_rejects_negative_overtime() {
        let hours = HoursInput::new(dec("80"), dec("-2"));
        assert!(hours.validate().is_err());
    }

    #[test]
    fn test_total_taxes() {
        assert_eq!(create_test_breakdown().total_taxes().unwrap(), dec("1108.80"));
    }

    #[test]
    fn test_totals_report_overflow() {
        let hours = HoursInput::new(Decimal::MAX, Decimal::MAX);
        assert_eq!(hours.total(), Err(EngineError::overflow("total_hours")));

        let mut pay = create_test_breakdown();
        pay.federal_tax = Decimal::MAX;
        assert_eq!(pay.total_taxes(), Err(EngineError::overflow("total_taxes")));
    }

    #[test]
    fn test_entry_serializes_flat() {
        let json = serde_json::to_value(create_test_entry()).unwrap();
        assert_eq!(json["period_id"], 1);
        assert_eq!(json["employee_id"], 2);
        assert_eq!(json["regular_hours"], "80");
        assert_eq!(json["net_pay"], "2091.20");
        assert!(json.get("pay").is_none());
    }

    #[test]
    fn test_entry_key_display() {
        assert_eq!(create_test_entry().key().to_string(), "period 1 / employee 2");
    }

    #[test]
    fn test_patch_replaces_hours_and_keeps_ids() {
        let entry = create_test_entry();
        let patch = PayrollEntryPatch {
            hours: Some(HoursInput::new(dec("70"), dec("2"))),
            pay: None,
        };
        let merged = patch.apply_to(&entry);
        assert_eq!(merged.hours.regular_hours, dec("70"));
        assert_eq!(merged.pay, entry.pay);
        assert_eq!(merged.key(), entry.key());
    }

    #[test]
    fn test_negative_net_flag() {
        let mut pay = create_test_breakdown();
        assert!(!pay.is_negative_net());
        pay.net_pay = dec("-10.00");
        assert!(pay.is_negative_net());
    }
}
