//! Employee model and related types.
//!
//! This module defines the [`Employee`] record together with its tax
//! profile, deductions and the opaque bank-account reference.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::input::{parse_amount, parse_count};
use crate::error::{EngineError, EngineResult};
use crate::store::RecordId;

/// Employment status of an employee.
///
/// Only `Active` employees receive entries in a payroll run. `Terminated`
/// is terminal: a terminated employee cannot be reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and paid.
    Active,
    /// On leave or otherwise not being paid.
    Inactive,
    /// No longer employed.
    Terminated,
}

impl EmploymentStatus {
    /// Returns the snake_case name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often an employee is paid. Also used as the informational type of a
/// pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Twice a month.
    SemiMonthly,
    /// Once a month.
    Monthly,
}

/// Tax filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    Single,
    /// Married filer.
    Married,
    /// Head of household.
    HeadOfHousehold,
}

/// Withholding settings for an employee.
///
/// Allowances are informational under the flat-rate model; only
/// `additional_withholding` changes the computed net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Filing status.
    pub filing_status: FilingStatus,
    /// Federal allowances claimed.
    #[serde(default)]
    pub federal_allowances: u32,
    /// State allowances claimed.
    #[serde(default)]
    pub state_allowances: u32,
    /// Flat amount withheld on every paycheck on top of the computed taxes.
    #[serde(default)]
    pub additional_withholding: Decimal,
}

impl TaxProfile {
    /// Parses raw form values. Empty values count as zero.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{FilingStatus, TaxProfile};
    /// use rust_decimal::Decimal;
    ///
    /// let profile = TaxProfile::parse(FilingStatus::Married, "2", "", "$25.00").unwrap();
    /// assert_eq!(profile.federal_allowances, 2);
    /// assert_eq!(profile.state_allowances, 0);
    /// assert_eq!(profile.additional_withholding, Decimal::new(25, 0));
    /// ```
    pub fn parse(
        filing_status: FilingStatus,
        federal_allowances: &str,
        state_allowances: &str,
        additional_withholding: &str,
    ) -> EngineResult<Self> {
        let count = |field: &str, raw: &str| {
            if raw.trim().is_empty() {
                Ok(0)
            } else {
                parse_count(field, raw)
            }
        };
        let additional_withholding = if additional_withholding.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_amount("additional_withholding", additional_withholding)?
        };

        Ok(Self {
            filing_status,
            federal_allowances: count("federal_allowances", federal_allowances)?,
            state_allowances: count("state_allowances", state_allowances)?,
            additional_withholding,
        })
    }
}

impl Default for TaxProfile {
    fn default() -> Self {
        Self {
            filing_status: FilingStatus::Single,
            federal_allowances: 0,
            state_allowances: 0,
            additional_withholding: Decimal::ZERO,
        }
    }
}

/// How often a deduction is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionFrequency {
    /// Taken from every paycheck.
    PerPaycheck,
    /// Taken monthly. Not applied by the per-period calculation.
    Monthly,
}

/// A recurring deduction from an employee's pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Free-form category tag (e.g., "health_insurance", "401k").
    #[serde(rename = "type")]
    pub deduction_type: String,
    /// The amount deducted each time the deduction applies.
    pub amount: Decimal,
    /// How often the deduction applies.
    pub frequency: DeductionFrequency,
}

impl Deduction {
    /// Returns true if the deduction is taken from every paycheck.
    pub fn is_per_paycheck(&self) -> bool {
        self.frequency == DeductionFrequency::PerPaycheck
    }
}

/// Contact details. Not validated beyond presence of the email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
}

/// Bank account used for direct deposit. The fields are opaque here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Bank name.
    #[serde(default)]
    pub bank_name: String,
    /// Account type, e.g. "checking" or "savings".
    #[serde(default)]
    pub account_type: String,
    /// Account number, usually masked.
    #[serde(default)]
    pub account_number: String,
    /// Routing number.
    #[serde(default)]
    pub routing_number: String,
}

/// Represents an employee on the payroll roster.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, EmploymentStatus};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("John", "Smith", "john.smith@company.com", Decimal::new(85000, 0));
/// assert_eq!(employee.status, EmploymentStatus::Active);
/// assert_eq!(employee.full_name(), "John Smith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact details.
    pub contact: ContactInfo,
    /// Department (free text).
    #[serde(default)]
    pub department: String,
    /// Position (free text).
    #[serde(default)]
    pub position: String,
    /// Date of hire.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Employment status.
    pub status: EmploymentStatus,
    /// Annual salary.
    pub salary: Decimal,
    /// How often the employee is paid.
    pub pay_frequency: PayFrequency,
    /// Withholding settings.
    #[serde(default)]
    pub tax_profile: TaxProfile,
    /// Recurring deductions, in the order they were configured.
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    /// Direct deposit account.
    #[serde(default)]
    pub bank_account: BankAccount,
}

impl Employee {
    /// Creates an active, bi-weekly employee with no deductions.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        salary: Decimal,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            contact: ContactInfo {
                email: email.into(),
                phone: String::new(),
            },
            department: String::new(),
            position: String::new(),
            hire_date: None,
            status: EmploymentStatus::Active,
            salary,
            pay_frequency: PayFrequency::BiWeekly,
            tax_profile: TaxProfile::default(),
            deductions: Vec::new(),
            bank_account: BankAccount::default(),
        }
    }

    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee should receive entries in a payroll run.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Sum of the deductions taken from every paycheck.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the sum overflows.
    pub fn per_paycheck_deductions(&self) -> EngineResult<Decimal> {
        self.deductions
            .iter()
            .filter(|d| d.is_per_paycheck())
            .try_fold(Decimal::ZERO, |sum, d| {
                sum.checked_add(d.amount)
                    .ok_or_else(|| EngineError::overflow("deductions"))
            })
    }

    /// Checks the field contracts of an employee record.
    pub fn validate(&self) -> EngineResult<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("contact.email", &self.contact.email)?;
        require_non_negative("salary", self.salary)?;
        require_non_negative(
            "tax_profile.additional_withholding",
            self.tax_profile.additional_withholding,
        )?;
        for (index, deduction) in self.deductions.iter().enumerate() {
            require_non_negative(&format!("deductions[{index}].amount"), deduction.amount)?;
        }
        Ok(())
    }
}

/// Deserializes a present key, including an explicit `null`, as `Some`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial update of an [`Employee`]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeePatch {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New contact details.
    pub contact: Option<ContactInfo>,
    /// New department.
    pub department: Option<String>,
    /// New position.
    pub position: Option<String>,
    /// New hire date. `Some(None)` clears it; in JSON an explicit `null`
    /// clears and an absent key leaves it unchanged.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub hire_date: Option<Option<NaiveDate>>,
    /// New status.
    pub status: Option<EmploymentStatus>,
    /// New annual salary.
    pub salary: Option<Decimal>,
    /// New pay frequency.
    pub pay_frequency: Option<PayFrequency>,
    /// New tax profile.
    pub tax_profile: Option<TaxProfile>,
    /// Replacement deduction list.
    pub deductions: Option<Vec<Deduction>>,
    /// New bank account.
    pub bank_account: Option<BankAccount>,
}

impl EmployeePatch {
    /// A patch that only changes the status.
    pub fn status(status: EmploymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merges the patch onto `employee`.
    ///
    /// Fails with `InvalidTransition` when the patch would revive a
    /// terminated employee. The returned record is not yet validated.
    pub(crate) fn apply_to(self, id: RecordId, employee: &Employee) -> EngineResult<Employee> {
        let mut merged = employee.clone();
        if let Some(status) = self.status {
            if employee.status == EmploymentStatus::Terminated
                && status != EmploymentStatus::Terminated
            {
                return Err(EngineError::InvalidTransition {
                    entity: "employee".to_string(),
                    id,
                    from: employee.status.to_string(),
                    to: status.to_string(),
                });
            }
            merged.status = status;
        }
        if let Some(first_name) = self.first_name {
            merged.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            merged.last_name = last_name;
        }
        if let Some(contact) = self.contact {
            merged.contact = contact;
        }
        if let Some(department) = self.department {
            merged.department = department;
        }
        if let Some(position) = self.position {
            merged.position = position;
        }
        if let Some(hire_date) = self.hire_date {
            merged.hire_date = hire_date;
        }
        if let Some(salary) = self.salary {
            merged.salary = salary;
        }
        if let Some(pay_frequency) = self.pay_frequency {
            merged.pay_frequency = pay_frequency;
        }
        if let Some(tax_profile) = self.tax_profile {
            merged.tax_profile = tax_profile;
        }
        if let Some(deductions) = self.deductions {
            merged.deductions = deductions;
        }
        if let Some(bank_account) = self.bank_account {
            merged.bank_account = bank_account;
        }
        Ok(merged)
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::invalid_input(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}
