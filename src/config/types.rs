//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML rate file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::HoursInput;

/// Flat withholding rates and pay constants.
///
/// The defaults are the reference flat-rate model: 22% federal, 5% state,
/// 6.2% FICA, 1.45% Medicare, time-and-a-half overtime and a 2080-hour
/// working year (40 hours/week × 52 weeks).
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let rates = PayrollRates::default();
/// assert_eq!(rates.annual_hours, Decimal::new(2080, 0));
/// assert_eq!(rates.total_tax_rate(), Decimal::new(3465, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRates {
    /// Federal income tax rate, as a fraction of gross pay.
    pub federal_rate: Decimal,
    /// State income tax rate, as a fraction of gross pay.
    pub state_rate: Decimal,
    /// Social security (FICA) rate, as a fraction of gross pay.
    pub fica_rate: Decimal,
    /// Medicare rate, as a fraction of gross pay.
    pub medicare_rate: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Working hours per year used to derive the hourly rate from salary.
    pub annual_hours: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            federal_rate: Decimal::new(22, 2),
            state_rate: Decimal::new(5, 2),
            fica_rate: Decimal::new(62, 3),
            medicare_rate: Decimal::new(145, 4),
            overtime_multiplier: Decimal::new(15, 1),
            annual_hours: Decimal::new(2080, 0),
        }
    }
}

impl PayrollRates {
    /// Sum of the four withholding rates.
    pub fn total_tax_rate(&self) -> Decimal {
        self.federal_rate + self.state_rate + self.fica_rate + self.medicare_rate
    }

    /// Rejects negative rates and a non-positive working year.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("rates.federal_rate", self.federal_rate),
            ("rates.state_rate", self.state_rate),
            ("rates.fica_rate", self.fica_rate),
            ("rates.medicare_rate", self.medicare_rate),
            ("rates.overtime_multiplier", self.overtime_multiplier),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative (got {value})"),
                ));
            }
        }
        if self.annual_hours <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "rates.annual_hours",
                format!("must be greater than zero (got {})", self.annual_hours),
            ));
        }
        Ok(())
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Withholding rates and pay constants.
    pub rates: PayrollRates,
    /// Hours used in a payroll run for employees without explicit hours.
    pub default_hours: HoursInput,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            rates: PayrollRates::default(),
            default_hours: HoursInput::new(Decimal::new(80, 0), Decimal::ZERO),
        }
    }
}

impl PayrollConfig {
    /// Validates the rates and the default hours.
    pub fn validate(&self) -> EngineResult<()> {
        self.rates.validate()?;
        self.default_hours.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rates_match_reference_model() {
        let rates = PayrollRates::default();
        assert_eq!(rates.federal_rate, dec("0.22"));
        assert_eq!(rates.state_rate, dec("0.05"));
        assert_eq!(rates.fica_rate, dec("0.062"));
        assert_eq!(rates.medicare_rate, dec("0.0145"));
        assert_eq!(rates.overtime_multiplier, dec("1.5"));
        assert_eq!(rates.annual_hours, dec("2080"));
    }

    #[test]
    fn test_default_hours_are_eighty_regular() {
        let config = PayrollConfig::default();
        assert_eq!(config.default_hours.regular_hours, dec("80"));
        assert_eq!(config.default_hours.overtime_hours, Decimal::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let rates = PayrollRates {
            state_rate: dec("-0.01"),
            ..PayrollRates::default()
        };
        assert!(matches!(
            rates.validate(),
            Err(EngineError::InvalidInput { field, .. }) if field == "rates.state_rate"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_annual_hours() {
        let rates = PayrollRates {
            annual_hours: Decimal::ZERO,
            ..PayrollRates::default()
        };
        assert!(matches!(
            rates.validate(),
            Err(EngineError::InvalidInput { field, .. }) if field == "rates.annual_hours"
        ));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: PayrollConfig = serde_yaml::from_str("rates:\n  state_rate: 0.04\n").unwrap();
        assert_eq!(config.rates.state_rate, dec("0.04"));
        assert_eq!(config.rates.federal_rate, dec("0.22"));
        assert_eq!(config.default_hours.regular_hours, dec("80"));
    }
}
