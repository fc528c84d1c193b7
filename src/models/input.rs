//! Boundary parsing for raw form values.
//!
//! Form fields arrive as text. They are parsed here into strict numeric
//! types before they reach any model; nothing inside the engine is
//! string-typed.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Parses a non-negative decimal amount such as a salary, an hours value
/// or a withholding amount.
///
/// Surrounding whitespace, a leading `$` and thousands separators are
/// accepted.
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("salary", "$83,200").unwrap(), Decimal::new(83200, 0));
/// assert!(parse_amount("salary", "-5").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(EngineError::invalid_input(field, "a value is required"));
    }

    let value = Decimal::from_str(&cleaned).map_err(|e| {
        EngineError::invalid_input(field, format!("'{}' is not a number: {}", raw.trim(), e))
    })?;

    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}

/// Parses a non-negative whole number such as an allowance count.
pub fn parse_count(field: &str, raw: &str) -> EngineResult<u32> {
    let trimmed = raw.trim();
    trimmed.parse::<u32>().map_err(|_| {
        EngineError::invalid_input(
            field,
            format!("'{trimmed}' is not a non-negative whole number"),
        )
    })
}
