//! Currency rounding and overflow-checked decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds a monetary amount to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// assert_eq!(round_currency(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn checked_mul(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| EngineError::overflow(field))
}

pub(crate) fn checked_add(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| EngineError::overflow(field))
}

pub(crate) fn checked_sub(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| EngineError::overflow(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_currency(dec("0.005")), dec("0.01"));
        assert_eq!(round_currency(dec("0.004999")), dec("0.00"));
        assert_eq!(round_currency(dec("2091.2")), dec("2091.20"));
    }

    #[test]
    fn test_round_negative_is_symmetric() {
        assert_eq!(round_currency(dec("-0.005")), dec("-0.01"));
    }

    #[test]
    fn test_checked_mul_overflow_is_invalid_input() {
        let err = checked_mul("gross_pay", Decimal::MAX, dec("2")).unwrap_err();
        assert_eq!(err, EngineError::overflow("gross_pay"));
    }
}
