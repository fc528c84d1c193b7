//! Net pay calculation.

use rust_decimal::Decimal;

use super::rounding::{checked_sub, round_currency};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning};

/// Warning code raised when deductions and taxes exceed gross pay.
pub const NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// The result of a net pay calculation.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Gross pay minus taxes and deductions, unrounded. May be negative.
    pub net_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when the net pay is below zero.
    pub warning: Option<AuditWarning>,
}

/// Subtracts taxes and deductions from gross pay.
///
/// A negative result is returned as-is and flagged with a
/// [`NEGATIVE_NET_PAY`] warning.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_net_pay;
/// use rust_decimal::Decimal;
///
/// let result = calculate_net_pay(
///     Decimal::new(3200, 0),
///     Decimal::new(11088, 1),
///     Decimal::new(50, 0),
///     5,
/// ).unwrap();
/// assert_eq!(result.net_pay, Decimal::new(20412, 1));
/// assert!(result.warning.is_none());
/// ```
pub fn calculate_net_pay(
    gross_pay: Decimal,
    total_taxes: Decimal,
    deductions_total: Decimal,
    step_number: u32,
) -> EngineResult<NetPayResult> {
    let after_tax = checked_sub("net_pay", gross_pay, total_taxes)?;
    let net_pay = checked_sub("net_pay", after_tax, deductions_total)?;

    let warning = (round_currency(net_pay) < Decimal::ZERO).then(|| AuditWarning {
        code: NEGATIVE_NET_PAY.to_string(),
        message: format!(
            "Taxes and deductions exceed gross pay ${}; net pay is ${}",
            round_currency(gross_pay),
            round_currency(net_pay)
        ),
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "total_taxes": total_taxes.to_string(),
            "deductions_total": deductions_total.to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "${} gross - ${} taxes - ${} deductions = ${}",
            gross_pay, total_taxes, deductions_total, net_pay
        ),
    };

    Ok(NetPayResult {
        net_pay,
        audit_step,
        warning,
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
    fn test_reference_net_pay() {
        let result = calculate_net_pay(dec("3200"), dec("1108.8"), Decimal::ZERO, 5).unwrap();
        assert_eq!(result.net_pay, dec("2091.2"));
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_negative_net_is_not_clamped() {
        let result = calculate_net_pay(dec("100"), dec("34.65"), dec("500"), 5).unwrap();
        assert_eq!(result.net_pay, dec("-434.65"));
        let warning = result.warning.unwrap();
        assert_eq!(warning.code, NEGATIVE_NET_PAY);
        assert!(warning.message.contains("-434.65"));
    }

    #[test]
    fn test_zero_net_has_no_warning() {
        let result = calculate_net_pay(dec("100"), dec("50"), dec("50"), 5).unwrap();
        assert_eq!(result.net_pay, Decimal::ZERO);
        assert!(result.warning.is_none());
    }
}
