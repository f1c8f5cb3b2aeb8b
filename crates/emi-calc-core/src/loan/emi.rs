use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::annuity_payment;
use crate::types::{Money, Percent};

/// Annual percentage to monthly decimal rate divisor (12 months x 100).
const MONTHLY_RATE_DIVISOR: Decimal = dec!(1200);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline numbers shown next to the installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiSummary {
    pub emi: Money,
    pub total_amount: Money,
    pub total_interest: Money,
    pub principal_percentage: Percent,
    pub interest_percentage: Percent,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Monthly decimal rate for an annual percentage (8.5 -> 0.0070833...).
pub fn monthly_rate(annual_rate: Percent) -> Decimal {
    annual_rate / MONTHLY_RATE_DIVISOR
}

/// Fixed monthly installment on a reducing-balance loan.
///
/// emi = P * r * (1 + r)^n / ((1 + r)^n - 1) with r = annual_rate / 1200.
/// Any degenerate input (non-positive principal or rate, zero tenure, overflow)
/// yields zero rather than an error.
pub fn compute_emi(principal: Money, annual_rate: Percent, tenure_months: u32) -> Money {
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    annuity_payment(principal, monthly_rate(annual_rate), tenure_months).unwrap_or(Decimal::ZERO)
}

/// Installment plus nominal totals over the full tenure.
pub fn summarize_emi(principal: Money, annual_rate: Percent, tenure_months: u32) -> EmiSummary {
    let emi = compute_emi(principal, annual_rate, tenure_months);
    let total_amount = emi
        .checked_mul(Decimal::from(tenure_months))
        .unwrap_or(Decimal::ZERO);

    if emi.is_zero() || total_amount.is_zero() {
        return EmiSummary {
            emi: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            principal_percentage: Decimal::ZERO,
            interest_percentage: Decimal::ZERO,
        };
    }

    let total_interest = total_amount - principal;
    EmiSummary {
        emi,
        total_amount,
        total_interest,
        principal_percentage: principal / total_amount * dec!(100),
        interest_percentage: total_interest / total_amount * dec!(100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_home_loan_fixture() {
        // 25 lakh at 8.5% over 20 years
        let emi = compute_emi(dec!(2500000), dec!(8.5), 240);
        assert!(
            (emi - dec!(21695.5808341383)).abs() < dec!(0.000001),
            "Expected EMI ~21,695.58, got {}",
            emi
        );
    }

    #[test]
    fn test_emi_zero_rate_is_zero() {
        assert_eq!(compute_emi(dec!(100000), Decimal::ZERO, 12), Decimal::ZERO);
    }

    #[test]
    fn test_emi_negative_rate_is_zero() {
        assert_eq!(compute_emi(dec!(100000), dec!(-2), 12), Decimal::ZERO);
    }

    #[test]
    fn test_emi_zero_tenure_is_zero() {
        assert_eq!(compute_emi(dec!(100000), dec!(9), 0), Decimal::ZERO);
    }

    #[test]
    fn test_emi_non_positive_principal_is_zero() {
        assert_eq!(compute_emi(Decimal::ZERO, dec!(9), 12), Decimal::ZERO);
        assert_eq!(compute_emi(dec!(-5000), dec!(9), 12), Decimal::ZERO);
    }

    #[test]
    fn test_emi_overflow_is_zero() {
        // (1 + 5)^100_000 cannot be represented
        assert_eq!(compute_emi(dec!(100000), dec!(6000), 100_000), Decimal::ZERO);
    }

    #[test]
    fn test_summary_totals() {
        let s = summarize_emi(dec!(2500000), dec!(8.5), 240);
        assert_eq!(s.total_amount, s.emi * dec!(240));
        assert_eq!(s.total_interest, s.total_amount - dec!(2500000));
        assert!((s.principal_percentage + s.interest_percentage - dec!(100)).abs() < dec!(0.0000001));
        // Interest is a bit more than half the total on a 20-year loan at 8.5%
        assert!(s.interest_percentage > dec!(51) && s.interest_percentage < dec!(53));
    }

    #[test]
    fn test_summary_degenerate_is_all_zero() {
        let s = summarize_emi(dec!(100000), Decimal::ZERO, 120);
        assert_eq!(s.emi, Decimal::ZERO);
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.principal_percentage, Decimal::ZERO);
    }
}
