use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::emi::compute_emi;
use crate::types::{Money, Percent};

/// Percentage points either side of the quoted rate.
pub const DEFAULT_RATE_SHIFT: Percent = dec!(0.5);

/// One loan priced at a single rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate: Percent,
    pub emi: Money,
    pub total_amount: Money,
}

/// The quoted loan next to the same loan at a lower and a higher rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub base: RateQuote,
    pub lower: RateQuote,
    pub higher: RateQuote,
    /// Monthly saving at the lower rate (base EMI minus lower EMI)
    pub lower_emi_saving: Money,
    /// Monthly extra cost at the higher rate
    pub higher_emi_cost: Money,
    pub lower_total_saving: Money,
    pub higher_total_cost: Money,
}

fn quote(principal: Money, rate: Percent, tenure_months: u32) -> RateQuote {
    let emi = compute_emi(principal, rate, tenure_months);
    RateQuote {
        rate,
        emi,
        total_amount: emi
            .checked_mul(Decimal::from(tenure_months))
            .unwrap_or(Decimal::ZERO),
    }
}

/// Price the loan at `annual_rate - shift` and `annual_rate + shift`.
///
/// Each quote is computed independently with the standard EMI formula, so a
/// shifted rate at or below zero simply quotes a zero EMI.
pub fn compare_rates(
    principal: Money,
    annual_rate: Percent,
    tenure_months: u32,
    shift: Percent,
) -> RateComparison {
    let base = quote(principal, annual_rate, tenure_months);
    let lower = quote(principal, annual_rate - shift, tenure_months);
    let higher = quote(principal, annual_rate + shift, tenure_months);

    RateComparison {
        lower_emi_saving: base.emi - lower.emi,
        higher_emi_cost: higher.emi - base.emi,
        lower_total_saving: base.total_amount - lower.total_amount,
        higher_total_cost: higher.total_amount - base.total_amount,
        base,
        lower,
        higher,
    }
}
