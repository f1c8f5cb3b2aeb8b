use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::investment::scheme::{FormulaFamily, SchemeKind};
use crate::time_value::{annuity_due_future_value, growth_factor};
use crate::types::{Money, Percent};

/// Fixed deposits compound quarterly.
pub const FD_COMPOUNDING_PER_YEAR: u32 = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Projection for one scheme at one rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub maturity_amount: Money,
    pub total_invested: Money,
    /// Always maturity_amount - total_invested
    pub total_gain: Money,
    /// Annual rate (percent) the projection was run at
    pub effective_annual_rate: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_gain: Option<Money>,
}

impl CalculationResult {
    fn new(maturity_amount: Money, total_invested: Money, rate: Percent) -> Self {
        CalculationResult {
            maturity_amount,
            total_invested,
            total_gain: maturity_amount
                .checked_sub(total_invested)
                .unwrap_or(Decimal::ZERO),
            effective_annual_rate: rate,
            monthly_gain: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-scheme formulas
// ---------------------------------------------------------------------------

/// Lump sum with quarterly compounding: P * (1 + rate/400)^(4 * years).
pub fn calculate_fd(principal: Money, rate: Percent, tenure_years: u32) -> CalculationResult {
    let periods = FD_COMPOUNDING_PER_YEAR.saturating_mul(tenure_years);
    let per_period = rate / (dec!(100) * Decimal::from(FD_COMPOUNDING_PER_YEAR));
    let maturity = growth_factor(per_period, periods)
        .and_then(|f| principal.checked_mul(f))
        .unwrap_or(Decimal::ZERO);
    CalculationResult::new(maturity, principal, rate)
}

/// Monthly deposits compounded monthly, each deposit earning from its own month.
///
/// A non-positive rate has no growth: maturity equals the amount deposited.
pub fn calculate_rd(monthly_amount: Money, rate: Percent, tenure_years: u32) -> CalculationResult {
    let months = tenure_years.saturating_mul(12);
    let invested = monthly_amount
        .checked_mul(Decimal::from(months))
        .unwrap_or(Decimal::ZERO);

    let monthly_rate = rate / dec!(1200);
    let maturity = if monthly_rate <= Decimal::ZERO {
        invested
    } else {
        annuity_due_future_value(monthly_amount, monthly_rate, months).unwrap_or(Decimal::ZERO)
    };

    let mut result = CalculationResult::new(maturity, invested, rate);
    result.monthly_gain = Some(if months == 0 {
        Decimal::ZERO
    } else {
        result.total_gain / Decimal::from(months)
    });
    result
}

/// Yearly contributions at the start of each year: sum of A * (1 + rate/100)^(years - y + 1).
pub fn calculate_annual_contribution(
    annual_amount: Money,
    rate: Percent,
    tenure_years: u32,
) -> CalculationResult {
    let annual_rate = rate / dec!(100);
    let invested = annual_amount
        .checked_mul(Decimal::from(tenure_years))
        .unwrap_or(Decimal::ZERO);

    let maturity = (1..=tenure_years)
        .try_fold(Decimal::ZERO, |acc, year| {
            let grown = growth_factor(annual_rate, tenure_years - year + 1)?;
            acc.checked_add(annual_amount.checked_mul(grown)?)
        })
        .unwrap_or(Decimal::ZERO);

    CalculationResult::new(maturity, invested, rate)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Project one scheme at one rate.
///
/// For annual-contribution schemes a monthly amount is converted to a yearly
/// one by multiplying by 12 before the yearly formula is applied; fixed and
/// recurring deposits take `amount` as-is regardless of `is_monthly`.
pub fn calculate_investment(
    kind: SchemeKind,
    amount: Money,
    rate: Percent,
    tenure_years: u32,
    is_monthly: bool,
) -> CalculationResult {
    match kind.formula() {
        FormulaFamily::LumpSum => calculate_fd(amount, rate, tenure_years),
        FormulaFamily::MonthlyDeposit => calculate_rd(amount, rate, tenure_years),
        FormulaFamily::AnnualContribution => {
            let yearly = if is_monthly {
                amount.checked_mul(dec!(12)).unwrap_or(Decimal::ZERO)
            } else {
                amount
            };
            calculate_annual_contribution(yearly, rate, tenure_years)
        }
    }
}
