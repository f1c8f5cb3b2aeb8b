use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::investment::maturity::FD_COMPOUNDING_PER_YEAR;
use crate::investment::scheme::{FormulaFamily, InvestmentScheme};
use crate::time_value::{discount, growth_factor};
use crate::types::{Money, Percent};

/// Contribution needed to reach `target` at maturity.
///
/// Inverts the scheme's maturity formula: the lump sum for a fixed deposit,
/// the monthly deposit for a recurring deposit, the yearly contribution for
/// annual schemes. `rate` defaults to the scheme's default rate. Any
/// degenerate divisor gives zero.
pub fn calculate_required_investment(
    scheme: &InvestmentScheme,
    target: Money,
    tenure_years: u32,
    rate: Option<Percent>,
) -> Money {
    let rate = rate.unwrap_or(scheme.default_rate);

    let required = match scheme.kind.formula() {
        FormulaFamily::LumpSum => discount(
            target,
            rate / dec!(400),
            FD_COMPOUNDING_PER_YEAR.saturating_mul(tenure_years),
        ),
        FormulaFamily::MonthlyDeposit => required_monthly_deposit(target, rate, tenure_years),
        FormulaFamily::AnnualContribution => {
            annual_fv_factor(rate, tenure_years).and_then(|f| target.checked_div(f))
        }
    };

    required.unwrap_or(Decimal::ZERO)
}

fn required_monthly_deposit(target: Money, rate: Percent, tenure_years: u32) -> Option<Money> {
    let months = tenure_years.saturating_mul(12);
    let r = rate / dec!(1200);
    if r <= Decimal::ZERO {
        return target.checked_div(Decimal::from(months));
    }
    let factor = growth_factor(r, months)?;
    let denom = factor
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE.checked_add(r)?)?;
    target.checked_mul(r)?.checked_div(denom)
}

/// Maturity of one rupee contributed at the start of every year:
/// sum over y of (1 + rate/100)^(years - y + 1). Same factor the forward
/// annual-contribution formula multiplies by.
fn annual_fv_factor(rate: Percent, tenure_years: u32) -> Option<Decimal> {
    let annual_rate = rate / dec!(100);
    (1..=tenure_years).try_fold(Decimal::ZERO, |acc, year| {
        acc.checked_add(growth_factor(annual_rate, tenure_years - year + 1)?)
    })
}
