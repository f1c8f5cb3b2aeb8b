use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::investment::maturity::{calculate_investment, CalculationResult};
use crate::investment::scheme::InvestmentScheme;
use crate::types::{Money, Percent};

/// Share of the min->default gap added to the minimum rate.
const CONSERVATIVE_BLEND: Decimal = dec!(0.3);
/// Share of the default->max gap added to the default rate.
const OPTIMISTIC_BLEND: Decimal = dec!(0.7);

/// The same investment projected at three rates inside the scheme band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub conservative: CalculationResult,
    pub realistic: CalculationResult,
    pub optimistic: CalculationResult,
}

/// Conservative, realistic and optimistic rates for a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRates {
    pub conservative: Percent,
    pub realistic: Percent,
    pub optimistic: Percent,
}

pub fn scenario_rates(scheme: &InvestmentScheme) -> ScenarioRates {
    ScenarioRates {
        conservative: scheme.min_rate + (scheme.default_rate - scheme.min_rate) * CONSERVATIVE_BLEND,
        realistic: scheme.default_rate,
        optimistic: scheme.default_rate + (scheme.max_rate - scheme.default_rate) * OPTIMISTIC_BLEND,
    }
}

/// Run the scheme's maturity formula once per scenario rate.
pub fn calculate_scenarios(
    scheme: &InvestmentScheme,
    amount: Money,
    tenure_years: u32,
    is_monthly: bool,
) -> ScenarioSet {
    let rates = scenario_rates(scheme);
    let run = |rate| calculate_investment(scheme.kind, amount, rate, tenure_years, is_monthly);

    ScenarioSet {
        conservative: run(rates.conservative),
        realistic: run(rates.realistic),
        optimistic: run(rates.optimistic),
    }
}
