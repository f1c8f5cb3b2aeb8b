use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::discount;
use crate::types::{Money, Percent};

/// Long-run inflation assumption used when the caller gives none.
pub const DEFAULT_INFLATION_RATE: Percent = dec!(6);

/// What a future amount is worth in today's money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationImpact {
    pub real_value: Money,
    pub inflation_loss: Money,
    pub inflation_rate: Percent,
}

/// Deflate `future_amount` over `years` at `inflation_rate` percent per year.
pub fn calculate_inflation_impact(
    future_amount: Money,
    years: u32,
    inflation_rate: Option<Percent>,
) -> InflationImpact {
    let inflation_rate = inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE);
    let real_value =
        discount(future_amount, inflation_rate / dec!(100), years).unwrap_or(Decimal::ZERO);

    InflationImpact {
        real_value,
        inflation_loss: future_amount
            .checked_sub(real_value)
            .unwrap_or(Decimal::ZERO),
        inflation_rate,
    }
}
