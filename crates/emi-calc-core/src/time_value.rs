use rust_decimal::Decimal;

use crate::types::Money;

/// Compound growth factor (1 + rate)^n.
///
/// Uses exponentiation by squaring with checked multiplication, so the cost is
/// logarithmic in `n` and an overflow comes back as `None` instead of a panic.
pub fn growth_factor(rate: Decimal, n: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut result = Decimal::ONE;
    let mut exp = n;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }

    Some(result)
}

/// Level payment that amortises `principal` over `n` periods at `rate` per period.
///
/// `None` when the rate is not positive or any step overflows.
pub fn annuity_payment(principal: Money, rate: Decimal, n: u32) -> Option<Money> {
    if rate <= Decimal::ZERO || n == 0 {
        return None;
    }
    let factor = growth_factor(rate, n)?;
    let denom = factor.checked_sub(Decimal::ONE)?;
    if denom <= Decimal::ZERO {
        return None;
    }
    principal
        .checked_mul(rate)?
        .checked_mul(factor)?
        .checked_div(denom)
}

/// Future value of `n` payments made at the start of each period (annuity due).
pub fn annuity_due_future_value(payment: Money, rate: Decimal, n: u32) -> Option<Money> {
    if rate.is_zero() {
        return None;
    }
    let factor = growth_factor(rate, n)?;
    payment
        .checked_mul(factor.checked_sub(Decimal::ONE)?)?
        .checked_div(rate)?
        .checked_mul(Decimal::ONE.checked_add(rate)?)
}

/// Present value of `amount` received `n` periods from now.
pub fn discount(amount: Money, rate: Decimal, n: u32) -> Option<Money> {
    let factor = growth_factor(rate, n)?;
    amount.checked_div(factor)
}
