//! Display helpers for rupee amounts, rates and the shareable result summary.

use rust_decimal::RoundingStrategy;

use crate::types::{Money, Percent};

/// Format as Indian rupees with lakh/crore grouping and no paise.
///
/// `2500000.4` -> `₹25,00,000`; halves round away from zero.
pub fn format_inr(amount: Money) -> String {
    let grouped = format_indian_number(amount);
    match grouped.strip_prefix('-') {
        Some(digits) => format!("-₹{digits}"),
        None => format!("₹{grouped}"),
    }
}

/// Plain Indian digit grouping without the currency symbol.
pub fn format_indian_number(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_indian(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// One decimal place and a trailing percent sign: `8.5%`, `6.0%`.
///
/// Rounds the exact decimal half away from zero, so the FD conservative rate
/// 4.05 shows as `4.1%` (a binary-float `toFixed(1)` would print `4.0%`).
pub fn format_percentage(rate: Percent) -> String {
    let mut rounded = rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{rounded}%")
}

// Last three digits, then pairs: 12345678 -> 1,23,45,678
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(feature = "investment")]
pub use share::generate_share_text;

#[cfg(feature = "investment")]
mod share {
    use super::{format_inr, format_percentage};
    use crate::investment::maturity::CalculationResult;
    use crate::investment::scheme::InvestmentScheme;
    use crate::types::Money;

    /// Plain-text summary for sharing over messaging apps.
    pub fn generate_share_text(
        scheme: &InvestmentScheme,
        result: &CalculationResult,
        amount: Money,
        tenure_years: u32,
        is_monthly: bool,
    ) -> String {
        let frequency = if is_monthly { "मासिक" } else { "सालाना" };

        format!(
            "🌾 निवेश कैलकुलेटर\n\
             📊 योजना: {scheme_name}\n\
             💰 राशि: {amount} ({frequency})\n\
             📅 समय: {tenure_years} साल\n\
             📈 मिलेगा: {maturity}\n\
             💡 कुल फायदा: {gain}\n\
             🎯 सालाना फायदा: ~{rate}\n\
             \n\
             कुल निवेश: {invested}\n\
             कुल रिटर्न: {maturity}\n\
             \n\
             💡 EMI Calculator Pro से बनाया गया",
            scheme_name = scheme.hindi_name,
            amount = format_inr(amount),
            maturity = format_inr(result.maturity_amount),
            gain = format_inr(result.total_gain),
            rate = format_percentage(result.effective_annual_rate),
            invested = format_inr(result.total_invested),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_inr_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(21695.58)), "₹21,696");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(2500000)), "₹25,00,000");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789");
    }

    #[test]
    fn test_inr_rounding_and_sign() {
        assert_eq!(format_inr(dec!(1499.5)), "₹1,500");
        assert_eq!(format_inr(dec!(1499.49)), "₹1,499");
        assert_eq!(format_inr(dec!(-50548.37)), "-₹50,548");
        assert_eq!(format_inr(dec!(-0.4)), "₹0");
    }

    #[test]
    fn test_indian_number() {
        assert_eq!(format_indian_number(dec!(1234567)), "12,34,567");
        assert_eq!(format_indian_number(dec!(-1234)), "-1,234");
    }

    #[test]
    fn test_percentage_one_decimal() {
        assert_eq!(format_percentage(dec!(8.5)), "8.5%");
        assert_eq!(format_percentage(dec!(6)), "6.0%");
        assert_eq!(format_percentage(dec!(8.25)), "8.3%");
    }

    #[test]
    fn test_percentage_midpoint_rounds_up_exactly() {
        // Scenario rates land on exact .x5 midpoints
        assert_eq!(format_percentage(dec!(4.05)), "4.1%");
        assert_eq!(format_percentage(dec!(4.45)), "4.5%");
        assert_eq!(format_percentage(dec!(-4.05)), "-4.1%");
        assert_eq!(format_percentage(dec!(4.0499)), "4.0%");
    }

    #[cfg(feature = "investment")]
    #[test]
    fn test_share_text_template() {
        use crate::investment::maturity::calculate_fd;
        use crate::investment::scheme::SchemeKind;

        let result = calculate_fd(dec!(100000), dec!(6.5), 5);
        let text = generate_share_text(SchemeKind::Fd.scheme(), &result, dec!(100000), 5, false);
        let expected = "🌾 निवेश कैलकुलेटर\n\
                        📊 योजना: फिक्स्ड डिपॉजिट\n\
                        💰 राशि: ₹1,00,000 (सालाना)\n\
                        📅 समय: 5 साल\n\
                        📈 मिलेगा: ₹1,38,042\n\
                        💡 कुल फायदा: ₹38,042\n\
                        🎯 सालाना फायदा: ~6.5%\n\
                        \n\
                        कुल निवेश: ₹1,00,000\n\
                        कुल रिटर्न: ₹1,38,042\n\
                        \n\
                        💡 EMI Calculator Pro से बनाया गया";
        assert_eq!(text, expected);
    }
}
