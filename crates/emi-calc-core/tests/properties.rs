use emi_calc_core::investment::maturity::calculate_investment;
use emi_calc_core::investment::scenarios::calculate_scenarios;
use emi_calc_core::investment::{goal, scheme::SchemeKind};
use emi_calc_core::loan::{amortization, emi};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Whole-rupee principals from ten thousand to five crore.
fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (10_000i64..=50_000_000).prop_map(Decimal::from)
}

/// Annual rates from 0.01% to 20% in basis-point steps.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=2_000).prop_map(|bp| Decimal::new(bp, 2))
}

fn scheme_strategy() -> impl Strategy<Value = SchemeKind> {
    prop::sample::select(SchemeKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_emi_times_tenure_covers_principal(
        principal in principal_strategy(),
        rate in rate_strategy(),
        months in 1u32..=360
    ) {
        let installment = emi::compute_emi(principal, rate, months);
        prop_assert!(installment > Decimal::ZERO);
        prop_assert!(installment * Decimal::from(months) >= principal);
    }

    #[test]
    fn test_schedule_retires_the_loan(
        principal in principal_strategy(),
        rate in rate_strategy(),
        months in 1u32..=360
    ) {
        let installment = emi::compute_emi(principal, rate, months);
        let rows: Vec<_> =
            amortization::build_amortization_schedule(principal, rate, months, installment, None)
                .collect();

        prop_assert_eq!(rows.len(), months as usize);
        let last = rows.last().unwrap();
        prop_assert!(last.balance < dec!(0.001), "final balance {}", last.balance);

        let paid: Decimal = rows.iter().map(|r| r.principal).sum();
        prop_assert!((paid - principal).abs() < dec!(0.001), "repaid {} of {}", paid, principal);
    }

    #[test]
    fn test_scenarios_never_cross(
        kind in scheme_strategy(),
        amount in (1_000i64..=1_000_000).prop_map(Decimal::from),
        years in 1u32..=40,
        monthly in any::<bool>()
    ) {
        let scheme = kind.scheme();
        let set = calculate_scenarios(scheme, amount, scheme.clamp_tenure(years), monthly);
        prop_assert!(set.conservative.maturity_amount <= set.realistic.maturity_amount);
        prop_assert!(set.realistic.maturity_amount <= set.optimistic.maturity_amount);
        prop_assert!(set.conservative.maturity_amount >= set.conservative.total_invested);
    }

    #[test]
    fn test_required_investment_reaches_target(
        kind in scheme_strategy(),
        target in (10_000i64..=10_000_000).prop_map(Decimal::from),
        years in 1u32..=40
    ) {
        let scheme = kind.scheme();
        let tenure = scheme.clamp_tenure(years);
        let required = goal::calculate_required_investment(scheme, target, tenure, None);
        let reached =
            calculate_investment(kind, required, scheme.default_rate, tenure, false).maturity_amount;
        let rel = ((reached - target) / target).abs();
        prop_assert!(rel < dec!(0.000001), "{}: {} vs {}", kind, reached, target);
    }
}
