use emi_calc_core::format::format_inr;
use emi_calc_core::loan::{amortization, analysis, comparison, emi};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI formula tests
// ===========================================================================

#[test]
fn test_home_loan_regression_fixture() {
    // 25 lakh, 8.5%, 20 years: the calculator's default screen
    let value = emi::compute_emi(dec!(2_500_000), dec!(8.5), 240);
    assert!(
        (value - dec!(21695.580834138346)).abs() < dec!(0.0000001),
        "Expected EMI 21,695.58, got {}",
        value
    );
    assert_eq!(format_inr(value), "₹21,696");
}

#[test]
fn test_emi_covers_principal_when_rate_positive() {
    for (p, rate, n) in [
        (dec!(100_000), dec!(0.1), 12u32),
        (dec!(750_000), dec!(7.25), 84),
        (dec!(5_000_000), dec!(11), 360),
    ] {
        let value = emi::compute_emi(p, rate, n);
        assert!(value * Decimal::from(n) >= p, "emi {} x {} < {}", value, n, p);
    }
}

#[test]
fn test_single_month_loan_repays_with_one_month_interest() {
    let value = emi::compute_emi(dec!(120_000), dec!(12), 1);
    assert_eq!(value, dec!(121_200));
}

// ===========================================================================
// Amortization tests
// ===========================================================================

#[test]
fn test_schedule_principal_sums_to_loan() {
    let principal = dec!(2_500_000);
    let installment = emi::compute_emi(principal, dec!(8.5), 240);
    let rows: Vec<_> =
        amortization::build_amortization_schedule(principal, dec!(8.5), 240, installment, None)
            .collect();

    assert_eq!(rows.len(), 240);
    assert_eq!(rows.first().unwrap().month, 1);
    assert_eq!(rows.last().unwrap().month, 240);
    assert_eq!(rows.last().unwrap().year, 20);

    let paid: Decimal = rows.iter().map(|r| r.principal).sum();
    assert!((paid - principal).abs() < dec!(0.0001));
    assert!(rows.last().unwrap().balance < dec!(0.0001));
}

#[test]
fn test_cumulative_interest_is_running_sum() {
    let installment = emi::compute_emi(dec!(600_000), dec!(9.5), 60);
    let rows: Vec<_> =
        amortization::build_amortization_schedule(dec!(600_000), dec!(9.5), 60, installment, None)
            .collect();
    let mut running = Decimal::ZERO;
    for row in &rows {
        running += row.interest;
        assert_eq!(row.cumulative_interest, running);
        assert_eq!(row.emi, installment);
        assert!((row.principal + row.interest - installment).abs() < dec!(0.0000000001));
    }
}

#[test]
fn test_schedule_is_lazy() {
    let installment = emi::compute_emi(dec!(2_500_000), dec!(8.5), 240);
    let mut schedule =
        amortization::build_amortization_schedule(dec!(2_500_000), dec!(8.5), 240, installment, None);
    assert_eq!(schedule.size_hint(), (0, Some(240)));
    let first_three: Vec<_> = schedule.by_ref().take(3).collect();
    assert_eq!(first_three.len(), 3);
    assert_eq!(schedule.next().unwrap().month, 4);
}

#[test]
fn test_prepayment_in_final_year_stops_schedule_early() {
    let principal = dec!(1_000_000);
    let installment = emi::compute_emi(principal, dec!(10), 60);
    let pre = amortization::Prepayment {
        amount: dec!(400_000),
        after_year: 4,
    };
    let rows: Vec<_> =
        amortization::build_amortization_schedule(principal, dec!(10), 60, installment, Some(pre))
            .collect();
    // Remaining balance at month 48 is below 400k, so the loan closes there
    assert_eq!(rows.len(), 48);
    assert_eq!(rows[47].prepayment, dec!(400_000));
    assert_eq!(rows[47].balance, Decimal::ZERO);
}

// ===========================================================================
// Comparison and analysis tests
// ===========================================================================

#[test]
fn test_comparison_brackets_base() {
    let cmp = comparison::compare_rates(
        dec!(2_500_000),
        dec!(8.5),
        240,
        comparison::DEFAULT_RATE_SHIFT,
    );
    assert!(cmp.lower.total_amount < cmp.base.total_amount);
    assert!(cmp.higher.total_amount > cmp.base.total_amount);
    assert!(cmp.higher_emi_cost > cmp.lower_emi_saving);
}

#[test]
fn test_analysis_envelope() {
    let input = analysis::LoanInput {
        principal: dec!(2_500_000),
        annual_rate: dec!(8.5),
        tenure_months: 240,
        prepayment: Some(amortization::Prepayment {
            amount: dec!(300_000),
            after_year: 5,
        }),
        rate_shift: None,
    };
    let out = analysis::analyze_loan(&input);
    assert_eq!(
        out.methodology,
        "Reducing-balance EMI with monthly amortization"
    );
    assert_eq!(out.assumptions["schedule_cap_months"], 360);
    assert!(out.result.months_to_payoff < 240);
    assert!(out.result.interest_saved.unwrap() > dec!(100_000));

    let json = serde_json::to_value(&out).unwrap();
    assert!(json["result"]["schedule"].as_array().unwrap().len() < 240);
    assert!(json["result"]["summary"]["emi"].is_string());
}
