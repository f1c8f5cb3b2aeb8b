use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use emi_calc_core::investment::scheme::{SchemeKind, SCHEMES};
use emi_calc_core::investment::{goal, inflation, maturity, plan, scenarios};
use emi_calc_core::loan::{amortization, analysis, comparison, emi};
use emi_calc_core::{format, EmiCalcError, Money, Percent};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<'a, T: Deserialize<'a>>(input_json: &'a str) -> NapiResult<T> {
    serde_json::from_str(input_json)
        .map_err(EmiCalcError::from)
        .map_err(to_napi_error)
}

fn to_json(value: &impl serde::Serialize) -> NapiResult<String> {
    serde_json::to_string(value)
        .map_err(EmiCalcError::from)
        .map_err(to_napi_error)
}

#[derive(Deserialize)]
struct SchemeAmountRequest {
    scheme: SchemeKind,
    amount: Money,
    tenure_years: u32,
    #[serde(default)]
    rate: Option<Percent>,
    #[serde(default)]
    is_monthly: bool,
}

#[derive(Deserialize)]
struct GoalRequest {
    scheme: SchemeKind,
    target_amount: Money,
    tenure_years: u32,
    #[serde(default)]
    rate: Option<Percent>,
}

#[derive(Deserialize)]
struct InflationRequest {
    amount: Money,
    years: u32,
    #[serde(default)]
    inflation_rate: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: analysis::LoanInput = parse(&input_json)?;
    to_json(&emi::summarize_emi(
        input.principal,
        input.annual_rate,
        input.tenure_months,
    ))
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: analysis::LoanInput = parse(&input_json)?;
    let installment = emi::compute_emi(input.principal, input.annual_rate, input.tenure_months);
    let rows: Vec<_> = amortization::build_amortization_schedule(
        input.principal,
        input.annual_rate,
        input.tenure_months,
        installment,
        input.prepayment,
    )
    .collect();
    to_json(&rows)
}

#[napi]
pub fn compare_loan_rates(input_json: String) -> NapiResult<String> {
    let input: analysis::LoanInput = parse(&input_json)?;
    to_json(&comparison::compare_rates(
        input.principal,
        input.annual_rate,
        input.tenure_months,
        input.rate_shift.unwrap_or(comparison::DEFAULT_RATE_SHIFT),
    ))
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input: analysis::LoanInput = parse(&input_json)?;
    to_json(&analysis::analyze_loan(&input))
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

#[napi]
pub fn list_schemes() -> NapiResult<String> {
    to_json(&SCHEMES)
}

#[napi]
pub fn calculate_investment(input_json: String) -> NapiResult<String> {
    let req: SchemeAmountRequest = parse(&input_json)?;
    let rate = req.rate.unwrap_or(req.scheme.scheme().default_rate);
    to_json(&maturity::calculate_investment(
        req.scheme,
        req.amount,
        rate,
        req.tenure_years,
        req.is_monthly,
    ))
}

#[napi]
pub fn calculate_scenarios(input_json: String) -> NapiResult<String> {
    let req: SchemeAmountRequest = parse(&input_json)?;
    to_json(&scenarios::calculate_scenarios(
        req.scheme.scheme(),
        req.amount,
        req.tenure_years,
        req.is_monthly,
    ))
}

#[napi]
pub fn required_investment(input_json: String) -> NapiResult<String> {
    let req: GoalRequest = parse(&input_json)?;
    let required = goal::calculate_required_investment(
        req.scheme.scheme(),
        req.target_amount,
        req.tenure_years,
        req.rate,
    );
    to_json(&required)
}

#[napi]
pub fn inflation_impact(input_json: String) -> NapiResult<String> {
    let req: InflationRequest = parse(&input_json)?;
    to_json(&inflation::calculate_inflation_impact(
        req.amount,
        req.years,
        req.inflation_rate,
    ))
}

#[napi]
pub fn plan_investment(input_json: String) -> NapiResult<String> {
    let input: plan::InvestmentInput = parse(&input_json)?;
    to_json(&plan::plan_investment(&input))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// `amount` is a decimal string such as "2500000.40".
#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let value: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(format::format_inr(value))
}

/// Share text for a projection at the scheme's default (or given) rate.
#[napi]
pub fn share_text(input_json: String) -> NapiResult<String> {
    let req: SchemeAmountRequest = parse(&input_json)?;
    let scheme = req.scheme.scheme();
    let result = maturity::calculate_investment(
        req.scheme,
        req.amount,
        req.rate.unwrap_or(scheme.default_rate),
        req.tenure_years,
        req.is_monthly,
    );
    Ok(format::generate_share_text(
        scheme,
        &result,
        req.amount,
        req.tenure_years,
        req.is_monthly,
    ))
}
