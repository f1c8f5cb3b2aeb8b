use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use emi_calc_core::format::format_inr;
use emi_calc_core::investment::plan::{self, CalculationMode, InvestmentInput};
use emi_calc_core::investment::scheme::{FormulaFamily, SchemeKind, SCHEMES};
use emi_calc_core::investment::{goal, inflation, maturity, scenarios};
use emi_calc_core::{EmiCalcError, Money, Percent};

use crate::config::CalculatorConfig;
use crate::input;

fn parse_scheme(s: &str) -> Result<SchemeKind, String> {
    s.parse().map_err(|e: EmiCalcError| e.to_string())
}

/// How `plan` reads --amount
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanMode {
    /// Lump sum, or the scheme's yearly contribution
    Amount,
    /// Paid every month
    Monthly,
    /// Solve for the contribution that reaches --target
    Target,
}

impl From<PlanMode> for CalculationMode {
    fn from(mode: PlanMode) -> Self {
        match mode {
            PlanMode::Amount => CalculationMode::Amount,
            PlanMode::Monthly => CalculationMode::Monthly,
            PlanMode::Target => CalculationMode::Target,
        }
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Scheme, amount and tenure shared by `invest` and `scenarios`
#[derive(Args)]
pub struct SchemeAmountArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Scheme id: fd, rd, ppf or insurance
    #[arg(long, value_parser = parse_scheme)]
    pub scheme: Option<SchemeKind>,

    /// Amount in rupees (lump sum, monthly deposit or yearly contribution)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Amount is paid monthly (PPF and insurance scale it to a yearly figure)
    #[arg(long)]
    pub monthly: bool,
}

/// Arguments for a single maturity projection
#[derive(Args)]
pub struct InvestArgs {
    #[command(flatten)]
    pub common: SchemeAmountArgs,

    /// Annual rate in percent (defaults to the scheme's default rate)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

/// Arguments for the three-scenario projection
#[derive(Args)]
pub struct ScenariosArgs {
    #[command(flatten)]
    pub common: SchemeAmountArgs,
}

/// Arguments for the goal solver
#[derive(Args)]
pub struct RequiredInvestmentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Scheme id: fd, rd, ppf or insurance
    #[arg(long, value_parser = parse_scheme)]
    pub scheme: Option<SchemeKind>,

    /// Maturity amount to reach, in rupees
    #[arg(long, alias = "target")]
    pub target_amount: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Annual rate in percent (defaults to the scheme's default rate)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

/// Arguments for the inflation adjustment
#[derive(Args)]
pub struct InflationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Future amount in rupees
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Years until the amount is received
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual inflation in percent (defaults to config inflation_rate)
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,
}

/// Arguments for the full investment plan
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Scheme id: fd, rd, ppf or insurance
    #[arg(long, value_parser = parse_scheme)]
    pub scheme: Option<SchemeKind>,

    #[arg(long, value_enum, default_value = "amount")]
    pub mode: PlanMode,

    /// Amount in rupees (ignored in target mode)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Target maturity amount for target mode
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Tenure in years (clamped to the scheme's limits)
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Custom annual rate in percent (clamped to the scheme's band)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Add the inflation-adjusted value of the realistic maturity
    #[arg(long)]
    pub include_inflation: bool,

    /// Annual inflation in percent (defaults to config inflation_rate)
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// JSON request shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SchemeAmountRequest {
    scheme: SchemeKind,
    amount: Money,
    tenure_years: u32,
    #[serde(default)]
    rate: Option<Percent>,
    #[serde(default)]
    is_monthly: bool,
}

#[derive(Debug, Deserialize)]
struct GoalRequest {
    scheme: SchemeKind,
    target_amount: Money,
    tenure_years: u32,
    #[serde(default)]
    rate: Option<Percent>,
}

#[derive(Debug, Deserialize)]
struct InflationRequest {
    amount: Money,
    years: u32,
    #[serde(default)]
    inflation_rate: Option<Percent>,
}

fn read_scheme_amount(
    args: &SchemeAmountArgs,
    rate: Option<Decimal>,
) -> Result<SchemeAmountRequest, Box<dyn std::error::Error>> {
    if let Some(request) = input::read_input(args.input.as_deref())? {
        return Ok(request);
    }

    Ok(SchemeAmountRequest {
        scheme: args.scheme.ok_or("--scheme is required (or provide --input)")?,
        amount: args.amount.ok_or("--amount is required (or provide --input)")?,
        tenure_years: args
            .tenure_years
            .ok_or("--tenure-years is required (or provide --input)")?,
        rate,
        is_monthly: args.monthly,
    })
}

fn with_display(mut value: Value, key: &str, amount: Money) -> Value {
    if let Value::Object(ref mut map) = value {
        map.insert(key.into(), Value::String(format_inr(amount)));
    }
    value
}

// ---------------------------------------------------------------------------
// Runners
// ---------------------------------------------------------------------------

pub fn run_schemes() -> Result<Value, Box<dyn std::error::Error>> {
    let mut rows = Vec::with_capacity(SCHEMES.len());
    for scheme in &SCHEMES {
        let rates = scenarios::scenario_rates(scheme);
        let mut row = serde_json::to_value(scheme)?;
        if let Value::Object(ref mut map) = row {
            map.insert("conservative_rate".into(), json!(rates.conservative));
            map.insert("optimistic_rate".into(), json!(rates.optimistic));
        }
        rows.push(row);
    }
    Ok(Value::Array(rows))
}

pub fn run_invest(args: InvestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_scheme_amount(&args.common, args.rate)?;
    let scheme = request.scheme.scheme();
    let rate = request.rate.unwrap_or(scheme.default_rate);

    if !scheme.rate_in_bounds(rate) {
        tracing::warn!(scheme = scheme.id, %rate, "rate outside the scheme band");
    }
    if !scheme.tenure_in_bounds(request.tenure_years) {
        tracing::warn!(scheme = scheme.id, tenure_years = request.tenure_years, "tenure outside the scheme limits");
    }

    let result = maturity::calculate_investment(
        request.scheme,
        request.amount,
        rate,
        request.tenure_years,
        request.is_monthly,
    );
    let maturity = result.maturity_amount;
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(ref mut map) = value {
        map.insert("scheme".into(), json!(request.scheme));
    }
    Ok(with_display(value, "maturity_display", maturity))
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_scheme_amount(&args.common, None)?;
    let set = scenarios::calculate_scenarios(
        request.scheme.scheme(),
        request.amount,
        request.tenure_years,
        request.is_monthly,
    );
    Ok(serde_json::to_value(set)?)
}

pub fn run_required_investment(
    args: RequiredInvestmentArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: GoalRequest = match input::read_input(args.input.as_deref())? {
        Some(request) => request,
        None => GoalRequest {
            scheme: args.scheme.ok_or("--scheme is required (or provide --input)")?,
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            rate: args.rate,
        },
    };

    let scheme = request.scheme.scheme();
    let required = goal::calculate_required_investment(
        scheme,
        request.target_amount,
        request.tenure_years,
        request.rate,
    );
    let contribution = match request.scheme.formula() {
        FormulaFamily::LumpSum => "lump_sum",
        FormulaFamily::MonthlyDeposit => "monthly",
        FormulaFamily::AnnualContribution => "yearly",
    };

    let value = json!({
        "scheme": request.scheme,
        "target_amount": request.target_amount,
        "tenure_years": request.tenure_years,
        "rate": request.rate.unwrap_or(scheme.default_rate),
        "contribution": contribution,
        "required_investment": required,
    });
    Ok(with_display(value, "required_display", required))
}

pub fn run_inflation(
    args: InflationArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: InflationRequest = match input::read_input(args.input.as_deref())? {
        Some(request) => request,
        None => InflationRequest {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            inflation_rate: args.inflation_rate,
        },
    };

    let impact = inflation::calculate_inflation_impact(
        request.amount,
        request.years,
        Some(request.inflation_rate.unwrap_or(config.inflation_rate)),
    );
    let real_value = impact.real_value;
    let mut value = serde_json::to_value(impact)?;
    if let Value::Object(ref mut map) = value {
        map.insert("future_amount".into(), json!(request.amount));
        map.insert("years".into(), json!(request.years));
    }
    Ok(with_display(value, "real_value_display", real_value))
}

pub fn run_plan(
    args: PlanArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut plan_input: InvestmentInput = match input::read_input(args.input.as_deref())? {
        Some(request) => request,
        None => {
            let mode = CalculationMode::from(args.mode);
            let scheme = args.scheme.ok_or("--scheme is required (or provide --input)")?;
            let amount = match mode {
                CalculationMode::Target => args.amount.unwrap_or(Decimal::ZERO),
                _ => args.amount.ok_or("--amount is required (or provide --input)")?,
            };
            let target_amount = match mode {
                CalculationMode::Target => {
                    Some(args.target.ok_or("--target is required in target mode")?)
                }
                _ => args.target,
            };

            InvestmentInput {
                scheme: scheme.id().to_string(),
                mode,
                amount,
                target_amount,
                tenure_years: args
                    .tenure_years
                    .ok_or("--tenure-years is required (or provide --input)")?,
                custom_rate: args.rate,
                include_inflation: args.include_inflation,
                inflation_rate: args.inflation_rate,
            }
        }
    };

    if plan_input.include_inflation && plan_input.inflation_rate.is_none() {
        plan_input.inflation_rate = Some(config.inflation_rate);
    }

    let result = plan::plan_investment(&plan_input);
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scheme_flag_is_strict() {
        assert_eq!(parse_scheme("PPF").unwrap(), SchemeKind::Ppf);
        let err = parse_scheme("gold").unwrap_err();
        assert!(err.contains("'gold'"));
    }

    #[test]
    fn test_plan_mode_maps_to_core_mode() {
        assert_eq!(CalculationMode::from(PlanMode::Target), CalculationMode::Target);
        assert_eq!(CalculationMode::from(PlanMode::Monthly), CalculationMode::Monthly);
    }

    #[test]
    fn test_scheme_listing_has_scenario_rates() {
        let value = run_schemes().unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["id"], "fd");
        assert_eq!(rows[0]["conservative_rate"], "4.05");
        assert_eq!(rows[0]["optimistic_rate"], "8.25");
    }

    #[test]
    fn test_request_rejects_unknown_scheme() {
        let parsed: Result<SchemeAmountRequest, _> = serde_json::from_value(json!({
            "scheme": "sip",
            "amount": "1000",
            "tenure_years": 5
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_goal_request_defaults_rate() {
        let request: GoalRequest = serde_json::from_value(json!({
            "scheme": "fd",
            "target_amount": 200000,
            "tenure_years": 5
        }))
        .unwrap();
        assert_eq!(request.target_amount, dec!(200000));
        assert!(request.rate.is_none());
    }
}
