use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::generate_share_text;
use crate::investment::goal::calculate_required_investment;
use crate::investment::inflation::{calculate_inflation_impact, InflationImpact};
use crate::investment::maturity::{calculate_investment, CalculationResult};
use crate::investment::scenarios::{calculate_scenarios, scenario_rates, ScenarioSet};
use crate::investment::scheme::{FormulaFamily, SchemeKind};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the entered amount is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// `amount` is a lump sum (or the scheme's native contribution)
    #[default]
    Amount,
    /// `amount` is paid every month
    Monthly,
    /// Solve for the contribution that reaches `target_amount`
    Target,
}

/// Inputs of the investment screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Scheme id (fd, rd, ppf, insurance); unknown ids use the fixed-deposit formula
    pub scheme: String,
    #[serde(default)]
    pub mode: CalculationMode,
    #[serde(default)]
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Money>,
    pub tenure_years: u32,
    /// Overrides the scheme default rate for the goal solve and the custom projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rate: Option<Percent>,
    #[serde(default)]
    pub include_inflation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_rate: Option<Percent>,
}

/// Output of `plan_investment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub scheme: SchemeKind,
    pub scheme_name: String,
    pub mode: CalculationMode,
    pub tenure_years: u32,
    /// Rate used for the goal solve and the custom projection
    pub effective_rate: Percent,
    /// Amount fed into the scenario projections
    pub contribution: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_investment: Option<Money>,
    pub scenarios: ScenarioSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation: Option<InflationImpact>,
    pub share_text: String,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project an investment under the three scenario rates.
///
/// Tenure and custom rate are clamped into the scheme's bounds. In target mode
/// the required contribution is solved first and then projected as a lump sum,
/// so every scenario is directly comparable with the goal.
pub fn plan_investment(input: &InvestmentInput) -> ComputationOutput<InvestmentPlan> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (kind, fell_back) = SchemeKind::resolve(&input.scheme);
    if fell_back {
        warnings.push(format!(
            "Unknown scheme '{}'; using the Fixed Deposit formula",
            input.scheme
        ));
    }
    let scheme = kind.scheme();

    let tenure_years = scheme.clamp_tenure(input.tenure_years);
    if tenure_years != input.tenure_years {
        tracing::warn!(scheme = scheme.id, requested = input.tenure_years, tenure_years, "tenure clamped");
        warnings.push(format!(
            "Tenure {} years is outside {}–{} years for {}; using {}",
            input.tenure_years,
            scheme.min_tenure_years,
            scheme.max_tenure_years,
            scheme.name,
            tenure_years
        ));
    }

    let custom_rate = input.custom_rate.map(|rate| {
        let clamped = scheme.clamp_rate(rate);
        if clamped != rate {
            warnings.push(format!(
                "Rate {rate}% is outside {}–{}% for {}; using {clamped}%",
                scheme.min_rate, scheme.max_rate, scheme.name
            ));
        }
        clamped
    });
    let effective_rate = custom_rate.unwrap_or(scheme.default_rate);

    let (contribution, required_investment, is_monthly) = match input.mode {
        CalculationMode::Target => {
            let target = input.target_amount.unwrap_or_else(|| {
                warnings.push("Target mode without target_amount; using 0".into());
                Decimal::ZERO
            });
            let required =
                calculate_required_investment(scheme, target, tenure_years, Some(effective_rate));
            (required, Some(required), false)
        }
        CalculationMode::Monthly => (input.amount, None, true),
        CalculationMode::Amount => (input.amount, None, false),
    };

    if contribution <= Decimal::ZERO {
        warnings.push("Contribution is not positive; projections are zero".into());
    }

    let scenarios = calculate_scenarios(scheme, contribution, tenure_years, is_monthly);
    let custom = custom_rate
        .map(|rate| calculate_investment(kind, contribution, rate, tenure_years, is_monthly));

    let inflation = input.include_inflation.then(|| {
        calculate_inflation_impact(
            scenarios.realistic.maturity_amount,
            tenure_years,
            input.inflation_rate,
        )
    });

    let share_text = generate_share_text(
        scheme,
        &scenarios.realistic,
        contribution,
        tenure_years,
        is_monthly,
    );

    tracing::debug!(
        scheme = scheme.id,
        mode = ?input.mode,
        tenure_years,
        contribution = %contribution,
        realistic = %scenarios.realistic.maturity_amount,
        "investment planned"
    );

    let rates = scenario_rates(scheme);
    let output = InvestmentPlan {
        scheme: kind,
        scheme_name: scheme.name.to_string(),
        mode: input.mode,
        tenure_years,
        effective_rate,
        contribution,
        required_investment,
        scenarios,
        custom,
        inflation,
        share_text,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Scheme maturity projection under conservative/realistic/optimistic rates",
        &serde_json::json!({
            "scheme": scheme.id,
            "conservative_rate_pct": rates.conservative.to_string(),
            "realistic_rate_pct": rates.realistic.to_string(),
            "optimistic_rate_pct": rates.optimistic.to_string(),
            "monthly_to_annual": is_monthly && kind.formula() == FormulaFamily::AnnualContribution,
            "fd_compounding": "quarterly",
        }),
        warnings,
        elapsed,
        output,
    )
}
