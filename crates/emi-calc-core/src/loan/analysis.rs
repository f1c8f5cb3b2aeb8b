use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::amortization::{
    build_amortization_schedule, yearly_points, AmortizationRow, Prepayment, YearlyPoint,
    MAX_SCHEDULE_MONTHS,
};
use crate::loan::comparison::{compare_rates, RateComparison, DEFAULT_RATE_SHIFT};
use crate::loan::emi::{summarize_emi, EmiSummary};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan parameters as entered on the calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%)
    pub annual_rate: Percent,
    pub tenure_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<Prepayment>,
    /// Percentage points for the lower/higher rate comparison (default 0.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_shift: Option<Percent>,
}

/// Everything the EMI screen displays for one set of inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub summary: EmiSummary,
    pub schedule: Vec<AmortizationRow>,
    pub months_to_payoff: u32,
    /// Interest actually paid across the emitted schedule
    pub interest_paid: Money,
    /// Interest avoided versus the nominal total, when a prepayment was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_saved: Option<Money>,
    pub comparison: RateComparison,
    pub yearly_points: Vec<YearlyPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute installment, schedule, prepayment effect and rate comparison.
///
/// Never fails: degenerate inputs produce zero figures and an explanatory
/// warning in the envelope.
pub fn analyze_loan(input: &LoanInput) -> ComputationOutput<LoanAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = summarize_emi(input.principal, input.annual_rate, input.tenure_months);
    if summary.emi.is_zero() {
        warnings.push(
            "EMI is zero: principal, annual rate and tenure must all be positive".into(),
        );
    }
    if input.tenure_months > MAX_SCHEDULE_MONTHS {
        warnings.push(format!(
            "Schedule truncated to {MAX_SCHEDULE_MONTHS} months (tenure {} months)",
            input.tenure_months
        ));
    }

    let schedule: Vec<AmortizationRow> = build_amortization_schedule(
        input.principal,
        input.annual_rate,
        input.tenure_months,
        summary.emi,
        input.prepayment,
    )
    .collect();

    let months_to_payoff = schedule.last().map(|r| r.month).unwrap_or(0);
    let interest_paid = schedule
        .last()
        .map(|r| r.cumulative_interest)
        .unwrap_or(Decimal::ZERO);

    let prepayment_applied = schedule.iter().any(|r| !r.prepayment.is_zero());
    if let Some(p) = input.prepayment {
        if p.amount > Decimal::ZERO && !prepayment_applied && !schedule.is_empty() {
            warnings.push(format!(
                "Prepayment after year {} falls outside the schedule and was not applied",
                p.after_year
            ));
        }
    }
    let interest_saved = prepayment_applied
        .then(|| (summary.total_interest - interest_paid).max(Decimal::ZERO));

    let shift = input.rate_shift.unwrap_or(DEFAULT_RATE_SHIFT);
    let comparison = compare_rates(input.principal, input.annual_rate, input.tenure_months, shift);
    let points = yearly_points(&schedule);

    tracing::debug!(
        principal = %input.principal,
        annual_rate = %input.annual_rate,
        tenure_months = input.tenure_months,
        emi = %summary.emi,
        months_to_payoff,
        "loan analysed"
    );

    let output = LoanAnalysis {
        summary,
        schedule,
        months_to_payoff,
        interest_paid,
        interest_saved,
        comparison,
        yearly_points: points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Reducing-balance EMI with monthly amortization",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "tenure_months": input.tenure_months,
            "schedule_cap_months": MAX_SCHEDULE_MONTHS,
            "rate_shift_pct": shift.to_string(),
            "prepayment": input.prepayment,
        }),
        warnings,
        elapsed,
        output,
    )
}
