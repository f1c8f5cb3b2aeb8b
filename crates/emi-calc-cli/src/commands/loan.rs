use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_calc_core::format::format_inr;
use emi_calc_core::loan::amortization::{self, Prepayment};
use emi_calc_core::loan::analysis::{self, LoanInput};
use emi_calc_core::loan::{comparison, emi};
use emi_calc_core::{EmiCalcError, EmiCalcResult};

use crate::config::CalculatorConfig;
use crate::input;

/// Loan parameters shared by every loan command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in rupees
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, conflicts_with = "tenure_years")]
    pub tenure_months: Option<u32>,

    /// Tenure in years (converted to months)
    #[arg(long)]
    pub tenure_years: Option<u32>,
}

/// One-time prepayment flags
#[derive(Args)]
pub struct PrepaymentArgs {
    /// Lump sum paid once at the end of --prepayment-after-year
    #[arg(long, requires = "prepayment_after_year")]
    pub prepayment: Option<Decimal>,

    /// Loan year after which the prepayment is made
    #[arg(long, requires = "prepayment")]
    pub prepayment_after_year: Option<u32>,
}

impl PrepaymentArgs {
    fn to_prepayment(&self) -> Option<Prepayment> {
        match (self.prepayment, self.prepayment_after_year) {
            (Some(amount), Some(after_year)) => Some(Prepayment { amount, after_year }),
            _ => None,
        }
    }
}

/// Arguments for the EMI summary
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub prepayment: PrepaymentArgs,

    /// Only the first month of each loan year
    #[arg(long)]
    pub yearly: bool,
}

/// Arguments for the rate comparison
#[derive(Args)]
pub struct CompareRatesArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Percentage points below and above the rate (defaults to config rate_shift)
    #[arg(long)]
    pub shift: Option<Decimal>,
}

/// Arguments for the full loan report
#[derive(Args)]
pub struct LoanReportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub prepayment: PrepaymentArgs,

    /// Percentage points for the rate comparison (defaults to config rate_shift)
    #[arg(long)]
    pub shift: Option<Decimal>,
}

fn tenure_in_months(months: Option<u32>, years: Option<u32>) -> EmiCalcResult<u32> {
    match (months, years) {
        (Some(m), _) => Ok(m),
        (None, Some(y)) => y.checked_mul(12).ok_or_else(|| EmiCalcError::InvalidInput {
            field: "tenure_years".into(),
            reason: format!("{y} years is too long"),
        }),
        (None, None) => Err(EmiCalcError::InvalidInput {
            field: "tenure".into(),
            reason: "--tenure-months or --tenure-years is required (or provide --input)".into(),
        }),
    }
}

fn read_loan_input(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(loan) = input::read_input(args.input.as_deref())? {
        return Ok(loan);
    }

    Ok(LoanInput {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
        tenure_months: tenure_in_months(args.tenure_months, args.tenure_years)?,
        prepayment: None,
        rate_shift: None,
    })
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan_input(&args.loan)?;
    let summary = emi::summarize_emi(loan.principal, loan.annual_rate, loan.tenure_months);

    let mut value = serde_json::to_value(&summary)?;
    if let Value::Object(ref mut map) = value {
        map.insert("emi_display".into(), Value::String(format_inr(summary.emi)));
    }
    Ok(value)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan_input(&args.loan)?;
    let prepayment = args.prepayment.to_prepayment().or(loan.prepayment);

    let installment = emi::compute_emi(loan.principal, loan.annual_rate, loan.tenure_months);
    let rows: Vec<_> = amortization::build_amortization_schedule(
        loan.principal,
        loan.annual_rate,
        loan.tenure_months,
        installment,
        prepayment,
    )
    .collect();

    if args.yearly {
        Ok(serde_json::to_value(amortization::yearly_points(&rows))?)
    } else {
        Ok(serde_json::to_value(rows)?)
    }
}

pub fn run_compare_rates(
    args: CompareRatesArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan_input(&args.loan)?;
    let shift = args.shift.or(loan.rate_shift).unwrap_or(config.rate_shift);

    let result =
        comparison::compare_rates(loan.principal, loan.annual_rate, loan.tenure_months, shift);
    Ok(serde_json::to_value(result)?)
}

pub fn run_loan_report(
    args: LoanReportArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut loan = read_loan_input(&args.loan)?;
    if let Some(prepayment) = args.prepayment.to_prepayment() {
        loan.prepayment = Some(prepayment);
    }
    loan.rate_shift = args.shift.or(loan.rate_shift).or(Some(config.rate_shift));

    let result = analysis::analyze_loan(&loan);
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_prefers_months() {
        assert_eq!(tenure_in_months(Some(18), Some(5)).unwrap(), 18);
        assert_eq!(tenure_in_months(None, Some(20)).unwrap(), 240);
    }

    #[test]
    fn test_missing_tenure_is_invalid_input() {
        match tenure_in_months(None, None) {
            Err(EmiCalcError::InvalidInput { field, .. }) => assert_eq!(field, "tenure"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(tenure_in_months(None, Some(u32::MAX)).is_err());
    }

    #[test]
    fn test_prepayment_needs_both_flags() {
        let args = PrepaymentArgs {
            prepayment: Some(Decimal::from(100_000)),
            prepayment_after_year: None,
        };
        assert!(args.to_prepayment().is_none());
    }
}
