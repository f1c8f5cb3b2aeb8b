use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::loan::emi::monthly_rate;
use crate::types::{Money, Percent};

/// Upper bound on schedule length regardless of the requested tenure.
pub const MAX_SCHEDULE_MONTHS: u32 = 360;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One-time lump-sum payment applied at the end of a loan year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prepayment {
    pub amount: Money,
    /// Year whose final month receives the prepayment (5 => month 60).
    #[serde(alias = "after_month")]
    pub after_year: u32,
}

impl Prepayment {
    /// Schedule month on which the prepayment lands.
    pub fn month(&self) -> Option<u32> {
        self.after_year.checked_mul(12)
    }

    fn applies_in(&self, month: u32) -> bool {
        self.amount > Decimal::ZERO && self.month() == Some(month)
    }
}

/// A single month in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub year: u32,
    pub emi: Money,
    pub principal: Money,
    pub interest: Money,
    pub prepayment: Money,
    pub balance: Money,
    pub cumulative_interest: Money,
}

/// One point per loan year for charting (the first month of each year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyPoint {
    pub year: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

/// Lazy month-by-month amortization.
///
/// Finite and single pass: once exhausted it keeps returning `None`, and it is
/// deliberately not `Clone`; build a new one to walk the schedule again.
#[derive(Debug)]
pub struct AmortizationSchedule {
    balance: Money,
    monthly_rate: Decimal,
    emi: Money,
    prepayment: Option<Prepayment>,
    cumulative_interest: Money,
    next_month: u32,
    last_month: u32,
    finished: bool,
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.next_month > self.last_month {
            self.finished = true;
            return None;
        }

        let month = self.next_month;
        self.next_month += 1;

        let interest = self.balance * self.monthly_rate;
        let principal = self.emi - interest;
        self.balance -= principal;

        let mut prepaid = Decimal::ZERO;
        if let Some(p) = self.prepayment.filter(|p| p.applies_in(month)) {
            self.balance = self.balance.saturating_sub(p.amount);
            prepaid = p.amount;
        }

        self.cumulative_interest += interest;

        if self.balance <= Decimal::ZERO {
            self.finished = true;
        }

        Some(AmortizationRow {
            month,
            year: month.div_ceil(12),
            emi: self.emi,
            principal,
            interest,
            prepayment: prepaid,
            balance: self.balance.max(Decimal::ZERO),
            cumulative_interest: self.cumulative_interest,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished || self.next_month > self.last_month {
            return (0, Some(0));
        }
        (0, Some((self.last_month - self.next_month + 1) as usize))
    }
}

impl FusedIterator for AmortizationSchedule {}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Start a reducing-balance schedule for the given installment.
///
/// Runs for at most `min(tenure_months, 360)` months and stops after the month
/// in which the balance reaches zero. A non-positive principal or installment
/// produces an empty schedule.
pub fn build_amortization_schedule(
    principal: Money,
    annual_rate: Percent,
    tenure_months: u32,
    emi: Money,
    prepayment: Option<Prepayment>,
) -> AmortizationSchedule {
    AmortizationSchedule {
        balance: principal,
        monthly_rate: monthly_rate(annual_rate),
        emi,
        prepayment,
        cumulative_interest: Decimal::ZERO,
        next_month: 1,
        last_month: tenure_months.min(MAX_SCHEDULE_MONTHS),
        finished: principal <= Decimal::ZERO || emi <= Decimal::ZERO,
    }
}

/// Every twelfth row starting from month 1.
pub fn yearly_points(rows: &[AmortizationRow]) -> Vec<YearlyPoint> {
    rows.iter()
        .step_by(12)
        .map(|r| YearlyPoint {
            year: r.year,
            principal: r.principal,
            interest: r.interest,
            balance: r.balance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::emi::compute_emi;
    use rust_decimal_macros::dec;

    fn schedule(principal: Money, rate: Percent, months: u32, pre: Option<Prepayment>) -> Vec<AmortizationRow> {
        let emi = compute_emi(principal, rate, months);
        build_amortization_schedule(principal, rate, months, emi, pre).collect()
    }

    #[test]
    fn test_schedule_pays_off_at_tenure() {
        let rows = schedule(dec!(1000000), dec!(10), 12, None);
        assert_eq!(rows.len(), 12);
        let last = rows.last().unwrap();
        assert!(last.balance < dec!(0.000001));
        let total_principal: Decimal = rows.iter().map(|r| r.principal).sum();
        assert!((total_principal - dec!(1000000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_first_row_split() {
        let rows = schedule(dec!(1000000), dec!(12), 24, None);
        // 1% monthly interest on the full balance
        assert_eq!(rows[0].interest, dec!(10000));
        assert_eq!(rows[0].principal, rows[0].emi - dec!(10000));
        assert_eq!(rows[0].cumulative_interest, dec!(10000));
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[12].year, 2);
    }

    #[test]
    fn test_balance_never_increases() {
        let rows = schedule(dec!(2500000), dec!(8.5), 240, None);
        for pair in rows.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
    }

    #[test]
    fn test_cap_at_360_months() {
        let rows = schedule(dec!(500000), dec!(9), 480, None);
        assert_eq!(rows.len(), 360);
        // A 40-year EMI still leaves balance after 30 years
        assert!(rows.last().unwrap().balance > Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_applies_at_year_end_and_shortens_loan() {
        let pre = Prepayment {
            amount: dec!(500000),
            after_year: 5,
        };
        let with = schedule(dec!(2500000), dec!(8.5), 240, Some(pre));
        let without = schedule(dec!(2500000), dec!(8.5), 240, None);

        assert_eq!(with[59].prepayment, dec!(500000));
        assert!(with.iter().filter(|r| !r.prepayment.is_zero()).count() == 1);
        assert!(with[59].balance < without[59].balance - dec!(499999));
        assert!(with.len() < without.len());
        assert_eq!(with.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_larger_than_balance_clamps_to_zero() {
        let pre = Prepayment {
            amount: dec!(10000000),
            after_year: 1,
        };
        let rows = schedule(dec!(1000000), dec!(9), 120, Some(pre));
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[11].balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_prepayment_is_ignored() {
        let pre = Prepayment {
            amount: Decimal::ZERO,
            after_year: 1,
        };
        let rows = schedule(dec!(1000000), dec!(9), 24, Some(pre));
        assert!(rows.iter().all(|r| r.prepayment.is_zero()));
        assert_eq!(rows.len(), 24);
    }

    #[test]
    fn test_degenerate_inputs_give_empty_schedule() {
        assert!(schedule(dec!(1000000), Decimal::ZERO, 24, None).is_empty());
        assert!(schedule(dec!(1000000), dec!(9), 0, None).is_empty());
        assert!(schedule(Decimal::ZERO, dec!(9), 24, None).is_empty());
    }

    #[test]
    fn test_schedule_is_fused() {
        let emi = compute_emi(dec!(1000), dec!(12), 2);
        let mut it = build_amortization_schedule(dec!(1000), dec!(12), 2, emi, None);
        assert!(it.next().is_some());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
        assert_eq!(it.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_yearly_points_take_first_month_of_each_year() {
        let rows = schedule(dec!(1000000), dec!(9), 36, None);
        let points = yearly_points(&rows);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].year, 1);
        assert_eq!(points[1].balance, rows[12].balance);
        assert_eq!(points[2].year, 3);
    }
}
