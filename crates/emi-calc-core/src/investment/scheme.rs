use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmiCalcError;
use crate::types::Percent;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The four savings products the calculator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Bank fixed deposit, quarterly compounding
    Fd,
    /// Recurring deposit, monthly contributions
    Rd,
    /// Public Provident Fund, annual contributions
    Ppf,
    /// Endowment-style insurance policy, annual premiums
    Insurance,
}

/// Which maturity formula a scheme uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaFamily {
    LumpSum,
    MonthlyDeposit,
    AnnualContribution,
}

/// Static description of a scheme: rate band and allowed tenure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentScheme {
    pub kind: SchemeKind,
    pub id: &'static str,
    pub name: &'static str,
    pub hindi_name: &'static str,
    pub description: &'static str,
    pub min_rate: Percent,
    pub default_rate: Percent,
    pub max_rate: Percent,
    pub is_compound: bool,
    pub min_tenure_years: u32,
    pub max_tenure_years: u32,
}

/// Fixed scheme catalog, in display order.
pub static SCHEMES: [InvestmentScheme; 4] = [
    InvestmentScheme {
        kind: SchemeKind::Fd,
        id: "fd",
        name: "Fixed Deposit",
        hindi_name: "फिक्स्ड डिपॉजिट",
        description: "Bank में सुरक्षित निवेश",
        min_rate: dec!(3.0),
        default_rate: dec!(6.5),
        max_rate: dec!(9.0),
        is_compound: true,
        min_tenure_years: 1,
        max_tenure_years: 40,
    },
    InvestmentScheme {
        kind: SchemeKind::Rd,
        id: "rd",
        name: "Recurring Deposit",
        hindi_name: "रेकरिंग डिपॉजिट",
        description: "हर महीने एक सा पैसा जमा करें",
        min_rate: dec!(3.0),
        default_rate: dec!(6.0),
        max_rate: dec!(8.5),
        is_compound: true,
        min_tenure_years: 1,
        max_tenure_years: 40,
    },
    InvestmentScheme {
        kind: SchemeKind::Ppf,
        id: "ppf",
        name: "PPF",
        hindi_name: "पीपीएफ",
        description: "सरकारी योजना - 15 साल लॉक",
        min_rate: dec!(7.1),
        default_rate: dec!(7.6),
        max_rate: dec!(8.5),
        is_compound: true,
        min_tenure_years: 15,
        max_tenure_years: 40,
    },
    InvestmentScheme {
        kind: SchemeKind::Insurance,
        id: "insurance",
        name: "Insurance Policy",
        hindi_name: "बीमा पॉलिसी",
        description: "LIC जैसी return वाली पॉलिसी",
        min_rate: dec!(4.0),
        default_rate: dec!(5.5),
        max_rate: dec!(7.0),
        is_compound: true,
        min_tenure_years: 5,
        max_tenure_years: 40,
    },
];

// ---------------------------------------------------------------------------
// SchemeKind
// ---------------------------------------------------------------------------

impl SchemeKind {
    pub const ALL: [SchemeKind; 4] = [
        SchemeKind::Fd,
        SchemeKind::Rd,
        SchemeKind::Ppf,
        SchemeKind::Insurance,
    ];

    pub fn id(self) -> &'static str {
        self.scheme().id
    }

    /// Catalog entry for this kind.
    pub fn scheme(self) -> &'static InvestmentScheme {
        match self {
            SchemeKind::Fd => &SCHEMES[0],
            SchemeKind::Rd => &SCHEMES[1],
            SchemeKind::Ppf => &SCHEMES[2],
            SchemeKind::Insurance => &SCHEMES[3],
        }
    }

    pub fn formula(self) -> FormulaFamily {
        match self {
            SchemeKind::Fd => FormulaFamily::LumpSum,
            SchemeKind::Rd => FormulaFamily::MonthlyDeposit,
            SchemeKind::Ppf | SchemeKind::Insurance => FormulaFamily::AnnualContribution,
        }
    }

    /// Lenient lookup: unknown ids fall back to the fixed-deposit formula.
    ///
    /// Returns the resolved kind and whether the fallback was taken.
    pub fn resolve(id: &str) -> (SchemeKind, bool) {
        match id.parse::<SchemeKind>() {
            Ok(kind) => (kind, false),
            Err(_) => {
                tracing::warn!(scheme = id, "unknown scheme id, using fixed deposit formula");
                (SchemeKind::Fd, true)
            }
        }
    }
}

impl FromStr for SchemeKind {
    type Err = EmiCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SchemeKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EmiCalcError::UnknownScheme(s.to_string()))
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// InvestmentScheme
// ---------------------------------------------------------------------------

impl InvestmentScheme {
    pub fn clamp_rate(&self, rate: Percent) -> Percent {
        rate.max(self.min_rate).min(self.max_rate)
    }

    pub fn clamp_tenure(&self, years: u32) -> u32 {
        years.clamp(self.min_tenure_years, self.max_tenure_years)
    }

    pub fn rate_in_bounds(&self, rate: Percent) -> bool {
        rate >= self.min_rate && rate <= self.max_rate
    }

    pub fn tenure_in_bounds(&self, years: u32) -> bool {
        (self.min_tenure_years..=self.max_tenure_years).contains(&years)
    }
}
