//! Core market-data records
//!
//! Optional-field records decoded from the provider plus the typed lookback
//! window. Absent provider fields stay `None` all the way through; nothing
//! in this crate substitutes zeros for unknowns.

use crate::error::MarketError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Company fundamentals for one ticker, as reported by the provider
///
/// Every field may be absent. `dividend_yield`, `roe` and `roa` hold the
/// provider's fractional values here; percent scaling happens during
/// metrics derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyFacts {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub current_price: Option<f64>,
    pub target_price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub eps: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    pub recommendation_key: Option<String>,
}

/// One daily close in a price history window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: DateTime<Utc>,
    pub close: f64,
}

/// Historical window over which price return is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackPeriod {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl LookbackPeriod {
    /// The provider-style period string (e.g. "1y")
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    /// Resolve the period to a concrete `[start, end]` window ending now
    pub fn window(self) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = Utc::now();
        let start = match self {
            Self::OneDay => end - Duration::days(1),
            Self::FiveDays => end - Duration::days(5),
            Self::OneMonth => end - Duration::days(30),
            Self::ThreeMonths => end - Duration::days(90),
            Self::SixMonths => end - Duration::days(180),
            Self::OneYear => end - Duration::days(365),
            Self::TwoYears => end - Duration::days(730),
            Self::FiveYears => end - Duration::days(1825),
            Self::TenYears => end - Duration::days(3650),
            Self::YearToDate => NaiveDate::from_ymd_opt(end.year(), 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .unwrap_or(end - Duration::days(365)),
            Self::Max => end - Duration::days(36500), // ~100 years
        };
        (start, end)
    }
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        Self::OneYear
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackPeriod {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "5d" => Ok(Self::FiveDays),
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "ytd" => Ok(Self::YearToDate),
            "max" => Ok(Self::Max),
            other => Err(MarketError::InvalidPeriod(other.to_string())),
        }
    }
}
