//! Form inputs: ticker lists and analysis periods

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// Message shown when a custom range is inverted
pub const INVERTED_RANGE_WARNING: &str = "The start date must be before the end date.";

/// Lookback shortcuts relative to today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "12m")]
    Year,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    /// Number of calendar days looked back
    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Short code used in query strings and on the command line
    pub fn code(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "12m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "7 days",
            Self::Month => "30 days",
            Self::Quarter => "90 days",
            Self::Year => "12 months",
        }
    }

    /// Range ending `today`
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        DateRange::new(today - Duration::days(self.days()), today)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Preset {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashError::Other(format!("unknown period preset: {s}")))
    }
}

/// Inclusive range of calendar dates
///
/// Nothing prevents `start > end`; see [`DateRange::validation_warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Inline message for an inverted range, `None` when the range is usable
    pub fn validation_warning(&self) -> Option<&'static str> {
        self.is_inverted().then_some(INVERTED_RANGE_WARNING)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// How the user chose the analysis period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PeriodSelection {
    /// One of the quick shortcuts
    Preset { preset: Preset },
    /// Two explicit dates
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Default for PeriodSelection {
    fn default() -> Self {
        Self::Preset {
            preset: Preset::default(),
        }
    }
}

impl PeriodSelection {
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match *self {
            Self::Preset { preset } => preset.resolve(today),
            Self::Custom { start, end } => DateRange::new(start, end),
        }
    }
}

/// A normalized symbol paired with the range to fetch
///
/// The unit of work handed to [`crate::fetch_tickers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRequest {
    pub symbol: String,
    pub range: DateRange,
}

impl TickerRequest {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }
}

/// Split a comma separated ticker list
///
/// Entries are trimmed and upper-cased; blanks and repeats are dropped while
/// the first-seen order is kept.
pub fn parse_tickers(input: &str) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let symbol = raw.trim().to_uppercase();
        if !symbol.is_empty() && !tickers.contains(&symbol) {
            tickers.push(symbol);
        }
    }
    tickers
}

/// Build one request per ticker in `input`
pub fn ticker_requests(input: &str, range: DateRange) -> Vec<TickerRequest> {
    parse_tickers(input)
        .into_iter()
        .map(|symbol| TickerRequest { symbol, range })
        .collect()
}
