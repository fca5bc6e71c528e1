//! Company metadata and the five-field valuation snapshot

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Metadata record returned by the provider for one ticker
///
/// Every field is optional; the provider omits whatever it does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerInfo {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    pub currency: Option<String>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    /// Fraction, e.g. `0.05` for 5%
    pub dividend_yield: Option<f64>,
    /// Fraction, e.g. `0.4` for 40%
    pub payout_ratio: Option<f64>,
}

impl TickerInfo {
    /// Name to show for `symbol`: the long name, then the short name, then the symbol
    pub fn display_name(&self, symbol: &str) -> String {
        non_blank(self.long_name.as_deref())
            .or_else(|| non_blank(self.short_name.as_deref()))
            .unwrap_or(symbol)
            .to_string()
    }
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.trim().is_empty())
}

/// The valuation categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationField {
    PriceEarnings,
    ForwardPriceEarnings,
    PriceBook,
    DividendYield,
    PayoutRatio,
}

impl ValuationField {
    pub const ALL: [ValuationField; 5] = [
        Self::PriceEarnings,
        Self::ForwardPriceEarnings,
        Self::PriceBook,
        Self::DividendYield,
        Self::PayoutRatio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PriceEarnings => "P/E (Price/Earnings)",
            Self::ForwardPriceEarnings => "Forward P/E",
            Self::PriceBook => "P/B (Price/Book)",
            Self::DividendYield => "Dividend Yield (%)",
            Self::PayoutRatio => "Payout Ratio (%)",
        }
    }
}

/// Five valuation figures for one ticker, missing ones already zeroed
///
/// Dividend yield and payout ratio are stored as percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValuationSnapshot {
    pub price_earnings: f64,
    pub forward_price_earnings: f64,
    pub price_book: f64,
    pub dividend_yield_pct: f64,
    pub payout_ratio_pct: f64,
}

/// Absent or non-finite provider values count as zero
fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl ValuationSnapshot {
    /// Extract the snapshot from a metadata record
    pub fn from_info(info: &TickerInfo) -> Self {
        Self {
            price_earnings: or_zero(info.trailing_pe),
            forward_price_earnings: or_zero(info.forward_pe),
            price_book: or_zero(info.price_to_book),
            dividend_yield_pct: or_zero(info.dividend_yield) * 100.0,
            payout_ratio_pct: or_zero(info.payout_ratio) * 100.0,
        }
    }

    pub fn get(&self, field: ValuationField) -> f64 {
        match field {
            ValuationField::PriceEarnings => self.price_earnings,
            ValuationField::ForwardPriceEarnings => self.forward_price_earnings,
            ValuationField::PriceBook => self.price_book,
            ValuationField::DividendYield => self.dividend_yield_pct,
            ValuationField::PayoutRatio => self.payout_ratio_pct,
        }
    }

    /// `(label, value)` pairs in display order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        ValuationField::ALL.map(|field| (field.label(), self.get(field)))
    }
}

/// Serialized as an ordered `label -> value` map, the shape shown to users
impl Serialize for ValuationSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ValuationField::ALL.len()))?;
        for (label, value) in self.entries() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}
