//! Display formatting for prices and ratios

use serde::{Deserialize, Serialize};

/// Placeholder shown for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// How a numeric value should be displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Brazilian real, e.g. `R$ 1.234,50`
    #[default]
    Currency,
    /// Fraction rendered as a percentage, e.g. `0.1` -> `10.00%`
    Percentage,
    /// The number as is
    Raw,
}

/// Format `value` for display
///
/// NaN and infinities render as [`NOT_AVAILABLE`] whatever the kind.
pub fn format_value(value: f64, kind: FormatKind) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    match kind {
        FormatKind::Currency => format_currency(value),
        FormatKind::Percentage => format!("{:.2}%", value * 100.0),
        FormatKind::Raw => value.to_string(),
    }
}

/// Shorthand for [`FormatKind::Currency`]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (integer, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };

    format!("R$ {sign}{},{cents}", group_thousands(integer))
}

/// Insert `.` between every group of three digits, counting from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_with_grouping() {
        assert_eq!(format_value(1234.5, FormatKind::Currency), "R$ 1.234,50");
        assert_eq!(format_value(1_234_567.891, FormatKind::Currency), "R$ 1.234.567,89");
        assert_eq!(format_value(100_000.0, FormatKind::Currency), "R$ 100.000,00");
    }

    #[test]
    fn test_currency_under_one_thousand() {
        assert_eq!(format_value(12.5, FormatKind::Currency), "R$ 12,50");
        assert_eq!(format_value(999.999, FormatKind::Currency), "R$ 1.000,00");
        assert_eq!(format_value(0.0, FormatKind::Currency), "R$ 0,00");
        assert_eq!(format_value(7.0, FormatKind::Currency), "R$ 7,00");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_value(-5.0, FormatKind::Currency), "R$ -5,00");
        assert_eq!(format_value(-1234.5, FormatKind::Currency), "R$ -1.234,50");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_value(0.1, FormatKind::Percentage), "10.00%");
        assert_eq!(format_value(0.0, FormatKind::Percentage), "0.00%");
        assert_eq!(format_value(0.0534, FormatKind::Percentage), "5.34%");
    }

    #[test]
    fn test_missing_values() {
        for kind in [FormatKind::Currency, FormatKind::Percentage, FormatKind::Raw] {
            assert_eq!(format_value(f64::NAN, kind), "N/A");
            assert_eq!(format_value(f64::INFINITY, kind), "N/A");
        }
    }

    #[test]
    fn test_raw() {
        assert_eq!(format_value(12.5, FormatKind::Raw), "12.5");
        assert_eq!(format_value(3.0, FormatKind::Raw), "3");
    }
}
