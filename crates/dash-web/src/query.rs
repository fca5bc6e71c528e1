//! Query string of the analyze endpoints

use chrono::NaiveDate;
use dash_stock::{AnalysisRequest, PeriodSelection, Preset};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WebError};

/// Date format used by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lookback used for the default custom range
const DEFAULT_CUSTOM_DAYS: i64 = 30;

/// Raw form fields as submitted
///
/// Browsers send empty strings for untouched inputs, so every field is
/// optional and blank counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    pub tickers: Option<String>,
    pub mode: Option<String>,
    pub preset: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_date(field: &str, value: Option<&String>) -> Result<Option<NaiveDate>> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| WebError::BadRequest(format!("invalid {field} date '{raw}'")))
        })
        .transpose()
}

impl AnalyzeQuery {
    /// Validate the fields into a pipeline request
    pub fn to_request(&self, default_tickers: &str, today: NaiveDate) -> Result<AnalysisRequest> {
        let tickers = non_blank(self.tickers.as_ref()).unwrap_or(default_tickers);

        let period = match non_blank(self.mode.as_ref()).unwrap_or("preset") {
            "preset" => {
                let preset = match non_blank(self.preset.as_ref()) {
                    Some(code) => code
                        .parse::<Preset>()
                        .map_err(|e| WebError::BadRequest(e.to_string()))?,
                    None => Preset::default(),
                };
                PeriodSelection::Preset { preset }
            },
            "custom" => {
                let start = parse_date("start", self.start.as_ref())?
                    .unwrap_or(today - chrono::Duration::days(DEFAULT_CUSTOM_DAYS));
                let end = parse_date("end", self.end.as_ref())?.unwrap_or(today);
                PeriodSelection::Custom { start, end }
            },
            other => {
                return Err(WebError::BadRequest(format!(
                    "unknown mode '{other}', expected 'preset' or 'custom'"
                )));
            },
        };

        Ok(AnalysisRequest::new(tickers, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> AnalyzeQuery {
        let mut q = AnalyzeQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "tickers" => q.tickers = value,
                "mode" => q.mode = value,
                "preset" => q.preset = value,
                "start" => q.start = value,
                "end" => q.end = value,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn test_defaults() {
        let request = AnalyzeQuery::default()
            .to_request("PETR4.SA, VALE3.SA", today())
            .unwrap();
        assert_eq!(request.tickers, "PETR4.SA, VALE3.SA");
        assert_eq!(
            request.period,
            PeriodSelection::Preset {
                preset: Preset::Month
            }
        );
    }

    #[test]
    fn test_preset_mode() {
        let request = query(&[("tickers", "itub4.sa"), ("mode", "preset"), ("preset", "90d")])
            .to_request("X", today())
            .unwrap();
        assert_eq!(request.tickers, "itub4.sa");
        assert_eq!(
            request.period,
            PeriodSelection::Preset {
                preset: Preset::Quarter
            }
        );
    }

    #[test]
    fn test_custom_mode_keeps_inverted_dates() {
        let request = query(&[("mode", "custom"), ("start", "2024-05-10"), ("end", "2024-05-01")])
            .to_request("X", today())
            .unwrap();
        assert_eq!(
            request.period,
            PeriodSelection::Custom {
                start: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            }
        );
    }

    #[test]
    fn test_custom_mode_blank_dates_default() {
        let request = query(&[("mode", "custom"), ("start", ""), ("end", " ")])
            .to_request("X", today())
            .unwrap();
        assert_eq!(
            request.period,
            PeriodSelection::Custom {
                start: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
                end: today(),
            }
        );
    }

    #[test]
    fn test_rejections() {
        let bad_date = query(&[("mode", "custom"), ("start", "10/05/2024")]).to_request("X", today());
        assert!(matches!(bad_date, Err(WebError::BadRequest(msg)) if msg.contains("start")));

        let bad_preset = query(&[("preset", "2w")]).to_request("X", today());
        assert!(matches!(bad_preset, Err(WebError::BadRequest(_))));

        let bad_mode = query(&[("mode", "weekly")]).to_request("X", today());
        assert!(matches!(bad_mode, Err(WebError::BadRequest(msg)) if msg.contains("weekly")));
    }
}
