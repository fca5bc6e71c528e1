//! Plain-text rendering of an [`AnalysisReport`] for terminals

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use crate::chart::PriceChart;
use crate::dashboard::{AnalysisReport, TickerReport};
use crate::format::{FormatKind, format_currency, format_value};
use crate::valuation::ValuationField;

fn valuation_table(report: &TickerReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Indicator", "Value"]);

    for field in ValuationField::ALL {
        table.add_row(vec![
            field.label().to_string(),
            format_value(report.valuation.get(field), FormatKind::Raw),
        ]);
    }
    table
}

fn price_table(chart: &PriceChart) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Date", "Close"]);

    table.add_row(vec![
        "Latest".to_string(),
        chart.latest.date.to_string(),
        format_currency(chart.latest.value),
    ]);
    table.add_row(vec!["Max".to_string(), String::new(), format_currency(chart.max.value)]);
    table.add_row(vec!["Min".to_string(), String::new(), format_currency(chart.min.value)]);
    table
}

/// Render the whole report the way the dashboard lays it out
///
/// Warnings first, then one section per ticker.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("Stock Analysis Dashboard\n");
    out.push_str(&format!("Period: {}\n", report.range));

    if let Some(warning) = &report.range_warning {
        out.push_str(&format!("\n[!] {warning}\n"));
    }

    if report.has_errors() {
        out.push_str("\nWarnings:\n");
        for error in &report.errors {
            out.push_str(&format!("  - {error}\n"));
        }
    }

    for ticker in &report.reports {
        out.push_str(&format!("\n== {} ==\n", ticker.header()));
        if let Some(currency) = &ticker.currency {
            out.push_str(&format!("Currency: {currency}\n"));
        }
        match (&ticker.logo_url, &ticker.logo_notice) {
            (Some(url), _) => out.push_str(&format!("Logo: {url}\n")),
            (None, Some(notice)) => out.push_str(&format!("{notice}\n")),
            (None, None) => {},
        }

        match &ticker.price_chart {
            Some(chart) => {
                out.push_str(&format!("\n{}\n", chart.title()));
                out.push_str(&format!("{}\n", price_table(chart)));
            },
            None => out.push_str(&format!("{}\n", ticker.no_history_warning())),
        }

        out.push_str(&format!("\n{}\n", ticker.radar_chart.title()));
        out.push_str(&format!("{}\n", valuation_table(ticker)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_price_chart, build_radar_chart};
    use crate::period::DateRange;
    use crate::test_support::series;
    use crate::valuation::{TickerInfo, ValuationSnapshot};
    use chrono::NaiveDate;

    fn ticker(closes: &[f64]) -> TickerReport {
        let info = TickerInfo {
            short_name: Some("VALE ON".to_string()),
            trailing_pe: Some(6.5),
            ..Default::default()
        };
        let valuation = ValuationSnapshot::from_info(&info);
        let history = series(closes);
        TickerReport {
            symbol: "VALE3.SA".to_string(),
            display_name: "VALE ON".to_string(),
            logo_url: None,
            logo_notice: Some("Logo not available for VALE ON".to_string()),
            currency: Some("BRL".to_string()),
            price_chart: build_price_chart(&history, "VALE3.SA"),
            radar_chart: build_radar_chart(&valuation, "VALE ON"),
            valuation,
        }
    }

    fn report(reports: Vec<TickerReport>, errors: Vec<String>) -> AnalysisReport {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        AnalysisReport {
            tickers: vec!["VALE3.SA".to_string()],
            range,
            range_warning: None,
            errors,
            reports,
        }
    }

    #[test]
    fn test_render_ticker_section() {
        let text = render_text(&report(vec![ticker(&[60.0, 1234.5, 58.0])], vec![]));

        assert!(text.contains("Period: 2024-01-01 to 2024-01-31"));
        assert!(text.contains("== VALE3.SA - VALE ON =="));
        assert!(text.contains("Currency: BRL"));
        assert!(text.contains("Logo not available for VALE ON"));
        assert!(text.contains("Price History - VALE3.SA"));
        assert!(text.contains("R$ 1.234,50"));
        assert!(text.contains("R$ 58,00"));
        assert!(text.contains("Valuation Radar - VALE ON"));
        assert!(text.contains("P/E (Price/Earnings)"));
        assert!(!text.contains("Warnings:"));
    }

    #[test]
    fn test_render_warnings_and_empty_history() {
        let errors = vec!["XXXX3.SA: no data found in the selected range.".to_string()];
        let mut rep = report(vec![ticker(&[])], errors);
        rep.range_warning = Some("The start date must be before the end date.".to_string());

        let text = render_text(&rep);
        assert!(text.contains("[!] The start date must be before the end date."));
        assert!(text.contains("  - XXXX3.SA: no data found in the selected range."));
        assert!(text.contains("No historical data available for VALE3.SA."));
    }

    #[test]
    fn test_render_without_currency() {
        let mut vale = ticker(&[60.0]);
        vale.currency = None;
        let text = render_text(&report(vec![vale], vec![]));
        assert!(!text.contains("Currency:"));
        assert!(text.ends_with('\n'));
    }
}
