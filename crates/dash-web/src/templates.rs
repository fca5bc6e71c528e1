//! HTML rendering with MiniJinja
//!
//! The page is a single template fed with a view model derived from the
//! [`AnalysisReport`]. Figures are embedded with `tojson` and drawn by
//! Plotly.js in the browser.

use chrono::NaiveDate;
use dash_stock::chart::Figure;
use dash_stock::format::{FormatKind, format_value};
use dash_stock::period::INVERTED_RANGE_WARNING;
use dash_stock::{AnalysisReport, AnalysisRequest, PeriodSelection, Preset, TickerReport};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::Result;
use crate::query::DATE_FORMAT;

/// Name of the dashboard template; the `.html` suffix turns on auto-escaping
pub const DASHBOARD_TEMPLATE: &str = "dashboard.html";

const DASHBOARD_SOURCE: &str = include_str!("../templates/dashboard.html");

#[derive(Debug, Clone, Serialize)]
struct PresetOption {
    code: &'static str,
    label: &'static str,
}

/// Current state of the input form
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub tickers: String,
    pub mode: &'static str,
    pub preset: &'static str,
    pub start: String,
    pub end: String,
    /// Custom range with the start after the end
    pub range_inverted: bool,
    range_warning: &'static str,
    presets: Vec<PresetOption>,
}

impl FormView {
    fn build(tickers: String, period: PeriodSelection, today: NaiveDate) -> Self {
        let default_start = today - chrono::Duration::days(Preset::Month.days());
        let (mode, preset, start, end) = match period {
            PeriodSelection::Preset { preset } => ("preset", preset, default_start, today),
            PeriodSelection::Custom { start, end } => ("custom", Preset::default(), start, end),
        };

        Self {
            tickers,
            mode,
            preset: preset.code(),
            start: start.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
            range_inverted: mode == "custom" && start > end,
            range_warning: INVERTED_RANGE_WARNING,
            presets: Preset::ALL
                .into_iter()
                .map(|p| PresetOption {
                    code: p.code(),
                    label: p.label(),
                })
                .collect(),
        }
    }

    /// Untouched form
    pub fn defaults(default_tickers: &str, today: NaiveDate) -> Self {
        Self::build(default_tickers.to_string(), PeriodSelection::default(), today)
    }

    /// Form echoing what was submitted
    pub fn from_request(request: &AnalysisRequest, today: NaiveDate) -> Self {
        Self::build(request.tickers.clone(), request.period, today)
    }

    /// Form describing an already computed report
    pub fn from_report(report: &AnalysisReport) -> Self {
        let period = PeriodSelection::Custom {
            start: report.range.start,
            end: report.range.end,
        };
        Self::build(report.tickers.join(", "), period, report.range.end)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ValuationRow {
    label: &'static str,
    value: String,
}

#[derive(Debug, Clone, Serialize)]
struct TabView {
    id: String,
    symbol: String,
    header: String,
    logo_url: Option<String>,
    logo_notice: Option<String>,
    currency: Option<String>,
    price_figure: Option<Figure>,
    no_history_warning: String,
    valuation: Vec<ValuationRow>,
    radar_title: String,
    radar_figure: Figure,
}

impl TabView {
    fn new(index: usize, ticker: &TickerReport) -> Self {
        Self {
            id: format!("ticker-{index}"),
            symbol: ticker.symbol.clone(),
            header: ticker.header(),
            logo_url: ticker.logo_url.clone(),
            logo_notice: ticker.logo_notice.clone(),
            currency: ticker.currency.clone(),
            price_figure: ticker.price_chart.as_ref().map(|c| c.to_figure()),
            no_history_warning: ticker.no_history_warning(),
            valuation: ticker
                .valuation
                .entries()
                .into_iter()
                .map(|(label, value)| ValuationRow {
                    label,
                    value: format_value(value, FormatKind::Raw),
                })
                .collect(),
            radar_title: ticker.radar_chart.title(),
            radar_figure: ticker.radar_chart.to_figure(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ResultsView {
    period: String,
    range_warning: Option<String>,
    errors: Vec<String>,
    tabs: Vec<TabView>,
}

impl From<&AnalysisReport> for ResultsView {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            period: report.range.to_string(),
            range_warning: report.range_warning.clone(),
            errors: report.errors.clone(),
            tabs: report
                .reports
                .iter()
                .enumerate()
                .map(|(i, t)| TabView::new(i, t))
                .collect(),
        }
    }
}

/// Loaded template environment
pub struct Templates {
    env: Environment<'static>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(DASHBOARD_TEMPLATE, DASHBOARD_SOURCE)?;
        Ok(Self { env })
    }

    /// Render the dashboard page, with results when a report is given
    pub fn render_dashboard(&self, form: &FormView, report: Option<&AnalysisReport>) -> Result<String> {
        let results = report.map(ResultsView::from);
        let html = self
            .env
            .get_template(DASHBOARD_TEMPLATE)?
            .render(context! { form => form, results => results })?;
        Ok(html)
    }
}

/// Standalone page for a finished report
pub fn render_html(report: &AnalysisReport) -> Result<String> {
    Templates::new()?.render_dashboard(&FormView::from_report(report), Some(report))
}
