//! Command-line interface for stock-dash
//!
//! ```bash
//! # One-off analysis printed as tables
//! stock-dash analyze --tickers "PETR4.SA, VALE3.SA" --preset 90d
//!
//! # Same report as a standalone HTML page
//! stock-dash analyze --start 2024-01-01 --end 2024-03-31 --format html --output report.html
//!
//! # Browser dashboard
//! stock-dash serve --addr 127.0.0.1:8080
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dash_stock::{
    AnalysisReport, AnalysisRequest, Dashboard, DashboardConfig, PeriodSelection, Preset,
    YahooFinanceClient,
};
use dash_utils::{Config, LogFormat};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-dash", version)]
#[command(about = "Stock price history and valuation dashboard", long_about = None)]
struct Cli {
    /// Log output format (pretty or json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one analysis and print the report
    Analyze(AnalyzeArgs),
    /// Serve the browser dashboard
    Serve(ServeArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Comma separated tickers, e.g. "PETR4.SA, VALE3.SA"
    #[arg(short, long)]
    tickers: Option<String>,

    /// Lookback shortcut: 7d, 30d, 90d or 12m
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    preset: Option<Preset>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl AnalyzeArgs {
    fn period(&self) -> PeriodSelection {
        match (self.start, self.end) {
            (Some(start), Some(end)) => PeriodSelection::Custom { start, end },
            _ => PeriodSelection::Preset {
                preset: self.preset.unwrap_or_default(),
            },
        }
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen address, defaults to STOCK_DASH_ADDR or 0.0.0.0:8080
    #[arg(long)]
    addr: Option<SocketAddr>,
}

fn render(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => dash_stock::render_text(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Html => dash_web::render_html(report)?,
    })
}

async fn analyze(args: AnalyzeArgs, dash_config: DashboardConfig) -> anyhow::Result<()> {
    let tickers = args
        .tickers
        .clone()
        .unwrap_or_else(|| dash_config.default_tickers.clone());
    let request = AnalysisRequest::new(tickers, args.period());

    let client = YahooFinanceClient::new(dash_config)?;
    let dashboard = Dashboard::new(Arc::new(client));
    let report = dashboard.analyze(&request).await;

    let rendered = render(&report, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        },
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn serve(args: ServeArgs, config: Config, dash_config: DashboardConfig) -> anyhow::Result<()> {
    let addr = args.addr.unwrap_or(config.listen_addr);
    let default_tickers = dash_config.default_tickers.clone();
    let client = YahooFinanceClient::new(dash_config)?;
    let state = dash_web::AppState::new(Arc::new(client), default_tickers)?;

    info!(app = %config.app_name, environment = %config.environment, "starting dashboard");
    dash_web::serve(addr, Arc::new(state))
        .await
        .with_context(|| format!("serving on {addr}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize tracing
    dash_utils::init_tracing(cli.log_format.unwrap_or(config.log_format));

    let dash_config = DashboardConfig::builder().with_env().build()?;

    match cli.command {
        Command::Analyze(args) => analyze(args, dash_config).await,
        Command::Serve(args) => serve(args, config, dash_config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults_to_month() {
        let cli = Cli::parse_from(["stock-dash", "analyze"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(
            args.period(),
            PeriodSelection::Preset {
                preset: Preset::Month
            }
        );
    }

    #[test]
    fn test_analyze_custom_range() {
        let cli = Cli::parse_from([
            "stock-dash",
            "--log-format",
            "json",
            "analyze",
            "--tickers",
            "ITUB4.SA",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-31",
            "--format",
            "html",
        ]);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(
            args.period(),
            PeriodSelection::Custom {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            }
        );
    }

    #[test]
    fn test_rejects_preset_with_dates() {
        let result = Cli::try_parse_from([
            "stock-dash",
            "analyze",
            "--preset",
            "7d",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ]);
        assert!(result.is_err());

        assert!(Cli::try_parse_from(["stock-dash", "analyze", "--start", "2024-01-01"]).is_err());
        assert!(Cli::try_parse_from(["stock-dash", "analyze", "--preset", "2w"]).is_err());
    }

    #[test]
    fn test_serve_addr() {
        let cli = Cli::parse_from(["stock-dash", "serve", "--addr", "127.0.0.1:9000"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.addr, Some("127.0.0.1:9000".parse().unwrap()));
    }
}
