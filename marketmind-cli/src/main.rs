//! MarketMind CLI — SMA / EMA analysis of lookup backend price data.
//!
//! Commands:
//! - `analyze` — fetch a ticker from the lookup backend and enrich it
//! - `replay` — enrich a saved lookup response (or bare bar mapping)
//! - `config` — print the effective configuration

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use marketmind_core::data::{
    FileLookupProvider, HttpLookupProvider, Interval, LookupError, LookupProvider, LookupRequest,
    Period,
};
use marketmind_core::domain::Window;
use marketmind_core::export::{no_data_notice, render_table, to_json, write_csv};
use marketmind_core::{fetch_and_analyze, Analysis, MarketMindConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "marketmind",
    about = "MarketMind CLI — SMA / EMA analyzer for stock lookup data"
)]
struct Cli {
    /// Config file (TOML). Defaults to ./marketmind.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch price history from the lookup backend and run SMA / EMA.
    Analyze {
        /// Ticker or company (e.g., AAPL, MSFT, NVDA).
        ticker: String,

        /// Overall range: 1d, 5d, 1mo, 6mo, 1y, 5y, max.
        #[arg(long)]
        period: Option<Period>,

        /// Bar spacing: 1m, 5m, 15m, 1d.
        #[arg(long)]
        interval: Option<Interval>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run SMA / EMA on a saved lookup response.
    Replay {
        /// Saved lookup response JSON, or a bare `tail_ohlcv` mapping.
        #[arg(long)]
        input: PathBuf,

        /// Label for the result. Defaults to the file name.
        #[arg(long)]
        ticker: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Args)]
struct OutputArgs {
    /// Short moving-average window (minimum 2).
    #[arg(long)]
    short: Option<usize>,

    /// Long moving-average window (minimum 2).
    #[arg(long)]
    long: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MarketMindConfig::load(cli.config.as_deref()).context("load configuration")?;

    match cli.command {
        Commands::Analyze {
            ticker,
            period,
            interval,
            output,
        } => run_analyze(&config, &ticker, period, interval, &output),
        Commands::Replay {
            input,
            ticker,
            output,
        } => run_replay(&config, &input, ticker, &output),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn run_analyze(
    config: &MarketMindConfig,
    ticker: &str,
    period: Option<Period>,
    interval: Option<Interval>,
    output: &OutputArgs,
) -> Result<()> {
    let request = LookupRequest::new(
        ticker,
        period.unwrap_or(config.analysis.period),
        interval.unwrap_or(config.analysis.interval),
    )?;

    let base_url = config
        .lookup
        .base_url
        .as_deref()
        .ok_or(LookupError::NotConfigured)?;
    let provider = HttpLookupProvider::new(base_url, config.lookup.timeout())?;

    run_with_provider(&provider, &request, config, output)
}

fn run_replay(
    config: &MarketMindConfig,
    input: &Path,
    ticker: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    let label = ticker.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "replay".into())
    });
    let request = LookupRequest::new(&label, config.analysis.period, config.analysis.interval)?;
    let provider = FileLookupProvider::new(input);

    run_with_provider(&provider, &request, config, output)
}

fn run_with_provider(
    provider: &dyn LookupProvider,
    request: &LookupRequest,
    config: &MarketMindConfig,
    output: &OutputArgs,
) -> Result<()> {
    let window = Window::new(
        output.short.unwrap_or(config.analysis.short_window),
        output.long.unwrap_or(config.analysis.long_window),
    );

    let analysis = fetch_and_analyze(provider, request, window)
        .with_context(|| format!("analyze {}", request.company))?;
    info!(points = analysis.series.len(), "analysis ready");

    emit(&analysis, output)
}

fn emit(analysis: &Analysis, output: &OutputArgs) -> Result<()> {
    let text = match output.format {
        OutputFormat::Table => render_table(analysis),
        OutputFormat::Json => to_json(analysis)?,
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&analysis.series, &mut buf)?;
            String::from_utf8(buf).context("CSV output is not UTF-8")?
        }
    };

    // The table already says so; JSON and CSV get the notice on stderr.
    if output.format != OutputFormat::Table {
        if let Some(notice) = no_data_notice(analysis) {
            eprintln!("{notice}");
        }
    }

    match &output.output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
        }
        None => println!("{}", text.trim_end()),
    }

    Ok(())
}
