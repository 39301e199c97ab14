//! IntervalLab CLI — intraday interval price averages.
//!
//! Commands:
//! - `calc` — fetch 5-minute bars for a symbol, print per-day interval averages
//! - `show` — render a previously exported CSV
//! - `intervals` — list the fixed trading intervals

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use intervallab_core::{
    calculate, report, AlphaVantageProvider, CalcError, Calculation, ProviderConfig, Ticker,
};

#[derive(Parser)]
#[command(
    name = "intervallab",
    about = "IntervalLab CLI — average prices for fixed intraday intervals over the past 7 trading days"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch intraday data for a symbol and calculate interval averages.
    Calc {
        /// Stock/ETF symbol (1-5 letters, e.g. AAPL, SPY, QQQ).
        symbol: String,

        /// Write the results as CSV.
        #[arg(long, default_value_t = false)]
        export: bool,

        /// Directory for the CSV export. Defaults to the current directory.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the results as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Path to a TOML config file with a [provider] table.
        #[arg(long)]
        config: Option<PathBuf>,

        /// API key. Overrides the config file and ALPHA_VANTAGE_API_KEY.
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Render a previously exported CSV file.
    Show {
        /// Path to an `<SYMBOL>_interval_averages_<YYYYMMDD>.csv` file.
        path: PathBuf,
    },
    /// List the trading intervals (US/Eastern).
    Intervals,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            symbol,
            export,
            out_dir,
            json,
            config,
            api_key,
        } => run_calc(&symbol, export, &out_dir, json, config.as_deref(), api_key),
        Commands::Show { path } => run_show(&path),
        Commands::Intervals => {
            print!("{}", render::render_intervals());
            Ok(())
        }
    }
}

/// Defaults, then the config file, then the environment, then `--api-key`.
fn load_config(path: Option<&Path>, api_key: Option<String>) -> Result<ProviderConfig> {
    let mut config = match path {
        Some(p) => ProviderConfig::from_file(p)?,
        None => ProviderConfig::default(),
    }
    .with_process_env();

    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    if config.uses_default_key() {
        log::warn!(
            "no API key configured; set {} or pass --api-key",
            intervallab_core::config::API_KEY_ENV
        );
    }
    log::debug!("provider config: {config:?}");
    Ok(config)
}

fn run_calc(
    symbol: &str,
    export: bool,
    out_dir: &Path,
    json: bool,
    config_path: Option<&Path>,
    api_key: Option<String>,
) -> Result<()> {
    let ticker = match Ticker::parse(symbol) {
        Ok(t) => t,
        Err(e) => fail(&CalcError::from(e)),
    };

    let config = load_config(config_path, api_key)?;
    let provider = AlphaVantageProvider::new(config)?;

    if !json {
        println!("Fetching intraday data for {ticker}...");
    }

    let calc = match calculate(&provider, &ticker, Utc::now()) {
        Ok(calc) => calc,
        Err(e) if e.is_warning() => {
            eprintln!("WARNING: {e}");
            return Ok(());
        }
        Err(e) => fail(&e),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&calc).context("failed to serialize results")?
        );
    } else {
        print_calculation(&calc);
    }

    if export {
        let path = report::write_csv(&calc.days, out_dir, &calc.ticker, calc.as_of_date())?;
        // Keep stdout clean for JSON consumers.
        eprintln!("Exported CSV ({}): {}", report::CSV_MIME, path.display());
    }

    Ok(())
}

/// Report a failed calculation and exit with status 1.
fn fail(err: &CalcError) -> ! {
    eprintln!("Error [{}]: {err}", err.category().label());
    std::process::exit(1);
}

fn print_calculation(calc: &Calculation) {
    println!("Successfully calculated interval averages for {}", calc.ticker);
    println!();
    println!("=== Average Prices for {} - Past 7 Trading Days ===", calc.ticker);
    print!("{}", render::render_table(&calc.table()));
    println!();
    println!("--- Summary Statistics ---");
    print!("{}", render::render_summary(&calc.summaries()));
}

fn run_show(path: &Path) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let days = report::from_csv(&bytes)
        .with_context(|| format!("{} is not an interval averages export", path.display()))?;

    if days.is_empty() {
        println!("{}: no rows", path.display());
        return Ok(());
    }

    print!("{}", render::render_table(&report::format_for_display(&days)));
    println!();
    println!("--- Summary Statistics ---");
    print!("{}", render::render_summary(&report::summary_stats(&days)));
    Ok(())
}
