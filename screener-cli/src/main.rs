//! Screener CLI — momentum scan over an instrument list.
//!
//! Commands:
//! - `scan` — fetch daily bars, score every instrument, print the ranked table
//! - `tickers` — print the normalized, de-duplicated ticker list

mod progress;
mod render;
mod theme;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use screener_core::data::{
    CircuitBreaker, CsvDirProvider, DataProvider, PacedProvider, Pacing, SyntheticProvider,
    TickerList, YahooProvider, DEFAULT_EXCHANGE_SUFFIX,
};
use screener_runner::{run_scan, ScanConfig, ScanReport};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::progress::BarProgress;
use crate::render::render_table;

#[derive(Parser)]
#[command(
    name = "screener",
    about = "Momentum screener — rank instruments by technical signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every ticker in the list and print the ranked table.
    Scan {
        /// Ticker file, one symbol per line. Created with a default list if missing.
        #[arg(long)]
        tickers: Option<PathBuf>,

        /// Path to a TOML scan config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Market-data source.
        #[arg(long, value_enum, default_value_t = Source::Yahoo)]
        source: Source,

        /// Directory of `{SYMBOL}.csv` files (with `--source csv`).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Number of ranked rows to keep.
        #[arg(long)]
        top: Option<usize>,

        /// Instruments scanned concurrently. 1 is sequential.
        #[arg(long)]
        workers: Option<usize>,

        /// Last day of the lookback window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Disable the pause between provider requests.
        #[arg(long, default_value_t = false)]
        no_pacing: bool,

        /// Write the ranked rows as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the ranked rows as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Disable colored output.
        #[arg(long, default_value_t = false)]
        no_color: bool,
    },
    /// Print the normalized ticker list.
    Tickers {
        /// Ticker file, one symbol per line.
        #[arg(long, default_value = "tickers.txt")]
        tickers: PathBuf,

        /// Exchange suffix appended to bare tickers.
        #[arg(long, default_value = DEFAULT_EXCHANGE_SUFFIX)]
        suffix: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Yahoo,
    Csv,
    Synthetic,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            tickers,
            config,
            source,
            data_dir,
            top,
            workers,
            as_of,
            no_pacing,
            json,
            csv,
            no_color,
        } => {
            let mut scan_config = match config {
                Some(path) => ScanConfig::from_file(&path)?,
                None => ScanConfig::default(),
            };
            if let Some(path) = tickers {
                scan_config.tickers = path;
            }
            if let Some(top) = top {
                scan_config.top_n = top;
            }
            if let Some(workers) = workers {
                scan_config.workers = workers;
            }
            if let Some(date) = as_of {
                scan_config.as_of = Some(NaiveDate::parse_from_str(&date, "%Y-%m-%d")?);
            }
            if no_pacing {
                scan_config.pacing = Pacing::None;
            }
            scan_config.validate()?;

            let color = !no_color
                && std::env::var_os("NO_COLOR").is_none()
                && std::io::stdout().is_terminal();
            run_scan_cmd(
                &scan_config,
                source,
                &data_dir,
                json.as_deref(),
                csv.as_deref(),
                color,
            )
        }
        Commands::Tickers { tickers, suffix } => run_tickers(&tickers, &suffix),
    }
}

fn run_scan_cmd(
    config: &ScanConfig,
    source: Source,
    data_dir: &Path,
    json: Option<&Path>,
    csv: Option<&Path>,
    color: bool,
) -> Result<()> {
    if TickerList::ensure_file(&config.tickers, &config.exchange_suffix)? {
        eprintln!(
            "[!] {} not found, wrote the default list",
            config.tickers.display()
        );
    }
    let symbols = TickerList::load(&config.tickers, &config.exchange_suffix)?.into_symbols();

    let provider = build_provider(source, data_dir, config.pacing)?;

    println!("=== MOMENTUM SCREENER ===");
    println!("[*] Target: {} instruments", symbols.len());
    println!("[*] Source: {}\n", provider.name());

    let cancel = Arc::new(AtomicBool::new(false));
    install_ctrl_c(Arc::clone(&cancel))?;

    let progress = BarProgress::new(symbols.len())?;
    let today = chrono::Local::now().date_naive();
    let report = run_scan(&symbols, provider.as_ref(), config, today, &cancel, &progress)?;

    if report.cancelled {
        println!("[!] Stopped.");
    }
    print_summary(&report);
    print!("{}", render_table(&report.display_rows(), color));

    if let Some(path) = json {
        report.write_json(path)?;
        println!("JSON written to: {}", path.display());
    }
    if let Some(path) = csv {
        report.write_csv(path)?;
        println!("CSV written to: {}", path.display());
    }

    Ok(())
}

fn build_provider(
    source: Source,
    data_dir: &Path,
    pacing: Pacing,
) -> Result<Box<dyn DataProvider>> {
    Ok(match source {
        Source::Yahoo => {
            let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
            let yahoo = YahooProvider::new(circuit_breaker)?;
            Box::new(PacedProvider::new(yahoo, pacing))
        }
        Source::Csv => {
            if !data_dir.is_dir() {
                anyhow::bail!("data directory does not exist: {}", data_dir.display());
            }
            Box::new(CsvDirProvider::new(data_dir))
        }
        Source::Synthetic => Box::new(SyntheticProvider::default()),
    })
}

/// Raise `cancel` on the first Ctrl-C; exit on the second.
fn install_ctrl_c(cancel: Arc<AtomicBool>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start signal runtime")?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(async {
                loop {
                    if tokio::signal::ctrl_c().await.is_err() {
                        return;
                    }
                    if cancel.swap(true, Ordering::SeqCst) {
                        std::process::exit(130);
                    }
                    warn!("interrupt received, finishing in-flight instruments");
                }
            });
        })
        .context("failed to spawn signal thread")?;

    Ok(())
}

fn print_summary(report: &ScanReport) {
    let c = &report.counts;
    println!(
        "[*] Done: {} evaluated, {} no data, {} short history, {} failed, {} skipped",
        c.evaluated, c.no_data, c.insufficient_history, c.failed, c.skipped
    );
    if !report.failures.is_empty() {
        warn!(failed = report.failures.len(), "some instruments could not be fetched");
    }
    println!();
}

fn run_tickers(path: &Path, suffix: &str) -> Result<()> {
    let list = TickerList::load(path, suffix)
        .with_context(|| format!("load tickers from {}", path.display()))?;
    for symbol in list.symbols() {
        println!("{symbol}");
    }
    eprintln!("{} tickers", list.len());
    Ok(())
}
