//! End-to-end scan tests: ticker file, offline providers, report export.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use screener_core::data::{CsvDirProvider, PacedProvider, Pacing, SyntheticProvider, TickerList};
use screener_runner::{
    run_scan, InstrumentOutcome, NoProgress, OutcomeCounts, ScanConfig, ScanProgress,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

fn config(workers: usize) -> ScanConfig {
    ScanConfig {
        workers,
        as_of: Some(as_of()),
        pacing: Pacing::None,
        ..ScanConfig::default()
    }
}

/// Write a CSV per symbol using the synthetic walk, so the CSV provider
/// serves realistic data.
fn write_csv_dir(dir: &Path, symbols: &[&str], days: i64) {
    let synthetic = SyntheticProvider::default();
    for symbol in symbols {
        let bars = synthetic.generate(symbol, as_of() - chrono::Duration::days(days), as_of());
        let mut wtr = csv::Writer::from_path(dir.join(format!("{symbol}.csv"))).unwrap();
        wtr.write_record(["date", "open", "high", "low", "close", "volume"])
            .unwrap();
        for b in bars {
            wtr.write_record([
                b.date.to_string(),
                b.open.to_string(),
                b.high.to_string(),
                b.low.to_string(),
                b.close.to_string(),
                b.volume.to_string(),
            ])
            .unwrap();
        }
        wtr.flush().unwrap();
    }
}

// ── Ticker file → CSV provider → report ──────────────────────────────

#[test]
fn csv_directory_scan_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_dir(dir.path(), &["BBCA.JK", "BBRI.JK", "TLKM.JK"], 400);
    write_csv_dir(dir.path(), &["GOTO.JK"], 100);

    let tickers = dir.path().join("tickers.txt");
    std::fs::write(&tickers, "bbca\nBBRI.JK\ntlkm\ngoto\nbbca\nmissing\n").unwrap();
    let symbols = TickerList::load(&tickers, ".JK").unwrap().into_symbols();
    assert_eq!(symbols.len(), 5);

    let provider = CsvDirProvider::new(dir.path());
    let cancel = AtomicBool::new(false);
    let report = run_scan(&symbols, &provider, &config(2), as_of(), &cancel, &NoProgress).unwrap();

    assert_eq!(
        report.counts,
        OutcomeCounts {
            total: 5,
            evaluated: 3,
            no_data: 1,
            insufficient_history: 1,
            failed: 0,
            skipped: 0,
        }
    );
    assert_eq!(report.results.len(), 3);
    for pair in report.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let rows = report.display_rows();
    assert!(rows.iter().all(|r| !r.stock.ends_with(".JK")));

    let csv = report.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn top_n_caps_results() {
    let symbols: Vec<String> = (0..20).map(|i| format!("S{i:02}.JK")).collect();
    let config = ScanConfig {
        top_n: 5,
        ..config(4)
    };
    let cancel = AtomicBool::new(false);
    let report = run_scan(
        &symbols,
        &SyntheticProvider::default(),
        &config,
        as_of(),
        &cancel,
        &NoProgress,
    )
    .unwrap();

    assert_eq!(report.counts.evaluated, 20);
    assert_eq!(report.results.len(), 5);
}

#[test]
fn paced_provider_scan() {
    let provider = PacedProvider::new(SyntheticProvider::default(), Pacing::Fixed { millis: 1 });
    let symbols = vec!["BBCA.JK".to_string(), "BMRI.JK".to_string()];
    let cancel = AtomicBool::new(false);
    let report = run_scan(&symbols, &provider, &config(1), as_of(), &cancel, &NoProgress).unwrap();
    assert_eq!(report.counts.evaluated, 2);
}

#[test]
fn pacing_holds_across_parallel_workers() {
    let provider = PacedProvider::new(SyntheticProvider::default(), Pacing::Fixed { millis: 50 });
    let symbols: Vec<String> = (0..8).map(|i| format!("S{i}.JK")).collect();
    let cancel = AtomicBool::new(false);
    let began = Instant::now();
    let report = run_scan(&symbols, &provider, &config(8), as_of(), &cancel, &NoProgress).unwrap();
    assert_eq!(report.counts.total, 8);
    assert!(began.elapsed() >= Duration::from_millis(7 * 50));
}

// ── Progress and cancellation ────────────────────────────────────────

/// Records callbacks and raises the cancel flag after `cancel_after`
/// completions.
struct CancellingProgress<'a> {
    cancel: &'a AtomicBool,
    cancel_after: usize,
    started: AtomicUsize,
    completed: AtomicUsize,
    batch: Mutex<Option<OutcomeCounts>>,
}

impl ScanProgress for CancellingProgress<'_> {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        outcome: &InstrumentOutcome,
    ) {
        assert!(!matches!(outcome, InstrumentOutcome::Skipped));
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        if done >= self.cancel_after {
            self.cancel.store(true, Ordering::SeqCst);
        }
    }

    fn on_batch_complete(&self, counts: &OutcomeCounts) {
        *self.batch.lock().unwrap() = Some(*counts);
    }
}

#[test]
fn cancellation_keeps_partial_results() {
    let symbols: Vec<String> = (0..10).map(|i| format!("C{i}.JK")).collect();
    let cancel = AtomicBool::new(false);
    let progress = CancellingProgress {
        cancel: &cancel,
        cancel_after: 3,
        started: AtomicUsize::new(0),
        completed: AtomicUsize::new(0),
        batch: Mutex::new(None),
    };

    let report = run_scan(
        &symbols,
        &SyntheticProvider::default(),
        &config(1),
        as_of(),
        &cancel,
        &progress,
    )
    .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.counts.evaluated, 3);
    assert_eq!(report.counts.skipped, 7);
    assert_eq!(report.results.len(), 3);
    assert_eq!(progress.started.load(Ordering::SeqCst), 3);
    assert_eq!(*progress.batch.lock().unwrap(), Some(report.counts));
}

#[test]
fn progress_sees_every_instrument() {
    let symbols: Vec<String> = (0..6).map(|i| format!("P{i}.JK")).collect();
    let cancel = AtomicBool::new(false);
    let progress = CancellingProgress {
        cancel: &cancel,
        cancel_after: usize::MAX,
        started: AtomicUsize::new(0),
        completed: AtomicUsize::new(0),
        batch: Mutex::new(None),
    };

    let report = run_scan(
        &symbols,
        &SyntheticProvider::default(),
        &config(3),
        as_of(),
        &cancel,
        &progress,
    )
    .unwrap();

    assert!(!report.cancelled);
    assert_eq!(progress.started.load(Ordering::SeqCst), 6);
    assert_eq!(progress.completed.load(Ordering::SeqCst), 6);
    assert_eq!(report.counts.total, 6);
}
