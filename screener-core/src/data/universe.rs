//! Instrument list: a plain text file with one ticker per line.
//!
//! Symbols are normalized on load (whitespace stripped, upper-cased,
//! exchange suffix appended) and de-duplicated.

use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Exchange suffix appended to bare tickers (Indonesia Stock Exchange).
pub const DEFAULT_EXCHANGE_SUFFIX: &str = ".JK";

/// Written when the ticker file does not exist yet.
const DEFAULT_TICKERS: [&str; 32] = [
    "BBCA", "BBRI", "BMRI", "BBNI", "TLKM", "ASII", "UNTR", "ICBP", "GOTO", "ADRO", "PGAS",
    "PTBA", "ANTM", "INCO", "MDKA", "BRIS", "KLBF", "INDF", "INKP", "TKIM", "CPIN", "JPFA",
    "SMGR", "INTP", "AMRT", "MAPI", "MEDC", "AKRA", "EXCL", "ISAT", "ACES", "BRPT",
];

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read ticker file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write ticker file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Normalized, de-duplicated set of instrument symbols in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerList {
    symbols: Vec<String>,
}

impl TickerList {
    /// Load and normalize a ticker file.
    pub fn load(path: &Path, suffix: &str) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&content, suffix))
    }

    /// Normalize ticker text, one symbol per line. Blank lines are ignored.
    pub fn parse(content: &str, suffix: &str) -> Self {
        let symbols: BTreeSet<String> = content
            .lines()
            .filter_map(|line| normalize_symbol(line, suffix))
            .collect();
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    /// Write the default list when `path` does not exist.
    ///
    /// Returns true if the file was created.
    pub fn ensure_file(path: &Path, suffix: &str) -> Result<bool, UniverseError> {
        if path.exists() {
            return Ok(false);
        }

        let body: String = DEFAULT_TICKERS
            .iter()
            .map(|t| format!("{t}{suffix}\n"))
            .collect();
        std::fs::write(path, body).map_err(|source| UniverseError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::warn!(path = %path.display(), "ticker file not found, wrote default list");
        Ok(true)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn into_symbols(self) -> Vec<String> {
        self.symbols
    }
}

/// Normalize one raw ticker: strip all whitespace, upper-case, and append
/// `suffix` unless already present. `None` for blank input.
pub fn normalize_symbol(raw: &str, suffix: &str) -> Option<String> {
    let mut symbol: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if symbol.is_empty() {
        return None;
    }
    let suffix = suffix.to_uppercase();
    if !symbol.ends_with(&suffix) {
        symbol.push_str(&suffix);
    }
    Some(symbol)
}
