//! Data collaborators: market-data providers, request pacing, and the
//! instrument list.
//!
//! None of this is needed to score a bar series; the scoring core only ever
//! sees `&[Bar]`. Providers hand over canonicalized bars (sorted, one per
//! date) so the core's ordering contract holds.

pub mod circuit_breaker;
pub mod csv_dir;
pub mod pacing;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_dir::CsvDirProvider;
pub use pacing::{PacedProvider, Pacing};
pub use provider::{canonicalize, DataError, DataProvider, DataSource, FetchResult};
pub use synthetic::SyntheticProvider;
pub use universe::{TickerList, UniverseError, DEFAULT_EXCHANGE_SUFFIX};
pub use yahoo::YahooProvider;
