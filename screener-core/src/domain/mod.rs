//! Domain types for the momentum screener.

pub mod bar;
pub mod indicator_row;

pub use bar::{validate_series, Bar, SeriesError};
pub use indicator_row::IndicatorRow;
