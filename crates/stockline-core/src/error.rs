// File: crates/stockline-core/src/error.rs
// Summary: Error taxonomy for chart builds (input, configuration, backend).

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("no datasets supplied")]
    NoDatasets,

    #[error("series `{label}` has no records")]
    EmptySeries { label: String },

    #[error("series `{label}`: unparseable date `{token}` (expected YYYY-MM-DD)")]
    InvalidDate { label: String, token: String },

    #[error("series `{label}`: non-finite close price on {date}")]
    InvalidPrice { label: String, date: String },

    #[error("reference series `{label}` has no points")]
    EmptyReferenceSeries { label: String },

    #[error("reference series index {index} out of range for {len} series")]
    ReferenceOutOfRange { index: usize, len: usize },

    #[error("margins leave no plot area: width={width}, height={height}")]
    InvalidLayout { width: i64, height: i64 },

    #[error("surface error: {0}")]
    Surface(String),
}

impl ChartError {
    /// True for errors caused by malformed input data, as opposed to
    /// chart configuration or backend failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NoDatasets
                | Self::EmptySeries { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidPrice { .. }
        )
    }
}
