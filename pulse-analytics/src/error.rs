//! Analytics error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The filtered snapshot view holds no rows.
    #[error("no data available")]
    NoDataAvailable,

    /// Quantile bucket boundaries cannot be formed.
    #[error("insufficient distinct values in {field}: {distinct} found, {required} required")]
    InsufficientDistinctValues {
        field: &'static str,
        distinct: usize,
        required: usize,
    },
}

/// Result type alias for analytics queries.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
