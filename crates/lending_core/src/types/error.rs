//! Error types for filter parsing.
//!
//! Filters are closed enumerations once inside the feed; the only place
//! malformed values can appear is when text is parsed at the boundary.

use thiserror::Error;

/// Errors from parsing filter selectors.
///
/// # Examples
/// ```
/// use lending_core::types::{FilterError, Geography};
///
/// let err = "mars".parse::<Geography>().unwrap_err();
/// assert_eq!(err, FilterError::UnknownGeography("mars".to_string()));
/// assert_eq!(format!("{}", err), "Unknown geography: mars");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Geography value outside {all, usa, uk, germany, canada, france}.
    #[error("Unknown geography: {0}")]
    UnknownGeography(String),

    /// Time-range value outside {24h, 7d, 30d, all}.
    #[error("Unknown time range: {0}")]
    UnknownTimeRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        let err = FilterError::UnknownTimeRange("90d".to_string());
        assert_eq!(err.to_string(), "Unknown time range: 90d");
    }
}
