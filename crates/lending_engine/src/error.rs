//! Error types for the live feed.

use lending_core::types::FilterError;
use thiserror::Error;

/// Feed error type
#[derive(Debug, Error)]
pub enum FeedError {
    /// Configuration rejected by validation
    #[error("Invalid feed configuration: {0}")]
    InvalidConfig(String),

    /// Filter value could not be parsed
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// The feed task is no longer running
    #[error("Feed stopped")]
    FeedStopped,

    /// No Tokio runtime to spawn the feed on
    #[error("Live feed must be started from within a Tokio runtime")]
    NoRuntime,
}

impl FeedError {
    /// Create a configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::invalid_config("zero interval");
        assert!(err.to_string().contains("zero interval"));

        let err: FeedError = FilterError::UnknownGeography("mars".to_string()).into();
        assert_eq!(err.to_string(), "Filter error: Unknown geography: mars");
    }
}
