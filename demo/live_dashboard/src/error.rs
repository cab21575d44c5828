//! Error types for the live dashboard demo.

use thiserror::Error;

/// Demo error type
#[derive(Debug, Error)]
pub enum DemoError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Feed error
    #[error("Feed error: {0}")]
    Feed(#[from] lending_engine::FeedError),

    /// Filter code error
    #[error("Filter error: {0}")]
    Filter(#[from] lending_core::types::FilterError),

    /// Snapshot serialisation error
    #[error("Serialisation error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_error_display() {
        let err: DemoError = ConfigError::Parse("bad toml".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Parse error: bad toml");

        let err: DemoError = lending_engine::FeedError::FeedStopped.into();
        assert!(err.to_string().contains("Feed stopped"));
    }
}
