//! Demo configuration management.
//!
//! Handles loading configuration from TOML files, `LIVE_DASHBOARD_*`
//! environment variables and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use lending_core::types::{Geography, TimeRange};
use lending_engine::FeedConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::tour::FilterTour;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "LIVE_DASHBOARD_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// How snapshots are reported
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One summary line per report
    #[default]
    Summary,
    /// Full snapshot as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Parse(format!("Unknown output format: {}", other))),
        }
    }
}

/// Demo configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Log level
    pub log_level: String,

    /// Run time in seconds; 0 runs until Ctrl-C
    pub duration_secs: u64,

    /// Seconds between snapshot reports
    pub report_interval_secs: u64,

    /// Report format
    pub output: OutputFormat,

    /// Filter selections as `geography/time_range` codes, visited in order
    pub filter_tour: Vec<String>,

    /// Seconds between filter tour steps
    pub tour_interval_secs: u64,

    /// Feed configuration
    pub feed: FeedConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            duration_secs: 60,
            report_interval_secs: 5,
            output: OutputFormat::default(),
            filter_tour: Vec::new(),
            tour_interval_secs: 30,
            feed: FeedConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from `lookup`, keyed by the variable name without prefix.
    ///
    /// Values that fail to parse leave the current setting untouched.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(geography) = lookup("GEOGRAPHY").and_then(|v| Geography::from_str(&v).ok()) {
            self.feed.geography = geography;
        }
        if let Some(range) = lookup("TIME_RANGE").and_then(|v| TimeRange::from_str(&v).ok()) {
            self.feed.time_range = range;
        }
        if let Some(seed) = lookup("SEED").and_then(|v| v.parse().ok()) {
            self.feed.seed = Some(seed);
        }
        if let Some(duration) = lookup("DURATION_SECS").and_then(|v| v.parse().ok()) {
            self.duration_secs = duration;
        }
        if let Some(interval) = lookup("REPORT_INTERVAL_SECS").and_then(|v| v.parse().ok()) {
            self.report_interval_secs = interval;
        }
        if let Some(output) = lookup("OUTPUT").and_then(|v| OutputFormat::from_str(&v).ok()) {
            self.output = output;
        }
        if let Some(tour) = lookup("FILTER_TOUR") {
            self.filter_tour = tour
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        self
    }

    /// Apply CLI overrides
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(geography) = cli.geography {
            self.feed.geography = geography;
        }
        if let Some(range) = cli.time_range {
            self.feed.time_range = range;
        }
        if let Some(seed) = cli.seed {
            self.feed.seed = Some(seed);
        }
        if let Some(duration) = cli.duration_secs {
            self.duration_secs = duration;
        }
        if let Some(interval) = cli.report_interval_secs {
            self.report_interval_secs = interval;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if !cli.filter_tour.is_empty() {
            self.filter_tour = cli.filter_tour.clone();
        }
    }

    /// Parsed filter tour.
    pub fn tour(&self) -> Result<FilterTour, ConfigError> {
        FilterTour::parse(&self.filter_tour).map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.report_interval_secs == 0 {
            errors.push("report_interval_secs must be greater than 0".to_string());
        }

        if !self.filter_tour.is_empty() && self.tour_interval_secs == 0 {
            errors.push("tour_interval_secs must be greater than 0 when a filter tour is set".to_string());
        }

        if let Err(e) = FilterTour::parse(&self.filter_tour) {
            errors.push(format!("Invalid filter_tour: {}", e));
        }

        if let Err(e) = self.feed.validate() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Geography override
    pub geography: Option<Geography>,
    /// Time range override
    pub time_range: Option<TimeRange>,
    /// Seed override
    pub seed: Option<u64>,
    /// Run time override
    pub duration_secs: Option<u64>,
    /// Report interval override
    pub report_interval_secs: Option<u64>,
    /// Output format override
    pub output: Option<OutputFormat>,
    /// Filter tour override
    pub filter_tour: Vec<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<DemoConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    }
    .with_env_override();

    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_validates() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output, OutputFormat::Summary);
        assert!(config.filter_tour.is_empty());
    }

    #[test]
    fn test_toml_with_nested_feed() {
        let config = DemoConfig::from_toml_str(
            r#"
            duration_secs = 0
            output = "json"
            filter_tour = ["uk/7d"]

            [feed]
            geography = "canada"

            [feed.cadence]
            rates_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.duration_secs, 0);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.feed.geography, Geography::Canada);
        assert_eq!(config.feed.cadence.rates_ms, 1500);
        assert_eq!(config.report_interval_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = DemoConfig::default().with_overrides_from(lookup(&[
            ("GEOGRAPHY", "germany"),
            ("TIME_RANGE", "all"),
            ("SEED", "99"),
            ("OUTPUT", "JSON"),
            ("FILTER_TOUR", "usa/24h, uk/30d"),
        ]));

        assert_eq!(config.feed.geography, Geography::Germany);
        assert_eq!(config.feed.time_range, TimeRange::AllTime);
        assert_eq!(config.feed.seed, Some(99));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.filter_tour, vec!["usa/24h", "uk/30d"]);
    }

    #[test]
    fn test_unparseable_env_value_ignored() {
        let config = DemoConfig::default().with_overrides_from(lookup(&[
            ("GEOGRAPHY", "narnia"),
            ("DURATION_SECS", "soon"),
        ]));
        assert_eq!(config.feed.geography, Geography::All);
        assert_eq!(config.duration_secs, 60);
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config =
            DemoConfig::default().with_overrides_from(lookup(&[("GEOGRAPHY", "germany"), ("SEED", "1")]));
        config.merge_with_cli(&CliArgs {
            geography: Some(Geography::France),
            ..CliArgs::default()
        });

        assert_eq!(config.feed.geography, Geography::France);
        assert_eq!(config.feed.seed, Some(1));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = DemoConfig::default();
        config.log_level = "loud".to_string();
        config.report_interval_secs = 0;
        config.filter_tour = vec!["mars/24h".to_string()];
        config.feed.cadence.applications_ms = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("filter_tour")));
                assert!(errors.iter().any(|e| e.contains("applications")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_config_missing_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/live_dashboard.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = error.to_string();
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
