//! Feed configuration.
//!
//! Deserialisable from TOML; every field has a default so partial files are
//! accepted.
//!
//! ```toml
//! geography = "usa"
//! time_range = "7d"
//! seed = 42
//!
//! [cadence]
//! applications_ms = 3000
//! overview_ms = 5000
//! ```

use std::time::Duration;

use lending_core::types::{FilterSet, Geography, TimeRange};
use serde::Deserialize;

use crate::cadence::CadenceGroup;
use crate::error::FeedError;

/// Update interval per cadence group, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CadenceIntervals {
    /// Live application log
    pub applications_ms: u64,
    /// Overview KPIs
    pub overview_ms: u64,
    /// Issuance series and high-risk roster
    pub activity_ms: u64,
    /// Interest rate by loan type
    pub rates_ms: u64,
    /// Loan-type breakdown and portfolio yield
    pub portfolio_ms: u64,
    /// Age distribution and regions
    pub demographics_ms: u64,
}

impl Default for CadenceIntervals {
    fn default() -> Self {
        Self {
            applications_ms: 3_000,
            overview_ms: 5_000,
            activity_ms: 10_000,
            rates_ms: 15_000,
            portfolio_ms: 30_000,
            demographics_ms: 60_000,
        }
    }
}

impl CadenceIntervals {
    /// Configured interval in milliseconds for `group`.
    pub fn millis(&self, group: CadenceGroup) -> u64 {
        match group {
            CadenceGroup::Applications => self.applications_ms,
            CadenceGroup::Overview => self.overview_ms,
            CadenceGroup::Activity => self.activity_ms,
            CadenceGroup::Rates => self.rates_ms,
            CadenceGroup::Portfolio => self.portfolio_ms,
            CadenceGroup::Demographics => self.demographics_ms,
        }
    }

    /// Configured interval for `group`.
    pub fn interval(&self, group: CadenceGroup) -> Duration {
        Duration::from_millis(self.millis(group))
    }
}

/// Live feed configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Geography used until the filter source says otherwise
    pub geography: Geography,
    /// Time range used until the filter source says otherwise
    pub time_range: TimeRange,
    /// Cadence intervals
    pub cadence: CadenceIntervals,
    /// Seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl FeedConfig {
    /// Initial filter pair.
    pub fn initial_filters(&self) -> FilterSet {
        FilterSet::new(self.geography, self.time_range)
    }

    /// Validate the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), FeedError> {
        let errors: Vec<String> = CadenceGroup::ALL
            .iter()
            .filter(|group| self.cadence.millis(**group) == 0)
            .map(|group| format!("{} interval must be greater than 0", group))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FeedError::invalid_config(errors.join("; ")))
        }
    }
}
