//! # Live Dashboard Demo
//!
//! Runs the lending feed for a configured time, steps through an optional
//! tour of filter selections and reports snapshots as summary lines or JSON.
//!
//! Configuration comes from a TOML file, `LIVE_DASHBOARD_*` environment
//! variables and CLI flags, in increasing order of precedence.

pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod tour;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{build_config, CliArgs, DemoConfig, OutputFormat};
    pub use crate::error::DemoError;
    pub use crate::render::{render, DashboardSummary};
    pub use crate::session::DashboardSession;
    pub use crate::tour::FilterTour;
}
