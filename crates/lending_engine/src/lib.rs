//! # lending_engine: Cadence Scheduling and Snapshot Publication
//!
//! ## Layer 3 (Engine) Role
//!
//! lending_engine drives the datasets of `lending_series` over time:
//! - Six cadence groups with fixed, independent intervals (`cadence`)
//! - A synchronous coordinator owning the nine-dataset snapshot and the
//!   Active / Reinitializing state machine (`coordinator`)
//! - One periodic trigger task per cadence group (`triggers`)
//! - An observable filter selection (`filter_source`)
//! - The async feed actor and its handle (`feed`)
//! - Counters exposed as `FeedStatistics` (`statistics`)
//! - Configuration loaded from TOML (`config`)
//!
//! ## Consistency
//!
//! All snapshot mutation happens on the single feed task. A filter change
//! cancels every trigger before regeneration and bumps the epoch, so a tick
//! issued under the previous filters can never reach the new snapshot.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use lending_core::types::Geography;
//! use lending_engine::{FeedConfig, LiveFeed};
//!
//! # async fn run() -> Result<(), lending_engine::FeedError> {
//! let feed = LiveFeed::spawn(FeedConfig::default())?;
//! let mut updates = feed.subscribe();
//!
//! updates.changed().await.ok();
//! println!("active loans: {}", updates.borrow().overview.active_loans);
//!
//! if let Some(source) = feed.filter_source() {
//!     source.set_geography(Geography::Uk);
//! }
//! feed.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cadence;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod feed;
pub mod filter_source;
pub mod statistics;
pub mod triggers;

pub use cadence::CadenceGroup;
pub use config::{CadenceIntervals, FeedConfig};
pub use coordinator::{Coordinator, FeedState};
pub use error::FeedError;
pub use feed::{FeedHandle, LiveFeed};
pub use filter_source::FilterSource;
pub use statistics::FeedStatistics;
