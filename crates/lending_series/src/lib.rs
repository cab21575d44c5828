//! # lending_series: Dataset Generators and Updaters
//!
//! ## Layer 2 (Series) Role
//!
//! lending_series defines the nine datasets of the lending feed and the two
//! families of pure functions over them:
//!
//! - **Generators** (`generators`): build an initial dataset from the filter
//!   pair. Shapes (category and point counts) depend on the filters only.
//! - **Updaters** (`updaters`): map the current dataset to the next one.
//!   Category sets, roster membership and series lengths never change.
//!
//! Randomness is always injected as a `rand::Rng`, so callers pick between a
//! reproducible `lending_core::rng::FeedRng` and any other source.
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::Utc;
//! use lending_core::rng::FeedRng;
//! use lending_core::types::{FilterSet, Geography, TimeRange};
//! use lending_series::generators::generate_snapshot;
//! use lending_series::updaters::update_issuance;
//!
//! let mut rng = FeedRng::from_seed(42);
//! let filters = FilterSet::new(Geography::Usa, TimeRange::Day);
//! let snapshot = generate_snapshot(filters, Utc::now(), &mut rng);
//! assert_eq!(snapshot.issuance.len(), 24);
//!
//! let next = update_issuance(&snapshot.issuance, filters, &mut rng);
//! assert_eq!(next.len(), 24);
//! ```

#![deny(missing_docs)]

pub mod constants;
pub mod datasets;
pub mod generators;
pub mod names;
pub mod updaters;

pub use datasets::{DashboardSnapshot, DatasetKind};
