//! # lending_core: Foundation for the Lending Portfolio Feed
//!
//! ## Layer 1 (Foundation) Role
//!
//! lending_core is the bottom layer of the feed workspace, providing:
//! - Filter selectors: `Geography`, `TimeRange`, `FilterSet` (`types::filters`)
//! - Closed category sets: `LoanType`, `AgeGroup`, `ApplicationStatus`, `PaymentStatus`
//!   (`types::categories`)
//! - The bounded perturbation model `apply_variance` (`math::variance`)
//! - The fixed-capacity `RollingWindow` (`window`)
//! - A seedable random source `FeedRng` (`rng`)
//! - Error types: `FilterError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other lending_* crates, with minimal external dependencies:
//! - rand: uniform draws for variance, selection and identifiers
//! - chrono: timestamp labelling
//! - serde: serialisation of filters and categories
//! - thiserror: error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use lending_core::math::variance::apply_variance;
//! use lending_core::rng::FeedRng;
//! use lending_core::types::{FilterSet, Geography, TimeRange};
//!
//! let filters = FilterSet::new(Geography::Usa, TimeRange::Day);
//! assert_eq!(filters.geography.scale(), 1.5);
//! assert_eq!(filters.time_range.issuance_points(), 24);
//!
//! let mut rng = FeedRng::from_seed(7);
//! let moved = apply_variance(100.0, 2.0, &mut rng);
//! assert!((98.0..=102.0).contains(&moved));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
pub mod window;
