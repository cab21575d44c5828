//! Numeric primitives for the feed.
//!
//! - `variance`: bounded uniform perturbation of scalars, with the count
//!   (floor) and rate (two-decimal) rounding conventions

pub mod variance;

pub use variance::{apply_variance, floor_count, round2, vary_count, vary_rate};
