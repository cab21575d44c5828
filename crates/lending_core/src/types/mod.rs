//! Core types for the lending feed.
//!
//! This module provides:
//! - `filters`: the geography and time-range selectors that parameterise generation
//! - `categories`: closed category enumerations shared by every dataset
//! - `error`: structured errors for parsing filter input

pub mod categories;
pub mod error;
pub mod filters;

pub use categories::{AgeGroup, ApplicationStatus, LoanType, PaymentStatus};
pub use error::FilterError;
pub use filters::{FilterSet, Geography, Sampling, TimeRange};
