//! Design constants: value ranges, spreads, capacities.
//!
//! Ranges are inclusive and given before the geography scale factor.

use std::ops::RangeInclusive;

// Overview
/// Active loan count range.
pub const ACTIVE_LOANS_RANGE: RangeInclusive<u64> = 5_000..=15_000;
/// Total loan amount range.
pub const TOTAL_AMOUNT_RANGE: RangeInclusive<u64> = 50_000_000..=150_000_000;
/// Average interest rate range, percent.
pub const AVERAGE_RATE_RANGE: RangeInclusive<f64> = 3.5..=7.5;
/// Default rate range, percent.
pub const DEFAULT_RATE_RANGE: RangeInclusive<f64> = 1.5..=4.5;
/// Points kept in each overview trend.
pub const TREND_CAPACITY: usize = 12;

// Issuance
/// New loans per period.
pub const NEW_LOANS_RANGE: RangeInclusive<u64> = 50..=200;
/// Amount issued per period.
pub const ISSUED_AMOUNT_RANGE: RangeInclusive<u64> = 500_000..=2_000_000;
/// Lower bound for new loans after a random-walk step.
pub const NEW_LOANS_FLOOR: u64 = 10;
/// Lower bound for amount issued after a random-walk step.
pub const ISSUED_AMOUNT_FLOOR: u64 = 100_000;

// Categorical breakdowns
/// Loans per loan type.
pub const LOAN_TYPE_COUNT_RANGE: RangeInclusive<u64> = 500..=3_000;
/// Amount per loan type.
pub const LOAN_TYPE_AMOUNT_RANGE: RangeInclusive<u64> = 5_000_000..=30_000_000;
/// Borrowers per age bucket.
pub const BORROWERS_RANGE: RangeInclusive<u64> = 800..=2_500;
/// Amount per region.
pub const REGION_AMOUNT_RANGE: RangeInclusive<u64> = 2_000_000..=15_000_000;
/// Average rate per loan type, percent.
pub const TYPE_RATE_RANGE: RangeInclusive<f64> = 3.0..=8.0;
/// Issued amount per loan type.
pub const TYPE_ISSUED_RANGE: RangeInclusive<u64> = 3_000_000..=20_000_000;

// Live applications
/// Requested amount per application.
pub const REQUESTED_AMOUNT_RANGE: RangeInclusive<u64> = 5_000..=500_000;
/// Maximum entries in the live log.
pub const LIVE_LOG_CAPACITY: usize = 50;
/// Spacing of backfilled log entries, seconds.
pub const LIVE_LOG_SPACING_SECS: i64 = 3;
/// Application identifier length.
pub const APPLICATION_ID_LEN: usize = 8;

// Portfolio yield
/// Monthly yield range, percent.
pub const YIELD_RANGE: RangeInclusive<f64> = 4.5..=7.0;
/// Trailing months still perturbed on update.
pub const YIELD_VOLATILE_MONTHS: usize = 3;

// High-risk roster
/// Roster size.
pub const ROSTER_SIZE_RANGE: RangeInclusive<usize> = 10..=20;
/// Outstanding amount per client.
pub const CLIENT_AMOUNT_RANGE: RangeInclusive<u64> = 50_000..=500_000;
/// Risk score range at generation.
pub const INITIAL_RISK_SCORE_RANGE: RangeInclusive<u16> = 650..=850;
/// Lower clamp for risk scores after an update.
pub const RISK_SCORE_MIN: u16 = 600;
/// Upper clamp for risk scores.
pub const RISK_SCORE_MAX: u16 = 850;
/// Risk score adjustment per update.
pub const RISK_SCORE_DELTA: RangeInclusive<i32> = -30..=30;
/// Clients touched per roster update.
pub const ROSTER_UPDATES_PER_TICK: RangeInclusive<usize> = 2..=3;
/// Client identifier length.
pub const CLIENT_ID_LEN: usize = 10;

/// Variance spreads per field, percent.
pub mod spread {
    /// Overview active loans.
    pub const ACTIVE_LOANS: f64 = 2.0;
    /// Overview total amount.
    pub const TOTAL_AMOUNT: f64 = 2.0;
    /// Overview average rate.
    pub const AVERAGE_RATE: f64 = 1.0;
    /// Overview default rate.
    pub const DEFAULT_RATE: f64 = 1.5;
    /// Issuance random walk.
    pub const ISSUANCE: f64 = 10.0;
    /// Loan type count and amount.
    pub const LOAN_TYPE: f64 = 5.0;
    /// Age bucket borrowers.
    pub const AGE: f64 = 3.0;
    /// Region amount.
    pub const REGION: f64 = 4.0;
    /// Interest rate per type.
    pub const TYPE_RATE: f64 = 2.0;
    /// Issued amount per type.
    pub const TYPE_ISSUED: f64 = 3.0;
    /// Portfolio yield.
    pub const YIELD: f64 = 0.3;
}
