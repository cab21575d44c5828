//! Series generators: one constructor per dataset kind.
//!
//! Each generator is a function of the filter pair and the injected random
//! source (plus the generation instant for time-bearing datasets). The
//! *shape* of every output, meaning its number of categories or points,
//! depends on the filters alone; only magnitudes are random. Every volume
//! and amount is multiplied by the geography's scale factor.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use lending_core::math::variance::{floor_count, round2};
use lending_core::types::filters::month_label;
use lending_core::types::{AgeGroup, ApplicationStatus, FilterSet, LoanType, PaymentStatus, Sampling};
use lending_core::window::RollingWindow;
use rand::Rng;

use crate::constants::*;
use crate::datasets::{
    AgeBucket, ApplicationLog, DashboardSnapshot, HighRiskClient, InterestRateByType,
    IssuancePoint, IssuanceSeries, LiveApplication, LoanTypeSlice, OverviewSnapshot, RegionShare,
    TrendSeries, YieldPoint,
};
use crate::names::{full_name, unique_id};

/// Draws from `range` and applies the geography scale, flooring to an integer.
fn scaled<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<u64>, scale: f64) -> u64 {
    floor_count(rng.gen_range(range) as f64 * scale)
}

/// Draws a rate from `range`, rounded to two decimals.
fn rate<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<f64>) -> f64 {
    round2(rng.gen_range(range))
}

/// Generates all nine datasets for `filters`.
///
/// The returned snapshot carries epoch 0; the coordinator stamps the real epoch.
pub fn generate_snapshot<R: Rng + ?Sized>(
    filters: FilterSet,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DashboardSnapshot {
    DashboardSnapshot {
        filters,
        epoch: 0,
        overview: generate_overview(filters, rng),
        issuance: generate_issuance(filters, now, rng),
        loan_types: generate_loan_types(filters, rng),
        age_distribution: generate_age_distribution(filters, rng),
        regions: generate_regions(filters, rng),
        interest_rates: generate_interest_rates(filters, rng),
        live_applications: generate_live_applications(filters, now, rng),
        portfolio_yield: generate_portfolio_yield(filters, now, rng),
        high_risk_clients: generate_high_risk_clients(filters, rng),
    }
}

/// Generates the overview KPIs; each trend starts with the initial value.
pub fn generate_overview<R: Rng + ?Sized>(filters: FilterSet, rng: &mut R) -> OverviewSnapshot {
    let scale = filters.geography.scale();
    let active_loans = scaled(rng, ACTIVE_LOANS_RANGE, scale);
    let total_amount = scaled(rng, TOTAL_AMOUNT_RANGE, scale);
    let average_rate = rate(rng, AVERAGE_RATE_RANGE);
    let default_rate = rate(rng, DEFAULT_RATE_RANGE);

    OverviewSnapshot {
        active_loans,
        total_amount,
        average_rate,
        default_rate,
        active_loans_trend: TrendSeries::starting_at(active_loans as f64),
        total_amount_trend: TrendSeries::starting_at(total_amount as f64),
        average_rate_trend: TrendSeries::starting_at(average_rate),
        default_rate_trend: TrendSeries::starting_at(default_rate),
    }
}

/// Generates the issuance series.
///
/// The point count comes from the time range (24 hourly, 7 or 30 daily, 12
/// monthly); the newest point sits at the start of the sampling period
/// containing `now` and earlier points step back one sampling period each.
pub fn generate_issuance<R: Rng + ?Sized>(
    filters: FilterSet,
    now: DateTime<Utc>,
    rng: &mut R,
) -> IssuanceSeries {
    let scale = filters.geography.scale();
    let count = filters.time_range.issuance_points();
    let sampling = filters.time_range.sampling();
    let anchor = sampling.truncate(now);

    let points = (0..count).map(|i| {
        let timestamp = sampling.shift(anchor, -((count - 1 - i) as i32));
        IssuancePoint {
            label: sampling.label(timestamp),
            timestamp,
            new_loans: scaled(rng, NEW_LOANS_RANGE, scale),
            loan_amount: scaled(rng, ISSUED_AMOUNT_RANGE, scale),
        }
    });
    RollingWindow::from_items(count, points.collect::<Vec<_>>())
}

/// Generates the five loan-type slices.
pub fn generate_loan_types<R: Rng + ?Sized>(filters: FilterSet, rng: &mut R) -> Vec<LoanTypeSlice> {
    let scale = filters.geography.scale();
    LoanType::ALL
        .iter()
        .map(|&loan_type| LoanTypeSlice {
            loan_type,
            count: scaled(rng, LOAN_TYPE_COUNT_RANGE, scale),
            amount: scaled(rng, LOAN_TYPE_AMOUNT_RANGE, scale),
        })
        .collect()
}

/// Generates the five age buckets.
pub fn generate_age_distribution<R: Rng + ?Sized>(filters: FilterSet, rng: &mut R) -> Vec<AgeBucket> {
    let scale = filters.geography.scale();
    AgeGroup::ALL
        .iter()
        .map(|&age_group| AgeBucket {
            age_group,
            borrowers_count: scaled(rng, BORROWERS_RANGE, scale),
        })
        .collect()
}

/// Generates one share per region of the active geography.
pub fn generate_regions<R: Rng + ?Sized>(filters: FilterSet, rng: &mut R) -> Vec<RegionShare> {
    let scale = filters.geography.scale();
    filters
        .geography
        .regions()
        .iter()
        .map(|region| RegionShare {
            region: (*region).to_string(),
            loan_amount: scaled(rng, REGION_AMOUNT_RANGE, scale),
        })
        .collect()
}

/// Generates rate and issued amount for the five loan types.
pub fn generate_interest_rates<R: Rng + ?Sized>(
    filters: FilterSet,
    rng: &mut R,
) -> Vec<InterestRateByType> {
    let scale = filters.geography.scale();
    LoanType::ALL
        .iter()
        .map(|&loan_type| InterestRateByType {
            loan_type,
            average_rate: rate(rng, TYPE_RATE_RANGE),
            issued_amount: scaled(rng, TYPE_ISSUED_RANGE, scale),
        })
        .collect()
}

/// Draws one live application submitted at `timestamp` whose id is not in `taken`.
pub fn generate_application<R: Rng + ?Sized>(
    filters: FilterSet,
    timestamp: DateTime<Utc>,
    taken: &HashSet<String>,
    rng: &mut R,
) -> LiveApplication {
    LiveApplication {
        application_id: unique_id(rng, APPLICATION_ID_LEN, taken),
        timestamp,
        time_label: timestamp.format("%H:%M:%S").to_string(),
        loan_type: LoanType::random(rng),
        requested_amount: scaled(rng, REQUESTED_AMOUNT_RANGE, filters.geography.scale()),
        status: ApplicationStatus::random(rng),
    }
}

/// Backfills a full log of 50 applications, 3 seconds apart, ending before `now`.
pub fn generate_live_applications<R: Rng + ?Sized>(
    filters: FilterSet,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ApplicationLog {
    let mut taken = HashSet::with_capacity(LIVE_LOG_CAPACITY);
    let mut log = RollingWindow::new(LIVE_LOG_CAPACITY);
    for i in 0..LIVE_LOG_CAPACITY {
        let offset = (LIVE_LOG_CAPACITY - i) as i64 * LIVE_LOG_SPACING_SECS;
        let entry = generate_application(filters, now - Duration::seconds(offset), &taken, rng);
        taken.insert(entry.application_id.clone());
        log.push(entry);
    }
    log
}

/// Generates the monthly yield series (3, 6 or 12 months ending at `now`'s month).
pub fn generate_portfolio_yield<R: Rng + ?Sized>(
    filters: FilterSet,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<YieldPoint> {
    let count = filters.time_range.yield_points();
    (0..count)
        .map(|i| YieldPoint {
            month: month_label(Sampling::Monthly.shift(now, -((count - 1 - i) as i32))),
            yield_percentage: rate(rng, YIELD_RANGE),
        })
        .collect()
}

/// Generates a roster of 10 to 20 clients with distinct identifiers.
pub fn generate_high_risk_clients<R: Rng + ?Sized>(
    filters: FilterSet,
    rng: &mut R,
) -> Vec<HighRiskClient> {
    let scale = filters.geography.scale();
    let count = rng.gen_range(ROSTER_SIZE_RANGE);
    let mut taken = HashSet::with_capacity(count);

    (0..count)
        .map(|_| {
            let client_id = unique_id(rng, CLIENT_ID_LEN, &taken);
            taken.insert(client_id.clone());
            HighRiskClient {
                client_id,
                name: full_name(rng),
                loan_type: LoanType::random(rng),
                amount: scaled(rng, CLIENT_AMOUNT_RANGE, scale),
                risk_score: rng.gen_range(INITIAL_RISK_SCORE_RANGE),
                payment_status: PaymentStatus::random(rng),
            }
        })
        .collect()
}
