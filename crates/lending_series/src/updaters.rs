//! Series updaters: one transition function per dataset kind.
//!
//! Every updater takes the current value by reference and returns the next
//! value; inputs are never mutated. Category sets, roster membership and
//! series lengths are preserved; only magnitudes and per-client fields move.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use lending_core::math::variance::{vary_count, vary_rate};
use lending_core::types::{FilterSet, PaymentStatus};
use lending_core::window::RollingWindow;
use rand::seq::index;
use rand::Rng;

use crate::constants::*;
use crate::datasets::{
    AgeBucket, ApplicationLog, HighRiskClient, InterestRateByType, IssuancePoint, IssuanceSeries,
    LoanTypeSlice, OverviewSnapshot, RegionShare, YieldPoint,
};
use crate::generators::generate_application;

/// Perturbs the four KPIs and appends each new value to its trend.
pub fn update_overview<R: Rng + ?Sized>(current: &OverviewSnapshot, rng: &mut R) -> OverviewSnapshot {
    let active_loans = vary_count(current.active_loans, spread::ACTIVE_LOANS, rng);
    let total_amount = vary_count(current.total_amount, spread::TOTAL_AMOUNT, rng);
    let average_rate = vary_rate(current.average_rate, spread::AVERAGE_RATE, rng);
    let default_rate = vary_rate(current.default_rate, spread::DEFAULT_RATE, rng);

    OverviewSnapshot {
        active_loans,
        total_amount,
        average_rate,
        default_rate,
        active_loans_trend: current.active_loans_trend.pushed(active_loans as f64),
        total_amount_trend: current.total_amount_trend.pushed(total_amount as f64),
        average_rate_trend: current.average_rate_trend.pushed(average_rate),
        default_rate_trend: current.default_rate_trend.pushed(default_rate),
    }
}

/// Slides the issuance window by one sampling period.
///
/// The new point is a variance step from the current tail (a random walk),
/// floored at 10 loans and 100 000 issued. The oldest point is dropped so the
/// length is unchanged. An empty series is returned as is.
pub fn update_issuance<R: Rng + ?Sized>(
    current: &IssuanceSeries,
    filters: FilterSet,
    rng: &mut R,
) -> IssuanceSeries {
    let Some(tail) = current.last() else {
        return current.clone();
    };
    let sampling = filters.time_range.sampling();
    let timestamp = sampling.shift(tail.timestamp, 1);
    let point = IssuancePoint {
        label: sampling.label(timestamp),
        timestamp,
        new_loans: vary_count(tail.new_loans, spread::ISSUANCE, rng).max(NEW_LOANS_FLOOR),
        loan_amount: vary_count(tail.loan_amount, spread::ISSUANCE, rng).max(ISSUED_AMOUNT_FLOOR),
    };

    let mut next = RollingWindow::from_items(current.len(), current.iter().cloned());
    next.push(point);
    next
}

/// Perturbs count and amount of every loan type.
pub fn update_loan_types<R: Rng + ?Sized>(current: &[LoanTypeSlice], rng: &mut R) -> Vec<LoanTypeSlice> {
    current
        .iter()
        .map(|slice| LoanTypeSlice {
            loan_type: slice.loan_type,
            count: vary_count(slice.count, spread::LOAN_TYPE, rng),
            amount: vary_count(slice.amount, spread::LOAN_TYPE, rng),
        })
        .collect()
}

/// Perturbs every age bucket.
pub fn update_age_distribution<R: Rng + ?Sized>(current: &[AgeBucket], rng: &mut R) -> Vec<AgeBucket> {
    current
        .iter()
        .map(|bucket| AgeBucket {
            age_group: bucket.age_group,
            borrowers_count: vary_count(bucket.borrowers_count, spread::AGE, rng),
        })
        .collect()
}

/// Perturbs every region amount.
pub fn update_regions<R: Rng + ?Sized>(current: &[RegionShare], rng: &mut R) -> Vec<RegionShare> {
    current
        .iter()
        .map(|share| RegionShare {
            region: share.region.clone(),
            loan_amount: vary_count(share.loan_amount, spread::REGION, rng),
        })
        .collect()
}

/// Perturbs rate and issued amount per loan type.
pub fn update_interest_rates<R: Rng + ?Sized>(
    current: &[InterestRateByType],
    rng: &mut R,
) -> Vec<InterestRateByType> {
    current
        .iter()
        .map(|row| InterestRateByType {
            loan_type: row.loan_type,
            average_rate: vary_rate(row.average_rate, spread::TYPE_RATE, rng),
            issued_amount: vary_count(row.issued_amount, spread::TYPE_ISSUED, rng),
        })
        .collect()
}

/// Appends one freshly drawn application submitted at `now`.
///
/// The log never holds more than 50 entries; the oldest is evicted first.
/// Existing entries are carried over untouched.
pub fn add_live_application<R: Rng + ?Sized>(
    current: &ApplicationLog,
    filters: FilterSet,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ApplicationLog {
    let taken: HashSet<String> = current.iter().map(|a| a.application_id.clone()).collect();
    let entry = generate_application(filters, now, &taken, rng);

    let mut next = RollingWindow::from_items(LIVE_LOG_CAPACITY, current.iter().cloned());
    next.push(entry);
    next
}

/// Perturbs the trailing three months; earlier months are closed.
pub fn update_portfolio_yield<R: Rng + ?Sized>(current: &[YieldPoint], rng: &mut R) -> Vec<YieldPoint> {
    let first_volatile = current.len().saturating_sub(YIELD_VOLATILE_MONTHS);
    current
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if i < first_volatile {
                point.clone()
            } else {
                YieldPoint {
                    month: point.month.clone(),
                    yield_percentage: vary_rate(point.yield_percentage, spread::YIELD, rng),
                }
            }
        })
        .collect()
}

/// Changes two or three distinct roster entries.
///
/// Each selected client gets exactly one change, picked by a fair coin: a
/// risk-score step in [-30, +30] clamped to [600, 850], or a fresh payment
/// status. Membership and order are preserved.
pub fn update_high_risk_clients<R: Rng + ?Sized>(
    current: &[HighRiskClient],
    rng: &mut R,
) -> Vec<HighRiskClient> {
    if current.is_empty() {
        return Vec::new();
    }
    let selected: HashSet<usize> = pick_roster_rows(current.len(), rng).into_iter().collect();

    current
        .iter()
        .enumerate()
        .map(|(i, client)| {
            if !selected.contains(&i) {
                return client.clone();
            }
            let mut next = client.clone();
            if rng.gen_bool(0.5) {
                next.risk_score = shift_risk_score(client.risk_score, rng.gen_range(RISK_SCORE_DELTA));
            } else {
                next.payment_status = PaymentStatus::random(rng);
            }
            next
        })
        .collect()
}

/// Indices of the roster rows touched by one tick, drawn without replacement.
fn pick_roster_rows<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let amount = rng.gen_range(ROSTER_UPDATES_PER_TICK).min(len);
    index::sample(rng, len, amount).into_vec()
}

/// Applies `delta` to `score`, clamped to [600, 850].
pub fn shift_risk_score(score: u16, delta: i32) -> u16 {
    let shifted = (i32::from(score) + delta).clamp(i32::from(RISK_SCORE_MIN), i32::from(RISK_SCORE_MAX));
    shifted as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::*;
    use chrono::{Duration, TimeZone};
    use lending_core::types::{Geography, TimeRange};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_overview_trends_grow_then_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut overview = generate_overview(FilterSet::default(), &mut rng);
        for step in 1..=20 {
            overview = update_overview(&overview, &mut rng);
            let expected = (step + 1).min(12);
            assert_eq!(overview.active_loans_trend.len(), expected);
            assert_eq!(overview.default_rate_trend.len(), expected);
            assert_eq!(overview.total_amount_trend.latest(), Some(overview.total_amount as f64));
        }
    }

    #[test]
    fn test_issuance_random_walk_from_tail() {
        let mut rng = StdRng::seed_from_u64(2);
        let filters = FilterSet::new(Geography::Uk, TimeRange::Week);
        let series = generate_issuance(filters, now(), &mut rng);
        let tail = series.last().cloned().unwrap();
        let next = update_issuance(&series, filters, &mut rng);

        assert_eq!(next.len(), 7);
        assert_eq!(next.first(), series.get(1));
        let added = next.last().unwrap();
        assert_eq!(added.timestamp, tail.timestamp + Duration::days(1));
        let lo = (tail.new_loans as f64 * 0.9).floor() as u64;
        let hi = (tail.new_loans as f64 * 1.1).ceil() as u64;
        assert!(added.new_loans >= lo.max(10) && added.new_loans <= hi);
        // input untouched
        assert_eq!(series.last(), Some(&tail));
    }

    #[test]
    fn test_issuance_empty_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty: IssuanceSeries = RollingWindow::new(24);
        let next = update_issuance(&empty, FilterSet::default(), &mut rng);
        assert!(next.is_empty());
    }

    #[test]
    fn test_issuance_floors() {
        let mut rng = StdRng::seed_from_u64(4);
        let point = IssuancePoint {
            timestamp: now(),
            label: "12:00".to_string(),
            new_loans: 1,
            loan_amount: 10,
        };
        let series = RollingWindow::from_items(1, [point]);
        let next = update_issuance(&series, FilterSet::default(), &mut rng);
        let added = next.last().unwrap();
        assert_eq!(added.new_loans, 10);
        assert_eq!(added.loan_amount, 100_000);
    }

    #[test]
    fn test_live_log_evicts_head_at_capacity() {
        let mut rng = StdRng::seed_from_u64(5);
        let filters = FilterSet::default();
        let log = generate_live_applications(filters, now(), &mut rng);
        assert_eq!(log.len(), 50);
        let second = log.get(1).cloned();

        let next = add_live_application(&log, filters, now(), &mut rng);
        assert_eq!(next.len(), 50);
        assert_eq!(next.first().cloned(), second);
        assert_eq!(next.last().map(|a| a.timestamp), Some(now()));
        assert!(!log.iter().any(|a| Some(&a.application_id) == next.last().map(|n| &n.application_id)));
    }

    #[test]
    fn test_live_log_grows_below_capacity() {
        let mut rng = StdRng::seed_from_u64(6);
        let log: ApplicationLog = RollingWindow::new(LIVE_LOG_CAPACITY);
        let next = add_live_application(&log, FilterSet::default(), now(), &mut rng);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_yield_only_tail_moves() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_portfolio_yield(FilterSet::new(Geography::Usa, TimeRange::AllTime), now(), &mut rng);
        let mut next = series.clone();
        for _ in 0..50 {
            next = update_portfolio_yield(&next, &mut rng);
        }
        assert_eq!(next[..9], series[..9]);
        assert_eq!(next.len(), 12);
        assert!(next[9..].iter().zip(&series[9..]).any(|(a, b)| a != b));
    }

    #[test]
    fn test_roster_touches_two_or_three() {
        let mut rng = StdRng::seed_from_u64(8);
        let roster = generate_high_risk_clients(FilterSet::default(), &mut rng);
        for _ in 0..200 {
            let next = update_high_risk_clients(&roster, &mut rng);
            let changed = next.iter().zip(&roster).filter(|(a, b)| a != b).count();
            // A status redraw may land on the same value, so at most three rows differ.
            assert!(changed <= 3);
            assert_eq!(next.len(), roster.len());
            for (a, b) in next.iter().zip(&roster) {
                assert_eq!(a.client_id, b.client_id);
                assert_eq!(a.name, b.name);
                assert_eq!(a.amount, b.amount);
            }
        }
    }

    #[test]
    fn test_roster_rows_distinct() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let rows = pick_roster_rows(10, &mut rng);
            assert!((2..=3).contains(&rows.len()), "{:?}", rows);
            assert!(rows.iter().all(|&i| i < 10));
            let unique: HashSet<usize> = rows.iter().copied().collect();
            assert_eq!(unique.len(), rows.len(), "{:?}", rows);
        }
        assert_eq!(pick_roster_rows(1, &mut rng), vec![0]);
    }

    #[test]
    fn test_roster_one_change_per_row() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut roster = generate_high_risk_clients(FilterSet::default(), &mut rng);
        let mut max_changed = 0;
        for _ in 0..2000 {
            let next = update_high_risk_clients(&roster, &mut rng);
            let mut changed = 0;
            for (a, b) in next.iter().zip(&roster) {
                let score_moved = a.risk_score != b.risk_score;
                let status_moved = a.payment_status != b.payment_status;
                assert!(!(score_moved && status_moved), "{} changed twice", a.client_id);
                if score_moved || status_moved {
                    changed += 1;
                }
            }
            assert!(changed <= 3);
            max_changed = max_changed.max(changed);
            roster = next;
        }
        assert_eq!(max_changed, 3);
    }

    #[test]
    fn test_roster_empty() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(update_high_risk_clients(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_shift_risk_score_clamps() {
        assert_eq!(shift_risk_score(610, -30), 600);
        assert_eq!(shift_risk_score(840, 30), 850);
        assert_eq!(shift_risk_score(700, -12), 688);
    }

    #[test]
    fn test_categorical_identity_preserved() {
        let mut rng = StdRng::seed_from_u64(10);
        let filters = FilterSet::new(Geography::Germany, TimeRange::Day);
        let loan_types = generate_loan_types(filters, &mut rng);
        let regions = generate_regions(filters, &mut rng);
        let rates = generate_interest_rates(filters, &mut rng);
        let ages = generate_age_distribution(filters, &mut rng);

        let (mut lt, mut rg, mut ir, mut ag) = (loan_types.clone(), regions.clone(), rates.clone(), ages.clone());
        for _ in 0..100 {
            lt = update_loan_types(&lt, &mut rng);
            rg = update_regions(&rg, &mut rng);
            ir = update_interest_rates(&ir, &mut rng);
            ag = update_age_distribution(&ag, &mut rng);
        }
        assert!(lt.iter().map(|s| s.loan_type).eq(loan_types.iter().map(|s| s.loan_type)));
        assert!(rg.iter().map(|s| &s.region).eq(regions.iter().map(|s| &s.region)));
        assert!(ir.iter().map(|s| s.loan_type).eq(rates.iter().map(|s| s.loan_type)));
        assert!(ag.iter().map(|s| s.age_group).eq(ages.iter().map(|s| s.age_group)));
    }
}
