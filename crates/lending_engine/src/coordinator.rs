//! Snapshot ownership and the Active / Reinitializing state machine.
//!
//! [`Coordinator`] is synchronous and owns no timers: the feed actor cancels
//! and restarts triggers around [`Coordinator::reinitialize`], and forwards
//! every trigger firing to [`Coordinator::apply_tick`]. Published snapshots
//! are immutable `Arc`s; an update clones the current snapshot only while an
//! observer still holds it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lending_core::types::FilterSet;
use lending_series::generators::generate_snapshot;
use lending_series::updaters::{
    add_live_application, update_age_distribution, update_high_risk_clients,
    update_interest_rates, update_issuance, update_loan_types, update_overview,
    update_portfolio_yield, update_regions,
};
use lending_series::{DashboardSnapshot, DatasetKind};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::triggers::Tick;

/// Coordinator state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedState {
    /// Triggers running against the current filters
    Active,
    /// Triggers torn down, datasets being regenerated
    Reinitializing,
}

/// Applies the updater for `kind` to `snapshot` in place.
///
/// Only the named dataset changes; filters and epoch are left alone.
pub fn reduce<R: Rng + ?Sized>(
    snapshot: &mut DashboardSnapshot,
    kind: DatasetKind,
    now: DateTime<Utc>,
    rng: &mut R,
) {
    let filters = snapshot.filters;
    match kind {
        DatasetKind::Overview => snapshot.overview = update_overview(&snapshot.overview, rng),
        DatasetKind::Issuance => {
            snapshot.issuance = update_issuance(&snapshot.issuance, filters, rng)
        }
        DatasetKind::LoanTypes => {
            snapshot.loan_types = update_loan_types(&snapshot.loan_types, rng)
        }
        DatasetKind::AgeDistribution => {
            snapshot.age_distribution = update_age_distribution(&snapshot.age_distribution, rng)
        }
        DatasetKind::Regions => snapshot.regions = update_regions(&snapshot.regions, rng),
        DatasetKind::InterestRates => {
            snapshot.interest_rates = update_interest_rates(&snapshot.interest_rates, rng)
        }
        DatasetKind::LiveApplications => {
            snapshot.live_applications =
                add_live_application(&snapshot.live_applications, filters, now, rng)
        }
        DatasetKind::PortfolioYield => {
            snapshot.portfolio_yield = update_portfolio_yield(&snapshot.portfolio_yield, rng)
        }
        DatasetKind::HighRiskClients => {
            snapshot.high_risk_clients = update_high_risk_clients(&snapshot.high_risk_clients, rng)
        }
    }
}

/// Owner of the current filters, epoch and nine-dataset snapshot.
#[derive(Debug)]
pub struct Coordinator<R> {
    filters: FilterSet,
    epoch: u64,
    state: FeedState,
    snapshot: Arc<DashboardSnapshot>,
    rng: R,
}

impl<R: Rng> Coordinator<R> {
    /// Generates the first snapshot for `filters` under epoch 1.
    pub fn new(filters: FilterSet, mut rng: R, now: DateTime<Utc>) -> Self {
        let mut snapshot = generate_snapshot(filters, now, &mut rng);
        snapshot.epoch = 1;
        Self {
            filters,
            epoch: 1,
            state: FeedState::Active,
            snapshot: Arc::new(snapshot),
            rng,
        }
    }

    /// Current filters.
    pub fn filters(&self) -> FilterSet {
        self.filters
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current state.
    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Enters Reinitializing and ends the current epoch.
    ///
    /// From here until [`Coordinator::complete_reinitialization`] every tick
    /// is stale, including ticks from triggers that were already in flight.
    pub fn begin_reinitialization(&mut self) -> u64 {
        self.state = FeedState::Reinitializing;
        self.epoch += 1;
        self.epoch
    }

    /// Replaces all nine datasets for `filters` and returns to Active.
    pub fn complete_reinitialization(
        &mut self,
        filters: FilterSet,
        now: DateTime<Utc>,
    ) -> Arc<DashboardSnapshot> {
        let mut snapshot = generate_snapshot(filters, now, &mut self.rng);
        snapshot.epoch = self.epoch;
        self.filters = filters;
        self.snapshot = Arc::new(snapshot);
        self.state = FeedState::Active;

        info!(
            geography = %filters.geography,
            time_range = %filters.time_range,
            epoch = self.epoch,
            "Regenerated all datasets"
        );
        self.snapshot()
    }

    /// Runs a full reinitialization for `filters`.
    pub fn reinitialize(&mut self, filters: FilterSet, now: DateTime<Utc>) -> Arc<DashboardSnapshot> {
        self.begin_reinitialization();
        self.complete_reinitialization(filters, now)
    }

    /// Applies every dataset of the tick's group in fixed order.
    ///
    /// Returns the new snapshot, or `None` when the tick belongs to an ended
    /// epoch or arrives while reinitializing.
    pub fn apply_tick(&mut self, tick: Tick, now: DateTime<Utc>) -> Option<Arc<DashboardSnapshot>> {
        if self.state != FeedState::Active || tick.epoch != self.epoch {
            trace!(group = %tick.group, tick_epoch = tick.epoch, epoch = self.epoch, "Discarded stale tick");
            return None;
        }

        let snapshot = Arc::make_mut(&mut self.snapshot);
        for kind in tick.group.datasets() {
            reduce(snapshot, *kind, now, &mut self.rng);
        }
        debug!(group = %tick.group, epoch = self.epoch, "Applied cadence tick");

        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::CadenceGroup;
    use chrono::TimeZone;
    use lending_core::rng::FeedRng;
    use lending_core::types::{Geography, TimeRange};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn coordinator(geography: Geography, time_range: TimeRange) -> Coordinator<FeedRng> {
        Coordinator::new(FilterSet::new(geography, time_range), FeedRng::from_seed(11), now())
    }

    #[test]
    fn test_new_starts_active_at_epoch_one() {
        let coord = coordinator(Geography::Usa, TimeRange::Day);
        assert_eq!(coord.state(), FeedState::Active);
        assert_eq!(coord.epoch(), 1);
        assert_eq!(coord.snapshot().epoch, 1);
        assert_eq!(coord.snapshot().issuance.len(), 24);
    }

    #[test]
    fn test_tick_updates_only_its_group() {
        let mut coord = coordinator(Geography::Uk, TimeRange::Week);
        let before = coord.snapshot();

        let after = coord
            .apply_tick(Tick { group: CadenceGroup::Applications, epoch: 1 }, now())
            .unwrap();

        assert_ne!(before.live_applications, after.live_applications);
        assert_eq!(before.overview, after.overview);
        assert_eq!(before.issuance, after.issuance);
        assert_eq!(before.loan_types, after.loan_types);
        assert_eq!(before.age_distribution, after.age_distribution);
        assert_eq!(before.regions, after.regions);
        assert_eq!(before.interest_rates, after.interest_rates);
        assert_eq!(before.portfolio_yield, after.portfolio_yield);
        assert_eq!(before.high_risk_clients, after.high_risk_clients);
    }

    #[test]
    fn test_published_snapshot_is_not_mutated() {
        let mut coord = coordinator(Geography::All, TimeRange::Month);
        let held = coord.snapshot();
        let copy = (*held).clone();

        coord.apply_tick(Tick { group: CadenceGroup::Overview, epoch: 1 }, now());
        assert_eq!(*held, copy);
    }

    #[test]
    fn test_stale_tick_discarded() {
        let mut coord = coordinator(Geography::Usa, TimeRange::Day);
        coord.reinitialize(FilterSet::new(Geography::France, TimeRange::AllTime), now());
        let before = coord.snapshot();

        let result = coord.apply_tick(Tick { group: CadenceGroup::Activity, epoch: 1 }, now());
        assert!(result.is_none());
        assert_eq!(coord.snapshot(), before);
    }

    #[test]
    fn test_ticks_ignored_while_reinitializing() {
        let mut coord = coordinator(Geography::Usa, TimeRange::Day);
        let epoch = coord.begin_reinitialization();
        assert_eq!(coord.state(), FeedState::Reinitializing);

        let result = coord.apply_tick(Tick { group: CadenceGroup::Overview, epoch }, now());
        assert!(result.is_none());
    }

    #[test]
    fn test_reinitialize_replaces_every_dataset() {
        let mut coord = coordinator(Geography::Usa, TimeRange::Day);
        let filters = FilterSet::new(Geography::Germany, TimeRange::AllTime);
        let snapshot = coord.reinitialize(filters, now());

        assert_eq!(coord.state(), FeedState::Active);
        assert_eq!(snapshot.epoch, 2);
        assert_eq!(snapshot.filters, filters);
        assert_eq!(snapshot.issuance.len(), 12);
        assert_eq!(snapshot.portfolio_yield.len(), 12);
        let regions: Vec<&str> = snapshot.regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, Geography::Germany.regions().to_vec());
    }

    #[test]
    fn test_group_applies_datasets_in_order() {
        let mut direct = coordinator(Geography::Canada, TimeRange::Month);
        let mut via_tick = coordinator(Geography::Canada, TimeRange::Month);

        let mut expected = (*direct.snapshot()).clone();
        reduce(&mut expected, DatasetKind::Issuance, now(), &mut direct.rng);
        reduce(&mut expected, DatasetKind::HighRiskClients, now(), &mut direct.rng);

        let actual = via_tick
            .apply_tick(Tick { group: CadenceGroup::Activity, epoch: 1 }, now())
            .unwrap();
        assert_eq!(*actual, expected);
    }
}
