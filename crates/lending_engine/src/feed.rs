//! The live feed actor.
//!
//! A single task owns the [`Coordinator`] and reacts to three event sources:
//! shutdown, filter changes and trigger ticks. Events are handled one at a
//! time, so two updaters never run concurrently and every update sees the
//! snapshot produced by the previous one. Each resulting snapshot is
//! published through a `watch` channel as an immutable `Arc`.

use std::sync::Arc;

use chrono::Utc;
use lending_core::rng::FeedRng;
use lending_core::types::FilterSet;
use lending_series::DashboardSnapshot;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{CadenceIntervals, FeedConfig};
use crate::coordinator::Coordinator;
use crate::error::FeedError;
use crate::filter_source::FilterSource;
use crate::statistics::{FeedCounters, FeedStatistics};
use crate::triggers::{Tick, TriggerSet};

/// Capacity of the tick queue between triggers and the actor.
const TICK_BUFFER: usize = 64;

/// Entry point for starting a live feed.
pub struct LiveFeed;

impl LiveFeed {
    /// Starts a feed with its own [`FilterSource`] seeded from `config`.
    ///
    /// The source is reachable through [`FeedHandle::filter_source`].
    pub fn spawn(config: FeedConfig) -> Result<FeedHandle, FeedError> {
        let source = FilterSource::new(config.initial_filters());
        let filters = source.subscribe();
        let mut handle = Self::spawn_with_filters(config, filters)?;
        handle.source = Some(source);
        Ok(handle)
    }

    /// Starts a feed observing an external filter receiver.
    ///
    /// The receiver's current value wins over the filters in `config`.
    pub fn spawn_with_filters(
        config: FeedConfig,
        mut filters: watch::Receiver<FilterSet>,
    ) -> Result<FeedHandle, FeedError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| FeedError::NoRuntime)?;

        let rng = FeedRng::from_optional_seed(config.seed);
        let seed = rng.seed();
        let initial = *filters.borrow_and_update();
        let coordinator = Coordinator::new(initial, rng, Utc::now());

        let (snapshot_tx, snapshot_rx) = watch::channel(coordinator.snapshot());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let counters = Arc::new(FeedCounters::default());
        counters.set_epoch(coordinator.epoch());
        counters.set_running(true);

        info!(
            geography = %initial.geography,
            time_range = %initial.time_range,
            seed,
            "Live feed started"
        );

        let actor = FeedActor {
            coordinator,
            intervals: config.cadence,
            filters,
            snapshots: snapshot_tx,
            counters: Arc::clone(&counters),
        };
        let task = runtime.spawn(actor.run(shutdown_rx));

        Ok(FeedHandle {
            snapshots: snapshot_rx,
            counters,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            source: None,
        })
    }
}

struct FeedActor {
    coordinator: Coordinator<FeedRng>,
    intervals: CadenceIntervals,
    filters: watch::Receiver<FilterSet>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
    counters: Arc<FeedCounters>,
}

impl FeedActor {
    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let (tick_tx, mut ticks) = mpsc::channel(TICK_BUFFER);
        let mut triggers = TriggerSet::new();
        triggers.start(&self.intervals, self.coordinator.epoch(), tick_tx.clone());
        let mut filters_open = true;

        loop {
            tokio::select! {
                biased;

                signal = &mut shutdown => {
                    if signal.is_err() {
                        warn!("Feed handle dropped without shutdown");
                    }
                    break;
                }

                changed = self.filters.changed(), if filters_open => {
                    if changed.is_err() {
                        debug!("Filter source closed; keeping current filters");
                        filters_open = false;
                        continue;
                    }
                    let filters = *self.filters.borrow_and_update();
                    if filters != self.coordinator.filters() {
                        self.reinitialize(&mut triggers, filters, &tick_tx);
                    }
                }

                Some(tick) = ticks.recv() => self.on_tick(tick),
            }
        }

        triggers.cancel_all();
        self.counters.set_running(false);
        info!(epoch = self.coordinator.epoch(), "Live feed stopped");
    }

    /// Cancels all triggers, replaces every dataset, then restarts triggers.
    fn reinitialize(&mut self, triggers: &mut TriggerSet, filters: FilterSet, tick_tx: &mpsc::Sender<Tick>) {
        triggers.cancel_all();
        let epoch = self.coordinator.begin_reinitialization();
        let snapshot = self.coordinator.complete_reinitialization(filters, Utc::now());
        self.counters.record_reinitialization(epoch);
        self.snapshots.send_replace(snapshot);
        triggers.start(&self.intervals, epoch, tick_tx.clone());
    }

    fn on_tick(&mut self, tick: Tick) {
        match self.coordinator.apply_tick(tick, Utc::now()) {
            Some(snapshot) => {
                self.counters.record_tick(tick.group);
                self.snapshots.send_replace(snapshot);
            }
            None => self.counters.record_stale_tick(),
        }
    }
}

/// Handle to a running feed.
///
/// Dropping the handle stops the feed.
pub struct FeedHandle {
    snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
    counters: Arc<FeedCounters>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    source: Option<FilterSource>,
}

impl FeedHandle {
    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.snapshots.clone()
    }

    /// Filter source owned by this feed, if it was started with [`LiveFeed::spawn`].
    pub fn filter_source(&self) -> Option<&FilterSource> {
        self.source.as_ref()
    }

    /// Current counters.
    pub fn statistics(&self) -> FeedStatistics {
        self.counters.snapshot()
    }

    /// Whether the feed task is running.
    pub fn is_running(&self) -> bool {
        self.counters.is_running()
    }

    /// Stops the feed and waits for the task to finish.
    pub async fn shutdown(mut self) -> Result<FeedStatistics, FeedError> {
        let shutdown = self.shutdown.take().ok_or(FeedError::FeedStopped)?;
        shutdown.send(()).map_err(|_| FeedError::FeedStopped)?;

        if let Some(task) = self.task.take() {
            task.await.map_err(|_| FeedError::FeedStopped)?;
        }
        Ok(self.counters.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lending_core::types::{Geography, TimeRange};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_spawn_publishes_initial_snapshot() {
        let config = FeedConfig {
            geography: Geography::Canada,
            time_range: TimeRange::Week,
            seed: Some(1),
            ..FeedConfig::default()
        };
        let feed = LiveFeed::spawn(config).unwrap();

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.epoch, 1);
        assert_eq!(snapshot.filters, FilterSet::new(Geography::Canada, TimeRange::Week));
        assert!(feed.is_running());

        let stats = feed.shutdown().await.unwrap();
        assert!(!stats.is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_applied_over_time() {
        let feed = LiveFeed::spawn(FeedConfig { seed: Some(2), ..FeedConfig::default() }).unwrap();

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        let stats = feed.statistics();
        assert_eq!(stats.ticks.applications, 3);
        assert_eq!(stats.ticks.overview, 2);
        assert_eq!(stats.ticks.activity, 1);
        assert_eq!(stats.ticks.rates, 0);

        feed.shutdown().await.unwrap();
    }

    #[test]
    fn test_spawn_outside_runtime_fails() {
        let result = LiveFeed::spawn(FeedConfig::default());
        assert!(matches!(result, Err(FeedError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = FeedConfig::default();
        config.cadence.rates_ms = 0;
        assert!(matches!(LiveFeed::spawn(config), Err(FeedError::InvalidConfig(_))));
    }
}
