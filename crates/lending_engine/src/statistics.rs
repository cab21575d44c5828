//! Feed counters.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;

use crate::cadence::CadenceGroup;

/// Shared counters updated by the feed task.
#[derive(Debug, Default)]
pub struct FeedCounters {
    ticks: [AtomicU64; 6],
    reinitializations: AtomicU64,
    stale_ticks: AtomicU64,
    epoch: AtomicU64,
    running: AtomicBool,
}

impl FeedCounters {
    pub(crate) fn record_tick(&self, group: CadenceGroup) {
        self.ticks[group.index()].fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_stale_tick(&self) {
        self.stale_ticks.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_reinitialization(&self, epoch: u64) {
        self.reinitializations.fetch_add(1, Ordering::SeqCst);
        self.epoch.store(epoch, Ordering::SeqCst);
    }

    pub(crate) fn set_epoch(&self, epoch: u64) {
        self.epoch.store(epoch, Ordering::SeqCst);
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    /// Whether the feed task is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ticks applied for `group`.
    pub fn ticks(&self, group: CadenceGroup) -> u64 {
        self.ticks[group.index()].load(Ordering::SeqCst)
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> FeedStatistics {
        FeedStatistics {
            ticks: TickCounts {
                applications: self.ticks(CadenceGroup::Applications),
                overview: self.ticks(CadenceGroup::Overview),
                activity: self.ticks(CadenceGroup::Activity),
                rates: self.ticks(CadenceGroup::Rates),
                portfolio: self.ticks(CadenceGroup::Portfolio),
                demographics: self.ticks(CadenceGroup::Demographics),
            },
            reinitializations: self.reinitializations.load(Ordering::SeqCst),
            stale_ticks: self.stale_ticks.load(Ordering::SeqCst),
            epoch: self.epoch.load(Ordering::SeqCst),
            is_running: self.is_running(),
        }
    }
}

/// Applied ticks per cadence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickCounts {
    /// Live application appends
    pub applications: u64,
    /// Overview refreshes
    pub overview: u64,
    /// Issuance and roster refreshes
    pub activity: u64,
    /// Interest rate refreshes
    pub rates: u64,
    /// Loan type and yield refreshes
    pub portfolio: u64,
    /// Age and region refreshes
    pub demographics: u64,
}

impl TickCounts {
    /// Count for `group`.
    pub fn get(&self, group: CadenceGroup) -> u64 {
        match group {
            CadenceGroup::Applications => self.applications,
            CadenceGroup::Overview => self.overview,
            CadenceGroup::Activity => self.activity,
            CadenceGroup::Rates => self.rates,
            CadenceGroup::Portfolio => self.portfolio,
            CadenceGroup::Demographics => self.demographics,
        }
    }

    /// Sum over all groups.
    pub fn total(&self) -> u64 {
        CadenceGroup::ALL.iter().map(|g| self.get(*g)).sum()
    }
}

/// Feed statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatistics {
    /// Applied ticks per group
    pub ticks: TickCounts,
    /// Regenerations caused by filter changes
    pub reinitializations: u64,
    /// Ticks dropped because their epoch had ended
    pub stale_ticks: u64,
    /// Current filter epoch
    pub epoch: u64,
    /// Running status
    pub is_running: bool,
}
