//! Periodic triggers, one per cadence group.
//!
//! Each trigger is a spawned task that sends a [`Tick`] tagged with the epoch
//! it was started under. Triggers never touch the snapshot; the feed actor
//! receives the ticks and decides whether they still apply.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::cadence::CadenceGroup;
use crate::config::CadenceIntervals;

/// One firing of a cadence trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Group that fired
    pub group: CadenceGroup,
    /// Epoch the trigger was started under
    pub epoch: u64,
}

/// Named handles to the six running triggers.
#[derive(Debug, Default)]
pub struct TriggerSet {
    handles: Vec<(CadenceGroup, JoinHandle<()>)>,
}

impl TriggerSet {
    /// Creates an empty set with no running triggers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts one trigger per cadence group, replacing any running ones.
    ///
    /// The first tick of each group fires one full interval after start;
    /// groups are not phase-aligned with each other.
    pub fn start(&mut self, intervals: &CadenceIntervals, epoch: u64, tx: mpsc::Sender<Tick>) {
        self.cancel_all();

        for group in CadenceGroup::ALL {
            let period = intervals.interval(group);
            let first = Instant::now() + period;
            let tx = tx.clone();
            let handle = tokio::spawn(async move {
                let mut ticker = interval_at(first, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if tx.send(Tick { group, epoch }).await.is_err() {
                        return;
                    }
                }
            });
            self.handles.push((group, handle));
        }

        debug!(epoch, "Started {} cadence triggers", self.handles.len());
    }

    /// Aborts every running trigger.
    pub fn cancel_all(&mut self) {
        for (group, handle) in self.handles.drain(..) {
            handle.abort();
            debug!(group = %group, "Cancelled cadence trigger");
        }
    }

    /// Number of running triggers.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no trigger is running.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Groups with a running trigger.
    pub fn groups(&self) -> Vec<CadenceGroup> {
        self.handles.iter().map(|(group, _)| *group).collect()
    }
}

impl Drop for TriggerSet {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain(..) {
            handle.abort();
        }
    }
}
