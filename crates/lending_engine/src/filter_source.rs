//! Filter source: the observable geography / time-range selection.

use lending_core::types::{FilterError, FilterSet, Geography, TimeRange};
use tokio::sync::watch;
use tracing::info;

/// Holds the current [`FilterSet`] and notifies subscribers on change.
///
/// Setting a value equal to the current one does not notify.
#[derive(Debug)]
pub struct FilterSource {
    tx: watch::Sender<FilterSet>,
}

impl FilterSource {
    /// Creates a source holding `initial`.
    pub fn new(initial: FilterSet) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current selection.
    pub fn current(&self) -> FilterSet {
        *self.tx.borrow()
    }

    /// Receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<FilterSet> {
        self.tx.subscribe()
    }

    /// Replaces the selection; returns whether it changed.
    pub fn set(&self, filters: FilterSet) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == filters {
                false
            } else {
                *current = filters;
                true
            }
        });
        if changed {
            info!(filters = %filters, "Filter selection changed");
        }
        changed
    }

    /// Changes the geography only.
    pub fn set_geography(&self, geography: Geography) -> bool {
        self.set(self.current().with_geography(geography))
    }

    /// Changes the time range only.
    pub fn set_time_range(&self, time_range: TimeRange) -> bool {
        self.set(self.current().with_time_range(time_range))
    }

    /// Parses both codes and applies them.
    ///
    /// Nothing changes when either code is unknown.
    pub fn set_codes(&self, geography: &str, time_range: &str) -> Result<bool, FilterError> {
        let filters = FilterSet::parse(geography, time_range)?;
        Ok(self.set(filters))
    }
}

impl Default for FilterSource {
    fn default() -> Self {
        Self::new(FilterSet::default())
    }
}
