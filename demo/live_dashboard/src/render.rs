//! Snapshot reporting.

use std::fmt;

use lending_core::types::{ApplicationStatus, PaymentStatus};
use lending_series::DashboardSnapshot;
use serde::Serialize;

use crate::config::OutputFormat;

/// Headline figures of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Filters as `geography/time_range`
    pub filters: String,
    /// Filter epoch
    pub epoch: u64,
    /// Active loans
    pub active_loans: u64,
    /// Change of active loans since the previous overview update, percent
    pub active_loans_change_pct: f64,
    /// Outstanding amount
    pub total_amount: u64,
    /// Average rate, percent
    pub average_rate: f64,
    /// Default rate, percent
    pub default_rate: f64,
    /// Newest issuance point's loan count
    pub latest_new_loans: Option<u64>,
    /// Pending applications in the live log
    pub pending_applications: usize,
    /// Roster clients not in `Current` payment status
    pub distressed_clients: usize,
    /// Region with the largest loan amount
    pub top_region: Option<String>,
}

impl DashboardSummary {
    /// Summarises `snapshot`.
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let overview = &snapshot.overview;
        Self {
            filters: snapshot.filters.to_string(),
            epoch: snapshot.epoch,
            active_loans: overview.active_loans,
            active_loans_change_pct: overview.active_loans_trend.change_percent(),
            total_amount: overview.total_amount,
            average_rate: overview.average_rate,
            default_rate: overview.default_rate,
            latest_new_loans: snapshot.issuance.last().map(|p| p.new_loans),
            pending_applications: snapshot
                .live_applications
                .iter()
                .filter(|a| a.status == ApplicationStatus::Pending)
                .count(),
            distressed_clients: snapshot
                .high_risk_clients
                .iter()
                .filter(|c| c.payment_status != PaymentStatus::Current)
                .count(),
            top_region: snapshot
                .regions
                .iter()
                .max_by_key(|r| r.loan_amount)
                .map(|r| r.region.clone()),
        }
    }
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} #{}] active {} ({:+.2}%) | amount {} | rate {:.2}% | default {:.2}% | pending {} | distressed {}",
            self.filters,
            self.epoch,
            self.active_loans,
            self.active_loans_change_pct,
            self.total_amount,
            self.average_rate,
            self.default_rate,
            self.pending_applications,
            self.distressed_clients,
        )?;
        if let Some(region) = &self.top_region {
            write!(f, " | top region {}", region)?;
        }
        Ok(())
    }
}

/// Renders `snapshot` in `format`.
pub fn render(snapshot: &DashboardSnapshot, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Summary => Ok(DashboardSummary::from_snapshot(snapshot).to_string()),
        OutputFormat::Json => serde_json::to_string(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lending_core::rng::FeedRng;
    use lending_core::types::{FilterSet, Geography, TimeRange};
    use lending_series::generators::generate_snapshot;

    fn snapshot() -> DashboardSnapshot {
        let mut rng = FeedRng::from_seed(21);
        let filters = FilterSet::new(Geography::Uk, TimeRange::Week);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        generate_snapshot(filters, now, &mut rng)
    }

    #[test]
    fn test_summary_fields() {
        let snapshot = snapshot();
        let summary = DashboardSummary::from_snapshot(&snapshot);

        assert_eq!(summary.filters, "uk/7d");
        assert_eq!(summary.active_loans, snapshot.overview.active_loans);
        assert_eq!(summary.active_loans_change_pct, 0.0);
        assert!(summary.pending_applications <= 50);
        assert!(summary.distressed_clients <= snapshot.high_risk_clients.len());
        let top = summary.top_region.unwrap();
        assert!(Geography::Uk.regions().contains(&top.as_str()));
    }

    #[test]
    fn test_summary_line() {
        let line = render(&snapshot(), OutputFormat::Summary).unwrap();
        assert!(line.starts_with("[uk/7d #0] active "));
        assert!(line.contains("top region"));
    }

    #[test]
    fn test_json_output() {
        let json = render(&snapshot(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["epoch"], 0);
        assert_eq!(value["issuance"].as_array().unwrap().len(), 7);
        assert!(value["highRiskClients"].is_array());
    }
}
