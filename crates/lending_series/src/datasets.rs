//! The nine dataset kinds published by the feed.
//!
//! Every dataset is a plain value type: no identity beyond its fields, cheap
//! to clone, serialisable in camelCase for the rendering layer.

use chrono::{DateTime, Utc};
use lending_core::types::{
    AgeGroup, ApplicationStatus, FilterSet, LoanType, PaymentStatus,
};
use lending_core::window::RollingWindow;
use serde::Serialize;

use crate::constants::TREND_CAPACITY;

/// Identifies one of the nine dataset kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetKind {
    /// Aggregate KPIs with trend histories
    Overview,
    /// Issuance time series
    Issuance,
    /// Breakdown by loan type
    LoanTypes,
    /// Borrower age distribution
    AgeDistribution,
    /// Breakdown by region
    Regions,
    /// Average rate and issued amount per loan type
    InterestRates,
    /// Live application log
    LiveApplications,
    /// Monthly portfolio yield
    PortfolioYield,
    /// High-risk client roster
    HighRiskClients,
}

impl DatasetKind {
    /// Every dataset kind.
    pub const ALL: [DatasetKind; 9] = [
        DatasetKind::Overview,
        DatasetKind::Issuance,
        DatasetKind::LoanTypes,
        DatasetKind::AgeDistribution,
        DatasetKind::Regions,
        DatasetKind::InterestRates,
        DatasetKind::LiveApplications,
        DatasetKind::PortfolioYield,
        DatasetKind::HighRiskClients,
    ];

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Overview => "overview",
            DatasetKind::Issuance => "issuance",
            DatasetKind::LoanTypes => "loan_types",
            DatasetKind::AgeDistribution => "age_distribution",
            DatasetKind::Regions => "regions",
            DatasetKind::InterestRates => "interest_rates",
            DatasetKind::LiveApplications => "live_applications",
            DatasetKind::PortfolioYield => "portfolio_yield",
            DatasetKind::HighRiskClients => "high_risk_clients",
        }
    }
}

/// Bounded history of one overview metric, newest at the tail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrendSeries(RollingWindow<f64>);

impl TrendSeries {
    /// Starts a trend with a single point.
    pub fn starting_at(value: f64) -> Self {
        Self(RollingWindow::from_items(TREND_CAPACITY, [value]))
    }

    /// Returns a new trend with `value` appended, keeping the last 12 points.
    pub fn pushed(&self, value: f64) -> Self {
        Self(self.0.pushed(value))
    }

    /// Points, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// Number of points held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the trend holds no points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Newest point.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Percentage change between the last two points.
    ///
    /// Zero when fewer than two points exist or the previous point is zero.
    ///
    /// ```
    /// use lending_series::datasets::TrendSeries;
    ///
    /// let trend = TrendSeries::starting_at(200.0).pushed(210.0);
    /// assert!((trend.change_percent() - 5.0).abs() < 1e-9);
    /// assert_eq!(TrendSeries::starting_at(1.0).change_percent(), 0.0);
    /// ```
    pub fn change_percent(&self) -> f64 {
        let n = self.0.len();
        if n < 2 {
            return 0.0;
        }
        match (self.0.get(n - 2), self.0.get(n - 1)) {
            (Some(&previous), Some(&current)) if previous != 0.0 => {
                (current - previous) / previous * 100.0
            }
            _ => 0.0,
        }
    }
}

/// Aggregate portfolio KPIs and their trend histories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSnapshot {
    /// Number of active loans
    pub active_loans: u64,
    /// Outstanding loan amount
    pub total_amount: u64,
    /// Average interest rate, percent
    pub average_rate: f64,
    /// Default rate, percent
    pub default_rate: f64,
    /// History of `active_loans`
    pub active_loans_trend: TrendSeries,
    /// History of `total_amount`
    pub total_amount_trend: TrendSeries,
    /// History of `average_rate`
    pub average_rate_trend: TrendSeries,
    /// History of `default_rate`
    pub default_rate_trend: TrendSeries,
}

/// One point of the issuance series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuancePoint {
    /// Point time
    pub timestamp: DateTime<Utc>,
    /// Display label for the point time
    pub label: String,
    /// New loans issued in the period
    pub new_loans: u64,
    /// Amount issued in the period
    pub loan_amount: u64,
}

/// Issuance time series; its length is fixed by the time range.
pub type IssuanceSeries = RollingWindow<IssuancePoint>;

/// Count and amount for one loan type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTypeSlice {
    /// Category
    pub loan_type: LoanType,
    /// Number of loans
    pub count: u64,
    /// Outstanding amount
    pub amount: u64,
}

/// Borrower count for one age bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucket {
    /// Category
    pub age_group: AgeGroup,
    /// Number of borrowers
    pub borrowers_count: u64,
}

/// Loan amount for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionShare {
    /// Region name, drawn from the active geography's region set
    pub region: String,
    /// Outstanding amount
    pub loan_amount: u64,
}

/// Average rate and issued amount for one loan type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRateByType {
    /// Category
    pub loan_type: LoanType,
    /// Average rate, percent
    pub average_rate: f64,
    /// Issued amount
    pub issued_amount: u64,
}

/// One entry of the live application log; immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveApplication {
    /// Eight-character identifier, unique within the log
    pub application_id: String,
    /// Submission time
    pub timestamp: DateTime<Utc>,
    /// Submission time as `HH:MM:SS`
    pub time_label: String,
    /// Requested product
    pub loan_type: LoanType,
    /// Requested amount
    pub requested_amount: u64,
    /// Decision state
    pub status: ApplicationStatus,
}

/// Live application log, capped at 50 entries.
pub type ApplicationLog = RollingWindow<LiveApplication>;

/// Yield for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoint {
    /// Month label such as `Mar 24`
    pub month: String,
    /// Yield, percent
    pub yield_percentage: f64,
}

/// A client on the high-risk roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskClient {
    /// Ten-character identifier, unique within the roster
    pub client_id: String,
    /// Client name
    pub name: String,
    /// Product held
    pub loan_type: LoanType,
    /// Outstanding amount
    pub amount: u64,
    /// Risk score in [600, 850]
    pub risk_score: u16,
    /// Repayment state
    pub payment_status: PaymentStatus,
}

/// All nine datasets for one filter epoch.
///
/// Produced wholesale by [`crate::generators::generate_snapshot`] and advanced
/// one dataset at a time by the updaters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Filters the datasets were generated for
    pub filters: FilterSet,
    /// Filter epoch; changes on every regeneration
    pub epoch: u64,
    /// Aggregate KPIs
    pub overview: OverviewSnapshot,
    /// Issuance time series
    pub issuance: IssuanceSeries,
    /// Breakdown by loan type
    pub loan_types: Vec<LoanTypeSlice>,
    /// Borrower age distribution
    pub age_distribution: Vec<AgeBucket>,
    /// Breakdown by region
    pub regions: Vec<RegionShare>,
    /// Interest rate by loan type
    pub interest_rates: Vec<InterestRateByType>,
    /// Live application log
    pub live_applications: ApplicationLog,
    /// Monthly portfolio yield
    pub portfolio_yield: Vec<YieldPoint>,
    /// High-risk client roster
    pub high_risk_clients: Vec<HighRiskClient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_bounded_to_twelve() {
        let mut trend = TrendSeries::starting_at(0.0);
        for i in 1..40 {
            trend = trend.pushed(i as f64);
        }
        assert_eq!(trend.len(), 12);
        assert_eq!(trend.latest(), Some(39.0));
        assert_eq!(trend.values()[0], 28.0);
    }

    #[test]
    fn test_change_percent_previous_zero() {
        let trend = TrendSeries::starting_at(0.0).pushed(5.0);
        assert_eq!(trend.change_percent(), 0.0);
    }

    #[test]
    fn test_dataset_kind_names_unique() {
        let names: std::collections::HashSet<&str> =
            DatasetKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 9);
    }
}
