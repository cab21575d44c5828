//! Cadence groups: datasets that share one update interval.
//!
//! | Group | Interval | Datasets (update order) |
//! |---|---|---|
//! | `Applications` | 3 s | live applications |
//! | `Overview` | 5 s | overview |
//! | `Activity` | 10 s | issuance, high-risk clients |
//! | `Rates` | 15 s | interest rate by type |
//! | `Portfolio` | 30 s | loan types, portfolio yield |
//! | `Demographics` | 60 s | age distribution, regions |

use std::fmt;
use std::time::Duration;

use lending_series::DatasetKind;
use serde::Serialize;

/// A set of datasets sharing one fixed update interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceGroup {
    /// Live application log
    Applications,
    /// Overview KPIs
    Overview,
    /// Issuance series and high-risk roster
    Activity,
    /// Interest rate by loan type
    Rates,
    /// Loan-type breakdown and portfolio yield
    Portfolio,
    /// Age distribution and regions
    Demographics,
}

impl CadenceGroup {
    /// Every cadence group, fastest first.
    pub const ALL: [CadenceGroup; 6] = [
        CadenceGroup::Applications,
        CadenceGroup::Overview,
        CadenceGroup::Activity,
        CadenceGroup::Rates,
        CadenceGroup::Portfolio,
        CadenceGroup::Demographics,
    ];

    /// Datasets updated when this group fires, in application order.
    pub fn datasets(&self) -> &'static [DatasetKind] {
        match self {
            CadenceGroup::Applications => &[DatasetKind::LiveApplications],
            CadenceGroup::Overview => &[DatasetKind::Overview],
            CadenceGroup::Activity => &[DatasetKind::Issuance, DatasetKind::HighRiskClients],
            CadenceGroup::Rates => &[DatasetKind::InterestRates],
            CadenceGroup::Portfolio => &[DatasetKind::LoanTypes, DatasetKind::PortfolioYield],
            CadenceGroup::Demographics => &[DatasetKind::AgeDistribution, DatasetKind::Regions],
        }
    }

    /// Standard interval for this group.
    pub fn default_interval(&self) -> Duration {
        Duration::from_secs(match self {
            CadenceGroup::Applications => 3,
            CadenceGroup::Overview => 5,
            CadenceGroup::Activity => 10,
            CadenceGroup::Rates => 15,
            CadenceGroup::Portfolio => 30,
            CadenceGroup::Demographics => 60,
        })
    }

    /// Position in [`CadenceGroup::ALL`].
    pub fn index(&self) -> usize {
        match self {
            CadenceGroup::Applications => 0,
            CadenceGroup::Overview => 1,
            CadenceGroup::Activity => 2,
            CadenceGroup::Rates => 3,
            CadenceGroup::Portfolio => 4,
            CadenceGroup::Demographics => 5,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CadenceGroup::Applications => "applications",
            CadenceGroup::Overview => "overview",
            CadenceGroup::Activity => "activity",
            CadenceGroup::Rates => "rates",
            CadenceGroup::Portfolio => "portfolio",
            CadenceGroup::Demographics => "demographics",
        }
    }
}

impl fmt::Display for CadenceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
