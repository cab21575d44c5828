//! Closed category enumerations shared by the datasets.
//!
//! Category sets never grow or shrink at runtime; datasets keyed by these
//! enums keep their identity set across every update.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Loan product type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoanType {
    /// Unsecured personal loan
    Personal,
    /// Vehicle finance
    Auto,
    /// Residential mortgage
    Mortgage,
    /// Small-business lending
    Business,
    /// Student loan
    Student,
}

impl LoanType {
    /// Every loan type, in display order.
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Auto,
        LoanType::Mortgage,
        LoanType::Business,
        LoanType::Student,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal",
            LoanType::Auto => "Auto",
            LoanType::Mortgage => "Mortgage",
            LoanType::Business => "Business",
            LoanType::Student => "Student",
        }
    }

    /// Draws a loan type uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&LoanType::Personal)
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Borrower age bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// 18 to 25
    #[serde(rename = "18-25")]
    From18To25,
    /// 26 to 35
    #[serde(rename = "26-35")]
    From26To35,
    /// 36 to 45
    #[serde(rename = "36-45")]
    From36To45,
    /// 46 to 60
    #[serde(rename = "46-60")]
    From46To60,
    /// Over 60
    #[serde(rename = "60+")]
    Over60,
}

impl AgeGroup {
    /// Every age bucket, youngest first.
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::From18To25,
        AgeGroup::From26To35,
        AgeGroup::From36To45,
        AgeGroup::From46To60,
        AgeGroup::Over60,
    ];

    /// Bucket label.
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::From18To25 => "18-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To45 => "36-45",
            AgeGroup::From46To60 => "46-60",
            AgeGroup::Over60 => "60+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Decision state of a loan application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting decision
    Pending,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
}

impl ApplicationStatus {
    /// Every status.
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    /// Draws a status uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&ApplicationStatus::Pending)
    }
}

/// Repayment state of a high-risk client.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payments up to date
    Current,
    /// Payments overdue
    Late,
    /// Loan in default
    Default,
    /// Terms renegotiated
    Restructured,
}

impl PaymentStatus {
    /// Every status.
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Current,
        PaymentStatus::Late,
        PaymentStatus::Default,
        PaymentStatus::Restructured,
    ];

    /// Draws a status uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&PaymentStatus::Current)
    }
}
