//! Loan application record and lifecycle stages

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a loan application.
///
/// Stages advance monotonically along the declared order; the two terminal
/// stages absorb all further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for the user to name a loan amount.
    #[default]
    AwaitingAmount,

    /// Amount captured, waiting for a tenure in months.
    AwaitingTenure,

    /// Simulated identity verification in progress.
    VerifyingKyc,

    /// Simulated credit-bureau lookup in progress.
    FetchingCredit,

    /// Automated approve/reject decision in progress.
    Underwriting,

    /// Terminal: loan sanctioned.
    Approved,

    /// Terminal: loan declined.
    Rejected,
}

impl Stage {
    /// Terminal stages absorb all further input.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Approved | Stage::Rejected)
    }

    /// Stages that advance on their own, without user input.
    #[allow(dead_code)] // Exercised by the stage tests
    pub fn is_auto(self) -> bool {
        matches!(
            self,
            Stage::VerifyingKyc | Stage::FetchingCredit | Stage::Underwriting
        )
    }

    /// Whether `next` is a legal immediate successor of `self`.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::AwaitingAmount, Stage::AwaitingTenure)
                | (Stage::AwaitingTenure, Stage::VerifyingKyc)
                | (Stage::VerifyingKyc, Stage::FetchingCredit)
                | (Stage::FetchingCredit, Stage::Underwriting)
                | (Stage::Underwriting, Stage::Approved | Stage::Rejected)
        )
    }

    /// Caption the status panel renders for this stage. Tenure capture and
    /// the KYC check share one caption; the panel treats them as a single
    /// information-gathering phase.
    pub fn status_label(self) -> &'static str {
        match self {
            Stage::AwaitingAmount => "Awaiting Details",
            Stage::AwaitingTenure | Stage::VerifyingKyc => "Collecting Information",
            Stage::FetchingCredit => "Verifying Credit Score",
            Stage::Underwriting => "Processing Application",
            Stage::Approved => "Approved",
            Stage::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AwaitingAmount => "awaiting_amount",
            Stage::AwaitingTenure => "awaiting_tenure",
            Stage::VerifyingKyc => "verifying_kyc",
            Stage::FetchingCredit => "fetching_credit",
            Stage::Underwriting => "underwriting",
            Stage::Approved => "approved",
            Stage::Rejected => "rejected",
        };
        write!(f, "{name}")
    }
}

/// The loan request and its progress.
///
/// `interest_rate_pct` and `sanction_document_ref` are populated only on
/// the approval path, never on rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanApplication {
    pub stage: Stage,
    pub amount: Option<u64>,
    pub tenure_months: Option<u32>,
    pub interest_rate_pct: Option<Decimal>,
    pub sanction_document_ref: Option<String>,
}

impl LoanApplication {
    pub fn new() -> Self {
        Self::default()
    }
}
