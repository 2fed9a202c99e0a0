//! Simulation parameters for the underwriting pipeline

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Tunable parameters of the simulated loan flow.
///
/// The credit bureau, KYC provider, and underwriting desk are all
/// simulated, so their behavior is configuration: the score the "bureau"
/// reports, the approval cutoff, and the terms quoted on approval.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Credit score the simulated bureau lookup reports. Default 750.
    pub credit_score: u16,
    /// Minimum score underwriting approves. Default 700.
    pub approval_threshold: u16,
    /// Flat interest rate quoted on approval, in percent. Default 10.5.
    pub interest_rate_pct: Decimal,
    /// Document reference filled in once the sanction letter is ready.
    pub sanction_document_ref: String,
    /// Waiting period quoted in the rejection message, in months. Default 6.
    pub reapply_wait_months: u32,
    /// Simulated-latency profile between pipeline steps.
    pub pacing: Pacing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credit_score: 750,
            approval_threshold: 700,
            interest_rate_pct: dec!(10.5),
            sanction_document_ref: "/sample-sanction-letter.pdf".to_string(),
            reapply_wait_months: 6,
            pacing: Pacing::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults with score and threshold overridable from the environment
    /// (`LOANDESK_CREDIT_SCORE`, `LOANDESK_APPROVAL_THRESHOLD`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(score) = env_u16("LOANDESK_CREDIT_SCORE") {
            config.credit_score = score;
        }
        if let Some(threshold) = env_u16("LOANDESK_APPROVAL_THRESHOLD") {
            config.approval_threshold = threshold;
        }
        config
    }
}

fn env_u16(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Fixed "work in progress" delays between turn steps.
///
/// These pace the simulation for perceived responsiveness only; they have
/// no effect on correctness and are deliberately not environment-tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Before the amount confirmation.
    pub amount_ack: Duration,
    /// Before the KYC-verified notice.
    pub kyc_check: Duration,
    /// Before the credit-score notice.
    pub credit_pull: Duration,
    /// Before the underwriting decision message.
    pub underwriting: Duration,
    /// Before the sanction-letter notice, approval path only.
    pub sanction_letter: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            amount_ack: Duration::from_millis(1000),
            kyc_check: Duration::from_millis(1500),
            credit_pull: Duration::from_millis(2000),
            underwriting: Duration::from_millis(2500),
            sanction_letter: Duration::from_millis(1500),
        }
    }
}

impl Pacing {
    /// Zero-delay profile for tests and fast local runs.
    pub fn none() -> Self {
        Self {
            amount_ack: Duration::ZERO,
            kyc_check: Duration::ZERO,
            credit_pull: Duration::ZERO,
            underwriting: Duration::ZERO,
            sanction_letter: Duration::ZERO,
        }
    }
}
