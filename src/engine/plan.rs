//! Turn pipeline: the steps a submission schedules
//!
//! A turn is planned up front as an ordered list of steps, each carrying an
//! optional pause, field writes, an assistant line, a milestone toast, and
//! a stage advance. The session runtime executes steps strictly in order,
//! awaiting each pause before touching state, so observable ordering and
//! pacing never depend on a particular concurrency primitive.

use crate::error::EngineError;
use crate::model::{ApplicantProfile, LoanApplication, Stage};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

// ============================================================================
// Mutations
// ============================================================================

/// A single field write performed by the stage engine.
///
/// Each variant addresses exactly one record field, and every field is
/// write-once within a session; `apply_mutation` enforces that.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetAmount(u64),
    SetTenureMonths(u32),
    MarkKycVerified,
    SetCreditScore(u16),
    SetInterestRate(Decimal),
    SetSanctionDocument(String),
}

/// Apply one mutation to the session records, enforcing write-once.
pub fn apply_mutation(
    profile: &mut ApplicantProfile,
    application: &mut LoanApplication,
    mutation: &Mutation,
) -> Result<(), EngineError> {
    match mutation {
        Mutation::SetAmount(amount) => set_once(&mut application.amount, *amount, "amount"),
        Mutation::SetTenureMonths(months) => {
            set_once(&mut application.tenure_months, *months, "tenure_months")
        }
        Mutation::MarkKycVerified => {
            if profile.kyc_verified {
                return Err(EngineError::FieldAlreadySet {
                    field: "kyc_verified",
                });
            }
            profile.kyc_verified = true;
            Ok(())
        }
        Mutation::SetCreditScore(score) => {
            set_once(&mut profile.credit_score, *score, "credit_score")
        }
        Mutation::SetInterestRate(rate) => {
            set_once(&mut application.interest_rate_pct, *rate, "interest_rate_pct")
        }
        Mutation::SetSanctionDocument(reference) => set_once(
            &mut application.sanction_document_ref,
            reference.clone(),
            "sanction_document_ref",
        ),
    }
}

/// Advance the stage, enforcing the declared transition order.
pub fn apply_advance(application: &mut LoanApplication, next: Stage) -> Result<(), EngineError> {
    if !application.stage.can_advance_to(next) {
        return Err(EngineError::InvalidAdvance {
            from: application.stage,
            to: next,
        });
    }
    application.stage = next;
    Ok(())
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), EngineError> {
    if slot.is_some() {
        return Err(EngineError::FieldAlreadySet { field });
    }
    *slot = Some(value);
    Ok(())
}

// ============================================================================
// Milestones
// ============================================================================

/// One-shot notification milestones, surfaced as toasts.
///
/// Side-channel to the conversation log: fire-and-forget, never replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    KycVerified,
    CreditFetched,
    Approved,
    Rejected,
}

impl Milestone {
    /// Toast caption for this milestone.
    pub fn caption(self) -> &'static str {
        match self {
            Milestone::KycVerified => "KYC Verified Successfully ✅",
            Milestone::CreditFetched => "Credit Score Fetched 📊",
            Milestone::Approved => "Loan Approved ✅",
            Milestone::Rejected => "Loan Rejected ❌",
        }
    }
}

// ============================================================================
// Turn steps
// ============================================================================

/// One step of a turn.
///
/// Execution order within a step is fixed: pause, mutations, stage advance,
/// milestone, assistant message. State settles before anything is said, so
/// a snapshot taken at a message is never ahead of the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnStep {
    pub pause: Duration,
    pub mutations: Vec<Mutation>,
    pub advance: Option<Stage>,
    pub milestone: Option<Milestone>,
    pub say: Option<String>,
}

impl TurnStep {
    /// A step that runs immediately, with no simulated latency.
    pub fn immediate() -> Self {
        Self::default()
    }

    /// A step that waits `pause` before doing anything.
    pub fn after(pause: Duration) -> Self {
        Self {
            pause,
            ..Self::default()
        }
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn advancing_to(mut self, stage: Stage) -> Self {
        self.advance = Some(stage);
        self
    }

    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestone = Some(milestone);
        self
    }

    pub fn saying(mut self, text: impl Into<String>) -> Self {
        self.say = Some(text.into());
        self
    }
}

/// The full ordered pipeline for one accepted submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnPlan {
    pub steps: Vec<TurnStep>,
}

impl TurnPlan {
    pub fn new(steps: Vec<TurnStep>) -> Self {
        Self { steps }
    }

    /// A plan that only says one line, immediately; state untouched.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            steps: vec![TurnStep::immediate().saying(text)],
        }
    }

    /// Every assistant line in the plan, in speaking order.
    pub fn spoken_lines(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| step.say.as_deref())
            .collect()
    }

    /// Whether any step touches records or stage.
    pub fn mutates_state(&self) -> bool {
        self.steps
            .iter()
            .any(|step| !step.mutations.is_empty() || step.advance.is_some())
    }
}
