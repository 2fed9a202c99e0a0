//! Pure turn planner
//!
//! Given the current application record, the engine configuration, and the
//! latest user utterance, decide every step the turn will run. No I/O, no
//! clocks, no sleeping: pacing is recorded on the steps and the session
//! runtime awaits it.

use crate::config::EngineConfig;
use crate::engine::extract::first_digit_run;
use crate::engine::plan::{Milestone, Mutation, TurnPlan, TurnStep};
use crate::engine::script;
use crate::model::{LoanApplication, Stage};

/// Plan the turn for `utterance` against the current application state.
pub fn plan_turn(
    application: &LoanApplication,
    config: &EngineConfig,
    utterance: &str,
) -> TurnPlan {
    match application.stage {
        Stage::AwaitingAmount => plan_amount_capture(config, utterance),
        Stage::AwaitingTenure => plan_tenure_capture(application, config, utterance),

        // The auto stages only exist while a turn is in flight, and the
        // orchestrator rejects submissions as busy for that whole window.
        // An empty plan keeps the function total.
        Stage::VerifyingKyc | Stage::FetchingCredit | Stage::Underwriting => TurnPlan::default(),

        Stage::Approved | Stage::Rejected => TurnPlan::reply(script::CLOSING_ACK),
    }
}

/// Amount capture: store the first digit run, confirm after a beat, move on
/// to tenure. No digits re-prompts and leaves everything unchanged.
fn plan_amount_capture(config: &EngineConfig, utterance: &str) -> TurnPlan {
    let Some(amount) = first_digit_run(utterance) else {
        return TurnPlan::reply(script::AMOUNT_REPROMPT);
    };

    TurnPlan::new(vec![
        // The record updates as soon as the amount parses; the confirmation
        // lands after the "thinking" pause.
        TurnStep::immediate().with_mutation(Mutation::SetAmount(amount)),
        TurnStep::after(config.pacing.amount_ack)
            .saying(script::amount_confirmation(amount))
            .advancing_to(Stage::AwaitingTenure),
    ])
}

/// Tenure capture kicks off the whole automatic cascade: KYC check, credit
/// pull, underwriting, and the terminal outcome, one paced step each.
fn plan_tenure_capture(
    application: &LoanApplication,
    config: &EngineConfig,
    utterance: &str,
) -> TurnPlan {
    let Some(tenure) = first_digit_run(utterance) else {
        return TurnPlan::reply(script::TENURE_REPROMPT);
    };
    let tenure_months = u32::try_from(tenure).unwrap_or(u32::MAX);

    let mut steps = vec![
        TurnStep::immediate()
            .with_mutation(Mutation::SetTenureMonths(tenure_months))
            .saying(script::TENURE_ACK)
            .advancing_to(Stage::VerifyingKyc),
        TurnStep::after(config.pacing.kyc_check)
            .with_mutation(Mutation::MarkKycVerified)
            .advancing_to(Stage::FetchingCredit)
            .with_milestone(Milestone::KycVerified)
            .saying(script::KYC_NOTICE),
        TurnStep::after(config.pacing.credit_pull)
            .with_mutation(Mutation::SetCreditScore(config.credit_score))
            .advancing_to(Stage::Underwriting)
            .with_milestone(Milestone::CreditFetched)
            .saying(script::credit_notice(config.credit_score)),
    ];

    // Underwriting is a single deterministic threshold comparison; the
    // planner already knows the score the simulated bureau will report.
    if config.credit_score >= config.approval_threshold {
        let amount = application.amount.unwrap_or_default();
        steps.push(
            TurnStep::after(config.pacing.underwriting)
                .with_mutation(Mutation::SetInterestRate(config.interest_rate_pct))
                .advancing_to(Stage::Approved)
                .with_milestone(Milestone::Approved)
                .saying(script::approval(
                    amount,
                    tenure_months,
                    config.interest_rate_pct,
                )),
        );
        steps.push(
            TurnStep::after(config.pacing.sanction_letter)
                .with_mutation(Mutation::SetSanctionDocument(
                    config.sanction_document_ref.clone(),
                ))
                .saying(script::SANCTION_NOTICE),
        );
    } else {
        steps.push(
            TurnStep::after(config.pacing.underwriting)
                .advancing_to(Stage::Rejected)
                .with_milestone(Milestone::Rejected)
                .saying(script::rejection(config.reapply_wait_months)),
        );
    }

    TurnPlan::new(steps)
}
