//! Property tests for the turn planner
//!
//! These drive the pure planner plus `apply_mutation`/`apply_advance` the
//! same way the session runtime does, minus pacing and events, so whole
//! conversations can be explored without an async runtime.

use crate::config::{EngineConfig, Pacing};
use crate::engine::plan::{apply_advance, apply_mutation};
use crate::engine::{plan_turn, script};
use crate::error::EngineError;
use crate::model::{ApplicantProfile, LoanApplication, Message, Stage, Transcript};
use proptest::prelude::*;

fn test_config(score: u16) -> EngineConfig {
    EngineConfig {
        credit_score: score,
        pacing: Pacing::none(),
        ..EngineConfig::default()
    }
}

/// Execute one turn the way the runtime does, minus pacing and events.
fn run_turn(
    profile: &mut ApplicantProfile,
    application: &mut LoanApplication,
    config: &EngineConfig,
    utterance: &str,
) -> Result<Vec<String>, EngineError> {
    let plan = plan_turn(application, config, utterance);
    let mut spoken = Vec::new();
    for step in plan.steps {
        for mutation in &step.mutations {
            apply_mutation(profile, application, mutation)?;
        }
        if let Some(next) = step.advance {
            apply_advance(application, next)?;
        }
        if let Some(text) = step.say {
            spoken.push(text);
        }
    }
    Ok(spoken)
}

fn stage_index(stage: Stage) -> usize {
    match stage {
        Stage::AwaitingAmount => 0,
        Stage::AwaitingTenure => 1,
        Stage::VerifyingKyc => 2,
        Stage::FetchingCredit => 3,
        Stage::Underwriting => 4,
        Stage::Approved | Stage::Rejected => 5,
    }
}

fn arb_utterance() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ?!.]{0,24}",
        "[0-9]{1,9}",
        "(I need |loan of )?[0-9]{1,7}( lakh| rupees)?",
        Just("hello".to_string()),
        Just("I need 500000".to_string()),
        Just("24 months".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn stage_never_regresses_and_never_skips(
        utterances in prop::collection::vec(arb_utterance(), 0..12)
    ) {
        let config = test_config(750);
        let mut profile = ApplicantProfile::placeholder();
        let mut application = LoanApplication::new();

        for utterance in &utterances {
            let before = application.stage;
            // apply_advance enforces adjacency, so an Err here would mean
            // the planner scheduled a skip.
            prop_assert!(run_turn(&mut profile, &mut application, &config, utterance).is_ok());
            prop_assert!(stage_index(application.stage) >= stage_index(before));
            if before.is_terminal() {
                prop_assert_eq!(application.stage, before);
            }
        }
    }

    #[test]
    fn digit_free_input_never_mutates(chatter in "[a-z ?!.]{0,30}") {
        let config = test_config(750);
        let mut profile = ApplicantProfile::placeholder();
        let mut application = LoanApplication::new();

        let spoken = run_turn(&mut profile, &mut application, &config, &chatter)
            .expect("re-prompt turn");
        prop_assert_eq!(application.stage, Stage::AwaitingAmount);
        prop_assert_eq!(application.amount, None);
        prop_assert_eq!(spoken, vec![script::AMOUNT_REPROMPT.to_string()]);

        // Same contract once an amount has landed and tenure is expected.
        run_turn(&mut profile, &mut application, &config, "500000").expect("amount turn");
        let spoken = run_turn(&mut profile, &mut application, &config, &chatter)
            .expect("re-prompt turn");
        prop_assert_eq!(application.stage, Stage::AwaitingTenure);
        prop_assert_eq!(application.tenure_months, None);
        prop_assert_eq!(spoken, vec![script::TENURE_REPROMPT.to_string()]);
    }

    #[test]
    fn terminal_stages_absorb_everything(utterance in arb_utterance()) {
        let config = test_config(750);
        let mut profile = ApplicantProfile::placeholder();
        let mut application = LoanApplication::new();
        run_turn(&mut profile, &mut application, &config, "500000").expect("amount turn");
        run_turn(&mut profile, &mut application, &config, "24").expect("tenure turn");
        prop_assert_eq!(application.stage, Stage::Approved);

        let frozen_profile = profile.clone();
        let frozen_application = application.clone();
        let spoken = run_turn(&mut profile, &mut application, &config, &utterance)
            .expect("closing turn");

        prop_assert_eq!(&profile, &frozen_profile);
        prop_assert_eq!(&application, &frozen_application);
        prop_assert_eq!(spoken, vec![script::CLOSING_ACK.to_string()]);
    }

    #[test]
    fn sanction_document_iff_approved(score in 0u16..=900) {
        let config = test_config(score);
        let mut profile = ApplicantProfile::placeholder();
        let mut application = LoanApplication::new();
        run_turn(&mut profile, &mut application, &config, "250000").expect("amount turn");
        run_turn(&mut profile, &mut application, &config, "36").expect("tenure turn");

        let approved = application.stage == Stage::Approved;
        prop_assert_eq!(approved, score >= config.approval_threshold);
        prop_assert_eq!(application.sanction_document_ref.is_some(), approved);
        prop_assert_eq!(application.interest_rate_pct.is_some(), approved);

        // Both outcomes pass through KYC and the credit pull.
        prop_assert!(profile.kyc_verified);
        prop_assert_eq!(profile.credit_score, Some(score));
        prop_assert_eq!(application.tenure_months, Some(36));
    }

    #[test]
    fn extracted_amount_is_stored_verbatim(amount in any::<u64>()) {
        let config = test_config(750);
        let mut profile = ApplicantProfile::placeholder();
        let mut application = LoanApplication::new();

        run_turn(&mut profile, &mut application, &config, &format!("I need {amount}"))
            .expect("amount turn");
        prop_assert_eq!(application.amount, Some(amount));
        prop_assert_eq!(application.stage, Stage::AwaitingTenure);
    }

    #[test]
    fn transcript_is_append_only(texts in prop::collection::vec(".{0,20}", 0..30)) {
        let mut log = Transcript::new();

        for (i, text) in texts.iter().enumerate() {
            log.append(Message::user(text.clone()));
            prop_assert_eq!(log.len(), i + 1);

            let snapshot = log.snapshot();
            for (j, expected) in texts.iter().take(i + 1).enumerate() {
                prop_assert_eq!(&snapshot[j].text, expected);
            }
        }
    }
}

// ============================================================================
// Whole-conversation sequences
// ============================================================================

#[test]
fn full_conversation_reaches_approval() {
    let config = test_config(750);
    let mut profile = ApplicantProfile::placeholder();
    let mut application = LoanApplication::new();

    let first = run_turn(&mut profile, &mut application, &config, "I need 500000")
        .expect("amount turn");
    assert_eq!(first, [script::amount_confirmation(500_000)]);

    let second =
        run_turn(&mut profile, &mut application, &config, "24 months").expect("tenure turn");
    assert_eq!(
        second,
        [
            script::TENURE_ACK.to_string(),
            script::KYC_NOTICE.to_string(),
            script::credit_notice(750),
            script::approval(500_000, 24, config.interest_rate_pct),
            script::SANCTION_NOTICE.to_string(),
        ]
    );

    assert_eq!(application.stage, Stage::Approved);
    assert_eq!(application.amount, Some(500_000));
    assert_eq!(application.tenure_months, Some(24));
    assert_eq!(application.interest_rate_pct, Some(config.interest_rate_pct));
    assert_eq!(
        application.sanction_document_ref.as_deref(),
        Some("/sample-sanction-letter.pdf")
    );
    assert!(profile.kyc_verified);
    assert_eq!(profile.credit_score, Some(750));
}

#[test]
fn re_prompts_are_idempotent_retries() {
    let config = test_config(750);
    let mut profile = ApplicantProfile::placeholder();
    let mut application = LoanApplication::new();

    for _ in 0..3 {
        run_turn(&mut profile, &mut application, &config, "some day").expect("re-prompt");
        assert_eq!(application.stage, Stage::AwaitingAmount);
    }

    run_turn(&mut profile, &mut application, &config, "750000").expect("amount turn");
    assert_eq!(application.amount, Some(750_000));
    assert_eq!(application.stage, Stage::AwaitingTenure);
}

#[test]
fn rejected_conversation_still_closes_politely() {
    let config = test_config(650);
    let mut profile = ApplicantProfile::placeholder();
    let mut application = LoanApplication::new();

    run_turn(&mut profile, &mut application, &config, "100000").expect("amount turn");
    let outcome =
        run_turn(&mut profile, &mut application, &config, "12").expect("tenure turn");
    assert_eq!(application.stage, Stage::Rejected);
    assert_eq!(
        outcome.last().map(String::as_str),
        Some(script::rejection(6).as_str())
    );

    let closing = run_turn(&mut profile, &mut application, &config, "why?").expect("closing");
    assert_eq!(closing, [script::CLOSING_ACK]);
}
