//! Scripted assistant copy
//!
//! Every line the assistant can say, and every toast caption, lives here so
//! the planner stays free of string formatting and tests can assert the
//! copy verbatim.

use rust_decimal::Decimal;

/// Appended at session start, before any user input.
pub const GREETING: &str = "Hello! I'm your AI Loan Assistant. I can help you get instant personal loan approval. How much loan amount do you need?";

/// Re-prompt when no amount can be extracted.
pub const AMOUNT_REPROMPT: &str = "Please provide a loan amount (e.g., 500000 or 5 lakh)";

/// Immediate acknowledgement once a tenure is captured.
pub const TENURE_ACK: &str = "Perfect! Let me verify your KYC details...";

/// Re-prompt when no tenure can be extracted.
pub const TENURE_REPROMPT: &str = "Please provide a tenure in months (e.g., 12, 24, or 36)";

/// Notice once the simulated KYC check completes.
pub const KYC_NOTICE: &str = "KYC verification successful! Now fetching your credit score...";

/// Notice once the sanction letter is ready.
pub const SANCTION_NOTICE: &str = "Your sanction letter has been generated! You can download it from the status panel on the right. Is there anything else I can help you with?";

/// Fixed reply to any input after a terminal stage.
pub const CLOSING_ACK: &str = "Your loan application has been processed. Is there anything else I can help you with?";

/// Toast shown when a submit arrives while a turn is in flight.
pub const BUSY_NOTICE: &str = "Please wait, your application is still being processed.";

/// Toast shown when an internal fault interrupts a turn.
pub const FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

pub fn amount_confirmation(amount: u64) -> String {
    format!(
        "Great! You're requesting ₹{}. What tenure would you prefer? (e.g., 12, 24, 36 months)",
        group_inr(amount)
    )
}

pub fn credit_notice(score: u16) -> String {
    format!("Your credit score is {score}. Excellent! Let me process your loan application...")
}

pub fn approval(amount: u64, tenure_months: u32, rate: Decimal) -> String {
    format!(
        "Congratulations! Your loan of ₹{} for {tenure_months} months has been approved at {rate}% interest rate. Generating your sanction letter...",
        group_inr(amount)
    )
}

pub fn rejection(reapply_wait_months: u32) -> String {
    format!(
        "I'm sorry, but we cannot approve your loan at this time due to credit score requirements. You may reapply after {reapply_wait_months} months or consider a lower loan amount."
    )
}

/// Indian-style digit grouping: last three digits, then pairs (5,00,000).
pub fn group_inr(amount: u64) -> String {
    let digits = amount.to_string();
    let count = digits.len();
    if count <= 3 {
        return digits;
    }

    let mut grouped = String::with_capacity(count + count / 2);
    for (i, digit) in digits.chars().enumerate() {
        let remaining = count - i;
        if i > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
