//! Numeric extraction from user utterances

use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only; the regex crate's `\d` would also match Unicode
// digit classes.
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit-run pattern compiles"));

/// First run of ASCII digits anywhere in `text`, as a number.
///
/// Digits accumulate with saturating arithmetic, so a pathological run
/// clamps at `u64::MAX` instead of failing: absence of any digit is the
/// sole `None` case. Unit words are not interpreted; "5 lakh" extracts 5.
pub fn first_digit_run(text: &str) -> Option<u64> {
    let run = DIGIT_RUN.find(text)?;
    let value = run.as_str().bytes().fold(0u64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
    });
    Some(value)
}
