//! Character elongation and repeated punctuation
//!
//! "soooo goooood!!!" → "soo good!" with the default cap of 2.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Punctuation marks that collapse when repeated
const COLLAPSIBLE_PUNCT: &str = "!?.,";

static PUNCT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!?.,]{2,}").expect("valid regex"));

/// Rewrite any run of 3+ identical characters as exactly `cap` repetitions.
///
/// Works on Unicode scalars, so letters, punctuation and emoji are treated
/// alike. Runs shorter than 3 are untouched.
pub fn squeeze_elongations(text: &str, cap: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }

        let keep = if run >= 3 { cap } else { run };
        for _ in 0..keep {
            result.push(c);
        }
    }

    result
}

/// Collapse runs of 2+ marks from `!?.,` to a single mark (the last one)
pub fn collapse_punctuation(text: &str) -> String {
    PUNCT_RUN
        .replace_all(text, |caps: &Captures| {
            caps[0].chars().last().map(String::from).unwrap_or_default()
        })
        .into_owned()
}

/// True when the token carries any collapsible punctuation mark
pub(crate) fn has_punctuation(token: &str) -> bool {
    token.chars().any(|c| COLLAPSIBLE_PUNCT.contains(c))
}
