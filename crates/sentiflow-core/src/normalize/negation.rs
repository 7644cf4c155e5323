//! Negation scope tagging
//!
//! Tokens that follow a negation word are rewritten with a `NOT_` prefix
//! until punctuation closes the clause or the scope window runs out:
//!
//! "i do not like this. it is fine" → "i do not NOT_like NOT_this. it is fine"

use super::elongation::has_punctuation;
use std::collections::HashSet;

/// Prefix applied to every token inside a negation scope
pub const NEGATION_PREFIX: &str = "NOT_";

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "cannot",
    "can't", "don't", "didn't", "won't", "wouldn't", "isn't", "aren't", "ain't",
    "shouldn't", "wasn't", "weren't", "doesn't", "couldn't", "hasn't", "haven't", "hadn't",
];

/// Negation word set plus the maximum number of tokens one negation can tag
#[derive(Debug, Clone)]
pub struct NegationScope {
    words: HashSet<String>,
    window: usize,
}

impl Default for NegationScope {
    fn default() -> Self {
        Self::new(8)
    }
}

impl NegationScope {
    /// Built-in negation words with the given scope window
    pub fn new(window: usize) -> Self {
        Self::with_words(NEGATIONS.iter().copied(), window)
    }

    /// Custom negation words with the given scope window
    pub fn with_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>, window: usize) -> Self {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            window,
        }
    }

    /// Check if a token is a negation marker
    pub fn is_negation(&self, token: &str) -> bool {
        self.words.contains(token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
    }

    /// Maximum number of tokens tagged after one negation word
    pub fn window(&self) -> usize {
        self.window
    }

    /// Tag negated tokens in whitespace-separated text
    pub fn mark(&self, text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut negating = false;
        let mut scope = 0;

        for token in text.split_whitespace() {
            let has_alnum = token.chars().any(char::is_alphanumeric);

            // Punctuation closes the clause. A word still inside the window
            // keeps its tag, bare punctuation never gets one.
            if has_punctuation(token) || !has_alnum {
                let tag = negating && scope < self.window && has_alnum && !self.is_negation(token);
                if tag {
                    out.push(format!("{}{}", NEGATION_PREFIX, token));
                } else {
                    out.push(token.to_string());
                }
                negating = false;
                scope = 0;
                continue;
            }

            if self.is_negation(token) {
                negating = true;
                scope = 0;
                out.push(token.to_string());
                continue;
            }

            if negating && scope < self.window {
                out.push(format!("{}{}", NEGATION_PREFIX, token));
                scope += 1;
            } else {
                out.push(token.to_string());
            }
        }

        out.join(" ")
    }
}

/// Split a token into its base word and the number of `NOT_` prefixes
pub fn strip_negation(token: &str) -> (&str, usize) {
    let mut base = token;
    let mut count = 0;
    while let Some(rest) = base.strip_prefix(NEGATION_PREFIX) {
        base = rest;
        count += 1;
    }
    (base, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scope() {
        let scope = NegationScope::default();
        assert_eq!(scope.mark("i do not like this"), "i do not NOT_like NOT_this");
    }

    #[test]
    fn test_scope_ends_at_punctuation() {
        let scope = NegationScope::default();
        assert_eq!(
            scope.mark("i do not like this. it is great"),
            "i do not NOT_like NOT_this. it is great"
        );
    }

    #[test]
    fn test_pure_punctuation_not_prefixed() {
        let scope = NegationScope::default();
        assert_eq!(scope.mark("not good , fine"), "not NOT_good , fine");
        assert_eq!(scope.mark("not good - fine"), "not NOT_good - fine");
    }

    #[test]
    fn test_window_limit() {
        let scope = NegationScope::new(2);
        assert_eq!(scope.mark("never a b c d"), "never NOT_a NOT_b c d");
    }

    #[test]
    fn test_window_limit_applies_to_punctuated_token() {
        let scope = NegationScope::new(1);
        assert_eq!(scope.mark("not a b."), "not NOT_a b.");
    }

    #[test]
    fn test_default_window_is_eight() {
        let scope = NegationScope::default();
        let marked = scope.mark("no 1 2 3 4 5 6 7 8 9 10");
        assert_eq!(marked.matches(NEGATION_PREFIX).count(), 8);
        assert!(marked.ends_with("NOT_8 9 10"));
    }

    #[test]
    fn test_negation_restarts_window() {
        let scope = NegationScope::new(2);
        assert_eq!(scope.mark("no a not b c d"), "no NOT_a not NOT_b NOT_c d");
    }

    #[test]
    fn test_contracted_negation_marker() {
        let scope = NegationScope::default();
        assert_eq!(scope.mark("it wasn't fun"), "it wasn't NOT_fun");
    }

    #[test]
    fn test_negation_with_punctuation_resets() {
        let scope = NegationScope::default();
        assert_eq!(scope.mark("no. fine"), "no. fine");
    }

    #[test]
    fn test_empty() {
        assert_eq!(NegationScope::default().mark(""), "");
    }

    #[test]
    fn test_strip_negation() {
        assert_eq!(strip_negation("NOT_like"), ("like", 1));
        assert_eq!(strip_negation("NOT_NOT_bad"), ("bad", 2));
        assert_eq!(strip_negation("plain"), ("plain", 0));
    }
}
