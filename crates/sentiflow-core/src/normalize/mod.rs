//! Text normalization for conversational input
//!
//! [`TextNormalizer::clean`] runs a fixed sequence of passes. Each pass relies
//! on the shape left by the previous one, so the order is part of the contract:
//! 1. HTML entities and tags
//! 2. URLs, emails and phone numbers
//! 3. Control characters
//! 4. Trim + lowercase
//! 5. Emoji → sentiment words
//! 6. Contractions
//! 7. Slang/abbreviations
//! 8. Character elongation
//! 9. Repeated punctuation
//! 10. Negation scope tagging
//! 11. Character whitelist
//! 12. Whitespace collapse

mod elongation;
mod emoji;
mod markup;
mod negation;
mod substitutions;
mod tokenize;

pub use elongation::{collapse_punctuation, squeeze_elongations};
pub use emoji::EmojiMap;
pub use markup::{strip_contact_noise, strip_control_chars, strip_html};
pub use negation::{strip_negation, NegationScope, NEGATION_PREFIX};
pub use substitutions::SubstitutionTable;
pub use tokenize::{tokenize, Token, TokenKind, Tokens};

use crate::config::{ConfigError, NormalizerOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z\s.,!?'\-_:;]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Raw utterance → canonical cleaned text
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    contractions: SubstitutionTable,
    slang: SubstitutionTable,
    emoji: EmojiMap,
    negation: NegationScope,
    max_elongation: usize,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            contractions: SubstitutionTable::contractions(),
            slang: SubstitutionTable::slang(),
            emoji: EmojiMap::default(),
            negation: NegationScope::default(),
            max_elongation: 2,
        }
    }
}

impl TextNormalizer {
    /// Build a normalizer from configuration, loading any table overrides.
    ///
    /// Fails fast on invalid options or malformed table files.
    pub fn from_options(options: &NormalizerOptions) -> Result<Self, ConfigError> {
        check_elongation_cap(options.max_elongation)?;
        if options.negation_window == 0 {
            return Err(ConfigError::InvalidOption {
                name: "normalizer.negation_window",
                message: "must be at least 1".to_string(),
            });
        }

        let mut contractions = SubstitutionTable::contractions();
        if let Some(path) = &options.contractions_file {
            contractions = contractions.merge_file(path)?;
        }

        let mut slang = SubstitutionTable::slang();
        if let Some(path) = &options.slang_file {
            slang = slang.merge_file(path)?;
        }

        let mut emoji = EmojiMap::default();
        if let Some(path) = &options.emoji_file {
            emoji = emoji.merge_file(path)?;
        }

        tracing::debug!(
            "Normalizer ready: {} contractions, {} slang, {} emoji, cap {}, window {}",
            contractions.len(),
            slang.len(),
            emoji.len(),
            options.max_elongation,
            options.negation_window
        );

        Ok(Self {
            contractions,
            slang,
            emoji,
            negation: NegationScope::new(options.negation_window),
            max_elongation: options.max_elongation,
        })
    }

    /// Replace the contraction table
    pub fn with_contractions(mut self, table: SubstitutionTable) -> Self {
        self.contractions = table;
        self
    }

    /// Replace the slang table
    pub fn with_slang(mut self, table: SubstitutionTable) -> Self {
        self.slang = table;
        self
    }

    /// Replace the emoji map
    pub fn with_emoji(mut self, emoji: EmojiMap) -> Self {
        self.emoji = emoji;
        self
    }

    /// Replace the negation words/window
    pub fn with_negation(mut self, negation: NegationScope) -> Self {
        self.negation = negation;
        self
    }

    /// Set the elongation cap. A cap of 0 is rejected like in [`Self::from_options`].
    pub fn with_max_elongation(mut self, cap: usize) -> Result<Self, ConfigError> {
        check_elongation_cap(cap)?;
        self.max_elongation = cap;
        Ok(self)
    }

    /// Clean a raw utterance. Never fails; empty input gives empty output.
    pub fn clean(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let text = strip_html(raw);
        let text = strip_contact_noise(&text);
        let text = strip_control_chars(&text);
        let text = fold_case(&text);
        let text = self.emoji.apply(&text);
        let text = self.contractions.apply(&text);
        let text = self.slang.apply(&text);
        let text = squeeze_elongations(&text, self.max_elongation);
        let text = collapse_punctuation(&text);
        let text = self.negation.mark(&text);
        let text = DISALLOWED.replace_all(&text, " ");
        let text = WHITESPACE.replace_all(&text, " ");

        text.trim().to_string()
    }

    /// Split cleaned text into words and symbols
    pub fn tokenize<'a>(&self, cleaned: &'a str) -> Tokens<'a> {
        tokenize(cleaned)
    }
}

fn check_elongation_cap(cap: usize) -> Result<(), ConfigError> {
    if cap == 0 {
        return Err(ConfigError::InvalidOption {
            name: "normalizer.max_elongation",
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Trim, lowercase and fold typographic apostrophes to `'`
fn fold_case(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        TextNormalizer::default().clean(text)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\t"), "");
    }

    #[test]
    fn test_elongation() {
        assert_eq!(clean("soooo good"), "soo good");
    }

    #[test]
    fn test_negation_scope() {
        assert_eq!(clean("I don't like this"), "i do not NOT_like NOT_this");
    }

    #[test]
    fn test_negation_stops_at_punctuation() {
        assert_eq!(
            clean("I don't like this. The staff were great"),
            "i do not NOT_like NOT_this. the staff were great"
        );
    }

    #[test]
    fn test_url_and_email() {
        let out = clean("Visit https://example.com or mail me@ex.com");
        assert!(!out.contains("example.com"));
        assert!(!out.contains("me@ex.com"));
        assert_eq!(out, "visit or mail");
    }

    #[test]
    fn test_html_removed() {
        let out = clean("<div>Great <b>service</b></div>&nbsp;thanks");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert_eq!(out, "great service thanks");
    }

    #[test]
    fn test_control_chars_removed() {
        let out = clean("bad\u{0}\u{7}day");
        assert!(!out.chars().any(|c| c.is_control()));
        assert_eq!(out, "bad day");
    }

    #[test]
    fn test_emoji_and_punctuation() {
        assert_eq!(clean("This is soooo goooood \u{1F60A}\u{1F60A}!!!"), "this is soo good smiley smiley !");
    }

    #[test]
    fn test_slang() {
        assert_eq!(clean("u r amazing!! thx"), "you r amazing! thanks");
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(clean("I don\u{2019}t know"), "i do not NOT_know");
    }

    #[test]
    fn test_whitelist() {
        assert_eq!(clean("price: $5 (ok) #win"), "price: 5 ok win");
    }

    #[test]
    fn test_worst_service_ever() {
        assert_eq!(
            clean("Worst. service. ever. I won't use it again."),
            "worst. service. ever. i will not NOT_use NOT_it NOT_again."
        );
    }

    #[test]
    fn test_from_options_rejects_zero_window() {
        let options = NormalizerOptions {
            negation_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            TextNormalizer::from_options(&options),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_from_options_loads_slang_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.toml");
        std::fs::write(&path, "[slang]\nngl = \"not going to lie\"\n").unwrap();

        let options = NormalizerOptions {
            slang_file: Some(path),
            ..Default::default()
        };
        let normalizer = TextNormalizer::from_options(&options).unwrap();
        assert_eq!(normalizer.clean("ngl great"), "not NOT_going NOT_to NOT_lie NOT_great");
    }

    #[test]
    fn test_from_options_malformed_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contractions.toml");
        std::fs::write(&path, "[contractions]\n\"y'all\" = 1\n").unwrap();

        let options = NormalizerOptions {
            contractions_file: Some(path),
            ..Default::default()
        };
        assert!(TextNormalizer::from_options(&options).is_err());
    }

    #[test]
    fn test_custom_elongation_cap() {
        let normalizer = TextNormalizer::default().with_max_elongation(1).unwrap();
        assert_eq!(normalizer.clean("yesss"), "yes");

        let normalizer = TextNormalizer::default().with_max_elongation(5).unwrap();
        assert_eq!(normalizer.clean("nooo"), "nooooo");
        assert_eq!(normalizer.clean("noooooooo"), "nooooo");
    }

    #[test]
    fn test_zero_elongation_cap_rejected() {
        assert!(matches!(
            TextNormalizer::default().with_max_elongation(0),
            Err(ConfigError::InvalidOption { name: "normalizer.max_elongation", .. })
        ));

        let options = NormalizerOptions {
            max_elongation: 0,
            ..Default::default()
        };
        assert!(matches!(
            TextNormalizer::from_options(&options),
            Err(ConfigError::InvalidOption { name: "normalizer.max_elongation", .. })
        ));
    }

    #[test]
    fn test_custom_tables() {
        let contractions =
            SubstitutionTable::from_pairs("contractions", [("gonna", "going to")]).unwrap();
        let slang = SubstitutionTable::from_pairs("slang", [("gr8", "great")]).unwrap();
        let emoji = EmojiMap::default()
            .merge_toml("\"\u{1F680}\" = \"excited\"\n")
            .unwrap();
        let normalizer = TextNormalizer::default()
            .with_contractions(contractions)
            .with_slang(slang)
            .with_emoji(emoji);

        assert_eq!(normalizer.clean("gonna be gr8 \u{1F680}"), "going to be great excited");
        // built-in entries are gone once a table is replaced
        assert_eq!(normalizer.clean("u rock"), "u rock");
    }

    #[test]
    fn test_custom_negation() {
        let scope = NegationScope::with_words(["hardly"], 2);
        assert_eq!(scope.window(), 2);

        let normalizer = TextNormalizer::default().with_negation(scope);
        assert_eq!(normalizer.clean("hardly worth the money"), "hardly NOT_worth NOT_the money");
        assert_eq!(normalizer.clean("never good"), "never good");
    }

    #[test]
    fn test_tokenize_cleaned() {
        let normalizer = TextNormalizer::default();
        let cleaned = normalizer.clean("I don't like this!");
        let words: Vec<_> = normalizer.tokenize(&cleaned).map(|t| t.text).collect();
        assert_eq!(words, vec!["i", "do", "not", "NOT_like", "NOT_this", "!"]);
    }
}
