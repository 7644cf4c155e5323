//! Rule-based statement scorer
//!
//! Valence-aware scoring in the style of VADER, tuned for text that has
//! already been through [`TextNormalizer`](crate::normalize::TextNormalizer):
//!
//! - Negation is *not* looked up here. Each `NOT_` prefix the normalizer left
//!   on a word flips its valence with a damping factor, so a negated word
//!   never gets flipped twice.
//! - Boosters ("very", "slightly") within three words shift the valence.
//! - A contrastive "but" halves what comes before it and boosts what follows.
//! - `!` and repeated `?` amplify the overall direction.

use super::lexicon::ValenceLexicon;
use super::types::{clamp_unit, SentimentLabel, SentimentScore};
use crate::normalize::{strip_negation, tokenize};
use std::collections::BTreeMap;

/// Valence multiplier applied per `NOT_` prefix
pub const NEGATION_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Booster damping by distance (1, 2, 3 words back)
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_AMPLIFIER: f64 = 0.96;

/// Unthresholded lexicon output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityBreakdown {
    /// Normalized sum of valences, in [-1, 1]
    pub compound: f64,
    /// Share of positive mass
    pub pos: f64,
    /// Share of negative mass
    pub neg: f64,
    /// Share of neutral words
    pub neu: f64,
}

impl PolarityBreakdown {
    fn into_raw_scores(self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("compound".to_string(), self.compound),
            ("pos".to_string(), self.pos),
            ("neg".to_string(), self.neg),
            ("neu".to_string(), self.neu),
        ])
    }
}

/// Lexicon/rule statement scorer
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: ValenceLexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: ValenceLexicon) -> Self {
        Self { lexicon }
    }

    /// Score cleaned text. Empty text is neutral with confidence 0.5.
    pub fn score(&self, cleaned: &str) -> SentimentScore {
        if cleaned.trim().is_empty() {
            return SentimentScore::neutral_default();
        }

        let breakdown = self.polarity_scores(cleaned);
        let label = SentimentLabel::from_polarity(breakdown.compound);
        let confidence = match label {
            SentimentLabel::Positive => breakdown.pos,
            SentimentLabel::Negative => breakdown.neg,
            SentimentLabel::Neutral => breakdown.neu,
        };

        SentimentScore::new(label, confidence, breakdown.into_raw_scores())
    }

    /// Compute compound and pos/neg/neu shares for cleaned text
    pub fn polarity_scores(&self, cleaned: &str) -> PolarityBreakdown {
        let words: Vec<&str> = tokenize(cleaned)
            .filter(|t| t.is_word())
            .map(|t| t.text)
            .collect();
        if words.is_empty() {
            return PolarityBreakdown::default();
        }

        let mut sentiments: Vec<f64> = words
            .iter()
            .enumerate()
            .map(|(i, _)| self.word_valence(&words, i))
            .collect();

        apply_but_rule(&words, &mut sentiments);

        let amplifier = punctuation_emphasis(cleaned);
        let sum: f64 = sentiments.iter().sum();
        let compound = if sum == 0.0 {
            0.0
        } else {
            normalize(sum + amplifier.copysign(sum))
        };

        let (pos, neg, neu) = sift_masses(&sentiments, amplifier);

        PolarityBreakdown {
            compound,
            pos,
            neg,
            neu,
        }
    }

    /// Valence of the word at `index`, after boosters and negation prefixes
    fn word_valence(&self, words: &[&str], index: usize) -> f64 {
        let (base, negations) = strip_negation(words[index]);

        // Boosters carry no valence of their own
        if self.lexicon.booster(base).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(base) else {
            return 0.0;
        };

        for (distance, damping) in BOOSTER_DAMPING.iter().enumerate() {
            let Some(prev) = index.checked_sub(distance + 1) else {
                break;
            };
            let (prev_base, _) = strip_negation(words[prev]);
            if let Some(increment) = self.lexicon.booster(prev_base) {
                let scalar = if valence < 0.0 { -increment } else { increment };
                valence += scalar * damping;
            }
        }

        for _ in 0..negations {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

/// "but" halves earlier valences and boosts later ones by half
fn apply_but_rule(words: &[&str], sentiments: &mut [f64]) {
    let Some(pivot) = words.iter().position(|w| strip_negation(w).0 == "but") else {
        return;
    };

    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= 0.5;
        } else if i > pivot {
            *sentiment *= 1.5;
        }
    }
}

/// Amplifier from exclamation and question marks
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let exclamation_amplifier = exclamations as f64 * EXCLAMATION_INCREMENT;

    let questions = text.matches('?').count();
    let question_amplifier = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => MAX_QUESTION_AMPLIFIER,
    };

    exclamation_amplifier + question_amplifier
}

/// Map an unbounded valence sum into (-1, 1)
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Split valences into positive/negative/neutral shares
fn sift_masses(sentiments: &[f64], amplifier: f64) -> (f64, f64, f64) {
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;

    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += amplifier;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= amplifier;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    (
        clamp_unit((pos_sum / total).abs()),
        clamp_unit((neg_sum / total).abs()),
        clamp_unit((neu_count / total).abs()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::default()
    }

    #[test]
    fn test_empty_is_neutral_default() {
        let score = scorer().score("");
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.confidence, 0.5);
        assert!(score.raw_scores.is_empty());
    }

    #[test]
    fn test_positive_statement() {
        let score = scorer().score("i love this product, it is great!");
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!(score.confidence > 0.0 && score.confidence <= 1.0);
        assert!(score.raw_scores["compound"] >= 0.05);
    }

    #[test]
    fn test_negative_statement() {
        let score = scorer().score("this is terrible and awful");
        assert_eq!(score.label, SentimentLabel::Negative);
        assert!(score.raw_scores["compound"] <= -0.05);
    }

    #[test]
    fn test_neutral_statement() {
        let score = scorer().score("the package is on the table");
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert_eq!(score.confidence, 1.0);
        assert_eq!(score.raw_scores["compound"], 0.0);
    }

    #[test]
    fn test_negation_prefix_flips() {
        let plain = scorer().polarity_scores("i like this");
        let negated = scorer().polarity_scores("i do not NOT_like NOT_this");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn test_negated_negative_turns_positive() {
        let score = scorer().score("the food was not NOT_bad");
        assert_eq!(score.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_stacked_prefixes_flip_back() {
        let once = scorer().polarity_scores("NOT_good");
        let twice = scorer().polarity_scores("NOT_NOT_good");
        assert!(once.compound < 0.0);
        assert!(twice.compound > 0.0);
    }

    #[test]
    fn test_booster_increases_intensity() {
        let plain = scorer().polarity_scores("it is good");
        let boosted = scorer().polarity_scores("it is very good");
        assert!(boosted.compound > plain.compound);

        let damped = scorer().polarity_scores("it is slightly good");
        assert!(damped.compound < plain.compound);
    }

    #[test]
    fn test_booster_increases_negative_intensity() {
        let plain = scorer().polarity_scores("it is bad");
        let boosted = scorer().polarity_scores("it is really bad");
        assert!(boosted.compound < plain.compound);
    }

    #[test]
    fn test_exclamation_amplifies() {
        let plain = scorer().polarity_scores("great");
        let excited = scorer().polarity_scores("great !");
        assert!(excited.compound > plain.compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let score = scorer().score("the staff were nice but the food was awful");
        assert_eq!(score.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_masses_sum_to_one() {
        let b = scorer().polarity_scores("good food but slow service");
        assert!((b.pos + b.neg + b.neu - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_punctuation_only() {
        let score = scorer().score("!");
        assert_eq!(score.label, SentimentLabel::Neutral);
        assert!((0.0..=1.0).contains(&score.confidence));
    }

    #[test]
    fn test_compound_bounded() {
        let text = "great ".repeat(200) + "!";
        let b = scorer().polarity_scores(&text);
        assert!(b.compound <= 1.0 && b.compound > 0.9);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = ValenceLexicon::default()
            .merge_toml("[valence]\nmeh = -1.2\n")
            .unwrap();
        let score = LexiconScorer::new(lexicon).score("meh");
        assert_eq!(score.label, SentimentLabel::Negative);
    }
}
