//! Statement sentiment scoring and conversation aggregation
//!
//! A cleaned statement is scored by a [`StatementScorer`]: either the
//! rule-based [`LexiconScorer`] or a [`ModelBackedScorer`] wrapping a
//! [`SentimentBackend`] (the shipped one is [`NaiveBayesBackend`]). The
//! model-backed variant never fails; it degrades to the lexicon.
//!
//! [`aggregate`] folds the per-statement scores of one conversation into an
//! overall [`ConversationSentiment`] and a [`MoodTrend`].

mod aggregate;
mod backend;
mod lexicon;
mod lexicon_scorer;
mod naive_bayes;
mod scorer;
mod types;

pub use aggregate::{aggregate, SHIFT_THRESHOLD};
pub use backend::{ClassProbabilities, SentimentBackend};
pub use lexicon::{ValenceLexicon, BOOSTER_INCREMENT};
pub use lexicon_scorer::{LexiconScorer, PolarityBreakdown, NEGATION_SCALAR};
pub use naive_bayes::NaiveBayesBackend;
pub use scorer::{ModelBackedScorer, StatementScorer};
pub use types::{
    ConversationSentiment, MoodTrend, SentimentLabel, SentimentScore, Trend, POLARITY_THRESHOLD,
};
