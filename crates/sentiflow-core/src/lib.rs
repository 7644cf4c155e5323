//! SentiFlow Core - Conversational sentiment pipeline
//!
//! This library provides the core functionality for:
//! - Text normalization of noisy chat input (markup, emoji, slang, negation)
//! - Statement sentiment scoring with a valence lexicon or a trained model
//! - Conversation-level sentiment and mood-trend aggregation

pub mod config;
pub mod normalize;
pub mod sentiment;
pub mod store;

mod pipeline;

pub use config::{Config, ConfigError, JournalOptions, NormalizerOptions, ScorerBackend, ScorerOptions};
pub use normalize::{TextNormalizer, Token, TokenKind, Tokens};
pub use pipeline::{ConversationAnalyzer, ConversationReport, Pipeline, Timings, TurnResult};
pub use sentiment::{
    ConversationSentiment, MoodTrend, SentimentLabel, SentimentScore, StatementScorer, Trend,
};
pub use store::{ConversationStore, MemoryStore, UserTurn};

/// Clean raw text with the default normalizer
pub fn clean(text: &str) -> String {
    TextNormalizer::default().clean(text)
}

/// Clean and score one statement with the default lexicon scorer
pub fn score_statement(text: &str) -> SentimentScore {
    let cleaned = clean(text);
    StatementScorer::default().score_statement(&cleaned)
}

/// Aggregate ordered statement scores into an overall sentiment and mood trend
pub fn aggregate(scores: &[SentimentScore]) -> (ConversationSentiment, MoodTrend) {
    sentiment::aggregate(scores)
}
