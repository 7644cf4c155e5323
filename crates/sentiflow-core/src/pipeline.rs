//! Conversation pipeline: Normalizer → Scorer → Aggregator

use crate::config::{Config, ConfigError, ScorerBackend};
use crate::normalize::TextNormalizer;
use crate::sentiment::{self, ConversationSentiment, MoodTrend, SentimentScore, StatementScorer};
use crate::store::{ConversationStore, MemoryStore, UserTurn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Processing time breakdown for one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub normalize_us: u64,
    pub score_us: u64,
    pub total_us: u64,
}

/// Result of processing one user turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub raw: String,
    pub cleaned: String,
    pub sentiment: SentimentScore,
    /// False when the turn cleaned to nothing and was not stored
    pub recorded: bool,
    pub timings: Timings,
}

/// Summary of a finished conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReport {
    pub conversation_id: String,
    pub turn_count: usize,
    /// Per-statement scores in turn order
    pub statements: Vec<SentimentScore>,
    pub overall: ConversationSentiment,
    pub mood: MoodTrend,
}

/// Turn-by-turn conversation analysis
pub trait ConversationAnalyzer {
    /// Clean, score and record one user statement
    fn process_turn(&mut self, conversation_id: &str, raw: &str) -> TurnResult;

    /// Aggregate and close a conversation
    fn end_conversation(&mut self, conversation_id: &str) -> ConversationReport;
}

/// The main SentiFlow pipeline
pub struct Pipeline<S: ConversationStore = MemoryStore> {
    normalizer: TextNormalizer,
    scorer: StatementScorer,
    store: S,
}

impl Pipeline<MemoryStore> {
    /// Create a pipeline with the given configuration and an in-memory store
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        tracing::info!("Initializing SentiFlow pipeline");
        tracing::info!("  Scorer backend: {}", config.scorer.backend.display_name());

        config.validate()?;
        let normalizer = TextNormalizer::from_options(&config.normalizer)?;

        let model_path = match config.scorer.backend {
            ScorerBackend::NaiveBayes => match config.model_path() {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Could not resolve model path: {:#}", e);
                    None
                }
            },
            ScorerBackend::Lexicon => None,
        };
        let scorer = StatementScorer::from_options(&config.scorer, model_path.as_deref())?;
        tracing::info!("  Active scorer: {}", scorer.name());

        Ok(Self::with_components(normalizer, scorer, MemoryStore::new()))
    }
}

impl Default for Pipeline<MemoryStore> {
    fn default() -> Self {
        Self::with_components(
            TextNormalizer::default(),
            StatementScorer::default(),
            MemoryStore::new(),
        )
    }
}

impl<S: ConversationStore> Pipeline<S> {
    /// Assemble a pipeline from prebuilt parts
    pub fn with_components(normalizer: TextNormalizer, scorer: StatementScorer, store: S) -> Self {
        Self {
            normalizer,
            scorer,
            store,
        }
    }

    /// Normalize raw text
    pub fn clean(&self, raw: &str) -> String {
        self.normalizer.clean(raw)
    }

    /// Score already-cleaned text
    pub fn score_statement(&self, cleaned: &str) -> SentimentScore {
        self.scorer.score_statement(cleaned)
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn scorer(&self) -> &StatementScorer {
        &self.scorer
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConversationStore> ConversationAnalyzer for Pipeline<S> {
    fn process_turn(&mut self, conversation_id: &str, raw: &str) -> TurnResult {
        let start = Instant::now();

        let t1 = Instant::now();
        let cleaned = self.normalizer.clean(raw);
        let normalize_us = t1.elapsed().as_micros() as u64;
        tracing::debug!("Normalized in {}us: {:?}", normalize_us, cleaned);

        let t2 = Instant::now();
        let sentiment = self.scorer.score_statement(&cleaned);
        let score_us = t2.elapsed().as_micros() as u64;
        tracing::debug!(
            "Scored in {}us: {} ({:.3})",
            score_us,
            sentiment.label,
            sentiment.confidence
        );

        let recorded = !cleaned.is_empty();
        if recorded {
            self.store.append_user_turn(
                conversation_id,
                UserTurn {
                    raw: raw.to_string(),
                    cleaned: cleaned.clone(),
                    sentiment: sentiment.clone(),
                },
            );
        } else {
            tracing::debug!("Turn cleaned to nothing, not recorded");
        }

        TurnResult {
            raw: raw.to_string(),
            cleaned,
            sentiment,
            recorded,
            timings: Timings {
                normalize_us,
                score_us,
                total_us: start.elapsed().as_micros() as u64,
            },
        }
    }

    fn end_conversation(&mut self, conversation_id: &str) -> ConversationReport {
        let statements: Vec<SentimentScore> = self
            .store
            .user_turns(conversation_id)
            .iter()
            .map(|turn| self.scorer.score_statement(&turn.cleaned))
            .collect();

        let (overall, mood) = sentiment::aggregate(&statements);
        self.store.close(conversation_id);

        tracing::info!(
            "Conversation {} ended: {} turns, {} ({:.2}), {}",
            conversation_id,
            statements.len(),
            overall.label,
            overall.confidence,
            mood.trend
        );

        ConversationReport {
            conversation_id: conversation_id.to_string(),
            turn_count: statements.len(),
            statements,
            overall,
            mood,
        }
    }
}
