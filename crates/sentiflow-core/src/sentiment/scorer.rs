//! Statement scorer selection and the model-backed variant

use super::backend::{ClassProbabilities, SentimentBackend};
use super::lexicon::ValenceLexicon;
use super::lexicon_scorer::LexiconScorer;
use super::naive_bayes::NaiveBayesBackend;
use super::types::{SentimentLabel, SentimentScore};
use crate::config::{ConfigError, ScorerBackend, ScorerOptions};
use std::path::Path;

/// Scorer that defers to a learned model and falls back to the lexicon
pub struct ModelBackedScorer {
    /// None once the model failed to load
    backend: Option<Box<dyn SentimentBackend>>,
    fallback: LexiconScorer,
}

impl ModelBackedScorer {
    /// Wrap a loaded backend
    pub fn new(backend: Box<dyn SentimentBackend>, fallback: LexiconScorer) -> Self {
        Self {
            backend: Some(backend),
            fallback,
        }
    }

    /// Build from the result of loading a backend; a load failure leaves the
    /// scorer degraded (lexicon only) instead of failing construction
    pub fn from_load_result(
        loaded: anyhow::Result<Box<dyn SentimentBackend>>,
        fallback: LexiconScorer,
    ) -> Self {
        match loaded {
            Ok(backend) => {
                tracing::info!("Using {} sentiment model", backend.name());
                Self::new(backend, fallback)
            }
            Err(e) => {
                tracing::warn!("Sentiment model unavailable, using lexicon scorer: {:#}", e);
                Self {
                    backend: None,
                    fallback,
                }
            }
        }
    }

    /// Load a naive Bayes model from disk
    pub fn naive_bayes<P: AsRef<Path>>(model_path: P, fallback: LexiconScorer) -> Self {
        let loaded = NaiveBayesBackend::load(model_path)
            .map(|model| Box::new(model) as Box<dyn SentimentBackend>);
        Self::from_load_result(loaded, fallback)
    }

    /// True when no model is loaded and every statement goes to the lexicon
    pub fn is_degraded(&self) -> bool {
        self.backend.is_none()
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map(|b| b.name()).unwrap_or("lexicon")
    }

    pub fn score(&self, cleaned: &str) -> SentimentScore {
        if cleaned.trim().is_empty() {
            return SentimentScore::neutral_default();
        }

        let Some(backend) = &self.backend else {
            return self.fallback.score(cleaned);
        };

        match backend.classify(cleaned) {
            Ok(probabilities) => score_from_probabilities(probabilities),
            Err(e) => {
                tracing::warn!("{} classification failed, using lexicon scorer: {:#}", backend.name(), e);
                self.fallback.score(cleaned)
            }
        }
    }
}

impl std::fmt::Debug for ModelBackedScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBackedScorer")
            .field("backend", &self.backend_name())
            .field("degraded", &self.is_degraded())
            .finish()
    }
}

/// Map class probabilities onto a label: the larger of positive/negative
/// wins, a tie is neutral
fn score_from_probabilities(probabilities: ClassProbabilities) -> SentimentScore {
    let lookup = |name: &str| {
        probabilities
            .iter()
            .find(|(class, _)| class.eq_ignore_ascii_case(name))
            .map(|(_, p)| *p)
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    };
    let positive = lookup("positive");
    let negative = lookup("negative");

    let (label, confidence) = if positive > negative {
        (SentimentLabel::Positive, positive)
    } else if negative > positive {
        (SentimentLabel::Negative, negative)
    } else {
        (SentimentLabel::Neutral, 0.5)
    };

    SentimentScore::new(label, confidence, probabilities)
}

/// Statement scorer chosen from [`ScorerOptions`]
#[derive(Debug)]
pub enum StatementScorer {
    Lexicon(LexiconScorer),
    ModelBacked(ModelBackedScorer),
}

impl Default for StatementScorer {
    fn default() -> Self {
        Self::Lexicon(LexiconScorer::default())
    }
}

impl StatementScorer {
    /// Build the configured scorer. Lexicon errors are fatal; a missing or
    /// unreadable model only degrades the model-backed scorer.
    pub fn from_options(
        options: &ScorerOptions,
        model_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let lexicon = match &options.lexicon_file {
            Some(path) => ValenceLexicon::default().merge_file(path)?,
            None => ValenceLexicon::default(),
        };
        let lexicon_scorer = LexiconScorer::new(lexicon);

        match options.backend {
            ScorerBackend::Lexicon => {
                tracing::info!("Using lexicon sentiment scorer");
                Ok(Self::Lexicon(lexicon_scorer))
            }
            ScorerBackend::NaiveBayes => {
                let scorer = match model_path {
                    Some(path) => {
                        tracing::info!("Loading naive Bayes model from {:?}", path);
                        ModelBackedScorer::naive_bayes(path, lexicon_scorer)
                    }
                    None => ModelBackedScorer::from_load_result(
                        Err(anyhow::anyhow!("no model path could be determined")),
                        lexicon_scorer,
                    ),
                };
                Ok(Self::ModelBacked(scorer))
            }
        }
    }

    /// Score a cleaned statement. Never fails.
    pub fn score_statement(&self, cleaned: &str) -> SentimentScore {
        match self {
            Self::Lexicon(scorer) => scorer.score(cleaned),
            Self::ModelBacked(scorer) => scorer.score(cleaned),
        }
    }

    /// Name of the scorer actually in use
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lexicon(_) => "lexicon",
            Self::ModelBacked(scorer) => scorer.backend_name(),
        }
    }
}
