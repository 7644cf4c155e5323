//! Multinomial naive Bayes backend
//!
//! Trained on cleaned statements (negation-tagged tokens are features of their
//! own) and persisted as JSON so the CLI can train once and score many times.

use super::backend::{ClassProbabilities, SentimentBackend};
use crate::normalize::tokenize;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Naive Bayes classifier over cleaned-text word tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesBackend {
    /// Laplace smoothing
    alpha: f64,
    /// log P(class)
    class_log_priors: BTreeMap<String, f64>,
    /// log P(word | class); words never seen in training are ignored
    word_log_probs: BTreeMap<String, HashMap<String, f64>>,
}

impl NaiveBayesBackend {
    /// Train from `(label, cleaned text)` pairs
    pub fn fit<L, T>(examples: &[(L, T)], alpha: f64) -> Result<Self>
    where
        L: AsRef<str>,
        T: AsRef<str>,
    {
        if examples.is_empty() {
            anyhow::bail!("Cannot train naive Bayes model on an empty data set");
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            anyhow::bail!("Smoothing alpha must be a positive number, got {}", alpha);
        }

        let mut class_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut class_word_counts: BTreeMap<String, HashMap<String, usize>> = BTreeMap::new();
        let mut class_totals: BTreeMap<String, usize> = BTreeMap::new();
        let mut vocabulary: BTreeSet<String> = BTreeSet::new();

        for (label, text) in examples {
            let label = label.as_ref().trim().to_lowercase();
            if label.is_empty() {
                anyhow::bail!("Training example has an empty label");
            }
            *class_counts.entry(label.clone()).or_insert(0) += 1;

            let word_counts = class_word_counts.entry(label.clone()).or_default();
            let total = class_totals.entry(label).or_insert(0);
            for token in tokenize(text.as_ref()).filter(|t| t.is_word()) {
                vocabulary.insert(token.text.to_string());
                *word_counts.entry(token.text.to_string()).or_insert(0) += 1;
                *total += 1;
            }
        }

        let total_docs = examples.len() as f64;
        let vocab_size = vocabulary.len() as f64;

        let class_log_priors = class_counts
            .iter()
            .map(|(class, count)| (class.clone(), (*count as f64 / total_docs).ln()))
            .collect();

        let mut word_log_probs = BTreeMap::new();
        for (class, word_counts) in &class_word_counts {
            let total_words = class_totals.get(class).copied().unwrap_or(0) as f64;
            let denominator = total_words + alpha * vocab_size;
            let probs = vocabulary
                .iter()
                .map(|word| {
                    let count = word_counts.get(word).copied().unwrap_or(0) as f64;
                    (word.clone(), ((count + alpha) / denominator).ln())
                })
                .collect();
            word_log_probs.insert(class.clone(), probs);
        }

        tracing::info!(
            "Trained naive Bayes model: {} examples, {} classes, {} words",
            examples.len(),
            class_counts.len(),
            vocabulary.len()
        );

        Ok(Self {
            alpha,
            class_log_priors,
            word_log_probs,
        })
    }

    /// Load a model saved with [`save`](Self::save)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model from {:?}", path))?;
        let model: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse model from {:?}", path))?;

        if model.class_log_priors.is_empty() {
            anyhow::bail!("Model at {:?} has no classes", path);
        }
        if model.class_log_priors.values().any(|p| !p.is_finite() && *p != f64::NEG_INFINITY) {
            anyhow::bail!("Model at {:?} has invalid class priors", path);
        }

        tracing::info!("Loaded naive Bayes model from {:?}", path);
        Ok(model)
    }

    /// Save the model as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write model to {:?}", path))?;
        Ok(())
    }

    /// Class names known to the model
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_log_priors.keys().map(String::as_str)
    }

    /// Number of distinct words seen in training
    pub fn vocabulary_size(&self) -> usize {
        self.word_log_probs
            .values()
            .next()
            .map(HashMap::len)
            .unwrap_or(0)
    }

    /// Smoothing used during training
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SentimentBackend for NaiveBayesBackend {
    fn classify(&self, text: &str) -> Result<ClassProbabilities> {
        let words: Vec<&str> = tokenize(text)
            .filter(|t| t.is_word())
            .map(|t| t.text)
            .collect();

        let mut log_scores: BTreeMap<String, f64> = BTreeMap::new();
        for (class, prior) in &self.class_log_priors {
            let mut log_prob = *prior;
            if let Some(word_probs) = self.word_log_probs.get(class) {
                for word in &words {
                    if let Some(p) = word_probs.get(*word) {
                        log_prob += p;
                    }
                }
            }
            log_scores.insert(class.clone(), log_prob);
        }

        // Softmax in log space for numerical stability
        let max_score = log_scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max_score.is_finite() {
            anyhow::bail!("Model produced no finite class score");
        }
        let sum_exp: f64 = log_scores.values().map(|s| (s - max_score).exp()).sum();

        Ok(log_scores
            .into_iter()
            .map(|(class, s)| (class, (s - max_score).exp() / sum_exp))
            .collect())
    }

    fn name(&self) -> &'static str {
        "naive-bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_set() -> Vec<(&'static str, &'static str)> {
        vec![
            ("positive", "i love this it is great"),
            ("positive", "great service thanks"),
            ("positive", "amazing support very happy"),
            ("negative", "this is terrible"),
            ("negative", "awful service i hate it"),
            ("negative", "i do not NOT_like NOT_it"),
            ("neutral", "the package is on the table"),
        ]
    }

    #[test]
    fn test_fit_and_classify() {
        let model = NaiveBayesBackend::fit(&training_set(), 1.0).unwrap();
        let probs = model.classify("great support").unwrap();
        assert!(probs["positive"] > probs["negative"]);

        let probs = model.classify("terrible awful").unwrap();
        assert!(probs["negative"] > probs["positive"]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = NaiveBayesBackend::fit(&training_set(), 1.0).unwrap();
        let probs = model.classify("i love the table").unwrap();
        let total: f64 = probs.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(probs.len(), 3);
    }

    #[test]
    fn test_negation_tokens_are_features() {
        let model = NaiveBayesBackend::fit(&training_set(), 1.0).unwrap();
        let probs = model.classify("NOT_like").unwrap();
        assert!(probs["negative"] > probs["positive"]);
    }

    #[test]
    fn test_fit_rejects_empty_and_bad_alpha() {
        let empty: Vec<(&str, &str)> = vec![];
        assert!(NaiveBayesBackend::fit(&empty, 1.0).is_err());
        assert!(NaiveBayesBackend::fit(&training_set(), 0.0).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("nb.json");

        let model = NaiveBayesBackend::fit(&training_set(), 0.5).unwrap();
        model.save(&path).unwrap();

        let loaded = NaiveBayesBackend::load(&path).unwrap();
        assert_eq!(loaded.alpha(), 0.5);
        assert_eq!(loaded.classes().collect::<Vec<_>>(), vec!["negative", "neutral", "positive"]);
        assert_eq!(loaded.vocabulary_size(), model.vocabulary_size());

        let a = model.classify("great").unwrap();
        let b = loaded.classify("great").unwrap();
        assert!((a["positive"] - b["positive"]).abs() < 1e-12);
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nb.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(NaiveBayesBackend::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(NaiveBayesBackend::load("/no/such/model.json").is_err());
    }
}
