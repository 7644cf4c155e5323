//! Model backend trait for pluggable statement classifiers

use anyhow::Result;
use std::collections::BTreeMap;

/// Class label → probability, as returned by a classifier
pub type ClassProbabilities = BTreeMap<String, f64>;

/// Trait for model-backed sentiment classifiers
/// Allows swapping the learned model without touching the scorer
pub trait SentimentBackend: Send + Sync {
    /// Classify cleaned text into class probabilities
    ///
    /// Class names are matched case-insensitively against "positive" and
    /// "negative"; any other classes are reported but not used for the label.
    fn classify(&self, text: &str) -> Result<ClassProbabilities>;

    /// Get the backend name for logging
    fn name(&self) -> &'static str;
}
