//! Score records shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Compound/mean values at or beyond ±this are polar
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// Sentiment direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Threshold a signed value with the shared ±0.05 cutoffs
    pub fn from_polarity(value: f64) -> Self {
        if value >= POLARITY_THRESHOLD {
            Self::Positive
        } else if value <= -POLARITY_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Always within [0, 1]
    pub confidence: f64,
    /// Named components behind the label (compound, pos, neg, neu, ...)
    pub raw_scores: BTreeMap<String, f64>,
}

impl SentimentScore {
    /// Build a score, clamping confidence into [0, 1]
    pub fn new(label: SentimentLabel, confidence: f64, raw_scores: BTreeMap<String, f64>) -> Self {
        Self {
            label,
            confidence: clamp_unit(confidence),
            raw_scores,
        }
    }

    /// Score used for empty input: neutral, 0.5, no components
    pub fn neutral_default() -> Self {
        Self::new(SentimentLabel::Neutral, 0.5, BTreeMap::new())
    }

    /// Signed polarity in [-1, 1]: +confidence, -confidence or 0
    pub fn polarity(&self) -> f64 {
        match self.label {
            SentimentLabel::Positive => self.confidence,
            SentimentLabel::Negative => -self.confidence,
            SentimentLabel::Neutral => 0.0,
        }
        .clamp(-1.0, 1.0)
    }
}

/// Overall sentiment of a finished conversation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversationSentiment {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl Default for ConversationSentiment {
    fn default() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.5,
        }
    }
}

/// Direction of mood between the first and last statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Worsening => "worsening",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood-shift verdict over a conversation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoodTrend {
    pub trend: Trend,
    pub significantly_shifted: bool,
    /// Population standard deviation of the polarity sequence
    pub volatility: f64,
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: SentimentLabel, confidence: f64) -> SentimentScore {
        SentimentScore::new(label, confidence, BTreeMap::new())
    }

    #[test]
    fn test_polarity_mapping() {
        assert_eq!(score(SentimentLabel::Positive, 0.7).polarity(), 0.7);
        assert_eq!(score(SentimentLabel::Negative, 0.4).polarity(), -0.4);
        assert_eq!(score(SentimentLabel::Neutral, 0.9).polarity(), 0.0);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(score(SentimentLabel::Positive, 1.7).confidence, 1.0);
        assert_eq!(score(SentimentLabel::Negative, -0.2).confidence, 0.0);
        assert_eq!(score(SentimentLabel::Neutral, f64::NAN).confidence, 0.0);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(SentimentLabel::from_polarity(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.05), SentimentLabel::Negative);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(score(SentimentLabel::Positive, 0.5)).unwrap();
        assert_eq!(json["label"], "positive");
        assert_eq!(json["confidence"], 0.5);
        assert!(json["raw_scores"].is_object());

        let mood = serde_json::to_value(MoodTrend::default()).unwrap();
        assert_eq!(mood["trend"], "stable");
        assert_eq!(mood["significantly_shifted"], false);
    }
}
