//! Conversation-level sentiment and mood trend

use super::types::{ConversationSentiment, MoodTrend, SentimentLabel, SentimentScore, Trend};

/// First-to-last polarity change above this counts as a significant shift
pub const SHIFT_THRESHOLD: f64 = 0.3;

/// Combine ordered statement scores into an overall sentiment and mood trend
///
/// The overall value is the simple mean of statement polarities, thresholded
/// like a single statement. The trend compares only the first and last
/// statement; volatility is the population standard deviation.
pub fn aggregate(scores: &[SentimentScore]) -> (ConversationSentiment, MoodTrend) {
    match scores {
        [] => (ConversationSentiment::default(), MoodTrend::default()),
        [only] => (
            ConversationSentiment {
                label: only.label,
                confidence: only.confidence,
            },
            MoodTrend::default(),
        ),
        _ => {
            let polarities: Vec<f64> = scores.iter().map(SentimentScore::polarity).collect();
            (overall_sentiment(&polarities), mood_trend(&polarities))
        }
    }
}

fn overall_sentiment(polarities: &[f64]) -> ConversationSentiment {
    let mean = mean(polarities);
    ConversationSentiment {
        label: SentimentLabel::from_polarity(mean),
        confidence: mean.abs().min(1.0),
    }
}

fn mood_trend(polarities: &[f64]) -> MoodTrend {
    let (Some(first), Some(last)) = (polarities.first(), polarities.last()) else {
        return MoodTrend::default();
    };

    let trend = if last > first {
        Trend::Improving
    } else {
        Trend::Worsening
    };

    let mean = mean(polarities);
    let variance =
        polarities.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / polarities.len() as f64;

    MoodTrend {
        trend,
        significantly_shifted: (last - first).abs() > SHIFT_THRESHOLD,
        volatility: variance.sqrt(),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Score whose polarity is exactly `value`
    fn polar(value: f64) -> SentimentScore {
        let label = if value > 0.0 {
            SentimentLabel::Positive
        } else if value < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        SentimentScore::new(label, value.abs(), BTreeMap::new())
    }

    #[test]
    fn test_empty() {
        let (overall, mood) = aggregate(&[]);
        assert_eq!(overall.label, SentimentLabel::Neutral);
        assert_eq!(overall.confidence, 0.5);
        assert_eq!(mood.trend, Trend::Stable);
        assert!(!mood.significantly_shifted);
        assert_eq!(mood.volatility, 0.0);
    }

    #[test]
    fn test_single_statement() {
        let (overall, mood) = aggregate(&[polar(-0.8)]);
        assert_eq!(overall.label, SentimentLabel::Negative);
        assert_eq!(overall.confidence, 0.8);
        assert_eq!(mood, MoodTrend::default());
    }

    #[test]
    fn test_improving_and_shifted() {
        let (overall, mood) = aggregate(&[polar(0.0), polar(0.2), polar(0.5)]);
        assert_eq!(mood.trend, Trend::Improving);
        assert!(mood.significantly_shifted);
        assert_eq!(overall.label, SentimentLabel::Positive);
        assert!((overall.confidence - 0.7 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_ends_are_worsening() {
        let (_, mood) = aggregate(&[polar(0.4), polar(-0.9), polar(0.4)]);
        assert_eq!(mood.trend, Trend::Worsening);
        assert!(!mood.significantly_shifted);
    }

    #[test]
    fn test_worsening() {
        let (overall, mood) = aggregate(&[polar(0.6), polar(-0.8)]);
        assert_eq!(mood.trend, Trend::Worsening);
        assert!(mood.significantly_shifted);
        assert_eq!(overall.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_small_shift_not_significant() {
        let (_, mood) = aggregate(&[polar(0.1), polar(0.35)]);
        assert_eq!(mood.trend, Trend::Improving);
        assert!(!mood.significantly_shifted);
    }

    #[test]
    fn test_volatility_is_population_std_dev() {
        let (_, mood) = aggregate(&[polar(-1.0), polar(1.0), polar(-1.0), polar(1.0)]);
        assert!((mood.volatility - 1.0).abs() < 1e-9);

        let (_, flat) = aggregate(&[polar(0.3), polar(0.3)]);
        assert_eq!(flat.volatility, 0.0);
    }

    #[test]
    fn test_neutral_statements_count_as_zero() {
        let neutral = SentimentScore::new(SentimentLabel::Neutral, 0.9, BTreeMap::new());
        let (overall, _) = aggregate(&[neutral.clone(), neutral]);
        assert_eq!(overall.label, SentimentLabel::Neutral);
        assert_eq!(overall.confidence, 0.0);
    }
}
