//! Valence lexicon
//!
//! Word → valence on a -4..+4 scale, plus booster/dampener words that nudge
//! the valence of a nearby sentiment word.

use crate::config::{read_table_file, ConfigError};
use std::collections::HashMap;
use std::path::Path;

/// Booster increment; dampeners use the negative
pub const BOOSTER_INCREMENT: f64 = 0.293;

const VALENCE: &[(&str, f64)] = &[
    // Positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("perfect", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("superb", 3.1),
    ("outstanding", 3.0),
    ("nice", 1.8),
    ("fine", 0.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("cool", 1.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("happy", 2.7),
    ("glad", 2.0),
    ("pleased", 1.9),
    ("satisfied", 1.8),
    ("delighted", 2.9),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("grateful", 2.0),
    ("appreciate", 1.7),
    ("helpful", 1.8),
    ("kind", 2.4),
    ("friendly", 2.2),
    ("fast", 0.9),
    ("quick", 0.9),
    ("easy", 1.9),
    ("smooth", 1.1),
    ("recommend", 1.5),
    ("impressed", 2.1),
    ("win", 2.8),
    ("yes", 1.7),
    ("fun", 2.3),
    ("smiley", 2.1),
    ("laugh", 2.6),
    ("thumbs_up", 1.9),
    ("resolved", 1.2),
    ("fixed", 1.0),
    ("works", 0.9),
    ("working", 0.6),
    // Negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("poor", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("dislike", -1.6),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("upset", -1.6),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappoint", -1.8),
    ("useless", -1.8),
    ("broken", -2.1),
    ("broken_heart", -2.6),
    ("thumbs_down", -1.9),
    ("rude", -2.0),
    ("slow", -1.0),
    ("late", -0.9),
    ("wrong", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("issue", -0.9),
    ("error", -1.7),
    ("bug", -1.3),
    ("crash", -1.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("missing", -1.2),
    ("lost", -1.3),
    ("refund", -0.6),
    ("scam", -2.8),
    ("waste", -1.8),
    ("ridiculous", -2.1),
    ("stupid", -2.4),
    ("confusing", -1.3),
    ("confused", -1.3),
    ("difficult", -1.5),
    ("hard", -0.4),
    ("sorry", -0.3),
    ("unacceptable", -2.0),
    ("complaint", -1.5),
    ("cancel", -0.9),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("soo", BOOSTER_INCREMENT),
    ("too", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("truly", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("most", BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("hardly", -BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("marginally", -BOOSTER_INCREMENT),
    ("partly", -BOOSTER_INCREMENT),
    ("little", -BOOSTER_INCREMENT),
];

/// Valence and booster tables
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    valence: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self {
            valence: VALENCE.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            boosters: BOOSTERS.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
        }
    }
}

impl ValenceLexicon {
    /// Get valence for a word
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valence.get(word).copied()
    }

    /// Get booster increment for a word
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Merge `[valence]` and `[boosters]` tables over this lexicon.
    ///
    /// Valences must be finite and within [-4, 4]; booster increments must be
    /// finite. Any other section or value type is rejected.
    pub fn merge_toml(mut self, contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::table("lexicon", e.to_string()))?;

        for (section, value) in &table {
            let entries = value.as_table().ok_or_else(|| {
                ConfigError::table("lexicon", format!("'{}' must be a table", section))
            })?;

            for (word, value) in entries {
                let word = word.trim().to_lowercase();
                if word.is_empty() {
                    return Err(ConfigError::table("lexicon", "empty word"));
                }
                let number = as_number(value).ok_or_else(|| {
                    ConfigError::table("lexicon", format!("value for '{}' is not a number", word))
                })?;

                match section.as_str() {
                    "valence" => {
                        if !number.is_finite() || !(-4.0..=4.0).contains(&number) {
                            return Err(ConfigError::ValenceOutOfRange { word, value: number });
                        }
                        self.valence.insert(word, number);
                    }
                    "boosters" => {
                        if !number.is_finite() {
                            return Err(ConfigError::table(
                                "lexicon",
                                format!("booster '{}' is not finite", word),
                            ));
                        }
                        self.boosters.insert(word, number);
                    }
                    other => {
                        return Err(ConfigError::table(
                            "lexicon",
                            format!("unknown section '{}'", other),
                        ))
                    }
                }
            }
        }

        Ok(self)
    }

    /// Merge entries from a TOML file over this lexicon
    pub fn merge_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let contents = read_table_file(path.as_ref())?;
        let lexicon = self.merge_toml(&contents)?;
        tracing::info!(
            "Loaded lexicon from {:?} ({} words, {} boosters)",
            path.as_ref(),
            lexicon.len(),
            lexicon.boosters.len()
        );
        Ok(lexicon)
    }

    /// Number of valence entries
    pub fn len(&self) -> usize {
        self.valence.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }
}

fn as_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let lexicon = ValenceLexicon::default();
        assert!(lexicon.valence("great").unwrap() > 0.0);
        assert!(lexicon.valence("terrible").unwrap() < 0.0);
        assert_eq!(lexicon.valence("table"), None);
        assert_eq!(lexicon.booster("very"), Some(BOOSTER_INCREMENT));
        assert_eq!(lexicon.booster("slightly"), Some(-BOOSTER_INCREMENT));
    }

    #[test]
    fn test_builtin_values_in_range() {
        let lexicon = ValenceLexicon::default();
        assert!(lexicon.valence.values().all(|v| (-4.0..=4.0).contains(v)));
    }

    #[test]
    fn test_emoji_words_scored() {
        let lexicon = ValenceLexicon::default();
        for word in ["smiley", "laugh", "thumbs_up"] {
            assert!(lexicon.valence(word).unwrap() > 0.0, "{}", word);
        }
        for word in ["sad", "angry", "thumbs_down", "broken_heart"] {
            assert!(lexicon.valence(word).unwrap() < 0.0, "{}", word);
        }
    }

    #[test]
    fn test_merge_toml() {
        let lexicon = ValenceLexicon::default()
            .merge_toml("[valence]\nstellar = 3\ngood = 2.2\n\n[boosters]\nmega = 0.293\n")
            .unwrap();
        assert_eq!(lexicon.valence("stellar"), Some(3.0));
        assert_eq!(lexicon.valence("good"), Some(2.2));
        assert_eq!(lexicon.booster("mega"), Some(0.293));
    }

    #[test]
    fn test_merge_rejects_out_of_range() {
        let err = ValenceLexicon::default().merge_toml("[valence]\nepic = 9.5\n");
        assert!(matches!(err, Err(ConfigError::ValenceOutOfRange { .. })));
    }

    #[test]
    fn test_merge_rejects_non_number() {
        let err = ValenceLexicon::default().merge_toml("[valence]\nepic = \"high\"\n");
        assert!(matches!(err, Err(ConfigError::MalformedTable { .. })));
    }

    #[test]
    fn test_merge_rejects_unknown_section() {
        let err = ValenceLexicon::default().merge_toml("[idioms]\nkiss_of_death = -1.5\n");
        assert!(err.is_err());
    }
}
