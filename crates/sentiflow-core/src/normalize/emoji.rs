//! Emoji → sentiment word mapping

use crate::config::{read_table_file, ConfigError};
use std::path::Path;

const EMOJI: &[(&str, &str)] = &[
    ("\u{1F60A}", "smiley"),        // 😊
    ("\u{1F600}", "smiley"),        // 😀
    ("\u{1F642}", "smiley"),        // 🙂
    ("\u{1F61E}", "sad"),           // 😞
    ("\u{1F622}", "sad"),           // 😢
    ("\u{1F610}", "neutral"),       // 😐
    ("\u{1F602}", "laugh"),         // 😂
    ("\u{1F621}", "angry"),         // 😡
    ("\u{1F620}", "angry"),         // 😠
    ("\u{1F44D}", "thumbs_up"),     // 👍
    ("\u{1F44E}", "thumbs_down"),   // 👎
    ("\u{2764}\u{FE0F}", "love"),   // ❤️
    ("\u{2764}", "love"),           // ❤ (no variation selector)
    ("\u{1F494}", "broken_heart"),  // 💔
];

/// Glyph → word table, applied longest glyph first
#[derive(Debug, Clone)]
pub struct EmojiMap {
    entries: Vec<(String, String)>,
}

impl Default for EmojiMap {
    fn default() -> Self {
        Self::from_entries(
            EMOJI
                .iter()
                .map(|(glyph, word)| (glyph.to_string(), word.to_string()))
                .collect(),
        )
    }
}

impl EmojiMap {
    fn from_entries(mut entries: Vec<(String, String)>) -> Self {
        // Longest glyph first so "❤️" wins over its bare "❤" prefix
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// Merge `glyph = "word"` pairs (top level or in sections) over this map
    pub fn merge_toml(self, contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::table("emoji", e.to_string()))?;

        let mut pairs = Vec::new();
        for (key, val) in &table {
            match val {
                toml::Value::Table(section) => {
                    for (glyph, word) in section {
                        pairs.push((glyph.clone(), emoji_word(glyph, word)?));
                    }
                }
                other => pairs.push((key.clone(), emoji_word(key, other)?)),
            }
        }

        let mut entries = self.entries;
        for (glyph, word) in pairs {
            if glyph.trim().is_empty() {
                return Err(ConfigError::table("emoji", "empty glyph"));
            }
            entries.retain(|(g, _)| *g != glyph);
            entries.push((glyph, word));
        }
        Ok(Self::from_entries(entries))
    }

    /// Merge entries from a TOML file over this map
    pub fn merge_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let contents = read_table_file(path.as_ref())?;
        let map = self.merge_toml(&contents)?;
        tracing::info!("Loaded {} emoji entries from {:?}", map.len(), path.as_ref());
        Ok(map)
    }

    /// Replace each known glyph with its word, padded with spaces
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (glyph, word) in &self.entries {
            if result.contains(glyph.as_str()) {
                result = result.replace(glyph.as_str(), &format!(" {} ", word));
            }
        }
        result
    }

    /// Get the number of glyphs mapped
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The replacement must survive the whitelist pass as a single token
fn emoji_word(glyph: &str, value: &toml::Value) -> Result<String, ConfigError> {
    let word = value
        .as_str()
        .ok_or_else(|| ConfigError::table("emoji", format!("value for '{}' is not a string", glyph)))?
        .to_lowercase();

    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::table(
            "emoji",
            format!("replacement '{}' for '{}' must be a single ASCII word", word, glyph),
        ));
    }
    Ok(word)
}
