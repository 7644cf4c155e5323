//! Whole-word substitution tables
//!
//! Contractions and slang share one strategy: every key matches as a whole
//! word, longest key first, in a single left-to-right pass. Tables can be
//! extended from a TOML file whose string entries override the built-ins.

use crate::config::{read_table_file, ConfigError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "is not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("isn't", "is not"),
    ("shouldn't", "should not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("she's", "she is"),
    ("he's", "he is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("they're", "they are"),
    ("they'll", "they will"),
    ("we're", "we are"),
    ("we'll", "we will"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("you'll", "you will"),
    ("could've", "could have"),
    ("should've", "should have"),
    ("would've", "would have"),
];

const SLANG: &[(&str, &str)] = &[
    ("u", "you"),
    ("ur", "your"),
    ("pls", "please"),
    ("plz", "please"),
    ("thx", "thanks"),
    ("ty", "thanks"),
    ("idk", "i do not know"),
    ("imo", "in my opinion"),
    ("btw", "by the way"),
    ("tbh", "to be honest"),
    ("omg", "oh my god"),
    ("gr8", "great"),
    ("luv", "love"),
    ("np", "no problem"),
    ("cuz", "because"),
    ("wanna", "want to"),
    ("gonna", "going to"),
];

static BUILTIN_CONTRACTIONS: Lazy<SubstitutionTable> = Lazy::new(|| {
    SubstitutionTable::from_pairs("contractions", CONTRACTIONS.iter().copied())
        .expect("built-in contraction table is valid")
});

static BUILTIN_SLANG: Lazy<SubstitutionTable> = Lazy::new(|| {
    SubstitutionTable::from_pairs("slang", SLANG.iter().copied())
        .expect("built-in slang table is valid")
});

/// A whole-word, longest-match-first substitution table
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    name: &'static str,
    entries: HashMap<String, String>,
    /// Alternation of all keys, longest first; `None` when empty
    pattern: Option<Regex>,
}

impl SubstitutionTable {
    /// Built-in contraction expansions ("can't" → "cannot", ...)
    pub fn contractions() -> Self {
        BUILTIN_CONTRACTIONS.clone()
    }

    /// Built-in slang/abbreviation expansions ("thx" → "thanks", ...)
    pub fn slang() -> Self {
        BUILTIN_SLANG.clone()
    }

    /// Build a table from key/replacement pairs.
    ///
    /// Keys are lowercased. A key must begin and end with a word character,
    /// otherwise it could never match on word boundaries.
    pub fn from_pairs<K, V>(
        name: &'static str,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (key, value) in pairs {
            let key = validate_key(name, key.as_ref())?;
            entries.insert(key, value.as_ref().to_string());
        }
        Self::compile(name, entries)
    }

    /// Merge entries from TOML text over this table.
    ///
    /// Accepts top-level `key = "value"` pairs as well as any number of
    /// sections holding them; every value must be a string.
    pub fn merge_toml(self, contents: &str) -> Result<Self, ConfigError> {
        let name = self.name;
        let value: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::table(name, e.to_string()))?;

        let mut entries = self.entries;
        for (key, val) in &value {
            match val {
                toml::Value::String(replacement) => {
                    entries.insert(validate_key(name, key)?, replacement.clone());
                }
                toml::Value::Table(section) => {
                    for (key, val) in section {
                        let replacement = val.as_str().ok_or_else(|| {
                            ConfigError::table(name, format!("value for '{}' is not a string", key))
                        })?;
                        entries.insert(validate_key(name, key)?, replacement.to_string());
                    }
                }
                _ => {
                    return Err(ConfigError::table(
                        name,
                        format!("value for '{}' is not a string", key),
                    ))
                }
            }
        }

        Self::compile(name, entries)
    }

    /// Merge entries from a TOML file over this table
    pub fn merge_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let contents = read_table_file(path.as_ref())?;
        let table = self.merge_toml(&contents)?;
        tracing::info!(
            "Loaded {} {} entries from {:?}",
            table.len(),
            table.name,
            path.as_ref()
        );
        Ok(table)
    }

    fn compile(name: &'static str, entries: HashMap<String, String>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Ok(Self {
                name,
                entries,
                pattern: None,
            });
        }

        // Sort by length (longest first) so the alternation prefers the
        // longer key at any given position
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation))
            .map_err(|e| ConfigError::table(name, e.to_string()))?;

        Ok(Self {
            name,
            entries,
            pattern: Some(pattern),
        })
    }

    /// Apply all substitutions to the given (lowercased) text
    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                self.entries
                    .get(&caps[0])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Look up the replacement for a single key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get the number of entries loaded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_key(table: &str, key: &str) -> Result<String, ConfigError> {
    let key = key.trim().to_lowercase();
    let is_word = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric() || c == '_');

    if key.is_empty() {
        return Err(ConfigError::table(table, "empty key"));
    }
    if !is_word(key.chars().next()) || !is_word(key.chars().last()) {
        return Err(ConfigError::table(
            table,
            format!("key '{}' must start and end with a letter or digit", key),
        ));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contractions() {
        let table = SubstitutionTable::contractions();
        assert!(!table.is_empty());
        assert_eq!(table.apply("i don't know"), "i do not know");
        assert_eq!(table.apply("you can't and won't"), "you cannot and will not");
    }

    #[test]
    fn test_whole_word_only() {
        let table = SubstitutionTable::slang();
        // "u" must not fire inside "but" or "sure"
        assert_eq!(table.apply("but sure u can"), "but sure you can");
        assert_eq!(table.apply("thx ty"), "thanks thanks");
    }

    #[test]
    fn test_longest_match_first() {
        let table = SubstitutionTable::from_pairs(
            "test",
            [("can", "CAN"), ("can not", "cannot")],
        )
        .unwrap();
        assert_eq!(table.apply("i can not go"), "i cannot go");
        assert_eq!(table.apply("i can go"), "i CAN go");
    }

    #[test]
    fn test_merge_toml_overrides_and_extends() {
        let table = SubstitutionTable::slang()
            .merge_toml("[extra]\nbrb = \"be right back\"\nthx = \"thank you\"\n")
            .unwrap();
        assert_eq!(table.apply("thx brb"), "thank you be right back");
        assert_eq!(table.get("pls"), Some("please"));
    }

    #[test]
    fn test_merge_toml_top_level_pairs() {
        let table = SubstitutionTable::contractions()
            .merge_toml("\"y'all\" = \"you all\"\n")
            .unwrap();
        assert_eq!(table.apply("y'all rock"), "you all rock");
    }

    #[test]
    fn test_merge_rejects_non_string() {
        let err = SubstitutionTable::slang().merge_toml("[extra]\nbrb = 3\n");
        assert!(matches!(err, Err(ConfigError::MalformedTable { .. })));
    }

    #[test]
    fn test_merge_rejects_bad_toml() {
        let err = SubstitutionTable::slang().merge_toml("this is = = not toml");
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_non_word_key() {
        let err = SubstitutionTable::from_pairs("test", [(":)", "smile")]);
        assert!(matches!(err, Err(ConfigError::MalformedTable { .. })));

        let err = SubstitutionTable::from_pairs("test", [("  ", "blank")]);
        assert!(err.is_err());
    }

    #[test]
    fn test_merge_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.toml");
        std::fs::write(&path, "[slang]\nsmh = \"shaking my head\"\n").unwrap();

        let table = SubstitutionTable::slang().merge_file(&path).unwrap();
        assert_eq!(table.apply("smh"), "shaking my head");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SubstitutionTable::slang().merge_file("/definitely/not/here.toml");
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_empty_table_passthrough() {
        let table = SubstitutionTable::from_pairs::<&str, &str>("test", []).unwrap();
        assert_eq!(table.apply("nothing changes"), "nothing changes");
    }
}
