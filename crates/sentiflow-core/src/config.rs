//! Configuration management for SentiFlow

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Construction-time configuration failure.
///
/// Malformed tables and out-of-range options are rejected before any text is
/// processed; content errors never surface through this type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid option `{name}`: {message}")]
    InvalidOption { name: &'static str, message: String },

    #[error("Malformed {table} table: {message}")]
    MalformedTable { table: String, message: String },

    #[error("Valence for '{word}' must be a finite number in [-4, 4], got {value}")]
    ValenceOutOfRange { word: String, value: f64 },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn table(table: &str, message: impl Into<String>) -> Self {
        Self::MalformedTable {
            table: table.to_string(),
            message: message.into(),
        }
    }
}

/// Text normalizer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerOptions {
    /// Repetitions kept when a character run of 3+ is squeezed
    pub max_elongation: usize,
    /// Maximum number of tokens a negation word can tag
    pub negation_window: usize,
    /// Extra contraction expansions (TOML, merged over the built-ins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractions_file: Option<PathBuf>,
    /// Extra slang/abbreviation expansions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slang_file: Option<PathBuf>,
    /// Extra emoji → word mappings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_file: Option<PathBuf>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            max_elongation: 2,
            negation_window: 8,
            contractions_file: None,
            slang_file: None,
            emoji_file: None,
        }
    }
}

/// Statement scorer implementation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerBackend {
    /// Valence lexicon with negation/booster/emphasis rules
    #[default]
    Lexicon,
    /// File-loaded naive Bayes model, falling back to the lexicon
    NaiveBayes,
}

impl ScorerBackend {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Lexicon => "Lexicon (rule-based)",
            Self::NaiveBayes => "Naive Bayes (lexicon fallback)",
        }
    }

    /// Parse a user-supplied backend name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "lexicon" | "rules" | "vader" => Some(Self::Lexicon),
            "naive-bayes" | "bayes" | "nb" | "model" => Some(Self::NaiveBayes),
            _ => None,
        }
    }
}

/// Statement scorer settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScorerOptions {
    pub backend: ScorerBackend,
    /// Model file for the naive Bayes backend (defaults to the data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    /// Extra valence/booster entries (TOML, merged over the built-ins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_file: Option<PathBuf>,
}

/// Conversation journal settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalOptions {
    /// Append finished conversations to the journal
    pub enabled: bool,
    /// Journal location (defaults to the data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for JournalOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerOptions,
    pub scorer: ScorerOptions,
    pub journal: JournalOptions,
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            let config: Self = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Reject numeric options the normalizer cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normalizer.max_elongation == 0 {
            return Err(ConfigError::InvalidOption {
                name: "normalizer.max_elongation",
                message: "must be at least 1".to_string(),
            });
        }
        if self.normalizer.negation_window == 0 {
            return Err(ConfigError::InvalidOption {
                name: "normalizer.negation_window",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "era-laboratories", "sentiflow")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory (journal, trained models)
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "era-laboratories", "sentiflow")
            .context("Could not determine data directory")?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Get full path to the conversation journal
    pub fn journal_path(&self) -> Result<PathBuf> {
        match &self.journal.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("conversations.jsonl")),
        }
    }

    /// Get full path to the naive Bayes model
    pub fn model_path(&self) -> Result<PathBuf> {
        match &self.scorer.model_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("naive-bayes.json")),
        }
    }
}

/// Read an optional table file, mapping IO failures to [`ConfigError::Io`]
pub(crate) fn read_table_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
