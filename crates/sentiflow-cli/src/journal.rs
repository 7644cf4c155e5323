//! Append-only JSONL journal of finished conversations

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sentiflow_core::{ConversationReport, ConversationSentiment, MoodTrend, SentimentScore};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One message of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentScore>,
}

/// A conversation as written to the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub overall: Option<ConversationSentiment>,
    #[serde(default)]
    pub mood: Option<MoodTrend>,
}

impl ConversationRecord {
    /// Start a new conversation now
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            messages: Vec::new(),
            overall: None,
            mood: None,
        }
    }

    pub fn push_user(&mut self, content: &str, cleaned: &str, sentiment: SentimentScore) {
        self.messages.push(Message {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.to_string(),
            cleaned: Some(cleaned.to_string()),
            timestamp: Utc::now(),
            sentiment: Some(sentiment),
        });
    }

    pub fn push_bot(&mut self, content: &str) {
        self.messages.push(Message {
            id: Uuid::new_v4(),
            role: Role::Bot,
            content: content.to_string(),
            cleaned: None,
            timestamp: Utc::now(),
            sentiment: None,
        });
    }

    /// Close the record with the aggregated verdict
    pub fn finish(&mut self, report: &ConversationReport) {
        self.ended_at = Some(Utc::now());
        self.overall = Some(report.overall);
        self.mood = Some(report.mood);
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }
}

/// JSONL file holding one [`ConversationRecord`] per line
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a conversation
    pub fn append(&self, record: &ConversationRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(record)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open journal {:?}", self.path))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write journal {:?}", self.path))?;

        tracing::debug!("Journalled conversation {} to {:?}", record.id, self.path);
        Ok(())
    }

    /// Read every conversation; a missing journal is empty and unreadable
    /// lines are skipped
    pub fn load_all(&self) -> Result<Vec<ConversationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Failed to open journal {:?}", self.path))?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping journal line {}: {}", index + 1, e),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiflow_core::{ConversationAnalyzer, Pipeline, Trend};

    fn finished_record() -> ConversationRecord {
        let mut pipeline = Pipeline::default();
        let mut record = ConversationRecord::start();

        for text in ["this is awful", "great, thanks!"] {
            let turn = pipeline.process_turn("t", text);
            record.push_user(&turn.raw, &turn.cleaned, turn.sentiment);
            record.push_bot("noted");
        }
        record.finish(&pipeline.end_conversation("t"));
        record
    }

    #[test]
    fn test_append_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("data").join("conversations.jsonl"));

        let first = finished_record();
        let second = finished_record();
        journal.append(&first).unwrap();
        journal.append(&second).unwrap();

        let loaded = journal.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, first.id);
        assert_eq!(loaded[0].messages.len(), 4);
        assert_eq!(loaded[1].id, second.id);
        assert_eq!(loaded[0].user_message_count(), 2);
        assert_eq!(loaded[0].mood.unwrap().trend, Trend::Improving);
    }

    #[test]
    fn test_missing_journal_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("none.jsonl"));
        assert!(journal.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.jsonl");
        let journal = Journal::new(&path);
        journal.append(&finished_record()).unwrap();

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ truncated").unwrap();
        writeln!(file).unwrap();

        assert_eq!(journal.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_record_shape() {
        let json = serde_json::to_value(finished_record()).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][1]["role"], "bot");
        assert!(json["messages"][1].get("sentiment").is_none());
        assert!(json["started_at"].as_str().unwrap().contains('T'));
        assert!(json["overall"]["label"].is_string());
    }
}
