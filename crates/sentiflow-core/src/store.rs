//! Per-conversation turn storage

use crate::sentiment::SentimentScore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded user statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTurn {
    pub raw: String,
    pub cleaned: String,
    pub sentiment: SentimentScore,
}

/// Storage for the user turns of open conversations
///
/// Only user statements are stored; bot replies never reach the aggregator.
pub trait ConversationStore {
    /// Append a turn, opening the conversation if needed
    fn append_user_turn(&mut self, conversation_id: &str, turn: UserTurn);

    /// Turns of an open conversation in arrival order (empty if unknown)
    fn user_turns(&self, conversation_id: &str) -> &[UserTurn];

    /// Close a conversation, returning its turns
    fn close(&mut self, conversation_id: &str) -> Vec<UserTurn>;

    /// Ids of conversations with at least one recorded turn
    fn active_conversations(&self) -> Vec<String>;
}

/// In-memory store keyed by conversation id
#[derive(Debug, Default)]
pub struct MemoryStore {
    conversations: HashMap<String, Vec<UserTurn>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for MemoryStore {
    fn append_user_turn(&mut self, conversation_id: &str, turn: UserTurn) {
        self.conversations
            .entry(conversation_id.to_string())
            .or_default()
            .push(turn);
    }

    fn user_turns(&self, conversation_id: &str) -> &[UserTurn] {
        self.conversations
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn close(&mut self, conversation_id: &str) -> Vec<UserTurn> {
        self.conversations.remove(conversation_id).unwrap_or_default()
    }

    fn active_conversations(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.conversations.keys().cloned().collect();
        ids.sort();
        ids
    }
}
