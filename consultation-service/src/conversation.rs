use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    User,
    Assistant,
}

/// One message in a consultation conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: Uuid,
    pub role: SpeakerRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Conversation history for one consultation session.
///
/// Owned and lifecycle-managed by the UI/session layer; the requesters
/// only produce the texts that get appended here. Each session holds its
/// own log, so concurrent sessions never share state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_user(&mut self, text: impl Into<String>) {
        self.record(SpeakerRole::User, text.into());
    }

    pub fn record_assistant(&mut self, text: impl Into<String>) {
        self.record(SpeakerRole::Assistant, text.into());
    }

    fn record(&mut self, role: SpeakerRole, text: String) {
        self.entries.push(ConversationEntry {
            id: Uuid::new_v4(),
            role,
            text,
            created_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
