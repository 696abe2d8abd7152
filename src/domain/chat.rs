//! Sommelier chat log messages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{Record, RecordId};
use crate::error::WinestaError;

/// Canned assistant reply sent after every user message.
pub const CANNED_REPLY: &str = "I'm analyzing your request and will provide personalized wine \
recommendations based on your preferences. Let me suggest some excellent options for you...";

/// Suffix appended to a regenerated assistant reply.
pub const REGENERATED_SUFFIX: &str = " (Regenerated)";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person chatting.
    User,
    /// The simulated sommelier.
    Assistant,
}

/// One entry in the sommelier chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChatMessage {
    /// Identity.
    pub id: RecordId,
    /// Message body.
    pub text: String,
    /// Who wrote it.
    pub sender: Sender,
    /// When it was appended.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A user-authored message.
    #[must_use]
    pub fn user(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            text: text.into(),
            sender: Sender::User,
            created_at: now,
        }
    }

    /// An assistant-authored message.
    #[must_use]
    pub fn assistant(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            text: text.into(),
            sender: Sender::Assistant,
            created_at: now,
        }
    }

    /// Builds the replacement for a regenerated assistant reply.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::InvalidRequest`] for user messages, which
    /// cannot be regenerated.
    pub fn regenerated(&self, now: DateTime<Utc>) -> Result<Self, WinestaError> {
        if self.sender != Sender::Assistant {
            return Err(WinestaError::InvalidRequest(format!(
                "message {} was written by the user and cannot be regenerated",
                self.id
            )));
        }
        Ok(Self::assistant(format!("{}{REGENERATED_SUFFIX}", self.text), now))
    }
}

impl Record for ChatMessage {
    const KIND: &'static str = "message";

    fn id(&self) -> RecordId {
        self.id
    }
}
