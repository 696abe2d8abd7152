//! Change notifications emitted after every store mutation.
//!
//! Every mutation publishes a [`ChangeEvent`] through the
//! [`super::ChangeBus`]. WebSocket connections forward the events whose
//! [`Topic`] they subscribed to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, RecordId};
use crate::error::WinestaError;

/// Subscription topic: which collection a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Cellar wines.
    Wines,
    /// Community events.
    Events,
    /// Sommelier chat log.
    Chat,
}

impl Topic {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wines => "wines",
            Self::Events => "events",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = WinestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wines" => Ok(Self::Wines),
            "events" => Ok(Self::Events),
            "chat" => Ok(Self::Chat),
            other => Err(WinestaError::InvalidRequest(format!(
                "unknown topic {other:?}"
            ))),
        }
    }
}

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A record was appended to a collection.
    RecordCreated {
        /// Collection the record belongs to.
        topic: Topic,
        /// New record's identity.
        record_id: RecordId,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A record was edited in place.
    RecordUpdated {
        /// Collection the record belongs to.
        topic: Topic,
        /// Edited record's identity.
        record_id: RecordId,
        /// Edit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A record was deleted.
    RecordRemoved {
        /// Collection the record belonged to.
        topic: Topic,
        /// Deleted record's identity.
        record_id: RecordId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A chat message (user or assistant) was appended to the log.
    MessagePosted {
        /// The appended message.
        message: ChatMessage,
        /// Append timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An assistant reply was regenerated in place.
    MessageRegenerated {
        /// Identity of the message that was replaced.
        replaced_id: RecordId,
        /// The replacement.
        message: ChatMessage,
        /// Replacement timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ChangeEvent {
    /// Returns the topic this event is delivered under.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::RecordCreated { topic, .. }
            | Self::RecordUpdated { topic, .. }
            | Self::RecordRemoved { topic, .. } => *topic,
            Self::MessagePosted { .. } | Self::MessageRegenerated { .. } => Topic::Chat,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::RecordCreated { .. } => "record_created",
            Self::RecordUpdated { .. } => "record_updated",
            Self::RecordRemoved { .. } => "record_removed",
            Self::MessagePosted { .. } => "message_posted",
            Self::MessageRegenerated { .. } => "message_regenerated",
        }
    }
}
