//! Sommelier service: chat log with a simulated, delayed assistant reply.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::chat::CANNED_REPLY;
use crate::domain::{ChangeBus, ChangeEvent, ChatMessage, RecordId, Registry};
use crate::error::WinestaError;

/// Chat log plus the reply timer.
///
/// Sending a message appends it immediately; a detached task appends the
/// canned assistant reply after `reply_delay`. There is no real inference,
/// no retry and no cancellation.
#[derive(Debug, Clone)]
pub struct SommelierService {
    log: Arc<Registry<ChatMessage>>,
    change_bus: ChangeBus,
    reply_delay: Duration,
}

impl SommelierService {
    /// Creates a service with an empty chat log.
    #[must_use]
    pub fn new(change_bus: ChangeBus, reply_delay: Duration) -> Self {
        Self {
            log: Arc::new(Registry::new()),
            change_bus,
            reply_delay,
        }
    }

    /// Returns the chat log in order.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.log.snapshot().await
    }

    /// Appends a user message and schedules the assistant reply.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::InvalidField`] if `text` is blank.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, WinestaError> {
        if text.trim().is_empty() {
            return Err(WinestaError::invalid_field("text", "message must not be empty"));
        }

        let message = ChatMessage::user(text, Utc::now());
        self.log.insert(message.clone()).await?;
        let _ = self.change_bus.publish(ChangeEvent::MessagePosted {
            message: message.clone(),
            timestamp: message.created_at,
        });
        tracing::debug!(message_id = %message.id, "user message posted");

        let log = Arc::clone(&self.log);
        let change_bus = self.change_bus.clone();
        let delay = self.reply_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = ChatMessage::assistant(CANNED_REPLY, Utc::now());
            match log.insert(reply.clone()).await {
                Ok(reply_id) => {
                    let _ = change_bus.publish(ChangeEvent::MessagePosted {
                        timestamp: reply.created_at,
                        message: reply,
                    });
                    tracing::debug!(%reply_id, "assistant reply posted");
                }
                Err(e) => tracing::warn!(error = %e, "assistant reply dropped"),
            }
        });

        Ok(message)
    }

    /// Replaces an assistant reply, in place, with a regenerated one.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] for unknown IDs and
    /// [`WinestaError::InvalidRequest`] for user messages.
    pub async fn regenerate(&self, id: RecordId) -> Result<ChatMessage, WinestaError> {
        let original = self.log.get(id).await?;
        let replacement = original.regenerated(Utc::now())?;
        self.log.replace(id, replacement.clone()).await?;

        let _ = self.change_bus.publish(ChangeEvent::MessageRegenerated {
            replaced_id: id,
            message: replacement.clone(),
            timestamp: replacement.created_at,
        });
        tracing::info!(replaced_id = %id, message_id = %replacement.id, "reply regenerated");

        Ok(replacement)
    }
}
