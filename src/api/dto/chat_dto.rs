//! Sommelier chat DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ChatMessage;

/// Request body for `POST /sommelier/messages`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Message text; must contain a non-whitespace character.
    pub text: String,
}

/// Response body for `GET /sommelier/messages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageListResponse {
    /// The chat log in order.
    pub data: Vec<ChatMessage>,
}
