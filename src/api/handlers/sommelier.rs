//! Sommelier chat handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{MessageListResponse, SendMessageRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::{ChatMessage, RecordId};
use crate::error::{ErrorResponse, WinestaError};

/// `GET /sommelier/messages`: The chat log in order.
#[utoipa::path(
    get,
    path = "/api/v1/sommelier/messages",
    tag = "Sommelier",
    summary = "List chat messages",
    responses(
        (status = 200, description = "Chat log", body = MessageListResponse),
    )
)]
pub async fn list_messages(State(state): State<AppState>) -> impl IntoResponse {
    Json(MessageListResponse {
        data: state.sommelier.messages().await,
    })
}

/// `POST /sommelier/messages`: Post a user message.
///
/// The assistant reply is appended later and announced on the `chat` topic.
///
/// # Errors
///
/// Returns [`WinestaError::InvalidField`] for blank text.
#[utoipa::path(
    post,
    path = "/api/v1/sommelier/messages",
    tag = "Sommelier",
    summary = "Send a message",
    description = "Appends the user message immediately. After the configured delay the assistant reply is appended and pushed to WebSocket subscribers of the chat topic.",
    request_body = SendMessageRequest,
    responses(
        (status = 202, description = "Message accepted", body = ChatMessage),
        (status = 400, description = "Blank message", body = ErrorResponse),
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<impl IntoResponse, WinestaError> {
    let message = state.sommelier.send(&req.text).await?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

/// `POST /sommelier/messages/:id/regenerate`: Replace an assistant reply.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] for unknown IDs and
/// [`WinestaError::InvalidRequest`] when the message is the user's.
#[utoipa::path(
    post,
    path = "/api/v1/sommelier/messages/{id}/regenerate",
    tag = "Sommelier",
    summary = "Regenerate a reply",
    params(
        ("id" = uuid::Uuid, Path, description = "Assistant message UUID"),
    ),
    responses(
        (status = 200, description = "Replacement message", body = ChatMessage),
        (status = 400, description = "Not an assistant message", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
    )
)]
pub async fn regenerate_message(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let message = state.sommelier.regenerate(RecordId::from_uuid(id)).await?;
    Ok(Json(message))
}

/// Sommelier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sommelier/messages", get(list_messages).post(send_message))
        .route(
            "/sommelier/messages/{id}/regenerate",
            post(regenerate_message),
        )
}
