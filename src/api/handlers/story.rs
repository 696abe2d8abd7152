//! Story handlers (read-only).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{StoryFilterParams, StoryListResponse, StoryView};
use crate::api::extract::{ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::domain::RecordId;
use crate::error::{ErrorResponse, WinestaError};

/// `GET /stories`: Story listing with optional search.
#[utoipa::path(
    get,
    path = "/api/v1/stories",
    tag = "Stories",
    summary = "List stories",
    params(StoryFilterParams),
    responses(
        (status = 200, description = "Stories", body = StoryListResponse),
    )
)]
pub async fn list_stories(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<StoryFilterParams>,
) -> impl IntoResponse {
    let stories = state.stories.list(filter.q.as_deref()).await;
    Json(StoryListResponse {
        data: stories.into_iter().map(StoryView::from).collect(),
    })
}

/// `GET /stories/:id`: Story detail.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the story does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/stories/{id}",
    tag = "Stories",
    summary = "Get a story",
    params(
        ("id" = uuid::Uuid, Path, description = "Story UUID"),
    ),
    responses(
        (status = 200, description = "Story details", body = StoryView),
        (status = 404, description = "Story not found", body = ErrorResponse),
    )
)]
pub async fn get_story(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let story = state.stories.get(RecordId::from_uuid(id)).await?;
    Ok(Json(StoryView::from(story)))
}

/// Story routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stories", get(list_stories))
        .route("/stories/{id}", get(get_story))
}
