//! Community event handlers, mirroring the cellar endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    EventFilterParams, EventFormResponse, EventListResponse, EventMonthView, EventView,
    PaginationParams,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::domain::{CategorySelector, EventDraft, RecordFilter, RecordId, group_by_month};
use crate::error::{ErrorResponse, WinestaError};
use crate::service::EventService;

/// `GET /events`: Filtered, paginated event listing.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns events matching the search text, optional exact category and featured flag, each with its price and day labels. The page is also grouped by month, oldest first.",
    params(EventFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilterParams>,
    ApiQuery(page): ApiQuery<PaginationParams>,
) -> impl IntoResponse {
    let selector = match filter.category.as_deref() {
        Some(raw) if !CategorySelector::<String>::is_wildcard(raw) => {
            CategorySelector::Only(raw.trim().to_string())
        }
        _ => CategorySelector::All,
    };
    let mut record_filter = RecordFilter::all().with_category(selector);
    if let Some(q) = filter.q.as_deref() {
        record_filter = record_filter.with_query(q);
    }

    let events = state
        .events
        .list_events(&record_filter, filter.featured.unwrap_or(false))
        .await;
    let empty_message = events
        .is_empty()
        .then(|| EventService::empty_message().to_string());
    let (page_events, pagination) = page.paginate(events);
    let months = group_by_month(page_events.clone())
        .into_iter()
        .map(EventMonthView::from)
        .collect();

    Json(EventListResponse {
        data: page_events.into_iter().map(EventView::from).collect(),
        months,
        pagination,
        empty_message,
    })
}

/// `POST /events`: Submit a create-mode draft.
///
/// # Errors
///
/// Returns [`WinestaError::InvalidField`] when the draft fails validation.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    request_body = EventDraft,
    responses(
        (status = 201, description = "Event created", body = EventView),
        (status = 400, description = "Invalid draft", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<impl IntoResponse, WinestaError> {
    let event = state.events.create(draft).await?;
    Ok((StatusCode::CREATED, Json(EventView::from(event))))
}

/// `GET /events/form`: Create-mode form defaults.
#[utoipa::path(
    get,
    path = "/api/v1/events/form",
    tag = "Events",
    summary = "New event form",
    responses(
        (status = 200, description = "Create-mode form", body = EventFormResponse),
    )
)]
pub async fn new_event_form(State(state): State<AppState>) -> impl IntoResponse {
    Json(EventFormResponse::from(state.events.create_form()))
}

/// `GET /events/:id`: Event detail.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get an event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventView),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let event = state.events.get(RecordId::from_uuid(id)).await?;
    Ok(Json(EventView::from(event)))
}

/// `GET /events/:id/form`: Edit-mode form prefilled from the stored event.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/form",
    tag = "Events",
    summary = "Edit event form",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Edit-mode form", body = EventFormResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn edit_event_form(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let form = state.events.edit_form(RecordId::from_uuid(id)).await?;
    Ok(Json(EventFormResponse::from(form)))
}

/// `PUT /events/:id`: Submit an edit-mode draft.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] for unknown IDs and
/// [`WinestaError::InvalidField`] when the draft fails validation.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = EventDraft,
    responses(
        (status = 200, description = "Event updated", body = EventView),
        (status = 400, description = "Invalid draft", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<impl IntoResponse, WinestaError> {
    let event = state.events.update(RecordId::from_uuid(id), draft).await?;
    Ok(Json(EventView::from(event)))
}

/// `DELETE /events/:id`: Remove an event.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    state.events.delete(RecordId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/form", get(new_event_form))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/form", get(edit_event_form))
}
