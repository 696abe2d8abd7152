//! Cellar handlers: filtered list, form state, create, get, update, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PaginationParams, WineFilterParams, WineFormResponse, WineListResponse};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::domain::{CategorySelector, RecordFilter, RecordId, Wine, WineCategory, WineDraft};
use crate::error::{ErrorResponse, WinestaError};
use crate::service::CellarService;

/// `GET /wines`: Filtered, paginated cellar listing.
///
/// # Errors
///
/// Returns [`WinestaError::InvalidField`] for an unknown category.
#[utoipa::path(
    get,
    path = "/api/v1/wines",
    tag = "Cellar",
    summary = "List wines",
    description = "Returns the cellar filtered by category tab and search text, with per-category counts and the empty-state message when nothing matches.",
    params(WineFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated wine list", body = WineListResponse),
        (status = 400, description = "Unknown category", body = ErrorResponse),
    )
)]
pub async fn list_wines(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<WineFilterParams>,
    ApiQuery(page): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, WinestaError> {
    let selector = match filter.category.as_deref() {
        Some(raw) => WineCategory::parse_selector(raw)?,
        None => CategorySelector::All,
    };
    let mut record_filter = RecordFilter::all().with_category(selector.clone());
    if let Some(q) = filter.q.as_deref() {
        record_filter = record_filter.with_query(q);
    }

    let wines = state.cellar.list(&record_filter).await;
    let empty_message = wines
        .is_empty()
        .then(|| CellarService::empty_message(&selector));
    let (data, pagination) = page.paginate(wines);

    Ok(Json(WineListResponse {
        data,
        counts: state.cellar.category_counts().await,
        pagination,
        empty_message,
    }))
}

/// `POST /wines`: Submit a create-mode draft.
///
/// # Errors
///
/// Returns [`WinestaError::InvalidField`] when the draft fails validation.
#[utoipa::path(
    post,
    path = "/api/v1/wines",
    tag = "Cellar",
    summary = "Add a wine",
    description = "Validates the draft, assigns a new identity and timestamps, appends the wine to the cellar and emits a record_created event on the wines topic.",
    request_body = WineDraft,
    responses(
        (status = 201, description = "Wine created", body = Wine),
        (status = 400, description = "Invalid draft", body = ErrorResponse),
    )
)]
pub async fn create_wine(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<WineDraft>,
) -> Result<impl IntoResponse, WinestaError> {
    let wine = state.cellar.create(draft).await?;
    Ok((StatusCode::CREATED, Json(wine)))
}

/// `GET /wines/form`: Create-mode form defaults.
#[utoipa::path(
    get,
    path = "/api/v1/wines/form",
    tag = "Cellar",
    summary = "New wine form",
    description = "Returns the blank draft a create-mode form opens with: current year, tried category, no rating.",
    responses(
        (status = 200, description = "Create-mode form", body = WineFormResponse),
    )
)]
pub async fn new_wine_form(State(state): State<AppState>) -> impl IntoResponse {
    Json(WineFormResponse::from(state.cellar.create_form()))
}

/// `GET /wines/:id`: Wine detail.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the wine does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/wines/{id}",
    tag = "Cellar",
    summary = "Get a wine",
    params(
        ("id" = uuid::Uuid, Path, description = "Wine UUID"),
    ),
    responses(
        (status = 200, description = "Wine details", body = Wine),
        (status = 404, description = "Wine not found", body = ErrorResponse),
    )
)]
pub async fn get_wine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let wine = state.cellar.get(RecordId::from_uuid(id)).await?;
    Ok(Json(wine))
}

/// `GET /wines/:id/form`: Edit-mode form prefilled from the stored wine.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the wine does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/wines/{id}/form",
    tag = "Cellar",
    summary = "Edit wine form",
    params(
        ("id" = uuid::Uuid, Path, description = "Wine UUID"),
    ),
    responses(
        (status = 200, description = "Edit-mode form", body = WineFormResponse),
        (status = 404, description = "Wine not found", body = ErrorResponse),
    )
)]
pub async fn edit_wine_form(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    let form = state.cellar.edit_form(RecordId::from_uuid(id)).await?;
    Ok(Json(WineFormResponse::from(form)))
}

/// `PUT /wines/:id`: Submit an edit-mode draft.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] for unknown IDs and
/// [`WinestaError::InvalidField`] when the draft fails validation.
#[utoipa::path(
    put,
    path = "/api/v1/wines/{id}",
    tag = "Cellar",
    summary = "Update a wine",
    description = "Overwrites the editable fields in place, keeps identity and creation time, refreshes updated_at and emits a record_updated event.",
    params(
        ("id" = uuid::Uuid, Path, description = "Wine UUID"),
    ),
    request_body = WineDraft,
    responses(
        (status = 200, description = "Wine updated", body = Wine),
        (status = 400, description = "Invalid draft", body = ErrorResponse),
        (status = 404, description = "Wine not found", body = ErrorResponse),
    )
)]
pub async fn update_wine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(draft): ApiJson<WineDraft>,
) -> Result<impl IntoResponse, WinestaError> {
    let wine = state.cellar.update(RecordId::from_uuid(id), draft).await?;
    Ok(Json(wine))
}

/// `DELETE /wines/:id`: Remove a wine.
///
/// # Errors
///
/// Returns [`WinestaError::RecordNotFound`] if the wine does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/wines/{id}",
    tag = "Cellar",
    summary = "Delete a wine",
    description = "Removes the wine and emits a record_removed event. Confirmation is the client's concern.",
    params(
        ("id" = uuid::Uuid, Path, description = "Wine UUID"),
    ),
    responses(
        (status = 204, description = "Wine deleted"),
        (status = 404, description = "Wine not found", body = ErrorResponse),
    )
)]
pub async fn delete_wine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, WinestaError> {
    state.cellar.delete(RecordId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cellar routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wines", get(list_wines).post(create_wine))
        .route("/wines/form", get(new_wine_form))
        .route(
            "/wines/{id}",
            get(get_wine).put(update_wine).delete(delete_wine),
        )
        .route("/wines/{id}/form", get(edit_wine_form))
}
