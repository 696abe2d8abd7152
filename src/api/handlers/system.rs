//! System endpoints: health check and the wine category catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::WineCategoryInfo;
use crate::app_state::AppState;
use crate::domain::WineCategory;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/wine-categories`: List the wine categories.
#[utoipa::path(
    get,
    path = "/config/wine-categories",
    tag = "System",
    summary = "List wine categories",
    description = "Returns every wine category with its display label, in tab order. The `all` selector is implicit.",
    responses(
        (status = 200, description = "Wine category catalog", body = Vec<WineCategoryInfo>),
    )
)]
pub async fn wine_categories_handler() -> impl IntoResponse {
    let categories: Vec<WineCategoryInfo> = WineCategory::ALL
        .into_iter()
        .map(WineCategoryInfo::from)
        .collect();
    (StatusCode::OK, Json(categories))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/wine-categories", get(wine_categories_handler))
}
