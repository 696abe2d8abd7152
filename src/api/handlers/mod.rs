//! REST endpoint handlers organized by resource.

pub mod event;
pub mod sommelier;
pub mod story;
pub mod system;
pub mod wine;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(wine::routes())
        .merge(event::routes())
        .merge(story::routes())
        .merge(sommelier::routes())
}
