//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; `/health`,
//! `/config/wine-categories` and `/ws` sit at the root.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::WinestaConfig;
use crate::ws::handler::ws_handler;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Winesta API", description = "Wine cellar, community events, stories and sommelier chat."),
    paths(
        handlers::system::health_handler,
        handlers::system::wine_categories_handler,
        handlers::wine::list_wines,
        handlers::wine::create_wine,
        handlers::wine::new_wine_form,
        handlers::wine::get_wine,
        handlers::wine::edit_wine_form,
        handlers::wine::update_wine,
        handlers::wine::delete_wine,
        handlers::event::list_events,
        handlers::event::create_event,
        handlers::event::new_event_form,
        handlers::event::get_event,
        handlers::event::edit_event_form,
        handlers::event::update_event,
        handlers::event::delete_event,
        handlers::story::list_stories,
        handlers::story::get_story,
        handlers::sommelier::list_messages,
        handlers::sommelier::send_message,
        handlers::sommelier::regenerate_message,
    ),
    tags(
        (name = "System", description = "Health and static configuration"),
        (name = "Cellar", description = "Personal wine collection"),
        (name = "Events", description = "Community events"),
        (name = "Stories", description = "Editorial stories"),
        (name = "Sommelier", description = "Simulated sommelier chat"),
    )
)]
pub struct ApiDoc;

/// Builds the REST router (resource and system routes, no layers).
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the complete application: REST routes with the request timeout,
/// the `/ws` upgrade, tracing and CORS layers, and Swagger UI when the
/// `swagger-ui` feature is enabled.
pub fn build_app(state: AppState, config: &WinestaConfig) -> Router {
    let rest = build_router().layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.request_timeout,
    ));

    let app = Router::new().merge(rest).route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
    .with_state(state)
}
