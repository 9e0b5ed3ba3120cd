//! HTTP surface for the event catalog.

mod routes;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::recommendations::EventRecommendations;
use crate::repository::EventRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn EventRepository>,
    pub recommendations: Arc<EventRecommendations>,
}

/// Build the catalog router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/events",
            get(routes::get_events).post(routes::create_event),
        )
        .route("/events/:id", get(routes::get_event))
        .route(
            "/events/recommendations/:artist",
            get(routes::get_recommendations),
        )
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
