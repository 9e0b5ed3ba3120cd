//! Route handlers.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use importer::CreateEventRequest;
use tracing::{error, warn};
use uuid::Uuid;

use crate::models::Event;
use crate::server::AppState;

/// GET /health
pub(super) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /events
pub(super) async fn get_events(Extension(state): Extension<AppState>) -> Response {
    match state.repository.get_all().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list events");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /events/:id
pub(super) async fn get_event(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.repository.get_by_id(id).await {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(error = %e, event_id = %id, "Failed to load event");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /events
pub(super) async fn create_event(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Response {
    if !request.is_valid() {
        warn!(event = %request.name, "Rejected invalid event creation request");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let event = Event::from(request);
    let location = format!("/events/{}", event.event_id);

    match state.repository.save(event.clone()).await {
        Ok(()) => {
            (StatusCode::CREATED, [(header::LOCATION, location)], Json(event)).into_response()
        }
        Err(e) => {
            error!(
                error = %e,
                event = %event.name,
                venue = %event.venue,
                "Error saving event"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /events/recommendations/:artist
pub(super) async fn get_recommendations(
    Extension(state): Extension<AppState>,
    Path(artist): Path<String>,
) -> Response {
    match state.recommendations.recommend(&artist).await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => {
            error!(error = %e, artist, "Failed to compute recommendations");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
