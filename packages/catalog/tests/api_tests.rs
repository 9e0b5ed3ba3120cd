//! Integration tests for the catalog HTTP surface.
//!
//! Routers are exercised in-process via `tower::util::ServiceExt`; the
//! completion backend is the importer's mock, so nothing touches the
//! network.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use catalog::repository::RepositoryResult;
use catalog::server::{build_router, AppState};
use catalog::{Event, EventRecommendations, EventRepository, MemoryEventRepository, RepositoryError};
use chrono::{Duration, NaiveDate, Utc};
use importer::testing::MockCompletion;
use importer::{Artist, CreateEventRequest};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

fn setup_app(repository: Arc<dyn EventRepository>) -> axum::Router {
    let recommendations = Arc::new(EventRecommendations::new(
        Arc::new(MockCompletion::new()),
        repository.clone(),
    ));
    build_router(AppState {
        repository,
        recommendations,
    })
}

fn valid_request() -> CreateEventRequest {
    CreateEventRequest {
        name: "Nightfall Nexus".into(),
        price: 121,
        artist: Artist {
            id: Uuid::new_v4(),
            name: "Earth Wind & Fire".into(),
            genre: None,
        },
        date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
        description: "a cosmic symphony".into(),
        image_url: None,
        venue: "Soldier Field".into(),
    }
}

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = setup_app(Arc::new(MemoryEventRepository::new()));

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_then_fetch_event() {
    let repository = Arc::new(MemoryEventRepository::new());
    let app = setup_app(repository.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/events", &valid_request()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get("location")
        .expect("201 must carry a Location header")
        .to_str()
        .unwrap()
        .to_string();
    let created = json_body(response.into_body()).await;
    assert_eq!(created["name"], "Nightfall Nexus");
    assert_eq!(location, format!("/events/{}", created["event_id"].as_str().unwrap()));

    let response = app.clone().oneshot(get_request(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["venue"], "Soldier Field");
    assert_eq!(fetched["price"], 121);

    let response = app.oneshot(get_request("/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all = json_body(response.into_body()).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_request_gets_400_and_nothing_is_persisted() {
    let repository = Arc::new(MemoryEventRepository::new());
    let app = setup_app(repository.clone());

    let mut invalid = valid_request();
    invalid.name = "".into();

    let response = app
        .oneshot(json_request("POST", "/events", &invalid))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repository.event_count(), 0);
}

#[tokio::test]
async fn test_unknown_event_is_404() {
    let app = setup_app(Arc::new(MemoryEventRepository::new()));

    let response = app
        .oneshot(get_request(&format!("/events/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Repository that refuses every write.
struct BrokenRepository;

#[async_trait]
impl EventRepository for BrokenRepository {
    async fn save(&self, _event: Event) -> RepositoryResult<()> {
        Err(RepositoryError::Backend("disk on fire".into()))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Event>> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _id: Uuid) -> RepositoryResult<Option<Event>> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_save_failure_is_500() {
    let app = setup_app(Arc::new(BrokenRepository));

    let response = app
        .oneshot(json_request("POST", "/events", &valid_request()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_recommendations_endpoint_filters_to_window() {
    let today = Utc::now().date_naive();
    let repository = Arc::new(MemoryEventRepository::new());

    let mut soon = Event::from(valid_request());
    soon.date = today + Duration::days(7);
    let mut far = Event::from(valid_request());
    far.date = today + Duration::days(120);
    let soon_id = soon.event_id;
    let far_id = far.event_id;
    repository.save(soon).await.unwrap();
    repository.save(far).await.unwrap();

    // The mock model recommends both; only the in-window event may appear.
    let mock = MockCompletion::new()
        .with_response("The fan follows", format!("{soon_id}, {far_id}"));
    let recommendations = Arc::new(EventRecommendations::new(
        Arc::new(mock),
        repository.clone(),
    ));
    let app = build_router(AppState {
        repository,
        recommendations,
    });

    let response = app
        .oneshot(get_request("/events/recommendations/Earth%20Wind%20%26%20Fire"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let picked = json_body(response.into_body()).await;
    let picked = picked.as_array().unwrap();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0]["event_id"], soon_id.to_string());
}
