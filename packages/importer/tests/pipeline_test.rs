//! End-to-end pipeline tests against the mock completion backend.

use std::sync::Arc;

use futures::StreamExt;
use importer::testing::MockCompletion;
use importer::{CreateEventRequest, ImportConfig, ImportPipeline};

const EWF_SEGMENT: &str = "On the 10th of September, 2024, at Soldier Field, 'Nightfall Nexus' by Earth Wind & Fire, for a sum of $121.";
const JAZZ_SEGMENT: &str = "Artist B brings 'Blue Notes' to Venue B on the 1st of October 2024, tickets $45.";

const EWF_RECORD: &str = r#"{
    "artist": {"name": "Earth Wind & Fire", "genre": null},
    "name": "Nightfall Nexus",
    "venue": "Soldier Field",
    "date": "2024-09-10",
    "description": "a cosmic symphony at Soldier Field",
    "price": 121
}"#;

const JAZZ_RECORD: &str = r#"{
    "artist": {"name": "Artist B", "genre": "jazz"},
    "name": "Blue Notes",
    "venue": "Venue B",
    "date": "2024-10-01",
    "description": "an evening of jazz at Venue B",
    "price": 45
}"#;

// The "EVENT FILE" header only ever appears in the whole document, so the
// split rule cannot shadow the per-segment extraction rules.
fn document() -> String {
    format!("EVENT FILE\n\n{EWF_SEGMENT}\n\n{JAZZ_SEGMENT}")
}

fn split_response(segments: &[&str]) -> String {
    serde_json::to_string(segments).unwrap()
}

async fn collect(pipeline: &ImportPipeline, document: &str) -> Vec<CreateEventRequest> {
    pipeline.parse(document).collect().await
}

#[tokio::test]
async fn test_two_event_document_end_to_end() {
    let mock = MockCompletion::new()
        .with_response("EVENT FILE", split_response(&[EWF_SEGMENT, JAZZ_SEGMENT]))
        .with_response("Earth Wind & Fire", EWF_RECORD)
        .with_response("Artist B", JAZZ_RECORD);
    let pipeline = ImportPipeline::new(Arc::new(mock.clone()));

    let mut requests = collect(&pipeline, &document()).await;
    requests.sort_by_key(|r| r.price);

    assert_eq!(requests.len(), 2);

    let jazz = &requests[0];
    assert_eq!(jazz.price, 45);
    assert_eq!(jazz.venue, "Venue B");
    assert_eq!(jazz.date.to_string(), "2024-10-01");
    assert_eq!(jazz.artist.genre.as_deref(), Some("jazz"));

    let ewf = &requests[1];
    assert_eq!(ewf.price, 121);
    assert_eq!(ewf.venue, "Soldier Field");
    assert_eq!(ewf.date.to_string(), "2024-09-10");

    assert_ne!(jazz.artist.id, ewf.artist.id);
    assert!(!jazz.artist.id.is_nil() && !ewf.artist.id.is_nil());

    // One split call plus one extraction per segment.
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_failed_segment_is_isolated() {
    let mock = MockCompletion::new()
        .with_response(
            "EVENT FILE",
            split_response(&[EWF_SEGMENT, "the broken middle segment", JAZZ_SEGMENT]),
        )
        .with_response("Earth Wind & Fire", EWF_RECORD)
        .with_failure("broken middle", "simulated backend failure")
        .with_response("Artist B", JAZZ_RECORD);
    let pipeline = ImportPipeline::new(Arc::new(mock.clone()));

    let requests = collect(&pipeline, &document()).await;

    assert_eq!(requests.len(), 2);
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn test_invalid_candidate_is_dropped() {
    // Valid JSON, but no venue: extraction succeeds, validation rejects.
    let no_venue = r#"{
        "artist": {"name": "Artist B", "genre": null},
        "name": "Blue Notes",
        "date": "2024-10-01",
        "description": "an evening of jazz",
        "price": 45
    }"#;

    let mock = MockCompletion::new()
        .with_response("EVENT FILE", split_response(&[EWF_SEGMENT, JAZZ_SEGMENT]))
        .with_response("Earth Wind & Fire", EWF_RECORD)
        .with_response("Artist B", no_venue);
    let pipeline = ImportPipeline::new(Arc::new(mock));

    let requests = collect(&pipeline, &document()).await;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].venue, "Soldier Field");
}

#[tokio::test]
async fn test_unsplittable_document_yields_nothing() {
    let mock = MockCompletion::new().with_response("EVENT FILE", "I could not split this");
    let pipeline = ImportPipeline::new(Arc::new(mock.clone()));

    let requests = collect(&pipeline, &document()).await;

    assert!(requests.is_empty());
    // Only the split call happened; no extraction was attempted.
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_ordered_mode_preserves_segment_order() {
    let mock = MockCompletion::new()
        .with_response("EVENT FILE", split_response(&[EWF_SEGMENT, JAZZ_SEGMENT]))
        .with_response("Earth Wind & Fire", EWF_RECORD)
        .with_response("Artist B", JAZZ_RECORD);
    let pipeline = ImportPipeline::new(Arc::new(mock))
        .with_config(ImportConfig::new().with_concurrency(2).ordered());

    let requests = collect(&pipeline, &document()).await;

    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].name, "Nightfall Nexus");
    assert_eq!(requests[1].name, "Blue Notes");
}
