use super::*;
use crate::error::LoadError;
use crate::test_server::{recording_router, spawn, Recorder, RecordedRequest};
use axum::http::StatusCode;
use std::sync::Arc;

async fn fake_blazegraph(status: StatusCode) -> (BlazegraphStore, Recorder) {
    let recorder = Recorder::default();
    let router = recording_router(recorder.clone(), Arc::new(move |_: &RecordedRequest| status));
    let base_url = spawn(router).await;
    (BlazegraphStore::new(base_url, "kb"), recorder)
}

#[tokio::test]
async fn test_bulk_load_posts_ntriples_into_graph() {
    let (store, recorder) = fake_blazegraph(StatusCode::OK).await;

    store
        .bulk_load(
            "gs://bucket/dataset",
            "<http://ex.org/s> <http://ex.org/p> \"o\" .\n".to_string(),
        )
        .await
        .unwrap();

    let requests = recorder.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/bigdata/namespace/kb/sparql");
    assert_eq!(
        request.query.get("context-uri").map(String::as_str),
        Some("gs://bucket/dataset")
    );
    assert_eq!(request.content_type.as_deref(), Some("text/plain"));
    assert!(request.body.contains("<http://ex.org/p>"));
}

#[tokio::test]
async fn test_bulk_load_reports_bad_status() {
    let (store, _) = fake_blazegraph(StatusCode::INTERNAL_SERVER_ERROR).await;

    let err = store
        .bulk_load("file:///data/a.nq", String::new())
        .await
        .unwrap_err();

    match err {
        LoadError::BadStatus { backend, status, .. } => {
            assert_eq!(backend, "Blazegraph");
            assert_eq!(status, 500);
        }
        other => panic!("Expected BadStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_is_ready_checks_status_page() {
    let (store, recorder) = fake_blazegraph(StatusCode::OK).await;

    assert!(store.is_ready().await);
    assert_eq!(recorder.requests()[0].path, "/bigdata/status");
}

#[tokio::test]
async fn test_is_ready_false_when_unreachable() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = BlazegraphStore::new(format!("http://{}", addr), "kb");
    assert!(!store.is_ready().await);
}

#[test]
fn test_sparql_url() {
    let store = BlazegraphStore::new("http://localhost:8885/", "kb");
    assert_eq!(
        store.sparql_url(),
        "http://localhost:8885/bigdata/namespace/kb/sparql"
    );
}
