//! In-process HTTP server standing in for a graph backend

use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Decides the status code returned for a request
pub type Responder = Arc<dyn Fn(&RecordedRequest) -> StatusCode + Send + Sync>;

/// One request as seen by the fake backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

/// Shared log of the requests a fake backend received
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Router that records every request and answers with `responder`
pub fn recording_router(recorder: Recorder, responder: Responder) -> Router {
    Router::new()
        .fallback(record)
        .with_state((recorder, responder))
}

async fn record(
    State((recorder, responder)): State<(Recorder, Responder)>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        content_type: header(CONTENT_TYPE),
        authorization: header(AUTHORIZATION),
        body,
    };
    let status = responder(&request);
    recorder.record(request);
    (status, "fake backend")
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
