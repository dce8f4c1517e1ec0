//! In-process mock of the TMDb API used by the workspace's tests.
//!
//! [`MockTmdb::start`] binds an axum server on `127.0.0.1:0` that serves the
//! three endpoints deck assembly uses, driven by a [`Fixture`]. Every call is
//! counted so tests can assert how much upstream work a request caused.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Body returned with every injected failure
pub const FAILURE_BODY: &str = r#"{"status_code":7,"status_message":"Invalid API key"}"#;

/// Canned upstream behaviour
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    /// `total_pages` reported by every discover page
    pub total_pages: u32,
    /// Items returned by every discover page
    pub discover_results: Vec<Value>,
    /// Fail every discover call with this status
    pub discover_status: Option<u16>,
    /// Fail discover calls for any page other than 1 with this status
    pub page_status: Option<u16>,
    /// Generate ten items per decade window instead of `discover_results`
    pub per_decade: bool,
    /// Decade start years whose discover calls fail with 500
    pub failing_decades: Vec<i32>,
    /// Raw list responses keyed by list id
    pub lists: HashMap<String, Value>,
    /// Fail every list call with this status
    pub list_status: Option<u16>,
    /// Raw detail responses keyed by movie id; unknown ids answer 404
    pub details: HashMap<u64, Value>,
    /// Movie ids whose detail call fails with 500
    pub failing_details: HashSet<u64>,
    /// Delay applied to every detail call
    pub detail_delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    fixture: Fixture,
    discover_calls: AtomicUsize,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pages: Mutex<Vec<u32>>,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

/// Running mock server. The server task is aborted on drop.
pub struct MockTmdb {
    base_url: String,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockTmdb {
    /// Start a mock TMDb on a random port
    pub async fn start(fixture: Fixture) -> Self {
        let state = Arc::new(MockState {
            fixture,
            ..MockState::default()
        });

        let app = Router::new()
            .route("/3/discover/movie", get(discover))
            .route("/3/list/{id}", get(list_by_id))
            .route("/3/movie/{id}", get(movie_detail))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock TMDb");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock TMDb failed");
        });

        Self {
            base_url: format!("http://{addr}/3"),
            state,
            handle,
        }
    }

    /// Base URL to hand to the client, e.g. `http://127.0.0.1:41234/3`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn discover_calls(&self) -> usize {
        self.state.discover_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.state.detail_calls.load(Ordering::SeqCst)
    }

    /// Total calls across all endpoints
    pub fn total_calls(&self) -> usize {
        self.discover_calls() + self.list_calls() + self.detail_calls()
    }

    /// Highest number of detail calls observed in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    /// Discover pages requested, in arrival order
    pub fn pages_requested(&self) -> Vec<u32> {
        self.state
            .pages
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    /// Query strings of every request, in arrival order
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state
            .queries
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

impl Drop for MockTmdb {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =============================================================================
// Fixture Helpers
// =============================================================================

/// A discover/list item
pub fn movie(id: u64, title: &str, year: i32) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("{title} overview"),
        "poster_path": format!("/{id}.jpg"),
        "release_date": format!("{year}-06-01"),
        "vote_average": 6.5,
        "vote_count": 1000
    })
}

/// A detail response with a single director in the crew
pub fn detail(id: u64, title: &str, year: i32, director: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("{title} full overview"),
        "poster_path": format!("/{id}-detail.jpg"),
        "release_date": format!("{year}-06-01"),
        "vote_average": 7.9,
        "credits": {
            "crew": [
                { "job": "Screenplay", "name": "Someone Else" },
                { "job": "Director", "name": director }
            ]
        }
    })
}

/// A list response with the given items
pub fn list_of(items: Vec<Value>) -> Value {
    json!({ "id": "1", "name": "Fixture list", "items": items })
}

// =============================================================================
// Handlers
// =============================================================================

fn failure(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, FAILURE_BODY).into_response()
}

fn record(state: &MockState, params: &HashMap<String, String>) {
    state
        .queries
        .lock()
        .unwrap_or_else(|err| err.into_inner())
        .push(params.clone());
}

async fn discover(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.discover_calls.fetch_add(1, Ordering::SeqCst);
    record(&state, &params);

    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    state
        .pages
        .lock()
        .unwrap_or_else(|err| err.into_inner())
        .push(page);

    let fixture = &state.fixture;
    if let Some(status) = fixture.discover_status {
        return failure(status);
    }
    if page != 1
        && let Some(status) = fixture.page_status
    {
        return failure(status);
    }

    let results = if fixture.per_decade {
        let from_year: i32 = params
            .get("primary_release_date.gte")
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
            .unwrap_or(0);
        if fixture.failing_decades.contains(&from_year) {
            return failure(500);
        }
        (0..10)
            .map(|i| {
                let id = from_year as u64 * 100 + i as u64;
                movie(id, &format!("Movie {id}"), from_year + i)
            })
            .collect()
    } else {
        fixture.discover_results.clone()
    };

    Json(json!({
        "page": page,
        "total_pages": fixture.total_pages,
        "total_results": results.len(),
        "results": results
    }))
    .into_response()
}

async fn list_by_id(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    record(&state, &params);

    if let Some(status) = state.fixture.list_status {
        return failure(status);
    }
    match state.fixture.lists.get(&id) {
        Some(body) => Json(body.clone()).into_response(),
        None => failure(404),
    }
}

async fn movie_detail(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.detail_calls.fetch_add(1, Ordering::SeqCst);
    record(&state, &params);

    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(now, Ordering::SeqCst);

    if let Some(delay) = state.fixture.detail_delay {
        tokio::time::sleep(delay).await;
    }
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    if state.fixture.failing_details.contains(&id) {
        return failure(500);
    }
    match state.fixture.details.get(&id) {
        Some(body) => Json(body.clone()).into_response(),
        None => failure(404),
    }
}
