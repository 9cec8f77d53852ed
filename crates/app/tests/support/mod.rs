//! In-process fake of the Story Spoiler API.
//!
//! Binds to an ephemeral local port and serves the five endpoints the suite
//! touches. Every story route requires `Authorization: Bearer <TOKEN>`.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use spoiler_infrastructure::SuiteConfig;
use tokio::task::JoinHandle;
use url::Url;

/// Account the fake accepts.
pub const USERNAME: &str = "ico1";
/// Password the fake accepts.
pub const PASSWORD: &str = "ico1ico1";
/// Token issued on login.
pub const TOKEN: &str = "fake-access-token";

/// Deviations from the well-behaved service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    /// Create answers 201 without a `storyId`.
    pub create_omits_story_id: bool,
    /// Successful deletes answer 204 with no body.
    pub delete_returns_no_content: bool,
    /// List answers a JSON object instead of an array.
    pub list_returns_object: bool,
}

#[derive(Debug, Default)]
struct Inner {
    stories: BTreeMap<String, Value>,
    next_id: u64,
    requests: Vec<String>,
    titles: Vec<String>,
    unauthorized: usize,
}

#[derive(Clone)]
struct FakeApi {
    inner: Arc<Mutex<Inner>>,
    behavior: Behavior,
}

impl FakeApi {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, line: String) {
        self.lock().requests.push(line);
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {TOKEN}");
        let ok = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected);
        if !ok {
            self.lock().unauthorized += 1;
        }
        ok
    }
}

/// A running fake server. Aborted on drop.
pub struct FakeServer {
    /// Bound address.
    pub addr: SocketAddr,
    api: FakeApi,
    handle: JoinHandle<()>,
}

impl FakeServer {
    /// Starts a well-behaved fake.
    pub async fn start() -> Self {
        Self::start_with(Behavior::default()).await
    }

    /// Starts a fake with the given deviations.
    pub async fn start_with(behavior: Behavior) -> Self {
        let api = FakeApi {
            inner: Arc::new(Mutex::new(Inner::default())),
            behavior,
        };

        let router = Router::new()
            .route("/api/User/Authentication", post(authenticate))
            .route("/api/Story/Create", post(create_story))
            .route("/api/Story/Edit/{id}", put(edit_story))
            .route("/api/Story/All", get(list_stories))
            .route("/api/Story/Delete/{id}", delete(delete_story))
            .with_state(api.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake server");
        });

        Self { addr, api, handle }
    }

    /// Suite configuration pointing at this server with the accepted account.
    pub fn config(&self) -> SuiteConfig {
        SuiteConfig::default().with_base_url(self.base_url())
    }

    /// Root URL of this server.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Requests received, as `"METHOD /path"`, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.api.lock().requests.clone()
    }

    /// Titles received by create and edit, in arrival order.
    pub fn titles(&self) -> Vec<String> {
        self.api.lock().titles.clone()
    }

    /// Story requests rejected for a missing or wrong bearer token.
    pub fn unauthorized(&self) -> usize {
        self.api.lock().unauthorized
    }

    /// Stories currently stored.
    pub fn story_count(&self) -> usize {
        self.api.lock().stories.len()
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn non_blank<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

async fn authenticate(State(api): State<FakeApi>, Json(body): Json<Value>) -> Response {
    api.record("POST /api/User/Authentication".to_string());

    let user = body.get("userName").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if user == Some(USERNAME) && password == Some(PASSWORD) {
        reply(StatusCode::OK, json!({ "accessToken": TOKEN }))
    } else {
        reply(StatusCode::UNAUTHORIZED, json!({ "msg": "Invalid credentials" }))
    }
}

async fn create_story(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record("POST /api/Story/Create".to_string());
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let (Some(title), Some(description)) = (non_blank(&body, "title"), non_blank(&body, "description"))
    else {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "errors": { "Title": ["The Title field is required."] } }),
        );
    };

    let mut inner = api.lock();
    inner.next_id += 1;
    let id = format!("story-{}", inner.next_id);
    inner.titles.push(title.to_string());
    inner.stories.insert(
        id.clone(),
        json!({ "id": id, "title": title, "description": description, "url": "" }),
    );
    drop(inner);

    if api.behavior.create_omits_story_id {
        reply(StatusCode::CREATED, json!({ "msg": "Successfully created!" }))
    } else {
        reply(
            StatusCode::CREATED,
            json!({ "storyId": id, "msg": "Successfully created!" }),
        )
    }
}

async fn edit_story(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    api.record(format!("PUT /api/Story/Edit/{id}"));
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut inner = api.lock();
    if let Some(title) = non_blank(&body, "title") {
        inner.titles.push(title.to_string());
    }
    match inner.stories.get_mut(&id) {
        Some(story) => {
            story["title"] = body.get("title").cloned().unwrap_or(Value::Null);
            story["description"] = body.get("description").cloned().unwrap_or(Value::Null);
            reply(StatusCode::OK, json!({ "msg": "Successfully edited" }))
        }
        None => reply(StatusCode::NOT_FOUND, json!({ "msg": "No spoilers..." })),
    }
}

async fn list_stories(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    api.record("GET /api/Story/All".to_string());
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let stories: Vec<Value> = api.lock().stories.values().cloned().collect();
    if api.behavior.list_returns_object {
        reply(StatusCode::OK, json!({ "items": stories }))
    } else {
        reply(StatusCode::OK, Value::Array(stories))
    }
}

async fn delete_story(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    api.record(format!("DELETE /api/Story/Delete/{id}"));
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let removed = api.lock().stories.remove(&id).is_some();
    match (removed, api.behavior.delete_returns_no_content) {
        (true, true) => StatusCode::NO_CONTENT.into_response(),
        (true, false) => reply(StatusCode::OK, json!({ "msg": "Deleted successfully!" })),
        (false, _) => reply(
            StatusCode::BAD_REQUEST,
            json!({ "msg": "Unable to delete this story spoiler!" }),
        ),
    }
}
