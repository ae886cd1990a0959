//! Fake NoteHub API served by axum on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
const TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    notes: Vec<Value>,
    next_id: u64,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct FakeNoteHub {
    inner: Arc<Mutex<Inner>>,
}

pub fn note_json(id: &str, title: &str, tag: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "",
        "tag": tag,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP,
    })
}

impl FakeNoteHub {
    pub fn with_notes(titles: &[(&str, &str)]) -> Self {
        let hub = FakeNoteHub::default();
        {
            let mut inner = hub.inner.lock().unwrap();
            for (id, title) in titles {
                inner.notes.push(note_json(id, title, "Todo"));
            }
            inner.next_id = 1000;
        }
        hub
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn note_count(&self) -> usize {
        self.inner.lock().unwrap().notes.len()
    }

    /// Serve on 127.0.0.1 and return the API root URL.
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route("/api/notes", get(list_notes).post(create_note))
            .route("/api/notes/{id}", delete(delete_note))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn record(&self, method: &'static str, path: String, query: Option<String>, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.inner.lock().unwrap().requests.push(Recorded {
            method,
            path,
            query,
            authorization,
            body,
        });
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn list_notes(
    State(hub): State<FakeNoteHub>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hub.record("GET", "/api/notes".into(), raw, &headers, None);
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid or missing token");
    }

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let per_page: usize = params.get("perPage").and_then(|p| p.parse().ok()).unwrap_or(12);
    let search = params.get("search").map(|s| s.to_lowercase());

    let inner = hub.inner.lock().unwrap();
    let matching: Vec<&Value> = inner
        .notes
        .iter()
        .filter(|n| match &search {
            Some(term) => n["title"].as_str().unwrap_or("").to_lowercase().contains(term),
            None => true,
        })
        .collect();
    let total_pages = matching.len().div_ceil(per_page);
    let notes: Vec<Value> = matching
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Json(json!({
        "notes": notes,
        "totalPages": total_pages,
        "page": page,
        "perPage": per_page,
        "totalNotes": inner.notes.len(),
    }))
    .into_response()
}

async fn create_note(
    State(hub): State<FakeNoteHub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    hub.record("POST", "/api/notes".into(), None, &headers, Some(body.clone()));
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid or missing token");
    }

    let title = body["title"].as_str().unwrap_or("");
    if title.len() < 3 {
        return error(StatusCode::BAD_REQUEST, "title must be at least 3 characters");
    }

    let mut inner = hub.inner.lock().unwrap();
    inner.next_id += 1;
    let id = inner.next_id.to_string();
    let mut note = note_json(&id, title, body["tag"].as_str().unwrap_or("Todo"));
    if let Some(content) = body.get("content") {
        note["content"] = content.clone();
    }
    inner.notes.push(note.clone());

    (StatusCode::CREATED, Json(note)).into_response()
}

async fn delete_note(
    State(hub): State<FakeNoteHub>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    hub.record("DELETE", format!("/api/notes/{}", id), None, &headers, None);
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid or missing token");
    }

    let mut inner = hub.inner.lock().unwrap();
    match inner.notes.iter().position(|n| n["id"] == id.as_str()) {
        Some(pos) => Json(inner.notes.remove(pos)).into_response(),
        None => error(StatusCode::NOT_FOUND, "Note not found"),
    }
}
