//! Thin HTTP adapter over `reqwest` for the NoteHub notes collection.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::entity::{Note, NoteDraft, PageResult};
use crate::error::{NotehubError, Result};

/// HTTP client bound to one API root and bearer token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    notes_url: Url,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let notes_url = Url::parse(&config.notes_url())
            .map_err(|e| NotehubError::Config(format!("Invalid API URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| NotehubError::Config("Token contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NotehubError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { notes_url, client })
    }

    pub fn notes_url(&self) -> &Url {
        &self.notes_url
    }

    /// `GET /notes` with the given query pairs.
    pub async fn list(&self, query: &[(&str, String)]) -> Result<PageResult> {
        let request = self.client.get(self.notes_url.clone()).query(query);
        self.execute(Method::GET, request, "notes").await
    }

    /// `POST /notes`.
    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let request = self.client.post(self.notes_url.clone()).json(draft);
        self.execute(Method::POST, request, "notes").await
    }

    /// `DELETE /notes/{id}`.
    pub async fn delete(&self, id: &str) -> Result<Note> {
        let url = self.note_url(id)?;
        let request = self.client.delete(url);
        self.execute(Method::DELETE, request, id).await
    }

    fn note_url(&self, id: &str) -> Result<Url> {
        let mut url = self.notes_url.clone();
        url.path_segments_mut()
            .map_err(|_| NotehubError::Config("API URL cannot be a base".into()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        debug!(%method, resource, "sending request");

        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            debug!(%method, resource, status = status.as_u16(), "request failed");
            return Err(status_error(status, &method, resource, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn transport_error(e: reqwest::Error) -> NotehubError {
    if e.is_timeout() {
        NotehubError::Network(format!("request timed out: {}", e))
    } else {
        NotehubError::Network(e.to_string())
    }
}

/// Map a non-2xx response onto the error taxonomy.
pub(crate) fn status_error(
    status: StatusCode,
    method: &Method,
    resource: &str,
    body: &str,
) -> NotehubError {
    let message = server_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NotehubError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => NotehubError::NotFound(resource.to_string()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY if *method == Method::POST => {
            NotehubError::Validation(message)
        }
        _ => NotehubError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// Prefer the JSON `message` field, fall back to the raw body, then the
/// status reason.
fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
