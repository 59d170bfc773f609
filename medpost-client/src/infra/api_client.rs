use std::time::Duration;

use anyhow::Context;
use log::{debug, info, warn};
use medpost_model::{JobApplication, SearchRequest};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::infra::config::Config;
use crate::infra::constants::{api, search};

/// Failure talking to the marketplace API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The body was not the JSON we expected.
    #[error("Could not read server response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Single display string for the UI. Server messages are passed through
    /// untouched; transport and parse failures keep their prefix so they can
    /// be told apart.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            search::GENERIC_ERROR.to_string()
        } else {
            message
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Pull a human-readable message out of an error body.
///
/// FastAPI-style `{"detail": "..."}` comes first, then validation lists
/// (`{"detail": [{"msg": "..."}]}`), then `message` / `error` fields or a bare
/// JSON string, then the raw text.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| message_from_value(&value));

    if let Some(message) = from_json {
        return message;
    }

    let text = body.trim();
    if !text.is_empty() && !text.starts_with(['{', '[', '"']) {
        return text.to_string();
    }

    if status == StatusCode::UNAUTHORIZED {
        "Unauthorized - please login again".to_string()
    } else {
        format!("Request failed with status {}", status.as_u16())
    }
}

fn message_from_value(value: &Value) -> Option<String> {
    if let Value::String(message) = value {
        let message = message.trim();
        return (!message.is_empty()).then(|| message.to_string());
    }

    for key in ["detail", "message", "error"] {
        match value.get(key) {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                return Some(message.clone());
            }
            Some(Value::Array(entries)) => {
                let joined = entries
                    .iter()
                    .filter_map(|entry| {
                        entry
                            .get("msg")
                            .and_then(Value::as_str)
                            .or_else(|| entry.as_str())
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            _ => {}
        }
    }
    None
}

/// HTTP client for the marketplace REST API
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    api_version: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        // Many users will provide "localhost:8000" which reqwest rejects.
        // Add http:// if missing and trim a trailing slash to prevent double slashes.
        fn normalize(raw: String) -> String {
            let trimmed = raw.trim().trim_end_matches('/').to_string();
            let with_scheme = if trimmed.starts_with("http://")
                || trimmed.starts_with("https://")
            {
                trimmed
            } else {
                format!("http://{}", trimmed)
            };
            if with_scheme != raw {
                warn!(
                    "[ApiClient] Normalized base URL from '{}' to '{}'",
                    raw, with_scheme
                );
            }
            with_scheme
        }

        let base_url = normalize(base_url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self {
            client,
            base_url,
            api_version: api::API_VERSION.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.server_url.clone(),
            config.runtime_config().request_timeout(),
        )
    }

    /// Build a versioned API URL
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        let path = p.trim_start_matches('/');
        if path.starts_with(api::API_PREFIX) {
            format!("{}/{}", self.base_url, path)
        } else {
            format!(
                "{}/{}/{}/{}",
                self.base_url,
                api::API_PREFIX,
                self.api_version,
                path
            )
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the bearer token when there is one. Requests without a token
    /// are still sent; the server decides whether it accepts them.
    pub fn build_request(
        &self,
        builder: RequestBuilder,
        token: Option<&str>,
    ) -> RequestBuilder {
        match token {
            Some(token) => {
                builder.header("Authorization", format!("Bearer {}", token))
            }
            None => builder,
        }
    }

    /// Execute a request and decode the body as untyped JSON.
    ///
    /// An empty success body decodes as `null`.
    async fn execute_request(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&body)
                .map_err(|e| ApiError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        warn!(
            "[ApiClient] Request failed with status {}: {}",
            status, message
        );
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// GET request returning untyped JSON
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> ApiResult<Value> {
        let url = self.build_url(path);
        debug!("[ApiClient] GET {} {:?}", url, query);

        let request = self.client.get(&url).query(query);
        let request = self.build_request(request, token);
        self.execute_request(request).await
    }

    /// Run a category search and return the raw payload
    pub async fn search(
        &self,
        request: &SearchRequest,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        self.get_json(&request.path(), &request.query_params(), token)
            .await
    }

    /// List the signed-in worker's job applications
    pub async fn fetch_worker_applications(
        &self,
        token: Option<&str>,
    ) -> ApiResult<Vec<JobApplication>> {
        let payload = self
            .get_json("jobs/applications/worker", &[], token)
            .await?;
        serde_json::from_value(payload).map_err(|e| ApiError::Parse(e.to_string()))
    }
}
