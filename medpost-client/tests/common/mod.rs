//! Test harness for MedPost client domain tests
//!
//! Provides a scripted [`ApiService`] stub and session fixtures. Replies are
//! keyed by the request's query text and can be delayed to reproduce slow
//! or out-of-order responses under paused Tokio time.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use medpost_client::infra::api_client::{ApiError, ApiResult};
use medpost_client::infra::runtime_config::{LoadingPolicy, RuntimeConfig};
use medpost_client::infra::services::ApiService;
use medpost_client::infra::session::SessionContext;
use medpost_model::{JobApplication, RecordId, SearchRequest, SessionIdentity, UserRole};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::time::Instant;

pub const TOKEN: &str = "test-token";

/// One search the stub received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: SearchRequest,
    pub token: Option<String>,
    pub at: Instant,
}

#[derive(Debug, Clone)]
enum Reply {
    Payload(Value),
    Fail(ApiError),
}

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    reply: Reply,
}

/// Scripted stand-in for the HTTP client.
#[derive(Debug)]
pub struct StubApiService {
    replies: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
    applications: Mutex<ApiResult<Vec<JobApplication>>>,
    application_calls: Mutex<Vec<Option<String>>>,
}

impl Default for StubApiService {
    fn default() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            applications: Mutex::new(Ok(Vec::new())),
            application_calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubApiService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer searches for `text` immediately.
    pub fn reply(&self, text: &str, payload: Value) {
        self.reply_after(text, Duration::ZERO, payload);
    }

    /// Answer searches for `text` after `delay` of (virtual) time.
    pub fn reply_after(&self, text: &str, delay: Duration, payload: Value) {
        self.replies.lock().insert(
            text.to_string(),
            Scripted {
                delay,
                reply: Reply::Payload(payload),
            },
        );
    }

    pub fn fail(&self, text: &str, error: ApiError) {
        self.replies.lock().insert(
            text.to_string(),
            Scripted {
                delay: Duration::ZERO,
                reply: Reply::Fail(error),
            },
        );
    }

    pub fn set_applications(&self, applications: ApiResult<Vec<JobApplication>>) {
        *self.applications.lock() = applications;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|call| call.request.text.clone())
            .collect()
    }

    pub fn application_calls(&self) -> Vec<Option<String>> {
        self.application_calls.lock().clone()
    }
}

#[async_trait]
impl ApiService for StubApiService {
    async fn search(&self, request: &SearchRequest, token: Option<&str>) -> ApiResult<Value> {
        self.calls.lock().push(RecordedCall {
            request: request.clone(),
            token: token.map(str::to_string),
            at: Instant::now(),
        });

        // Unscripted queries answer with an empty envelope
        let scripted = self.replies.lock().get(&request.text).cloned();
        let Some(scripted) = scripted else {
            return Ok(json!({ "items": [] }));
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        match scripted.reply {
            Reply::Payload(payload) => Ok(payload),
            Reply::Fail(error) => Err(error),
        }
    }

    async fn fetch_worker_applications(
        &self,
        token: Option<&str>,
    ) -> ApiResult<Vec<JobApplication>> {
        self.application_calls.lock().push(token.map(str::to_string));
        self.applications.lock().clone()
    }

    fn base_url(&self) -> &str {
        "http://stub.invalid"
    }
}

pub fn worker_session(user_id: &str) -> SessionContext {
    SessionContext::new(
        Some(TOKEN.to_string()),
        Some(SessionIdentity::new(RecordId::new(user_id), UserRole::Worker)),
    )
}

pub fn facility_session(user_id: &str) -> SessionContext {
    SessionContext::new(
        Some(TOKEN.to_string()),
        Some(SessionIdentity::new(RecordId::new(user_id), UserRole::Facility)),
    )
}

/// Token and role stored, user id missing.
pub fn worker_role_only_session() -> SessionContext {
    SessionContext::with_role(Some(TOKEN.to_string()), Some(UserRole::Worker))
}

pub fn runtime(policy: LoadingPolicy) -> RuntimeConfig {
    RuntimeConfig {
        loading_policy: Some(policy),
        ..RuntimeConfig::default()
    }
}

pub fn application(id: &str, job_post_id: &str) -> JobApplication {
    JobApplication {
        id: RecordId::new(id),
        job_post_id: Some(RecordId::new(job_post_id)),
        status: Some("pending".to_string()),
    }
}
