//! API service trait and implementations
//!
//! Domains hold an `Arc<dyn ApiService>` so tests can swap the HTTP client
//! for a scripted stub.

use std::fmt::Debug;

use async_trait::async_trait;
use medpost_model::{JobApplication, SearchRequest};
use serde_json::Value;

use crate::infra::api_client::{ApiClient, ApiResult};

/// Generic API service trait for server communication
#[async_trait]
pub trait ApiService: Send + Sync + Debug {
    /// Run one category search. The payload is returned untyped because
    /// endpoints disagree on the envelope.
    async fn search(
        &self,
        request: &SearchRequest,
        token: Option<&str>,
    ) -> ApiResult<Value>;

    /// Applications submitted by the signed-in worker
    async fn fetch_worker_applications(
        &self,
        token: Option<&str>,
    ) -> ApiResult<Vec<JobApplication>>;

    fn base_url(&self) -> &str;
}

#[async_trait]
impl ApiService for ApiClient {
    async fn search(
        &self,
        request: &SearchRequest,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        ApiClient::search(self, request, token).await
    }

    async fn fetch_worker_applications(
        &self,
        token: Option<&str>,
    ) -> ApiResult<Vec<JobApplication>> {
        ApiClient::fetch_worker_applications(self, token).await
    }

    fn base_url(&self) -> &str {
        ApiClient::base_url(self)
    }
}
