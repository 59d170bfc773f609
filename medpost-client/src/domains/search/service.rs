//! Search service executing one request end to end

use std::sync::Arc;
use std::time::Instant;

use medpost_model::{SearchRequest, SearchResult};

use super::error::SearchError;
use super::normalize::{exclude_viewer, normalize_payload, parse_records};
use crate::infra::services::api::ApiService;
use crate::infra::session::SessionContext;

/// Runs a search request against the API and shapes the answer into typed,
/// viewer-filtered results.
#[derive(Debug, Clone)]
pub struct SearchService {
    api: Arc<dyn ApiService>,
    session: SessionContext,
}

impl SearchService {
    pub fn new(api: Arc<dyn ApiService>, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetch, normalize, type and filter. Nothing is returned unless every
    /// step succeeded.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let payload = self.api.search(request, self.session.token()).await?;
        let records = normalize_payload(payload);
        let results = parse_records(request.category, records)?;
        Ok(exclude_viewer(
            request.category,
            self.session.identity(),
            results,
        ))
    }

    /// [`search`](Self::search) with timing logged at info.
    pub async fn search_with_metrics(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let start = Instant::now();

        log::debug!(
            "Search starting - Category: {}, Query: '{}', Endorsed only: {}",
            request.category,
            request.text,
            request.endorsed_only
        );

        let result = self.search(request).await;

        match &result {
            Ok(results) => log::info!(
                "Search completed - Category: {}, Time: {}ms, Results: {}",
                request.category,
                start.elapsed().as_millis(),
                results.len()
            ),
            Err(e) => log::warn!(
                "Search failed - Category: {}, Time: {}ms, Error: {}",
                request.category,
                start.elapsed().as_millis(),
                e
            ),
        }

        result
    }
}
