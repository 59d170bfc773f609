use medpost_model::Category;
use thiserror::Error;

use crate::infra::api_client::ApiError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Could not read {category} result #{index}: {source}")]
    Record {
        category: Category,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
    /// The one string shown in place of results.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Api(api) => api.user_message(),
            SearchError::Record { .. } => self.to_string(),
        }
    }
}
