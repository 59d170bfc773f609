//! Search domain messages

use medpost_model::{Category, SearchResult};

/// Search domain messages
#[derive(Clone, Debug)]
pub enum Message {
    // User actions
    /// Update search query text
    UpdateQuery(String),
    /// Switch to another permitted category tab
    SetCategory(Category),
    /// Toggle the endorsed-only worker filter
    SetEndorsedOnly(bool),
    /// Search the city resolved from the device location, without debounce
    UseLocation(String),
    /// Clear search and results
    ClearSearch,

    // Internal events
    /// Debounce timer fired for a generation
    SearchDebounced { generation: u64 },
    /// Results received from search execution
    ResultsReceived {
        generation: u64,
        results: Vec<SearchResult>,
    },
    /// Search error occurred
    SearchFailed { generation: u64, error: String },
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateQuery(_) => "Search::UpdateQuery",
            Self::SetCategory(_) => "Search::SetCategory",
            Self::SetEndorsedOnly(_) => "Search::SetEndorsedOnly",
            Self::UseLocation(_) => "Search::UseLocation",
            Self::ClearSearch => "Search::ClearSearch",
            Self::SearchDebounced { .. } => "Search::SearchDebounced",
            Self::ResultsReceived { .. } => "Search::ResultsReceived",
            Self::SearchFailed { .. } => "Search::SearchFailed",
        }
    }
}
