//! Constants module for centralized configuration values

pub mod api {
    pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
    pub const API_PREFIX: &str = "api";
    pub const API_VERSION: &str = "v1";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

pub mod search {
    use std::time::Duration;

    /// Quiet period before a free-text search is sent.
    pub const TEXT_DEBOUNCE: Duration = Duration::from_millis(600);
    /// Quiet period before an "all endorsed workers" search is sent.
    pub const ENDORSED_DEBOUNCE: Duration = Duration::from_millis(300);

    pub const GENERIC_ERROR: &str = "Search failed. Please try again.";
    pub const IDLE_PROMPT: &str = "Start typing or use your location to search.";
}
