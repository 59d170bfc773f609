//! Search domain types

use std::time::Duration;

use medpost_model::{Category, SearchRequest, SearchResult, UserRole};

use crate::infra::constants::search;
use crate::infra::runtime_config::{LoadingPolicy, RuntimeConfig};

/// The user's current search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub category: Category,
    pub endorsed_only: bool,
}

impl SearchQuery {
    pub fn new(category: Category) -> Self {
        Self {
            text: String::new(),
            category,
            endorsed_only: false,
        }
    }

    /// Endorsed-only worker search ignores the text entirely.
    pub fn is_endorsed_listing(&self) -> bool {
        self.endorsed_only && self.category.supports_endorsed_filter()
    }

    /// The request this input settles into, or `None` for the idle state.
    pub fn to_request(&self) -> Option<SearchRequest> {
        if self.is_endorsed_listing() {
            return Some(SearchRequest::endorsed_workers());
        }

        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        Some(SearchRequest {
            category: self.category,
            text: text.to_string(),
            endorsed_only: false,
        })
    }
}

/// Where the orchestrator is in its input -> request -> commit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search wanted; results and error are empty.
    #[default]
    Idle,
    /// A timer is pending for the current generation.
    Debouncing,
    /// The request for the current generation has been sent.
    InFlight,
    /// The current generation committed results or an error.
    Settled,
}

/// Search domain state
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: SearchQuery,
    /// Categories the viewer's role may search, in display order
    pub allowed_categories: &'static [Category],
    pub results: Vec<SearchResult>,
    pub error: Option<String>,
    /// City last resolved through "use my location"
    pub location_city: Option<String>,
    /// Bumped on every reschedule; only the latest generation may commit
    pub generation: u64,
    pub phase: SearchPhase,
    pub loading_policy: LoadingPolicy,
    pub text_debounce: Duration,
    pub endorsed_debounce: Duration,
}

impl SearchState {
    /// Anonymous viewers get the facility-side categories, like any other
    /// non-worker.
    pub fn new(role: Option<UserRole>, runtime: &RuntimeConfig) -> Self {
        let allowed_categories = role.unwrap_or(UserRole::Facility).allowed_categories();
        let category = allowed_categories
            .first()
            .copied()
            .unwrap_or(Category::Facilities);

        Self {
            query: SearchQuery::new(category),
            allowed_categories,
            results: Vec::new(),
            error: None,
            location_city: None,
            generation: 0,
            phase: SearchPhase::Idle,
            loading_policy: runtime.loading_policy(),
            text_debounce: runtime.text_debounce(),
            endorsed_debounce: runtime.endorsed_debounce(),
        }
    }

    pub fn allows(&self, category: Category) -> bool {
        self.allowed_categories.contains(&category)
    }

    pub fn is_loading(&self) -> bool {
        match self.phase {
            SearchPhase::Debouncing => self.loading_policy == LoadingPolicy::Eager,
            SearchPhase::InFlight => true,
            SearchPhase::Idle | SearchPhase::Settled => false,
        }
    }

    pub fn current_request(&self) -> Option<SearchRequest> {
        self.query.to_request()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.text.clone(),
            category: self.query.category,
            endorsed_only: self.query.endorsed_only,
            allowed_categories: self.allowed_categories,
            results: self.results.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
            phase: self.phase,
            generation: self.generation,
        }
    }
}

/// Immutable view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub category: Category,
    pub endorsed_only: bool,
    pub allowed_categories: &'static [Category],
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SearchPhase,
    pub generation: u64,
}

impl SearchSnapshot {
    /// Placeholder text for an empty list, or `None` when the list area
    /// should show results, a spinner or an error instead.
    pub fn empty_state_message(&self) -> Option<String> {
        if self.loading || self.error.is_some() || !self.results.is_empty() {
            return None;
        }

        match self.phase {
            SearchPhase::Idle => Some(search::IDLE_PROMPT.to_string()),
            SearchPhase::Settled => {
                let query = self.query.trim();
                if query.is_empty() {
                    Some(search::IDLE_PROMPT.to_string())
                } else {
                    Some(format!("No results found for \"{}\".", query))
                }
            }
            SearchPhase::Debouncing | SearchPhase::InFlight => None,
        }
    }
}
