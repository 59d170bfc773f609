//! Search domain - debounced category search for the marketplace

pub mod debounce;
pub mod error;
pub mod messages;
pub mod normalize;
pub mod orchestrator;
pub mod service;
pub mod types;
pub mod update;

pub use self::debounce::ScheduledSearch;
pub use self::error::SearchError;
pub use self::messages::Message;
pub use self::orchestrator::SearchOrchestrator;
pub use self::service::SearchService;
pub use self::types::{SearchPhase, SearchQuery, SearchSnapshot, SearchState};
pub use self::update::SearchTask;
