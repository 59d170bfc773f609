//! MedPost search client library
//!
//! This crate contains the search surfaces used by the executable in
//! `src/main.rs`: the debounced search orchestrator, the applied-jobs
//! tracker, and the HTTP/session/config infrastructure they sit on.
//!
//! Notes
//! - Rendering is left to the embedding application; domains expose
//!   immutable snapshots and typed results.
//! - Public items are subject to change while the API stabilizes.

pub mod domains;
pub mod infra;

pub use domains::applications::AppliedJobsTracker;
pub use domains::search::{SearchOrchestrator, SearchSnapshot};
pub use infra::api_client::{ApiClient, ApiError};
pub use infra::config::Config;
pub use infra::session::SessionContext;
