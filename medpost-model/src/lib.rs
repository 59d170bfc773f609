//! Core data model definitions shared across MedPost crates.
#![allow(missing_docs)]

pub mod applications;
pub mod category;
pub mod error;
pub mod ids;
pub mod request;
pub mod results;
pub mod session;

// Intentionally curated re-exports for downstream consumers.
pub use applications::{AppliedJobSet, ApplyButton, JobApplication};
pub use category::{Category, UserRole};
pub use error::ModelError;
pub use ids::RecordId;
pub use request::SearchRequest;
pub use results::{FacilityResult, JobResult, SearchResult, WorkerResult};
pub use session::SessionIdentity;
