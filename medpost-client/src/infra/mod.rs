//! Infrastructure module containing core utilities and shared components
//!
//! This module provides foundational services used across all domains

pub mod api_client;
pub mod config;
pub mod constants;
pub mod logging;
pub mod runtime_config;
pub mod services;
pub mod session;

// Re-export commonly used items
pub use api_client::{ApiClient, ApiError, ApiResult};
pub use config::{Config, ConfigError};
pub use runtime_config::{LoadingPolicy, RuntimeConfig};
pub use services::ApiService;
pub use session::{SessionContext, SessionError, SessionStore, StoredSession};
