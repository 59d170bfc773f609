//! Runtime configuration for user-adjustable constants
//!
//! This module provides a RuntimeConfig struct with Option<T> fields that override
//! the default constants. Accessor methods fall back to constants when None.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infra::constants::{api, search};

/// When the loading indicator turns on for a scheduled search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPolicy {
    /// Loading as soon as input changes, including the debounce window.
    #[default]
    Eager,
    /// Loading only once the debounce timer fires and the request is sent.
    OnDispatch,
}

impl fmt::Display for LoadingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => write!(f, "Eager"),
            Self::OnDispatch => write!(f, "On dispatch"),
        }
    }
}

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Debounce for free-text searches (ms)
    pub text_debounce_ms: Option<u64>,
    /// Debounce for endorsed-only worker searches (ms)
    pub endorsed_debounce_ms: Option<u64>,
    /// HTTP request timeout (s)
    pub request_timeout_secs: Option<u64>,
    /// Loading indicator policy
    pub loading_policy: Option<LoadingPolicy>,
}

impl RuntimeConfig {
    pub fn text_debounce(&self) -> Duration {
        self.text_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(search::TEXT_DEBOUNCE)
    }

    pub fn endorsed_debounce(&self) -> Duration {
        self.endorsed_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(search::ENDORSED_DEBOUNCE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(api::REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn loading_policy(&self) -> LoadingPolicy {
        self.loading_policy.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_constants() {
        let config = RuntimeConfig::default();
        assert_eq!(config.text_debounce(), Duration::from_millis(600));
        assert_eq!(config.endorsed_debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.loading_policy(), LoadingPolicy::Eager);
    }

    #[test]
    fn overrides_win() {
        let config = RuntimeConfig {
            text_debounce_ms: Some(50),
            loading_policy: Some(LoadingPolicy::OnDispatch),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.text_debounce(), Duration::from_millis(50));
        assert_eq!(config.loading_policy(), LoadingPolicy::OnDispatch);
    }
}
