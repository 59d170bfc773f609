use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownCategory(String),
    UnknownRole(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownCategory(raw) => {
                write!(f, "unknown search category: {raw}")
            }
            ModelError::UnknownRole(raw) => write!(f, "unknown user type: {raw}"),
        }
    }
}

impl std::error::Error for ModelError {}
