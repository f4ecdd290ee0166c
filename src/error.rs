//! Error types for Scopegate

use thiserror::Error;

/// Errors from parsing wire names into the closed vocabulary.
///
/// Decision functions never return these; they are total and fail closed.
/// Parsing is the only fallible surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown permission `{0}`")]
    UnknownPermission(String),

    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("unknown data scope `{0}`")]
    UnknownScope(String),
}

/// Result type alias for Scopegate parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
