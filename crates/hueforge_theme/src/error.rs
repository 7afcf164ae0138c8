//! Theme engine error types

use thiserror::Error;

/// Errors raised at the fallible edges of the engine.
///
/// Compilation itself never fails; these cover record parsing and
/// caller-supplied identifiers.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A whole theme or palette record could not be parsed
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Quick customization category not recognized
    #[error("unknown quick customization category: {0}")]
    UnknownCategory(String),

    /// Quick customization value not valid for its category
    #[error("unknown value {value:?} for quick customization {category}")]
    UnknownQuickValue { category: String, value: String },

    /// Property path is empty or addresses a list element that is not there
    #[error("invalid property path: {0}")]
    InvalidPath(String),

    /// Unrecognized color mode name
    #[error("unknown color mode: {0}")]
    UnknownMode(String),
}

/// Result type for theme engine operations
pub type Result<T> = std::result::Result<T, ThemeError>;
