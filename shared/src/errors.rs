//! Error types for the Fitness Coach workspace

use thiserror::Error;

/// Errors raised when turning user or host input into workspace values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Unknown plan section: {0} (expected workout, diet or all)")]
    UnknownSection(String),

    #[error("Unknown item type: {0} (expected exercise or food)")]
    UnknownItemKind(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
