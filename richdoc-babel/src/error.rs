//! Error types for format operations
//!
//! The converters themselves never fail: malformed input degrades the output
//! instead. These errors belong to the registry layer around them.

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing (only strict formats such as `json` report these)
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the operation or option
    NotSupported(String),
    /// An option value could not be understood
    InvalidOption { key: String, value: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidOption { key, value } => {
                write!(f, "Invalid value '{value}' for option '{key}'")
            }
        }
    }
}

impl std::error::Error for FormatError {}
