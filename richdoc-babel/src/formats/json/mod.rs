//! JSON format implementation
//!
//! The editor's native document shape, `{"type": "doc", "content": [...]}`.
//! Unlike [`load_document`](crate::doc::load_document), parsing here is strict:
//! input that is not a JSON document is an error rather than Markdown.

use crate::doc::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for the editor's JSON document
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Editor JSON document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
