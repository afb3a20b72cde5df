//! Loading stored content into a document tree.
//!
//! Stored content is either the editor's JSON document or raw Markdown.
//! Callers do not know which, so JSON is attempted first and anything that
//! does not parse as a document is read as Markdown. Loading never fails.

use crate::doc::nodes::Document;
use crate::formats::markdown::parser::parse_from_markdown;
use log::{debug, trace};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// The input was a JSON document tree.
    Json(Document),
    /// The input was not JSON and is to be treated as Markdown text.
    Markdown,
}

impl Source {
    /// Classify raw input without parsing Markdown.
    pub fn detect(input: &str) -> Self {
        let trimmed = input.trim_start();
        if !trimmed.starts_with('{') {
            trace!("input does not start with '{{', treating as markdown");
            return Source::Markdown;
        }
        match serde_json::from_str::<Document>(trimmed) {
            Ok(doc) => Source::Json(doc),
            Err(err) => {
                debug!("input is not a JSON document ({err}), treating as markdown");
                Source::Markdown
            }
        }
    }
}

/// Build a document tree from stored content, JSON first, Markdown otherwise.
pub fn load_document(input: &str) -> Document {
    match Source::detect(input) {
        Source::Json(doc) => doc,
        Source::Markdown => parse_from_markdown(input),
    }
}
