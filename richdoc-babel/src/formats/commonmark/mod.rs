//! CommonMark format implementation
//!
//! A strict alternative to the `markdown` format, for input the line scanner
//! only approximates (setext headings, lazy continuation lines, `_` emphasis,
//! reference links). Both directions go through the `comrak` AST.
//!
//! Only the node kinds the document tree knows are mapped; tables, footnotes,
//! raw HTML and the like are skipped on import.

pub mod parser;
pub mod serializer;

use crate::doc::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::RenderOptions;
use comrak::ComrakOptions;
use std::collections::HashMap;

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Format implementation for CommonMark via comrak
#[derive(Default)]
pub struct CommonMarkFormat {
    options: RenderOptions,
}

impl CommonMarkFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Format for CommonMarkFormat {
    fn name(&self) -> &str {
        "commonmark"
    }

    fn description(&self) -> &str {
        "CommonMark with strike-through and task lists (comrak)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cmark"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_commonmark(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_commonmark(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut render = self.options.clone();
        render.apply_params(options)?;
        serializer::serialize_to_commonmark(doc, &render)
    }
}
