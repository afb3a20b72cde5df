//! Markdown format implementation
//!
//! Bidirectional conversion between the document tree and the flat Markdown
//! the site stores. Parsing is a line scanner ([`parser`]) over an ordered
//! inline pattern table ([`inline`]); serialization is the shared walker with a
//! Markdown target ([`serializer`]).
//!
//! # Element Mapping Table
//!
//! | Tree node        | Markdown                  | Notes                                   |
//! |------------------|---------------------------|-----------------------------------------|
//! | heading          | `#`×level + space         | levels above 6 are clamped              |
//! | paragraph        | inline text               | blocks separated by one blank line      |
//! | bulletList       | `- item`                  | marker configurable (`-`, `*`, `+`)     |
//! | orderedList      | `N. item`                 | numbering starts at `attrs.start`       |
//! | taskList         | `- [ ] item` / `- [x]`    |                                         |
//! | blockquote       | `> ` on every line        | `>` alone on blank lines                |
//! | codeBlock        | triple backtick fence     | language as info string                 |
//! | image            | `![alt](src "title")`     | standalone line on import               |
//! | horizontalRule   | `---`                     | `***` and `___` accepted on import      |
//! | hardBreak        | two spaces + newline      | or backslash + newline                  |
//! | bold / italic    | `**x**` / `*x*`           |                                         |
//! | code / strike    | `` `x` `` / `~~x~~`       |                                         |
//! | link             | `[x](href "title")`       |                                         |
//! | underline        | (none)                    | lossy: exported as plain text           |
//!
//! # Lossy Conversions
//!
//! - Underline and unknown marks are dropped.
//! - Unknown blocks produce no output.
//! - Empty paragraphs disappear; consecutive blank lines collapse.
//! - Text containing Markdown syntax is not escaped and may re-parse as markup.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::doc::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::RenderOptions;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Default)]
pub struct MarkdownFormat {
    options: RenderOptions,
}

impl MarkdownFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown as stored by the editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut render = self.options.clone();
        render.apply_params(options)?;
        Ok(serializer::serialize_to_markdown(doc, &render))
    }
}
