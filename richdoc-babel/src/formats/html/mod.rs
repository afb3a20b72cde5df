//! HTML format implementation
//!
//! Export renders the document tree as an HTML fragment for previews. Import
//! reads HTML back into a tree, so preview output (or pasted HTML) can be
//! converted to the other formats.
//!
//! # Library Choice
//!
//! Export goes through the shared walker with string output; the fragment
//! shape (`<br />`, `<hr />`, no wrapper element) is fixed by the preview
//! consumer. Import uses `html5ever` + `markup5ever_rcdom`, which parse
//! malformed markup the way a browser would.
//!
//! # Element Mapping Table
//!
//! | Tree node        | HTML                                                     | Import also accepts     |
//! |------------------|----------------------------------------------------------|-------------------------|
//! | paragraph        | `<p>`; empty as `<p><br /></p>`                           | loose inline content    |
//! | heading          | `<h1>`–`<h6>`                                            |                         |
//! | bulletList       | `<ul>`                                                   |                         |
//! | orderedList      | `<ol>`, `<ol start="N">` when N ≠ 1                      |                         |
//! | listItem         | `<li>`; single paragraph rendered unwrapped              |                         |
//! | taskList         | `<ul data-type="taskList">`                              |                         |
//! | taskItem         | `<li data-checked>` + disabled checkbox                  | `checked` on the input  |
//! | blockquote       | `<blockquote>`                                           |                         |
//! | codeBlock        | `<pre><code class="language-x">`                          |                         |
//! | image            | `<img src alt title />`                                  |                         |
//! | horizontalRule   | `<hr />`                                                 |                         |
//! | hardBreak        | `<br />`                                                 |                         |
//! | bold / italic    | `<strong>` / `<em>`                                      | `<b>` / `<i>`           |
//! | underline        | `<u>`                                                    |                         |
//! | strike           | `<s>`                                                    | `<strike>`, `<del>`     |
//! | code             | `<code>`                                                 |                         |
//! | link             | `<a href title>`                                         |                         |
//!
//! Links and images whose URL scheme is not http, https or mailto (relative
//! URLs pass) are dropped from the output; the link text is kept.

pub mod fallback;
pub mod parser;
pub mod serializer;

use crate::doc::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::RenderOptions;
use std::collections::HashMap;

pub use fallback::markdown_to_html_fallback;
pub use serializer::serialize_to_html;

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: RenderOptions,
}

impl HtmlFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML preview fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_html(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_html(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut render = self.options.clone();
        render.apply_params(options)?;
        Ok(serializer::serialize_to_html(doc, &render))
    }
}
