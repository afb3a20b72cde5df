//! HTML preview of stored content.
//!
//! A preview request carries whatever the editor stored, either a JSON tree
//! or raw Markdown, and gets back `{"html": "..."}`. JSON always renders
//! through the tree. Raw Markdown either goes through the tree as well, or,
//! in [`PreviewMode::Regex`], through the plain substitution cascade in
//! [`markdown_to_html_fallback`].

use crate::doc::load::Source;
use crate::formats::html::{markdown_to_html_fallback, serialize_to_html};
use crate::formats::markdown::parser::parse_from_markdown;
use crate::render::RenderOptions;
use log::debug;
use serde::{Deserialize, Serialize};

/// How raw Markdown input is turned into preview HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Parse into a tree and render it.
    #[default]
    Tree,
    /// Regex substitution straight to HTML, without building a tree.
    Regex,
}

impl PreviewMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "tree" => Some(PreviewMode::Tree),
            "regex" => Some(PreviewMode::Regex),
            _ => None,
        }
    }
}

/// Body of a preview response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// Render stored content as preview HTML.
pub fn preview(input: &str, options: &RenderOptions, mode: PreviewMode) -> PreviewResponse {
    let html = match (Source::detect(input), mode) {
        (Source::Json(doc), _) => serialize_to_html(&doc, options),
        (Source::Markdown, PreviewMode::Tree) => {
            serialize_to_html(&parse_from_markdown(input), options)
        }
        (Source::Markdown, PreviewMode::Regex) => {
            debug!("previewing raw markdown with the regex cascade");
            markdown_to_html_fallback(input)
        }
    };
    PreviewResponse { html }
}
