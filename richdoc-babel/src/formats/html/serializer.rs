//! HTML serialization (tree → HTML preview)
//!
//! Pipeline: Document → shared walker → [`HtmlTarget`] → HTML fragment
//!
//! The output is a fragment, not a page: blocks are concatenated with no
//! separator and no wrapper element. Text and attribute values are escaped;
//! link targets and image sources outside the allowed schemes are dropped.

use crate::common::links::is_safe_url;
use crate::doc::nodes::{Document, ImageAttrs, Mark};
use crate::render::{render_document, ListKind, RenderOptions, RenderTarget, RenderedItem};
use log::debug;

/// Serialize a document to an HTML fragment
pub fn serialize_to_html(doc: &Document, options: &RenderOptions) -> String {
    render_document(doc, &HtmlTarget, options)
}

/// HTML leaf formatting.
pub struct HtmlTarget;

impl RenderTarget for HtmlTarget {
    fn text(&self, text: &str) -> String {
        html_escape(text)
    }

    fn mark(&self, mark: &Mark, inner: String) -> String {
        match mark {
            Mark::Bold => format!("<strong>{inner}</strong>"),
            Mark::Italic => format!("<em>{inner}</em>"),
            Mark::Underline => format!("<u>{inner}</u>"),
            Mark::Strike => format!("<s>{inner}</s>"),
            Mark::Code => format!("<code>{inner}</code>"),
            Mark::Link { attrs } => {
                if !is_safe_url(&attrs.href) {
                    debug!("dropping link with disallowed href {:?}", attrs.href);
                    return inner;
                }
                let title = attrs
                    .title
                    .as_deref()
                    .map(|title| format!(" title=\"{}\"", html_escape(title)))
                    .unwrap_or_default();
                format!("<a href=\"{}\"{title}>{inner}</a>", html_escape(&attrs.href))
            }
            Mark::Unknown => inner,
        }
    }

    fn hard_break(&self) -> String {
        "<br />".to_string()
    }

    fn image(&self, attrs: &ImageAttrs) -> String {
        if !is_safe_url(&attrs.src) {
            debug!("dropping image with disallowed src {:?}", attrs.src);
            return String::new();
        }
        let mut out = format!(
            "<img src=\"{}\" alt=\"{}\"",
            html_escape(&attrs.src),
            html_escape(attrs.alt.as_deref().unwrap_or(""))
        );
        if let Some(title) = &attrs.title {
            out.push_str(&format!(" title=\"{}\"", html_escape(title)));
        }
        out.push_str(" />");
        out
    }

    fn paragraph(&self, inline: String) -> String {
        if inline.is_empty() {
            // Keeps empty lines visible in the preview
            "<p><br /></p>".to_string()
        } else {
            format!("<p>{inline}</p>")
        }
    }

    fn heading(&self, level: u8, inline: String) -> String {
        format!("<h{level}>{inline}</h{level}>")
    }

    fn blockquote(&self, blocks: Vec<String>) -> String {
        format!("<blockquote>{}</blockquote>", blocks.concat())
    }

    fn list(&self, kind: ListKind, items: Vec<RenderedItem>) -> String {
        let (open, close) = match kind {
            ListKind::Bullet => ("<ul>".to_string(), "</ul>"),
            ListKind::Ordered { start: 1 } => ("<ol>".to_string(), "</ol>"),
            ListKind::Ordered { start } => (format!("<ol start=\"{start}\">"), "</ol>"),
            ListKind::Task => ("<ul data-type=\"taskList\">".to_string(), "</ul>"),
        };

        let mut out = open;
        for item in items {
            let body = item.inline.unwrap_or_else(|| item.blocks.concat());
            match item.checked {
                Some(checked) => {
                    let attr = if checked { " checked" } else { "" };
                    out.push_str(&format!(
                        "<li data-checked=\"{checked}\"><input type=\"checkbox\"{attr} disabled />{body}</li>"
                    ));
                }
                None => out.push_str(&format!("<li>{body}</li>")),
            }
        }
        out.push_str(close);
        out
    }

    fn code_block(&self, language: Option<&str>, code: &str) -> String {
        match language.filter(|lang| !lang.is_empty()) {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                html_escape(lang),
                html_escape(code)
            ),
            None => format!("<pre><code>{}</code></pre>", html_escape(code)),
        }
    }

    fn horizontal_rule(&self) -> String {
        "<hr />".to_string()
    }

    fn join_blocks(&self, blocks: Vec<String>) -> String {
        blocks.concat()
    }
}

/// Escape HTML special characters in text
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
