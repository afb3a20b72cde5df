//! Markdown serialization (tree → Markdown export)
//!
//! Pipeline: Document → shared walker → [`MarkdownTarget`] → Markdown string
//!
//! Blocks are separated by one blank line, list items by a single newline.
//! Marks are written by wrapping the rendered text. A mark shared by
//! neighbouring spans wraps them once (`**a *b* c**`), and otherwise the
//! nesting order of the delimiters follows [`RenderOptions::mark_order`].

use crate::doc::nodes::{Document, ImageAttrs, Mark};
use crate::render::{
    render_document, HardBreakStyle, ListKind, RenderOptions, RenderTarget, RenderedItem,
};

/// Serialize a document to Markdown
pub fn serialize_to_markdown(doc: &Document, options: &RenderOptions) -> String {
    render_document(doc, &MarkdownTarget::new(options), options)
}

/// Markdown leaf formatting.
pub struct MarkdownTarget {
    bullet_marker: char,
    hard_break: HardBreakStyle,
}

impl MarkdownTarget {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            bullet_marker: options.bullet_marker,
            hard_break: options.hard_break,
        }
    }

    fn item_marker(&self, kind: ListKind, index: usize, checked: Option<bool>) -> String {
        match kind {
            ListKind::Bullet => format!("{} ", self.bullet_marker),
            ListKind::Ordered { start } => format!("{}. ", start.saturating_add(index as u64)),
            ListKind::Task => {
                let check = if checked.unwrap_or(false) { 'x' } else { ' ' };
                format!("{} [{check}] ", self.bullet_marker)
            }
        }
    }
}

impl RenderTarget for MarkdownTarget {
    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn mark(&self, mark: &Mark, inner: String) -> String {
        match mark {
            Mark::Bold => format!("**{inner}**"),
            Mark::Italic => format!("*{inner}*"),
            Mark::Code => format!("`{inner}`"),
            Mark::Strike => format!("~~{inner}~~"),
            Mark::Link { attrs } => match &attrs.title {
                Some(title) => format!("[{inner}]({} \"{title}\")", attrs.href),
                None => format!("[{inner}]({})", attrs.href),
            },
            // No Markdown syntax
            Mark::Underline | Mark::Unknown => inner,
        }
    }

    fn hard_break(&self) -> String {
        match self.hard_break {
            HardBreakStyle::Spaces => "  \n".to_string(),
            HardBreakStyle::Backslash => "\\\n".to_string(),
        }
    }

    fn image(&self, attrs: &ImageAttrs) -> String {
        let alt = attrs.alt.as_deref().unwrap_or("");
        match &attrs.title {
            Some(title) => format!("![{alt}]({} \"{title}\")", attrs.src),
            None => format!("![{alt}]({})", attrs.src),
        }
    }

    fn paragraph(&self, inline: String) -> String {
        inline
    }

    fn heading(&self, level: u8, inline: String) -> String {
        let hashes = "#".repeat(level as usize);
        if inline.is_empty() {
            hashes
        } else {
            format!("{hashes} {inline}")
        }
    }

    fn blockquote(&self, blocks: Vec<String>) -> String {
        self.join_blocks(blocks)
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list(&self, kind: ListKind, items: Vec<RenderedItem>) -> String {
        let mut lines = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let marker = self.item_marker(kind, index, item.checked);
            let indent = " ".repeat(marker.chars().count());
            let body = item.inline.unwrap_or_else(|| item.blocks.join("\n"));

            let mut body_lines = body.split('\n');
            let first = body_lines.next().unwrap_or("");
            if first.is_empty() {
                lines.push(marker.trim_end().to_string());
            } else {
                lines.push(format!("{marker}{first}"));
            }
            for line in body_lines {
                if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
        }
        lines.join("\n")
    }

    fn code_block(&self, language: Option<&str>, code: &str) -> String {
        let language = language.unwrap_or("");
        if code.is_empty() {
            format!("```{language}\n```")
        } else {
            format!("```{language}\n{code}\n```")
        }
    }

    fn horizontal_rule(&self) -> String {
        "---".to_string()
    }

    fn join_blocks(&self, blocks: Vec<String>) -> String {
        blocks.join("\n\n")
    }
}
