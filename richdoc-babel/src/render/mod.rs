//! Document walker shared by every output format.
//!
//! Block-kind coverage lives here, once. An output format only supplies a
//! [`RenderTarget`]: the leaf formatting for text, marks and each block shape.
//! The walker renders children first and hands the target finished strings,
//! so a target never recurses into the tree itself.
//!
//! Nodes the walker does not know (`Block::Unknown`, or an inline node in a
//! block position it cannot place) are dropped from the output rather than
//! reported.

pub mod options;

pub use options::{HardBreakStyle, RenderOptions};

use crate::doc::nodes::{plain_text, Block, Document, ImageAttrs, Mark};
use log::debug;

/// The shape of a list, as far as its item markers are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered { start: u64 },
    Task,
}

/// A rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Checkbox state for task items.
    pub checked: Option<bool>,
    /// The item's rendered child blocks.
    pub blocks: Vec<String>,
    /// Inline rendering of the item when it is a single paragraph.
    pub inline: Option<String>,
}

/// Leaf formatting strategy for one output format.
pub trait RenderTarget {
    /// Plain text, escaped as the format requires.
    fn text(&self, text: &str) -> String;

    /// Wrap already rendered inline content in a mark. Marks the format has no
    /// syntax for return `inner` unchanged.
    fn mark(&self, mark: &Mark, inner: String) -> String;

    fn hard_break(&self) -> String;

    /// An image, inline or on its own.
    fn image(&self, attrs: &ImageAttrs) -> String;

    fn paragraph(&self, inline: String) -> String;

    /// `level` is already clamped to 1..=6.
    fn heading(&self, level: u8, inline: String) -> String;

    fn blockquote(&self, blocks: Vec<String>) -> String;

    fn list(&self, kind: ListKind, items: Vec<RenderedItem>) -> String;

    /// `code` is the raw, unescaped content.
    fn code_block(&self, language: Option<&str>, code: &str) -> String;

    fn horizontal_rule(&self) -> String;

    /// Concatenate top-level or nested blocks.
    fn join_blocks(&self, blocks: Vec<String>) -> String;
}

/// Render a whole document with the given target.
pub fn render_document<T: RenderTarget + ?Sized>(
    doc: &Document,
    target: &T,
    options: &RenderOptions,
) -> String {
    let blocks = render_blocks(&doc.content, target, options);
    target.join_blocks(blocks)
}

/// Render a sequence of sibling blocks, dropping those with no output.
pub fn render_blocks<T: RenderTarget + ?Sized>(
    blocks: &[Block],
    target: &T,
    options: &RenderOptions,
) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|block| render_block(block, target, options))
        .collect()
}

/// Render one block. Returns `None` for nodes with no representation.
pub fn render_block<T: RenderTarget + ?Sized>(
    block: &Block,
    target: &T,
    options: &RenderOptions,
) -> Option<String> {
    match block {
        Block::Paragraph { content } => {
            Some(target.paragraph(render_inline(content, target, options)))
        }
        Block::Heading { attrs, content } => Some(target.heading(
            attrs.level.clamp(1, 6),
            render_inline(content, target, options),
        )),
        Block::BulletList { content } => Some(target.list(
            ListKind::Bullet,
            render_items(content, target, options),
        )),
        Block::OrderedList { attrs, content } => Some(target.list(
            ListKind::Ordered { start: attrs.start },
            render_items(content, target, options),
        )),
        Block::TaskList { content } => Some(target.list(
            ListKind::Task,
            render_items(content, target, options),
        )),
        Block::ListItem { .. } => Some(target.list(
            ListKind::Bullet,
            render_items(std::slice::from_ref(block), target, options),
        )),
        Block::TaskItem { .. } => Some(target.list(
            ListKind::Task,
            render_items(std::slice::from_ref(block), target, options),
        )),
        Block::Blockquote { content } => {
            Some(target.blockquote(render_blocks(content, target, options)))
        }
        Block::CodeBlock { attrs, content } => {
            Some(target.code_block(attrs.language.as_deref(), &plain_text(content)))
        }
        Block::Image { attrs } => Some(target.image(attrs)),
        Block::HorizontalRule => Some(target.horizontal_rule()),
        Block::HardBreak | Block::Text(_) => Some(target.paragraph(render_inline(
            std::slice::from_ref(block),
            target,
            options,
        ))),
        Block::Unknown => {
            debug!("dropping unknown block");
            None
        }
    }
}

fn render_items<T: RenderTarget + ?Sized>(
    items: &[Block],
    target: &T,
    options: &RenderOptions,
) -> Vec<RenderedItem> {
    items
        .iter()
        .map(|item| {
            let (checked, content) = match item {
                Block::ListItem { content } => (None, content.as_slice()),
                Block::TaskItem { attrs, content } => (Some(attrs.checked), content.as_slice()),
                other => (None, std::slice::from_ref(other)),
            };
            let inline = match content {
                [Block::Paragraph { content }] => Some(render_inline(content, target, options)),
                _ => None,
            };
            RenderedItem {
                checked,
                blocks: render_blocks(content, target, options),
                inline,
            }
        })
        .collect()
}

/// Render inline content: spans, hard breaks and inline images.
///
/// A mark shared by consecutive spans is opened once around the whole run.
/// When several marks could open at the same span, the one covering the
/// longest run goes outermost, ties falling back to
/// [`RenderOptions::mark_order`] (first kind innermost).
pub fn render_inline<T: RenderTarget + ?Sized>(
    content: &[Block],
    target: &T,
    options: &RenderOptions,
) -> String {
    render_run(content, &[], target, options)
}

fn render_run<'b, T: RenderTarget + ?Sized>(
    content: &'b [Block],
    open: &[&'b Mark],
    target: &T,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    let mut index = 0;
    while index < content.len() {
        if let Some((mark, len)) = next_mark(&content[index..], open, options) {
            let mut inner_open = open.to_vec();
            inner_open.push(mark);
            let inner = render_run(&content[index..index + len], &inner_open, target, options);
            if !inner.is_empty() {
                out.push_str(&target.mark(mark, inner));
            }
            index += len;
            continue;
        }
        match &content[index] {
            Block::Text(span) => out.push_str(&target.text(&span.text)),
            Block::HardBreak => out.push_str(&target.hard_break()),
            Block::Image { attrs } => out.push_str(&target.image(attrs)),
            Block::Paragraph { content } => {
                out.push_str(&render_run(content, open, target, options))
            }
            other => debug!("dropping {} in inline position", other.type_name()),
        }
        index += 1;
    }
    out
}

/// The outermost mark not yet open on the first node of `content`, with the
/// number of consecutive spans carrying it.
fn next_mark<'b>(
    content: &'b [Block],
    open: &[&'b Mark],
    options: &RenderOptions,
) -> Option<(&'b Mark, usize)> {
    let Some(Block::Text(span)) = content.first() else {
        return None;
    };
    let mut best: Option<(&'b Mark, usize)> = None;
    for kind in options.mark_order.iter().rev() {
        let Some(mark) = span.mark(*kind) else {
            continue;
        };
        if open.contains(&mark) {
            continue;
        }
        let run = content
            .iter()
            .take_while(|node| matches!(node, Block::Text(next) if next.marks.contains(mark)))
            .count();
        if best.map_or(true, |(_, longest)| run > longest) {
            best = Some((mark, run));
        }
    }
    best
}
