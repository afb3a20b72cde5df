//! CommonMark serialization (tree → CommonMark export)
//!
//! Pipeline: Document → Comrak AST → `format_commonmark`
//!
//! Comrak decides escaping and spacing, so the output is canonical CommonMark
//! rather than the lightweight dialect of the `markdown` format.

use super::default_comrak_options;
use crate::doc::nodes::{plain_text, Block, Document, ImageAttrs, Mark, MarkKind, Span};
use crate::error::FormatError;
use crate::render::RenderOptions;
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena};
use log::debug;
use std::cell::RefCell;

/// Serialize a document to CommonMark
pub fn serialize_to_commonmark(
    doc: &Document,
    options: &RenderOptions,
) -> Result<String, FormatError> {
    let arena = Arena::new();
    let builder = AstBuilder {
        arena: &arena,
        options,
    };
    let root = builder.node(NodeValue::Document);
    for block in &doc.content {
        builder.block(root, block);
    }

    let mut output = Vec::new();
    format_commonmark(root, &default_comrak_options(), &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

    // Comrak separates consecutive lists with an HTML comment
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

struct AstBuilder<'a, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o RenderOptions,
}

impl<'a> AstBuilder<'a, '_> {
    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
    }

    fn child(&self, parent: &'a AstNode<'a>, value: NodeValue) -> &'a AstNode<'a> {
        let node = self.node(value);
        parent.append(node);
        node
    }

    fn list_value(&self, ordered: Option<u64>) -> NodeList {
        NodeList {
            list_type: if ordered.is_some() {
                ListType::Ordered
            } else {
                ListType::Bullet
            },
            marker_offset: 0,
            padding: 0,
            start: ordered.unwrap_or(1) as usize,
            delimiter: ListDelimType::Period,
            bullet_char: self.options.bullet_marker as u8,
            tight: true,
        }
    }

    fn block(&self, parent: &'a AstNode<'a>, block: &Block) {
        match block {
            Block::Paragraph { content } => {
                let para = self.child(parent, NodeValue::Paragraph);
                self.inline(para, content);
            }
            Block::Heading { attrs, content } => {
                let heading = self.child(
                    parent,
                    NodeValue::Heading(NodeHeading {
                        level: attrs.level.clamp(1, 6),
                        setext: false,
                    }),
                );
                self.inline(heading, content);
            }
            Block::BulletList { content } | Block::TaskList { content } => {
                self.list(parent, None, content)
            }
            Block::OrderedList { attrs, content } => self.list(parent, Some(attrs.start), content),
            Block::ListItem { .. } | Block::TaskItem { .. } => {
                self.list(parent, None, std::slice::from_ref(block))
            }
            Block::Blockquote { content } => {
                let quote = self.child(parent, NodeValue::BlockQuote);
                for child in content {
                    self.block(quote, child);
                }
            }
            Block::CodeBlock { attrs, content } => {
                let mut literal = plain_text(content);
                literal.push('\n');
                self.child(
                    parent,
                    NodeValue::CodeBlock(NodeCodeBlock {
                        fenced: true,
                        fence_char: b'`',
                        fence_length: 3,
                        fence_offset: 0,
                        info: attrs.language.clone().unwrap_or_default(),
                        literal,
                    }),
                );
            }
            Block::Image { attrs } => {
                let para = self.child(parent, NodeValue::Paragraph);
                self.image(para, attrs);
            }
            Block::HorizontalRule => {
                self.child(parent, NodeValue::ThematicBreak);
            }
            Block::HardBreak | Block::Text(_) => {
                let para = self.child(parent, NodeValue::Paragraph);
                self.inline(para, std::slice::from_ref(block));
            }
            Block::Unknown => debug!("dropping unknown block"),
        }
    }

    fn list(&self, parent: &'a AstNode<'a>, ordered: Option<u64>, items: &[Block]) {
        let list = self.child(parent, NodeValue::List(self.list_value(ordered)));
        for item in items {
            let (value, content) = match item {
                Block::TaskItem { attrs, content } => (
                    NodeValue::TaskItem(attrs.checked.then_some('x')),
                    content.as_slice(),
                ),
                Block::ListItem { content } => {
                    (NodeValue::Item(self.list_value(ordered)), content.as_slice())
                }
                other => (
                    NodeValue::Item(self.list_value(ordered)),
                    std::slice::from_ref(other),
                ),
            };
            let item_node = self.child(list, value);
            for child in content {
                self.block(item_node, child);
            }
        }
    }

    fn inline(&self, parent: &'a AstNode<'a>, content: &[Block]) {
        for node in content {
            match node {
                Block::Text(span) => self.span(parent, span),
                Block::HardBreak => {
                    self.child(parent, NodeValue::LineBreak);
                }
                Block::Image { attrs } => self.image(parent, attrs),
                other => debug!("dropping {} in inline position", other.type_name()),
            }
        }
    }

    /// Wrap the span's text in one node per mark, outermost first.
    fn span(&self, parent: &'a AstNode<'a>, span: &Span) {
        if span.text.is_empty() {
            return;
        }
        let mut target = parent;
        for kind in self.options.mark_order.iter().rev() {
            let Some(mark) = span.mark(*kind) else {
                continue;
            };
            let value = match mark {
                Mark::Bold => NodeValue::Strong,
                Mark::Italic => NodeValue::Emph,
                Mark::Strike => NodeValue::Strikethrough,
                Mark::Link { attrs } => NodeValue::Link(NodeLink {
                    url: attrs.href.clone(),
                    title: attrs.title.clone().unwrap_or_default(),
                }),
                // Code is the leaf itself; underline has no CommonMark syntax
                Mark::Code | Mark::Underline | Mark::Unknown => continue,
            };
            target = self.child(target, value);
        }

        let leaf = if span.mark(MarkKind::Code).is_some() {
            NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: span.text.clone(),
            })
        } else {
            NodeValue::Text(span.text.clone())
        };
        self.child(target, leaf);
    }

    fn image(&self, parent: &'a AstNode<'a>, attrs: &ImageAttrs) {
        let image = self.child(
            parent,
            NodeValue::Image(NodeLink {
                url: attrs.src.clone(),
                title: attrs.title.clone().unwrap_or_default(),
            }),
        );
        if let Some(alt) = &attrs.alt {
            self.child(image, NodeValue::Text(alt.clone()));
        }
    }
}
