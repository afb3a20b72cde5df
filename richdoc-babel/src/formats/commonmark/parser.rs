//! CommonMark parsing (CommonMark → tree import)
//!
//! Pipeline: Markdown string → Comrak AST → document tree

use super::default_comrak_options;
use crate::doc::nodes::{
    push_text, with_mark, Block, Document, ImageAttrs, Mark, OrderedListAttrs, TaskItemAttrs,
};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena};
use log::debug;

/// Parse CommonMark (with GFM strike-through and task lists) into a tree
pub fn parse_from_commonmark(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    Document::new(collect_blocks(root))
}

fn collect_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Block> {
    node.children().filter_map(block_from_node).collect()
}

fn block_from_node<'a>(node: &'a AstNode<'a>) -> Option<Block> {
    let node_data = node.data.borrow();

    let block = match &node_data.value {
        NodeValue::Heading(heading) => Block::heading(heading.level, collect_inline(node)),

        NodeValue::Paragraph => {
            let content = collect_inline(node);
            // An image alone on its line is a block image
            if matches!(content.as_slice(), [Block::Image { .. }]) {
                return content.into_iter().next();
            }
            Block::paragraph(content)
        }

        NodeValue::List(list) => {
            let items = collect_blocks(node);
            let is_task = items
                .iter()
                .any(|item| matches!(item, Block::TaskItem { .. }));
            match list.list_type {
                ListType::Ordered => Block::OrderedList {
                    attrs: OrderedListAttrs {
                        start: list.start as u64,
                    },
                    content: items,
                },
                ListType::Bullet if is_task => Block::TaskList {
                    content: items.into_iter().map(into_task_item).collect(),
                },
                ListType::Bullet => Block::BulletList { content: items },
            }
        }

        NodeValue::Item(_) => Block::ListItem {
            content: collect_blocks(node),
        },

        NodeValue::TaskItem(symbol) => Block::TaskItem {
            attrs: TaskItemAttrs {
                checked: symbol.is_some(),
            },
            content: collect_blocks(node),
        },

        NodeValue::BlockQuote => Block::Blockquote {
            content: collect_blocks(node),
        },

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            let literal = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal);
            Block::code_block(language, literal)
        }

        NodeValue::ThematicBreak => Block::HorizontalRule,

        other => {
            debug!("skipping commonmark node {other:?}");
            return None;
        }
    };

    Some(block)
}

/// Plain items in a list that also holds task items become unchecked tasks.
fn into_task_item(item: Block) -> Block {
    match item {
        Block::ListItem { content } => Block::TaskItem {
            attrs: TaskItemAttrs::default(),
            content,
        },
        other => other,
    }
}

fn collect_inline<'a>(node: &'a AstNode<'a>) -> Vec<Block> {
    let mut out = Vec::new();
    for child in node.children() {
        collect_inline_node(child, &[], &mut out);
    }
    out
}

fn collect_inline_node<'a>(node: &'a AstNode<'a>, marks: &[Mark], out: &mut Vec<Block>) {
    let node_data = node.data.borrow();

    let marks = match &node_data.value {
        NodeValue::Text(text) => return push_text(out, text, marks),
        NodeValue::SoftBreak => return push_text(out, "\n", marks),
        NodeValue::LineBreak => return out.push(Block::HardBreak),
        NodeValue::Code(code) => return push_text(out, &code.literal, &with_mark(marks, Mark::Code)),
        NodeValue::Image(link) => {
            let alt = inline_text(node);
            out.push(Block::Image {
                attrs: ImageAttrs {
                    src: link.url.clone(),
                    alt: (!alt.is_empty()).then_some(alt),
                    title: (!link.title.is_empty()).then(|| link.title.clone()),
                },
            });
            return;
        }
        NodeValue::Strong => with_mark(marks, Mark::Bold),
        NodeValue::Emph => with_mark(marks, Mark::Italic),
        NodeValue::Strikethrough => with_mark(marks, Mark::Strike),
        NodeValue::Link(link) => {
            let title = (!link.title.is_empty()).then(|| link.title.clone());
            with_mark(marks, Mark::link(link.url.clone(), title))
        }
        _ => marks.to_vec(),
    };

    for child in node.children() {
        collect_inline_node(child, &marks, out);
    }
}

/// Concatenated text below a node (used for image alt text).
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut output = String::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => output.push_str(text),
            NodeValue::Code(code) => output.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
            _ => output.push_str(&inline_text(child)),
        }
    }
    output
}
