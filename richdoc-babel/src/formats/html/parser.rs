//! HTML parsing (HTML → tree import)
//!
//! Pipeline: HTML string → html5ever DOM → document tree
//!
//! The importer understands the tags the preview renderer emits plus their
//! common synonyms (`b`, `i`, `del`, ...). Unknown elements are treated as
//! transparent containers. Loose inline content between blocks is gathered
//! into paragraphs.

use crate::doc::nodes::{
    push_text, with_mark, Block, Document, ImageAttrs, Mark, OrderedListAttrs, TaskItemAttrs,
};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements whose content is never part of the document body.
const SKIPPED: &[&str] = &["head", "script", "style", "title", "template"];

/// Elements that only style or annotate their text.
const INLINE: &[&str] = &[
    "a", "abbr", "b", "br", "code", "del", "em", "i", "input", "label", "mark", "s", "small",
    "span", "strike", "strong", "sub", "sup", "u",
];

/// Parse an HTML document or fragment into a document tree
pub fn parse_from_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    let mut blocks = BlockCollector::default();
    blocks.children(&dom.document);
    Document::new(blocks.finish())
}

/// Gathers block children, wrapping runs of inline content into paragraphs.
#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    pending: Vec<Block>,
}

impl BlockCollector {
    fn children(&mut self, node: &Handle) {
        for child in node.children.borrow().iter() {
            self.node(child);
        }
    }

    fn node(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() || !self.pending.is_empty() {
                    push_text(&mut self.pending, &text, &[]);
                }
            }
            NodeData::Element { name, .. } => {
                let tag: &str = &name.local;
                if SKIPPED.contains(&tag) {
                    return;
                }
                if INLINE.contains(&tag) {
                    collect_inline(node, &[], &mut self.pending);
                    return;
                }
                self.flush();
                match block_element(tag, node) {
                    Some(block) => self.blocks.push(block),
                    None => self.children(node),
                }
            }
            NodeData::Document => self.children(node),
            _ => {}
        }
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let blank = pending.iter().all(|node| match node {
            Block::Text(span) => span.text.trim().is_empty(),
            _ => false,
        });
        if !blank {
            self.blocks.push(Block::paragraph(trim_inline(pending)));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Blocks inside a container element.
fn child_blocks(node: &Handle) -> Vec<Block> {
    let mut collector = BlockCollector::default();
    collector.children(node);
    collector.finish()
}

/// The block for a block-level element, or `None` for transparent containers.
fn block_element(tag: &str, node: &Handle) -> Option<Block> {
    let block = match tag {
        "p" => {
            let mut content = inline_children(node);
            // `<p><br /></p>` is how an empty paragraph is rendered
            if content == [Block::HardBreak] {
                content.clear();
            }
            Block::paragraph(content)
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse().unwrap_or(1);
            Block::heading(level, inline_children(node))
        }
        "ul" if attr(node, "data-type").as_deref() == Some("taskList") => Block::TaskList {
            content: list_items(node, true),
        },
        "ul" => Block::BulletList {
            content: list_items(node, false),
        },
        "ol" => Block::OrderedList {
            attrs: OrderedListAttrs {
                start: attr(node, "start")
                    .and_then(|start| start.trim().parse().ok())
                    .unwrap_or(1),
            },
            content: list_items(node, false),
        },
        "li" => Block::ListItem {
            content: child_blocks(node),
        },
        "blockquote" => Block::Blockquote {
            content: child_blocks(node),
        },
        "pre" => {
            let language = find_element(node, "code")
                .and_then(|code| attr(&code, "class"))
                .and_then(|class| {
                    class
                        .split_whitespace()
                        .find_map(|name| name.strip_prefix("language-").map(str::to_string))
                });
            Block::code_block(language, &text_content(node))
        }
        "hr" => Block::HorizontalRule,
        "img" => Block::Image {
            attrs: image_attrs(node)?,
        },
        _ => return None,
    };
    Some(block)
}

fn list_items(node: &Handle, task: bool) -> Vec<Block> {
    node.children
        .borrow()
        .iter()
        .filter(|child| element_name(child).as_deref() == Some("li"))
        .map(|li| {
            let mut content = child_blocks(li);
            if content.is_empty() {
                content.push(Block::paragraph(vec![]));
            }
            if task {
                let checked = attr(li, "data-checked").as_deref() == Some("true")
                    || find_element(li, "input").is_some_and(|input| attr(&input, "checked").is_some());
                Block::TaskItem {
                    attrs: TaskItemAttrs { checked },
                    content,
                }
            } else {
                Block::ListItem { content }
            }
        })
        .collect()
}

fn inline_children(node: &Handle) -> Vec<Block> {
    let mut out = Vec::new();
    for child in node.children.borrow().iter() {
        collect_inline(child, &[], &mut out);
    }
    out
}

/// Inline content of a node, with the marks its ancestors imply.
fn collect_inline(node: &Handle, marks: &[Mark], out: &mut Vec<Block>) {
    match &node.data {
        NodeData::Text { contents } => push_text(out, &contents.borrow(), marks),
        NodeData::Element { name, .. } => {
            let tag: &str = &name.local;
            let marks = match tag {
                "br" => {
                    out.push(Block::HardBreak);
                    return;
                }
                "img" => {
                    if let Some(attrs) = image_attrs(node) {
                        out.push(Block::Image { attrs });
                    }
                    return;
                }
                "input" => return,
                "strong" | "b" => with_mark(marks, Mark::Bold),
                "em" | "i" => with_mark(marks, Mark::Italic),
                "u" => with_mark(marks, Mark::Underline),
                "s" | "strike" | "del" => with_mark(marks, Mark::Strike),
                "code" => with_mark(marks, Mark::Code),
                "a" => match attr(node, "href") {
                    Some(href) => with_mark(marks, Mark::link(href, attr(node, "title"))),
                    None => marks.to_vec(),
                },
                tag if SKIPPED.contains(&tag) => return,
                _ => marks.to_vec(),
            };
            for child in node.children.borrow().iter() {
                collect_inline(child, &marks, out);
            }
        }
        _ => {}
    }
}

fn image_attrs(node: &Handle) -> Option<ImageAttrs> {
    let src = attr(node, "src")?;
    Some(ImageAttrs {
        src,
        alt: attr(node, "alt").filter(|alt| !alt.is_empty()),
        title: attr(node, "title"),
    })
}

/// Drop whitespace the markup carried around a paragraph's content.
fn trim_inline(mut content: Vec<Block>) -> Vec<Block> {
    if let Some(Block::Text(span)) = content.first_mut() {
        span.text = span.text.trim_start().to_string();
    }
    if let Some(Block::Text(span)) = content.last_mut() {
        span.text = span.text.trim_end().to_string();
    }
    content.retain(|node| !matches!(node, Block::Text(span) if span.text.is_empty()));
    content
}

fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attr(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// First descendant element with the given tag.
fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if element_name(child).as_deref() == Some(tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => out.push_str(&text_content(child)),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<Block> {
        parse_from_html(source).content
    }

    #[test]
    fn test_heading_and_marks() {
        assert_eq!(
            parse("<h2>Hello <strong>world</strong></h2>"),
            vec![Block::heading(
                2,
                vec![Block::text("Hello "), Block::styled("world", vec![Mark::Bold])]
            )]
        );
    }

    #[test]
    fn test_empty_paragraph_placeholder() {
        assert_eq!(parse("<p><br /></p>"), vec![Block::paragraph(vec![])]);
    }

    #[test]
    fn test_nested_marks_are_canonical() {
        assert_eq!(
            parse("<p><em><b>x</b></em></p>"),
            vec![Block::paragraph(vec![Block::styled(
                "x",
                vec![Mark::Bold, Mark::Italic]
            )])]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            parse(r#"<p><a href="https://x.y" title="T">go</a></p>"#),
            vec![Block::paragraph(vec![Block::styled(
                "go",
                vec![Mark::link("https://x.y", Some("T".to_string()))]
            )])]
        );
    }

    #[test]
    fn test_task_list() {
        let source = concat!(
            r#"<ul data-type="taskList">"#,
            r#"<li data-checked="true"><input type="checkbox" checked disabled />done</li>"#,
            r#"<li data-checked="false"><input type="checkbox" disabled />todo</li>"#,
            "</ul>"
        );
        assert_eq!(
            parse(source),
            vec![Block::TaskList {
                content: vec![
                    Block::TaskItem {
                        attrs: TaskItemAttrs { checked: true },
                        content: vec![Block::paragraph(vec![Block::text("done")])],
                    },
                    Block::TaskItem {
                        attrs: TaskItemAttrs { checked: false },
                        content: vec![Block::paragraph(vec![Block::text("todo")])],
                    },
                ]
            }]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(
            parse(r#"<ol start="4"><li>a</li></ol>"#),
            vec![Block::OrderedList {
                attrs: OrderedListAttrs { start: 4 },
                content: vec![Block::ListItem {
                    content: vec![Block::paragraph(vec![Block::text("a")])]
                }]
            }]
        );
    }

    #[test]
    fn test_code_block_language() {
        assert_eq!(
            parse(r#"<pre><code class="language-rust">a &lt; b</code></pre>"#),
            vec![Block::code_block(Some("rust".to_string()), "a < b")]
        );
    }

    #[test]
    fn test_loose_inline_content_becomes_paragraph() {
        assert_eq!(
            parse("<div>loose <em>text</em><hr></div>"),
            vec![
                Block::paragraph(vec![
                    Block::text("loose "),
                    Block::styled("text", vec![Mark::Italic]),
                ]),
                Block::HorizontalRule,
            ]
        );
    }

    #[test]
    fn test_script_is_skipped() {
        assert_eq!(
            parse("<script>alert(1)</script><p>ok</p>"),
            vec![Block::paragraph(vec![Block::text("ok")])]
        );
    }
}
