//! Export tests for Markdown format (tree → Markdown)

use crate::common::{fixture, item, paragraph};
use insta::assert_snapshot;
use richdoc_babel::doc::{ImageAttrs, MarkKind, TaskItemAttrs};
use richdoc_babel::{
    parse_markdown, to_markdown, Block, Document, FormatRegistry, HardBreakStyle, Mark,
    RenderOptions,
};
use std::collections::HashMap;

fn md(blocks: Vec<Block>) -> String {
    to_markdown(&Document::new(blocks), &RenderOptions::default())
}

#[test]
fn test_kitchensink_is_reproduced() {
    let source = fixture("kitchensink.md");
    let doc = parse_markdown(&source);
    assert_eq!(to_markdown(&doc, &RenderOptions::default()), source.trim_end());
}

#[test]
fn test_image_block() {
    let out = md(vec![Block::Image {
        attrs: ImageAttrs {
            src: "/a.png".to_string(),
            alt: Some("A".to_string()),
            title: None,
        },
    }]);
    assert_eq!(out, "![A](/a.png)");
}

#[test]
fn test_task_list_and_nested_list() {
    let out = md(vec![
        Block::TaskList {
            content: vec![
                Block::TaskItem {
                    attrs: TaskItemAttrs { checked: true },
                    content: vec![paragraph("shipped")],
                },
                Block::TaskItem {
                    attrs: TaskItemAttrs { checked: false },
                    content: vec![paragraph("pending")],
                },
            ],
        },
        Block::BulletList {
            content: vec![Block::ListItem {
                content: vec![
                    paragraph("outer"),
                    Block::BulletList {
                        content: vec![item("inner")],
                    },
                ],
            }],
        },
    ]);
    assert_snapshot!(out, @r"
    - [x] shipped
    - [ ] pending

    - outer
      - inner
    ");
}

#[test]
fn test_multi_paragraph_blockquote() {
    let out = md(vec![Block::Blockquote {
        content: vec![paragraph("one"), paragraph("two")],
    }]);
    assert_eq!(out, "> one\n>\n> two");
}

#[test]
fn test_unknown_nodes_are_dropped() {
    let out = md(vec![
        paragraph("kept"),
        Block::Unknown,
        Block::paragraph(vec![Block::styled("plain", vec![Mark::Unknown])]),
    ]);
    assert_eq!(out, "kept\n\nplain");
}

#[test]
fn test_mark_order_controls_nesting() {
    let doc = Document::new(vec![Block::paragraph(vec![Block::styled(
        "x",
        vec![Mark::Bold, Mark::Code],
    )])]);

    let default = to_markdown(&doc, &RenderOptions::default());
    assert_eq!(default, "`**x**`");

    let code_first = RenderOptions::default().with_mark_order(vec![MarkKind::Code, MarkKind::Bold]);
    assert_eq!(to_markdown(&doc, &code_first), "**`x`**");
}

#[test]
fn test_hard_break_styles() {
    let doc = Document::new(vec![Block::paragraph(vec![
        Block::text("a"),
        Block::HardBreak,
        Block::text("b"),
    ])]);
    assert_eq!(to_markdown(&doc, &RenderOptions::default()), "a  \nb");

    let options = RenderOptions {
        hard_break: HardBreakStyle::Backslash,
        ..RenderOptions::default()
    };
    assert_eq!(to_markdown(&doc, &options), "a\\\nb");
}

#[test]
fn test_registry_extra_params() {
    let registry = FormatRegistry::default();
    let doc = Document::new(vec![Block::BulletList {
        content: vec![item("a"), item("b")],
    }]);

    let mut params = HashMap::new();
    params.insert("bullet-marker".to_string(), "+".to_string());
    let out = registry
        .serialize_with_options(&doc, "markdown", &params)
        .unwrap();
    assert_eq!(out, "+ a\n+ b");
}
