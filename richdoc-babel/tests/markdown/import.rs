//! Import tests for Markdown format (Markdown → tree)

use crate::common::{fixture, item, paragraph};
use richdoc_babel::doc::{ImageAttrs, OrderedListAttrs, TaskItemAttrs};
use richdoc_babel::format::Format;
use richdoc_babel::formats::MarkdownFormat;
use richdoc_babel::{
    load_document, parse_markdown, to_html, to_markdown, Block, Mark, RenderOptions,
};

#[test]
fn test_kitchensink() {
    let doc = parse_markdown(&fixture("kitchensink.md"));

    assert_eq!(
        doc.content,
        vec![
            Block::heading(
                1,
                vec![Block::text("Kitchen "), Block::styled("sink", vec![Mark::Bold])]
            ),
            Block::paragraph(vec![
                Block::text("Intro with "),
                Block::styled("italic", vec![Mark::Italic]),
                Block::text(", "),
                Block::styled("code", vec![Mark::Code]),
                Block::text(" and a "),
                Block::styled(
                    "link",
                    vec![Mark::link("https://example.com", Some("Example".to_string()))]
                ),
                Block::text(".\nSecond line"),
                Block::HardBreak,
                Block::text("after a hard break."),
            ]),
            Block::Blockquote {
                content: vec![
                    Block::paragraph(vec![
                        Block::text("Quoted "),
                        Block::styled("text", vec![Mark::Bold]),
                    ]),
                    paragraph("Second quoted paragraph"),
                ]
            },
            Block::BulletList {
                content: vec![
                    item("one"),
                    Block::ListItem {
                        content: vec![
                            paragraph("two"),
                            Block::BulletList {
                                content: vec![item("nested")]
                            },
                        ]
                    },
                ]
            },
            Block::OrderedList {
                attrs: OrderedListAttrs { start: 3 },
                content: vec![item("three"), item("four")],
            },
            Block::TaskList {
                content: vec![
                    Block::TaskItem {
                        attrs: TaskItemAttrs { checked: true },
                        content: vec![paragraph("done")],
                    },
                    Block::TaskItem {
                        attrs: TaskItemAttrs { checked: false },
                        content: vec![paragraph("todo")],
                    },
                ]
            },
            Block::Image {
                attrs: ImageAttrs {
                    src: "https://example.com/d.png".to_string(),
                    alt: Some("Diagram".to_string()),
                    title: Some("A diagram".to_string()),
                }
            },
            Block::code_block(Some("rust".to_string()), "fn main() {}"),
            Block::HorizontalRule,
            Block::paragraph(vec![
                Block::styled("struck", vec![Mark::Strike]),
                Block::text(" end"),
            ]),
        ]
    );
}

#[test]
fn test_heading_beats_other_prefixes() {
    let doc = parse_markdown("# - not a list\n");
    assert_eq!(
        doc.content,
        vec![Block::heading(1, vec![Block::text("- not a list")])]
    );
}

#[test]
fn test_unterminated_fence_runs_to_end() {
    let doc = parse_markdown("intro\n\n```js\nlet a = 1;\n\n# not a heading\n");
    assert_eq!(
        doc.content,
        vec![
            paragraph("intro"),
            Block::code_block(Some("js".to_string()), "let a = 1;\n\n# not a heading"),
        ]
    );
}

#[test]
fn test_unbalanced_delimiters_stay_literal() {
    let doc = parse_markdown("a **b and `c\n");
    assert_eq!(doc.content, vec![paragraph("a **b and `c")]);
}

#[test]
fn test_crlf_input() {
    let doc = parse_markdown("# Title\r\n\r\nbody\r\n");
    assert_eq!(
        doc.content,
        vec![Block::heading(1, vec![Block::text("Title")]), paragraph("body")]
    );
}

#[test]
fn test_loose_list_item_continuation() {
    let doc = parse_markdown("- first\n\n  more\n- second\n");
    assert_eq!(
        doc.content,
        vec![Block::BulletList {
            content: vec![
                Block::ListItem {
                    content: vec![paragraph("first"), paragraph("more")],
                },
                item("second"),
            ]
        }]
    );
}

#[test]
fn test_format_trait_and_loader_agree() {
    let source = fixture("kitchensink.md");
    let via_format = MarkdownFormat::default().parse(&source).unwrap();
    assert_eq!(via_format, load_document(&source));
}

#[test]
fn test_empty_input() {
    assert!(parse_markdown("").is_empty());
    assert!(parse_markdown("\n\n   \n").is_empty());
}

#[test]
fn test_deeply_nested_input_is_bounded() {
    let options = RenderOptions::default();
    for source in [
        ">".repeat(5_000),
        format!("{}deep", "- ".repeat(5_000)),
        format!("{}deep", "> - ".repeat(2_000)),
    ] {
        let doc = parse_markdown(&source);
        assert_eq!(doc.content.len(), 1);
        assert!(!to_html(&doc, &options).is_empty());
        assert!(!to_markdown(&doc, &options).is_empty());
    }
}
