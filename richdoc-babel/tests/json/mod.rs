//! JSON document tests
//!
//! The JSON tree is the editor's storage format: it has to survive a round
//! trip unchanged and tolerate node and mark types this crate does not know.

use crate::common::{fixture, paragraph};
use richdoc_babel::format::Format;
use richdoc_babel::formats::JsonFormat;
use richdoc_babel::{load_document, parse_markdown, to_html, Block, Mark, RenderOptions};

#[test]
fn test_round_trip_every_block_kind() {
    let doc = parse_markdown(&fixture("kitchensink.md"));
    let json = JsonFormat.serialize(&doc).unwrap();
    assert_eq!(JsonFormat.parse(&json).unwrap(), doc);
}

#[test]
fn test_wire_shape() {
    let doc = parse_markdown("## Hi *there*\n\n- [x] a");
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "type": "doc",
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 2 },
                    "content": [
                        { "type": "text", "text": "Hi " },
                        { "type": "text", "text": "there", "marks": [{ "type": "italic" }] }
                    ]
                },
                {
                    "type": "taskList",
                    "content": [{
                        "type": "taskItem",
                        "attrs": { "checked": true },
                        "content": [{
                            "type": "paragraph",
                            "content": [{ "type": "text", "text": "a" }]
                        }]
                    }]
                }
            ]
        })
    );
}

#[test]
fn test_unknown_types_deserialize() {
    let doc = load_document(&fixture("unknown-nodes.json"));
    assert_eq!(
        doc.content,
        vec![
            Block::paragraph(vec![
                Block::text("plain "),
                Block::styled("highlighted", vec![Mark::Unknown]),
                Block::styled(" bold", vec![Mark::Bold]),
            ]),
            Block::Unknown,
            Block::heading(2, vec![Block::text("After")]),
        ]
    );

    let html = to_html(&doc, &RenderOptions::default());
    assert_eq!(
        html,
        "<p>plain highlighted<strong> bold</strong></p><h2>After</h2>"
    );
}

#[test]
fn test_non_document_json_is_markdown() {
    let doc = load_document(r#"{"hello": "world"}"#);
    assert_eq!(doc.content, vec![paragraph(r#"{"hello": "world"}"#)]);
}
