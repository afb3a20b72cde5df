//! Import tests for HTML format (HTML → tree), and render idempotence

use crate::common::{document, fixture, paragraph};
use proptest::prelude::*;
use richdoc_babel::format::Format;
use richdoc_babel::formats::html::parser::parse_from_html;
use richdoc_babel::formats::HtmlFormat;
use richdoc_babel::{parse_markdown, to_html, Block, Mark, RenderOptions};

fn rerender(html: &str) -> String {
    to_html(&parse_from_html(html), &RenderOptions::default())
}

#[test]
fn test_kitchensink_rerenders_identically() {
    let doc = parse_markdown(&fixture("kitchensink.md"));
    let html = to_html(&doc, &RenderOptions::default());
    assert_eq!(rerender(&html), html);
}

#[test]
fn test_kitchensink_tree_survives_html() {
    let doc = parse_markdown(&fixture("kitchensink.md"));
    let html = HtmlFormat::default().serialize(&doc).unwrap();
    assert_eq!(HtmlFormat::default().parse(&html).unwrap(), doc);
}

#[test]
fn test_synonym_tags() {
    let doc = parse_from_html("<p><b>bold</b> <i>it</i> <del>gone</del></p>");
    assert_eq!(
        doc.content,
        vec![Block::paragraph(vec![
            Block::styled("bold", vec![Mark::Bold]),
            Block::text(" "),
            Block::styled("it", vec![Mark::Italic]),
            Block::text(" "),
            Block::styled("gone", vec![Mark::Strike]),
        ])]
    );
}

#[test]
fn test_loose_text_and_unknown_elements() {
    let doc = parse_from_html(
        "<html><head><title>t</title><style>p{}</style></head>\
         <body>loose <em>text</em><div><p>inside</p></div><script>x()</script></body></html>",
    );
    assert_eq!(
        doc.content,
        vec![
            Block::paragraph(vec![
                Block::text("loose "),
                Block::styled("text", vec![Mark::Italic]),
            ]),
            paragraph("inside"),
        ]
    );
}

proptest! {
    #[test]
    fn render_is_idempotent(doc in document()) {
        let html = to_html(&doc, &RenderOptions::default());
        prop_assert_eq!(rerender(&html), html);
    }
}
