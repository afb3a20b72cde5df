//! Export tests for HTML format (tree → HTML)

use crate::common::{fixture, item, paragraph};
use insta::assert_snapshot;
use richdoc_babel::doc::{ImageAttrs, OrderedListAttrs, TaskItemAttrs};
use richdoc_babel::formats::html::markdown_to_html_fallback;
use richdoc_babel::{parse_markdown, to_html, Block, Document, Mark, RenderOptions};

fn html(blocks: Vec<Block>) -> String {
    to_html(&Document::new(blocks), &RenderOptions::default())
}

#[test]
fn test_heading_with_bold() {
    let doc = parse_markdown("# Hello **world**");
    assert_eq!(
        to_html(&doc, &RenderOptions::default()),
        "<h1>Hello <strong>world</strong></h1>"
    );
}

#[test]
fn test_empty_paragraph() {
    assert_eq!(html(vec![Block::paragraph(vec![])]), "<p><br /></p>");
}

#[test]
fn test_kitchensink() {
    let doc = parse_markdown(&fixture("kitchensink.md"));
    let out = to_html(&doc, &RenderOptions::default());

    assert!(out.starts_with("<h1>Kitchen <strong>sink</strong></h1>"));
    assert!(out.contains(
        r#"<a href="https://example.com" title="Example">link</a>.
Second line<br />after a hard break.</p>"#
    ));
    assert!(out.contains(
        "<blockquote><p>Quoted <strong>text</strong></p><p>Second quoted paragraph</p></blockquote>"
    ));
    assert!(out.contains("<ul><li>one</li><li><p>two</p><ul><li>nested</li></ul></li></ul>"));
    assert!(out.contains(r#"<ol start="3"><li>three</li><li>four</li></ol>"#));
    assert!(out.contains(
        r#"<li data-checked="true"><input type="checkbox" checked disabled />done</li>"#
    ));
    assert!(out.contains(r#"<img src="https://example.com/d.png" alt="Diagram" title="A diagram" />"#));
    assert!(out.contains(r#"<pre><code class="language-rust">fn main() {}</code></pre><hr />"#));
    assert!(out.ends_with("<p><s>struck</s> end</p>"));
}

#[test]
fn test_lists() {
    let out = html(vec![
        Block::OrderedList {
            attrs: OrderedListAttrs { start: 1 },
            content: vec![item("a")],
        },
        Block::TaskList {
            content: vec![Block::TaskItem {
                attrs: TaskItemAttrs { checked: false },
                content: vec![paragraph("b")],
            }],
        },
    ]);
    assert_snapshot!(out, @r#"<ol><li>a</li></ol><ul data-type="taskList"><li data-checked="false"><input type="checkbox" disabled />b</li></ul>"#);
}

#[test]
fn test_escaping() {
    let out = html(vec![
        paragraph("<script>alert(\"x\")</script> & more"),
        Block::code_block(Some("html".to_string()), "<b>"),
    ]);
    assert_eq!(
        out,
        "<p>&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more</p>\
         <pre><code class=\"language-html\">&lt;b&gt;</code></pre>"
    );
}

#[test]
fn test_disallowed_schemes_are_dropped() {
    let out = html(vec![
        Block::paragraph(vec![Block::styled(
            "click",
            vec![Mark::link("javascript:alert(1)", None)],
        )]),
        Block::Image {
            attrs: ImageAttrs {
                src: "data:image/png;base64,AAAA".to_string(),
                alt: None,
                title: None,
            },
        },
        Block::paragraph(vec![Block::styled(
            "mail",
            vec![Mark::link("mailto:a@b.c", None)],
        )]),
    ]);
    assert_eq!(out, r#"<p>click</p><p><a href="mailto:a@b.c">mail</a></p>"#);
}

#[test]
fn test_unknown_mark_renders_unstyled() {
    let out = html(vec![Block::paragraph(vec![Block::styled(
        "text",
        vec![Mark::Unknown, Mark::Underline],
    )])]);
    assert_eq!(out, "<p><u>text</u></p>");
}

#[test]
fn test_fallback_cascade() {
    let out = markdown_to_html_fallback("## Title\n\nsome **bold** and *em*\nnext line");
    assert_eq!(
        out,
        "<h2>Title</h2><p>some <strong>bold</strong> and <em>em</em><br />next line</p>"
    );
}
