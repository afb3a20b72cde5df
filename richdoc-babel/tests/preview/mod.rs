//! Preview entry point tests

use crate::common::fixture;
use richdoc_babel::{preview, PreviewMode, RenderOptions};

#[test]
fn test_json_and_markdown_previews_agree() {
    let markdown = fixture("kitchensink.md");
    let tree = richdoc_babel::parse_markdown(&markdown);
    let json = serde_json::to_string(&tree).unwrap();

    let from_markdown = preview(&markdown, &RenderOptions::default(), PreviewMode::Tree);
    let from_json = preview(&json, &RenderOptions::default(), PreviewMode::Tree);
    assert_eq!(from_markdown, from_json);
}

#[test]
fn test_regex_mode_only_affects_markdown() {
    let response = preview("**a**", &RenderOptions::default(), PreviewMode::Regex);
    assert_eq!(response.html, "<p><strong>a</strong></p>");

    let json = r#"{"type":"doc","content":[{"type":"paragraph"}]}"#;
    let response = preview(json, &RenderOptions::default(), PreviewMode::Regex);
    assert_eq!(response.html, "<p><br /></p>");
}

#[test]
fn test_response_serializes_as_html_object() {
    let response = preview("# T", &RenderOptions::default(), PreviewMode::Tree);
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value, serde_json::json!({ "html": "<h1>T</h1>" }));
}
