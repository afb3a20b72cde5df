//! Markdown → tree → Markdown → tree
//!
//! For documents made of what Markdown carries without loss, parsing the
//! serialized form gives the document back.

use crate::common::document;
use proptest::prelude::*;
use richdoc_babel::{parse_markdown, to_markdown, RenderOptions};

fn reserialize(markdown: &str) -> String {
    to_markdown(&parse_markdown(markdown), &RenderOptions::default())
}

#[test]
fn test_nested_emphasis_is_preserved() {
    for markdown in [
        "*a **b** c*",
        "**a *b* c**",
        "***a** b **c***",
        "***a* b *c***",
        "*a **b***",
        "~~a **b** c~~",
        "**a ~~b *c* d~~ e**",
    ] {
        assert_eq!(reserialize(markdown), markdown);
    }
}

proptest! {
    #[test]
    fn parse_inverts_serialize(doc in document()) {
        let markdown = to_markdown(&doc, &RenderOptions::default());
        prop_assert_eq!(parse_markdown(&markdown), doc, "markdown was:\n{}", markdown);
    }

    #[test]
    fn serialize_is_stable(doc in document()) {
        let once = to_markdown(&doc, &RenderOptions::default());
        let twice = to_markdown(&parse_markdown(&once), &RenderOptions::default());
        prop_assert_eq!(once, twice);
    }
}
