//! Shared fixtures and generators for the integration tests.

use proptest::prelude::*;
use richdoc_babel::doc::nodes::push_text;
use richdoc_babel::doc::{OrderedListAttrs, TaskItemAttrs};
use richdoc_babel::{Block, Document, Mark};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

pub fn paragraph(text: &str) -> Block {
    Block::paragraph(vec![Block::text(text)])
}

pub fn item(text: &str) -> Block {
    Block::ListItem {
        content: vec![paragraph(text)],
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// A word's marks: any mix of bold, italic and strike, or code on its own.
fn word_marks() -> impl Strategy<Value = Vec<Mark>> {
    prop_oneof![
        3 => Just(vec![]),
        1 => Just(vec![Mark::Code]),
        4 => (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(bold, italic, strike)| {
            [(bold, Mark::Bold), (italic, Mark::Italic), (strike, Mark::Strike)]
                .into_iter()
                .filter_map(|(on, mark)| on.then_some(mark))
                .collect()
        }),
    ]
}

/// Space-separated words. Each space carries the marks its two neighbours
/// share, so a mark held by consecutive words covers one unbroken run.
pub fn inline() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec((word(), word_marks()), 1..6).prop_map(|words| {
        let mut content = Vec::new();
        let mut previous: Option<Vec<Mark>> = None;
        for (text, marks) in words {
            if let Some(previous) = &previous {
                let shared: Vec<Mark> = previous
                    .iter()
                    .filter(|mark| marks.contains(mark))
                    .cloned()
                    .collect();
                push_text(&mut content, " ", &shared);
            }
            push_text(&mut content, &text, &marks);
            previous = Some(marks);
        }
        content
    })
}

fn items() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(inline(), 1..4).prop_map(|items| {
        items
            .into_iter()
            .map(|content| Block::ListItem {
                content: vec![Block::paragraph(content)],
            })
            .collect()
    })
}

/// Blocks built only from what Markdown can carry without loss.
pub fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        inline().prop_map(Block::paragraph),
        (1u8..=6, inline()).prop_map(|(level, content)| Block::heading(level, content)),
        items().prop_map(|content| Block::BulletList { content }),
        (1u64..20, items()).prop_map(|(start, content)| Block::OrderedList {
            attrs: OrderedListAttrs { start },
            content,
        }),
        prop::collection::vec((any::<bool>(), inline()), 1..4).prop_map(|items| {
            Block::TaskList {
                content: items
                    .into_iter()
                    .map(|(checked, content)| Block::TaskItem {
                        attrs: TaskItemAttrs { checked },
                        content: vec![Block::paragraph(content)],
                    })
                    .collect(),
            }
        }),
        prop::collection::vec(inline(), 1..3).prop_map(|paragraphs| Block::Blockquote {
            content: paragraphs.into_iter().map(Block::paragraph).collect(),
        }),
        (
            prop::option::of("[a-z]{1,6}"),
            "[a-z]{1,8}([ \n][a-z]{1,8}){0,3}"
        )
            .prop_map(|(language, code)| Block::code_block(language, &code)),
        Just(Block::HorizontalRule),
    ]
}

pub fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 0..6).prop_map(Document::new)
}
