//! Core data structures of the rich-text document tree.
//!
//! The JSON shape mirrors what the block editor emits: every node carries a
//! `"type"` discriminator, containers carry `content` and configurable nodes
//! carry `attrs`. Types the tree does not know deserialize to `Unknown` so a
//! stored document never fails to load.

use serde::{Deserialize, Serialize};

/// The root of a document: `{"type": "doc", "content": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DocumentRepr", into = "DocumentRepr")]
pub struct Document {
    pub content: Vec<Block>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum DocumentRepr {
    Doc {
        #[serde(default)]
        content: Vec<Block>,
    },
}

impl From<DocumentRepr> for Document {
    fn from(repr: DocumentRepr) -> Self {
        match repr {
            DocumentRepr::Doc { content } => Document { content },
        }
    }
}

impl From<Document> for DocumentRepr {
    fn from(doc: Document) -> Self {
        DocumentRepr::Doc {
            content: doc.content,
        }
    }
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        Self { content }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A structural node of the tree.
///
/// Inline nodes (`Text`, `HardBreak`, inline `Image`) share the enum with
/// block nodes because the editor's schema does: a paragraph's `content` is a
/// sequence of the same node type as the document's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        content: Vec<Block>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<Block>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<Block>,
    },
    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default)]
        content: Vec<Block>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<Block>,
    },
    TaskList {
        #[serde(default)]
        content: Vec<Block>,
    },
    TaskItem {
        #[serde(default)]
        attrs: TaskItemAttrs,
        #[serde(default)]
        content: Vec<Block>,
    },
    Blockquote {
        #[serde(default)]
        content: Vec<Block>,
    },
    CodeBlock {
        #[serde(default)]
        attrs: CodeBlockAttrs,
        #[serde(default)]
        content: Vec<Block>,
    },
    Image {
        attrs: ImageAttrs,
    },
    HorizontalRule,
    HardBreak,
    Text(Span),
    #[serde(other)]
    Unknown,
}

impl Block {
    pub fn paragraph(content: Vec<Block>) -> Self {
        Block::Paragraph { content }
    }

    pub fn heading(level: u8, content: Vec<Block>) -> Self {
        Block::Heading {
            attrs: HeadingAttrs { level },
            content,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Block::Text(Span::new(text))
    }

    pub fn styled(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Block::Text(Span::with_marks(text, marks))
    }

    pub fn code_block(language: Option<String>, code: &str) -> Self {
        let content = if code.is_empty() {
            vec![]
        } else {
            vec![Block::text(code)]
        };
        Block::CodeBlock {
            attrs: CodeBlockAttrs { language },
            content,
        }
    }

    /// Children of a container node; leaves return an empty slice.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Paragraph { content }
            | Block::Heading { content, .. }
            | Block::BulletList { content }
            | Block::OrderedList { content, .. }
            | Block::ListItem { content }
            | Block::TaskList { content }
            | Block::TaskItem { content, .. }
            | Block::Blockquote { content }
            | Block::CodeBlock { content, .. } => content,
            Block::Image { .. }
            | Block::HorizontalRule
            | Block::HardBreak
            | Block::Text(_)
            | Block::Unknown => &[],
        }
    }

    /// Name of the node as it appears in the `"type"` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::BulletList { .. } => "bulletList",
            Block::OrderedList { .. } => "orderedList",
            Block::ListItem { .. } => "listItem",
            Block::TaskList { .. } => "taskList",
            Block::TaskItem { .. } => "taskItem",
            Block::Blockquote { .. } => "blockquote",
            Block::CodeBlock { .. } => "codeBlock",
            Block::Image { .. } => "image",
            Block::HorizontalRule => "horizontalRule",
            Block::HardBreak => "hardBreak",
            Block::Text(_) => "text",
            Block::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default = "default_start")]
    pub start: u64,
}

impl Default for OrderedListAttrs {
    fn default() -> Self {
        Self {
            start: default_start(),
        }
    }
}

fn default_start() -> u64 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A leaf text run with its marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: vec![],
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// The mark of the given kind, if the span carries one.
    pub fn mark(&self, kind: MarkKind) -> Option<&Mark> {
        self.marks.iter().find(|mark| mark.kind() == Some(kind))
    }
}

/// A style annotation on a [`Span`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Link { attrs: LinkAttrs },
    Underline,
    Strike,
    #[serde(other)]
    Unknown,
}

impl Mark {
    pub fn link(href: impl Into<String>, title: Option<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs {
                href: href.into(),
                title,
            },
        }
    }

    pub fn kind(&self) -> Option<MarkKind> {
        match self {
            Mark::Bold => Some(MarkKind::Bold),
            Mark::Italic => Some(MarkKind::Italic),
            Mark::Code => Some(MarkKind::Code),
            Mark::Link { .. } => Some(MarkKind::Link),
            Mark::Underline => Some(MarkKind::Underline),
            Mark::Strike => Some(MarkKind::Strike),
            Mark::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Mark discriminant, used to express the nesting order marks are applied in.
///
/// The declaration order is the canonical order parsers store marks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link,
}

impl MarkKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "bold" => Some(MarkKind::Bold),
            "italic" => Some(MarkKind::Italic),
            "underline" => Some(MarkKind::Underline),
            "strike" => Some(MarkKind::Strike),
            "code" => Some(MarkKind::Code),
            "link" => Some(MarkKind::Link),
            _ => None,
        }
    }
}

/// Append a text run, merging it into the previous span when the marks match.
///
/// Empty text is dropped so no zero-length span enters the tree.
pub fn push_text(content: &mut Vec<Block>, text: &str, marks: &[Mark]) {
    if text.is_empty() {
        return;
    }
    if let Some(Block::Text(last)) = content.last_mut() {
        if last.marks == marks {
            last.text.push_str(text);
            return;
        }
    }
    content.push(Block::Text(Span::with_marks(text, marks.to_vec())));
}

/// Extend a mark set with one more mark, keeping the canonical order.
///
/// Parsers accumulate marks while descending into nested emphasis; storing
/// them sorted makes two spans with the same set of marks compare equal.
pub fn with_mark(marks: &[Mark], mark: Mark) -> Vec<Mark> {
    let mut out: Vec<Mark> = marks
        .iter()
        .filter(|existing| existing.kind() != mark.kind() || mark.kind().is_none())
        .cloned()
        .collect();
    out.push(mark);
    out.sort_by_key(Mark::kind);
    out
}

/// Concatenated text of an inline sequence, ignoring marks.
///
/// Hard breaks become newlines; anything that is not text is skipped.
pub fn plain_text(content: &[Block]) -> String {
    let mut out = String::new();
    for node in content {
        match node {
            Block::Text(span) => out.push_str(&span.text),
            Block::HardBreak => out.push('\n'),
            other => out.push_str(&plain_text(other.children())),
        }
    }
    out
}
