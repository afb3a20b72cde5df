//! Inline Markdown parsing
//!
//! Inline syntax is recognised by an ordered pattern table ([`InlineRule::PRIORITY`]).
//! At each position the rules are tried in that order and the first match
//! wins; when none matches, a literal run is consumed up to the next character
//! that could open a rule. Emphasis, links and strike-through recurse into their
//! inner text, accumulating marks on the way down.
//!
//! Unbalanced delimiters never match a rule and so stay literal text.

use crate::doc::nodes::{push_text, with_mark, Block, ImageAttrs, Mark};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A complete italic run with no bold inside it.
const ITALIC_RUN: &str = r"\*[^*\s](?:[^*]*[^*\s])?\*";
/// A complete bold run with no italic inside it.
const BOLD_RUN: &str = r"\*\*[^*\s](?:[^*]*[^*\s])?\*\*";

// Emphasis delimiters hug their content: no whitespace just inside them.
// Bold may hold whole italic runs and italic whole bold runs, so a closing
// delimiter is never taken from the middle of a nested pair.
static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\*\*((?:[^*\s]|{ITALIC_RUN})(?:(?:[^*]|{ITALIC_RUN})*(?:[^*\s]|{ITALIC_RUN}))?)\*\*"
    ))
    .unwrap()
});
static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\*((?:[^*\s]|{BOLD_RUN})(?:(?:[^*]|{BOLD_RUN})*(?:[^*\s]|{BOLD_RUN}))?)\*"
    ))
    .unwrap()
});
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^!\[([^\]]*)\]\(([^)\s]+)(?:\s+"([^"]*)")?\)"#).unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[([^\]]+)\]\(([^)\s]+)(?:\s+"([^"]*)")?\)"#).unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^`([^`]+)`").unwrap());
static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~([^~](?:.*?[^~])?)~~").unwrap());

/// Characters that may open an inline rule.
const SPECIAL: &[char] = &['*', '!', '[', '`', '~'];

/// One entry of the inline pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    Bold,
    Italic,
    Image,
    Link,
    Code,
    Strike,
}

impl InlineRule {
    /// Order the rules are tried in. Bold precedes italic so `**` is never
    /// read as two italic delimiters.
    pub const PRIORITY: [InlineRule; 6] = [
        InlineRule::Bold,
        InlineRule::Italic,
        InlineRule::Image,
        InlineRule::Link,
        InlineRule::Code,
        InlineRule::Strike,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            InlineRule::Bold => &BOLD,
            InlineRule::Italic => &ITALIC,
            InlineRule::Image => &IMAGE,
            InlineRule::Link => &LINK,
            InlineRule::Code => &CODE,
            InlineRule::Strike => &STRIKE,
        }
    }

    /// The first rule matching at the start of `text`, in priority order.
    pub fn match_at(text: &str) -> Option<(InlineRule, Captures<'_>)> {
        Self::PRIORITY
            .iter()
            .find_map(|rule| rule.pattern().captures(text).map(|caps| (*rule, caps)))
    }
}

/// Parse one line (or run of lines) of inline Markdown.
pub fn parse_inline(text: &str) -> Vec<Block> {
    let mut out = Vec::new();
    parse_into(text, &[], &mut out);
    out
}

fn parse_into(text: &str, marks: &[Mark], out: &mut Vec<Block>) {
    let mut rest = text;
    while !rest.is_empty() {
        let consumed = match InlineRule::match_at(rest) {
            Some((rule, caps)) => {
                apply_rule(rule, &caps, marks, out);
                caps.get(0).map_or(rest.len(), |m| m.end())
            }
            None => {
                let end = literal_run(rest);
                push_text(out, &rest[..end], marks);
                end
            }
        };
        rest = &rest[consumed..];
    }
}

fn apply_rule(rule: InlineRule, caps: &Captures<'_>, marks: &[Mark], out: &mut Vec<Block>) {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    match rule {
        InlineRule::Bold => parse_into(group(1), &with_mark(marks, Mark::Bold), out),
        InlineRule::Italic => parse_into(group(1), &with_mark(marks, Mark::Italic), out),
        InlineRule::Strike => parse_into(group(1), &with_mark(marks, Mark::Strike), out),
        InlineRule::Code => push_text(out, group(1), &with_mark(marks, Mark::Code)),
        InlineRule::Link => {
            let title = caps.get(3).map(|m| m.as_str().to_string());
            let link = Mark::link(group(2), title);
            parse_into(group(1), &with_mark(marks, link), out);
        }
        InlineRule::Image => out.push(Block::Image {
            attrs: image_attrs(group(1), group(2), caps.get(3).map(|m| m.as_str())),
        }),
    }
}

/// Length of the literal run at the start of `text`: at least one character,
/// then everything up to the next special character.
fn literal_run(text: &str) -> usize {
    let first = text.chars().next().map_or(0, char::len_utf8);
    text[first..]
        .find(SPECIAL)
        .map_or(text.len(), |offset| first + offset)
}

pub(crate) fn image_attrs(alt: &str, src: &str, title: Option<&str>) -> ImageAttrs {
    ImageAttrs {
        src: src.to_string(),
        alt: (!alt.is_empty()).then(|| alt.to_string()),
        title: title.map(str::to_string),
    }
}
