//! Markdown parsing (Markdown → tree import)
//!
//! A line scanner: a cursor walks the input line by line and classifies each
//! line by its prefix, in a fixed order (heading, blockquote, fence, thematic
//! break, list item, image, paragraph text). Multi-line constructs consume their
//! run of lines; blockquotes and list items re-enter the scanner on their
//! de-indented bodies.
//!
//! Parsing never fails. An unterminated fence captures the rest of the input,
//! unbalanced inline delimiters stay literal text, and container lines nested
//! deeper than [`MAX_NESTING`] are read as paragraph text.

use super::inline::{image_attrs, parse_inline};
use crate::doc::nodes::{Block, Document, OrderedListAttrs, TaskItemAttrs};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*))?$").unwrap());
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}> ?(.*)$").unwrap());
static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(`{3,})[ \t]*([^`\s]*)").unwrap());
static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});
static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)([-*+]|\d{1,9}\.)(?:[ \t]+(.*))?$").unwrap());
static TASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([ xX])\](?:[ \t]+(.*))?$").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^ {0,3}!\[([^\]]*)\]\(([^)\s]+)(?:\s+"([^"]*)")?\)[ \t]*$"#).unwrap()
});

/// Deepest blockquote or list nesting the scanner opens.
pub const MAX_NESTING: usize = 64;

/// Parse Markdown into a document tree
pub fn parse_from_markdown(source: &str) -> Document {
    let normalized = source.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();
    Document::new(parse_blocks(&lines, 0))
}

/// The marker that opens a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bullet,
    Ordered(u64),
}

/// A line that opens a list item.
#[derive(Debug, Clone, Copy)]
struct ItemLine<'a> {
    indent: usize,
    marker: Marker,
    /// Column the item's content starts at; continuation lines are
    /// de-indented by up to this much.
    content_col: usize,
    /// Everything after the marker.
    content: &'a str,
}

impl<'a> ItemLine<'a> {
    /// Checkbox state and remaining text for `[ ]` / `[x]` items.
    fn task(&self) -> Option<(bool, &'a str)> {
        if self.marker != Marker::Bullet {
            return None;
        }
        let caps = TASK_RE.captures(self.content)?;
        let checked = caps.get(1).is_some_and(|m| m.as_str() != " ");
        let rest = caps.get(2).map_or("", |m| m.as_str());
        Some((checked, rest))
    }
}

/// Classification of a single line.
#[derive(Debug)]
enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    Quote,
    Fence { ticks: usize, info: &'a str },
    Rule,
    Item(ItemLine<'a>),
    Image { alt: &'a str, src: &'a str, title: Option<&'a str> },
    Text,
}

impl Line<'_> {
    /// Lines that interrupt a paragraph.
    fn is_special(&self) -> bool {
        !matches!(self, Line::Text | Line::Blank)
    }
}

/// Classify a line, trying each construct in the fixed declaration order.
fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Heading { level, text };
    }
    if QUOTE_RE.is_match(line) {
        return Line::Quote;
    }
    if let Some(caps) = FENCE_RE.captures(line) {
        return Line::Fence {
            ticks: caps.get(1).map_or(3, |m| m.as_str().len()),
            info: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if RULE_RE.is_match(line) {
        return Line::Rule;
    }
    if let Some(caps) = ITEM_RE.captures(line) {
        let indent = caps.get(1).map_or(0, |m| indent_width(m.as_str()));
        let raw_marker = caps.get(2).map_or("-", |m| m.as_str());
        let marker = match raw_marker.trim_end_matches('.').parse::<u64>() {
            Ok(number) => Marker::Ordered(number),
            Err(_) => Marker::Bullet,
        };
        let content = caps.get(3).map_or("", |m| m.as_str());
        return Line::Item(ItemLine {
            indent,
            marker,
            content_col: indent + raw_marker.len() + 1,
            content,
        });
    }
    if let Some(caps) = IMAGE_RE.captures(line) {
        return Line::Image {
            alt: caps.get(1).map_or("", |m| m.as_str()),
            src: caps.get(2).map_or("", |m| m.as_str()),
            title: caps.get(3).map(|m| m.as_str()),
        };
    }
    Line::Text
}

/// Parse a run of lines into blocks, `depth` containers down.
fn parse_blocks(lines: &[&str], depth: usize) -> Vec<Block> {
    let mut scanner = LineScanner::new(lines, depth);
    let mut blocks = Vec::new();

    while let Some(line) = scanner.peek() {
        let kind = match classify(line) {
            Line::Quote | Line::Item(_) if depth >= MAX_NESTING => {
                debug!("nesting limit reached, reading container line as text");
                Line::Text
            }
            kind => kind,
        };
        match kind {
            Line::Blank => scanner.advance(),
            Line::Heading { level, text } => {
                scanner.advance();
                blocks.push(Block::heading(level, parse_inline(text)));
            }
            Line::Quote => blocks.push(scanner.blockquote()),
            Line::Fence { ticks, info } => blocks.push(scanner.fenced_code(ticks, info)),
            Line::Rule => {
                scanner.advance();
                blocks.push(Block::HorizontalRule);
            }
            Line::Item(item) => blocks.push(scanner.list(item)),
            Line::Image { alt, src, title } => {
                scanner.advance();
                blocks.push(Block::Image {
                    attrs: image_attrs(alt, src, title),
                });
            }
            Line::Text => blocks.push(scanner.paragraph()),
        }
    }

    blocks
}

/// Cursor over the lines of one container.
struct LineScanner<'s, 'a> {
    lines: &'s [&'a str],
    pos: usize,
    depth: usize,
}

impl<'s, 'a> LineScanner<'s, 'a> {
    fn new(lines: &'s [&'a str], depth: usize) -> Self {
        Self {
            lines,
            pos: 0,
            depth,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Indentation of the next non-blank line, if any.
    fn next_content_indent(&self) -> Option<usize> {
        self.lines[self.pos..]
            .iter()
            .find(|line| !line.trim().is_empty())
            .map(|line| indent_width(line))
    }

    /// A run of consecutive `>` lines, parsed again without their prefix.
    fn blockquote(&mut self) -> Block {
        let mut inner = Vec::new();
        while let Some(line) = self.peek() {
            let Some(caps) = QUOTE_RE.captures(line) else {
                break;
            };
            inner.push(caps.get(1).map_or("", |m| m.as_str()));
            self.advance();
        }
        Block::Blockquote {
            content: parse_blocks(&inner, self.depth + 1),
        }
    }

    /// Everything up to the closing fence, or to the end of input.
    fn fenced_code(&mut self, ticks: usize, info: &str) -> Block {
        self.advance();
        let mut code = Vec::new();
        let mut closed = false;
        while let Some(line) = self.peek() {
            self.advance();
            let trimmed = line.trim();
            if trimmed.len() >= ticks && trimmed.chars().all(|c| c == '`') {
                closed = true;
                break;
            }
            code.push(line);
        }
        if !closed {
            warn!("unterminated code fence, capturing to end of input");
        }
        let language = (!info.is_empty()).then(|| info.to_string());
        Block::code_block(language, &code.join("\n"))
    }

    /// Lines of text up to a blank line or a line that opens another block.
    ///
    /// A line ending in two spaces or a backslash ends with a hard break;
    /// any other line break is kept as a newline in the text.
    fn paragraph(&mut self) -> Block {
        let mut content = Vec::new();
        let mut segment = String::new();

        // The first line is text; every later one was checked before looping.
        while let Some(line) = self.peek() {
            self.advance();

            let line = line.trim_start();
            let last = self
                .peek()
                .map_or(true, |next| next.trim().is_empty() || classify(next).is_special());
            if last {
                segment.push_str(line.trim_end());
                break;
            }
            if let Some(body) = line.strip_suffix('\\') {
                segment.push_str(body);
                flush_segment(&mut content, &mut segment);
                content.push(Block::HardBreak);
            } else if line.ends_with("  ") {
                segment.push_str(line.trim_end());
                flush_segment(&mut content, &mut segment);
                content.push(Block::HardBreak);
            } else {
                segment.push_str(line.trim_end());
                segment.push('\n');
            }
        }

        flush_segment(&mut content, &mut segment);
        Block::paragraph(content)
    }

    /// A run of sibling list items of the same family.
    ///
    /// Lines indented past the item's marker belong to the item, as do blank
    /// lines followed by such a line. A blank line followed by anything else
    /// ends the list.
    fn list(&mut self, first: ItemLine<'a>) -> Block {
        let base = first.indent;
        let is_task = first.task().is_some();
        let mut items = Vec::new();
        let mut current = first;

        loop {
            self.advance();
            let mut body = vec![match current.task() {
                Some((_, rest)) if is_task => rest,
                _ => current.content,
            }];

            let mut next_item = None;
            while let Some(line) = self.peek() {
                if line.trim().is_empty() {
                    self.advance();
                    match self.next_content_indent() {
                        Some(indent) if indent > base => {
                            body.push("");
                            continue;
                        }
                        _ => break,
                    }
                }
                if indent_width(line) > base {
                    body.push(strip_indent(line, current.content_col));
                    self.advance();
                    continue;
                }
                if let Line::Item(item) = classify(line) {
                    if same_family(&first, &item) {
                        next_item = Some(item);
                    }
                }
                break;
            }

            let mut content = parse_blocks(&body, self.depth + 1);
            if content.is_empty() {
                content.push(Block::paragraph(vec![]));
            }
            items.push(if is_task {
                Block::TaskItem {
                    attrs: TaskItemAttrs {
                        checked: current.task().is_some_and(|(checked, _)| checked),
                    },
                    content,
                }
            } else {
                Block::ListItem { content }
            });

            match next_item {
                Some(item) => current = item,
                None => break,
            }
        }

        match first.marker {
            Marker::Ordered(start) => Block::OrderedList {
                attrs: OrderedListAttrs { start },
                content: items,
            },
            Marker::Bullet if is_task => Block::TaskList { content: items },
            Marker::Bullet => Block::BulletList { content: items },
        }
    }
}

fn flush_segment(content: &mut Vec<Block>, segment: &mut String) {
    if !segment.is_empty() {
        content.extend(parse_inline(segment));
        segment.clear();
    }
}

fn same_family(first: &ItemLine<'_>, next: &ItemLine<'_>) -> bool {
    matches!(
        (first.marker, next.marker),
        (Marker::Bullet, Marker::Bullet) | (Marker::Ordered(_), Marker::Ordered(_))
    )
}

/// Width of leading whitespace, with tabs counting as four columns.
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Drop up to `width` columns of leading whitespace.
fn strip_indent(line: &str, width: usize) -> &str {
    let mut column = 0;
    for (offset, c) in line.char_indices() {
        if column >= width || !(c == ' ' || c == '\t') {
            return &line[offset..];
        }
        column += if c == '\t' { 4 } else { 1 };
    }
    ""
}
