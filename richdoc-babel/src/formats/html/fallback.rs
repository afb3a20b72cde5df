//! Plain Markdown → HTML substitution pass.
//!
//! A cascade of regex replacements over raw Markdown, with no tree in between.
//! It knows headings, images, links, inline code, bold, italic and paragraphs,
//! and nothing else: lists, quotes and fences come out as paragraph text.
//! Selected for previews with [`PreviewMode::Regex`](crate::preview::PreviewMode).

use super::serializer::html_escape;
use crate::common::links::is_safe_url;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+?)[ \t]*$").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n\s*").unwrap());

/// Convert raw Markdown to HTML with the substitution cascade.
pub fn markdown_to_html_fallback(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    BLANK_LINES
        .split(normalized.trim())
        .filter(|chunk| !chunk.trim().is_empty())
        .map(render_chunk)
        .collect()
}

fn render_chunk(chunk: &str) -> String {
    let chunk = chunk.trim();
    if let Some(caps) = HEADING.captures(chunk) {
        if !chunk.contains('\n') {
            let level = caps[1].len();
            return format!("<h{level}>{}</h{level}>", inline(&caps[2]));
        }
    }
    let lines: Vec<String> = chunk.lines().map(|line| inline(line.trim())).collect();
    format!("<p>{}</p>", lines.join("<br />"))
}

fn inline(text: &str) -> String {
    let text = html_escape(text);
    let text = CODE.replace_all(&text, "<code>$1</code>");
    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        if is_safe_url(&caps[2]) {
            format!("<img src=\"{}\" alt=\"{}\" />", &caps[2], &caps[1])
        } else {
            String::new()
        }
    });
    let text = LINK.replace_all(&text, |caps: &Captures<'_>| {
        if is_safe_url(&caps[2]) {
            format!("<a href=\"{}\">{}</a>", &caps[2], &caps[1])
        } else {
            caps[1].to_string()
        }
    });
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    text.into_owned()
}
