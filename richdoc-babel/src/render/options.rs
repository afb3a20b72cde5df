//! Knobs shared by every render target.

use crate::doc::nodes::MarkKind;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a hard line break is written in Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardBreakStyle {
    /// Two trailing spaces before the newline.
    #[default]
    Spaces,
    /// A backslash before the newline.
    Backslash,
}

impl HardBreakStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "spaces" => Some(HardBreakStyle::Spaces),
            "backslash" => Some(HardBreakStyle::Backslash),
            _ => None,
        }
    }
}

/// Options for rendering a document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Order marks are applied in. The first kind wraps the text first and so
    /// ends up innermost, unless a mark spans more neighbouring text than the
    /// others. Kinds missing from the list are not rendered.
    pub mark_order: Vec<MarkKind>,
    /// Marker for bullet and task list items in Markdown.
    pub bullet_marker: char,
    /// Markdown spelling of a hard break.
    pub hard_break: HardBreakStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mark_order: vec![
                MarkKind::Bold,
                MarkKind::Italic,
                MarkKind::Underline,
                MarkKind::Strike,
                MarkKind::Code,
                MarkKind::Link,
            ],
            bullet_marker: '-',
            hard_break: HardBreakStyle::Spaces,
        }
    }
}

impl RenderOptions {
    pub fn with_mark_order(mut self, order: Vec<MarkKind>) -> Self {
        self.mark_order = order;
        self
    }

    pub fn with_bullet_marker(mut self, marker: char) -> Self {
        self.bullet_marker = marker;
        self
    }

    /// Apply `key=value` parameters as passed through the registry
    /// (`mark-order`, `bullet-marker`, `hard-break`).
    ///
    /// Unknown keys are reported so callers can tell a typo from a no-op.
    pub fn apply_params(&mut self, params: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, value) in params {
            let invalid = || FormatError::InvalidOption {
                key: key.clone(),
                value: value.clone(),
            };
            match key.as_str() {
                "mark-order" => {
                    self.mark_order = value
                        .split(',')
                        .filter(|name| !name.trim().is_empty())
                        .map(|name| MarkKind::from_name(name).ok_or_else(invalid))
                        .collect::<Result<_, _>>()?;
                }
                "bullet-marker" => {
                    let mut chars = value.chars();
                    match (chars.next(), chars.next()) {
                        (Some(marker @ ('-' | '*' | '+')), None) => self.bullet_marker = marker,
                        _ => return Err(invalid()),
                    }
                }
                "hard-break" => {
                    self.hard_break = HardBreakStyle::from_name(value).ok_or_else(invalid)?;
                }
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown render option '{key}'"
                    )))
                }
            }
        }
        Ok(())
    }
}
