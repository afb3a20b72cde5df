//! Named formats
//!
//! The registry maps format names (`json`, `markdown`, `html`, `commonmark`)
//! and file extensions to [`Format`] implementations. It is the one place that
//! turns a format name into an error: unknown names give
//! [`FormatError::FormatNotFound`], and asking a format for a direction it
//! lacks gives [`FormatError::NotSupported`].

use crate::doc::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{CommonMarkFormat, HtmlFormat, JsonFormat, MarkdownFormat};
use crate::render::RenderOptions;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Conversion direction a caller needs from a format.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Parse,
    Serialize,
}

/// Formats by name, kept in name order.
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let doc = registry.parse("# Title", "markdown")?;
/// let html = registry.serialize(&doc, "html")?;
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Add a format under its own name, replacing any format of that name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// The format claiming the extension of `filename`. When two formats claim
    /// the same extension the one first in name order wins.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Parse `source` with the named format.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        self.capable(format, Direction::Parse)?.parse(source)
    }

    /// Serialize `doc` with the named format and its default options.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize `doc` with the named format, passing extra parameters
    /// (`--extra-*` on the command line) through to it.
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.capable(format, Direction::Serialize)?
            .serialize_with_options(doc, options)
    }

    fn capable(&self, name: &str, direction: Direction) -> Result<&dyn Format, FormatError> {
        let format = self.get(name)?;
        let (supported, verb) = match direction {
            Direction::Parse => (format.supports_parsing(), "parsing"),
            Direction::Serialize => (format.supports_serialization(), "serialization"),
        };
        if supported {
            Ok(format)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{name}' does not support {verb}"
            )))
        }
    }

    /// The built-in formats with default render options.
    pub fn with_defaults() -> Self {
        Self::with_render_options(&RenderOptions::default())
    }

    /// The built-in formats, with the writers rendering through `options`.
    pub fn with_render_options(options: &RenderOptions) -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat);
        registry.register(MarkdownFormat::new(options.clone()));
        registry.register(HtmlFormat::new(options.clone()));
        registry.register(CommonMarkFormat::new(options.clone()));
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
