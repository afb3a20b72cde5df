//! Rich-text interoperability for editor documents
//!
//!     This crate converts the block editor's JSON document tree to and from Markdown, and renders
//!     it to HTML for previews. Stored content may be either the JSON tree or raw Markdown; callers
//!     do not need to know which (see [`load_document`]).
//!
//!     TLDR: For format authors:
//!         - Every format reads into and writes from the one tree in ./doc/nodes.rs.
//!         - Output formats that walk the tree implement a RenderTarget (./render/mod.rs) and let
//!           the shared walker handle block coverage, mark order and list items.
//!         - Converters never fail: unknown nodes and marks are dropped, unterminated constructs
//!           run to the end of the input. Only the registry layer returns errors.
//!         - Each format has unit tests next to the code and fixtures under tests/<format>.
//!
//! Architecture
//!
//!     The tree is the hub. Markdown is read by a line scanner (block constructs) plus an ordered
//!     inline pattern table, and written through the walker. HTML is written through the walker
//!     and read back with html5ever. CommonMark goes through comrak in both directions for input
//!     the lightweight scanner only approximates.
//!
//!     This is a pure lib, that is, it powers richdoc-cli but is shell agnostic: no code should
//!     suppose a shell environment, be it std print, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── preview.rs              # {"html": ...} preview entry point
//!     ├── doc                     # Document tree and input detection
//!     ├── render                  # Shared walker, RenderTarget, RenderOptions
//!     ├── common                  # URL scheme checks
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round Tripping
//!
//!     Markdown is lossy: underline has no syntax, text is not escaped, and list tightness is not
//!     stored. For documents built from the supported node set (no underline, no Markdown
//!     metacharacters in text) parse(serialize(doc)) equals doc, and the test suite holds the
//!     markdown format to that.

pub mod common;
pub mod doc;
pub mod error;
pub mod format;
pub mod formats;
pub mod preview;
pub mod registry;
pub mod render;

pub use doc::{load_document, Block, Document, Mark, MarkKind, Span};
pub use error::FormatError;
pub use format::Format;
pub use preview::{preview, PreviewMode, PreviewResponse};
pub use registry::FormatRegistry;
pub use render::{HardBreakStyle, RenderOptions};

/// Parse Markdown text into a document tree.
pub fn parse_markdown(source: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(source)
}

/// Serialize a document tree to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    formats::markdown::serializer::serialize_to_markdown(doc, options)
}

/// Render a document tree as an HTML fragment.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    formats::html::serializer::serialize_to_html(doc, options)
}
