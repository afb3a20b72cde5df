//! The rich-text document tree.
//!
//! This module defines the editor's document model ([`nodes`]) and the entry
//! point that turns stored content, JSON or Markdown, into a tree ([`load`]).

pub mod load;
pub mod nodes;

pub use load::{load_document, Source};
pub use nodes::{
    Block, CodeBlockAttrs, Document, HeadingAttrs, ImageAttrs, LinkAttrs, Mark, MarkKind,
    OrderedListAttrs, Span, TaskItemAttrs,
};
