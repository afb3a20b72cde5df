//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and various text representations.

pub mod commonmark;
pub mod html;
pub mod json;
pub mod markdown;

pub use commonmark::CommonMarkFormat;
pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
