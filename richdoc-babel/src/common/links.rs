//! URL checks for links and images rendered into HTML.
//!
//! Stored content is written by authors, but previews are shown in a browser,
//! so only a few schemes are let through: `http`, `https` and `mailto`.
//! Relative URLs (`/about`, `img/a.png`, `#top`) carry no scheme and are
//! allowed as well.

use url::{ParseError, Url};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Whether a link target or image source may be emitted.
pub fn is_safe_url(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    match Url::parse(raw) {
        Ok(url) => ALLOWED_SCHEMES.contains(&url.scheme()),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
