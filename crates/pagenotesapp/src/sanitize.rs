//! Input sanitization for note fields.
//!
//! Every write path runs `content`, `url` and `page_title` through
//! [`sanitize`]. Stored values are trusted and never re-sanitized on read.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Strips anything that looks like an HTML tag, then trims surrounding whitespace.
///
/// # Examples
/// ```
/// use pagenotesapp::sanitize::sanitize;
///
/// assert_eq!(sanitize("  <b>Hi</b> there  "), "Hi there");
/// assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
/// assert_eq!(sanitize("a < b"), "a < b");
/// assert_eq!(sanitize("   "), "");
/// ```
pub fn sanitize(input: &str) -> String {
    TAG_PATTERN.replace_all(input, "").trim().to_string()
}
