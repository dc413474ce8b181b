//! Plain-text previews of HTML fields.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"))
}

/// Strips HTML tags, leaving the text content.
///
/// Used where a screen shows an HTML field as plain text (question prompts,
/// list previews). Proper HTML rendering belongs to the host.
pub fn strip_tags(html: &str) -> String {
    tag_pattern().replace_all(html, "").trim().to_string()
}
