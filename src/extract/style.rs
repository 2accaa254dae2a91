//! CSS `url(...)` parsing for the background-image kind.

use regex::Regex;
use std::sync::OnceLock;

static CSS_URL: OnceLock<Regex> = OnceLock::new();

/// Pull the URL out of a CSS `background-image` value.
///
/// Accepts `url("x")`, `url('x')`, and bare `url(x)`. Returns `None` for
/// `none`, empty values, or anything that does not match; callers collapse
/// that to the missing-property outcome rather than an error.
pub fn parse_css_url(style: &str) -> Option<String> {
    let re = CSS_URL.get_or_init(|| {
        Regex::new(r#"url\(\s*["']?(.*?)["']?\s*\)"#).expect("css url pattern")
    });
    let url = re.captures(style)?.get(1)?.as_str().trim().to_string();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}
