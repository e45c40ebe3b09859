//! Best-effort markup sanitization.
//!
//! A denylist filter: `<script>` blocks and inline `on*` event-handler
//! attributes are stripped before markup is written into the document. This
//! is not a full HTML-safety guarantee; translation tables are trusted page
//! assets, not adversarial input. Content from untrusted sources would need
//! a real parsing sanitizer instead.

use std::sync::LazyLock;

use regex::Regex;

/// `<script>...</script>` blocks, case-insensitive, non-greedy across lines.
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?is)<script\b.*?</script>"));

/// Quoted inline handlers: `onclick="..."` or `onclick='...'`.
static QUOTED_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| compiled(r#"(?i)\son\w+\s*=\s*["'][^"']*["']"#));

/// Unquoted inline handlers: `onclick=alert(1)`.
static UNQUOTED_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)\son\w+\s*=\s*[^\s>]*"));

/// Compile a pattern known valid at authoring time.
fn compiled(pattern: &str) -> Regex {
    #[allow(clippy::expect_used)]
    let re = Regex::new(pattern).expect("hard-coded sanitizer pattern");
    re
}

/// Strip script blocks and inline event handlers from markup.
///
/// Applied in order: script blocks, quoted `on*` attributes, unquoted `on*`
/// attributes. Everything else passes through unchanged.
#[must_use]
pub fn sanitize(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, "");
    let without_quoted = QUOTED_HANDLER.replace_all(&without_scripts, "");
    UNQUOTED_HANDLER.replace_all(&without_quoted, "").into_owned()
}
