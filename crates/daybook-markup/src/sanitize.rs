//! Plain-text sanitizing and HTML escaping.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<([^>]+)>").unwrap()
});

/// Removes every `<...>` tag from `input`, keeping the text between tags.
///
/// Titles and other host-supplied strings may embed markup. Renderers that
/// show them as display text run them through this first.
///
/// ```rust
/// use daybook_markup::strip_tags;
///
/// assert_eq!(strip_tags("<b>Standup</b> <i>daily</i>"), "Standup daily");
/// assert_eq!(strip_tags("1 < 2"), "1 < 2");
/// ```
pub fn strip_tags(input: &str) -> String {
    TAG_PATTERN.replace_all(input, "").into_owned()
}

/// Escapes text for inclusion in HTML content or a quoted attribute.
///
/// Non-breaking spaces are written as `&nbsp;` so rendered fragments read
/// the same as hand-written markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}
