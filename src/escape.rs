// HTML escaping for text and attribute contexts.
//
// Only the mandatory replacements are performed: text content needs `&` and
// `<` neutralized, attribute values (always double-quoted here) need `&` and
// `"`. In both, `&` is replaced first so the entities introduced by the
// second replacement survive.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Escape a fragment destined for HTML text content.
///
/// `&` becomes `&amp;` and `<` becomes `&lt;`.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    static NEEDS_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[&<]").unwrap());

    // Fast path: nothing to escape — return borrowed slice, zero allocation.
    if !NEEDS_ESCAPE.is_match(text) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(text.replace('&', "&amp;").replace('<', "&lt;"))
}

/// Escape a fragment destined for a double-quoted HTML attribute value.
///
/// `&` becomes `&amp;` and `"` becomes `&quot;`.
pub(crate) fn escape_attr(text: &str) -> Cow<'_, str> {
    static NEEDS_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[&\"]").unwrap());

    if !NEEDS_ESCAPE.is_match(text) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(text.replace('&', "&amp;").replace('"', "&quot;"))
}
