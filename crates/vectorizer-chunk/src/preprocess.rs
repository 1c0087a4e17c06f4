//! Text clean-up applied before chunking.

use std::borrow::Cow;

/// Replace every run of non-ASCII characters with a single space.
///
/// No space is added at the start of the output or directly after an
/// existing space. ASCII input is returned borrowed.
pub fn strip_non_ascii(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    Cow::Owned(out)
}
