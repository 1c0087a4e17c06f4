//! Single-line markdown classifiers.
//!
//! Lines are passed without their trailing `\n`. A trailing `\r` is kept and
//! treated as ordinary content except by [`is_blank`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::ElementKind;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})(?:[ \t]|$)").unwrap());
static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(?:```|~~~)").unwrap());
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*(?:[-*+]|[0-9]+[.)])[ \t]").unwrap());
static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}>").unwrap());
static HORIZONTAL_RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-[ ]*){3,}|(?:\*[ ]*){3,}|(?:_[ ]*){3,})$").unwrap()
});

/// Empty, or only spaces, tabs and carriage returns.
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r'))
}

/// ATX heading level, 1–6. The `#` run must start the line and be followed
/// by a space, a tab, or the end of the line.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING_RE.captures(line).map(|caps| caps[1].len())
}

/// Heading text without its `#` run and the whitespace after it.
pub fn heading_text(line: &str, level: usize) -> &str {
    line.get(level..)
        .unwrap_or("")
        .trim_start_matches([' ', '\t'])
}

/// ```` ``` ```` or `~~~` after at most three spaces.
pub fn is_code_fence(line: &str) -> bool {
    CODE_FENCE_RE.is_match(line)
}

/// `-`, `*`, `+`, or digits followed by `.` or `)`, then a space or tab.
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM_RE.is_match(line)
}

pub fn is_blockquote(line: &str) -> bool {
    BLOCKQUOTE_RE.is_match(line)
}

/// Three or more of the same `-`, `*` or `_`, optionally space-separated.
pub fn is_horizontal_rule(line: &str) -> bool {
    HORIZONTAL_RULE_RE.is_match(line)
}

pub fn is_table_row(line: &str) -> bool {
    line.contains('|')
}

/// Block kind a line opens or continues, for the kinds that accumulate.
///
/// A line matching several kinds resolves to the last of list item,
/// blockquote, table row.
pub fn block_kind(line: &str) -> Option<ElementKind> {
    if is_table_row(line) {
        Some(ElementKind::Table)
    } else if is_blockquote(line) {
        Some(ElementKind::Blockquote)
    } else if is_list_item(line) {
        Some(ElementKind::ListItem)
    } else {
        None
    }
}
