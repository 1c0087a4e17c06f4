//! Cheap markdown sniffing.
//!
//! Structure-aware chunking only pays off for real markdown. Plain text goes
//! to the token chunker instead.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}(?:[ \t]|$)").unwrap());
static LIST_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+]|[0-9]+[.)])[ \t]").unwrap());

/// Markdown features seen in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub heading: bool,
    pub code_fence: bool,
    pub list: bool,
    pub blockquote: bool,
    pub table: bool,
    pub link: bool,
}

impl Indicators {
    /// Number of distinct features seen.
    pub fn count(&self) -> usize {
        [
            self.heading,
            self.code_fence,
            self.list,
            self.blockquote,
            self.table,
            self.link,
        ]
        .iter()
        .filter(|&&seen| seen)
        .count()
    }

    /// A heading or a code fence on its own, or any two features.
    pub fn is_markdown(&self) -> bool {
        self.heading || self.code_fence || self.count() >= 2
    }
}

/// Whether `text` looks like markdown.
pub fn is_likely_markdown(text: &str) -> bool {
    scan(text, true).is_markdown()
}

/// Every markdown feature present in `text`.
pub fn detect_indicators(text: &str) -> Indicators {
    scan(text, false)
}

fn scan(text: &str, stop_when_confident: bool) -> Indicators {
    let mut found = Indicators::default();
    if text.is_empty() {
        return found;
    }

    // Open `[` count; a `]` that closes one and is followed by `(` is a link.
    // Brackets pair across line breaks.
    let mut open_brackets = 0usize;

    for line in text.split('\n') {
        let start = line.trim_start_matches(' ');
        // Up to three spaces of indentation still open a block.
        let start = if line.len() - start.len() <= 3 {
            start
        } else {
            &line[3..]
        };

        found.heading |= HEADING_START_RE.is_match(start);
        found.code_fence |= start.starts_with("```") || start.starts_with("~~~");
        found.list |= LIST_START_RE.is_match(start);
        found.blockquote |= start.starts_with('>');
        found.table |= line.matches('|').count() >= 2;

        if !found.link {
            let bytes = line.as_bytes();
            for (i, &b) in bytes.iter().enumerate() {
                match b {
                    b'[' => open_brackets += 1,
                    b']' if open_brackets > 0 => {
                        open_brackets -= 1;
                        if bytes.get(i + 1) == Some(&b'(') {
                            found.link = true;
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }

        if stop_when_confident && found.count() >= 2 {
            break;
        }
    }

    found
}
