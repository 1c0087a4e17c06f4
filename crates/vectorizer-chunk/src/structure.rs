//! Markdown structure: detection, line classification and parsing.
//!
//! The parser turns markdown-flavoured text into a flat list of typed
//! elements. Each element remembers the heading breadcrumb it appeared under,
//! which the hybrid and structural chunkers prepend to their output.

pub mod detect;
pub mod heading;
pub mod lines;
pub mod parser;

use serde::{Deserialize, Serialize};

pub use detect::{detect_indicators, is_likely_markdown, Indicators};
pub use heading::{HeadingStack, MAX_HEADING_LEVELS};
pub use parser::parse_markdown_structure;

/// Kind of a parsed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Heading,
    Paragraph,
    CodeBlock,
    ListItem,
    Blockquote,
    Table,
    HorizontalRule,
}

/// One block of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralElement {
    pub kind: ElementKind,
    /// 1–6 for headings, 0 otherwise.
    pub heading_level: usize,
    pub content: String,
    pub token_count: usize,
    /// Breadcrumb such as `"# Guide > ## Install"`.
    pub heading_context: Option<String>,
}
