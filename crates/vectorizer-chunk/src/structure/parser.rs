//! Line-by-line markdown structure parser.

use tracing::debug;

use super::heading::HeadingStack;
use super::lines;
use super::{ElementKind, StructuralElement};
use crate::tokenizer::TokenEstimator;

/// Parse markdown-flavoured text into structural elements, in document order.
///
/// Consecutive list, blockquote and table lines accumulate into one element
/// each; blank lines, headings, rules and code fences end the current block.
/// Every element carries the heading breadcrumb in effect on its own line.
pub fn parse_markdown_structure(
    text: &str,
    estimator: &dyn TokenEstimator,
) -> Vec<StructuralElement> {
    let mut parser = StructureParser::new(estimator);
    for raw in text.split_inclusive('\n') {
        match raw.strip_suffix('\n') {
            Some(line) => parser.feed(line, true),
            None => parser.feed(raw, false),
        }
    }
    let elements = parser.finish();
    debug!("Parsed {} markdown elements", elements.len());
    elements
}

struct StructureParser<'e> {
    estimator: &'e dyn TokenEstimator,
    elements: Vec<StructuralElement>,
    buffer: String,
    kind: ElementKind,
    in_code_block: bool,
    headings: HeadingStack,
    context: Option<String>,
}

impl<'e> StructureParser<'e> {
    fn new(estimator: &'e dyn TokenEstimator) -> Self {
        Self {
            estimator,
            elements: Vec::new(),
            buffer: String::new(),
            kind: ElementKind::Paragraph,
            in_code_block: false,
            headings: HeadingStack::new(),
            context: None,
        }
    }

    fn feed(&mut self, line: &str, has_newline: bool) {
        if lines::is_code_fence(line) {
            if self.in_code_block {
                self.push_verbatim(line, has_newline);
                self.kind = ElementKind::CodeBlock;
                self.flush();
                self.in_code_block = false;
                self.kind = ElementKind::Paragraph;
                return;
            }
            self.flush();
            self.in_code_block = true;
            self.kind = ElementKind::CodeBlock;
        }

        if self.in_code_block {
            self.push_verbatim(line, has_newline);
            return;
        }

        if lines::is_blank(line) {
            self.flush();
            self.kind = ElementKind::Paragraph;
            return;
        }

        if let Some(level) = lines::heading_level(line) {
            self.flush();
            self.headings.push(level, lines::heading_text(line, level));
            self.context = self.headings.context();
            self.emit(ElementKind::Heading, level, line.to_string());
            self.kind = ElementKind::Paragraph;
            return;
        }

        if lines::is_horizontal_rule(line) {
            self.flush();
            self.emit(ElementKind::HorizontalRule, 0, line.to_string());
            self.kind = ElementKind::Paragraph;
            return;
        }

        if let Some(kind) = lines::block_kind(line) {
            if kind != self.kind {
                self.flush();
                self.kind = kind;
            }
        }

        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
    }

    fn push_verbatim(&mut self, line: &str, has_newline: bool) {
        self.buffer.push_str(line);
        if has_newline {
            self.buffer.push('\n');
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.buffer);
        self.emit(self.kind, 0, content);
    }

    fn emit(&mut self, kind: ElementKind, heading_level: usize, content: String) {
        let token_count = match kind {
            ElementKind::HorizontalRule => 1,
            _ => self.estimator.count_tokens(&content),
        };
        self.elements.push(StructuralElement {
            kind,
            heading_level,
            content,
            token_count,
            heading_context: self.context.clone(),
        });
    }

    fn finish(mut self) -> Vec<StructuralElement> {
        self.flush();
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CharEstimator;

    fn parse(text: &str) -> Vec<StructuralElement> {
        parse_markdown_structure(text, &CharEstimator::default())
    }

    fn kinds(elements: &[StructuralElement]) -> Vec<ElementKind> {
        elements.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_heading_context_resets_on_new_top_level() {
        let elements = parse("# A\n\n## B\n\nX\n\n# C\n\nY");
        assert_eq!(
            kinds(&elements),
            vec![
                ElementKind::Heading,
                ElementKind::Heading,
                ElementKind::Paragraph,
                ElementKind::Heading,
                ElementKind::Paragraph,
            ]
        );

        let x = &elements[2];
        assert_eq!(x.content, "X");
        assert_eq!(x.heading_context.as_deref(), Some("# A > ## B"));

        let y = &elements[4];
        assert_eq!(y.content, "Y");
        assert_eq!(y.heading_context.as_deref(), Some("# C"));
    }

    #[test]
    fn test_heading_element_carries_its_own_context() {
        let elements = parse("# A\n## B");
        assert_eq!(elements[0].heading_level, 1);
        assert_eq!(elements[0].content, "# A");
        assert_eq!(elements[0].heading_context.as_deref(), Some("# A"));
        assert_eq!(elements[1].heading_level, 2);
        assert_eq!(elements[1].heading_context.as_deref(), Some("# A > ## B"));
    }

    #[test]
    fn test_text_before_any_heading_has_no_context() {
        let elements = parse("Preamble line one\nline two\n\n# Title");
        assert_eq!(elements[0].kind, ElementKind::Paragraph);
        assert_eq!(elements[0].content, "Preamble line one\nline two");
        assert_eq!(elements[0].heading_context, None);
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let text = "Intro\n```python\n# not a heading\n\nprint(1)\n```\nAfter";
        let elements = parse(text);
        assert_eq!(
            kinds(&elements),
            vec![
                ElementKind::Paragraph,
                ElementKind::CodeBlock,
                ElementKind::Paragraph
            ]
        );
        assert_eq!(elements[0].content, "Intro");
        assert_eq!(
            elements[1].content,
            "```python\n# not a heading\n\nprint(1)\n```\n"
        );
        assert_eq!(elements[2].content, "After");
    }

    #[test]
    fn test_unclosed_code_block_is_flushed_at_end() {
        let elements = parse("```\nfn main() {}\n");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::CodeBlock);
        assert_eq!(elements[0].content, "```\nfn main() {}\n");
    }

    #[test]
    fn test_consecutive_list_lines_accumulate() {
        let elements = parse("Shopping:\n- eggs\n- milk\n1. later\n\nDone.");
        assert_eq!(
            kinds(&elements),
            vec![
                ElementKind::Paragraph,
                ElementKind::ListItem,
                ElementKind::Paragraph
            ]
        );
        assert_eq!(elements[1].content, "- eggs\n- milk\n1. later");
    }

    #[test]
    fn test_kind_switches_flush_previous_block() {
        let elements = parse("> quote one\n> quote two\n| a | b |\n| 1 | 2 |\n- item");
        assert_eq!(
            kinds(&elements),
            vec![
                ElementKind::Blockquote,
                ElementKind::Table,
                ElementKind::ListItem
            ]
        );
        assert_eq!(elements[0].content, "> quote one\n> quote two");
        assert_eq!(elements[1].content, "| a | b |\n| 1 | 2 |");
    }

    #[test]
    fn test_plain_continuation_joins_current_block() {
        let elements = parse("- item\n  wrapped continuation");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::ListItem);
    }

    #[test]
    fn test_horizontal_rule_is_standalone() {
        let elements = parse("# T\nAbove\n---\nBelow");
        assert_eq!(
            kinds(&elements),
            vec![
                ElementKind::Heading,
                ElementKind::Paragraph,
                ElementKind::HorizontalRule,
                ElementKind::Paragraph
            ]
        );
        assert_eq!(elements[2].token_count, 1);
        assert_eq!(elements[2].heading_context.as_deref(), Some("# T"));
    }

    #[test]
    fn test_token_counts_cover_final_content() {
        let elements = parse("# T\n\nabcd efgh\nijkl");
        let para = &elements[1];
        assert_eq!(para.content, "abcd efgh\nijkl");
        assert_eq!(para.token_count, 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
