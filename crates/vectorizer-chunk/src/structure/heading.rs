//! Heading breadcrumb tracking.

/// Markdown heading levels (h1–h6).
pub const MAX_HEADING_LEVELS: usize = 6;

/// Most recent heading text per level.
///
/// Slot `i` holds the active heading at level `i + 1`. Setting a heading
/// clears every deeper level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingStack {
    slots: [Option<String>; MAX_HEADING_LEVELS],
}

impl HeadingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading at `level` (clamped to 1–6).
    pub fn push(&mut self, level: usize, text: &str) {
        let idx = level.clamp(1, MAX_HEADING_LEVELS) - 1;
        for slot in &mut self.slots[idx + 1..] {
            *slot = None;
        }
        self.slots[idx] = Some(text.to_string());
    }

    /// Breadcrumb of the active headings, shallowest first.
    ///
    /// Format: `"# H1 > ## H2 > ### H3"`. `None` when no heading is active.
    pub fn context(&self) -> Option<String> {
        let parts: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .map(|text| format!("{} {}", "#".repeat(idx + 1), text))
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" > "))
        }
    }
}
