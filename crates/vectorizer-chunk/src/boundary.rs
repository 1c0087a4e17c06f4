//! Break-point search near a target offset.

/// Bytes searched on each side of the target offset.
pub const SEARCH_WINDOW: usize = 50;

/// Find a cut point near `target_offset`, never beyond `max_offset`.
///
/// Looks within [`SEARCH_WINDOW`] bytes either side of the target for, in
/// order of preference, a paragraph break, a sentence end, then a word
/// break. The lowest matching offset of the best tier wins. Without any
/// match the target itself is returned.
///
/// Every offset returned is a char boundary of `text` provided the target
/// and `max_offset` are.
pub fn find_break(text: &str, target_offset: usize, max_offset: usize) -> usize {
    if target_offset >= max_offset {
        return max_offset;
    }

    let bytes = text.as_bytes();
    let lo = target_offset.saturating_sub(SEARCH_WINDOW);
    let hi = (target_offset + SEARCH_WINDOW)
        .min(max_offset)
        .min(bytes.len());
    let window = || lo..hi;

    let paragraph = |o: usize| o > 0 && bytes[o - 1] == b'\n' && bytes[o] == b'\n';
    let sentence = |o: usize| {
        o > 0 && matches!(bytes[o - 1], b'.' | b'?' | b'!') && matches!(bytes[o], b' ' | b'\n')
    };
    let word = |o: usize| matches!(bytes[o], b' ' | b'\n');

    window()
        .find(|&o| paragraph(o))
        .or_else(|| window().find(|&o| sentence(o)))
        .or_else(|| window().find(|&o| word(o)))
        .unwrap_or(target_offset)
}
