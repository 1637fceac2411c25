//! Shared utility functions and constants

/// Number of characters shown in a match preview
pub const PREVIEW_LEN: usize = 10;

/// Truncate to at most `max` characters, adding "..." if truncated
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}

/// Character offset of a byte offset on a character boundary
pub fn char_offset(s: &str, byte_offset: usize) -> usize {
    s.get(..byte_offset)
        .map_or_else(|| s.chars().count(), |prefix| prefix.chars().count())
}

/// Pad with spaces to `width` display columns, counting wide characters as two
pub fn pad_display(s: &str, width: usize) -> String {
    let columns: usize = s.chars().map(display_width).sum();
    if columns >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - columns))
    }
}

fn display_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}
