//! String utilities for the domain layer.

/// Shorten a string to at most `max_chars` characters for log output.
///
/// Counts characters, not bytes, so CJK text keeps a readable length.
/// Appends `...` when anything was cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}
