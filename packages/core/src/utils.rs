// ABOUTME: Shared utility functions for Ideaflow
// ABOUTME: Text helpers used when rendering ideas in the terminal

/// Truncate a string to at most `max_chars` characters, appending an ellipsis
/// when anything was cut off.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}
