//! String utilities

/// Truncate a string to a maximum length, adding "..." if truncated
///
/// Handles UTF-8 character boundaries correctly.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    if max_len <= 3 {
        return "...".to_string();
    }

    let mut truncate_at = max_len - 3;
    while truncate_at > 0 && !s.is_char_boundary(truncate_at) {
        truncate_at -= 1;
    }

    format!("{}...", &s[..truncate_at])
}

/// Printable preview of a request body: lossy UTF-8, cut at `max_len` bytes
pub fn body_preview(body: &[u8], max_len: usize) -> String {
    truncate_str(&String::from_utf8_lossy(body), max_len)
}
