/// Longest query forwarded to a search backend.
pub(crate) const MAX_QUERY_CHARS: usize = 300;

/// Returns at most `max_chars` characters of `text`, cut on a character
/// boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
