/// Closing delimiter emitted by reasoning models after their deliberation.
pub const REASONING_END_MARKER: &str = "</think>";

/// Drops the model's deliberation from `text`.
///
/// When `marker` occurs, only the text after its last occurrence is kept,
/// byte for byte. Text without the marker is returned unchanged.
pub fn strip_reasoning<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.rsplit_once(marker) {
        Some((_, answer)) => answer,
        None => text,
    }
}
