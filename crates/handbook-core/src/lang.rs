//! Region-qualified language codes (`en-GB`, `ja-JP`).

/// Check whether `segment` looks like a region-qualified language code:
/// two lowercase ASCII letters, a hyphen, two uppercase ASCII letters.
pub fn is_language_code(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_lowercase()
        && bytes[1].is_ascii_lowercase()
        && bytes[2] == b'-'
        && bytes[3].is_ascii_uppercase()
        && bytes[4].is_ascii_uppercase()
}
