//! Log sanitization utilities
//!
//! Response bodies can be large record collections. Logs get a bounded,
//! single-line excerpt instead of the full payload.

/// Maximum number of bytes of body text included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a body for logging.
///
/// Line breaks are folded into spaces so one response stays one log line.
/// Bodies over the limit keep their first `TRUNCATE_LIMIT` bytes plus a note
/// with the total length.
pub fn truncate_for_log(s: &str) -> String {
    let excerpt = &s[..floor_char_boundary(s, TRUNCATE_LIMIT)];
    let folded: String = excerpt
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if excerpt.len() == s.len() {
        folded
    } else {
        format!("{folded}... [truncated, total {} bytes]", s.len())
    }
}
