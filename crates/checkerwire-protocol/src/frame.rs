//! Splitting transport payloads into frames.
//!
//! The server writes one command per line, but the transport is free to
//! coalesce several writes into a single delivery ("sticky" messages). A
//! payload must therefore be re-split before decoding, or every command
//! after the first would be lost.

/// Splits a payload into its non-empty lines, in order.
///
/// Both `\n` and `\r\n` line endings are accepted. Blank lines are dropped.
pub fn split_frames(payload: &str) -> impl Iterator<Item = &str> {
    payload.lines().filter(|line| !line.is_empty())
}
