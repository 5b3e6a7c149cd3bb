//! FIFO of frames waiting for a later scheduler turn.
//!
//! When one payload carries several frames, only the first is handled in
//! the same turn it arrived. The rest wait here and are handed out one per
//! turn, so other pending work (user actions, the poll timer, the next
//! payload) gets a chance to run between them.

use std::collections::VecDeque;

use checkerwire_protocol::split_frames;

#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<String>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `payload` into frames, queues every frame after the first,
    /// and returns the first one for immediate dispatch.
    ///
    /// Returns `None` (and queues nothing) for a payload with no frames.
    pub fn accept<'a>(&mut self, payload: &'a str) -> Option<&'a str> {
        let mut frames = split_frames(payload);
        let first = frames.next()?;
        self.pending.extend(frames.map(str::to_string));
        Some(first)
    }

    /// Takes the oldest deferred frame.
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every deferred frame.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
