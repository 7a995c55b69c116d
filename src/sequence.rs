//! Caller-owned sequence numbering for outgoing audio packets

/// Monotonic 32-bit sequence counter
///
/// Each call to [`next`](Self::next) pre-increments, so the first packet of a
/// session carries sequence number 1. The counter wraps at `u32::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceCounter {
    current: u32,
}

impl SequenceCounter {
    /// Create a counter whose next value is 1
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Create a counter continuing after `last`
    #[must_use]
    pub const fn starting_after(last: u32) -> Self {
        Self { current: last }
    }

    /// Advance and return the next sequence number
    pub fn next(&mut self) -> u32 {
        self.current = self.current.wrapping_add(1);
        self.current
    }

    /// Last value handed out (0 if none yet)
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Restart numbering from 1
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
