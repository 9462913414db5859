//! Bounded FIFO queue for pending transfers.
//!
//! Fixed-capacity ring with wraparound indices. One queue exists per
//! peripheral kind (shared by all driver instances), because only one
//! physical transfer can be outstanding regardless of which instance
//! requested it. The queue itself is not synchronized; callers access it
//! through the same critical-section cell that guards the admission state.

/// Fixed-capacity FIFO ring.
///
/// `DEPTH` is a compile-time configuration value. A depth of 0 is a legal
/// configuration meaning "no queueing": every push fails, so a submission
/// that finds the hardware busy is rejected immediately.
pub struct TransferQueue<T, const DEPTH: usize> {
    slots: [Option<T>; DEPTH],
    head: usize,
    len: usize,
}

impl<T: Copy, const DEPTH: usize> TransferQueue<T, DEPTH> {
    /// Create an empty queue (const, suitable for static initialization).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; DEPTH],
            head: 0,
            len: 0,
        }
    }

    /// Append an entry at the tail.
    ///
    /// Returns `false` (and drops the entry) if the queue is full.
    pub fn push(&mut self, entry: T) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = (self.head + self.len) % DEPTH;
        self.slots[tail] = Some(entry);
        self.len += 1;
        true
    }

    /// Remove and return the oldest entry, if any.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let entry = self.slots[self.head].take();
        self.head = (self.head + 1) % DEPTH;
        self.len -= 1;
        entry
    }

    /// Discard all pending entries.
    pub fn clear(&mut self) {
        self.slots = [None; DEPTH];
        self.head = 0;
        self.len = 0;
    }

    /// Number of pending entries
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check whether the queue has no pending entries
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether the queue has no remaining capacity
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == DEPTH
    }

    /// Maximum number of pending entries
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        DEPTH
    }
}

impl<T: Copy, const DEPTH: usize> Default for TransferQueue<T, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
