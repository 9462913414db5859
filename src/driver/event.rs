//! Transfer event flags and interrupt direction.
//!
//! This module provides the [`Events`] bitmask exchanged with the HAL's
//! ISR-side event decoder, and the [`Direction`] selector for the two
//! independent completion interrupt sources.

/// Interrupt direction selector.
///
/// TX and RX completions arrive on independent interrupt sources and may
/// fire at different times in full-duplex mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Transmit-side interrupt source
    Tx,
    /// Receive-side interrupt source
    Rx,
}

/// Bitmask of transfer events.
///
/// A transfer requests callback delivery for a subset of these via its
/// event mask; the HAL's ISR-side decoder reports which ones actually
/// occurred. [`Events::TRANSFER_FINISHED`] is an internal marker: it drives
/// queue promotion but is never delivered to user callbacks.
///
/// # Example
///
/// ```ignore
/// let events = hal.decode_irq_event(Direction::Tx);
/// if events.intersects(Events::ALL) {
///     // deliver callback
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events(u32);

impl Events {
    /// No events
    pub const NONE: Events = Events(0);
    /// Transfer failed
    pub const ERROR: Events = Events(1 << 1);
    /// Transfer completed
    pub const COMPLETE: Events = Events(1 << 2);
    /// Receive FIFO overflowed during the transfer
    pub const RX_OVERFLOW: Events = Events(1 << 3);
    /// Transmit FIFO underran during the transfer
    pub const TX_UNDERRUN: Events = Events(1 << 4);
    /// All user-visible events (the completion set for callback delivery)
    pub const ALL: Events = Events(1 << 1 | 1 << 2 | 1 << 3 | 1 << 4);
    /// Internal transfer-finished marker.
    ///
    /// Reported by the HAL when the hardware transfer is done regardless of
    /// the transfer's requested event mask, so that queue promotion still
    /// runs for fire-and-forget transfers.
    pub const TRANSFER_FINISHED: Events = Events(1 << 31);

    /// Create from a raw bitmask
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Events(bits)
    }

    /// Raw bitmask value
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if no events are set
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two event sets
    #[inline]
    #[must_use]
    pub const fn union(self, other: Events) -> Self {
        Events(self.0 | other.0)
    }

    /// Events present in both sets
    #[inline]
    #[must_use]
    pub const fn masked(self, mask: Events) -> Self {
        Events(self.0 & mask.0)
    }

    /// Check if any event in `other` is also set in `self`
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Events) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if every event in `other` is set in `self`
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Events) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Events {
    type Output = Events;

    #[inline]
    fn bitor(self, rhs: Events) -> Events {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for Events {
    #[inline]
    fn bitor_assign(&mut self, rhs: Events) {
        *self = self.union(rhs);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_none_is_empty() {
        assert!(Events::NONE.is_empty());
        assert_eq!(Events::NONE.bits(), 0);
    }

    #[test]
    fn events_all_covers_user_events() {
        assert!(Events::ALL.contains(Events::ERROR));
        assert!(Events::ALL.contains(Events::COMPLETE));
        assert!(Events::ALL.contains(Events::RX_OVERFLOW));
        assert!(Events::ALL.contains(Events::TX_UNDERRUN));
    }

    #[test]
    fn events_all_excludes_internal_marker() {
        assert!(!Events::ALL.intersects(Events::TRANSFER_FINISHED));
    }

    #[test]
    fn events_union() {
        let combined = Events::COMPLETE | Events::ERROR;
        assert!(combined.contains(Events::COMPLETE));
        assert!(combined.contains(Events::ERROR));
        assert!(!combined.contains(Events::RX_OVERFLOW));
    }

    #[test]
    fn events_masked() {
        let decoded = Events::COMPLETE | Events::TRANSFER_FINISHED;
        let visible = decoded.masked(Events::ALL);

        assert_eq!(visible, Events::COMPLETE);
    }

    #[test]
    fn events_intersects() {
        let decoded = Events::TRANSFER_FINISHED;

        assert!(!decoded.intersects(Events::ALL));
        assert!(decoded.intersects(Events::ALL.union(Events::TRANSFER_FINISHED)));
    }

    #[test]
    fn events_bits_roundtrip() {
        let events = Events::COMPLETE | Events::RX_OVERFLOW;
        assert_eq!(Events::from_bits(events.bits()), events);
    }

    #[test]
    fn events_bitor_assign() {
        let mut events = Events::NONE;
        events |= Events::ERROR;
        assert_eq!(events, Events::ERROR);
    }
}
