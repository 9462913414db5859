//! Transfer descriptors and the fluent transfer builder.
//!
//! A [`Transfer`] is an immutable-once-built value describing one transfer
//! request: optional TX and RX buffer views, the circular flag, and an
//! optional completion callback with its event mask. It is produced by
//! [`TransferBuilder`] and consumed exactly once by the admission controller,
//! either started immediately or copied into a queue slot.

use crate::driver::error::Result;
use crate::driver::event::Events;
use crate::driver::i2s::I2s;
use crate::hal::I2sHal;

/// Raw buffer view handed to the hardware and echoed back to callbacks.
///
/// A (pointer, length) pair; length 0 means the buffer is absent. This is a
/// plain value with no ownership semantics: the caller must keep the memory
/// alive and untouched until the transfer's completion callback has been
/// dispatched (or the transfer aborted). The core never dereferences it.
#[derive(Debug, Clone, Copy)]
pub struct Buf {
    ptr: *mut u8,
    len: usize,
}

impl Buf {
    /// An absent buffer (null, length 0)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: core::ptr::null_mut(),
            len: 0,
        }
    }

    /// Create a buffer view from a raw pointer and length in bytes
    #[must_use]
    pub const fn new(ptr: *mut u8, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Base pointer of the view
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr(self) -> *mut u8 {
        self.ptr
    }

    /// Length of the view in bytes
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Check whether the buffer is absent (length 0)
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

impl Default for Buf {
    fn default() -> Self {
        Self::empty()
    }
}

/// Completion callback: (tx buffer view, rx buffer view, triggering events).
///
/// Always dispatched from the deferred execution context, never from the
/// interrupt handler.
pub type EventCallback = fn(Buf, Buf, Events);

/// One transfer request, immutable once built.
///
/// A descriptor with both buffers absent is legal and produces a zero-length
/// transfer. A descriptor without a callback is a fire-and-forget transfer.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    tx: Buf,
    rx: Buf,
    circular: bool,
    callback: Option<EventCallback>,
    event_mask: Events,
}

impl Transfer {
    pub(crate) const fn empty() -> Self {
        Self {
            tx: Buf::empty(),
            rx: Buf::empty(),
            circular: false,
            callback: None,
            event_mask: Events::NONE,
        }
    }

    /// Write buffer view (length 0 when absent)
    #[inline]
    #[must_use]
    pub const fn tx(&self) -> Buf {
        self.tx
    }

    /// Read buffer view (length 0 when absent)
    #[inline]
    #[must_use]
    pub const fn rx(&self) -> Buf {
        self.rx
    }

    /// Whether hardware should auto-repeat the transfer
    #[inline]
    #[must_use]
    pub const fn circular(&self) -> bool {
        self.circular
    }

    /// Events the caller asked to be notified about
    #[inline]
    #[must_use]
    pub const fn event_mask(&self) -> Events {
        self.event_mask
    }

    #[inline]
    pub(crate) const fn callback(&self) -> Option<EventCallback> {
        self.callback
    }
}

/// Fluent, one-shot accumulator for a transfer request.
///
/// Returned by [`I2s::transfer`]. Each parameter has a dedicated method so
/// the many optional parameters are easy to identify and set. The transfer
/// is submitted when [`apply`](TransferBuilder::apply) is called, or
/// implicitly when the builder goes out of scope.
///
/// # Contract
///
/// - Each of `tx` / `rx` / `callback` / `circular` may be set at most once
///   per builder; a second call panics (programming error, fails fast).
/// - Exactly one submission occurs per builder. `apply` is idempotent:
///   calling it again returns the cached result without re-submitting, and
///   the drop-time implicit finalize is a no-op after an explicit `apply`.
///
/// # Example
///
/// ```ignore
/// let rc = i2s
///     .transfer()
///     .tx(Buf::new(buf.as_mut_ptr(), buf.len()))
///     .callback(on_done, Events::COMPLETE)
///     .apply();
/// ```
pub struct TransferBuilder<'a, H: I2sHal, const DEPTH: usize> {
    owner: &'a I2s<'a, H, DEPTH>,
    transfer: Transfer,
    circular_set: bool,
    applied: Option<Result<()>>,
}

impl<'a, H: I2sHal, const DEPTH: usize> TransferBuilder<'a, H, DEPTH> {
    pub(crate) const fn new(owner: &'a I2s<'a, H, DEPTH>) -> Self {
        Self {
            owner,
            transfer: Transfer::empty(),
            circular_set: false,
            applied: None,
        }
    }

    /// Set the transmit buffer.
    ///
    /// # Panics
    ///
    /// Panics if a transmit buffer was already set on this builder.
    #[must_use]
    pub fn tx(mut self, buf: Buf) -> Self {
        assert!(self.transfer.tx.is_empty(), "tx buffer already set");
        self.transfer.tx = buf;
        self
    }

    /// Set the receive buffer.
    ///
    /// # Panics
    ///
    /// Panics if a receive buffer was already set on this builder.
    #[must_use]
    pub fn rx(mut self, buf: Buf) -> Self {
        assert!(self.transfer.rx.is_empty(), "rx buffer already set");
        self.transfer.rx = buf;
        self
    }

    /// Set the completion callback and the events that should trigger it.
    ///
    /// The callback is posted to the deferred execution context, never run
    /// in interrupt context.
    ///
    /// # Panics
    ///
    /// Panics if a callback was already set on this builder.
    #[must_use]
    pub fn callback(mut self, callback: EventCallback, events: Events) -> Self {
        assert!(self.transfer.callback.is_none(), "callback already set");
        self.transfer.callback = Some(callback);
        self.transfer.event_mask = events;
        self
    }

    /// Set whether hardware should auto-repeat the transfer.
    ///
    /// # Panics
    ///
    /// Panics if the circular flag was already set on this builder.
    #[must_use]
    pub fn circular(mut self, circular: bool) -> Self {
        assert!(!self.circular_set, "circular flag already set");
        self.circular_set = true;
        self.transfer.circular = circular;
        self
    }

    /// Submit the accumulated transfer to the admission controller.
    ///
    /// Returns `Ok(())` if the transfer started or was queued, or
    /// [`Error::QueueFull`](crate::Error::QueueFull) if the hardware is busy
    /// and the pending queue has no capacity. Idempotent: a second call
    /// returns the first result without re-submitting.
    pub fn apply(&mut self) -> Result<()> {
        if self.applied.is_none() {
            self.applied = Some(self.owner.submit(self.transfer));
        }
        // Cached above, present on every path.
        self.applied.unwrap_or(Ok(()))
    }
}

impl<H: I2sHal, const DEPTH: usize> Drop for TransferBuilder<'_, H, DEPTH> {
    /// Implicit finalize: a builder that leaves scope without an explicit
    /// [`apply`](TransferBuilder::apply) still submits exactly once. The
    /// result code is discarded on this path.
    fn drop(&mut self) {
        let _ = self.apply();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
