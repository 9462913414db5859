//! Deferred execution collaborator.
//!
//! Completion callbacks are never run in interrupt context. The interrupt
//! handler binds the callback to its arguments as a [`PendingCallback`] and
//! hands it to a [`Deferred`] implementation, which runs it later in a
//! non-interrupt execution context. Ordering among posted callbacks is FIFO;
//! ordering relative to new submissions is unspecified.

use crate::driver::event::Events;
use crate::driver::transfer::{Buf, EventCallback};

/// A completion callback bound to its arguments, ready to run outside
/// interrupt context.
#[derive(Clone, Copy)]
pub struct PendingCallback {
    callback: EventCallback,
    tx: Buf,
    rx: Buf,
    events: Events,
}

impl PendingCallback {
    pub(crate) const fn new(callback: EventCallback, tx: Buf, rx: Buf, events: Events) -> Self {
        Self {
            callback,
            tx,
            rx,
            events,
        }
    }

    /// Transmit buffer view of the completed transfer
    #[must_use]
    pub const fn tx(&self) -> Buf {
        self.tx
    }

    /// Receive buffer view of the completed transfer
    #[must_use]
    pub const fn rx(&self) -> Buf {
        self.rx
    }

    /// Events that triggered the callback
    #[must_use]
    pub const fn events(&self) -> Events {
        self.events
    }

    /// Invoke the bound callback.
    ///
    /// Must be called from non-interrupt context.
    pub fn run(self) {
        (self.callback)(self.tx, self.rx, self.events);
    }
}

/// Posts callbacks for later, non-interrupt execution.
///
/// `post` is called from interrupt context and must be bounded and
/// non-blocking.
pub trait Deferred {
    /// Schedule `callback` to run in the deferred execution context.
    fn post(&mut self, callback: PendingCallback);
}
