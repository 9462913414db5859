//! Testing utilities and mock implementations
//!
//! This module provides mock HAL and deferred-executor implementations for
//! testing the admission and queueing core on the host without hardware.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::config::{Mode, Polarity, Protocol};
use crate::driver::event::{Direction, Events};
use crate::driver::transfer::Transfer;
use crate::exec::{Deferred, PendingCallback};
use crate::hal::I2sHal;

// =============================================================================
// Mock HAL
// =============================================================================

/// One `start_async` call as observed by the mock.
#[derive(Debug, Clone, Copy)]
pub struct StartRecord {
    pub tx_len: usize,
    pub rx_len: usize,
    pub circular: bool,
    pub event_mask: Events,
}

/// Observable state of the mock peripheral session.
///
/// Every HAL call is logged; ISR-side event decoding is scripted per
/// direction by the test.
#[derive(Default)]
pub struct MockHalState {
    /// Whether the hardware reports an active transfer. Set by
    /// `start_async`, cleared by `abort`; tests clear it to simulate
    /// hardware completion before firing the interrupt handler.
    pub active: bool,
    pub init_log: Vec<Mode>,
    pub format_log: Vec<(u8, u8, Polarity)>,
    pub frequency_log: Vec<u32>,
    pub protocol_log: Vec<Protocol>,
    pub mode_log: Vec<Mode>,
    pub start_log: Vec<StartRecord>,
    pub abort_count: usize,
    /// Starts issued while a transfer was still active (double-starts).
    pub overlapping_starts: usize,
    /// Scripted decoder results, FIFO per direction.
    pub tx_events: Vec<Events>,
    pub rx_events: Vec<Events>,
}

/// Mock I2S peripheral session for testing without hardware.
///
/// State is shared with [`MockHandle`] so tests can script and inspect the
/// session after the bus has taken ownership of it.
///
/// # Example
///
/// ```ignore
/// let hal = MockHal::new();
/// let handle = hal.handle();
/// let bus: I2sBus<MockHal, 4> = I2sBus::new(hal);
///
/// // ... submit transfers ...
/// assert_eq!(handle.start_count(), 1);
/// ```
pub struct MockHal {
    state: Rc<RefCell<MockHalState>>,
}

impl MockHal {
    /// Create a new mock session, idle and with nothing scripted.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockHalState::default())),
        }
    }

    /// Create an inspection handle sharing this mock's state.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sHal for MockHal {
    fn init(&mut self, mode: Mode) {
        self.state.borrow_mut().init_log.push(mode);
    }

    fn configure_format(&mut self, data_bits: u8, frame_bits: u8, polarity: Polarity) {
        self.state
            .borrow_mut()
            .format_log
            .push((data_bits, frame_bits, polarity));
    }

    fn set_frequency(&mut self, hz: u32) {
        self.state.borrow_mut().frequency_log.push(hz);
    }

    fn set_protocol(&mut self, protocol: Protocol) {
        self.state.borrow_mut().protocol_log.push(protocol);
    }

    fn set_mode(&mut self, mode: Mode) {
        self.state.borrow_mut().mode_log.push(mode);
    }

    fn start_async(&mut self, transfer: &Transfer) {
        let mut state = self.state.borrow_mut();
        if state.active {
            state.overlapping_starts += 1;
        }
        state.start_log.push(StartRecord {
            tx_len: transfer.tx().len(),
            rx_len: transfer.rx().len(),
            circular: transfer.circular(),
            event_mask: transfer.event_mask(),
        });
        state.active = true;
    }

    fn abort(&mut self) {
        let mut state = self.state.borrow_mut();
        state.abort_count += 1;
        state.active = false;
    }

    fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    fn decode_irq_event(&mut self, direction: Direction) -> Events {
        let mut state = self.state.borrow_mut();
        let scripted = match direction {
            Direction::Tx => &mut state.tx_events,
            Direction::Rx => &mut state.rx_events,
        };
        if scripted.is_empty() {
            Events::NONE
        } else {
            scripted.remove(0)
        }
    }
}

/// Inspection and scripting handle onto a [`MockHal`].
pub struct MockHandle {
    state: Rc<RefCell<MockHalState>>,
}

impl MockHandle {
    /// Full access to the mock state for assertions not covered by the
    /// named helpers.
    pub fn with<R>(&self, f: impl FnOnce(&mut MockHalState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    /// Force the hardware-active flag (e.g., simulate completion before
    /// the interrupt fires, or an active transfer the flag does not know
    /// about).
    pub fn set_active(&self, active: bool) {
        self.state.borrow_mut().active = active;
    }

    /// Script the next decoder result for one interrupt direction.
    pub fn script_event(&self, direction: Direction, events: Events) {
        let mut state = self.state.borrow_mut();
        match direction {
            Direction::Tx => state.tx_events.push(events),
            Direction::Rx => state.rx_events.push(events),
        }
    }

    pub fn starts(&self) -> Vec<StartRecord> {
        self.state.borrow().start_log.clone()
    }

    pub fn start_count(&self) -> usize {
        self.state.borrow().start_log.len()
    }

    pub fn overlapping_starts(&self) -> usize {
        self.state.borrow().overlapping_starts
    }

    pub fn init_count(&self) -> usize {
        self.state.borrow().init_log.len()
    }

    pub fn format_count(&self) -> usize {
        self.state.borrow().format_log.len()
    }

    pub fn frequencies(&self) -> Vec<u32> {
        self.state.borrow().frequency_log.clone()
    }

    pub fn protocols(&self) -> Vec<Protocol> {
        self.state.borrow().protocol_log.clone()
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.state.borrow().mode_log.clone()
    }

    pub fn abort_count(&self) -> usize {
        self.state.borrow().abort_count
    }
}

// =============================================================================
// Mock Deferred Executor
// =============================================================================

/// Mock deferred execution context.
///
/// Collects posted callbacks in FIFO order; tests inspect them or run them
/// explicitly with [`run_all`](MockDeferred::run_all) to simulate the
/// non-interrupt execution context.
#[derive(Default)]
pub struct MockDeferred {
    posted: Vec<PendingCallback>,
}

impl MockDeferred {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks posted and not yet run.
    pub fn posted(&self) -> &[PendingCallback] {
        &self.posted
    }

    pub fn len(&self) -> usize {
        self.posted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }

    /// Run all posted callbacks in FIFO order, draining the queue.
    pub fn run_all(&mut self) {
        for callback in self.posted.drain(..) {
            callback.run();
        }
    }
}

impl Deferred for MockDeferred {
    fn post(&mut self, callback: PendingCallback) {
        self.posted.push(callback);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::transfer::Buf;

    #[test]
    fn mock_hal_logs_configuration() {
        let mut hal = MockHal::new();
        let handle = hal.handle();

        hal.configure_format(16, 16, Polarity::IdleLow);
        hal.set_frequency(44_100);

        assert_eq!(handle.format_count(), 1);
        assert_eq!(handle.frequencies(), std::vec![44_100]);
    }

    #[test]
    fn mock_hal_tracks_active_across_start_and_abort() {
        let mut hal = MockHal::new();

        assert!(!hal.is_active());
        hal.start_async(&crate::driver::transfer::Transfer::empty());
        assert!(hal.is_active());
        hal.abort();
        assert!(!hal.is_active());
    }

    #[test]
    fn mock_hal_scripted_events_are_fifo_per_direction() {
        let mut hal = MockHal::new();
        let handle = hal.handle();

        handle.script_event(Direction::Tx, Events::COMPLETE);
        handle.script_event(Direction::Tx, Events::ERROR);
        handle.script_event(Direction::Rx, Events::RX_OVERFLOW);

        assert_eq!(hal.decode_irq_event(Direction::Tx), Events::COMPLETE);
        assert_eq!(hal.decode_irq_event(Direction::Rx), Events::RX_OVERFLOW);
        assert_eq!(hal.decode_irq_event(Direction::Tx), Events::ERROR);
        // Nothing scripted: decoder reports no events
        assert_eq!(hal.decode_irq_event(Direction::Tx), Events::NONE);
    }

    #[test]
    fn mock_deferred_runs_in_fifo_order() {
        use core::sync::atomic::{AtomicU32, Ordering};
        static ORDER: AtomicU32 = AtomicU32::new(0);

        fn first(_tx: Buf, _rx: Buf, _events: Events) {
            ORDER.fetch_add(1, Ordering::SeqCst);
        }
        fn second(_tx: Buf, _rx: Buf, _events: Events) {
            // Second runs after first
            assert!(ORDER.load(Ordering::SeqCst) >= 1);
        }

        let mut exec = MockDeferred::new();
        exec.post(PendingCallback::new(
            first,
            Buf::empty(),
            Buf::empty(),
            Events::COMPLETE,
        ));
        exec.post(PendingCallback::new(
            second,
            Buf::empty(),
            Buf::empty(),
            Events::COMPLETE,
        ));

        assert_eq!(exec.len(), 2);
        exec.run_all();
        assert!(exec.is_empty());
    }
}
