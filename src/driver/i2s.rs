//! I2S transfer admission, queueing and interrupt-side promotion.
//!
//! [`I2sBus`] is the single-owner admission controller for one physical I2S
//! peripheral: it owns the HAL session, the busy flag, the in-flight
//! transfer, the configuration-owner cache and the bounded pending queue.
//! [`I2s`] is a lightweight per-instance handle; multiple instances
//! time-share the one physical resource through the bus.
//!
//! # Concurrency
//!
//! The only hazard is interrupt preemption of thread-mode code. All shared
//! state lives behind [`CriticalSectionCell`]s; `submit` and the interrupt
//! handlers are bounded, non-blocking routines. The admission decision
//! (hardware activity sample, test-and-set of the busy flag, enqueue)
//! happens in a single critical section, so a completion interrupt can
//! never slip between "observed active" and "pushed to queue" and strand
//! a pending transfer.
//!
//! # Busy authority
//!
//! The internal busy flag is the fast-path admission gate. The HAL's
//! `is_active()` query is the defensive second source of truth in `submit`
//! (never double-start, even if the flag is stale) and the sole authority
//! for [`I2s::status`].

use crate::driver::config::{I2sConfig, Polarity};
use crate::driver::error::{Error, Result};
use crate::driver::event::{Direction, Events};
use crate::driver::queue::TransferQueue;
use crate::driver::transfer::{Transfer, TransferBuilder};
use crate::exec::{Deferred, PendingCallback};
use crate::hal::I2sHal;
use crate::sync::CriticalSectionCell;

// =============================================================================
// Public Types
// =============================================================================

/// Transfer status reported by [`I2s::status`].
///
/// Reflects the HAL's active query, not the internal busy flag: the flag is
/// cleared slightly after hardware completion in the interrupt path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No transfer active on the hardware
    Idle,
    /// A transfer is in flight
    Busy,
}

/// Identity token for one driver instance.
///
/// The bus compares these by identity to decide whether the hardware still
/// carries the configuration of the submitting instance, or must be
/// reconfigured before the next transfer starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InstanceId(u32);

// =============================================================================
// Bus State
// =============================================================================

/// Pending queue entry: which instance asked, with which configuration.
///
/// The configuration is snapshotted at enqueue time so promotion from the
/// interrupt handler never has to reach back into the instance.
#[derive(Clone, Copy)]
struct Slot {
    id: InstanceId,
    config: I2sConfig,
    transfer: Transfer,
}

/// Admission state shared between thread-mode submission and the interrupt
/// completion handlers. Only ever accessed inside a critical section.
struct BusState<const DEPTH: usize> {
    /// Fast-path admission gate: true from the moment a submission claims
    /// the hardware until the completion handler drains the queue.
    busy: bool,
    /// Instance whose configuration is currently loaded into the hardware.
    owner: Option<InstanceId>,
    /// In-flight transfer; only replaced by queue promotion, cleared when
    /// the bus goes idle.
    current: Option<Transfer>,
    /// Next identity token handed out by `attach`.
    next_id: u32,
    /// Pending transfers, FIFO.
    queue: TransferQueue<Slot, DEPTH>,
}

/// Outcome of the admission decision, computed inside one critical section.
enum Admission {
    StartNow,
    Queued,
    Rejected,
}

// =============================================================================
// Bus
// =============================================================================

/// Admission controller for one physical I2S peripheral.
///
/// `DEPTH` is the capacity of the pending-transfer queue; 0 disables
/// queueing (submissions while busy are rejected immediately).
///
/// Suitable for static initialization so the interrupt handlers can reach
/// it:
///
/// ```ignore
/// static BUS: I2sBus<Chip, 4> = I2sBus::new(Chip::new());
///
/// #[interrupt]
/// fn I2S_TX() {
///     BUS.irq_tx(&mut scheduler());
/// }
/// ```
pub struct I2sBus<H, const DEPTH: usize> {
    session: CriticalSectionCell<H>,
    state: CriticalSectionCell<BusState<DEPTH>>,
}

impl<H: I2sHal, const DEPTH: usize> I2sBus<H, DEPTH> {
    /// Create a bus around a HAL session (const, suitable for statics).
    pub const fn new(hal: H) -> Self {
        Self {
            session: CriticalSectionCell::new(hal),
            state: CriticalSectionCell::new(BusState {
                busy: false,
                owner: None,
                current: None,
                next_id: 0,
                queue: TransferQueue::new(),
            }),
        }
    }

    /// Create a driver instance on this bus.
    ///
    /// Brings the peripheral up for this instance and applies its initial
    /// configuration, but does not take bus ownership: the first transfer
    /// reapplies the full configuration through the owner cache.
    pub fn attach(&self, config: I2sConfig) -> I2s<'_, H, DEPTH> {
        let id = self.state.with(|state| {
            let id = InstanceId(state.next_id);
            state.next_id = state.next_id.wrapping_add(1);
            id
        });
        self.session.with(|hal| {
            hal.init(config.mode);
            hal.configure_format(config.data_bits, config.frame_bits, config.polarity);
            hal.set_frequency(config.frequency_hz);
            hal.set_protocol(config.protocol);
        });
        I2s {
            bus: self,
            id,
            config,
        }
    }

    /// Number of transfers waiting in the pending queue.
    pub fn pending_transfers(&self) -> usize {
        self.state.with(|state| state.queue.len())
    }

    /// TX-complete interrupt entry point.
    ///
    /// Call from the transmit-side completion interrupt handler.
    pub fn irq_tx<D: Deferred>(&self, exec: &mut D) {
        self.completion_irq(Direction::Tx, exec);
    }

    /// RX-complete interrupt entry point.
    ///
    /// Call from the receive-side completion interrupt handler.
    pub fn irq_rx<D: Deferred>(&self, exec: &mut D) {
        self.completion_irq(Direction::Rx, exec);
    }

    // =========================================================================
    // Admission
    // =========================================================================

    /// Decide immediate-start vs enqueue vs reject for one transfer.
    fn submit(&self, id: InstanceId, config: &I2sConfig, transfer: Transfer) -> Result<()> {
        let admission = self.state.with(|state| {
            // Sampled inside the admission critical section: a completion
            // interrupt cannot drain the bus between this check and the
            // flag test-and-set, so a true reading here means the matching
            // completion interrupt is still outstanding and will promote
            // whatever this call enqueues.
            let hw_active = self.session.with(|hal| hal.is_active());
            if state.busy || hw_active {
                if state.queue.push(Slot {
                    id,
                    config: *config,
                    transfer,
                }) {
                    state.busy = true;
                    Admission::Queued
                } else {
                    // Rejected: the flag is left untouched, nothing was
                    // claimed on behalf of this transfer.
                    Admission::Rejected
                }
            } else {
                state.busy = true;
                Admission::StartNow
            }
        });

        match admission {
            Admission::StartNow => {
                self.start(id, config, transfer);
                Ok(())
            }
            Admission::Queued => Ok(()),
            Admission::Rejected => {
                #[cfg(feature = "defmt")]
                defmt::warn!("i2s: transfer rejected, queue full");
                Err(Error::QueueFull)
            }
        }
    }

    /// Reapply the submitting instance's configuration if the hardware was
    /// last configured by a different instance.
    ///
    /// Configuration is expensive (multiple register writes), so it is
    /// cached by instance identity rather than reapplied on every transfer.
    fn acquire(&self, id: InstanceId, config: &I2sConfig) {
        let reconfigure = self.state.with(|state| {
            if state.owner == Some(id) {
                false
            } else {
                state.owner = Some(id);
                true
            }
        });
        if reconfigure {
            self.session.with(|hal| {
                hal.configure_format(config.data_bits, config.frame_bits, config.polarity);
                hal.set_frequency(config.frequency_hz);
                hal.set_protocol(config.protocol);
                hal.set_mode(config.mode);
            });
            #[cfg(feature = "defmt")]
            defmt::debug!("i2s: bus ownership moved to instance {}", id);
        }
    }

    /// Configuration-cache-aware start: acquire, publish `current`, go.
    fn start(&self, id: InstanceId, config: &I2sConfig, transfer: Transfer) {
        self.acquire(id, config);
        self.state.with(|state| state.current = Some(transfer));
        self.session.with(|hal| hal.start_async(&transfer));
    }

    // =========================================================================
    // Interrupt Path
    // =========================================================================

    /// Shared body of the TX/RX completion handlers.
    ///
    /// Runs in interrupt context: decode, post the callback to the deferred
    /// executor, promote the next queued transfer. Short and non-blocking;
    /// nothing on this path can fail.
    fn completion_irq<D: Deferred>(&self, direction: Direction, exec: &mut D) {
        let events = self.session.with(|hal| hal.decode_irq_event(direction));

        let visible = events.masked(Events::ALL);
        if !visible.is_empty() {
            let pending = self.state.with(|state| {
                state.current.as_ref().and_then(|transfer| {
                    transfer
                        .callback()
                        .map(|cb| PendingCallback::new(cb, transfer.tx(), transfer.rx(), visible))
                })
            });
            if let Some(pending) = pending {
                exec.post(pending);
            }
        }

        if events.intersects(Events::ALL.union(Events::TRANSFER_FINISHED)) {
            self.promote_next();
        }
    }

    /// Dequeue-and-promote: pop one pending transfer and start it, or go
    /// idle if none remain.
    ///
    /// `busy` stays true across a successful promotion, so submissions keep
    /// queueing behind the promoted transfer; `current` is only replaced
    /// here, never concurrently by `submit` (which cannot run once `busy`
    /// is set).
    fn promote_next(&self) {
        let next = self.state.with(|state| {
            let next = state.queue.pop();
            state.busy = next.is_some();
            if next.is_none() {
                state.current = None;
            }
            next
        });
        if let Some(slot) = next {
            self.start(slot.id, &slot.config, slot.transfer);
        }
    }
}

// =============================================================================
// Instance Handle
// =============================================================================

/// One logical I2S driver instance.
///
/// Created by [`I2sBus::attach`]. Holds this instance's device
/// configuration; transfers and configuration changes go through the shared
/// bus, which reapplies configuration to hardware only when ownership
/// changes between instances.
pub struct I2s<'bus, H, const DEPTH: usize> {
    bus: &'bus I2sBus<H, DEPTH>,
    id: InstanceId,
    config: I2sConfig,
}

impl<'bus, H: I2sHal, const DEPTH: usize> I2s<'bus, H, DEPTH> {
    /// Start building a transfer.
    ///
    /// The returned builder submits on [`apply`](TransferBuilder::apply) or
    /// implicitly when it goes out of scope.
    pub fn transfer(&self) -> TransferBuilder<'_, H, DEPTH> {
        TransferBuilder::new(self)
    }

    /// Configure the data transmission format and reapply it to hardware.
    pub fn format(&mut self, data_bits: u8, frame_bits: u8, polarity: Polarity) {
        self.config.data_bits = data_bits;
        self.config.frame_bits = frame_bits;
        self.config.polarity = polarity;
        self.reacquire();
    }

    /// Set the audio frequency in Hz and reapply it to hardware.
    pub fn audio_frequency(&mut self, hz: u32) {
        self.config.frequency_hz = hz;
        self.reacquire();
    }

    /// Set the bus protocol and reapply it to hardware.
    pub fn set_protocol(&mut self, protocol: crate::driver::config::Protocol) {
        self.config.protocol = protocol;
        self.reacquire();
    }

    /// Set the transfer mode and reapply it to hardware.
    pub fn set_mode(&mut self, mode: crate::driver::config::Mode) {
        self.config.mode = mode;
        self.reacquire();
    }

    /// Abort the in-flight transfer, best effort, and promote the next
    /// queued transfer if one exists.
    ///
    /// A trailing completion event from the aborted transfer (a HAL
    /// contract detail) is handled like any other completion.
    pub fn abort_transfer(&self) {
        self.bus.session.with(|hal| hal.abort());
        self.bus.promote_next();
    }

    /// Discard all pending queued transfers without touching the in-flight
    /// one.
    pub fn clear_transfer_queue(&self) {
        self.bus.state.with(|state| state.queue.clear());
    }

    /// Discard the pending queue, then abort the in-flight transfer.
    pub fn abort_all_transfers(&self) {
        self.clear_transfer_queue();
        self.abort_transfer();
    }

    /// Current transfer status, straight from the hardware.
    pub fn status(&self) -> Status {
        if self.bus.session.with(|hal| hal.is_active()) {
            Status::Busy
        } else {
            Status::Idle
        }
    }

    /// This instance's identity token on the bus.
    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// This instance's device configuration.
    #[must_use]
    pub const fn config(&self) -> &I2sConfig {
        &self.config
    }

    /// The shared bus this instance is attached to.
    #[must_use]
    pub const fn bus(&self) -> &'bus I2sBus<H, DEPTH> {
        self.bus
    }

    pub(crate) fn submit(&self, transfer: Transfer) -> Result<()> {
        self.bus.submit(self.id, &self.config, transfer)
    }

    /// Configuration changed: drop the owner cache, then take ownership so
    /// the new configuration reaches hardware immediately.
    fn reacquire(&self) {
        self.bus.state.with(|state| state.owner = None);
        self.bus.acquire(self.id, &self.config);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
