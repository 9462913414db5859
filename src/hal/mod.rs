//! Hardware Abstraction Layer
//!
//! The vendor I2S peripheral session is an external collaborator behind the
//! [`I2sHal`] trait: register programming, clock math, DMA descriptor layout
//! and interrupt masking all live on the implementor's side. This core only
//! sequences calls into it.
//!
//! Pin and board wiring is out of scope here and belongs to the HAL
//! implementation, as does vectoring the two completion interrupt sources to
//! [`I2sBus::irq_tx`] / [`I2sBus::irq_rx`].
//!
//! [`I2sBus::irq_tx`]: crate::I2sBus::irq_tx
//! [`I2sBus::irq_rx`]: crate::I2sBus::irq_rx

use crate::driver::config::{Mode, Polarity, Protocol};
use crate::driver::event::{Direction, Events};
use crate::driver::transfer::Transfer;

/// One physical I2S peripheral session.
///
/// All methods are called with the interrupt-exclusion discipline already
/// applied by the core; implementations must not block.
pub trait I2sHal {
    /// One-time peripheral bring-up for a new driver instance.
    fn init(&mut self, mode: Mode);

    /// Apply the data transmission format.
    fn configure_format(&mut self, data_bits: u8, frame_bits: u8, polarity: Polarity);

    /// Apply the audio frequency in Hz.
    fn set_frequency(&mut self, hz: u32);

    /// Apply the bus protocol.
    fn set_protocol(&mut self, protocol: Protocol);

    /// Apply the transfer mode.
    fn set_mode(&mut self, mode: Mode);

    /// Start an asynchronous transfer described by `transfer` (buffers,
    /// circular flag, event mask). Completion is signaled through the TX/RX
    /// interrupt sources.
    fn start_async(&mut self, transfer: &Transfer);

    /// Cancel the in-flight transfer, best effort. A trailing completion
    /// event after an abort is permitted; the core treats it like any other
    /// completion.
    fn abort(&mut self);

    /// Whether a transfer is currently active on the hardware.
    ///
    /// This is the ground truth consulted by the defensive double-check in
    /// submission and by status queries; it may disagree transiently with
    /// the core's busy flag right after a completion interrupt.
    fn is_active(&self) -> bool;

    /// Decode the raw hardware status for one interrupt direction into a
    /// portable event bitmask, clearing the hardware flags.
    ///
    /// The result must be masked to the in-flight transfer's requested
    /// event mask, with [`Events::TRANSFER_FINISHED`] added when the
    /// hardware transfer is done (so promotion runs even for transfers
    /// with an empty mask).
    fn decode_irq_event(&mut self, direction: Direction) -> Events;
}
