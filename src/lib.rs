//! I2S Transfer Admission & Queueing Core
//!
//! A `no_std`, `no_alloc` transaction admission and queueing core for
//! asynchronous I2S peripheral drivers.
//!
//! The register-level work (DMA programming, clock and format sequencing,
//! interrupt masking) lives in a vendor HAL behind the [`I2sHal`] trait.
//! What this crate implements is the part with actual design content: the
//! single-owner admission protocol that decides whether a new transfer
//! starts immediately, waits in a bounded FIFO, or is rejected; that
//! guarantees at most one active hardware transfer at a time; and that
//! hands off safely from the completion interrupt to the next queued
//! transfer.
//!
//! # Architecture
//!
//! 1. **Driver core** ([`driver`]): transfer descriptors, the fluent
//!    builder, the bounded queue, and the [`I2sBus`] admission controller
//! 2. **HAL seam** ([`hal`]): the vendor peripheral session trait
//! 3. **Deferred execution** ([`exec`]): completion callbacks are posted
//!    out of interrupt context, never run inside it
//! 4. **Sync** ([`sync`]): critical-section interior mutability shared by
//!    thread-mode submission and the interrupt handlers
//!
//! # Concurrency model
//!
//! No threads: the only hazard is interrupt preemption of thread-mode
//! code. All shared state is guarded by `critical_section::with`; there
//! are no blocking locks and both the submission path and the interrupt
//! path are bounded and non-blocking.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for driver types and sparse
//!   state-transition logging
//!
//! # Example
//!
//! ```ignore
//! use i2s_xfer::{Buf, Events, I2sBus, I2sConfig, Protocol};
//!
//! static BUS: I2sBus<ChipI2s, 4> = I2sBus::new(ChipI2s::new());
//!
//! let i2s = BUS.attach(
//!     I2sConfig::new()
//!         .with_format(16, 16, Polarity::IdleLow)
//!         .with_frequency(48_000)
//!         .with_protocol(Protocol::Philips),
//! );
//!
//! fn on_done(tx: Buf, _rx: Buf, events: Events) {
//!     // runs in the deferred execution context
//! }
//!
//! let rc = i2s
//!     .transfer()
//!     .tx(Buf::new(samples.as_mut_ptr().cast(), samples.len() * 2))
//!     .callback(on_done, Events::COMPLETE)
//!     .apply();
//!
//! // In the interrupt handlers:
//! // BUS.irq_tx(&mut scheduler);
//! // BUS.irq_rx(&mut scheduler);
//! ```
//!
//! # What this crate does not do
//!
//! - No timeouts: the core has no time-awareness; build transfer timeouts
//!   externally.
//! - No register programming: buffer pointers are passed through to the
//!   HAL untouched, and configuration errors (invalid bit widths etc.)
//!   are the HAL's responsibility.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; project-wide configuration is in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod exec;
pub mod hal;
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{I2sConfig, Mode, Polarity, Protocol};
pub use driver::error::{Error, Result};
pub use driver::event::{Direction, Events};
pub use driver::i2s::{I2s, I2sBus, InstanceId, Status};
pub use driver::queue::TransferQueue;
pub use driver::transfer::{Buf, EventCallback, Transfer, TransferBuilder};
pub use exec::{Deferred, PendingCallback};
pub use hal::I2sHal;
