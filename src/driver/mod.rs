//! Driver core: descriptors, admission and queueing.
//!
//! - [`config`]: Device configuration types
//! - [`error`]: Submission error types
//! - [`event`]: Event bitmask and interrupt direction
//! - [`transfer`]: Transfer descriptors and the fluent builder
//! - [`queue`]: Bounded FIFO for pending transfers
//! - [`i2s`]: The admission controller and instance handles

pub mod config;
pub mod error;
pub mod event;
pub mod i2s;
pub mod queue;
pub mod transfer;
