//! Synchronization Primitives
//!
//! The admission controller and the interrupt completion handlers mutate the
//! same state (busy flag, current transfer, pending queue). Every such
//! mutation goes through [`CriticalSectionCell`], which excludes the
//! interrupt source for the duration of the access.
//!
//! Blocking locks are deliberately absent: the only concurrency hazard in
//! this core is interrupt preemption of thread-mode code, and blocking is
//! unsafe inside interrupt handlers.

mod primitives;

pub use primitives::CriticalSectionCell;
