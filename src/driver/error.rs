//! Error types for the I2S transfer core
//!
//! The admission protocol has exactly one recoverable failure class:
//! a submission that finds the hardware busy and the pending queue full.
//! Everything else is either a caller contract violation (fails fast via
//! assertion, see [`TransferBuilder`]) or the HAL's responsibility.
//!
//! [`TransferBuilder`]: crate::TransferBuilder

/// Transfer submission errors
///
/// Returned synchronously from [`TransferBuilder::apply`]; never deferred.
///
/// [`TransferBuilder::apply`]: crate::TransferBuilder::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Hardware busy and the pending-transfer queue is full (or the build
    /// was configured with queue depth 0). The submission was dropped;
    /// the caller decides whether to retry.
    QueueFull,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::QueueFull => "transfer queue full",
        }
    }
}

/// Result type alias for transfer submissions
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================
