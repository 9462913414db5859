//! Configuration types for the I2S transfer core

/// I2S bus protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// Philips standard (data one clock after word select)
    #[default]
    Philips,
    /// MSB-justified (left-justified)
    Msb,
    /// LSB-justified (right-justified)
    Lsb,
    /// PCM with short frame synchronization
    PcmShort,
    /// PCM with long frame synchronization
    PcmLong,
}

/// I2S transfer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Master, transmit only
    #[default]
    MasterTx,
    /// Master, receive only
    MasterRx,
    /// Master, full duplex
    MasterFullDuplex,
    /// Slave, transmit only
    SlaveTx,
    /// Slave, receive only
    SlaveRx,
    /// Slave, full duplex
    SlaveFullDuplex,
}

/// Bit clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (default)
    #[default]
    IdleLow,
    /// Clock idles high
    IdleHigh,
}

/// I2S device configuration
///
/// Owned by each driver instance. Because multiple instances time-share one
/// physical peripheral, the configuration is reapplied to hardware only when
/// bus ownership changes (see the configuration-owner cache on
/// [`I2sBus`]).
///
/// # Example
///
/// ```ignore
/// let config = I2sConfig::new()
///     .with_format(24, 32, Polarity::IdleLow)
///     .with_frequency(48_000)
///     .with_protocol(Protocol::PcmShort);
/// ```
///
/// [`I2sBus`]: crate::I2sBus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sConfig {
    /// Number of data bits per I2S frame (16, 24, or 32)
    pub data_bits: u8,
    /// Number of bits per I2S frame (16 or 32)
    pub frame_bits: u8,
    /// Bit clock polarity
    pub polarity: Polarity,
    /// Bus protocol variant
    pub protocol: Protocol,
    /// Transfer mode
    pub mode: Mode,
    /// Audio frequency in Hz
    pub frequency_hz: u32,
}

impl I2sConfig {
    /// Create a configuration with the driver defaults:
    /// 16 data bits, 16 frame bits, clock idle low, Philips protocol,
    /// master transmit, 44.1 kHz.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data_bits: 16,
            frame_bits: 16,
            polarity: Polarity::IdleLow,
            protocol: Protocol::Philips,
            mode: Mode::MasterTx,
            frequency_hz: 44_100,
        }
    }

    /// Set the data transmission format
    #[must_use]
    pub const fn with_format(mut self, data_bits: u8, frame_bits: u8, polarity: Polarity) -> Self {
        self.data_bits = data_bits;
        self.frame_bits = frame_bits;
        self.polarity = polarity;
        self
    }

    /// Set the audio frequency in Hz
    #[must_use]
    pub const fn with_frequency(mut self, hz: u32) -> Self {
        self.frequency_hz = hz;
        self
    }

    /// Set the bus protocol
    #[must_use]
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the transfer mode
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for I2sConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
