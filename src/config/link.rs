/// Frequency band of the radio module
///
/// Cheap OOK modules are sold for the two unlicensed bands below; the
/// band is a property of the hardware, not a tuning choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// 315 MHz modules
    Mhz315,
    /// 433 MHz modules
    Mhz433,
}

impl Band {
    /// Carrier frequency in Hz
    pub fn frequency(&self) -> u32 {
        match self {
            Band::Mhz315 => 315_000_000,
            Band::Mhz433 => 433_920_000,
        }
    }
}

/// Radio link configuration
///
/// Plain data shared by both roles. Drivers derive their register
/// settings from these values.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Frequency band of the attached module
    pub band: Band,
    /// Over-the-air bit rate in bits per second
    pub bitrate: u32,
    /// Pause between transmissions in milliseconds
    pub tx_interval_ms: u32,
    /// Transmit power in dBm
    pub tx_power: i8,
}

impl LinkConfig {
    /// Create a configuration for the given band with default timing
    pub fn new(band: Band) -> Self {
        Self {
            band,
            bitrate: 2000,
            tx_interval_ms: 1000,
            tx_power: 10,
        }
    }

    /// Set the over-the-air bit rate
    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Set the pause between transmissions
    pub fn with_tx_interval_ms(mut self, interval: u32) -> Self {
        self.tx_interval_ms = interval;
        self
    }

    /// Set the transmit power
    pub fn with_tx_power(mut self, power: i8) -> Self {
        self.tx_power = power;
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(Band::Mhz433)
    }
}
