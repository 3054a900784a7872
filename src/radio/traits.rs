/// Possible errors in radio operations
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI transfer error
    Spi,
    /// GPIO error
    Gpio,
    /// Invalid configuration
    Config,
    /// Radio hardware error
    Hardware,
    /// Operation timeout
    Timeout,
}

/// Radio transmission parameters
#[derive(Debug, Clone, Copy)]
pub struct TxConfig {
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Bit rate in bits per second
    pub bitrate: u32,
    /// Transmission power in dBm
    pub power: i8,
}

/// Radio receive parameters
#[derive(Debug, Clone, Copy)]
pub struct RxConfig {
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Bit rate in bits per second
    pub bitrate: u32,
}

/// Generic OOK packet radio interface
///
/// Abstracts a transceiver whose packet engine supplies preamble,
/// sync word, length framing and checksum in hardware. The link layer
/// never sees the air encoding; frames failing the modem checksum are
/// dropped inside the driver.
pub trait Radio {
    /// Error type for radio operations
    type Error;

    /// Initialize the radio
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Set the carrier frequency
    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error>;

    /// Set the over-the-air bit rate
    fn set_bitrate(&mut self, bitrate: u32) -> Result<(), Self::Error>;

    /// Set the radio's transmission power
    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error>;

    /// Configure the radio for transmission
    fn configure_tx(&mut self, config: TxConfig) -> Result<(), Self::Error>;

    /// Configure the radio for reception and start listening
    fn configure_rx(&mut self, config: RxConfig) -> Result<(), Self::Error>;

    /// Transmit a packet, blocking until it has physically left
    fn transmit(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    /// Check whether a complete, checksum-valid packet is pending
    fn payload_ready(&mut self) -> Result<bool, Self::Error>;

    /// Drain a pending packet into the provided buffer
    ///
    /// Returns the number of bytes received, 0 when nothing is
    /// pending.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Get the current RSSI reading
    fn get_rssi(&mut self) -> Result<i16, Self::Error>;

    /// Check if the radio is currently transmitting
    fn is_transmitting(&mut self) -> Result<bool, Self::Error>;

    /// Put the radio into standby mode
    fn standby(&mut self) -> Result<(), Self::Error>;

    /// Put the radio into sleep mode
    fn sleep(&mut self) -> Result<(), Self::Error>;
}
