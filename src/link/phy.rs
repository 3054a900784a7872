use crate::config::LinkConfig;
use crate::radio::traits::{Radio, RxConfig, TxConfig};

/// PHY layer
///
/// Owns the radio and translates the link configuration into the
/// driver's parameter structs.
pub struct PhyLayer<R: Radio> {
    /// Radio driver
    pub radio: R,
    /// Link configuration
    pub config: LinkConfig,
}

impl<R: Radio> PhyLayer<R> {
    /// Create new PHY layer
    pub fn new(radio: R, config: LinkConfig) -> Self {
        Self { radio, config }
    }

    /// Initialize radio
    pub fn init(&mut self) -> Result<(), R::Error> {
        self.radio.init()
    }

    /// Configure radio for transmission
    pub fn configure_tx(&mut self) -> Result<(), R::Error> {
        let config = TxConfig {
            frequency: self.config.band.frequency(),
            bitrate: self.config.bitrate,
            power: self.config.tx_power,
        };
        self.radio.configure_tx(config)
    }

    /// Configure radio for reception and start listening
    pub fn configure_rx(&mut self) -> Result<(), R::Error> {
        let config = RxConfig {
            frequency: self.config.band.frequency(),
            bitrate: self.config.bitrate,
        };
        self.radio.configure_rx(config)
    }

    /// Transmit data, blocking until it has physically left
    pub fn transmit(&mut self, data: &[u8]) -> Result<(), R::Error> {
        self.radio.transmit(data)
    }

    /// Check whether a packet is pending
    pub fn payload_ready(&mut self) -> Result<bool, R::Error> {
        self.radio.payload_ready()
    }

    /// Drain a pending packet
    pub fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, R::Error> {
        self.radio.receive(buffer)
    }

    /// Get RSSI
    pub fn get_rssi(&mut self) -> Result<i16, R::Error> {
        self.radio.get_rssi()
    }

    /// Check if transmitting
    pub fn is_transmitting(&mut self) -> Result<bool, R::Error> {
        self.radio.is_transmitting()
    }
}
