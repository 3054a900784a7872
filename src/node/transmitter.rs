use embedded_hal::digital::v2::OutputPin;

use crate::config::LinkConfig;
use crate::link::{LinkError, PhyLayer};
use crate::message::Message;
use crate::node::Indicator;
use crate::radio::Radio;

/// Transmitter node
///
/// Sends one message per call, blocking until the modem reports the
/// packet physically gone. Pacing between messages is left to the
/// caller's main loop.
pub struct Transmitter<R: Radio, LED: OutputPin> {
    /// PHY layer
    phy: PhyLayer<R>,
    /// Status indicator
    indicator: Indicator<LED>,
}

impl<R: Radio, LED: OutputPin> Transmitter<R, LED> {
    /// Create new transmitter node
    pub fn new(radio: R, led: LED, config: LinkConfig) -> Self {
        Self {
            phy: PhyLayer::new(radio, config),
            indicator: Indicator::new(led),
        }
    }

    /// Initialize the radio and configure it for transmission
    pub fn init(&mut self) -> Result<(), LinkError<R::Error>> {
        self.phy.init()?;
        self.phy.configure_tx()?;
        Ok(())
    }

    /// Send a message
    ///
    /// Copies the payload into a fresh [`Message`], raises the
    /// indicator for the duration of the transmission and blocks
    /// until the whole message is gone.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), LinkError<R::Error>> {
        let message =
            Message::from_slice(payload).map_err(|_| LinkError::PayloadTooLong)?;

        self.indicator.on();
        let result = self.phy.transmit(message.as_bytes());
        self.indicator.off();
        result?;

        Ok(())
    }

    /// Pause between transmissions, from the link configuration
    pub fn interval_ms(&self) -> u32 {
        self.phy.config.tx_interval_ms
    }

    /// Check if the radio is still transmitting
    pub fn is_transmitting(&mut self) -> Result<bool, LinkError<R::Error>> {
        Ok(self.phy.is_transmitting()?)
    }
}
