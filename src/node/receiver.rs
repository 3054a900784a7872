use embedded_hal::digital::v2::OutputPin;

use crate::config::LinkConfig;
use crate::link::{LinkError, PhyLayer};
use crate::message::{Message, MAX_MESSAGE_LEN};
use crate::node::Indicator;
use crate::radio::Radio;

/// Receiver node
///
/// The radio listens continuously; each [`poll`](Receiver::poll)
/// makes exactly one readiness check and never blocks.
pub struct Receiver<R: Radio, LED: OutputPin> {
    /// PHY layer
    phy: PhyLayer<R>,
    /// Status indicator
    indicator: Indicator<LED>,
}

impl<R: Radio, LED: OutputPin> Receiver<R, LED> {
    /// Create new receiver node
    pub fn new(radio: R, led: LED, config: LinkConfig) -> Self {
        Self {
            phy: PhyLayer::new(radio, config),
            indicator: Indicator::new(led),
        }
    }

    /// Initialize the radio and start continuous reception
    pub fn init(&mut self) -> Result<(), LinkError<R::Error>> {
        self.phy.init()?;
        self.phy.configure_rx()?;
        Ok(())
    }

    /// Poll for a pending message
    ///
    /// Returns `None` when nothing checksum-valid has arrived. On
    /// success the indicator is pulsed and the caller owns the
    /// returned message for this iteration.
    pub fn poll(&mut self) -> Result<Option<Message>, LinkError<R::Error>> {
        if !self.phy.payload_ready()? {
            return Ok(None);
        }

        self.indicator.on();
        let mut buffer = [0u8; MAX_MESSAGE_LEN];
        let received = self.phy.receive(&mut buffer);
        self.indicator.off();

        let len = received?;
        if len == 0 {
            return Ok(None);
        }

        let message =
            Message::from_slice(&buffer[..len]).map_err(|_| LinkError::PayloadTooLong)?;
        Ok(Some(message))
    }

    /// RSSI of the channel as currently seen by the radio
    pub fn rssi(&mut self) -> Result<i16, LinkError<R::Error>> {
        Ok(self.phy.get_rssi()?)
    }
}
