//! High-level link device interface
//!
//! This module provides the main device interface for the radio
//! link. A device is constructed for one of the two roles and only
//! exposes that role's operation; calling the other is an error.

use embedded_hal::digital::v2::OutputPin;

use crate::{
    config::LinkConfig,
    link::LinkError,
    message::Message,
    node::{Receiver, Role, Transmitter},
    radio::Radio,
};

/// Link device error type
#[derive(Debug)]
pub enum DeviceError<E> {
    /// Link layer error
    Link(LinkError<E>),
    /// Operation does not match the device role
    InvalidRole,
}

impl<E> From<LinkError<E>> for DeviceError<E> {
    fn from(error: LinkError<E>) -> Self {
        DeviceError::Link(error)
    }
}

/// Link device implementation
///
/// Wraps the node matching the configured [`Role`].
pub struct LinkDevice<R: Radio, LED: OutputPin> {
    /// Configured role
    role: Role,
    /// Transmitter node, when the role is transmitter
    transmitter: Option<Transmitter<R, LED>>,
    /// Receiver node, when the role is receiver
    receiver: Option<Receiver<R, LED>>,
}

impl<R: Radio, LED: OutputPin> LinkDevice<R, LED> {
    /// Create and initialize a link device for the given role
    pub fn new(
        radio: R,
        led: LED,
        config: LinkConfig,
        role: Role,
    ) -> Result<Self, DeviceError<R::Error>> {
        let mut device = Self {
            role,
            transmitter: None,
            receiver: None,
        };

        match role {
            Role::Transmitter => {
                let mut transmitter = Transmitter::new(radio, led, config);
                transmitter.init()?;
                device.transmitter = Some(transmitter);
            }
            Role::Receiver => {
                let mut receiver = Receiver::new(radio, led, config);
                receiver.init()?;
                device.receiver = Some(receiver);
            }
        }

        Ok(device)
    }

    /// Get the configured role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Send a message
    ///
    /// Transmitter role only.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), DeviceError<R::Error>> {
        let transmitter = self.transmitter.as_mut().ok_or(DeviceError::InvalidRole)?;
        transmitter.send(payload)?;
        Ok(())
    }

    /// Poll for a pending message
    ///
    /// Receiver role only.
    pub fn poll(&mut self) -> Result<Option<Message>, DeviceError<R::Error>> {
        let receiver = self.receiver.as_mut().ok_or(DeviceError::InvalidRole)?;
        Ok(receiver.poll()?)
    }

    /// Pause between transmissions, from the link configuration
    ///
    /// Transmitter role only.
    pub fn tx_interval_ms(&self) -> Result<u32, DeviceError<R::Error>> {
        let transmitter = self.transmitter.as_ref().ok_or(DeviceError::InvalidRole)?;
        Ok(transmitter.interval_ms())
    }
}
