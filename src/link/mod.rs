//! Link layer plumbing
//!
//! The link layer is deliberately thin: the modem's packet engine
//! does the heavy lifting, and [`PhyLayer`] only applies the link
//! configuration and forwards transport calls.

/// PHY layer operations
pub mod phy;

pub use phy::PhyLayer;

/// Link layer error
#[derive(Debug)]
pub enum LinkError<E> {
    /// Radio error
    Radio(E),
    /// Payload exceeds the message capacity
    PayloadTooLong,
}

impl<E> From<E> for LinkError<E> {
    fn from(error: E) -> Self {
        LinkError::Radio(error)
    }
}
