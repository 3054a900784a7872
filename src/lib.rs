//! Virtual-wire style OOK radio link in Rust
//!
//! This crate provides a minimal point-to-point radio link over cheap
//! on/off-keyed (OOK) transceiver modules. One node transmits short
//! messages, the other polls for them and hands them to the
//! application, typically for rendering on a serial console. Framing,
//! checksum and bit timing are delegated to the radio modem's packet
//! engine and treated as opaque by the link layer.
//!
//! # Features
//! - Fixed-capacity message buffers, no allocator
//! - Hardware abstraction layer for OOK packet radios
//! - SX1276-family driver (FSK/OOK packet mode); RFM69 behind the
//!   `rfm69` feature
//! - Transmitter and receiver nodes with status indicator handling
//! - Serial console helpers for hex and text message dumps
//! - No unsafe code
//!
//! # Example
//! ```ignore
//! use vwire::{
//!     config::LinkConfig,
//!     device::LinkDevice,
//!     node::Role,
//!     radio::sx127x::SX127x,
//! };
//!
//! // Bring up the radio over SPI (pin setup omitted)
//! let radio = SX127x::new(spi, cs, reset, dio0)?;
//!
//! // One node is the transmitter...
//! let config = LinkConfig::default();
//! let mut device = LinkDevice::new(radio, led, config, Role::Transmitter)?;
//! device.send(b"hello")?;
//!
//! // ...the other polls for messages.
//! let mut device = LinkDevice::new(radio, led, config, Role::Receiver)?;
//! if let Some(message) = device.poll()? {
//!     console.print_hex(&message)?;
//!     console.print_string(&message)?;
//! }
//! ```

#![warn(missing_docs)]
#![no_std]

/// Link configuration
pub mod config;

/// Serial console output
pub mod console;

/// High-level link device interface
pub mod device;

/// Link layer plumbing
pub mod link;

/// Fixed-capacity message buffer
pub mod message;

/// Transmitter and receiver nodes
pub mod node;

/// Radio hardware abstraction layer
pub mod radio;
