//! Link configuration
//!
//! This module contains types for configuring the radio link. It
//! includes:
//! - Frequency band selection
//! - Bit rate and transmit pacing
//! - Transmit power

/// Link configuration and band selection
pub mod link;

pub use link::{Band, LinkConfig};
