//! USIWire Hardware Abstraction Layer
//!
//! This crate defines the single hardware primitive the transaction layer
//! consumes: a blocking USI transceiver that clocks one framed bus
//! transaction in or out. Chip-specific drivers (the bit-banged USI state
//! machine on ATtiny parts, a simulator, a test double) implement it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / device drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  usiwire-core (buffers, sequencing)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  usiwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  USI transceiver driver (external)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transceiver::UsiTransceiver`] - Framed, blocking bus transaction
//!
//! # Types
//!
//! - [`transceiver::TransceiverState`] - Failure codes reported by the driver
//! - [`i2c::Direction`], [`i2c::address_byte`] - Address/direction framing
//! - [`i2c::I2cConfig`] - Bus clock configuration

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod transceiver;

// Re-export key items at crate root for convenience
pub use i2c::{address_byte, Direction, I2cConfig};
pub use transceiver::{TransceiverState, UsiTransceiver};
