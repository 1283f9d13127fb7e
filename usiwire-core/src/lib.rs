//! Buffered I2C master transactions over a USI transceiver
//!
//! Small AVR parts (ATtiny25/45/85, ATtiny2313, ...) have a USI block
//! instead of a TWI controller. The bit-banged driver on top of it can only
//! push or pull one framed transaction at a time. This crate adds the
//! familiar transaction model:
//!
//! - Fixed-capacity transmit/receive frames ([`TxBuffer`], [`RxBuffer`])
//! - The transaction manager ([`UsiWire`])
//! - Read requests with internal register addressing ([`ReadRequest`])
//! - The four-code error taxonomy ([`TransmissionError`])
//! - `embedded-hal` I2C and `embedded-io` stream adapters
//!
//! ```
//! use usiwire_core::UsiWire;
//! use usiwire_hal::{TransceiverState, UsiTransceiver};
//!
//! struct Bus;
//!
//! impl UsiTransceiver for Bus {
//!     fn transceive(&mut self, frame: &mut [u8], _send_stop: bool) -> Result<(), TransceiverState> {
//!         frame[1..].fill(0x42);
//!         Ok(())
//!     }
//! }
//!
//! let mut wire: UsiWire<Bus> = UsiWire::new(Bus);
//! wire.begin();
//!
//! wire.begin_transmission(0x50);
//! wire.write(0x00);
//! assert!(wire.end_transmission().is_ok());
//!
//! assert_eq!(wire.request_from(0x50, 2), 2);
//! assert_eq!(wire.read(), Some(0x42));
//! ```

#![no_std]
#![deny(unsafe_code)]

// MUST be the first module
mod fmt;

pub mod buffer;
pub mod error;
pub mod i2c;
pub mod io;
pub mod request;
pub mod wire;

#[cfg(test)]
mod mock;

pub use buffer::{RxBuffer, TxBuffer, BUFFER_LENGTH};
pub use error::{status_code, TransmissionError, STATUS_OK};
pub use request::{ReadRequest, MAX_INTERNAL_ADDRESS_SIZE};
pub use wire::UsiWire;
