//! `embedded-io` byte stream view of [`UsiWire`]
//!
//! `Write` feeds the pending transmit frame, `Read` drains the receive
//! frame. Neither touches the bus; transactions are still started with
//! `end_transmission` and `request`. Writing outside a transmission is an
//! error here, since the inherent slave reply path would drop the bytes.

use embedded_io::{ErrorType, Read, Write};
use usiwire_hal::UsiTransceiver;

use crate::error::TransmissionError;
use crate::wire::UsiWire;

impl<T: UsiTransceiver, const N: usize> ErrorType for UsiWire<T, N> {
    type Error = TransmissionError;
}

impl<T: UsiTransceiver, const N: usize> Write for UsiWire<T, N> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, TransmissionError> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.is_transmitting() {
            return Err(TransmissionError::Other);
        }

        match self.write_bytes(buf) {
            0 => Err(TransmissionError::DataTooLong),
            accepted => Ok(accepted),
        }
    }

    fn flush(&mut self) -> Result<(), TransmissionError> {
        UsiWire::flush(self);
        Ok(())
    }
}

impl<T: UsiTransceiver, const N: usize> Read for UsiWire<T, N> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransmissionError> {
        Ok(self.read_bytes(buf))
    }
}
