//! Transaction buffer manager
//!
//! [`UsiWire`] owns the transmit and receive frames and sequences calls to
//! the USI transceiver. The calling pattern follows the Arduino `Wire`
//! library:
//!
//! ```text
//! begin_transmission(addr) ─► write(..)* ─► end_transmission() ─► bus
//! request_from(addr, n)    ─► bus ─► available() / read() / peek()
//! ```
//!
//! Every bus operation blocks until the transceiver returns. Nothing is
//! retried here; a failed transaction is reported once and the caller
//! decides what to do next.

use usiwire_hal::{address_byte, Direction, I2cConfig, UsiTransceiver};

use crate::buffer::{RxBuffer, TxBuffer, BUFFER_LENGTH};
use crate::error::TransmissionError;
use crate::request::ReadRequest;

/// Buffered I2C master on top of a USI transceiver
///
/// `N` is the capacity of each frame, address byte included, so at most
/// `N - 1` payload bytes move per transaction.
#[derive(Debug)]
pub struct UsiWire<T, const N: usize = BUFFER_LENGTH> {
    transceiver: T,
    tx: TxBuffer<N>,
    rx: RxBuffer<N>,
    /// Between `begin_transmission` and `end_transmission`
    transmitting: bool,
    /// Sticky: set when a write is dropped for lack of space
    write_error: bool,
}

impl<T: UsiTransceiver, const N: usize> UsiWire<T, N> {
    /// Wrap a transceiver
    ///
    /// The peripheral is not touched until [`begin`](Self::begin).
    pub const fn new(transceiver: T) -> Self {
        Self {
            transceiver,
            tx: TxBuffer::new(),
            rx: RxBuffer::new(),
            transmitting: false,
            write_error: false,
        }
    }

    /// Reset both frames and initialise the USI peripheral
    pub fn begin(&mut self) {
        self.tx.clear();
        self.rx = RxBuffer::new();
        self.transmitting = false;
        self.transceiver.initialise();
        debug!("usiwire: master initialised, {} byte frames", N);
    }

    /// Join the bus as a slave
    ///
    /// Slave mode is not implemented; this initialises the master side
    /// and ignores `address`.
    pub fn begin_slave(&mut self, address: u8) {
        trace!("usiwire: slave address {:#x} ignored", address);
        self.begin();
    }

    /// Release the peripheral. Not implemented, does nothing.
    pub fn end(&mut self) {
        trace!("usiwire: end() not implemented");
    }

    /// Set the bus clock. Not implemented, the transceiver keeps its rate.
    pub fn set_clock(&mut self, config: impl Into<I2cConfig>) {
        let config = config.into();
        trace!("usiwire: set_clock({} Hz) ignored", config.frequency);
    }

    /// Start assembling a write to `address`
    ///
    /// Nothing goes on the bus until [`end_transmission`](Self::end_transmission).
    /// Calling this again discards the pending frame.
    pub fn begin_transmission(&mut self, address: u8) {
        self.transmitting = true;
        self.tx.start(address_byte(address, Direction::Write));
        trace!("usiwire: begin transmission to {:#x}", address);
    }

    /// Queue one byte
    ///
    /// Returns the number of bytes accepted: 0 when the frame is full (the
    /// byte is dropped and [`write_error`](Self::write_error) is raised).
    /// Outside a transmission this is the slave reply path, which is not
    /// implemented; the byte is ignored and reported as accepted.
    pub fn write(&mut self, byte: u8) -> usize {
        if !self.transmitting {
            return 1;
        }

        if self.tx.push(byte) {
            1
        } else {
            self.write_error = true;
            warn!("usiwire: transmit frame full, dropped {:#x}", byte);
            0
        }
    }

    /// Queue a run of bytes, one [`write`](Self::write) per byte
    ///
    /// Every byte is offered even after the frame fills up; the return is
    /// the sum of the accepted counts.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&byte| self.write(byte)).sum()
    }

    /// Transmit the pending frame and release the bus
    pub fn end_transmission(&mut self) -> Result<(), TransmissionError> {
        self.end_transmission_with(true)
    }

    /// Transmit the pending frame
    ///
    /// With `send_stop == false` the bus is held and the next transaction
    /// starts with a repeated start. The transmit frame is emptied whatever
    /// the outcome.
    pub fn end_transmission_with(&mut self, send_stop: bool) -> Result<(), TransmissionError> {
        let result = self.transceiver.transceive(self.tx.frame_mut(), send_stop);
        let length = self.tx.len();

        self.tx.clear();
        self.transmitting = false;

        match result {
            Ok(()) => {
                trace!("usiwire: sent {} byte frame, stop={}", length, send_stop);
                Ok(())
            }
            Err(state) => {
                let error = TransmissionError::from(state);
                warn!(
                    "usiwire: transmission failed ({} byte frame): {}",
                    length,
                    error
                );
                Err(error)
            }
        }
    }

    /// Read `quantity` bytes from `address`, ending with a stop condition
    ///
    /// Returns the number of bytes now available, 0 on failure.
    pub fn request_from(&mut self, address: u8, quantity: usize) -> usize {
        self.request(ReadRequest::new(address, quantity))
    }

    /// Perform a read transaction
    ///
    /// Returns the number of bytes now available, 0 on failure. Requests
    /// larger than the frame are clamped to `N - 1` bytes.
    pub fn request(&mut self, request: ReadRequest) -> usize {
        self.try_request(request).unwrap_or(0)
    }

    /// Perform a read transaction, reporting why it failed
    ///
    /// If the request carries an internal address it is written first in
    /// its own frame, ended with a repeated start. The outcome of that
    /// write is not inspected: the read is attempted regardless and only
    /// its failure is reported.
    pub fn try_request(&mut self, request: ReadRequest) -> Result<usize, TransmissionError> {
        if request.internal_address_size > 0 {
            self.begin_transmission(request.address);
            for byte in request.internal_address_bytes() {
                self.write(byte);
            }
            // Only the read phase is reported
            let _ = self.end_transmission_with(false);
        }

        // Slot 0 carries the address byte
        let length = request.quantity.saturating_add(1).min(N);
        let frame = self
            .rx
            .prepare(address_byte(request.address, Direction::Read), length);

        match self.transceiver.transceive(frame, request.send_stop) {
            Ok(()) => {
                trace!(
                    "usiwire: read {} bytes from {:#x}",
                    length - 1,
                    request.address
                );
                Ok(length - 1)
            }
            Err(state) => {
                self.rx.mark_empty();
                let error = TransmissionError::from(state);
                warn!(
                    "usiwire: read from {:#x} failed: {}",
                    request.address,
                    error
                );
                Err(error)
            }
        }
    }

    /// Bytes received and not yet read
    pub fn available(&self) -> usize {
        self.rx.available()
    }

    /// Next received byte, or `None` once the frame is drained
    pub fn read(&mut self) -> Option<u8> {
        self.rx.read()
    }

    /// Next received byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.rx.peek()
    }

    /// Drain up to `buf.len()` received bytes into `buf`
    ///
    /// Returns the number of bytes copied.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let unread = self.rx.unread();
        let count = unread.len().min(buf.len());
        buf[..count].copy_from_slice(&unread[..count]);
        self.rx.consume(count);
        count
    }

    /// Wait for outgoing data. Not implemented, does nothing.
    pub fn flush(&mut self) {
        trace!("usiwire: flush() not implemented");
    }

    /// Register the slave receive handler. Slave mode is not implemented;
    /// the handler is never called.
    pub fn on_receive(&mut self, _handler: fn(usize)) {
        trace!("usiwire: on_receive() not implemented");
    }

    /// Register the slave request handler. Slave mode is not implemented;
    /// the handler is never called.
    pub fn on_request(&mut self, _handler: fn()) {
        trace!("usiwire: on_request() not implemented");
    }

    /// Whether a write has been dropped since the flag was last cleared
    pub fn write_error(&self) -> bool {
        self.write_error
    }

    /// Reset the dropped-write flag
    pub fn clear_write_error(&mut self) {
        self.write_error = false;
    }

    /// Whether a transmission is being assembled
    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Frame capacity, address byte included
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Borrow the transceiver
    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    /// Mutably borrow the transceiver
    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }

    /// Give back the transceiver
    pub fn release(self) -> T {
        self.transceiver
    }
}
