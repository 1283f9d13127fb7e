//! `embedded-hal` I2C master on top of [`UsiWire`]
//!
//! Lets device drivers written against `embedded_hal::i2c::I2c` run on a
//! USI part. Adjacent operations of the same kind are merged into one
//! frame, so `[Write(reg), Write(data)]` goes out as a single write. Each
//! frame but the last ends with a repeated start so the transaction keeps
//! the bus.

use core::mem::discriminant;

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use usiwire_hal::UsiTransceiver;

use crate::error::TransmissionError;
use crate::request::ReadRequest;
use crate::wire::UsiWire;

impl<T: UsiTransceiver, const N: usize> ErrorType for UsiWire<T, N> {
    type Error = TransmissionError;
}

/// End (exclusive) of the run of same-kind operations starting at `start`
fn run_end(operations: &[Operation<'_>], start: usize) -> usize {
    let kind = discriminant(&operations[start]);
    operations[start..]
        .iter()
        .position(|op| discriminant(op) != kind)
        .map_or(operations.len(), |offset| start + offset)
}

/// Payload bytes moved by a run
fn run_length(run: &[Operation<'_>]) -> usize {
    run.iter()
        .map(|op| match op {
            Operation::Write(bytes) => bytes.len(),
            Operation::Read(buf) => buf.len(),
        })
        .sum()
}

impl<T: UsiTransceiver, const N: usize> I2c<SevenBitAddress> for UsiWire<T, N> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), TransmissionError> {
        // Refuse up front rather than truncating or stranding a held bus
        let mut start = 0;
        while start < operations.len() {
            let end = run_end(operations, start);
            if run_length(&operations[start..end]) >= N {
                return Err(TransmissionError::DataTooLong);
            }
            start = end;
        }

        let mut start = 0;
        while start < operations.len() {
            let end = run_end(operations, start);
            let send_stop = end == operations.len();

            if matches!(operations[start], Operation::Write(_)) {
                self.begin_transmission(address);
                for operation in &operations[start..end] {
                    if let Operation::Write(bytes) = operation {
                        self.write_bytes(bytes);
                    }
                }
                self.end_transmission_with(send_stop)?;
            } else {
                let quantity = run_length(&operations[start..end]);
                self.try_request(ReadRequest::new(address, quantity).send_stop(send_stop))?;
                for operation in &mut operations[start..end] {
                    if let Operation::Read(buf) = operation {
                        self.read_bytes(buf);
                    }
                }
            }

            start = end;
        }

        Ok(())
    }
}
