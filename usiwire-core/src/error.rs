//! Transaction error taxonomy
//!
//! Every bus failure collapses into one of four codes, matching the
//! status values Arduino's `Wire.endTransmission()` reports.

use core::fmt;

use usiwire_hal::TransceiverState;

/// Status code for a completed transaction
pub const STATUS_OK: u8 = 0;

/// Failed bus transaction
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmissionError {
    /// Frame too long for the transceiver or for the frame buffer
    DataTooLong = 1,
    /// NACK received on transmit of the address byte
    AddressNack = 2,
    /// NACK received on transmit of a data byte
    DataNack = 3,
    /// Any other bus failure
    Other = 4,
}

impl TransmissionError {
    /// Numeric status code (1-4)
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<TransceiverState> for TransmissionError {
    fn from(state: TransceiverState) -> Self {
        match state {
            TransceiverState::DataOutOfBound => TransmissionError::DataTooLong,
            TransceiverState::NoAckOnAddress => TransmissionError::AddressNack,
            TransceiverState::NoAckOnData => TransmissionError::DataNack,
            _ => TransmissionError::Other,
        }
    }
}

impl fmt::Display for TransmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TransmissionError::DataTooLong => "data too long to fit in transmit buffer",
            TransmissionError::AddressNack => "received NACK on transmit of address",
            TransmissionError::DataNack => "received NACK on transmit of data",
            TransmissionError::Other => "other error",
        };
        f.write_str(msg)
    }
}

/// Collapse a transaction result into its numeric status code (0-4)
pub fn status_code(result: Result<(), TransmissionError>) -> u8 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.code(),
    }
}

impl embedded_hal::i2c::Error for TransmissionError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        match self {
            TransmissionError::DataTooLong => ErrorKind::Overrun,
            TransmissionError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            TransmissionError::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            TransmissionError::Other => ErrorKind::Other,
        }
    }
}

impl embedded_io::Error for TransmissionError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            TransmissionError::DataTooLong => embedded_io::ErrorKind::WriteZero,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_mapping() {
        assert_eq!(
            TransmissionError::from(TransceiverState::DataOutOfBound).code(),
            1
        );
        assert_eq!(
            TransmissionError::from(TransceiverState::NoAckOnAddress).code(),
            2
        );
        assert_eq!(
            TransmissionError::from(TransceiverState::NoAckOnData).code(),
            3
        );
    }

    #[test]
    fn test_unclassified_states_map_to_other() {
        for state in [
            TransceiverState::NoData,
            TransceiverState::UnexpectedStartCondition,
            TransceiverState::UnexpectedStopCondition,
            TransceiverState::UnexpectedDataCollision,
            TransceiverState::MissingStartCondition,
            TransceiverState::MissingStopCondition,
        ] {
            assert_eq!(TransmissionError::from(state), TransmissionError::Other);
            assert_eq!(TransmissionError::from(state).code(), 4);
        }
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code(Ok(())), 0);
        assert_eq!(status_code(Err(TransmissionError::DataNack)), 3);
    }

    #[test]
    fn test_embedded_hal_kind() {
        use embedded_hal::i2c::{Error, ErrorKind, NoAcknowledgeSource};

        assert_eq!(
            TransmissionError::AddressNack.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
        assert_eq!(TransmissionError::DataTooLong.kind(), ErrorKind::Overrun);
    }
}
