//! USI transceiver abstraction
//!
//! The bit-banged USI driver exposes one blocking operation: clock a whole
//! frame onto (or off) the bus. Byte 0 of the frame is the address byte;
//! its R/W bit selects whether the remaining bytes are transmitted or
//! filled in place with received data.

/// Failure state reported by the USI driver
///
/// The numeric codes match the state register of the USI TWI master
/// driver, so a driver can hand its raw state byte to [`from_code`].
///
/// [`from_code`]: TransceiverState::from_code
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransceiverState {
    /// Transmission buffer is empty
    NoData = 0x00,
    /// Frame length is out of range for the driver
    DataOutOfBound = 0x01,
    /// Start condition detected mid-transfer
    UnexpectedStartCondition = 0x02,
    /// Stop condition detected mid-transfer
    UnexpectedStopCondition = 0x03,
    /// Data collision detected on SDA
    UnexpectedDataCollision = 0x04,
    /// Slave did not acknowledge a data byte
    NoAckOnData = 0x05,
    /// Slave did not acknowledge its address
    NoAckOnAddress = 0x06,
    /// Start condition could not be generated
    MissingStartCondition = 0x07,
    /// Stop condition could not be generated
    MissingStopCondition = 0x08,
}

impl TransceiverState {
    /// Translates a raw driver state byte to a variant of [`Self`].
    ///
    /// Returns `None` for values the driver never reports.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::NoData),
            0x01 => Some(Self::DataOutOfBound),
            0x02 => Some(Self::UnexpectedStartCondition),
            0x03 => Some(Self::UnexpectedStopCondition),
            0x04 => Some(Self::UnexpectedDataCollision),
            0x05 => Some(Self::NoAckOnData),
            0x06 => Some(Self::NoAckOnAddress),
            0x07 => Some(Self::MissingStartCondition),
            0x08 => Some(Self::MissingStopCondition),
            _ => None,
        }
    }

    /// Raw driver state byte
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Blocking USI bus transceiver
///
/// Implementations busy-wait on the clock and data lines; any timeout is
/// their own business. Exactly one bus attempt is made per call.
pub trait UsiTransceiver {
    /// One-time peripheral initialization
    ///
    /// Configures the USI block and releases both lines. Called by the
    /// transaction layer's `begin`.
    fn initialise(&mut self) {}

    /// Perform one framed bus transaction
    ///
    /// # Arguments
    /// * `frame` - Address byte followed by payload. For a read frame
    ///   (R/W bit set) bytes `1..` are overwritten with received data.
    ///   The slice length is the transfer length.
    /// * `send_stop` - Release the bus with a stop condition. When `false`
    ///   the bus is held so the next call begins with a repeated start.
    ///
    /// # Errors
    /// Returns the driver's failure state if the transaction did not
    /// complete.
    fn transceive(&mut self, frame: &mut [u8], send_stop: bool) -> Result<(), TransceiverState>;
}

impl<T: UsiTransceiver + ?Sized> UsiTransceiver for &mut T {
    fn initialise(&mut self) {
        T::initialise(self)
    }

    fn transceive(&mut self, frame: &mut [u8], send_stop: bool) -> Result<(), TransceiverState> {
        T::transceive(self, frame, send_stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes_match_driver() {
        for code in 0x00..=0x08 {
            let state = TransceiverState::from_code(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert_eq!(
            TransceiverState::from_code(0x06),
            Some(TransceiverState::NoAckOnAddress)
        );
    }

    #[test]
    fn test_unknown_state_code() {
        assert_eq!(TransceiverState::from_code(0x09), None);
        assert_eq!(TransceiverState::from_code(0xFF), None);
    }

    struct Loopback {
        calls: usize,
    }

    impl UsiTransceiver for Loopback {
        fn transceive(&mut self, frame: &mut [u8], _send_stop: bool) -> Result<(), TransceiverState> {
            self.calls += 1;
            if frame.len() <= 1 {
                return Err(TransceiverState::DataOutOfBound);
            }
            Ok(())
        }
    }

    fn drive<T: UsiTransceiver>(mut bus: T) -> [Result<(), TransceiverState>; 2] {
        bus.initialise();
        [
            bus.transceive(&mut [0xA0], true),
            bus.transceive(&mut [0xA0, 0x01], true),
        ]
    }

    #[test]
    fn test_mutable_reference_forwards() {
        let mut bus = Loopback { calls: 0 };
        let results = drive(&mut bus);
        assert_eq!(results[0], Err(TransceiverState::DataOutOfBound));
        assert_eq!(results[1], Ok(()));
        assert_eq!(bus.calls, 2);
    }
}
