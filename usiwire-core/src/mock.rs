//! Recording transceiver for unit tests

use heapless::Vec;
use usiwire_hal::{Direction, TransceiverState, UsiTransceiver};

/// One call to `transceive`
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Frame as it looked after the call (read data filled in)
    pub frame: Vec<u8, 64>,
    pub send_stop: bool,
}

/// Transceiver double that records every frame and serves canned read data
#[derive(Debug, Default)]
pub struct MockTransceiver {
    pub transfers: Vec<Transfer, 16>,
    /// Bytes handed out to read frames, from index 0 on every read
    pub response: Vec<u8, 64>,
    /// Fail every call with this state
    pub fail_with: Option<TransceiverState>,
    /// Fail only the call with this index
    pub fail_call: Option<(usize, TransceiverState)>,
    pub initialised: bool,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(data: &[u8]) -> Self {
        let mut mock = Self::new();
        mock.response.extend_from_slice(data).unwrap();
        mock
    }

    pub fn failing(state: TransceiverState) -> Self {
        Self {
            fail_with: Some(state),
            ..Self::default()
        }
    }

    pub fn transfer(&self, index: usize) -> &Transfer {
        &self.transfers[index]
    }
}

impl UsiTransceiver for MockTransceiver {
    fn initialise(&mut self) {
        self.initialised = true;
    }

    fn transceive(&mut self, frame: &mut [u8], send_stop: bool) -> Result<(), TransceiverState> {
        let index = self.transfers.len();
        let failure = match self.fail_call {
            Some((call, state)) if call == index => Some(state),
            _ => self.fail_with,
        };

        if failure.is_none() && !frame.is_empty() {
            if Direction::from_address_byte(frame[0]) == Direction::Read {
                for (slot, byte) in frame[1..].iter_mut().zip(self.response.iter()) {
                    *slot = *byte;
                }
            }
        }

        let mut recorded = Vec::new();
        recorded.extend_from_slice(frame).unwrap();
        self.transfers
            .push(Transfer {
                frame: recorded,
                send_stop,
            })
            .unwrap();

        match failure {
            Some(state) => Err(state),
            None => Ok(()),
        }
    }
}
