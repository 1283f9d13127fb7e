//! Fixed-capacity transmit and receive frames
//!
//! Both frames reserve index 0 for the address byte, so a frame of
//! capacity `N` carries at most `N - 1` payload bytes. Capacity is a hard
//! limit: writes past it are refused rather than growing the frame.

use heapless::Vec;

/// Default frame capacity in bytes (address byte included)
pub const BUFFER_LENGTH: usize = 32;

/// Outgoing frame being assembled between `begin_transmission` and
/// `end_transmission`
///
/// The frame length doubles as the write cursor: the next byte always
/// lands at `len()`.
#[derive(Debug, Clone)]
pub struct TxBuffer<const N: usize = BUFFER_LENGTH> {
    frame: Vec<u8, N>,
}

impl<const N: usize> Default for TxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TxBuffer<N> {
    const CAPACITY_CHECK: () = assert!(N >= 2, "frame must hold an address byte and one data byte");

    /// Create an empty transmit frame
    pub const fn new() -> Self {
        let () = Self::CAPACITY_CHECK;
        Self { frame: Vec::new() }
    }

    /// Frame capacity, address byte included
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard any pending data and place `address_byte` at index 0
    pub fn start(&mut self, address_byte: u8) {
        self.frame.clear();
        // Capacity is at least 2, an empty frame always has room
        let _ = self.frame.push(address_byte);
    }

    /// Append one byte
    ///
    /// Returns `false` and leaves the frame untouched if it is full.
    pub fn push(&mut self, byte: u8) -> bool {
        self.frame.push(byte).is_ok()
    }

    /// Reset to an empty frame
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Committed length, address byte included
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frame.is_full()
    }

    /// Committed bytes, address byte included
    pub fn as_slice(&self) -> &[u8] {
        &self.frame
    }

    /// Committed bytes as handed to the transceiver
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame
    }
}

/// Incoming frame filled by a read transaction and drained byte by byte
///
/// Index 0 holds the echoed address byte and is never handed out; the
/// read cursor starts at 1.
#[derive(Debug, Clone)]
pub struct RxBuffer<const N: usize = BUFFER_LENGTH> {
    frame: Vec<u8, N>,
    cursor: usize,
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxBuffer<N> {
    const CAPACITY_CHECK: () = assert!(N >= 2, "frame must hold an address byte and one data byte");

    /// Create an empty receive frame
    pub const fn new() -> Self {
        let () = Self::CAPACITY_CHECK;
        Self {
            frame: Vec::new(),
            cursor: 0,
        }
    }

    /// Frame capacity, address byte included
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Size the frame for a read of `length` bytes (address byte included)
    /// and return it for the transceiver to fill
    ///
    /// `length` is clamped to `1..=N`. The read cursor is placed past the
    /// address byte.
    pub fn prepare(&mut self, address_byte: u8, length: usize) -> &mut [u8] {
        let length = length.clamp(1, N);
        self.frame.clear();
        // Clamped to capacity above
        let _ = self.frame.resize(length, 0);
        self.frame[0] = address_byte;
        self.cursor = 1;
        &mut self.frame
    }

    /// Drop everything but the address byte, leaving nothing to read
    pub fn mark_empty(&mut self) {
        self.frame.truncate(1);
        self.cursor = self.frame.len();
    }

    /// Number of valid bytes, address byte included
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Bytes left to read
    pub fn available(&self) -> usize {
        self.frame.len().saturating_sub(self.cursor)
    }

    /// Next unread byte, advancing the cursor
    pub fn read(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    /// Next unread byte without advancing the cursor
    pub fn peek(&self) -> Option<u8> {
        if self.cursor < self.frame.len() {
            Some(self.frame[self.cursor])
        } else {
            None
        }
    }

    /// Unread bytes
    pub fn unread(&self) -> &[u8] {
        let start = self.cursor.min(self.frame.len());
        &self.frame[start..]
    }

    /// Mark up to `count` unread bytes as consumed
    pub fn consume(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_add(count).min(self.frame.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_start_reserves_address_slot() {
        let mut tx: TxBuffer<4> = TxBuffer::new();
        tx.start(0xA0);
        assert_eq!(tx.len(), 1);
        assert_eq!(tx.as_slice(), &[0xA0]);
    }

    #[test]
    fn test_tx_push_until_full() {
        let mut tx: TxBuffer<4> = TxBuffer::new();
        tx.start(0xA0);
        assert!(tx.push(1));
        assert!(tx.push(2));
        assert!(tx.push(3));
        assert!(tx.is_full());
        assert!(!tx.push(4));
        assert_eq!(tx.as_slice(), &[0xA0, 1, 2, 3]);
    }

    #[test]
    fn test_tx_restart_discards_pending_bytes() {
        let mut tx: TxBuffer<4> = TxBuffer::new();
        tx.start(0xA0);
        tx.push(1);
        tx.start(0xB0);
        assert_eq!(tx.as_slice(), &[0xB0]);
        tx.clear();
        assert!(tx.is_empty());
    }

    #[test]
    fn test_rx_new_has_nothing_to_read() {
        let rx: RxBuffer<4> = RxBuffer::new();
        assert_eq!(rx.available(), 0);
        assert_eq!(rx.peek(), None);
    }

    #[test]
    fn test_rx_prepare_and_drain() {
        let mut rx: RxBuffer<4> = RxBuffer::new();
        let frame = rx.prepare(0xA1, 3);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame[0], 0xA1);
        frame[1] = 0x11;
        frame[2] = 0x22;

        assert_eq!(rx.available(), 2);
        assert_eq!(rx.peek(), Some(0x11));
        assert_eq!(rx.read(), Some(0x11));
        assert_eq!(rx.read(), Some(0x22));
        assert_eq!(rx.read(), None);
        assert_eq!(rx.available(), 0);
    }

    #[test]
    fn test_rx_prepare_clamps_length() {
        let mut rx: RxBuffer<4> = RxBuffer::new();
        assert_eq!(rx.prepare(0xA1, 10).len(), 4);
        assert_eq!(rx.prepare(0xA1, 0).len(), 1);
    }

    #[test]
    fn test_rx_mark_empty() {
        let mut rx: RxBuffer<4> = RxBuffer::new();
        rx.prepare(0xA1, 4);
        rx.mark_empty();
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.available(), 0);
        assert_eq!(rx.read(), None);
    }

    #[test]
    fn test_rx_consume() {
        let mut rx: RxBuffer<8> = RxBuffer::new();
        rx.prepare(0xA1, 5).copy_from_slice(&[0xA1, 1, 2, 3, 4]);
        rx.consume(2);
        assert_eq!(rx.unread(), &[3, 4]);
        rx.consume(10);
        assert_eq!(rx.unread(), &[] as &[u8]);
        assert_eq!(rx.available(), 0);
    }
}
