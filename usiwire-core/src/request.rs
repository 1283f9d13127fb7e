//! Read request parameters
//!
//! A read can be preceded by a write of the device's internal register
//! address, sent as a separate frame with a repeated start in between.

/// Maximum internal register address width in bytes
pub const MAX_INTERNAL_ADDRESS_SIZE: u8 = 3;

/// Parameters of one read transaction
///
/// Built with [`ReadRequest::new`] and adjusted with the chained setters:
///
/// ```
/// use usiwire_core::ReadRequest;
///
/// let request = ReadRequest::new(0x50, 4)
///     .internal_address(0x1234, 2)
///     .send_stop(true);
/// assert_eq!(request.internal_address_size, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadRequest {
    /// 7-bit slave address
    pub address: u8,
    /// Number of bytes to read
    pub quantity: usize,
    /// Internal register address, written MSB first
    pub internal_address: u32,
    /// Width of `internal_address` in bytes (0 = no register phase)
    pub internal_address_size: u8,
    /// Release the bus after the read
    pub send_stop: bool,
}

impl ReadRequest {
    /// Plain read of `quantity` bytes ending with a stop condition
    pub const fn new(address: u8, quantity: usize) -> Self {
        Self {
            address,
            quantity,
            internal_address: 0,
            internal_address_size: 0,
            send_stop: true,
        }
    }

    /// Write `address` (`size` bytes wide) before reading
    pub const fn internal_address(self, address: u32, size: u8) -> Self {
        Self {
            internal_address: address,
            internal_address_size: size,
            ..self
        }
    }

    /// Choose between a stop condition and holding the bus after the read
    pub const fn send_stop(self, send_stop: bool) -> Self {
        Self { send_stop, ..self }
    }

    /// Bytes of the internal register address, most significant first
    ///
    /// Widths above [`MAX_INTERNAL_ADDRESS_SIZE`] are clamped.
    pub fn internal_address_bytes(&self) -> impl Iterator<Item = u8> {
        let size = self.internal_address_size.min(MAX_INTERNAL_ADDRESS_SIZE);
        let address = self.internal_address;
        (0..size)
            .rev()
            .map(move |i| (address >> (u32::from(i) * 8)) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    fn collect(request: &ReadRequest) -> Vec<u8, 4> {
        request.internal_address_bytes().collect()
    }

    #[test]
    fn test_defaults() {
        let request = ReadRequest::new(0x50, 4);
        assert_eq!(request.internal_address_size, 0);
        assert!(request.send_stop);
        assert!(collect(&request).is_empty());
    }

    #[test]
    fn test_internal_address_msb_first() {
        let request = ReadRequest::new(0x50, 4).internal_address(0x1234, 2);
        assert_eq!(collect(&request).as_slice(), &[0x12, 0x34]);
    }

    #[test]
    fn test_internal_address_truncates_to_width() {
        let request = ReadRequest::new(0x50, 4).internal_address(0xAABBCC, 1);
        assert_eq!(collect(&request).as_slice(), &[0xCC]);
    }

    #[test]
    fn test_internal_address_width_clamped() {
        let request = ReadRequest::new(0x50, 4).internal_address(0x11223344, 7);
        assert_eq!(collect(&request).as_slice(), &[0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_send_stop_setter() {
        let request = ReadRequest::new(0x50, 1).send_stop(false);
        assert!(!request.send_stop);
        assert_eq!(request.address, 0x50);
    }
}
