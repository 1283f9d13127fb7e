//! I2C bus framing
//!
//! Address/direction packing for the first byte of every frame, and the
//! bus clock configuration type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bit position of the 7-bit address within the address byte
pub const ADDRESS_SHIFT: u8 = 1;

/// Mask of the read/write bit within the address byte
pub const READ_BIT: u8 = 0x01;

/// Data direction carried in the R/W bit of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Master transmits to the slave (R/W = 0)
    Write,
    /// Master receives from the slave (R/W = 1)
    Read,
}

impl Direction {
    /// Value of the R/W bit for this direction
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => READ_BIT,
        }
    }

    /// Recover the direction from a packed address byte
    pub const fn from_address_byte(byte: u8) -> Self {
        if byte & READ_BIT != 0 {
            Direction::Read
        } else {
            Direction::Write
        }
    }
}

/// Pack a 7-bit slave address and a direction into an address byte
///
/// The most significant bit of `address` is shifted out; only 7-bit
/// addressing is supported.
pub const fn address_byte(address: u8, direction: Direction) -> u8 {
    (address << ADDRESS_SHIFT) | direction.bit()
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

impl From<u32> for I2cConfig {
    fn from(frequency: u32) -> Self {
        Self { frequency }
    }
}
