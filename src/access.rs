//! Register accessor and bit-field helpers
//!
//! Every sensor on the board is driven through the same few primitives:
//! burst-read a handful of bytes starting at a register, write a register,
//! and change one bit or one field of a register with a read-modify-write.
//! [`RegisterAccess`] provides them for any [`RegisterInterface`] with 8-bit
//! addresses, so the I2C and SPI transports (and test mocks) share one
//! implementation.
//!
//! Buffers are always owned by the caller; nothing here keeps scratch state
//! between calls.

use crate::Error;
use device_driver::RegisterInterface;

/// Largest burst handled by a single accessor call (one byte pair per axis)
pub const MAX_BURST_LEN: usize = 6;

/// Byte-level register access with bit-field helpers
///
/// Implemented for every [`RegisterInterface`] with `u8` addresses.
pub trait RegisterAccess {
    /// Error type of the underlying bus
    type BusError;

    /// Read `buffer.len()` consecutive registers starting at `register`
    ///
    /// Returns the number of bytes read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if the buffer is empty or longer than
    /// [`MAX_BURST_LEN`], or [`Error::Bus`] if the transaction fails.
    fn read_bytes(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<usize, Error<Self::BusError>>;

    /// Write `data` to consecutive registers starting at `register`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `data` is empty or longer than
    /// [`MAX_BURST_LEN`], or [`Error::Bus`] if the transaction fails.
    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Error<Self::BusError>>;

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn read_byte(&mut self, register: u8) -> Result<u8, Error<Self::BusError>> {
        let mut buffer = [0u8; 1];
        self.read_bytes(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Error<Self::BusError>> {
        self.write_bytes(register, &[value])
    }

    /// Read bit `bit` of `register`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBitPosition`] if `bit > 7` (before touching the
    /// bus), or an error if communication with the device fails.
    fn get_bit(&mut self, register: u8, bit: u8) -> Result<bool, Error<Self::BusError>> {
        check_bit::<Self::BusError>(bit)?;
        let value = self.read_byte(register)?;
        Ok((value >> bit) & 1 == 1)
    }

    /// Set or clear bit `bit` of `register`, leaving the other bits unchanged
    ///
    /// The register is read back after the write and the target bit is
    /// compared with the requested value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBitPosition`] if `bit > 7`,
    /// [`Error::VerifyMismatch`] if the read-back bit differs from `value`,
    /// or an error if communication with the device fails.
    fn set_bit(&mut self, register: u8, bit: u8, value: bool) -> Result<(), Error<Self::BusError>> {
        check_bit::<Self::BusError>(bit)?;
        let mask = 1u8 << bit;

        let current = self.read_byte(register)?;
        let expected = if value { current | mask } else { current & !mask };
        self.write_byte(register, expected)?;

        let actual = self.read_byte(register)?;
        if (actual & mask != 0) != value {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "register {=u8:#x} bit {=u8} did not latch (wrote {=u8:#x}, read {=u8:#x})",
                register,
                bit,
                expected,
                actual
            );
            return Err(Error::VerifyMismatch {
                register,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Read the field selected by `mask`, shifted down to bit 0
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty mask, or an error if
    /// communication with the device fails.
    fn read_field(&mut self, register: u8, mask: u8) -> Result<u8, Error<Self::BusError>> {
        let shift = field_shift::<Self::BusError>(mask)?;
        let value = self.read_byte(register)?;
        Ok((value & mask) >> shift)
    }

    /// Replace the field selected by `mask` with `value`
    ///
    /// `value` is given relative to bit 0 of the field. Bits outside the
    /// mask are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty mask or a value wider
    /// than the field, or an error if communication with the device fails.
    fn write_field(&mut self, register: u8, mask: u8, value: u8) -> Result<(), Error<Self::BusError>> {
        let shift = field_shift::<Self::BusError>(mask)?;
        if value > mask >> shift {
            return Err(Error::InvalidConfig);
        }

        let current = self.read_byte(register)?;
        let updated = (current & !mask) | ((value << shift) & mask);
        self.write_byte(register, updated)
    }
}

impl<I> RegisterAccess for I
where
    I: RegisterInterface<AddressType = u8>,
{
    type BusError = I::Error;

    fn read_bytes(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<usize, Error<Self::BusError>> {
        let len = check_len::<I::Error>(buffer.len())?;
        self.read_register(register, size_bits(len), buffer)?;
        Ok(len)
    }

    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Error<Self::BusError>> {
        let len = check_len::<I::Error>(data.len())?;
        self.write_register(register, size_bits(len), data)?;
        Ok(())
    }
}

fn check_len<E>(len: usize) -> Result<usize, Error<E>> {
    if len == 0 || len > MAX_BURST_LEN {
        Err(Error::InvalidLength(len))
    } else {
        Ok(len)
    }
}

fn check_bit<E>(bit: u8) -> Result<(), Error<E>> {
    if bit > 7 {
        Err(Error::InvalidBitPosition(bit))
    } else {
        Ok(())
    }
}

fn field_shift<E>(mask: u8) -> Result<u32, Error<E>> {
    if mask == 0 {
        Err(Error::InvalidConfig)
    } else {
        Ok(mask.trailing_zeros())
    }
}

// Length is bounded by MAX_BURST_LEN
#[allow(clippy::cast_possible_truncation)]
const fn size_bits(len: usize) -> u32 {
    (len * 8) as u32
}
