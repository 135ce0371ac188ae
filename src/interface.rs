//! Bus interface implementations
//!
//! This module provides implementations of the `device-driver` register traits
//! for I2C and SPI. Every driver in this crate is generic over
//! [`RegisterInterface`], so the transport is chosen once at construction time.
//!
//! All four sensors on the 10-DOF board sit on the same I2C bus. Give each
//! interface its own handle from a bus sharing wrapper such as
//! `embedded_hal_bus::i2c::RefCellDevice`, which keeps the address and data
//! phases of one transaction from interleaving with another driver's.

use device_driver::RegisterInterface;

/// SPI read flag (ADXL345 convention)
const SPI_READ: u8 = 0x80;

/// SPI multi-byte flag (ADXL345 convention)
const SPI_MULTI_BYTE: u8 = 0x40;

/// I2C interface for a single device on the bus
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface for the device at `address`
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral, or a shared handle to it
    /// * `address` - The 7-bit device address (see the `*_ADDRESS` constants)
    ///
    /// # Example
    /// ```ignore
    /// let bus = RefCell::new(i2c);
    /// let accel = Adxl345::new(I2cInterface::new(RefCellDevice::new(&bus), ADXL345_ADDRESS));
    /// let gyro = Itg3200::new(I2cInterface::new(RefCellDevice::new(&bus), ITG3200_ADDRESS));
    /// ```
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this interface talks to
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Adjacent writes go out as one transfer without a repeated start
        let register = [address];
        let mut operations = [
            embedded_hal::i2c::Operation::Write(&register),
            embedded_hal::i2c::Operation::Write(write_data),
        ];

        self.i2c.transaction(self.address, &mut operations)
    }
}

/// SPI interface (4-wire, ADXL345 addressing convention)
///
/// The address byte carries the read flag in bit 7 and the multi-byte flag
/// in bit 6, leaving six bits for the register address. Only the ADXL345 on
/// this board speaks SPI; the other sensors are I2C-only.
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically. With `embedded-hal-bus`:
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let accel = Adxl345::new(SpiInterface::new(spi_device));
/// ```
///
/// The ADXL345 expects SPI mode 3.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

/// Build the address byte for an SPI transfer of `len` bytes
const fn spi_address(address: u8, read: bool, len: usize) -> u8 {
    let mut byte = address & 0x3F;
    if read {
        byte |= SPI_READ;
    }
    if len > 1 {
        byte |= SPI_MULTI_BYTE;
    }
    byte
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let read_address = spi_address(address, true, read_data.len());

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let write_address = [spi_address(address, false, write_data.len())];

        let mut operations = [
            embedded_hal::spi::Operation::Write(&write_address),
            embedded_hal::spi::Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations)
    }
}
