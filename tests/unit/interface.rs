//! Unit tests for the I2C and SPI transports

use crate::common::BoardMocks;
use device_driver::RegisterInterface;
use crate::common::mock_interface::MockI2cBus;
use embedded_hal::i2c::{ErrorKind as I2cErrorKind, NoAcknowledgeSource};
use embedded_hal::spi::{self, ErrorType, Operation, SpiDevice};
use tendof::{
    ADXL345_ADDRESS, ADXL345_ADDRESS_ALT, Adxl345, Error, I2cInterface, ITG3200_ADDRESS, Itg3200,
    RawSample, SpiInterface,
};

/// SPI device that records the bytes written in each transaction and answers
/// reads from a script
#[derive(Default)]
struct RecordingSpi {
    frames: Vec<Vec<u8>>,
    response: Vec<u8>,
}

impl ErrorType for RecordingSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut frame = Vec::new();
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => frame.extend_from_slice(bytes),
                Operation::Read(buffer) => {
                    let len = buffer.len().min(self.response.len());
                    buffer[..len].copy_from_slice(&self.response[..len]);
                }
                _ => return Err(spi::ErrorKind::Other),
            }
        }
        self.frames.push(frame);
        Ok(())
    }
}

#[test]
fn test_i2c_burst_read() {
    let mocks = BoardMocks::new();
    mocks.set_accel_data(1, -2, 256);
    mocks.set_gyro_data(-7, 8, 9);
    let mut bus = mocks.bus();

    let mut accel = Adxl345::new(I2cInterface::new(&mut bus, ADXL345_ADDRESS));
    assert_eq!(accel.read_raw().unwrap(), RawSample::new(1, -2, 256));
    drop(accel);

    let mut gyro = Itg3200::new(I2cInterface::new(&mut bus, ITG3200_ADDRESS));
    assert_eq!(gyro.read_raw().unwrap(), RawSample::new(-7, 8, 9));
}

#[test]
fn test_i2c_register_write() {
    let mocks = BoardMocks::new();
    let mut bus = mocks.bus();

    let mut accel = Adxl345::new(I2cInterface::new(&mut bus, ADXL345_ADDRESS));
    accel.set_tap_threshold(0x30).unwrap();
    accel.begin().unwrap();

    assert_eq!(mocks.accel.get_register(0x1D), 0x30);
}

#[test]
fn test_i2c_missing_device() {
    let mut bus = MockI2cBus::new();
    let interface = I2cInterface::new(&mut bus, ADXL345_ADDRESS_ALT);
    assert_eq!(interface.address(), ADXL345_ADDRESS_ALT);

    let mut accel = Adxl345::new(interface);
    assert_eq!(
        accel.begin(),
        Err(Error::Bus(I2cErrorKind::NoAcknowledge(
            NoAcknowledgeSource::Address
        )))
    );
}

#[test]
fn test_spi_read_sets_read_and_multibyte_flags() {
    let spi = RecordingSpi {
        response: vec![0x00, 0x01, 0xFE, 0xFF, 0x10, 0x00],
        ..RecordingSpi::default()
    };
    let mut accel = Adxl345::new(SpiInterface::new(spi));

    assert_eq!(accel.read_raw().unwrap(), RawSample::new(256, -2, 16));

    let spi = accel.release().release();
    assert_eq!(spi.frames, vec![vec![0xF2]]);
}

#[test]
fn test_spi_single_byte_read_and_write() {
    let spi = RecordingSpi {
        response: vec![0xE5],
        ..RecordingSpi::default()
    };
    let mut accel = Adxl345::new(SpiInterface::new(spi));

    assert_eq!(accel.device_id().unwrap(), 0xE5);
    accel.set_tap_threshold(0x30).unwrap();

    let spi = accel.release().release();
    assert_eq!(spi.frames, vec![vec![0x80], vec![0x1D, 0x30]]);
}

#[test]
fn test_i2c_long_write_is_not_truncated() {
    let mocks = BoardMocks::new();
    let mut bus = mocks.bus();
    let payload = [1, 2, 3, 4, 5, 6, 7, 8];

    let mut interface = I2cInterface::new(&mut bus, ADXL345_ADDRESS);
    interface.write_register(0x1D, 64, &payload).unwrap();

    for (offset, &value) in payload.iter().enumerate() {
        assert_eq!(mocks.accel.get_register(0x1D + offset as u8), value);
    }
}

#[test]
fn test_spi_long_write_is_not_truncated() {
    let payload = [1, 2, 3, 4, 5, 6, 7, 8];
    let mut interface = SpiInterface::new(RecordingSpi::default());

    interface.write_register(0x1D, 64, &payload).unwrap();

    let spi = interface.release();
    assert_eq!(spi.frames, vec![vec![0x5D, 1, 2, 3, 4, 5, 6, 7, 8]]);
}
