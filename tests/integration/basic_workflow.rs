//! Integration tests for basic workflow scenarios

use crate::common::{BoardMocks, MockDelay, assert_float_eq, create_mock_imu};
use core::cell::RefCell;
use embedded_hal_bus::i2c::RefCellDevice;
use tendof::sensors::barometer::SEA_LEVEL_PA;
use tendof::sensors::{MagChip, MagConfig};
use tendof::{
    ADXL345_ADDRESS, BMP280_ADDRESS_ALT, I2cInterface, ITG3200_ADDRESS, ImuConfig,
    QMC5883L_ADDRESS, TenDofImu, VCM5883L_ADDRESS,
};

#[test]
fn test_complete_initialization_workflow() {
    let (mut imu, mocks) = create_mock_imu();
    let mut delay = MockDelay::default();

    imu.begin(&mut delay).unwrap();

    // Accelerometer measuring at 100 Hz, full resolution
    assert_eq!(mocks.accel.writes_to(0x2D), vec![0x00, 0x10, 0x08]);
    assert_eq!(mocks.accel.get_register(0x31), 0x08);
    assert_eq!(mocks.accel.get_register(0x2C), 0x0A);
    // Gyroscope at ±2000 °/s
    assert_eq!(mocks.gyro.get_register(0x16), 0x18);
    // Magnetometer continuous
    assert_eq!(mocks.mag.get_register(0x09), 0x1D);
    // Barometer in normal mode
    assert_eq!(mocks.baro.get_register(0xF4), 0x57);
    assert!(imu.baro().calibration().is_some());
}

#[test]
fn test_sample_at_rest() {
    let (mut imu, mocks) = create_mock_imu();
    imu.begin(&mut MockDelay::default()).unwrap();

    mocks.set_accel_data(0, 0, 256);
    mocks.set_gyro_data(0, 0, 0);
    mocks.set_mag_data(0, 100, 0);

    let sample = imu.read_sample().unwrap();

    assert_float_eq(sample.accel.z, 0.9984, 1e-4);
    assert_float_eq(sample.gyro.magnitude(), 0.0, 1e-6);
    assert_float_eq(sample.orientation.roll, 0.0, 1e-3);
    assert_float_eq(sample.orientation.pitch, 0.0, 1e-3);
    assert_float_eq(sample.orientation.heading, 90.0, 1e-3);
}

#[test]
fn test_sample_tilted() {
    let (mut imu, mocks) = create_mock_imu();
    imu.begin(&mut MockDelay::default()).unwrap();

    // Rolled 45° about X
    mocks.set_accel_data(0, 181, 181);
    mocks.set_mag_data(100, 0, 0);
    let sample = imu.read_sample().unwrap();
    assert_float_eq(sample.orientation.roll, 45.0, 1e-3);
    assert_float_eq(sample.orientation.pitch, 0.0, 1e-3);

    // Nose down: gravity along +X
    mocks.set_accel_data(256, 0, 0);
    let sample = imu.read_sample().unwrap();
    assert_float_eq(sample.orientation.pitch, -90.0, 1e-3);

    let angles = imu.orientation().unwrap();
    assert_float_eq(angles.pitch, -90.0, 1e-3);
    assert_float_eq(angles.heading, 0.0, 1e-3);
}

#[test]
fn test_gyro_calibration_through_imu() {
    let (mut imu, mocks) = create_mock_imu();
    let mut delay = MockDelay::default();
    imu.begin(&mut delay).unwrap();

    mocks.set_gyro_data(12, -8, 3);
    imu.gyro().zero_calibrate(8, 10, &mut delay).unwrap();

    mocks.set_accel_data(0, 0, 256);
    let sample = imu.read_sample().unwrap();
    assert_float_eq(sample.gyro.magnitude(), 0.0, 1e-6);
}

#[test]
fn test_shared_bus_workflow() {
    let mocks = BoardMocks::new();
    mocks.set_accel_data(0, 0, 256);
    mocks.set_gyro_data(1437, 0, 0);
    mocks.set_mag_data(-100, 0, 0);

    let bus = RefCell::new(mocks.bus());
    let mut imu = TenDofImu::new(
        I2cInterface::new(RefCellDevice::new(&bus), ADXL345_ADDRESS),
        I2cInterface::new(RefCellDevice::new(&bus), ITG3200_ADDRESS),
        I2cInterface::new(RefCellDevice::new(&bus), QMC5883L_ADDRESS),
        I2cInterface::new(RefCellDevice::new(&bus), BMP280_ADDRESS_ALT),
        ImuConfig::default(),
    );

    imu.begin(&mut MockDelay::default()).unwrap();
    let sample = imu.read_sample().unwrap();

    assert_float_eq(sample.gyro.x, 99.965, 1e-2);
    assert_float_eq(sample.orientation.heading, 180.0, 1e-3);
    assert_float_eq(imu.baro().read_temperature_celsius().unwrap(), 25.08, 1e-4);
    assert_float_eq(
        imu.baro().read_altitude_m(SEA_LEVEL_PA).unwrap(),
        56.08,
        0.1,
    );

    let (accel, _gyro, _mag, _baro) = imu.release();
    assert_eq!(accel.address(), ADXL345_ADDRESS);
}

#[test]
fn test_board_with_vcm5883l() {
    let mocks = BoardMocks::with_vcm5883l();
    mocks.set_accel_data(0, 0, 256);
    mocks.set_mag_data(100, 0, 0);

    // Chip picked from the address a bus scan found
    let chip = MagChip::from_address(VCM5883L_ADDRESS).unwrap();
    let config = ImuConfig {
        mag: MagConfig {
            chip,
            ..MagConfig::default()
        },
        ..ImuConfig::default()
    };

    let bus = RefCell::new(mocks.bus());
    let mut imu = TenDofImu::new(
        I2cInterface::new(RefCellDevice::new(&bus), ADXL345_ADDRESS),
        I2cInterface::new(RefCellDevice::new(&bus), ITG3200_ADDRESS),
        I2cInterface::new(RefCellDevice::new(&bus), chip.address()),
        I2cInterface::new(RefCellDevice::new(&bus), BMP280_ADDRESS_ALT),
        config,
    );

    imu.begin(&mut MockDelay::default()).unwrap();
    assert_eq!(mocks.mag.get_register(0x0A), 0x4D);
    assert!(imu.baro().calibration().is_some());

    let sample = imu.read_sample().unwrap();
    assert_float_eq(sample.orientation.heading, 180.0, 1e-3);
}
