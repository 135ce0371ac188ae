//! Unit tests for the ITG3200 driver and gyroscope calibration

use crate::common::test_utils::{be_bytes, itg3200_mock};
use crate::common::{MockDelay, MockError, MockInterface, assert_float_eq};
use tendof::sensors::{Axis, ClockSource, GyroConfig, GyroDlpf, Polarity};
use tendof::{Error, Itg3200, Sensor};

const GYRO_XOUT_H: u8 = 0x1D;

fn create_driver() -> (Itg3200<MockInterface>, MockInterface) {
    let mock = itg3200_mock();
    (Itg3200::new(mock.clone()), mock)
}

#[test]
fn test_begin_applies_config() {
    let (mut gyro, mock) = create_driver();
    let mut delay = MockDelay::default();

    gyro.begin(GyroConfig::default(), &mut delay).unwrap();

    assert_eq!(mock.get_register(0x15), 0x00);
    assert_eq!(mock.get_register(0x16), 0x18);
    assert_eq!(mock.get_register(0x17), 0x05);
    assert_eq!(mock.get_register(0x3E), 0x01);
    assert_eq!(gyro.full_scale().unwrap(), 3);
    assert_eq!(gyro.dlpf().unwrap(), GyroDlpf::Hz256);
    assert_eq!(gyro.clock_source().unwrap(), ClockSource::PllXGyro);
    assert!(delay.total_ms() >= 70);
}

#[test]
fn test_begin_accepts_alternate_address_id() {
    let mut gyro = Itg3200::new(MockInterface::with_registers(&[(0x00, 0x69)]));
    assert!(gyro.begin(GyroConfig::default(), &mut MockDelay::default()).is_ok());
}

#[test]
fn test_begin_rejects_wrong_id() {
    let mut gyro = Itg3200::new(MockInterface::new());
    assert_eq!(
        gyro.begin(GyroConfig::default(), &mut MockDelay::default()),
        Err(Error::InvalidDevice {
            sensor: Sensor::Gyroscope,
            id: 0x00,
        })
    );
}

#[test]
fn test_full_scale_only_2000_dps() {
    let (mut gyro, mock) = create_driver();
    mock.set_register(0x16, 0x03);

    assert_eq!(gyro.set_full_scale(2), Err(Error::InvalidConfig));
    assert_eq!(mock.get_register(0x16), 0x03);

    gyro.set_full_scale(3).unwrap();
    assert_eq!(mock.get_register(0x16), 0x1B);
}

#[test]
fn test_dlpf_reserved_value() {
    let (mut gyro, mock) = create_driver();
    mock.set_register(0x16, 0x1F);

    assert_eq!(gyro.dlpf(), Err(Error::InvalidConfig));

    gyro.set_dlpf(GyroDlpf::Hz42).unwrap();
    assert_eq!(mock.get_register(0x16), 0x1B);
}

#[test]
fn test_standby_per_axis() {
    let (mut gyro, mock) = create_driver();
    mock.set_register(0x3E, 0x01);

    gyro.set_standby(Axis::Y, true).unwrap();
    assert_eq!(mock.get_register(0x3E), 0x11);
    assert!(gyro.is_standby(Axis::Y).unwrap());
    assert!(!gyro.is_standby(Axis::X).unwrap());

    gyro.set_standby(Axis::Z, true).unwrap();
    gyro.set_standby(Axis::Y, false).unwrap();
    assert_eq!(mock.get_register(0x3E), 0x09);
}

#[test]
fn test_interrupt_config() {
    let (mut gyro, mock) = create_driver();

    gyro.set_interrupt_active_low(true).unwrap();
    gyro.set_latch_until_cleared(true).unwrap();
    gyro.set_clear_on_any_read(true).unwrap();
    assert_eq!(mock.get_register(0x17), 0xB0);
    assert!(gyro.is_latch_until_cleared().unwrap());
    assert!(!gyro.is_interrupt_open_drain().unwrap());

    mock.set_register(0x1A, 0x05);
    assert!(gyro.is_itg_ready().unwrap());
    assert!(gyro.is_raw_data_ready().unwrap());
}

#[test]
fn test_zero_calibrate_constant_rate() {
    let (mut gyro, mock) = create_driver();
    let mut delay = MockDelay::default();
    mock.set_bytes(GYRO_XOUT_H, &be_bytes(50, -30, 20));

    let offsets = gyro.zero_calibrate(10, 5, &mut delay).unwrap();

    assert_eq!(offsets, [-50, 30, -20]);
    assert_eq!(gyro.calibration().offsets(), [-50, 30, -20]);
    assert_eq!(delay.total_ms(), 50);
    assert_eq!(gyro.read_raw_calibrated().unwrap(), [0, 0, 0]);

    let dps = gyro.read_dps().unwrap();
    assert_float_eq(dps.magnitude(), 0.0, 1e-6);
}

#[test]
fn test_zero_calibrate_truncates_average() {
    let (mut gyro, mock) = create_driver();
    mock.queue_read(GYRO_XOUT_H, &be_bytes(1, -1, 7));
    mock.queue_read(GYRO_XOUT_H, &be_bytes(2, -2, 8));

    let offsets = gyro.zero_calibrate(2, 0, &mut MockDelay::default()).unwrap();

    // 3/2 -> 1, -3/2 -> -1, 15/2 -> 7
    assert_eq!(offsets, [-1, 1, -7]);
}

#[test]
fn test_zero_calibrate_overflow() {
    let (mut gyro, mock) = create_driver();
    gyro.set_offsets(1, 2, 3);
    mock.set_bytes(GYRO_XOUT_H, &be_bytes(i16::MIN, 0, 0));

    assert_eq!(
        gyro.zero_calibrate(4, 0, &mut MockDelay::default()),
        Err(Error::CalibrationOverflow)
    );
    assert_eq!(gyro.calibration().offsets(), [1, 2, 3]);
}

#[test]
fn test_zero_calibrate_bus_error_keeps_offsets() {
    let (mut gyro, mock) = create_driver();
    gyro.set_offsets(1, 2, 3);
    mock.set_bytes(GYRO_XOUT_H, &be_bytes(10, 10, 10));
    mock.fail_next_read();

    assert_eq!(
        gyro.zero_calibrate(5, 0, &mut MockDelay::default()),
        Err(Error::Bus(MockError::Communication))
    );
    assert_eq!(gyro.calibration().offsets(), [1, 2, 3]);
}

#[test]
fn test_zero_calibrate_zero_samples() {
    let (mut gyro, _mock) = create_driver();
    assert_eq!(
        gyro.zero_calibrate(0, 0, &mut MockDelay::default()),
        Err(Error::InvalidConfig)
    );
}

#[test]
fn test_gain_and_polarity() {
    let (mut gyro, mock) = create_driver();
    // 2875 LSB = 200 °/s, 1150 LSB = 80 °/s
    mock.set_bytes(GYRO_XOUT_H, &be_bytes(2875, 1150, 0));

    gyro.set_gains(0.5, 1.0, 1.0).unwrap();
    gyro.set_polarities(Polarity::Normal, Polarity::Reversed, Polarity::Normal);

    let dps = gyro.read_dps().unwrap();
    assert_float_eq(dps.x, 100.0, 1e-3);
    assert_float_eq(dps.y, -80.0, 1e-3);
    assert_float_eq(dps.z, 0.0, 1e-6);
}

#[test]
fn test_offset_applied_before_scaling() {
    let (mut gyro, mock) = create_driver();
    mock.set_bytes(GYRO_XOUT_H, &be_bytes(100, 0, 0));
    gyro.set_offsets(-100, 0, 0);
    gyro.set_polarities(Polarity::Reversed, Polarity::Normal, Polarity::Normal);

    assert_eq!(gyro.read_raw_calibrated().unwrap(), [0, 0, 0]);
    assert_float_eq(gyro.read_dps().unwrap().x, 0.0, 1e-6);
}

#[test]
fn test_invalid_gains_rejected() {
    let (mut gyro, _mock) = create_driver();

    assert_eq!(gyro.set_gains(0.0, 1.0, 1.0), Err(Error::InvalidConfig));
    assert_eq!(gyro.set_gains(1.0, f32::NAN, 1.0), Err(Error::InvalidConfig));
    assert_eq!(
        gyro.set_gains(1.0, 1.0, f32::INFINITY),
        Err(Error::InvalidConfig)
    );
    assert_eq!(gyro.calibration().gains(), [1.0, 1.0, 1.0]);
}

#[test]
fn test_temperature() {
    let (mut gyro, mock) = create_driver();
    mock.set_bytes(0x1B, &(-13_200i16).to_be_bytes());

    assert_eq!(gyro.read_temperature_raw().unwrap(), -13_200);
    assert_float_eq(gyro.read_temperature_celsius().unwrap(), 35.0, 1e-4);
}
