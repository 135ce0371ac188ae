//! Test utilities and helper functions

use crate::common::mock_interface::{MockI2cBus, MockInterface};
use tendof::{
    ADXL345_ADDRESS, BMP280_ADDRESS_ALT, ITG3200_ADDRESS, ImuConfig, QMC5883L_ADDRESS, TenDofImu,
    VCM5883L_ADDRESS,
};

/// BMP280 trimming values from the datasheet compensation example
pub const BMP280_CALIB: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00,
    0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];

/// Raw pressure and temperature bytes from the same example
/// (`adc_P` = 415148, `adc_T` = 519888)
pub const BMP280_DATA: [u8; 6] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];

/// Delay that only adds up the requested time
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDelay {
    /// Total requested delay in nanoseconds
    pub total_ns: u64,
}

impl MockDelay {
    /// Total requested delay in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// ADXL345 register file with a valid `DEVID`
pub fn adxl345_mock() -> MockInterface {
    MockInterface::with_registers(&[(0x00, 0xE5)])
}

/// ITG3200 register file with a valid `WHO_AM_I`
pub fn itg3200_mock() -> MockInterface {
    MockInterface::with_registers(&[(0x00, 0x68)])
}

/// QMC5883L register file with a valid chip id
pub fn qmc5883_mock() -> MockInterface {
    MockInterface::with_registers(&[(0x0D, 0xFF)])
}

/// BMP280 register file with a valid chip id, trimming values and one sample
pub fn bmp280_mock() -> MockInterface {
    let mock = MockInterface::with_registers(&[(0xD0, 0x58)]);
    mock.set_bytes(0x88, &BMP280_CALIB);
    mock.set_bytes(0xF7, &BMP280_DATA);
    mock
}

/// Shared handles to the four register files of a mock board
#[derive(Clone)]
pub struct BoardMocks {
    pub accel: MockInterface,
    pub gyro: MockInterface,
    pub mag: MockInterface,
    pub baro: MockInterface,
    pub mag_address: u8,
}

impl BoardMocks {
    /// Register files that pass every identity check
    pub fn new() -> Self {
        Self {
            accel: adxl345_mock(),
            gyro: itg3200_mock(),
            mag: qmc5883_mock(),
            baro: bmp280_mock(),
            mag_address: QMC5883L_ADDRESS,
        }
    }

    /// Board fitted with a VCM5883L, which has no identity register to preset
    pub fn with_vcm5883l() -> Self {
        Self {
            mag: MockInterface::new(),
            mag_address: VCM5883L_ADDRESS,
            ..Self::new()
        }
    }

    /// Set the ADXL345 data registers (little-endian)
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.accel.set_bytes(0x32, &le_bytes(x, y, z));
    }

    /// Set the ITG3200 data registers (big-endian)
    pub fn set_gyro_data(&self, x: i16, y: i16, z: i16) {
        self.gyro.set_bytes(0x1D, &be_bytes(x, y, z));
    }

    /// Set the magnetometer data registers (little-endian)
    pub fn set_mag_data(&self, x: i16, y: i16, z: i16) {
        self.mag.set_bytes(0x00, &le_bytes(x, y, z));
    }

    /// Mock I2C bus with the four register files at their board addresses
    pub fn bus(&self) -> MockI2cBus {
        let mut bus = MockI2cBus::new();
        bus.attach(ADXL345_ADDRESS, self.accel.clone());
        bus.attach(ITG3200_ADDRESS, self.gyro.clone());
        bus.attach(self.mag_address, self.mag.clone());
        bus.attach(BMP280_ADDRESS_ALT, self.baro.clone());
        bus
    }
}

/// IMU over four mock interfaces
pub type MockImu = TenDofImu<MockInterface, MockInterface, MockInterface, MockInterface>;

/// Create an IMU over mock interfaces
/// Returns (imu, mocks) where mocks share state with the IMU
pub fn create_mock_imu() -> (MockImu, BoardMocks) {
    let mocks = BoardMocks::new();
    let imu = TenDofImu::new(
        mocks.accel.clone(),
        mocks.gyro.clone(),
        mocks.mag.clone(),
        mocks.baro.clone(),
        ImuConfig::default(),
    );
    (imu, mocks)
}

/// Three axes as little-endian bytes
pub fn le_bytes(x: i16, y: i16, z: i16) -> [u8; 6] {
    let [x0, x1] = x.to_le_bytes();
    let [y0, y1] = y.to_le_bytes();
    let [z0, z1] = z.to_le_bytes();
    [x0, x1, y0, y1, z0, z1]
}

/// Three axes as big-endian bytes
pub fn be_bytes(x: i16, y: i16, z: i16) -> [u8; 6] {
    let [x0, x1] = x.to_be_bytes();
    let [y0, y1] = y.to_be_bytes();
    let [z0, z1] = z.to_be_bytes();
    [x0, x1, y0, y1, z0, z1]
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
