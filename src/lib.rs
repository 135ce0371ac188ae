#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod access;
pub mod device;
pub mod interface;
pub mod logger;
pub mod orientation;
pub mod record;
pub mod registers;
pub mod schedule;
pub mod sensors;

// Re-export main types
pub use access::{MAX_BURST_LEN, RegisterAccess};
pub use device::{Adxl345, Bmp280, ImuConfig, ImuSample, Itg3200, Qmc5883, TenDofImu};
pub use interface::{I2cInterface, SpiInterface};
pub use logger::{DataLogger, LoggerConfig};
pub use orientation::{OrientationAngles, Tilt, tilt_from_accel};
pub use record::{CSV_HEADER, CsvRecord};
pub use sensors::{
    AccelConfig, AccelDataG, Axis, BaroConfig, GyroCalibration, GyroConfig, GyroDataDps,
    MagChip, MagConfig, MagDataGauss, Polarity, RawSample,
};

/// ADXL345 I2C address with SDO/ALT ADDRESS pulled low (default: 0x53)
pub const ADXL345_ADDRESS: u8 = 0x53;

/// ADXL345 I2C address with SDO/ALT ADDRESS pulled high (0x1D)
pub const ADXL345_ADDRESS_ALT: u8 = 0x1D;

/// ITG3200 I2C address with AD0 low (default: 0x68)
pub const ITG3200_ADDRESS: u8 = 0x68;

/// ITG3200 I2C address with AD0 high (0x69)
pub const ITG3200_ADDRESS_ALT: u8 = 0x69;

/// QMC5883L I2C address (fixed)
pub const QMC5883L_ADDRESS: u8 = 0x0D;

/// VCM5883L I2C address (fixed)
pub const VCM5883L_ADDRESS: u8 = 0x0C;

/// BMP280 I2C address with SDO low (0x76)
pub const BMP280_ADDRESS: u8 = 0x76;

/// BMP280 I2C address with SDO high (0x77, used on the 10-DOF board)
pub const BMP280_ADDRESS_ALT: u8 = 0x77;

/// Sensors present on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    /// ADXL345 3-axis accelerometer
    Accelerometer,
    /// ITG3200 3-axis gyroscope
    Gyroscope,
    /// QMC5883L or VCM5883L 3-axis magnetometer
    Magnetometer,
    /// BMP280 barometer and temperature sensor
    Barometer,
}

/// Driver errors
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Identity check failed during initialization (contains the value read)
    InvalidDevice {
        /// Sensor that failed to identify itself
        sensor: Sensor,
        /// Identity register value that was read back
        id: u8,
    },
    /// Invalid configuration parameter
    InvalidConfig,
    /// Burst length outside `1..=MAX_BURST_LEN`
    InvalidLength(usize),
    /// Bit position outside `0..=7`
    InvalidBitPosition(u8),
    /// Read-back after a bit write did not match the requested value
    VerifyMismatch {
        /// Register address
        register: u8,
        /// Register value that was written
        expected: u8,
        /// Register value read back
        actual: u8,
    },
    /// Calibration overflow (averaged samples exceed i16 range)
    CalibrationOverflow,
    /// The text sink rejected a formatted record
    Output,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
