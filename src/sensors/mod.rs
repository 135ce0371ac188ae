//! Sensor types for the 10-DOF board
//!
//! This module provides types, enums, and configuration structures for each sensor:
//! - Accelerometer (ADXL345)
//! - Gyroscope (ITG3200)
//! - Magnetometer (QMC5883L)
//! - Barometer (BMP280)
//!
//! Bus access lives in [`crate::device`]; everything here is plain data and math.

pub mod accelerometer;
pub mod barometer;
pub mod gyroscope;
pub mod magnetometer;

// Re-export main types
pub use accelerometer::{
    AccelConfig, AccelDataG, DataRate, Interrupt, InterruptPin, InterruptSource, Range,
};
pub use barometer::{BaroCalibration, BaroConfig, IirFilter, Oversampling, PowerMode, Standby};
pub use gyroscope::{ClockSource, GyroCalibration, GyroConfig, GyroDataDps, GyroDlpf, Polarity};
pub use magnetometer::{
    MagChip, MagConfig, MagDataGauss, MagMode, MagOdr, MagOversampling, MagRange,
};

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Array index of this axis
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One raw 3-axis reading, straight from the data registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis value
    pub x: i16,
    /// Y-axis value
    pub y: i16,
    /// Z-axis value
    pub z: i16,
}

impl RawSample {
    /// Create a sample from its three components
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode X, Y, Z pairs stored low byte first
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Decode X, Y, Z pairs stored high byte first
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([bytes[0], bytes[1]]),
            y: i16::from_be_bytes([bytes[2], bytes[3]]),
            z: i16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Components as an array in X, Y, Z order
    #[must_use]
    pub const fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Value of one axis
    #[must_use]
    pub const fn axis(self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl From<[i16; 3]> for RawSample {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}
