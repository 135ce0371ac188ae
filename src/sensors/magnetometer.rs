//! Magnetometer sensor types and configuration
//!
//! Provides types, enums, and heading math for the QMC5883L 3-axis
//! magnetometer and its VCM5883L variant.

use crate::{QMC5883L_ADDRESS, RawSample, VCM5883L_ADDRESS};

/// Declination used by the board's reference firmware (4°26′ east)
///
/// Not applied by default; set [`MagConfig::declination_deg`] to this value
/// to reproduce its headings.
pub const BOARD_DECLINATION_DEG: f32 = 4.0 + 26.0 / 60.0;

/// Magnetometer chip fitted to the board
///
/// Boards are sold with either part. The VCM5883L has no identification
/// register, a fixed ±8 G range, and axes mirrored relative to the QMC5883L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagChip {
    /// QMC5883L at 0x0D
    #[default]
    Qmc5883l,
    /// VCM5883L at 0x0C
    Vcm5883l,
}

impl MagChip {
    /// Fixed I2C address of the chip
    #[must_use]
    pub const fn address(self) -> u8 {
        match self {
            Self::Qmc5883l => QMC5883L_ADDRESS,
            Self::Vcm5883l => VCM5883L_ADDRESS,
        }
    }

    /// Chip answering at `address`, as found by a bus scan
    #[must_use]
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            QMC5883L_ADDRESS => Some(Self::Qmc5883l),
            VCM5883L_ADDRESS => Some(Self::Vcm5883l),
            _ => None,
        }
    }
}

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagMode {
    /// Standby, no measurements
    Standby = 0,
    /// Continuous measurement
    Continuous = 1,
}

/// Output data rate in continuous mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOdr {
    /// 10 Hz
    Hz10 = 0,
    /// 50 Hz
    Hz50 = 1,
    /// 100 Hz
    Hz100 = 2,
    /// 200 Hz
    Hz200 = 3,
}

/// Full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagRange {
    /// ±2 gauss
    Gauss2 = 0,
    /// ±8 gauss
    Gauss8 = 1,
}

impl MagRange {
    /// Sensitivity in LSB per gauss
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Gauss2 => 12000.0,
            Self::Gauss8 => 3000.0,
        }
    }
}

/// Over sample ratio (higher means less noise and more power)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOversampling {
    /// 512 samples
    X512 = 0,
    /// 256 samples
    X256 = 1,
    /// 128 samples
    X128 = 2,
    /// 64 samples
    X64 = 3,
}

/// Magnetometer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagConfig {
    /// Chip variant
    pub chip: MagChip,
    /// Operating mode (QMC5883L only)
    pub mode: MagMode,
    /// Output data rate (QMC5883L only)
    pub odr: MagOdr,
    /// Full scale range (QMC5883L only, the VCM5883L is fixed at ±8 G)
    pub range: MagRange,
    /// Over sample ratio (QMC5883L only)
    pub oversampling: MagOversampling,
    /// Magnetic declination added to every heading, in degrees
    ///
    /// Defaults to 0; see [`BOARD_DECLINATION_DEG`].
    pub declination_deg: f32,
}

impl Default for MagConfig {
    fn default() -> Self {
        Self {
            chip: MagChip::Qmc5883l,
            mode: MagMode::Continuous,
            odr: MagOdr::Hz200,
            range: MagRange::Gauss8,
            oversampling: MagOversampling::X512,
            declination_deg: 0.0,
        }
    }
}

/// Magnetometer data in gauss
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataGauss {
    /// X-axis field in gauss
    pub x: f32,
    /// Y-axis field in gauss
    pub y: f32,
    /// Z-axis field in gauss
    pub z: f32,
}

impl MagDataGauss {
    /// Create from a raw sample at the given range
    #[must_use]
    pub fn from_raw(raw: RawSample, range: MagRange) -> Self {
        let sensitivity = range.sensitivity();
        Self {
            x: f32::from(raw.x) / sensitivity,
            y: f32::from(raw.y) / sensitivity,
            z: f32::from(raw.z) / sensitivity,
        }
    }

    /// Get the magnitude of the field vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Compass heading in degrees from the horizontal field components
///
/// `atan2(y, x)` plus `declination_deg`, wrapped into `[0, 360)`.
/// Assumes the board is level; no tilt compensation.
#[must_use]
pub fn heading_degrees(x: f32, y: f32, declination_deg: f32) -> f32 {
    let heading = libm::atan2f(y, x).to_degrees() + declination_deg;
    wrap_degrees(heading)
}

/// Wrap an angle into `[0, 360)`
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = libm::fmodf(angle, 360.0);
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-6 + 360.0 rounds to 360.0 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
