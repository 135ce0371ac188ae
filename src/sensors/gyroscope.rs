//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and calibration math for the ITG3200 3-axis gyroscope.

use crate::{Error, RawSample};

/// Sensitivity at the only supported full scale (LSB per °/s)
pub const SENSITIVITY_LSB_PER_DPS: f32 = 14.375;

/// `FS_SEL` value for ±2000 °/s, the only full scale the part supports
pub const FULL_SCALE_2000_DPS: u8 = 3;

/// Time for the PLL to settle after reset or power-up (ms)
pub const STARTUP_DELAY_MS: u32 = 70;

/// Gyroscope low pass filter bandwidth (`DLPF_CFG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroDlpf {
    /// 256 Hz bandwidth, 8 kHz internal sample rate
    Hz256 = 0,
    /// 188 Hz bandwidth, 1 kHz internal sample rate
    Hz188 = 1,
    /// 98 Hz bandwidth, 1 kHz internal sample rate
    Hz98 = 2,
    /// 42 Hz bandwidth, 1 kHz internal sample rate
    Hz42 = 3,
    /// 20 Hz bandwidth, 1 kHz internal sample rate
    Hz20 = 4,
    /// 10 Hz bandwidth, 1 kHz internal sample rate
    Hz10 = 5,
    /// 5 Hz bandwidth, 1 kHz internal sample rate
    Hz5 = 6,
}

impl GyroDlpf {
    /// Decode the three-bit `DLPF_CFG` field (7 is reserved)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Hz256,
            1 => Self::Hz188,
            2 => Self::Hz98,
            3 => Self::Hz42,
            4 => Self::Hz20,
            5 => Self::Hz10,
            6 => Self::Hz5,
            _ => return None,
        })
    }

    /// Get the 3dB bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz256 => 256,
            Self::Hz188 => 188,
            Self::Hz98 => 98,
            Self::Hz42 => 42,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }

    /// Internal sample rate in Hz before the divider
    #[must_use]
    pub const fn internal_rate_hz(self) -> u16 {
        match self {
            Self::Hz256 => 8000,
            _ => 1000,
        }
    }
}

/// Clock source (`PWR_MGM` `CLK_SEL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal oscillator
    Internal = 0,
    /// PLL with X gyro reference
    PllXGyro = 1,
    /// PLL with Y gyro reference
    PllYGyro = 2,
    /// PLL with Z gyro reference
    PllZGyro = 3,
    /// PLL with external 32.768 kHz reference
    PllExternal32k = 4,
    /// PLL with external 19.2 MHz reference
    PllExternal19m = 5,
}

impl ClockSource {
    /// Decode the three-bit `CLK_SEL` field (6 and 7 are reserved)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Internal,
            1 => Self::PllXGyro,
            2 => Self::PllYGyro,
            3 => Self::PllZGyro,
            4 => Self::PllExternal32k,
            5 => Self::PllExternal19m,
            _ => return None,
        })
    }
}

/// Gyroscope configuration applied by `Itg3200::begin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Sample rate divider
    /// Actual sample rate = internal rate / (1 + `sample_rate_div`)
    pub sample_rate_div: u8,
    /// Low pass filter bandwidth
    pub dlpf: GyroDlpf,
    /// Clock source
    pub clock_source: ClockSource,
    /// Interrupt when the PLL is ready
    pub itg_ready_interrupt: bool,
    /// Interrupt when raw data is ready
    pub raw_ready_interrupt: bool,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            sample_rate_div: 0,
            dlpf: GyroDlpf::Hz256,
            clock_source: ClockSource::PllXGyro,
            itg_ready_interrupt: true,
            raw_ready_interrupt: true,
        }
    }
}

impl GyroConfig {
    /// Calculate the effective sample rate in Hz
    #[must_use]
    pub fn sample_rate_hz(&self) -> f32 {
        f32::from(self.dlpf.internal_rate_hz()) / (1.0 + f32::from(self.sample_rate_div))
    }
}

/// Axis orientation relative to the board frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Reading used as is
    #[default]
    Normal,
    /// Reading negated
    Reversed,
}

impl Polarity {
    /// Sign multiplier (+1 or -1)
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Reversed => -1.0,
        }
    }
}

impl From<bool> for Polarity {
    /// `true` means reversed
    fn from(reversed: bool) -> Self {
        if reversed { Self::Reversed } else { Self::Normal }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis angular velocity in °/s
    pub x: f32,
    /// Y-axis angular velocity in °/s
    pub y: f32,
    /// Z-axis angular velocity in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Get the magnitude of the angular velocity vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Per-axis calibration applied to raw gyroscope samples
///
/// `calibrated = (raw + offset) / 14.375 * polarity * gain`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroCalibration {
    /// Gain per axis (finite, non-zero)
    gain: [f32; 3],
    /// Offset per axis, added to the raw reading
    offset: [i16; 3],
    /// Polarity per axis
    polarity: [Polarity; 3],
}

impl Default for GyroCalibration {
    fn default() -> Self {
        Self {
            gain: [1.0; 3],
            offset: [0; 3],
            polarity: [Polarity::Normal; 3],
        }
    }
}

impl GyroCalibration {
    /// Per-axis gains
    #[must_use]
    pub const fn gains(&self) -> [f32; 3] {
        self.gain
    }

    /// Per-axis offsets
    #[must_use]
    pub const fn offsets(&self) -> [i16; 3] {
        self.offset
    }

    /// Per-axis polarities
    #[must_use]
    pub const fn polarities(&self) -> [Polarity; 3] {
        self.polarity
    }

    /// Replace all three gains
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any gain is zero, NaN or infinite.
    /// The previous gains are kept in that case.
    pub fn set_gains<E>(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<E>> {
        let gains = [x, y, z];
        if gains.iter().any(|g| !g.is_finite() || *g == 0.0) {
            return Err(Error::InvalidConfig);
        }
        self.gain = gains;
        Ok(())
    }

    /// Replace all three offsets
    pub const fn set_offsets(&mut self, x: i16, y: i16, z: i16) {
        self.offset = [x, y, z];
    }

    /// Replace all three polarities
    pub const fn set_polarities(&mut self, x: Polarity, y: Polarity, z: Polarity) {
        self.polarity = [x, y, z];
    }

    /// Raw reading plus offset, per axis
    #[must_use]
    pub fn offset_corrected(&self, raw: RawSample) -> [i32; 3] {
        let raw = raw.to_array();
        core::array::from_fn(|i| i32::from(raw[i]) + i32::from(self.offset[i]))
    }

    /// Apply offset, sensitivity, polarity and gain
    #[must_use]
    pub fn apply(&self, raw: RawSample) -> GyroDataDps {
        let corrected = self.offset_corrected(raw);
        // |raw + offset| <= 65535, exact in f32
        #[allow(clippy::cast_precision_loss)]
        let axis = |i: usize| {
            corrected[i] as f32 / SENSITIVITY_LSB_PER_DPS * self.polarity[i].sign() * self.gain[i]
        };
        GyroDataDps {
            x: axis(0),
            y: axis(1),
            z: axis(2),
        }
    }
}

/// Convert a raw `TEMP_OUT` reading to degrees Celsius
///
/// 280 LSB/°C with -13200 LSB at 35 °C.
#[must_use]
pub fn temperature_celsius(raw: i16) -> f32 {
    35.0 + (f32::from(raw) + 13200.0) / 280.0
}
