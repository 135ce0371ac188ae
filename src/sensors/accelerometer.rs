//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the ADXL345 3-axis accelerometer.

/// Scale factor in full-resolution mode (g per LSB, all ranges)
pub const FULL_RES_SCALE_G_PER_LSB: f32 = 0.0039;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl Range {
    /// Decode the two-bit `DATA_FORMAT` range field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Scale factor in 10-bit mode (g per LSB)
    #[must_use]
    pub const fn fixed_resolution_scale(self) -> f32 {
        match self {
            Self::G2 => 0.0039,
            Self::G4 => 0.0078,
            Self::G8 => 0.0156,
            Self::G16 => 0.0312,
        }
    }
}

/// Output data rate (`BW_RATE` rate code)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// 6.25 Hz output, 3.13 Hz bandwidth
    Hz6_25 = 0x6,
    /// 12.5 Hz output, 6.25 Hz bandwidth
    Hz12_5 = 0x7,
    /// 25 Hz output, 12.5 Hz bandwidth
    Hz25 = 0x8,
    /// 50 Hz output, 25 Hz bandwidth
    Hz50 = 0x9,
    /// 100 Hz output, 50 Hz bandwidth (power-on default)
    Hz100 = 0xA,
    /// 200 Hz output, 100 Hz bandwidth
    Hz200 = 0xB,
    /// 400 Hz output, 200 Hz bandwidth
    Hz400 = 0xC,
    /// 800 Hz output, 400 Hz bandwidth
    Hz800 = 0xD,
    /// 1600 Hz output, 800 Hz bandwidth
    Hz1600 = 0xE,
    /// 3200 Hz output, 1600 Hz bandwidth
    Hz3200 = 0xF,
}

impl DataRate {
    /// Lowest accepted rate code
    pub const MIN_CODE: u8 = 0x6;

    /// Highest accepted rate code
    pub const MAX_CODE: u8 = 0xF;

    /// Look up a rate by its register code
    ///
    /// Codes below 0x6 exist on the part but are not supported here.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x6 => Self::Hz6_25,
            0x7 => Self::Hz12_5,
            0x8 => Self::Hz25,
            0x9 => Self::Hz50,
            0xA => Self::Hz100,
            0xB => Self::Hz200,
            0xC => Self::Hz400,
            0xD => Self::Hz800,
            0xE => Self::Hz1600,
            0xF => Self::Hz3200,
            _ => return None,
        })
    }

    /// Pick the highest rate not above `hz`
    ///
    /// Requests below 6.25 Hz select 6.25 Hz. Requests of 6400 Hz or more
    /// are out of range and return `None`.
    #[must_use]
    pub fn from_hz(hz: f32) -> Option<Self> {
        if !hz.is_finite() {
            return None;
        }
        // Truncating like the register-code arithmetic on the part
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut steps = (hz / 6.25).max(0.0) as u32;
        let mut code = Self::MIN_CODE;
        while steps > 1 {
            steps >>= 1;
            code += 1;
            if code > Self::MAX_CODE {
                return None;
            }
        }
        Self::from_code(code)
    }

    /// Output data rate in Hz (6.25 · 2^(code - 6))
    #[must_use]
    pub fn output_rate_hz(self) -> f32 {
        rate_hz_for_code(self as u8)
    }

    /// Signal bandwidth in Hz (half the output rate)
    #[must_use]
    pub fn bandwidth_hz(self) -> f32 {
        self.output_rate_hz() / 2.0
    }
}

/// Output data rate for a raw `BW_RATE` rate nibble
#[must_use]
pub fn rate_hz_for_code(code: u8) -> f32 {
    libm::powf(2.0, f32::from(code & 0x0F) - 6.0) * 6.25
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Full-scale range
    pub range: Range,
    /// Full resolution (fixed 3.9 mg/LSB) instead of 10-bit mode
    pub full_resolution: bool,
    /// Output data rate
    pub rate: DataRate,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            range: Range::G2,
            full_resolution: true,
            rate: DataRate::Hz100,
        }
    }
}

impl AccelConfig {
    /// Conversion factor from raw counts to g
    ///
    /// Assumes right-justified data.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        if self.full_resolution {
            FULL_RES_SCALE_G_PER_LSB
        } else {
            self.range.fixed_resolution_scale()
        }
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from a raw sample and a scale in g/LSB
    #[must_use]
    pub fn from_raw(raw: crate::RawSample, scale: f32) -> Self {
        Self {
            x: f32::from(raw.x) * scale,
            y: f32::from(raw.y) * scale,
            z: f32::from(raw.z) * scale,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// ADXL345 interrupt functions (bit position in `INT_ENABLE`, `INT_MAP`
/// and `INT_SOURCE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interrupt {
    /// New data available
    DataReady = 7,
    /// Single tap detected
    SingleTap = 6,
    /// Double tap detected
    DoubleTap = 5,
    /// Activity above threshold
    Activity = 4,
    /// Inactivity for longer than the inactivity time
    Inactivity = 3,
    /// Free fall detected
    FreeFall = 2,
    /// FIFO watermark reached
    Watermark = 1,
    /// FIFO overrun
    Overrun = 0,
}

impl Interrupt {
    /// Bit position of this interrupt in the interrupt registers
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Output pin an interrupt is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// INT1 (bit clear in `INT_MAP`)
    Int1,
    /// INT2 (bit set in `INT_MAP`)
    Int2,
}

/// Snapshot of `INT_SOURCE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource(pub u8);

impl InterruptSource {
    /// Whether `interrupt` was flagged in this snapshot
    #[must_use]
    pub const fn triggered(self, interrupt: Interrupt) -> bool {
        self.0 & (1 << interrupt.bit()) != 0
    }

    /// Whether no interrupt was flagged
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
