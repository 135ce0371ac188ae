//! Barometer sensor types and compensation
//!
//! Provides configuration enums and the BMP280 trimming-parameter compensation
//! (datasheet section 3.11.3, integer variant).

/// Standard sea level pressure in Pa
pub const SEA_LEVEL_PA: f32 = 101_325.0;

/// Oversampling setting for temperature or pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Measurement skipped (output 0x80000)
    Skipped = 0,
    /// ×1
    X1 = 1,
    /// ×2
    X2 = 2,
    /// ×4
    X4 = 3,
    /// ×8
    X8 = 4,
    /// ×16
    X16 = 5,
}

/// Power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// No measurements
    Sleep = 0,
    /// One measurement, then back to sleep
    Forced = 1,
    /// Periodic measurements separated by the standby time
    Normal = 3,
}

/// IIR filter coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IirFilter {
    /// Filter off
    Off = 0,
    /// Coefficient 2
    X2 = 1,
    /// Coefficient 4
    X4 = 2,
    /// Coefficient 8
    X8 = 3,
    /// Coefficient 16
    X16 = 4,
}

/// Standby time between measurements in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Standby {
    /// 0.5 ms
    Ms0_5 = 0,
    /// 62.5 ms
    Ms62_5 = 1,
    /// 125 ms
    Ms125 = 2,
    /// 250 ms
    Ms250 = 3,
    /// 500 ms
    Ms500 = 4,
    /// 1000 ms
    Ms1000 = 5,
    /// 2000 ms
    Ms2000 = 6,
    /// 4000 ms
    Ms4000 = 7,
}

/// Barometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaroConfig {
    /// Power mode
    pub mode: PowerMode,
    /// Temperature oversampling
    pub temperature_oversampling: Oversampling,
    /// Pressure oversampling
    pub pressure_oversampling: Oversampling,
    /// IIR filter coefficient
    pub filter: IirFilter,
    /// Standby time in normal mode
    pub standby: Standby,
}

impl Default for BaroConfig {
    fn default() -> Self {
        Self {
            mode: PowerMode::Normal,
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            filter: IirFilter::X16,
            standby: Standby::Ms62_5,
        }
    }
}

/// Factory trimming parameters (`dig_T1` .. `dig_P9`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub struct BaroCalibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
}

impl BaroCalibration {
    /// Decode the 24-byte little-endian trimming block read from 0x88
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 24]) -> Self {
        let u = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Self {
            t1: u(0),
            t2: s(2),
            t3: s(4),
            p1: u(6),
            p2: s(8),
            p3: s(10),
            p4: s(12),
            p5: s(14),
            p6: s(16),
            p7: s(18),
            p8: s(20),
            p9: s(22),
        }
    }

    /// Compensate a raw temperature reading
    ///
    /// Returns `(t_fine, temperature)` with temperature in 0.01 °C.
    /// `t_fine` feeds [`compensate_pressure`](Self::compensate_pressure).
    #[must_use]
    pub fn compensate_temperature(&self, adc_t: i32) -> (i32, i32) {
        let adc_t = i64::from(adc_t);
        let t1 = i64::from(self.t1);
        let var1 = (((adc_t >> 3) - (t1 << 1)) * i64::from(self.t2)) >> 11;
        let delta = (adc_t >> 4) - t1;
        let var2 = (((delta * delta) >> 12) * i64::from(self.t3)) >> 14;

        // 20-bit ADC input bounds t_fine well inside i32
        #[allow(clippy::cast_possible_truncation)]
        let t_fine = (var1 + var2) as i32;
        (t_fine, (t_fine * 5 + 128) >> 8)
    }

    /// Compensate a raw pressure reading
    ///
    /// Returns pressure in Pa as unsigned Q24.8, or `None` when the trimming
    /// values would divide by zero or overflow.
    #[must_use]
    pub fn compensate_pressure(&self, adc_p: i32, t_fine: i32) -> Option<u32> {
        let mut var1 = i64::from(t_fine) - 128_000;
        let mut var2 = var1 * var1 * i64::from(self.p6);
        var2 += (var1 * i64::from(self.p5)) << 17;
        var2 += i64::from(self.p4) << 35;
        var1 = ((var1 * var1 * i64::from(self.p3)) >> 8) + ((var1 * i64::from(self.p2)) << 12);
        var1 = ((1i64 << 47) + var1).checked_mul(i64::from(self.p1))? >> 33;
        if var1 == 0 {
            return None;
        }

        let p = 1_048_576 - i64::from(adc_p);
        let p = ((p << 31) - var2).checked_mul(3125)? / var1;
        let var1 = (i64::from(self.p9) * (p >> 13) * (p >> 13)) >> 25;
        let var2 = (i64::from(self.p8) * p) >> 19;
        let p = ((p + var1 + var2) >> 8) + (i64::from(self.p7) << 4);
        u32::try_from(p).ok()
    }
}

/// Raw 20-bit reading from a msb/lsb/xlsb register triple
#[must_use]
pub fn raw_20bit(msb: u8, lsb: u8, xlsb: u8) -> i32 {
    (i32::from(msb) << 12) | (i32::from(lsb) << 4) | (i32::from(xlsb) >> 4)
}

/// Altitude in metres from pressure, using the international barometric formula
///
/// `44330 · (1 − (p / p0)^(1 / 5.255))`
#[must_use]
pub fn altitude_m(pressure_pa: f32, sea_level_pa: f32) -> f32 {
    44_330.0 * (1.0 - libm::powf(pressure_pa / sea_level_pa, 1.0 / 5.255))
}
