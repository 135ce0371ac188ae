//! ITG3200 gyroscope driver

use super::axis_bit;
use crate::access::RegisterAccess;
use crate::registers::itg3200::{
    DLPF_FS, FS_SEL_MASK, GYRO_XOUT_H, Itg3200Registers as RegisterDevice, PWR_MGM, STBY_XG_BIT,
    TEMP_OUT_H, WHO_AM_I, WHO_AM_I_MASK, WHO_AM_I_VALUE,
};
use crate::sensors::gyroscope::{FULL_SCALE_2000_DPS, STARTUP_DELAY_MS, temperature_celsius};
use crate::sensors::{Axis, ClockSource, GyroCalibration, GyroConfig, GyroDataDps, GyroDlpf, Polarity};
use crate::{Error, RawSample, Sensor};
use device_driver::RegisterInterface;

/// Driver for the ITG3200 3-axis gyroscope
///
/// Holds the per-axis [`GyroCalibration`] applied by
/// [`read_dps`](Self::read_dps).
pub struct Itg3200<I> {
    device: RegisterDevice<I>,
    calibration: GyroCalibration,
}

impl<I> Itg3200<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver without touching the bus
    ///
    /// Calibration starts at gain 1, offset 0, normal polarity.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            calibration: GyroCalibration::default(),
        }
    }

    /// Check the device identity and apply `config`
    ///
    /// Sets the sample rate divider, the ±2000 °/s full scale, the low pass
    /// filter, the clock source and both data interrupts, then waits for the
    /// PLL to settle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if `WHO_AM_I` does not identify an
    /// ITG3200, or an error if communication with the device fails.
    pub fn begin<D>(&mut self, config: GyroConfig, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let id = self.who_am_i()?;
        if id & WHO_AM_I_MASK != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("ITG3200: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::InvalidDevice {
                sensor: Sensor::Gyroscope,
                id,
            });
        }

        self.set_sample_rate_divider(config.sample_rate_div)?;
        self.set_full_scale(FULL_SCALE_2000_DPS)?;
        self.set_dlpf(config.dlpf)?;
        self.set_clock_source(config.clock_source)?;
        self.set_itg_ready_interrupt(config.itg_ready_interrupt)?;
        self.set_raw_ready_interrupt(config.raw_ready_interrupt)?;
        delay.delay_ms(STARTUP_DELAY_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("ITG3200 configured: {}", config);
        Ok(())
    }

    /// Read the raw `WHO_AM_I` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.device.interface.read_byte(WHO_AM_I)
    }

    /// Reset all registers to their power-up defaults and wait for the PLL
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.device.pwr_mgm().modify(|w| w.set_h_reset(true))?;
        delay.delay_ms(STARTUP_DELAY_MS);
        Ok(())
    }

    // ==================== Sample rate, filter, full scale ====================

    /// Set the sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<I::Error>> {
        self.device.smplrt_div().write(|w| w.set_value(divider))?;
        Ok(())
    }

    /// Read the sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sample_rate_divider(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.smplrt_div().read()?.value())
    }

    /// Set the low pass filter bandwidth
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_dlpf(&mut self, dlpf: GyroDlpf) -> Result<(), Error<I::Error>> {
        self.device.dlpf_fs().modify(|w| w.set_dlpf_cfg(dlpf as u8))?;
        Ok(())
    }

    /// Read the low pass filter bandwidth
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the register holds the reserved
    /// value 7, or an error if communication with the device fails.
    pub fn dlpf(&mut self) -> Result<GyroDlpf, Error<I::Error>> {
        let bits = self.device.dlpf_fs().read()?.dlpf_cfg();
        GyroDlpf::from_bits(bits).ok_or(Error::InvalidConfig)
    }

    /// Set `FS_SEL`
    ///
    /// Only 3 (±2000 °/s) is a valid setting on this part.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for any other value, or an error if
    /// communication with the device fails.
    pub fn set_full_scale(&mut self, fs_sel: u8) -> Result<(), Error<I::Error>> {
        if fs_sel != FULL_SCALE_2000_DPS {
            return Err(Error::InvalidConfig);
        }
        self.device.interface.write_field(DLPF_FS, FS_SEL_MASK, fs_sel)
    }

    /// Read `FS_SEL`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn full_scale(&mut self) -> Result<u8, Error<I::Error>> {
        self.device.interface.read_field(DLPF_FS, FS_SEL_MASK)
    }

    // ==================== Interrupt configuration ====================

    /// Drive the interrupt pin active low
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt_active_low(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_actl(enable))?;
        Ok(())
    }

    /// Whether the interrupt pin is active low
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_interrupt_active_low(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.actl())
    }

    /// Use an open drain interrupt output instead of push-pull
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt_open_drain(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_open(enable))?;
        Ok(())
    }

    /// Whether the interrupt output is open drain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_interrupt_open_drain(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.open())
    }

    /// Latch the interrupt until cleared instead of a 50 µs pulse
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_latch_until_cleared(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_latch_int_en(enable))?;
        Ok(())
    }

    /// Whether the interrupt latches until cleared
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_latch_until_cleared(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.latch_int_en())
    }

    /// Clear the latch on any register read instead of a status read
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_clear_on_any_read(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_int_anyrd_2_clear(enable))?;
        Ok(())
    }

    /// Whether any register read clears the latch
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_clear_on_any_read(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.int_anyrd_2_clear())
    }

    /// Interrupt when the PLL is ready
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_itg_ready_interrupt(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_itg_rdy_en(enable))?;
        Ok(())
    }

    /// Whether the PLL-ready interrupt is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_itg_ready_interrupt(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.itg_rdy_en())
    }

    /// Interrupt when raw data is ready
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_raw_ready_interrupt(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.int_cfg().modify(|w| w.set_raw_rdy_en(enable))?;
        Ok(())
    }

    /// Whether the raw-data-ready interrupt is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_raw_ready_interrupt(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_cfg().read()?.raw_rdy_en())
    }

    /// Whether the PLL is ready
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_itg_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_status().read()?.itg_rdy())
    }

    /// Whether new raw data is available
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_raw_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.int_status().read()?.raw_data_rdy())
    }

    // ==================== Power management ====================

    /// Enter or leave low power sleep
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().modify(|w| w.set_sleep(enable))?;
        Ok(())
    }

    /// Whether the part is sleeping
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_sleeping(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.pwr_mgm().read()?.sleep())
    }

    /// Put one axis in or out of standby, leaving the other axes unchanged
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_standby(&mut self, axis: Axis, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(PWR_MGM, axis_bit(axis, STBY_XG_BIT), enable)
    }

    /// Whether one axis is in standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_standby(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(PWR_MGM, axis_bit(axis, STBY_XG_BIT))
    }

    /// Select the clock source
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgm().modify(|w| w.set_clk_sel(source as u8))?;
        Ok(())
    }

    /// Read the clock source
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a reserved value, or an error if
    /// communication with the device fails.
    pub fn clock_source(&mut self) -> Result<ClockSource, Error<I::Error>> {
        let bits = self.device.pwr_mgm().read()?.clk_sel();
        ClockSource::from_bits(bits).ok_or(Error::InvalidConfig)
    }

    // ==================== Data ====================

    /// Read one raw sample (big-endian X, Y, Z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device.interface.read_bytes(GYRO_XOUT_H, &mut buffer)?;
        Ok(RawSample::from_be_bytes(buffer))
    }

    /// Read one raw sample with the offsets added
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw_calibrated(&mut self) -> Result<[i32; 3], Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(self.calibration.offset_corrected(raw))
    }

    /// Read angular velocity in °/s with offset, polarity and gain applied
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_dps(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(self.calibration.apply(raw))
    }

    /// Read the raw die temperature
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device.interface.read_bytes(TEMP_OUT_H, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer))
    }

    /// Read the die temperature in °C
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(temperature_celsius(self.read_temperature_raw()?))
    }

    // ==================== Calibration ====================

    /// Current calibration
    #[must_use]
    pub const fn calibration(&self) -> &GyroCalibration {
        &self.calibration
    }

    /// Set per-axis gains
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any gain is zero or not finite.
    pub fn set_gains(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<I::Error>> {
        self.calibration.set_gains(x, y, z)
    }

    /// Set per-axis offsets (added to raw readings)
    pub const fn set_offsets(&mut self, x: i16, y: i16, z: i16) {
        self.calibration.set_offsets(x, y, z);
    }

    /// Set per-axis polarities
    pub const fn set_polarities(&mut self, x: Polarity, y: Polarity, z: Polarity) {
        self.calibration.set_polarities(x, y, z);
    }

    /// Measure the zero-rate output and store its negation as the offsets
    ///
    /// Waits `delay_ms` before each of `samples` reads. The board must be
    /// still. Averages truncate toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `samples` is zero,
    /// [`Error::CalibrationOverflow`] if a negated average does not fit in
    /// `i16`, or an error if communication with the device fails. Offsets
    /// are left unchanged on error.
    pub fn zero_calibrate<D>(
        &mut self,
        samples: u16,
        delay_ms: u32,
        delay: &mut D,
    ) -> Result<[i16; 3], Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut sum = [0i64; 3];
        for _ in 0..samples {
            delay.delay_ms(delay_ms);
            let raw = self.read_raw()?.to_array();
            for (total, value) in sum.iter_mut().zip(raw) {
                *total += i64::from(value);
            }
        }

        let mut offsets = [0i16; 3];
        for (offset, total) in offsets.iter_mut().zip(sum) {
            let average = total / i64::from(samples);
            *offset = i16::try_from(-average).map_err(|_| Error::CalibrationOverflow)?;
        }

        let [x, y, z] = offsets;
        self.calibration.set_offsets(x, y, z);

        #[cfg(feature = "defmt")]
        defmt::info!("ITG3200 zero offsets: x={} y={} z={}", x, y, z);
        Ok(offsets)
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Access the register map directly
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<I> {
        &mut self.device
    }
}
