//! ADXL345 accelerometer driver

use super::axis_bit;
use crate::access::RegisterAccess;
use crate::orientation::Tilt;
use crate::registers::adxl345::{
    ACT_INACT_CTL, ACT_TAP_STATUS, ASLEEP_BIT, Adxl345Registers as RegisterDevice, BW_RATE,
    DATAX0, DEVID_VALUE, INT_ENABLE, INT_MAP, INT_SOURCE, RATE_MASK, TAP_AXES,
};
use crate::sensors::accelerometer::rate_hz_for_code;
use crate::sensors::{
    AccelConfig, AccelDataG, Axis, DataRate, Interrupt, InterruptPin, InterruptSource, Range,
};
use crate::{Error, RawSample, Sensor};
use device_driver::RegisterInterface;

/// `ACT_INACT_CTL` and `ACT_TAP_STATUS` bit of the X activity axis
const ACT_X_BIT: u8 = 6;

/// `ACT_INACT_CTL` bit of the X inactivity axis, `TAP_AXES` and
/// `ACT_TAP_STATUS` bit of the X tap axis
const INACT_TAP_X_BIT: u8 = 2;

/// Driver for the ADXL345 3-axis accelerometer
pub struct Adxl345<I> {
    device: RegisterDevice<I>,
    config: AccelConfig,
}

impl<I> Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver without touching the bus
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            config: AccelConfig::default(),
        }
    }

    /// Check the device identity
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if `DEVID` is not 0xE5, or an error
    /// if communication with the device fails.
    pub fn begin(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.device_id()?;
        if id != DEVID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADXL345: unexpected DEVID {=u8:#x}", id);
            return Err(Error::InvalidDevice {
                sensor: Sensor::Accelerometer,
                id,
            });
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345 found");
        Ok(())
    }

    /// Read the `DEVID` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.dev_id().read()?.devid())
    }

    /// Start measuring
    ///
    /// Cycles `POWER_CTL` through standby, auto-sleep and measure so the part
    /// starts from a known state.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn power_on(&mut self) -> Result<(), Error<I::Error>> {
        self.device.power_ctl().write(|_| {})?;
        self.device.power_ctl().write(|w| w.set_auto_sleep(true))?;
        self.device.power_ctl().write(|w| w.set_measure(true))?;
        Ok(())
    }

    /// Enter or leave measurement mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_measure(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.power_ctl().modify(|w| w.set_measure(enable))?;
        Ok(())
    }

    /// Whether the part is in measurement mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_measuring(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.power_ctl().read()?.measure())
    }

    /// Enable or disable auto-sleep on inactivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_auto_sleep(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.power_ctl().modify(|w| w.set_auto_sleep(enable))?;
        Ok(())
    }

    /// Whether auto-sleep is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_auto_sleep(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.power_ctl().read()?.auto_sleep())
    }

    /// Apply range, resolution and data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: AccelConfig) -> Result<(), Error<I::Error>> {
        self.set_range(config.range)?;
        self.set_full_resolution(config.full_resolution)?;
        self.set_rate(config.rate)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345 configured: {}", config);
        Ok(())
    }

    /// Configuration used to scale readings
    #[must_use]
    pub const fn config(&self) -> &AccelConfig {
        &self.config
    }

    /// Read one raw sample (little-endian X, Y, Z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device.interface.read_bytes(DATAX0, &mut buffer)?;
        Ok(RawSample::from_le_bytes(buffer))
    }

    /// Read acceleration in g
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_g(&mut self) -> Result<AccelDataG, Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(AccelDataG::from_raw(raw, self.config.scale()))
    }

    /// Read roll and pitch from one sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_tilt(&mut self) -> Result<Tilt, Error<I::Error>> {
        Ok(Tilt::from_raw(self.read_raw()?))
    }

    // ==================== DATA_FORMAT ====================

    /// Set the g range, preserving the other `DATA_FORMAT` bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_range(&mut self, range: Range) -> Result<(), Error<I::Error>> {
        self.device
            .data_format()
            .modify(|w| w.set_range(range as u8))?;
        self.config.range = range;
        Ok(())
    }

    /// Read the g range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn range(&mut self) -> Result<Range, Error<I::Error>> {
        Ok(Range::from_bits(self.device.data_format().read()?.range()))
    }

    /// Select full resolution (3.9 mg/LSB) or 10-bit mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_full_resolution(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.data_format().modify(|w| w.set_full_res(enable))?;
        self.config.full_resolution = enable;
        Ok(())
    }

    /// Whether full resolution is selected
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_full_resolution(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.data_format().read()?.full_res())
    }

    /// Select left-justified (MSB) data
    ///
    /// [`read_g`](Self::read_g) assumes right-justified data.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_justify_left(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.data_format().modify(|w| w.set_justify(enable))?;
        Ok(())
    }

    /// Whether data is left-justified
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_justify_left(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.data_format().read()?.justify())
    }

    /// Drive the interrupt pins active low
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt_active_low(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.data_format().modify(|w| w.set_int_invert(enable))?;
        Ok(())
    }

    /// Whether the interrupt pins are active low
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_interrupt_active_low(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.data_format().read()?.int_invert())
    }

    /// Apply the self-test force
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_self_test(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.data_format().modify(|w| w.set_self_test(enable))?;
        Ok(())
    }

    // ==================== BW_RATE ====================

    /// Set the data rate from a raw `BW_RATE` code
    ///
    /// Only codes 0x6 (6.25 Hz) to 0xF (3200 Hz) are accepted. The low-power
    /// bit is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for any other code, or an error if
    /// communication with the device fails.
    pub fn set_rate_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let Some(rate) = DataRate::from_code(code) else {
            return Err(Error::InvalidConfig);
        };
        self.device.interface.write_field(BW_RATE, RATE_MASK, code)?;
        self.config.rate = rate;
        Ok(())
    }

    /// Set the data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_rate(&mut self, rate: DataRate) -> Result<(), Error<I::Error>> {
        self.set_rate_code(rate as u8)
    }

    /// Read the raw `BW_RATE` rate code
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn rate_code(&mut self) -> Result<u8, Error<I::Error>> {
        self.device.interface.read_field(BW_RATE, RATE_MASK)
    }

    /// Read the data rate in Hz (6.25 · 2^(code - 6))
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn rate_hz(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(rate_hz_for_code(self.rate_code()?))
    }

    /// Enable reduced power operation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_power(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.bw_rate().modify(|w| w.set_low_power(enable))?;
        Ok(())
    }

    /// Whether reduced power operation is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_low_power(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.bw_rate().read()?.low_power())
    }

    // ==================== Thresholds and timing ====================

    /// Set the tap threshold (62.5 mg/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_tap_threshold(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.thresh_tap().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the tap threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn tap_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.thresh_tap().read()?.value())
    }

    /// Set the maximum tap duration (625 µs/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_tap_duration(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.dur().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the maximum tap duration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn tap_duration(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.dur().read()?.value())
    }

    /// Set the wait between taps before the double-tap window (1.25 ms/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_double_tap_latency(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.latent().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the double-tap latency
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn double_tap_latency(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.latent().read()?.value())
    }

    /// Set the double-tap window (1.25 ms/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_double_tap_window(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.window().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the double-tap window
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn double_tap_window(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.window().read()?.value())
    }

    /// Set the activity threshold (62.5 mg/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_activity_threshold(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.thresh_act().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the activity threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn activity_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.thresh_act().read()?.value())
    }

    /// Set the inactivity threshold (62.5 mg/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_inactivity_threshold(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.thresh_inact().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the inactivity threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn inactivity_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.thresh_inact().read()?.value())
    }

    /// Set the inactivity time (1 s/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_inactivity_time(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.time_inact().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the inactivity time
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn inactivity_time(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.time_inact().read()?.value())
    }

    /// Set the free-fall threshold (62.5 mg/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_free_fall_threshold(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.thresh_ff().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the free-fall threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn free_fall_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.thresh_ff().read()?.value())
    }

    /// Set the free-fall duration (5 ms/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_free_fall_duration(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.device.time_ff().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Read the free-fall duration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn free_fall_duration(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.time_ff().read()?.value())
    }

    // ==================== Axis enables and sources ====================

    /// Include or exclude `axis` from activity detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_activity_axis(&mut self, axis: Axis, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(ACT_INACT_CTL, axis_bit(axis, ACT_X_BIT), enable)
    }

    /// Whether `axis` takes part in activity detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_activity_axis_enabled(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(ACT_INACT_CTL, axis_bit(axis, ACT_X_BIT))
    }

    /// Include or exclude `axis` from inactivity detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_inactivity_axis(&mut self, axis: Axis, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(ACT_INACT_CTL, axis_bit(axis, INACT_TAP_X_BIT), enable)
    }

    /// Whether `axis` takes part in inactivity detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_inactivity_axis_enabled(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(ACT_INACT_CTL, axis_bit(axis, INACT_TAP_X_BIT))
    }

    /// Include or exclude `axis` from tap detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_tap_axis(&mut self, axis: Axis, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(TAP_AXES, axis_bit(axis, INACT_TAP_X_BIT), enable)
    }

    /// Whether `axis` takes part in tap detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_tap_axis_enabled(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(TAP_AXES, axis_bit(axis, INACT_TAP_X_BIT))
    }

    /// Whether `axis` was involved in the last activity event
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_activity_source(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(ACT_TAP_STATUS, axis_bit(axis, ACT_X_BIT))
    }

    /// Whether `axis` was involved in the last tap event
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_tap_source(&mut self, axis: Axis) -> Result<bool, Error<I::Error>> {
        self.device
            .interface
            .get_bit(ACT_TAP_STATUS, axis_bit(axis, INACT_TAP_X_BIT))
    }

    /// Whether the part is asleep
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_asleep(&mut self) -> Result<bool, Error<I::Error>> {
        self.device.interface.get_bit(ACT_TAP_STATUS, ASLEEP_BIT)
    }

    // ==================== Interrupts ====================

    /// Enable or disable an interrupt function
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_interrupt(&mut self, interrupt: Interrupt, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(INT_ENABLE, interrupt.bit(), enable)
    }

    /// Whether an interrupt function is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_interrupt_enabled(&mut self, interrupt: Interrupt) -> Result<bool, Error<I::Error>> {
        self.device.interface.get_bit(INT_ENABLE, interrupt.bit())
    }

    /// Route an interrupt function to INT1 or INT2
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the bit
    /// does not read back as written.
    pub fn set_interrupt_pin(
        &mut self,
        interrupt: Interrupt,
        pin: InterruptPin,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .set_bit(INT_MAP, interrupt.bit(), pin == InterruptPin::Int2)
    }

    /// Pin an interrupt function is routed to
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn interrupt_pin(&mut self, interrupt: Interrupt) -> Result<InterruptPin, Error<I::Error>> {
        if self.device.interface.get_bit(INT_MAP, interrupt.bit())? {
            Ok(InterruptPin::Int2)
        } else {
            Ok(InterruptPin::Int1)
        }
    }

    /// Read `INT_SOURCE`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_interrupt_source(&mut self) -> Result<InterruptSource, Error<I::Error>> {
        Ok(InterruptSource(self.device.interface.read_byte(INT_SOURCE)?))
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
