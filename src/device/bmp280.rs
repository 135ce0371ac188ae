//! BMP280 barometer driver

use crate::access::RegisterAccess;
use crate::registers::bmp280::{
    Bmp280Registers as RegisterDevice, CALIB_LEN, CALIB00, CHIP_ID_VALUE, PRESS_MSB,
    SOFT_RESET_VALUE,
};
use crate::sensors::barometer::{altitude_m, raw_20bit};
use crate::sensors::{BaroCalibration, BaroConfig};
use crate::{Error, MAX_BURST_LEN, Sensor};
use device_driver::RegisterInterface;

/// Start-up time after a soft reset (ms)
const RESET_DELAY_MS: u32 = 2;

/// Driver for the BMP280 pressure and temperature sensor
///
/// Readings need the factory trimming values, which are loaded by
/// [`begin`](Self::begin).
pub struct Bmp280<I> {
    device: RegisterDevice<I>,
    calibration: Option<BaroCalibration>,
}

impl<I> Bmp280<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver without touching the bus
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            calibration: None,
        }
    }

    /// Check the chip identity, reset, load the trimming values and apply `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if the chip id is not 0x58, or an
    /// error if communication with the device fails.
    pub fn begin<D>(&mut self, config: BaroConfig, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let id = self.chip_id()?;
        if id != CHIP_ID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("BMP280: unexpected chip id {=u8:#x}", id);
            return Err(Error::InvalidDevice {
                sensor: Sensor::Barometer,
                id,
            });
        }

        self.soft_reset(delay)?;
        self.calibration = Some(self.read_calibration()?);
        self.configure(config)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("BMP280 configured: {}", config);
        Ok(())
    }

    /// Read the chip id register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.chip_id().read()?.value())
    }

    /// Trigger a power-on reset and wait for start-up
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn soft_reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.device
            .soft_reset()
            .write(|w| w.set_value(SOFT_RESET_VALUE))?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    /// Write the filter/standby configuration, then oversampling and mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: BaroConfig) -> Result<(), Error<I::Error>> {
        // CONFIG writes may be ignored in normal mode, so it goes first
        self.device.filter_config().write(|w| {
            w.set_t_sb(config.standby as u8);
            w.set_filter(config.filter as u8);
        })?;
        self.device.ctrl_meas().write(|w| {
            w.set_osrs_t(config.temperature_oversampling as u8);
            w.set_osrs_p(config.pressure_oversampling as u8);
            w.set_mode(config.mode as u8);
        })?;
        Ok(())
    }

    /// Whether a conversion is running
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_measuring(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.status().read()?.measuring())
    }

    /// Trimming values loaded by `begin`
    #[must_use]
    pub const fn calibration(&self) -> Option<&BaroCalibration> {
        self.calibration.as_ref()
    }

    fn read_calibration(&mut self) -> Result<BaroCalibration, Error<I::Error>> {
        let mut bytes = [0u8; CALIB_LEN];
        let mut register = CALIB00;
        for chunk in bytes.chunks_mut(MAX_BURST_LEN) {
            let read = self.device.interface.read_bytes(register, chunk)?;
            // Chunks never exceed MAX_BURST_LEN
            #[allow(clippy::cast_possible_truncation)]
            {
                register = register.wrapping_add(read as u8);
            }
        }
        Ok(BaroCalibration::from_bytes(&bytes))
    }

    /// Read raw `(pressure, temperature)` ADC values
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<(i32, i32), Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device.interface.read_bytes(PRESS_MSB, &mut buffer)?;
        Ok((
            raw_20bit(buffer[0], buffer[1], buffer[2]),
            raw_20bit(buffer[3], buffer[4], buffer[5]),
        ))
    }

    /// Read the temperature in °C
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `begin` has not loaded the
    /// trimming values, or an error if communication with the device fails.
    pub fn read_temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        let Some(calibration) = self.calibration else {
            return Err(Error::InvalidConfig);
        };
        let (_, adc_t) = self.read_raw()?;
        let (_, centi) = calibration.compensate_temperature(adc_t);
        // |centi| is a few thousand
        #[allow(clippy::cast_precision_loss)]
        Ok(centi as f32 / 100.0)
    }

    /// Read the pressure in Pa
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `begin` has not loaded the
    /// trimming values or they are unusable, or an error if communication
    /// with the device fails.
    pub fn read_pressure_pa(&mut self) -> Result<f32, Error<I::Error>> {
        let Some(calibration) = self.calibration else {
            return Err(Error::InvalidConfig);
        };
        let (adc_p, adc_t) = self.read_raw()?;
        let (t_fine, _) = calibration.compensate_temperature(adc_t);
        let Some(q24_8) = calibration.compensate_pressure(adc_p, t_fine) else {
            return Err(Error::InvalidConfig);
        };
        #[allow(clippy::cast_precision_loss)]
        Ok(q24_8 as f32 / 256.0)
    }

    /// Read the altitude in metres relative to `sea_level_pa`
    ///
    /// Use [`SEA_LEVEL_PA`](crate::sensors::barometer::SEA_LEVEL_PA) for the
    /// standard atmosphere.
    ///
    /// # Errors
    ///
    /// Same as [`read_pressure_pa`](Self::read_pressure_pa).
    pub fn read_altitude_m(&mut self, sea_level_pa: f32) -> Result<f32, Error<I::Error>> {
        Ok(altitude_m(self.read_pressure_pa()?, sea_level_pa))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}
