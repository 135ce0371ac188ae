//! QMC5883L / VCM5883L magnetometer driver

use crate::access::RegisterAccess;
use crate::registers::qmc5883::{
    CHIP_ID_VALUE, DATA_OUT_X_LSB, Qmc5883Registers as RegisterDevice, SET_RESET_PERIOD_VALUE,
    VCM_CONTROL_1, VCM_CONTROL_1_VALUE, VCM_CONTROL_2, VCM_CONTROL_2_VALUE,
};
use crate::sensors::magnetometer::heading_degrees;
use crate::sensors::{MagChip, MagConfig, MagDataGauss, MagRange};
use crate::{Error, RawSample, Sensor};
use device_driver::RegisterInterface;

/// Power-on reset time after a soft reset
const RESET_DELAY_MS: u32 = 1;

/// Driver for the QMC5883L 3-axis magnetometer and its VCM5883L variant
///
/// The chip is selected by [`MagConfig::chip`]. Status flags and soft reset
/// exist on the QMC5883L only.
pub struct Qmc5883<I> {
    device: RegisterDevice<I>,
    config: MagConfig,
}

impl<I> Qmc5883<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver without touching the bus
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            config: MagConfig::default(),
        }
    }

    /// Check the chip identity, reset, and apply `config`
    ///
    /// The QMC5883L is identified by its chip id register. The VCM5883L has
    /// none, so its control registers are written and read back instead; the
    /// value read back is reported as the id on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if the identity check fails, or an
    /// error if communication with the device fails.
    pub fn begin<D>(&mut self, config: MagConfig, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        match config.chip {
            MagChip::Qmc5883l => {
                let id = self.chip_id()?;
                if id != CHIP_ID_VALUE {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("QMC5883L: unexpected chip id {=u8:#x}", id);
                    return Err(Error::InvalidDevice {
                        sensor: Sensor::Magnetometer,
                        id,
                    });
                }

                // soft_reset checks the stored chip
                self.config.chip = config.chip;
                self.soft_reset()?;
                delay.delay_ms(RESET_DELAY_MS);
                self.device
                    .set_reset_period()
                    .write(|w| w.set_value(SET_RESET_PERIOD_VALUE))?;
                self.configure(config)?;
            }
            MagChip::Vcm5883l => {
                self.configure(config)?;
                let id = self.device.interface.read_byte(VCM_CONTROL_2)?;
                if id != VCM_CONTROL_2_VALUE {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("VCM5883L: control read back {=u8:#x}", id);
                    return Err(Error::InvalidDevice {
                        sensor: Sensor::Magnetometer,
                        id,
                    });
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer configured: {}", config);
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

    /// Restore all registers to their defaults
    ///
    /// The chip needs about 350 µs before it accepts new settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on the VCM5883L, or an error if
    /// communication with the device fails.
    pub fn soft_reset(&mut self) -> Result<(), Error<I::Error>> {
        self.require_qmc5883l()?;
        self.device.reset_control().write(|w| w.set_soft_rst(true))?;
        Ok(())
    }

    /// Apply the chip settings in `config` and store the declination
    ///
    /// On the QMC5883L this writes mode, data rate, range and oversampling.
    /// The VCM5883L only has a fixed continuous-measurement setup.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: MagConfig) -> Result<(), Error<I::Error>> {
        match config.chip {
            MagChip::Qmc5883l => {
                self.device.mode_control().write(|w| {
                    w.set_mode(config.mode as u8);
                    w.set_odr(config.odr as u8);
                    w.set_range(config.range as u8);
                    w.set_osr(config.oversampling as u8);
                })?;
            }
            MagChip::Vcm5883l => {
                let interface = &mut self.device.interface;
                interface.write_byte(VCM_CONTROL_1, VCM_CONTROL_1_VALUE)?;
                interface.write_byte(VCM_CONTROL_2, VCM_CONTROL_2_VALUE)?;
            }
        }
        self.config = config;
        Ok(())
    }

    /// Range used to scale readings
    #[must_use]
    pub const fn range(&self) -> MagRange {
        match self.config.chip {
            MagChip::Qmc5883l => self.config.range,
            MagChip::Vcm5883l => MagRange::Gauss8,
        }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &MagConfig {
        &self.config
    }

    /// Set the magnetic declination added to headings, in degrees
    pub const fn set_declination_degrees(&mut self, declination: f32) {
        self.config.declination_deg = declination;
    }

    /// Magnetic declination added to headings, in degrees
    #[must_use]
    pub const fn declination_degrees(&self) -> f32 {
        self.config.declination_deg
    }

    /// Whether a new sample is ready
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on the VCM5883L, or an error if
    /// communication with the device fails.
    pub fn is_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        self.require_qmc5883l()?;
        Ok(self.device.status().read()?.drdy())
    }

    /// Whether any axis exceeded the selected range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on the VCM5883L, or an error if
    /// communication with the device fails.
    pub fn is_overflow(&mut self) -> Result<bool, Error<I::Error>> {
        self.require_qmc5883l()?;
        Ok(self.device.status().read()?.ovl())
    }

    /// Whether a sample was skipped because it was not read in time
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on the VCM5883L, or an error if
    /// communication with the device fails.
    pub fn is_data_skipped(&mut self) -> Result<bool, Error<I::Error>> {
        self.require_qmc5883l()?;
        Ok(self.device.status().read()?.dor())
    }

    /// Read one raw sample (little-endian X, Y, Z)
    ///
    /// VCM5883L axes are negated so both chips report the same frame.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device.interface.read_bytes(DATA_OUT_X_LSB, &mut buffer)?;
        let raw = RawSample::from_le_bytes(buffer);

        Ok(match self.config.chip {
            MagChip::Qmc5883l => raw,
            MagChip::Vcm5883l => RawSample::new(
                raw.x.saturating_neg(),
                raw.y.saturating_neg(),
                raw.z.saturating_neg(),
            ),
        })
    }

    /// Read the field in gauss
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gauss(&mut self) -> Result<MagDataGauss, Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(MagDataGauss::from_raw(raw, self.range()))
    }

    /// Read the compass heading in degrees, declination applied, in `[0, 360)`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_heading_degrees(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_raw()?;
        Ok(heading_degrees(
            f32::from(raw.x),
            f32::from(raw.y),
            self.config.declination_deg,
        ))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn require_qmc5883l(&self) -> Result<(), Error<I::Error>> {
        match self.config.chip {
            MagChip::Qmc5883l => Ok(()),
            MagChip::Vcm5883l => Err(Error::InvalidConfig),
        }
    }
}
