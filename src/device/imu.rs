//! Combined 10-DOF IMU
//!
//! Owns the four sensor drivers. They usually share one I2C bus, so all four
//! interfaces must report the same bus error type.

use super::{Adxl345, Bmp280, Itg3200, Qmc5883};
use crate::orientation::OrientationAngles;
use crate::sensors::{AccelConfig, AccelDataG, BaroConfig, GyroConfig, GyroDataDps, MagConfig};
use crate::Error;
use device_driver::RegisterInterface;

/// Configuration applied by [`TenDofImu::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuConfig {
    /// Accelerometer configuration
    pub accel: AccelConfig,
    /// Gyroscope configuration
    pub gyro: GyroConfig,
    /// Magnetometer configuration
    pub mag: MagConfig,
    /// Barometer configuration
    pub baro: BaroConfig,
}

/// One combined motion reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// Acceleration in g
    pub accel: AccelDataG,
    /// Calibrated angular velocity in °/s
    pub gyro: GyroDataDps,
    /// Roll and pitch from `accel`, heading from the magnetometer
    pub orientation: OrientationAngles,
}

/// Accelerometer, gyroscope, magnetometer and barometer on one board
pub struct TenDofImu<A, G, M, B> {
    accel: Adxl345<A>,
    gyro: Itg3200<G>,
    mag: Qmc5883<M>,
    baro: Bmp280<B>,
    config: ImuConfig,
}

impl<A, G, M, B, E> TenDofImu<A, G, M, B>
where
    A: RegisterInterface<AddressType = u8, Error = E>,
    G: RegisterInterface<AddressType = u8, Error = E>,
    M: RegisterInterface<AddressType = u8, Error = E>,
    B: RegisterInterface<AddressType = u8, Error = E>,
{
    /// Create the IMU from its four interfaces without touching the bus
    pub fn new(accel: A, gyro: G, mag: M, baro: B, config: ImuConfig) -> Self {
        Self {
            accel: Adxl345::new(accel),
            gyro: Itg3200::new(gyro),
            mag: Qmc5883::new(mag),
            baro: Bmp280::new(baro),
            config,
        }
    }

    /// Initialise all four sensors and start the accelerometer
    ///
    /// Sensors are brought up in the order accelerometer, gyroscope,
    /// magnetometer, barometer; the first failure is returned and the
    /// remaining sensors are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] naming the first sensor that failed
    /// its identity check, or an error if communication fails.
    pub fn begin<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.accel.begin()?;
        self.gyro.begin(self.config.gyro, delay)?;
        self.mag.begin(self.config.mag, delay)?;
        self.baro.begin(self.config.baro, delay)?;
        self.accel.power_on()?;
        self.accel.configure(self.config.accel)?;

        #[cfg(feature = "defmt")]
        defmt::info!("10-DOF IMU ready");
        Ok(())
    }

    /// Configuration applied by `begin`
    #[must_use]
    pub const fn config(&self) -> &ImuConfig {
        &self.config
    }

    /// Roll and pitch from the accelerometer, heading from the magnetometer
    ///
    /// # Errors
    ///
    /// Returns an error if communication with either sensor fails.
    pub fn orientation(&mut self) -> Result<OrientationAngles, Error<E>> {
        let heading = self.mag.read_heading_degrees()?;
        let tilt = self.accel.read_tilt()?;
        Ok(tilt.with_heading(heading))
    }

    /// Read acceleration, angular velocity and orientation
    ///
    /// Roll and pitch come from the same accelerometer sample as `accel`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with any motion sensor fails.
    pub fn read_sample(&mut self) -> Result<ImuSample, Error<E>> {
        let raw = self.accel.read_raw()?;
        let accel = AccelDataG::from_raw(raw, self.accel.config().scale());
        let gyro = self.gyro.read_dps()?;
        let heading = self.mag.read_heading_degrees()?;
        let orientation = crate::orientation::Tilt::from_raw(raw).with_heading(heading);

        Ok(ImuSample {
            accel,
            gyro,
            orientation,
        })
    }

    /// Accelerometer driver
    pub const fn accel(&mut self) -> &mut Adxl345<A> {
        &mut self.accel
    }

    /// Gyroscope driver
    pub const fn gyro(&mut self) -> &mut Itg3200<G> {
        &mut self.gyro
    }

    /// Magnetometer driver
    pub const fn mag(&mut self) -> &mut Qmc5883<M> {
        &mut self.mag
    }

    /// Barometer driver
    pub const fn baro(&mut self) -> &mut Bmp280<B> {
        &mut self.baro
    }

    /// Consume the IMU and return the four interfaces
    pub fn release(self) -> (A, G, M, B) {
        (
            self.accel.release(),
            self.gyro.release(),
            self.mag.release(),
            self.baro.release(),
        )
    }
}
