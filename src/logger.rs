//! Polling data logger
//!
//! Interleaves two streams into one CSV output:
//! - heart/ECG rows (button and raw heart reading) at a fixed rate, and
//! - IMU rows (acceleration, angular velocity, orientation) at a lower rate.
//!
//! The caller owns the clock, the button pin and the ADC; [`DataLogger::poll`]
//! is called from the main loop with the current time and the latest raw
//! inputs.

use core::fmt::Write;

use crate::device::TenDofImu;
use crate::record::{CsvRecord, LINE_END};
use crate::schedule::{Cadence, CadenceMode, Debouncer};
use crate::Error;
use device_driver::RegisterInterface;

/// Logger rates and debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoggerConfig {
    /// Heart/ECG row rate in Hz (fixed rate)
    pub ecg_rate_hz: u32,
    /// IMU row rate in Hz (minimum interval)
    pub imu_rate_hz: u32,
    /// Button debounce window in milliseconds
    pub debounce_ms: u32,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            ecg_rate_hz: 500,
            imu_rate_hz: 50,
            debounce_ms: 50,
        }
    }
}

/// Data logger owning the IMU and the sampling state
pub struct DataLogger<A, G, M, B> {
    imu: TenDofImu<A, G, M, B>,
    ecg: Cadence,
    motion: Cadence,
    button: Debouncer,
}

impl<A, G, M, B, E> DataLogger<A, G, M, B>
where
    A: RegisterInterface<AddressType = u8, Error = E>,
    G: RegisterInterface<AddressType = u8, Error = E>,
    M: RegisterInterface<AddressType = u8, Error = E>,
    B: RegisterInterface<AddressType = u8, Error = E>,
{
    /// Create a logger around an IMU
    ///
    /// The IMU should already be initialised with `begin`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either rate is zero.
    pub fn new(imu: TenDofImu<A, G, M, B>, config: LoggerConfig) -> Result<Self, Error<E>> {
        let (Some(ecg), Some(motion)) = (
            Cadence::from_hz(config.ecg_rate_hz, CadenceMode::FixedRate),
            Cadence::from_hz(config.imu_rate_hz, CadenceMode::MinInterval),
        ) else {
            return Err(Error::InvalidConfig);
        };

        Ok(Self {
            imu,
            ecg,
            motion,
            button: Debouncer::from_ms(config.debounce_ms, false),
        })
    }

    /// Restart both cadences from `now_us`
    pub const fn start(&mut self, now_us: u32) {
        self.ecg.reset(now_us);
        self.motion.reset(now_us);
    }

    /// Run one iteration of the sampling loop
    ///
    /// `button_pressed` is the raw button level and is debounced on every
    /// call. `heart` is only called when a heart row is due. Returns the
    /// number of rows written (0, 1 or 2).
    ///
    /// # Errors
    ///
    /// Returns an error if reading the IMU fails, or [`Error::Output`] if
    /// the sink rejects the output. A heart row written before an IMU
    /// failure stays written.
    pub fn poll<W, H>(
        &mut self,
        now_us: u32,
        button_pressed: bool,
        heart: H,
        sink: &mut W,
    ) -> Result<usize, Error<E>>
    where
        W: Write,
        H: FnOnce() -> u16,
    {
        let button = self.button.update(button_pressed, now_us);
        let mut rows = 0;

        if self.ecg.poll(now_us) {
            write_row::<W, E>(&CsvRecord::ecg(now_us, button, heart()), sink)?;
            rows += 1;
        }

        if self.motion.poll(now_us) {
            let sample = self.imu.read_sample()?;
            write_row::<W, E>(&CsvRecord::imu(now_us, sample), sink)?;
            rows += 1;
        }

        Ok(rows)
    }

    /// Debounced button state
    #[must_use]
    pub const fn button(&self) -> bool {
        self.button.state()
    }

    /// The IMU
    pub const fn imu(&mut self) -> &mut TenDofImu<A, G, M, B> {
        &mut self.imu
    }

    /// Consume the logger and return the IMU
    pub fn release(self) -> TenDofImu<A, G, M, B> {
        self.imu
    }
}

fn write_row<W: Write, E>(record: &CsvRecord, sink: &mut W) -> Result<(), Error<E>> {
    record
        .write_csv(sink)
        .and_then(|()| sink.write_str(LINE_END))
        .map_err(|_| Error::Output)
}
