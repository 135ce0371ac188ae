//! CSV rows streamed over the serial link
//!
//! ```text
//! timestamp,ax,ay,az,gx,gy,gz,roll,pitch,heading,button,heartRaw
//! 123456,0.012,-0.004,0.998,0.35,-1.20,0.07,-0.230,-0.689,271.402,,
//! 123500,,,,,,,,,,1,2048
//! ```
//!
//! Acceleration and angles use three decimals, angular velocity two. Parts of
//! a record that were not sampled are written as empty columns.

use core::fmt::{self, Write};

use crate::device::ImuSample;

/// Column header, without line terminator
pub const CSV_HEADER: &str = "timestamp,ax,ay,az,gx,gy,gz,roll,pitch,heading,button,heartRaw";

/// Line terminator used by the logger
pub const LINE_END: &str = "\r\n";

/// Capacity of a line produced by [`CsvRecord::to_line`]
pub const LINE_CAPACITY: usize = 128;

/// Columns covered by [`ImuSample`]
const IMU_COLUMNS: usize = 9;

/// One CSV row
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CsvRecord {
    /// Microsecond timestamp
    pub timestamp_us: u32,
    /// Motion columns
    pub imu: Option<ImuSample>,
    /// Debounced button state
    pub button: Option<bool>,
    /// Raw heart/ECG ADC reading
    pub heart_raw: Option<u16>,
}

impl CsvRecord {
    /// Row carrying only motion columns
    #[must_use]
    pub const fn imu(timestamp_us: u32, sample: ImuSample) -> Self {
        Self {
            timestamp_us,
            imu: Some(sample),
            button: None,
            heart_raw: None,
        }
    }

    /// Row carrying only the button and heart columns
    #[must_use]
    pub const fn ecg(timestamp_us: u32, button: bool, heart_raw: u16) -> Self {
        Self {
            timestamp_us,
            imu: None,
            button: Some(button),
            heart_raw: Some(heart_raw),
        }
    }

    /// Write [`CSV_HEADER`] followed by [`LINE_END`]
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the output.
    pub fn write_header<W: Write>(out: &mut W) -> fmt::Result {
        out.write_str(CSV_HEADER)?;
        out.write_str(LINE_END)
    }

    /// Write the row without line terminator
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the output.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.timestamp_us)?;

        match &self.imu {
            Some(sample) => {
                let accel = sample.accel;
                let gyro = sample.gyro;
                let angles = sample.orientation;
                write!(out, ",{:.3},{:.3},{:.3}", accel.x, accel.y, accel.z)?;
                write!(out, ",{:.2},{:.2},{:.2}", gyro.x, gyro.y, gyro.z)?;
                write!(
                    out,
                    ",{:.3},{:.3},{:.3}",
                    angles.roll, angles.pitch, angles.heading
                )?;
            }
            None => {
                for _ in 0..IMU_COLUMNS {
                    out.write_char(',')?;
                }
            }
        }

        out.write_char(',')?;
        if let Some(pressed) = self.button {
            out.write_char(if pressed { '1' } else { '0' })?;
        }

        out.write_char(',')?;
        if let Some(raw) = self.heart_raw {
            write!(out, "{raw}")?;
        }
        Ok(())
    }

    /// Format the row into a fixed-capacity string
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not fit in [`LINE_CAPACITY`] bytes.
    pub fn to_line(&self) -> Result<heapless::String<LINE_CAPACITY>, fmt::Error> {
        let mut line = heapless::String::new();
        self.write_csv(&mut line)?;
        Ok(line)
    }
}

impl fmt::Display for CsvRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_csv(f)
    }
}
