//! Sensor drivers
//!
//! One driver per chip, each generic over a [`device_driver::RegisterInterface`]
//! with 8-bit addresses, plus [`TenDofImu`] which owns all four.
//!
//! Drivers do no bus traffic on construction. Call `begin` to check the chip
//! identity and apply a configuration.

mod adxl345;
mod bmp280;
mod imu;
mod itg3200;
mod qmc5883;

pub use adxl345::Adxl345;
pub use bmp280::Bmp280;
pub use imu::{ImuConfig, ImuSample, TenDofImu};
pub use itg3200::Itg3200;
pub use qmc5883::Qmc5883;

use crate::sensors::Axis;

/// Bit for `axis` in a register that stores X, Y, Z in descending bits
/// starting at `x_bit`
// Axis is 0..=2 and every x_bit used is >= 2
#[allow(clippy::cast_possible_truncation)]
const fn axis_bit(axis: Axis, x_bit: u8) -> u8 {
    x_bit - axis.index() as u8
}
