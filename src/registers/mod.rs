//! Register maps for the sensors on the 10-DOF board
//!
//! Each submodule holds the `device-driver` register map of one chip plus the
//! raw addresses used for burst reads and bit-indexed access.
//!
//! Byte order differs between chips: the ADXL345, QMC5883L and BMP280
//! trimming values are little-endian, the ITG3200 and BMP280 measurement
//! registers are big-endian.

pub mod adxl345;
pub mod bmp280;
pub mod itg3200;
pub mod qmc5883;
