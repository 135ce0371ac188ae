//! QMC5883L register map
//!
//! The VCM5883L variant shares the data registers at 0x00..0x06 but has two
//! plain control registers where the QMC5883L has its reset and SET/RESET
//! period registers, so those are addressed through the `VCM_*` constants.

/// `DATA_OUT_X_LSB` - first of six little-endian data registers
pub const DATA_OUT_X_LSB: u8 = 0x00;

/// Recommended `SET/RESET` period value
pub const SET_RESET_PERIOD_VALUE: u8 = 0x01;

/// Expected value of the chip identification register
pub const CHIP_ID_VALUE: u8 = 0xFF;

/// VCM5883L control register 1
pub const VCM_CONTROL_1: u8 = 0x0B;

/// VCM5883L control register 1 value
pub const VCM_CONTROL_1_VALUE: u8 = 0x00;

/// VCM5883L control register 2
pub const VCM_CONTROL_2: u8 = 0x0A;

/// VCM5883L control register 2 value: continuous measurement
pub const VCM_CONTROL_2_VALUE: u8 = 0x4D;

device_driver::create_device!(
    device_name: Qmc5883Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// Status register (0x06)
        register Status {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// New data is ready
            drdy: bool = 0,
            /// A data register overflowed
            ovl: bool = 1,
            /// Data was skipped because it was not read in time
            dor: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// Control register 1 (0x09)
        register ModeControl {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Operating mode (0 = standby, 1 = continuous)
            mode: uint = 0..2,
            /// Output data rate
            odr: uint = 2..4,
            /// Full scale range
            range: uint = 4..6,
            /// Over sample ratio
            osr: uint = 6..8,
        },

        /// Control register 2 (0x0A)
        register ResetControl {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;

            /// Disable the DRDY interrupt pin
            int_disable: bool = 0,
            reserved_5_1: uint = 1..6,
            /// Roll the read pointer over all data registers
            rol_pnt: bool = 6,
            /// Soft reset
            soft_rst: bool = 7,
        },

        /// SET/RESET period register (0x0B)
        register SetResetPeriod {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// Chip ID register (0x0D)
        register ChipId {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },
    }
);
