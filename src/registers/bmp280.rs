//! BMP280 register map

/// First trimming register (`dig_T1` LSB)
pub const CALIB00: u8 = 0x88;

/// Length of the trimming block
pub const CALIB_LEN: usize = 24;

/// Expected value of the `id` register
pub const CHIP_ID_VALUE: u8 = 0x58;

/// Value written to `reset` to trigger a power-on reset
pub const SOFT_RESET_VALUE: u8 = 0xB6;

/// `press_msb` - first of six big-endian data registers (pressure, then temperature)
pub const PRESS_MSB: u8 = 0xF7;

device_driver::create_device!(
    device_name: Bmp280Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// id - Chip identification (0xD0)
        /// Expected value: 0x58
        register ChipId {
            const ADDRESS = 0xD0;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// reset - Soft reset (0xE0)
        register SoftReset {
            const ADDRESS = 0xE0;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// status - Device status (0xF3)
        register Status {
            const ADDRESS = 0xF3;
            const SIZE_BITS = 8;

            /// NVM data being copied to image registers
            im_update: bool = 0,
            reserved_2_1: uint = 1..3,
            /// Conversion running
            measuring: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// ctrl_meas - Data acquisition options (0xF4)
        register CtrlMeas {
            const ADDRESS = 0xF4;
            const SIZE_BITS = 8;

            /// Power mode
            mode: uint = 0..2,
            /// Pressure oversampling
            osrs_p: uint = 2..5,
            /// Temperature oversampling
            osrs_t: uint = 5..8,
        },

        /// config - Rate, filter and interface options (0xF5)
        register FilterConfig {
            const ADDRESS = 0xF5;
            const SIZE_BITS = 8;

            /// 3-wire SPI
            spi_3_w_en: bool = 0,
            reserved_1: uint = 1..2,
            /// IIR filter time constant
            filter: uint = 2..5,
            /// Standby time in normal mode
            t_sb: uint = 5..8,
        },
    }
);
