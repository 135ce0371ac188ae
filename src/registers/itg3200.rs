//! ITG3200 register map
//!
//! All multi-byte output registers are big-endian (high byte first).

/// `WHO_AM_I` register address
pub const WHO_AM_I: u8 = 0x00;

/// Bits of `WHO_AM_I` that hold the I2C address
pub const WHO_AM_I_MASK: u8 = 0x7E;

/// Expected value of `WHO_AM_I & WHO_AM_I_MASK`
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// `DLPF_FS` - full scale and low-pass filter
pub const DLPF_FS: u8 = 0x16;

/// `DLPF_FS` full scale field
pub const FS_SEL_MASK: u8 = 0x18;

/// `TEMP_OUT_H` - first of two big-endian temperature registers
pub const TEMP_OUT_H: u8 = 0x1B;

/// `GYRO_XOUT_H` - first of six big-endian data registers
pub const GYRO_XOUT_H: u8 = 0x1D;

/// `PWR_MGM` - power management
pub const PWR_MGM: u8 = 0x3E;

/// `PWR_MGM` standby bit for the X axis (Y and Z follow at 4 and 3)
pub const STBY_XG_BIT: u8 = 5;

device_driver::create_device!(
    device_name: Itg3200Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// WHO_AM_I - I2C address of the device (0x00)
        register WhoAmI {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Bits 6:1 of the I2C address
            id: uint = 1..7,
            reserved_7: uint = 7..8,
        },

        /// SMPLRT_DIV - Sample rate divider (0x15)
        /// Fsample = Finternal / (divider + 1)
        register SmplrtDiv {
            const ADDRESS = 0x15;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// DLPF_FS - Full scale range and digital low pass filter (0x16)
        register DlpfFs {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;

            /// Low pass filter bandwidth and internal sample rate
            dlpf_cfg: uint = 0..3,
            /// Full scale selection (only 3 = ±2000 °/s is valid)
            fs_sel: uint = 3..5,
            reserved_7_5: uint = 5..8,
        },

        /// INT_CFG - Interrupt configuration (0x17)
        register IntCfg {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;

            /// Interrupt when new raw data is available
            raw_rdy_en: bool = 0,
            reserved_1: uint = 1..2,
            /// Interrupt when the PLL is ready
            itg_rdy_en: bool = 2,
            reserved_3: uint = 3..4,
            /// Clear latch on any register read (status read only when clear)
            int_anyrd_2_clear: bool = 4,
            /// Latch interrupt until cleared
            latch_int_en: bool = 5,
            /// Open drain output
            open: bool = 6,
            /// Active low output
            actl: bool = 7,
        },

        /// INT_STATUS - Interrupt status (0x1A)
        register IntStatus {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Raw data ready
            raw_data_rdy: bool = 0,
            reserved_1: uint = 1..2,
            /// PLL ready
            itg_rdy: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// PWR_MGM - Power management (0x3E)
        register PwrMgm {
            const ADDRESS = 0x3E;
            const SIZE_BITS = 8;

            /// Clock source
            clk_sel: uint = 0..3,
            /// Z gyro standby
            stby_zg: bool = 3,
            /// Y gyro standby
            stby_yg: bool = 4,
            /// X gyro standby
            stby_xg: bool = 5,
            /// Low power sleep mode
            sleep: bool = 6,
            /// Reset device and internal registers to power-up defaults
            h_reset: bool = 7,
        },
    }
);
