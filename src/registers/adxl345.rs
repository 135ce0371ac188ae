//! ADXL345 register map
//!
//! Reference: ADXL345 datasheet, Rev. G, Table 19 (Register Map).

/// Expected value of the `DEVID` register
pub const DEVID_VALUE: u8 = 0xE5;

/// `ACT_INACT_CTL` - activity/inactivity axis enables
pub const ACT_INACT_CTL: u8 = 0x27;

/// `TAP_AXES` - tap axis enables
pub const TAP_AXES: u8 = 0x2A;

/// `ACT_TAP_STATUS` - source of the last activity/tap event
pub const ACT_TAP_STATUS: u8 = 0x2B;

/// `BW_RATE` - data rate and power mode control
pub const BW_RATE: u8 = 0x2C;

/// `BW_RATE` rate code field
pub const RATE_MASK: u8 = 0x0F;

/// `INT_ENABLE` - interrupt enable control
pub const INT_ENABLE: u8 = 0x2E;

/// `INT_MAP` - interrupt pin mapping (bit set = INT2)
pub const INT_MAP: u8 = 0x2F;

/// `INT_SOURCE` - interrupt source (clears on read of data/status)
pub const INT_SOURCE: u8 = 0x30;

/// `DATAX0` - first of six little-endian data registers
pub const DATAX0: u8 = 0x32;

/// `ACT_TAP_STATUS` bit reporting the part is asleep
pub const ASLEEP_BIT: u8 = 3;

device_driver::create_device!(
    device_name: Adxl345Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// DEVID - Device ID (0x00)
        /// Expected value: 0xE5
        register DevId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Fixed device ID
            devid: uint = 0..8,
        },

        /// THRESH_TAP - Tap threshold, 62.5 mg/LSB (0x1D)
        register ThreshTap {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// DUR - Tap duration, 625 µs/LSB (0x21)
        register Dur {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// LATENT - Tap latency, 1.25 ms/LSB (0x22)
        register Latent {
            const ADDRESS = 0x22;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// WINDOW - Tap window, 1.25 ms/LSB (0x23)
        register Window {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// THRESH_ACT - Activity threshold, 62.5 mg/LSB (0x24)
        register ThreshAct {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// THRESH_INACT - Inactivity threshold, 62.5 mg/LSB (0x25)
        register ThreshInact {
            const ADDRESS = 0x25;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// TIME_INACT - Inactivity time, 1 s/LSB (0x26)
        register TimeInact {
            const ADDRESS = 0x26;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// THRESH_FF - Free-fall threshold, 62.5 mg/LSB (0x28)
        register ThreshFf {
            const ADDRESS = 0x28;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// TIME_FF - Free-fall time, 5 ms/LSB (0x29)
        register TimeFf {
            const ADDRESS = 0x29;
            const SIZE_BITS = 8;

            value: uint = 0..8,
        },

        /// BW_RATE - Data rate and power mode control (0x2C)
        register BwRate {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 8;

            /// Output data rate code (0x6 = 6.25 Hz ... 0xF = 3200 Hz)
            rate: uint = 0..4,
            /// Reduced power operation
            low_power: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// POWER_CTL - Power-saving features control (0x2D)
        register PowerCtl {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 8;

            /// Sampling frequency during sleep
            wakeup: uint = 0..2,
            /// Sleep mode
            sleep: bool = 2,
            /// Measurement mode (standby when clear)
            measure: bool = 3,
            /// Auto-sleep on inactivity
            auto_sleep: bool = 4,
            /// Link activity and inactivity detection
            link: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// DATA_FORMAT - Data format control (0x31)
        register DataFormat {
            const ADDRESS = 0x31;
            const SIZE_BITS = 8;

            /// g range (0 = ±2g, 1 = ±4g, 2 = ±8g, 3 = ±16g)
            range: uint = 0..2,
            /// Left-justified (MSB) mode
            justify: bool = 2,
            /// Full resolution (4 mg/LSB at every range)
            full_res: bool = 3,
            reserved_4: uint = 4..5,
            /// Interrupts active low
            int_invert: bool = 5,
            /// 3-wire SPI mode
            spi: bool = 6,
            /// Self-test force
            self_test: bool = 7,
        },
    }
);
