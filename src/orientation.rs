//! Static tilt from a single acceleration vector
//!
//! ```text
//! roll  = atan2(ay, az)
//! pitch = atan2(-ax, sqrt(ay² + az²))
//! ```
//!
//! Valid only while the board is not accelerating; there is no temporal
//! filtering. Heading comes from the magnetometer and is attached with
//! [`Tilt::with_heading`].

use crate::RawSample;

/// Roll and pitch in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    /// Rotation about X, in (-180, 180]
    pub roll: f32,
    /// Rotation about Y, in [-90, 90]
    pub pitch: f32,
}

impl Tilt {
    /// Tilt from integer accelerometer counts
    ///
    /// The scale cancels out, so counts can be used directly.
    #[must_use]
    pub fn from_raw(raw: RawSample) -> Self {
        tilt_from_accel(f32::from(raw.x), f32::from(raw.y), f32::from(raw.z))
    }

    /// Attach a compass heading
    #[must_use]
    pub const fn with_heading(self, heading: f32) -> OrientationAngles {
        OrientationAngles {
            roll: self.roll,
            pitch: self.pitch,
            heading,
        }
    }
}

/// Roll, pitch and heading in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationAngles {
    /// Rotation about X, in (-180, 180]
    pub roll: f32,
    /// Rotation about Y, in [-90, 90]
    pub pitch: f32,
    /// Compass heading, in [0, 360)
    pub heading: f32,
}

/// Roll and pitch in degrees from an acceleration vector in any unit
///
/// A zero denominator pair maps to 0: `(ay, az) == (0, 0)` gives roll 0 and
/// the zero vector gives pitch 0.
#[must_use]
pub fn tilt_from_accel(ax: f32, ay: f32, az: f32) -> Tilt {
    let roll = atan2_degrees(ay, az);
    let pitch = atan2_degrees(-ax, libm::hypotf(ay, az));

    Tilt {
        roll: normalize_roll(roll),
        pitch: pitch.clamp(-90.0, 90.0),
    }
}

fn atan2_degrees(y: f32, x: f32) -> f32 {
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    let degrees = libm::atan2f(y, x).to_degrees();
    // -0.0 would print as "-0.000"
    if degrees == 0.0 { 0.0 } else { degrees }
}

// atan2 lands on -180 for y == -0.0, and rounding can push either end past 180
fn normalize_roll(roll: f32) -> f32 {
    if roll <= -180.0 || roll > 180.0 { 180.0 } else { roll }
}
