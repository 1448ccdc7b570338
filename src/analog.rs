//! Analog joystick → HID motion mapping.
//!
//! The ADC gives each axis as an unsigned reading in `0..=range_max`
//! with the rest position near the middle.  Everything here is pure
//! integer arithmetic; no filtering or calibration is attempted.

use crate::config::ADC_MAX;

/// One raw reading of both joystick axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub x: u16,
    pub y: u16,
}

impl AxisSample {
    /// Both axes at rest.
    pub const fn centered() -> Self {
        Self {
            x: ADC_MAX / 2,
            y: ADC_MAX / 2,
        }
    }
}

/// Signed cursor step derived from an [`AxisSample`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Displacement {
    pub dx: i8,
    pub dy: i8,
}

impl Displacement {
    /// Map both axes with the same full-scale reading and speed.
    pub fn from_sample(sample: AxisSample, range_max: u16, scale: u16) -> Self {
        Self {
            dx: map_axis(sample.x, range_max, scale),
            dy: map_axis(sample.y, range_max, scale),
        }
    }
}

/// Map a raw axis reading to a step proportional to its deviation
/// from centre.
///
/// Computes `(raw - range_max/2) * scale / (range_max/2)`, truncating
/// toward zero: 0 at centre, ±`scale` at the extremes.  The result is
/// clamped to ±127, the logical range HID relative axes declare.
pub fn map_axis(raw: u16, range_max: u16, scale: u16) -> i8 {
    let center = i32::from(range_max / 2);
    if center == 0 {
        return 0;
    }
    let mapped = (i32::from(raw) - center) * i32::from(scale) / center;
    mapped.clamp(-i32::from(i8::MAX), i32::from(i8::MAX)) as i8
}

/// Which way an axis is pushed past the controller threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Reading above centre (right on X, up on Y).
    Positive,
    /// Reading below centre (left on X, down on Y).
    Negative,
}

/// Classify an axis for arrow-key emulation.
///
/// The axis counts as pushed once its deviation from centre exceeds
/// half of the half-range, i.e. the outer quarters of travel.
pub fn axis_direction(raw: u16, range_max: u16) -> Option<Direction> {
    let center = i32::from(range_max / 2);
    let threshold = center / 2;
    let deviation = i32::from(raw) - center;

    if deviation > threshold {
        Some(Direction::Positive)
    } else if deviation < -threshold {
        Some(Direction::Negative)
    } else {
        None
    }
}
