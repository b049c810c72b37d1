// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Master volume type.
//!
//! The receiver counts volume in native steps from 0 to 80. Callers work
//! with a normalized level in `[0, 1]`; this type converts between both
//! and guarantees the raw value never leaves the native range.

use std::fmt;

use crate::error::ValueError;

/// Raw master volume in device steps (0-80).
///
/// # Examples
///
/// ```
/// use avrctl_lib::types::Volume;
///
/// let vol = Volume::new(40).unwrap();
/// assert!((vol.level() - 0.5).abs() < f32::EPSILON);
/// assert_eq!(vol.wire_value(), "40");
///
/// // Levels are rounded to the nearest step and clamped
/// assert_eq!(Volume::from_level(0.25).raw(), 20);
/// assert_eq!(Volume::from_level(1.7).raw(), 80);
///
/// // Out of range raw values are rejected
/// assert!(Volume::new(81).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Volume(u8);

impl Volume {
    /// Highest native volume step.
    pub const MAX_RAW: u8 = 80;

    /// Number of raw steps moved by a single volume up/down.
    pub const STEP: i32 = 3;

    /// Silent.
    pub const MIN: Self = Self(0);

    /// Full volume.
    pub const MAX: Self = Self(Self::MAX_RAW);

    /// Creates a volume from a raw step value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `raw` exceeds 80.
    pub fn new(raw: u8) -> Result<Self, ValueError> {
        if raw > Self::MAX_RAW {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX_RAW),
                actual: u16::from(raw),
            });
        }
        Ok(Self(raw))
    }

    /// Creates a volume from any integer, clamping to `[0, 80]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(raw: i64) -> Self {
        // Safe: clamped into 0..=80 first
        Self(raw.clamp(0, i64::from(Self::MAX_RAW)) as u8)
    }

    /// Creates a volume from a normalized level.
    ///
    /// The level is scaled by 80 and rounded half-to-even. The result is
    /// clamped to the native range; NaN maps to silence.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_level(level: f32) -> Self {
        let scaled = (level * f32::from(Self::MAX_RAW)).round_ties_even();
        if scaled.is_nan() {
            return Self::MIN;
        }
        // Safe: saturating float-to-int cast, then clamped
        Self::clamped(scaled as i64)
    }

    /// Returns the raw step value.
    #[must_use]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Returns the normalized level in `[0, 1]`.
    #[must_use]
    pub fn level(&self) -> f32 {
        f32::from(self.0) / f32::from(Self::MAX_RAW)
    }

    /// Returns this volume moved by `steps` raw steps, clamped.
    #[must_use]
    pub fn stepped(&self, steps: i32) -> Self {
        Self::clamped(i64::from(self.0) + i64::from(steps))
    }

    /// Returns the zero-padded two digit value used on the wire.
    #[must_use]
    pub fn wire_value(&self) -> String {
        format!("{:02}", self.0)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX_RAW)
    }
}

impl TryFrom<u8> for Volume {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
