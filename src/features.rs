// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supported feature flags.
//!
//! The receiver always supports power, volume, mute and input selection.
//! Now-playing text is only available while a media-mode input is
//! selected, so the feature set is derived from the current source on
//! every read rather than configured once.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of features a host can offer for the receiver.
///
/// # Examples
///
/// ```
/// use avrctl_lib::Features;
///
/// let features = Features::for_source(false);
/// assert!(features.contains(Features::VOLUME_SET | Features::SELECT_SOURCE));
/// assert!(!features.contains(Features::NOW_PLAYING));
///
/// assert!(Features::for_source(true).contains(Features::NOW_PLAYING));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct Features(u32);

impl Features {
    /// Absolute volume can be set.
    pub const VOLUME_SET: Self = Self(1);
    /// Output can be muted.
    pub const VOLUME_MUTE: Self = Self(1 << 1);
    /// Receiver can be turned on.
    pub const TURN_ON: Self = Self(1 << 2);
    /// Receiver can be put in standby.
    pub const TURN_OFF: Self = Self(1 << 3);
    /// Input source can be selected.
    pub const SELECT_SOURCE: Self = Self(1 << 4);
    /// Now-playing text is available.
    pub const NOW_PLAYING: Self = Self(1 << 5);

    /// Features available regardless of the selected input.
    pub const BASE: Self = Self(
        Self::VOLUME_SET.0
            | Self::VOLUME_MUTE.0
            | Self::TURN_ON.0
            | Self::TURN_OFF.0
            | Self::SELECT_SOURCE.0,
    );

    const NAMES: [(Self, &'static str); 6] = [
        (Self::VOLUME_SET, "volume_set"),
        (Self::VOLUME_MUTE, "volume_mute"),
        (Self::TURN_ON, "turn_on"),
        (Self::TURN_OFF, "turn_off"),
        (Self::SELECT_SOURCE, "select_source"),
        (Self::NOW_PLAYING, "now_playing"),
    ];

    /// Returns the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the features for the current input.
    #[must_use]
    pub const fn for_source(media_mode: bool) -> Self {
        if media_mode {
            Self(Self::BASE.0 | Self::NOW_PLAYING.0)
        } else {
            Self::BASE
        }
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every feature in `other` is present.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no feature is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the names of the present features.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("|"))
    }
}
