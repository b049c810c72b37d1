// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the receiver.

use std::fmt;

/// Interpreted power state of the receiver.
///
/// The receiver answers `PW?` with a raw token. Only the two exact tokens
/// below are recognized; everything else, including an empty reply, maps
/// to [`PowerState::Unknown`].
///
/// # Examples
///
/// ```
/// use avrctl_lib::types::PowerState;
///
/// assert_eq!(PowerState::from_token("PWON"), PowerState::On);
/// assert_eq!(PowerState::from_token("PWSTANDBY"), PowerState::Off);
/// assert_eq!(PowerState::from_token("pwon"), PowerState::Unknown);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum PowerState {
    /// Receiver is in standby.
    Off,
    /// Receiver is on.
    On,
    /// The last power token was not recognized.
    #[default]
    Unknown,
}

impl PowerState {
    /// Wire token reported when the receiver is on.
    pub const ON_TOKEN: &'static str = "PWON";

    /// Wire token reported when the receiver is in standby.
    pub const STANDBY_TOKEN: &'static str = "PWSTANDBY";

    /// Interprets a raw power token by exact match.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            Self::STANDBY_TOKEN => Self::Off,
            Self::ON_TOKEN => Self::On,
            _ => Self::Unknown,
        }
    }

    /// Returns a lowercase label suitable for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` if the receiver is known to be on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
