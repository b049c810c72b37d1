// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! Changes are computed by comparing two poll results with
//! [`DeviceState::diff`](super::DeviceState::diff). They are delivered to
//! callbacks registered on the receiver after each successful refresh.

use std::fmt;

use crate::types::{PowerState, Volume};

/// A difference between two consecutive poll results.
///
/// # Examples
///
/// ```
/// use avrctl_lib::state::StateChange;
/// use avrctl_lib::types::Volume;
///
/// let change = StateChange::Volume(Volume::new(40).unwrap());
/// assert_eq!(change.to_string(), "volume 40/80");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// The power token changed.
    Power {
        /// The new raw token.
        token: String,
        /// Its interpretation.
        state: PowerState,
    },

    /// Master volume changed.
    Volume(Volume),

    /// Muting was switched.
    Muted(bool),

    /// Another input was selected.
    Source {
        /// Wire code of the input.
        code: String,
        /// Input name, if the code is in the source table.
        name: Option<String>,
    },

    /// Now-playing text or input name changed.
    MediaText(String),
}

impl StateChange {
    /// Returns a short label naming the changed field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Power { .. } => "power",
            Self::Volume(_) => "volume",
            Self::Muted(_) => "muted",
            Self::Source { .. } => "source",
            Self::MediaText(_) => "media_text",
        }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power { state, .. } => write!(f, "power {state}"),
            Self::Volume(volume) => write!(f, "volume {volume}"),
            Self::Muted(muted) => write!(f, "muted {muted}"),
            Self::Source {
                name: Some(name), ..
            } => write!(f, "source {name}"),
            Self::Source { code, name: None } => write!(f, "source {code} (unmapped)"),
            Self::MediaText(text) => write!(f, "media text {text:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_labels() {
        assert_eq!(StateChange::Muted(true).field(), "muted");
        assert_eq!(StateChange::MediaText(String::new()).field(), "media_text");
    }

    #[test]
    fn display() {
        let power = StateChange::Power {
            token: "PWON".to_string(),
            state: PowerState::On,
        };
        assert_eq!(power.to_string(), "power on");

        let unmapped = StateChange::Source {
            code: "NET/USB".to_string(),
            name: None,
        };
        assert_eq!(unmapped.to_string(), "source NET/USB (unmapped)");

        let text = StateChange::MediaText("Radio\n".to_string());
        assert_eq!(text.to_string(), "media text \"Radio\\n\"");
    }

    #[test]
    fn serde_round_trip() {
        let change = StateChange::Source {
            code: "TUNER".to_string(),
            name: Some("Tuner".to_string()),
        };
        let json = serde_json::to_string(&change).unwrap();
        let back: StateChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, change);
    }
}
