// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use chrono::{DateTime, Utc};

use crate::features::Features;
use crate::types::{PowerState, SourceTable, Volume};

use super::StateChange;

/// Last known state of a receiver.
///
/// Raw wire values are kept as received; interpretation (power state,
/// source name, features) happens on read so that an unrecognized value
/// never fails a poll.
///
/// # Examples
///
/// ```
/// use avrctl_lib::state::DeviceState;
/// use avrctl_lib::Features;
/// use avrctl_lib::types::SourceTable;
///
/// let state = DeviceState::new();
/// assert_eq!(state.power_token(), "PWSTANDBY");
/// assert!(!state.is_muted());
/// assert_eq!(state.supported_features(&SourceTable::default()), Features::BASE);
/// assert!(state.refreshed_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    /// Power token as answered to `PW?`.
    power_token: String,
    /// Master volume.
    volume: Volume,
    /// Whether the output is muted.
    muted: bool,
    /// Wire code of the selected input.
    source_code: String,
    /// Now-playing text, or the input name outside media modes.
    media_text: String,
    /// Completion time of the poll that produced this state.
    refreshed_at: Option<DateTime<Utc>>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            power_token: PowerState::STANDBY_TOKEN.to_string(),
            volume: Volume::MIN,
            muted: false,
            source_code: String::new(),
            media_text: String::new(),
            refreshed_at: None,
        }
    }
}

impl DeviceState {
    /// Creates the state a receiver has before its first poll.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn polled(
        power_token: String,
        volume: Volume,
        muted: bool,
        source_code: String,
        media_text: String,
        refreshed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            power_token,
            volume,
            muted,
            source_code,
            media_text,
            refreshed_at: Some(refreshed_at),
        }
    }

    // ========== Power ==========

    /// Returns the raw power token.
    #[must_use]
    pub fn power_token(&self) -> &str {
        &self.power_token
    }

    /// Returns the interpreted power state.
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        PowerState::from_token(&self.power_token)
    }

    // ========== Volume ==========

    /// Returns the master volume.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Returns the master volume as a level in `[0, 1]`.
    #[must_use]
    pub fn volume_level(&self) -> f32 {
        self.volume.level()
    }

    /// Returns `true` if the output is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // ========== Source ==========

    /// Returns the wire code of the selected input.
    #[must_use]
    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    /// Returns the name of the selected input, if the code is known.
    #[must_use]
    pub fn current_source_name(&self, sources: &SourceTable) -> Option<&'static str> {
        sources.lookup_name_by_code(&self.source_code)
    }

    /// Returns the now-playing text or input name.
    #[must_use]
    pub fn media_text(&self) -> &str {
        &self.media_text
    }

    /// Returns the features available with the selected input.
    #[must_use]
    pub fn supported_features(&self, sources: &SourceTable) -> Features {
        Features::for_source(sources.is_media_mode_code(&self.source_code))
    }

    /// Returns when this state was polled, or `None` before the first poll.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    // ========== Changes ==========

    /// Lists what differs in `next` compared to `self`.
    ///
    /// The refresh timestamp is not reported as a change.
    #[must_use]
    pub fn diff(&self, next: &Self, sources: &SourceTable) -> Vec<StateChange> {
        let mut changes = Vec::new();
        if self.power_token != next.power_token {
            changes.push(StateChange::Power {
                token: next.power_token.clone(),
                state: next.power_state(),
            });
        }
        if self.volume != next.volume {
            changes.push(StateChange::Volume(next.volume));
        }
        if self.muted != next.muted {
            changes.push(StateChange::Muted(next.muted));
        }
        if self.source_code != next.source_code {
            changes.push(StateChange::Source {
                code: next.source_code.clone(),
                name: next.current_source_name(sources).map(str::to_string),
            });
        }
        if self.media_text != next.media_text {
            changes.push(StateChange::MediaText(next.media_text.clone()));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polled(power: &str, raw: u8, muted: bool, source: &str, text: &str) -> DeviceState {
        DeviceState::polled(
            power.to_string(),
            Volume::new(raw).unwrap(),
            muted,
            source.to_string(),
            text.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn defaults() {
        let state = DeviceState::new();
        assert_eq!(state.power_state(), PowerState::Off);
        assert_eq!(state.volume(), Volume::MIN);
        assert!(!state.is_muted());
        assert_eq!(state.source_code(), "");
        assert_eq!(state.media_text(), "");
    }

    #[test]
    fn derived_values() {
        let sources = SourceTable::default();
        let state = polled("PWON", 40, true, "TUNER", "Radio\n");
        assert_eq!(state.power_state(), PowerState::On);
        assert!((state.volume_level() - 0.5).abs() < f32::EPSILON);
        assert_eq!(state.current_source_name(&sources), Some("Tuner"));
        assert!(state.supported_features(&sources).contains(Features::NOW_PLAYING));
        assert!(state.refreshed_at().is_some());
    }

    #[test]
    fn unmapped_source() {
        let sources = SourceTable::default();
        let state = polled("PWON", 0, false, "NET/USB", "");
        assert_eq!(state.current_source_name(&sources), None);
        assert_eq!(state.supported_features(&sources), Features::BASE);
    }

    #[test]
    fn diff_identical_states() {
        let sources = SourceTable::default();
        let a = polled("PWON", 20, false, "CD", "CD");
        let mut b = a.clone();
        b.refreshed_at = Some(Utc::now());
        assert!(a.diff(&b, &sources).is_empty());
    }

    #[test]
    fn diff_reports_each_field() {
        let sources = SourceTable::default();
        let before = polled("PWSTANDBY", 20, false, "CD", "CD");
        let after = polled("PWON", 30, true, "DVD", "DVD");
        let changes = before.diff(&after, &sources);
        assert_eq!(
            changes,
            vec![
                StateChange::Power {
                    token: "PWON".to_string(),
                    state: PowerState::On
                },
                StateChange::Volume(Volume::new(30).unwrap()),
                StateChange::Muted(true),
                StateChange::Source {
                    code: "DVD".to_string(),
                    name: Some("DVD".to_string())
                },
                StateChange::MediaText("DVD".to_string()),
            ]
        );
    }

    #[test]
    fn serializes_to_json() {
        let state = polled("PWON", 12, false, "CD", "CD");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["power_token"], "PWON");
        assert_eq!(json["volume"], 12);
        assert_eq!(json["source_code"], "CD");
        let back: DeviceState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
