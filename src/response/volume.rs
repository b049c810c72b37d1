// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume and mute response decoding.

use crate::command::{Command, MuteCommand, VolumeCommand};
use crate::response::{Reply, strip_prefix};
use crate::types::Volume;

/// Answer to `MV?`.
///
/// The receiver sends several lines, for example the master volume and
/// the configured maximum:
///
/// ```text
/// MV45
/// MVMAX 80
/// ```
///
/// The first line that starts with `MV` and carries a number is the master
/// volume. Three digit values are half steps (`MV455` is 45.5) and are
/// truncated to the whole step. Values above the native range are clamped.
///
/// # Examples
///
/// ```
/// use avrctl_lib::response::{Reply, VolumeResponse};
///
/// let reply = Reply::new(vec!["MVMAX 80".to_string(), "MV45".to_string()]);
/// let volume = VolumeResponse::from_reply(&reply).volume().unwrap();
/// assert_eq!(volume.raw(), 45);
///
/// assert!(VolumeResponse::from_reply(&Reply::default()).volume().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeResponse {
    volume: Option<Volume>,
}

impl VolumeResponse {
    /// Scans the reply for the master volume line.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        let prefix = VolumeCommand::Query.name();
        let volume = reply
            .lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .find_map(|line| parse_raw(strip_prefix(line, prefix)));
        Self { volume }
    }

    /// Returns the master volume, or `None` if no line carried one.
    #[must_use]
    pub fn volume(&self) -> Option<Volume> {
        self.volume
    }
}

fn parse_raw(value: &str) -> Option<Volume> {
    let whole = if value.len() == 3 && value.bytes().all(|b| b.is_ascii_digit()) {
        &value[..2]
    } else {
        value
    };
    whole.parse::<u16>().ok().map(|raw| Volume::clamped(i64::from(raw)))
}

/// Answer to `MU?`.
///
/// Only an exact `MUON` means muted; anything else, including an empty
/// reply, means not muted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuteResponse {
    muted: bool,
}

impl MuteResponse {
    /// Decodes the first reply line.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            muted: reply.single() == MuteCommand::MUTED_REPLY,
        }
    }

    /// Returns `true` if the receiver reported muting.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}
