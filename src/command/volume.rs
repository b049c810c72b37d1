// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Master volume and mute commands.

use crate::command::{Command, QUERY_PARAMETER};
use crate::types::Volume;

/// Command to query or set the master volume.
///
/// # Examples
///
/// ```
/// use avrctl_lib::command::{Command, VolumeCommand};
/// use avrctl_lib::types::Volume;
///
/// assert_eq!(VolumeCommand::Query.to_wire(), "MV?");
/// assert_eq!(VolumeCommand::Set(Volume::from_level(0.5)).to_wire(), "MV40");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCommand {
    /// Query the current volume.
    Query,
    /// Set an absolute volume.
    Set(Volume),
}

impl Command for VolumeCommand {
    fn name(&self) -> &'static str {
        "MV"
    }

    fn parameter(&self) -> String {
        match self {
            Self::Query => QUERY_PARAMETER.to_string(),
            Self::Set(volume) => volume.wire_value(),
        }
    }
}

/// Command to query or set muting.
///
/// # Examples
///
/// ```
/// use avrctl_lib::command::{Command, MuteCommand};
///
/// assert_eq!(MuteCommand::Query.to_wire(), "MU?");
/// assert_eq!(MuteCommand::from(true).to_wire(), "MUON");
/// assert_eq!(MuteCommand::from(false).to_wire(), "MUOFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteCommand {
    /// Query the mute state.
    Query,
    /// Mute the output.
    On,
    /// Unmute the output.
    Off,
}

impl MuteCommand {
    /// Reply line reported while muted.
    pub const MUTED_REPLY: &'static str = "MUON";
}

impl From<bool> for MuteCommand {
    fn from(mute: bool) -> Self {
        if mute { Self::On } else { Self::Off }
    }
}

impl Command for MuteCommand {
    fn name(&self) -> &'static str {
        "MU"
    }

    fn parameter(&self) -> String {
        match self {
            Self::Query => QUERY_PARAMETER,
            Self::On => "ON",
            Self::Off => "OFF",
        }
        .to_string()
    }
}
