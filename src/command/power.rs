// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power control commands.

use crate::command::{Command, QUERY_PARAMETER};

/// Command to query or change the receiver power state.
///
/// # Examples
///
/// ```
/// use avrctl_lib::command::{Command, PowerCommand};
///
/// assert_eq!(PowerCommand::Query.to_wire(), "PW?");
/// assert_eq!(PowerCommand::On.to_wire(), "PWON");
/// assert_eq!(PowerCommand::from(false).to_wire(), "PWSTANDBY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    /// Query the current power state.
    Query,
    /// Turn the receiver on.
    On,
    /// Put the receiver in standby.
    Standby,
}

impl From<bool> for PowerCommand {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Standby }
    }
}

impl Command for PowerCommand {
    fn name(&self) -> &'static str {
        "PW"
    }

    fn parameter(&self) -> String {
        match self {
            Self::Query => QUERY_PARAMETER,
            Self::On => "ON",
            Self::Standby => "STANDBY",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_query() {
        assert_eq!(PowerCommand::Query.name(), "PW");
        assert_eq!(PowerCommand::Query.parameter(), "?");
    }

    #[test]
    fn power_set() {
        assert_eq!(PowerCommand::On.to_wire(), "PWON");
        assert_eq!(PowerCommand::Standby.to_wire(), "PWSTANDBY");
    }

    #[test]
    fn power_from_bool() {
        assert_eq!(PowerCommand::from(true), PowerCommand::On);
        assert_eq!(PowerCommand::from(false), PowerCommand::Standby);
    }
}
