// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receiver command definitions.
//!
//! This module provides typed representations of the ASCII commands the
//! receiver understands, and their encoding onto the wire.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Wire |
//! |-------------|---------|------|
//! | [`PowerCommand`] | Query or set power | `PW?`, `PWON`, `PWSTANDBY` |
//! | [`VolumeCommand`] | Query or set master volume | `MV?`, `MV45` |
//! | [`MuteCommand`] | Query or set mute | `MU?`, `MUON`, `MUOFF` |
//! | [`SourceCommand`] | Query or select input | `SI?`, `SICD` |
//! | [`NowPlayingCommand`] | Fetch now-playing text | `NSE` |
//!
//! # Command Structure
//!
//! Each command is a two or three letter name (`PW`, `MV`, `MU`, `SI`,
//! `NSE`) followed by a parameter: `?` for queries, a value otherwise.
//! The name doubles as the prefix the receiver puts in front of its reply.
//!
//! # Examples
//!
//! ```
//! use avrctl_lib::command::{Command, PowerCommand, VolumeCommand};
//! use avrctl_lib::types::Volume;
//!
//! assert_eq!(PowerCommand::On.to_wire(), "PWON");
//! assert_eq!(PowerCommand::Query.encode(), b"PW?\r");
//!
//! let set = VolumeCommand::Set(Volume::new(5).unwrap());
//! assert_eq!(set.to_wire(), "MV05");
//! ```

mod power;
mod source;
mod volume;

pub use power::PowerCommand;
pub use source::{NowPlayingCommand, SourceCommand};
pub use volume::{MuteCommand, VolumeCommand};

/// Byte terminating every command and reply line.
pub const LINE_TERMINATOR: u8 = b'\r';

/// Parameter sent in place of a value to query the current setting.
pub const QUERY_PARAMETER: &str = "?";

/// Appends the line terminator to an ASCII command.
///
/// # Examples
///
/// ```
/// assert_eq!(avrctl_lib::command::encode("MUON"), b"MUON\r");
/// ```
#[must_use]
pub fn encode(command: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(command.len() + 1);
    bytes.extend_from_slice(command.as_bytes());
    bytes.push(LINE_TERMINATOR);
    bytes
}

/// A command that can be sent to the receiver.
pub trait Command {
    /// Returns the command name, which is also the reply prefix.
    ///
    /// For example, `"PW"`, `"MV"`, `"SI"`.
    fn name(&self) -> &'static str;

    /// Returns the parameter following the name.
    ///
    /// `"?"` for queries, the value to apply otherwise, and the empty
    /// string for commands that take none.
    fn parameter(&self) -> String;

    /// Returns `true` if the receiver answers this command with state.
    fn is_query(&self) -> bool {
        self.parameter() == QUERY_PARAMETER
    }

    /// Returns the full command string without terminator.
    fn to_wire(&self) -> String {
        format!("{}{}", self.name(), self.parameter())
    }

    /// Returns the framed bytes to write on the transport.
    fn encode(&self) -> Vec<u8> {
        encode(&self.to_wire())
    }
}
