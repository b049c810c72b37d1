// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input selection and now-playing commands.

use crate::command::{Command, QUERY_PARAMETER};
use crate::error::SourceError;
use crate::types::SourceTable;

/// Command to query or select the input source.
///
/// # Examples
///
/// ```
/// use avrctl_lib::command::{Command, SourceCommand};
/// use avrctl_lib::types::SourceTable;
///
/// let cmd = SourceCommand::by_name(&SourceTable::default(), "Video Aux").unwrap();
/// assert_eq!(cmd.to_wire(), "SIV.AUX");
///
/// assert!(SourceCommand::by_name(&SourceTable::default(), "Laserdisc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCommand {
    /// Query the selected input.
    Query,
    /// Select an input by wire code.
    Select(String),
}

impl SourceCommand {
    /// Creates a select command for a named input.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if `name` is not in `table`.
    pub fn by_name(table: &SourceTable, name: &str) -> Result<Self, SourceError> {
        table
            .lookup_code_by_name(name)
            .map(|code| Self::Select(code.to_string()))
    }
}

impl Command for SourceCommand {
    fn name(&self) -> &'static str {
        "SI"
    }

    fn parameter(&self) -> String {
        match self {
            Self::Query => QUERY_PARAMETER.to_string(),
            Self::Select(code) => code.clone(),
        }
    }
}

/// Command requesting the now-playing frame.
///
/// The receiver only answers it usefully while a media-mode input is
/// selected. See [`NowPlaying`](crate::response::NowPlaying) for the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NowPlayingCommand;

impl Command for NowPlayingCommand {
    fn name(&self) -> &'static str {
        "NSE"
    }

    fn parameter(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_query() {
        assert_eq!(SourceCommand::Query.to_wire(), "SI?");
    }

    #[test]
    fn source_select_by_name() {
        let table = SourceTable::default();
        assert_eq!(
            SourceCommand::by_name(&table, "Tuner").unwrap(),
            SourceCommand::Select("TUNER".to_string())
        );
        assert_eq!(
            SourceCommand::by_name(&table, "Satelite / Cable")
                .unwrap()
                .to_wire(),
            "SIDBS/SAT"
        );
    }

    #[test]
    fn source_select_unknown_name() {
        let result = SourceCommand::by_name(&SourceTable::default(), "NoSuchInput");
        assert_eq!(result, Err(SourceError::NotFound("NoSuchInput".to_string())));
    }

    #[test]
    fn now_playing_has_no_parameter() {
        assert_eq!(NowPlayingCommand.to_wire(), "NSE");
        assert_eq!(NowPlayingCommand.encode(), b"NSE\r".to_vec());
    }
}
