// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input source response decoding.

use crate::command::{Command, SourceCommand};
use crate::response::{Reply, strip_prefix};

/// Answer to `SI?`.
///
/// The two character `SI` prefix is dropped without checking it. A reply
/// shorter than that yields an empty code.
///
/// # Examples
///
/// ```
/// use avrctl_lib::response::{Reply, SourceResponse};
///
/// let reply = Reply::new(vec!["SIDBS/SAT".to_string()]);
/// assert_eq!(SourceResponse::from_reply(&reply).code(), "DBS/SAT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResponse {
    code: String,
}

impl SourceResponse {
    /// Decodes the first reply line as the selected input code.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            code: strip_prefix(reply.single(), SourceCommand::Query.name()).to_string(),
        }
    }

    /// Returns the wire code of the selected input.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Consumes the response, returning the wire code.
    #[must_use]
    pub fn into_code(self) -> String {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(items: &[&str]) -> String {
        let reply = Reply::new(items.iter().map(ToString::to_string).collect());
        SourceResponse::from_reply(&reply).into_code()
    }

    #[test]
    fn source_code() {
        assert_eq!(code(&["SITUNER"]), "TUNER");
        assert_eq!(code(&["SIV.AUX", "SVOFF"]), "V.AUX");
    }

    #[test]
    fn short_or_empty_reply() {
        assert_eq!(code(&[]), "");
        assert_eq!(code(&["S"]), "");
        assert_eq!(code(&["SI"]), "");
    }

    #[test]
    fn prefix_is_not_checked() {
        assert_eq!(code(&["XXCD"]), "CD");
    }
}
