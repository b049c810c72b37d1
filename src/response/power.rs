// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power response decoding.

use crate::response::Reply;
use crate::types::PowerState;

/// Answer to `PW?`.
///
/// The token is kept verbatim; it is only interpreted when asked for.
///
/// # Examples
///
/// ```
/// use avrctl_lib::response::{PowerResponse, Reply};
/// use avrctl_lib::types::PowerState;
///
/// let reply = Reply::new(vec!["PWON".to_string()]);
/// let response = PowerResponse::from_reply(&reply);
/// assert_eq!(response.token(), "PWON");
/// assert_eq!(response.state(), PowerState::On);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerResponse {
    token: String,
}

impl PowerResponse {
    /// Decodes the first reply line as the power token.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            token: reply.single().to_string(),
        }
    }

    /// Returns the raw power token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the interpreted power state.
    #[must_use]
    pub fn state(&self) -> PowerState {
        PowerState::from_token(&self.token)
    }

    /// Consumes the response, returning the raw token.
    #[must_use]
    pub fn into_token(self) -> String {
        self.token
    }
}
