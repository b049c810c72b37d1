// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Now-playing frame decoding.
//!
//! The receiver answers `NSE` with up to nine display lines, each tagged
//! with a fixed code:
//!
//! ```text
//! NSE0  NSE1X  NSE2X  NSE3X  NSE4  NSE5  NSE6  NSE7  NSE8
//! ```
//!
//! Tags are matched by position, not by content. The n-th received line
//! loses as many leading characters as the n-th tag is long, whatever it
//! actually starts with. This mirrors how the receiver's display buffer is
//! laid out and must be reproduced exactly.

use crate::response::{Reply, strip_len};

/// Positional tags of the now-playing frame, in order.
pub const NSE_PREFIXES: [&str; 9] = [
    "NSE0", "NSE1X", "NSE2X", "NSE3X", "NSE4", "NSE5", "NSE6", "NSE7", "NSE8",
];

/// Decoded answer to `NSE`.
///
/// # Examples
///
/// ```
/// use avrctl_lib::response::{NowPlaying, Reply};
///
/// let reply = Reply::new(vec![
///     "NSE0Now Playing".to_string(),
///     "NSE1XRadio One".to_string(),
/// ]);
/// let now_playing = NowPlaying::from_reply(&reply);
/// assert_eq!(now_playing.lines(), &["Now Playing", "Radio One"]);
/// assert_eq!(now_playing.text(), "Now Playing\nRadio One\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    lines: Vec<String>,
}

impl NowPlaying {
    /// Decodes a reply, stripping each line by its positional tag length.
    ///
    /// Missing lines are not padded. Lines past the ninth have no tag and
    /// are dropped.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        let received = reply.lines();
        if received.len() > NSE_PREFIXES.len() {
            tracing::debug!(
                received = received.len(),
                expected = NSE_PREFIXES.len(),
                "Ignoring surplus now-playing lines"
            );
        }

        let lines = NSE_PREFIXES
            .iter()
            .zip(received)
            .map(|(tag, line)| strip_len(line, tag.len()).to_string())
            .collect();
        Self { lines }
    }

    /// Returns the decoded display lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the display lines, each followed by a newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.iter().fold(String::new(), |mut text, line| {
            text.push_str(line);
            text.push('\n');
            text
        })
    }
}
