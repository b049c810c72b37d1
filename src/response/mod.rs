// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response decoding for receiver replies.
//!
//! The receiver answers a query with zero or more `\r` terminated lines and
//! then goes quiet; the transport reports the silence as a read timeout.
//! A [`Reply`] holds the lines of one answer. The typed responses in this
//! module turn it into state values.
//!
//! None of the decoders fail. An empty reply or a malformed line decodes
//! to a documented fallback value instead.

mod now_playing;
mod power;
mod source;
mod volume;

pub use now_playing::{NSE_PREFIXES, NowPlaying};
pub use power::PowerResponse;
pub use source::SourceResponse;
pub use volume::{MuteResponse, VolumeResponse};

/// Lines received in answer to one command, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    lines: Vec<String>,
}

impl Reply {
    /// Creates a reply from already framed lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Returns the first line, or `""` if nothing was received.
    #[must_use]
    pub fn single(&self) -> &str {
        decode_single(&self.lines)
    }

    /// Returns every received line.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        decode_multiline(&self.lines)
    }

    /// Returns `true` if the receiver did not answer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for Reply {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

/// Returns the first line verbatim, or `""` when no line was received.
#[must_use]
pub fn decode_single(lines: &[String]) -> &str {
    lines.first().map_or("", String::as_str)
}

/// Returns all lines in arrival order.
#[must_use]
pub fn decode_multiline(lines: &[String]) -> &[String] {
    lines
}

/// Removes as many leading characters as `prefix` has.
///
/// The line content is not compared against `prefix`; only its length
/// matters. A line shorter than the prefix yields `""`.
///
/// # Examples
///
/// ```
/// use avrctl_lib::response::strip_prefix;
///
/// assert_eq!(strip_prefix("MV45", "MV"), "45");
/// assert_eq!(strip_prefix("XY45", "MV"), "45");
/// assert_eq!(strip_prefix("S", "SI"), "");
/// ```
#[must_use]
pub fn strip_prefix<'a>(line: &'a str, prefix: &str) -> &'a str {
    strip_len(line, prefix.chars().count())
}

/// Removes `count` leading characters, or everything if the line is shorter.
pub(crate) fn strip_len(line: &str, count: usize) -> &str {
    line.char_indices()
        .nth(count)
        .map_or("", |(offset, _)| &line[offset..])
}

/// Turns one raw line from the wire into text.
///
/// Bytes that are not valid UTF-8 are replaced; surrounding whitespace,
/// including the `\r` terminator, is trimmed.
#[must_use]
pub fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_returns_first_line() {
        let reply = Reply::new(lines(&["PWON", "ignored"]));
        assert_eq!(reply.single(), "PWON");
    }

    #[test]
    fn single_on_empty_reply() {
        assert_eq!(Reply::default().single(), "");
        assert_eq!(decode_single(&[]), "");
    }

    #[test]
    fn multiline_keeps_order() {
        let reply = Reply::new(lines(&["MV45", "MVMAX 80"]));
        assert_eq!(reply.lines(), &["MV45".to_string(), "MVMAX 80".to_string()]);
    }

    #[test]
    fn multiline_on_empty_reply() {
        assert!(decode_multiline(&[]).is_empty());
        assert!(Reply::default().is_empty());
    }

    #[test]
    fn strip_prefix_is_positional() {
        assert_eq!(strip_prefix("PWON", "PW"), "ON");
        assert_eq!(strip_prefix("SICD", "SI"), "CD");
        assert_eq!(strip_prefix("ABCD", "SI"), "CD");
        assert_eq!(strip_prefix("SI", "SI"), "");
        assert_eq!(strip_prefix("", "SI"), "");
        assert_eq!(strip_prefix("SICD", ""), "SICD");
    }

    #[test]
    fn strip_len_counts_characters() {
        assert_eq!(strip_len("éabc", 1), "abc");
        assert_eq!(strip_len("abc", 5), "");
    }

    #[test]
    fn decode_line_trims_terminator() {
        assert_eq!(decode_line(b"PWON\r"), "PWON");
        assert_eq!(decode_line(b"  MV45 \r"), "MV45");
        assert_eq!(decode_line(b"\r"), "");
        assert_eq!(decode_line(b"NSE1X\xffRock\r"), "NSE1X\u{fffd}Rock");
    }
}
