// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line transport used to talk to the receiver.
//!
//! The receiver protocol needs nothing more than a connection that can
//! write one framed command and read `\r` terminated lines with a short
//! timeout. A read that times out means the receiver has nothing more to
//! say; there is no explicit end-of-reply marker.
//!
//! # Transports
//!
//! - [`TcpTransport`]: raw TCP socket, for receivers on the network or
//!   serial ports exposed through a terminal server
//! - `SerialTransport`: local RS-232 port at 9600 baud (`serial` feature)
//!
//! Both frame lines with [`LineConnection`].
//!
//! Every operation opens its own connection and closes it before
//! returning, so no session state survives a failure.

mod line;
#[cfg(feature = "serial")]
mod serial;
mod tcp;

#[cfg(test)]
pub(crate) mod scripted;

pub use line::LineConnection;
#[cfg(feature = "serial")]
pub use serial::{SerialConfig, SerialConnection, SerialTransport};
pub use tcp::{TcpConfig, TcpConnection, TcpTransport};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::response::Reply;

/// Upper bound on lines collected for a single reply.
///
/// Replies are terminated by silence, so a receiver that keeps talking
/// would otherwise hold the connection forever.
pub const MAX_REPLY_LINES: usize = 64;

/// Lines dropped past [`MAX_REPLY_LINES`] before a reply is given up on.
const DISCARD_LIMIT: usize = 4 * MAX_REPLY_LINES;

/// Something that can open connections to one receiver.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Connection type produced by [`open`](Self::open).
    type Connection: Connection;

    /// Opens a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the receiver cannot be reached.
    async fn open(&self) -> Result<Self::Connection, ProtocolError>;

    /// Returns a printable description of the endpoint, for logs.
    fn endpoint(&self) -> String;
}

/// An open, exclusively owned connection to the receiver.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Writes already framed bytes.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write_line(&mut self, line: &[u8]) -> Result<(), ProtocolError>;

    /// Reads one line, or `None` if the read timed out with nothing received.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on socket failures other than the timeout.
    async fn read_line(&mut self) -> Result<Option<String>, ProtocolError>;

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the shutdown fails.
    async fn close(self) -> Result<(), ProtocolError>
    where
        Self: Sized;

    /// Encodes and writes a command without reading anything back.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn send<C: Command + Sync>(&mut self, command: &C) -> Result<(), ProtocolError> {
        let wire = command.to_wire();
        tracing::debug!(command = %wire, "Sending command");
        self.write_line(&command.encode()).await
    }

    /// Sends a command and collects reply lines until the receiver goes quiet.
    ///
    /// At most [`MAX_REPLY_LINES`] lines are kept. Lines past that are read
    /// and dropped until silence, so the next query on this connection
    /// only sees its own reply.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if writing or reading fails, or
    /// `ProtocolError::ReplyOverflow` if the receiver keeps talking past
    /// the drain limit. A timeout is not an error; it ends the reply.
    async fn query<C: Command + Sync>(&mut self, command: &C) -> Result<Reply, ProtocolError> {
        self.send(command).await?;

        let mut lines = Vec::new();
        let mut discarded = 0usize;
        while let Some(line) = self.read_line().await? {
            if lines.len() < MAX_REPLY_LINES {
                tracing::debug!(line = %line, "Received line");
                lines.push(line);
                continue;
            }
            discarded += 1;
            if discarded > DISCARD_LIMIT {
                return Err(ProtocolError::ReplyOverflow(command.to_wire()));
            }
        }
        if discarded > 0 {
            tracing::warn!(
                command = %command.to_wire(),
                limit = MAX_REPLY_LINES,
                discarded,
                "Reply truncated"
            );
        }
        Ok(Reply::new(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedTransport;
    use super::*;
    use crate::command::{MuteCommand, VolumeCommand};

    fn volume_lines(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("MVX{i:02}")).collect()
    }

    #[tokio::test]
    async fn query_collects_until_silence() {
        let transport = ScriptedTransport::new();
        transport.reply("MV?", &["MV40", "MVMAX 80"]);

        let mut conn = transport.open().await.unwrap();
        let reply = conn.query(&VolumeCommand::Query).await.unwrap();

        assert_eq!(reply.lines(), &["MV40".to_string(), "MVMAX 80".to_string()]);
    }

    #[tokio::test]
    async fn capped_reply_is_drained_before_next_query() {
        let lines = volume_lines(MAX_REPLY_LINES + 10);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let transport = ScriptedTransport::new();
        transport.reply("MV?", &refs).reply("MU?", &["MUON"]);

        let mut conn = transport.open().await.unwrap();
        let volume = conn.query(&VolumeCommand::Query).await.unwrap();
        let mute = conn.query(&MuteCommand::Query).await.unwrap();

        assert_eq!(volume.lines().len(), MAX_REPLY_LINES);
        assert_eq!(volume.single(), "MVX00");
        assert_eq!(mute.lines(), &["MUON".to_string()]);
    }

    #[tokio::test]
    async fn endless_reply_is_an_error() {
        let lines = volume_lines(MAX_REPLY_LINES + DISCARD_LIMIT + 1);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let transport = ScriptedTransport::new();
        transport.reply("MV?", &refs);

        let mut conn = transport.open().await.unwrap();
        let result = conn.query(&VolumeCommand::Query).await;

        assert!(matches!(
            result,
            Err(ProtocolError::ReplyOverflow(ref command)) if command == "MV?"
        ));
    }
}
