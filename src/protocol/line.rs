// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `\r` framed connection over any byte stream.

use std::fmt;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::command::LINE_TERMINATOR;
use crate::error::ProtocolError;
use crate::protocol::Connection;
use crate::response::decode_line;

/// An open byte stream to the receiver, read one `\r` terminated line at a
/// time.
///
/// A read that sees no terminator within the read timeout returns whatever
/// arrived so far, or `None` if nothing did.
pub struct LineConnection<S> {
    reader: BufReader<S>,
    /// Bytes of a line not yet terminated.
    pending: Vec<u8>,
    read_timeout: Duration,
}

impl<S> LineConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an open stream.
    pub fn new(stream: S, read_timeout: Duration) -> Self {
        Self {
            reader: BufReader::new(stream),
            pending: Vec::new(),
            read_timeout,
        }
    }

    /// Returns the read timeout that ends a reply.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    fn take_pending(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(decode_line(&std::mem::take(&mut self.pending)))
        }
    }
}

impl<S> Connection for LineConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn write_line(&mut self, line: &[u8]) -> Result<(), ProtocolError> {
        let stream = self.reader.get_mut();
        stream.write_all(line).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        let read = tokio::time::timeout(
            self.read_timeout,
            self.reader.read_until(LINE_TERMINATOR, &mut self.pending),
        )
        .await;

        match read {
            // Silence: whatever arrived so far is the last line
            Err(_) => Ok(self.take_pending()),
            Ok(Ok(0)) if self.pending.is_empty() => Err(ProtocolError::ConnectionClosed),
            Ok(Ok(_)) => Ok(self.take_pending()),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    async fn close(self) -> Result<(), ProtocolError> {
        let mut stream = self.reader.into_inner();
        stream.shutdown().await?;
        Ok(())
    }
}

impl<S> fmt::Debug for LineConnection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineConnection")
            .field("pending", &self.pending.len())
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}

/// Serializes a `Duration` as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
