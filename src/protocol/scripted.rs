// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport answering from a script, for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::LINE_TERMINATOR;
use crate::error::ProtocolError;
use crate::protocol::{Connection, Transport};

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, Vec<String>>,
    written: Vec<Vec<u8>>,
    opens: usize,
    closes: usize,
    refuse_open: bool,
    fail_on: Option<String>,
    echo: bool,
}

impl Script {
    /// Makes a set command visible to the matching query, like the receiver.
    fn echo(&mut self, command: &str) {
        if command.ends_with('?') || command.len() < 3 || !command.is_ascii() {
            return;
        }
        let query = format!("{}?", &command[..2]);
        self.replies.insert(query, vec![command.to_string()]);
    }
}

/// Transport whose connections answer each command with scripted lines.
///
/// Clones share the same script, so a test can keep one handle to inspect
/// what a receiver under test wrote.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replies to set commands are stored as the answer to their query.
    pub(crate) fn echoing() -> Self {
        let transport = Self::new();
        transport.script.lock().echo = true;
        transport
    }

    pub(crate) fn reply(&self, command: &str, lines: &[&str]) -> &Self {
        self.script.lock().replies.insert(
            command.to_string(),
            lines.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub(crate) fn refuse_open(&self, refuse: bool) {
        self.script.lock().refuse_open = refuse;
    }

    /// Makes writing `command` fail with an I/O error.
    pub(crate) fn fail_on(&self, command: &str) {
        self.script.lock().fail_on = Some(command.to_string());
    }

    /// Commands written so far, without terminator.
    pub(crate) fn written(&self) -> Vec<String> {
        self.script
            .lock()
            .written
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).trim_end_matches('\r').to_string())
            .collect()
    }

    pub(crate) fn written_bytes(&self) -> Vec<Vec<u8>> {
        self.script.lock().written.clone()
    }

    pub(crate) fn opens(&self) -> usize {
        self.script.lock().opens
    }

    pub(crate) fn closes(&self) -> usize {
        self.script.lock().closes
    }
}

impl Transport for ScriptedTransport {
    type Connection = ScriptedConnection;

    async fn open(&self) -> Result<ScriptedConnection, ProtocolError> {
        let mut script = self.script.lock();
        if script.refuse_open {
            return Err(ProtocolError::ConnectionFailed("refused".to_string()));
        }
        script.opens += 1;
        Ok(ScriptedConnection {
            script: Arc::clone(&self.script),
            inbox: VecDeque::new(),
        })
    }

    fn endpoint(&self) -> String {
        "scripted".to_string()
    }
}

#[derive(Debug)]
pub(crate) struct ScriptedConnection {
    script: Arc<Mutex<Script>>,
    inbox: VecDeque<String>,
}

impl Connection for ScriptedConnection {
    async fn write_line(&mut self, line: &[u8]) -> Result<(), ProtocolError> {
        let command = String::from_utf8_lossy(line)
            .trim_end_matches(char::from(LINE_TERMINATOR))
            .to_string();

        let mut script = self.script.lock();
        if script.fail_on.as_deref() == Some(command.as_str()) {
            return Err(ProtocolError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "scripted failure",
            )));
        }
        script.written.push(line.to_vec());
        if let Some(lines) = script.replies.get(&command) {
            self.inbox.extend(lines.iter().cloned());
        }
        if script.echo {
            script.echo(&command);
        }
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        Ok(self.inbox.pop_front())
    }

    async fn close(self) -> Result<(), ProtocolError> {
        self.script.lock().closes += 1;
        Ok(())
    }
}
