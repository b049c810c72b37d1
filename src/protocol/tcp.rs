// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw TCP transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;

use crate::error::ProtocolError;
use crate::protocol::Transport;
use crate::protocol::line::{LineConnection, millis};

// ============================================================================
// TcpConfig
// ============================================================================

/// Connection parameters for a receiver reachable over TCP.
///
/// Receivers with a network port listen on the telnet port. Receivers with
/// only an RS-232 port can be reached through a serial terminal server
/// using the same framing.
///
/// # Examples
///
/// ```
/// use avrctl_lib::protocol::TcpConfig;
/// use std::time::Duration;
///
/// let config = TcpConfig::new("192.168.1.40");
/// assert_eq!(config.port(), 23);
///
/// let config = TcpConfig::parse("socket://10.0.0.5:4001").unwrap()
///     .with_read_timeout(Duration::from_millis(300));
/// assert_eq!(config.host(), "10.0.0.5");
/// assert_eq!(config.port(), 4001);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpConfig {
    host: String,
    port: u16,
    #[serde(rename = "connect_timeout_ms", with = "millis")]
    connect_timeout: Duration,
    #[serde(rename = "read_timeout_ms", with = "millis")]
    read_timeout: Duration,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl TcpConfig {
    /// Default control port.
    pub const DEFAULT_PORT: u16 = 23;
    /// Default timeout for establishing the connection.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
    /// Default silence after which a reply is considered complete.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(200);

    const URL_SCHEME: &'static str = "socket://";

    /// Creates a configuration for the specified host on the default port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
        }
    }

    /// Parses an endpoint string.
    ///
    /// Accepted forms are `host`, `host:port`, `[v6addr]:port` and any of
    /// these behind a `socket://` scheme.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty or the
    /// port is not a number.
    pub fn parse(endpoint: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidAddress(endpoint.to_string());
        let rest = endpoint
            .trim()
            .strip_prefix(Self::URL_SCHEME)
            .unwrap_or(endpoint.trim())
            .trim_end_matches('/');

        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (host, tail) = bracketed.split_once(']').ok_or_else(invalid)?;
            match tail.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if tail.is_empty() => (host, None),
                None => return Err(invalid()),
            }
        } else if rest.matches(':').count() == 1 {
            let (host, port) = rest.split_once(':').ok_or_else(invalid)?;
            (host, Some(port))
        } else {
            (rest, None)
        };

        if host.is_empty() {
            return Err(invalid());
        }
        let mut config = Self::new(host);
        if let Some(port) = port {
            config.port = port.parse().map_err(|_| invalid())?;
        }
        Ok(config)
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout that ends a reply.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the read timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Creates a transport from this configuration.
    #[must_use]
    pub fn into_transport(self) -> TcpTransport {
        TcpTransport { config: self }
    }
}

// ============================================================================
// TcpTransport
// ============================================================================

/// Transport opening a new TCP connection per operation.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Creates a transport for the given configuration.
    #[must_use]
    pub fn new(config: TcpConfig) -> Self {
        config.into_transport()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TcpConfig {
        &self.config
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;

    async fn open(&self) -> Result<TcpConnection, ProtocolError> {
        let address = self.config.address();
        let connect_timeout = self.config.connect_timeout;

        tracing::debug!(address = %address, "Opening connection");

        let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(address.as_str()))
            .await
            .map_err(|_| {
                #[allow(clippy::cast_possible_truncation)]
                let ms = connect_timeout.as_millis() as u64;
                ProtocolError::Timeout(ms)
            })?
            .map_err(|e| ProtocolError::ConnectionFailed(format!("{address}: {e}")))?;
        stream.set_nodelay(true)?;

        Ok(LineConnection::new(stream, self.config.read_timeout))
    }

    fn endpoint(&self) -> String {
        self.config.address()
    }
}

// ============================================================================
// TcpConnection
// ============================================================================

/// An open TCP connection to the receiver.
pub type TcpConnection = LineConnection<TcpStream>;
