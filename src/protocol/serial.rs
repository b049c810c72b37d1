// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local RS-232 transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};

use crate::error::ProtocolError;
use crate::protocol::Transport;
use crate::protocol::line::{LineConnection, millis};

/// Serial port parameters for a receiver wired to a local RS-232 port.
///
/// The receiver talks 9600 baud, 8 data bits, no parity, one stop bit and
/// no flow control. Only the baud rate and the read timeout are
/// adjustable.
///
/// # Examples
///
/// ```
/// use avrctl_lib::protocol::SerialConfig;
///
/// let config = SerialConfig::new("/dev/ttyUSB0");
/// assert_eq!(config.baud_rate(), 9600);
/// assert_eq!(config.read_timeout().as_millis(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    path: String,
    baud_rate: u32,
    #[serde(rename = "read_timeout_ms", with = "millis")]
    read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new("/dev/ttyS0")
    }
}

impl SerialConfig {
    /// Baud rate of the receiver's RS-232 port.
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
    /// Default silence after which a reply is considered complete.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(200);

    /// Creates a configuration for the device at `path`, e.g.
    /// `/dev/ttyUSB0` or `COM3`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
        }
    }

    /// Sets a custom baud rate.
    #[must_use]
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the read timeout that ends a reply.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Returns the device path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the baud rate.
    #[must_use]
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Returns the read timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Creates a transport from this configuration.
    #[must_use]
    pub fn into_transport(self) -> SerialTransport {
        SerialTransport { config: self }
    }
}

/// Transport opening the serial port anew for each operation.
#[derive(Debug, Clone)]
pub struct SerialTransport {
    config: SerialConfig,
}

impl SerialTransport {
    /// Creates a transport for the given configuration.
    #[must_use]
    pub fn new(config: SerialConfig) -> Self {
        config.into_transport()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Transport for SerialTransport {
    type Connection = SerialConnection;

    async fn open(&self) -> Result<SerialConnection, ProtocolError> {
        let path = self.config.path();
        tracing::debug!(path = %path, baud = self.config.baud_rate, "Opening serial port");

        let stream = tokio_serial::new(path, self.config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.config.read_timeout)
            .open_native_async()
            .map_err(|e| ProtocolError::ConnectionFailed(format!("{path}: {e}")))?;

        Ok(LineConnection::new(stream, self.config.read_timeout))
    }

    fn endpoint(&self) -> String {
        self.config.path.clone()
    }
}

/// An open serial connection to the receiver.
pub type SerialConnection = LineConnection<SerialStream>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.path(), "/dev/ttyUSB0");
        assert_eq!(config.baud_rate(), 9600);
        assert_eq!(config.read_timeout(), Duration::from_millis(200));
    }

    #[test]
    fn config_builder_chain() {
        let config = SerialConfig::new("COM3")
            .with_baud_rate(19_200)
            .with_read_timeout(Duration::from_millis(400));
        assert_eq!(config.baud_rate(), 19_200);
        assert_eq!(config.read_timeout(), Duration::from_millis(400));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SerialConfig = serde_json::from_str(r#"{"path": "/dev/ttyAMA0"}"#).unwrap();
        assert_eq!(config.path(), "/dev/ttyAMA0");
        assert_eq!(config.baud_rate(), 9600);
        assert_eq!(config.read_timeout(), Duration::from_millis(200));
    }

    #[test]
    fn transport_endpoint_is_path() {
        let transport = SerialTransport::new(SerialConfig::new("/dev/ttyUSB1"));
        assert_eq!(transport.endpoint(), "/dev/ttyUSB1");
        assert_eq!(transport.config().baud_rate(), 9600);
    }

    #[tokio::test]
    async fn missing_device_fails_to_open() {
        let transport = SerialConfig::new("/dev/avrctl-missing-port").into_transport();

        let result = transport.open().await;

        assert!(matches!(
            result,
            Err(ProtocolError::ConnectionFailed(ref message)) if message.contains("avrctl-missing-port")
        ));
    }
}
