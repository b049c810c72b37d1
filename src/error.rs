// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `avrctl` library.
//!
//! Most irregularities on the wire (empty replies, malformed lines) are
//! absorbed by the decoders and never surface here. What remains is value
//! validation, transport failures, unknown input names, and devices that
//! cannot be reached while probing.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the receiver.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// An input source could not be resolved.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Error occurred during device setup.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// Errors related to the line transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying socket I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection to the receiver failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connecting timed out.
    #[error("connection timed out after {0} ms")]
    Timeout(u64),

    /// Invalid endpoint string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The receiver closed the connection before answering.
    #[error("connection closed")]
    ConnectionClosed,

    /// The reply to a query never went quiet.
    #[error("reply to {0} did not end")]
    ReplyOverflow(String),
}

/// Errors related to the input source table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No input with this name exists in the source table.
    #[error("unknown source: {0}")]
    NotFound(String),
}

/// Errors related to device setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The initial poll could not reach the receiver.
    #[error("receiver {name} is unreachable")]
    Unreachable {
        /// The configured device name.
        name: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 80,
            actual: 99,
        };
        assert_eq!(err.to_string(), "value 99 is out of range [0, 80]");
    }

    #[test]
    fn error_from_source_error() {
        let err: Error = SourceError::NotFound("Laserdisc".to_string()).into();
        assert!(matches!(err, Error::Source(SourceError::NotFound(ref n)) if n == "Laserdisc"));
        assert_eq!(err.to_string(), "source error: unknown source: Laserdisc");
    }

    #[test]
    fn protocol_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: ProtocolError = io.into();
        assert!(matches!(err, ProtocolError::Io(_)));
    }

    #[test]
    fn reply_overflow_names_command() {
        let err = ProtocolError::ReplyOverflow("MV?".to_string());
        assert_eq!(err.to_string(), "reply to MV? did not end");
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::Unreachable {
            name: "Music station".to_string(),
        };
        assert_eq!(err.to_string(), "receiver Music station is unreachable");
    }
}
