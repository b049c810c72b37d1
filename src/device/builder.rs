// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receiver builder.

use crate::device::{DEFAULT_NAME, Receiver};
use crate::error::{DeviceError, Error};
use crate::protocol::Transport;
use crate::types::SourceTable;

/// Builder for [`Receiver`].
///
/// Created by `Receiver::tcp("host")`, `Receiver::tcp_config(config)` or
/// `Receiver::builder(transport)`.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use avrctl_lib::Receiver;
/// use avrctl_lib::protocol::TcpConfig;
///
/// # async fn example() -> avrctl_lib::Result<()> {
/// // Polls once and fails if the receiver does not answer
/// let receiver = Receiver::tcp("192.168.1.40:23")?
///     .with_name("Den")
///     .build()
///     .await?;
///
/// // Slow serial bridge, no initial poll
/// let config = TcpConfig::new("10.0.0.9").with_read_timeout(Duration::from_millis(500));
/// let receiver = Receiver::tcp_config(config).build_without_probe();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReceiverBuilder<T: Transport> {
    transport: T,
    name: String,
    sources: SourceTable,
}

impl<T: Transport> ReceiverBuilder<T> {
    /// Creates a builder for a receiver reachable through `transport`.
    pub(crate) fn new(transport: T) -> Self {
        Self {
            transport,
            name: DEFAULT_NAME.to_string(),
            sources: SourceTable::default(),
        }
    }

    /// Sets the name used in logs and errors.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the input source table.
    #[must_use]
    pub fn with_sources(mut self, sources: SourceTable) -> Self {
        self.sources = sources;
        self
    }

    /// Returns the configured name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds the receiver and polls it once.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Unreachable` if the initial poll fails.
    pub async fn build(self) -> Result<Receiver<T>, Error> {
        let receiver = self.build_without_probe();
        if !receiver.refresh().await {
            return Err(DeviceError::Unreachable {
                name: receiver.name().to_string(),
            }
            .into());
        }
        tracing::info!(
            receiver = %receiver.name(),
            power = %receiver.power_state(),
            "Receiver ready"
        );
        Ok(receiver)
    }

    /// Builds the receiver without contacting it.
    ///
    /// The state keeps its defaults until the first
    /// [`refresh`](Receiver::refresh).
    #[must_use]
    pub fn build_without_probe(self) -> Receiver<T> {
        Receiver::new(self.name, self.transport, self.sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::scripted::ScriptedTransport;
    use crate::types::PowerState;

    #[tokio::test]
    async fn build_polls_once() {
        let transport = ScriptedTransport::new();
        transport.reply("PW?", &["PWON"]).reply("SI?", &["SIDVD"]);

        let receiver = Receiver::builder(transport.clone())
            .with_name("Den")
            .build()
            .await
            .unwrap();

        assert_eq!(receiver.name(), "Den");
        assert_eq!(receiver.power_state(), PowerState::On);
        assert_eq!(receiver.current_source_name(), Some("DVD"));
        assert_eq!(transport.opens(), 1);
    }

    #[tokio::test]
    async fn build_fails_when_unreachable() {
        let transport = ScriptedTransport::new();
        transport.refuse_open(true);

        let result = Receiver::builder(transport).build().await;

        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::Unreachable { ref name })) if name == DEFAULT_NAME
        ));
    }

    #[test]
    fn build_without_probe_stays_offline() {
        let transport = ScriptedTransport::new();
        let builder = Receiver::builder(transport.clone());
        assert_eq!(builder.name(), DEFAULT_NAME);

        let receiver = builder.build_without_probe();

        assert_eq!(transport.opens(), 0);
        assert!(receiver.state().refreshed_at().is_none());
    }

    #[test]
    fn custom_source_table() {
        static NORMAL: &[(&str, &str)] = &[("Turntable", "Phono")];
        let receiver = Receiver::builder(ScriptedTransport::new())
            .with_sources(SourceTable::new(NORMAL, &[]))
            .build_without_probe();
        assert_eq!(receiver.all_available_sources(), vec!["Turntable"]);
    }
}
