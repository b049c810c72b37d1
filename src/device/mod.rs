// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level receiver abstraction.
//!
//! A [`Receiver`] keeps the last polled [`DeviceState`] and offers two
//! kinds of operations:
//!
//! - [`refresh`](Receiver::refresh) polls the receiver and replaces the
//!   state as a whole. A failed poll keeps the previous state.
//! - Mutations such as [`turn_on`](Receiver::turn_on) send one command and
//!   return without waiting for confirmation. They never touch the state;
//!   call `refresh` afterwards to observe their effect.
//!
//! Each operation opens its own connection and closes it before returning.
//! Operations on one receiver are not serialized internally; callers that
//! share a receiver between tasks should hold a lock around each call.
//!
//! ```no_run
//! use avrctl_lib::Receiver;
//!
//! # async fn example() -> avrctl_lib::Result<()> {
//! let receiver = Receiver::tcp("192.168.1.40")?
//!     .with_name("Living room")
//!     .build()
//!     .await?;
//!
//! receiver.turn_on().await?;
//! receiver.set_volume_level(0.4).await?;
//! receiver.select_source("CD").await?;
//!
//! receiver.refresh().await;
//! println!("{} on {:?}", receiver.power_state(), receiver.current_source_name());
//! # Ok(())
//! # }
//! ```

mod builder;
mod poll;

pub use builder::ReceiverBuilder;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::{Command, MuteCommand, PowerCommand, SourceCommand, VolumeCommand};
use crate::error::{Error, ProtocolError};
use crate::features::Features;
use crate::protocol::{Connection, TcpConfig, TcpTransport, Transport};
#[cfg(feature = "serial")]
use crate::protocol::{SerialConfig, SerialTransport};
use crate::state::{DeviceState, StateChange};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::{PowerState, SourceTable, Volume};

/// Name given to receivers that were not named explicitly.
pub const DEFAULT_NAME: &str = "Music station";

/// An AV receiver controlled over its line protocol.
///
/// Cloning is cheap and clones share state, callbacks and transport.
pub struct Receiver<T: Transport> {
    name: Arc<str>,
    transport: Arc<T>,
    sources: SourceTable,
    state: Arc<RwLock<DeviceState>>,
    callbacks: Arc<CallbackRegistry>,
}

impl Receiver<TcpTransport> {
    /// Starts building a receiver reachable over TCP.
    ///
    /// `endpoint` is `host`, `host:port` or `socket://host:port`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the endpoint cannot be parsed.
    pub fn tcp(endpoint: &str) -> Result<ReceiverBuilder<TcpTransport>, ProtocolError> {
        Ok(Self::tcp_config(TcpConfig::parse(endpoint)?))
    }

    /// Starts building a receiver from a TCP configuration.
    #[must_use]
    pub fn tcp_config(config: TcpConfig) -> ReceiverBuilder<TcpTransport> {
        ReceiverBuilder::new(config.into_transport())
    }
}

#[cfg(feature = "serial")]
impl Receiver<SerialTransport> {
    /// Starts building a receiver wired to a local serial port, e.g.
    /// `/dev/ttyUSB0`, at 9600 baud.
    #[must_use]
    pub fn serial(path: &str) -> ReceiverBuilder<SerialTransport> {
        Self::serial_config(SerialConfig::new(path))
    }

    /// Starts building a receiver from a serial port configuration.
    #[must_use]
    pub fn serial_config(config: SerialConfig) -> ReceiverBuilder<SerialTransport> {
        ReceiverBuilder::new(config.into_transport())
    }
}

impl<T: Transport> Receiver<T> {
    /// Starts building a receiver on any transport.
    #[must_use]
    pub fn builder(transport: T) -> ReceiverBuilder<T> {
        ReceiverBuilder::new(transport)
    }

    pub(crate) fn new(name: String, transport: T, sources: SourceTable) -> Self {
        Self {
            name: name.into(),
            transport: Arc::new(transport),
            sources,
            state: Arc::new(RwLock::new(DeviceState::new())),
            callbacks: Arc::new(CallbackRegistry::new()),
        }
    }

    /// Returns the configured name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source table used for name lookups.
    #[must_use]
    pub fn source_table(&self) -> &SourceTable {
        &self.sources
    }

    /// Returns a snapshot of the last polled state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    // ========== Polling ==========

    /// Polls the receiver and replaces the stored state.
    ///
    /// Returns `false` if the receiver could not be reached or the
    /// connection failed mid-poll; the previous state is then kept
    /// unchanged. Registered callbacks are notified of every change after
    /// a successful poll.
    pub async fn refresh(&self) -> bool {
        let mut conn = match self.transport.open().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(
                    receiver = %self.name,
                    endpoint = %self.transport.endpoint(),
                    error = %e,
                    "Receiver unreachable, keeping previous state"
                );
                return false;
            }
        };

        let previous = self.state();
        let polled = poll::run(&mut conn, &previous, &self.sources).await;
        if let Err(e) = conn.close().await {
            tracing::debug!(receiver = %self.name, error = %e, "Failed to close connection");
        }

        let next = match polled {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(
                    receiver = %self.name,
                    error = %e,
                    "Poll aborted, keeping previous state"
                );
                return false;
            }
        };

        let changes = previous.diff(&next, &self.sources);
        *self.state.write() = next;
        for change in &changes {
            tracing::debug!(receiver = %self.name, change = %change, "State changed");
        }
        self.callbacks.dispatch_all(&changes);
        true
    }

    // ========== State Accessors ==========

    /// Returns the interpreted power state.
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        self.state.read().power_state()
    }

    /// Returns the master volume.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.state.read().volume()
    }

    /// Returns the master volume as a level in `[0, 1]`.
    #[must_use]
    pub fn volume_level(&self) -> f32 {
        self.state.read().volume_level()
    }

    /// Returns `true` if the output is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.state.read().is_muted()
    }

    /// Returns the name of the selected input, or `None` if its code is
    /// not in the source table.
    #[must_use]
    pub fn current_source_name(&self) -> Option<&'static str> {
        self.state.read().current_source_name(&self.sources)
    }

    /// Returns the now-playing text, or the input name outside media modes.
    #[must_use]
    pub fn media_text(&self) -> String {
        self.state.read().media_text().to_string()
    }

    /// Returns the features available with the selected input.
    #[must_use]
    pub fn supported_features(&self) -> Features {
        self.state.read().supported_features(&self.sources)
    }

    /// Returns every input name, sorted.
    #[must_use]
    pub fn all_available_sources(&self) -> Vec<&'static str> {
        self.sources.all_names()
    }

    // ========== Power Control ==========

    /// Turns the receiver on.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn turn_on(&self) -> Result<(), Error> {
        self.dispatch(&PowerCommand::On).await
    }

    /// Puts the receiver in standby.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn turn_off(&self) -> Result<(), Error> {
        self.dispatch(&PowerCommand::Standby).await
    }

    // ========== Volume Control ==========

    /// Sets the master volume from a level in `[0, 1]`.
    ///
    /// The level is rounded to the nearest native step. Levels outside
    /// `[0, 1]` are clamped.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn set_volume_level(&self, level: f32) -> Result<(), Error> {
        self.set_volume(Volume::from_level(level)).await
    }

    /// Sets the master volume in native steps.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn set_volume(&self, volume: Volume) -> Result<(), Error> {
        self.dispatch(&VolumeCommand::Set(volume)).await
    }

    /// Raises the volume by three steps from the last polled value.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn volume_up(&self) -> Result<(), Error> {
        self.set_volume(self.volume().stepped(Volume::STEP)).await
    }

    /// Lowers the volume by three steps from the last polled value.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn volume_down(&self) -> Result<(), Error> {
        self.set_volume(self.volume().stepped(-Volume::STEP)).await
    }

    /// Mutes or unmutes the output.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn mute_volume(&self, mute: bool) -> Result<(), Error> {
        self.dispatch(&MuteCommand::from(mute)).await
    }

    // ========== Source Control ==========

    /// Selects an input by name.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the name is not in the source
    /// table, in which case nothing is sent. Returns a protocol error if
    /// the command cannot be sent.
    pub async fn select_source(&self, name: &str) -> Result<(), Error> {
        let command = SourceCommand::by_name(&self.sources, name)?;
        self.dispatch(&command).await
    }

    // ========== Subscriptions ==========

    /// Registers a callback receiving every change seen by `refresh`.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    /// Registers a callback for power changes.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        self.callbacks.on_power_changed(callback)
    }

    /// Registers a callback for volume changes.
    pub fn on_volume_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Volume) + Send + Sync + 'static,
    {
        self.callbacks.on_volume_changed(callback)
    }

    /// Registers a callback for input changes.
    pub fn on_source_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        self.callbacks.on_source_changed(callback)
    }

    /// Unregisters a callback. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    // ========== Internal ==========

    /// Sends one command on a fresh connection.
    ///
    /// At most one reply line is drained and discarded so the receiver has
    /// processed the command before the socket closes.
    async fn dispatch<C: Command + Sync>(&self, command: &C) -> Result<(), Error> {
        let mut conn = self.transport.open().await?;

        let sent = conn.send(command).await;
        if sent.is_ok() {
            match conn.read_line().await {
                Ok(Some(line)) => tracing::trace!(line = %line, "Discarding reply"),
                Ok(None) => {}
                Err(e) => tracing::trace!(error = %e, "Reading reply failed"),
            }
        }

        if let Err(e) = conn.close().await {
            tracing::debug!(receiver = %self.name, error = %e, "Failed to close connection");
        }
        sent.map_err(Error::Protocol)
    }
}

impl<T: Transport> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            transport: Arc::clone(&self.transport),
            sources: self.sources,
            state: Arc::clone(&self.state),
            callbacks: Arc::clone(&self.callbacks),
        }
    }
}

impl<T: Transport> std::fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Receiver")
            .field("name", &self.name)
            .field("endpoint", &self.transport.endpoint())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
