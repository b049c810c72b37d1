// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `avrctl` Lib - A Rust library to control Denon AV receivers.
//!
//! This library provides an async API over the receiver's line-based
//! control protocol (AVR-3805 family), reachable through a raw TCP socket
//! or a local RS-232 port (`serial` feature, enabled by default).
//!
//! # Supported Features
//!
//! - **Power control**: Turn the receiver on or put it in standby
//! - **Volume control**: Absolute level, three-step up/down, mute
//! - **Input selection**: Select inputs by their human-readable name
//! - **Now playing**: Multi-line on-screen text for media-mode inputs
//! - **State polling**: Snapshot of power, volume, mute, input and text
//!
//! # Quick Start
//!
//! ```no_run
//! use avrctl_lib::Receiver;
//!
//! #[tokio::main]
//! async fn main() -> avrctl_lib::Result<()> {
//!     // Polls the receiver once; fails if it does not answer
//!     let receiver = Receiver::tcp("192.168.1.40")?
//!         .with_name("Living room")
//!         .build()
//!         .await?;
//!
//!     receiver.turn_on().await?;
//!     receiver.select_source("Tuner").await?;
//!
//!     // Mutations do not update the state; poll again to observe them
//!     receiver.refresh().await;
//!     println!("{}", receiver.media_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Callbacks on State Changes
//!
//! ```no_run
//! use avrctl_lib::Receiver;
//!
//! #[tokio::main]
//! async fn main() -> avrctl_lib::Result<()> {
//!     let receiver = Receiver::tcp("192.168.1.40")?.build_without_probe();
//!
//!     receiver.on_volume_changed(|volume| {
//!         println!("Volume is now {volume}");
//!     });
//!
//!     loop {
//!         receiver.refresh().await;
//!         tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!     }
//! }
//! ```

pub mod command;
mod device;
pub mod error;
mod features;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

pub use command::{
    Command, MuteCommand, NowPlayingCommand, PowerCommand, SourceCommand, VolumeCommand,
};
pub use device::{DEFAULT_NAME, Receiver, ReceiverBuilder};
pub use error::{DeviceError, Error, ProtocolError, Result, SourceError, ValueError};
pub use features::Features;
#[cfg(feature = "serial")]
pub use protocol::{SerialConfig, SerialTransport};
pub use protocol::{TcpConfig, TcpTransport};
pub use response::{
    MuteResponse, NowPlaying, PowerResponse, Reply, SourceResponse, VolumeResponse,
};
pub use state::{DeviceState, StateChange};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{PowerState, SourceTable, Volume};
