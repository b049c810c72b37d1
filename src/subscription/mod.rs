// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callbacks for state changes observed by polling.
//!
//! The receiver never pushes updates. After each successful
//! [`refresh`](crate::Receiver::refresh) the new state is compared with
//! the previous one and every [`StateChange`](crate::state::StateChange)
//! is delivered to the registered callbacks.
//!
//! ```no_run
//! use avrctl_lib::Receiver;
//!
//! # async fn example() -> avrctl_lib::Result<()> {
//! let receiver = Receiver::tcp("192.168.1.40")?.build().await?;
//!
//! let sub_id = receiver.on_state_changed(|change| {
//!     println!("{change}");
//! });
//!
//! receiver.refresh().await;
//! receiver.unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
