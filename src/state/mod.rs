// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] is the last polled picture of the receiver. It is only
//! ever replaced as a whole by a successful poll. [`StateChange`] describes
//! how one poll result differs from the previous one.
//!
//! # Examples
//!
//! ```
//! use avrctl_lib::state::DeviceState;
//! use avrctl_lib::types::{PowerState, SourceTable};
//!
//! let state = DeviceState::new();
//! assert_eq!(state.power_state(), PowerState::Off);
//! assert_eq!(state.volume_level(), 0.0);
//! assert_eq!(state.current_source_name(&SourceTable::default()), None);
//! ```

mod device_state;
mod state_change;

pub use device_state::DeviceState;
pub use state_change::StateChange;
