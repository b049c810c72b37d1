// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for receiver control.
//!
//! # Types
//!
//! - [`PowerState`] - Off/On/Unknown as interpreted from the power token
//! - [`Volume`] - Raw master volume step (0-80)
//! - [`SourceTable`] - Input names and their wire codes

mod power;
mod source;
mod volume;

pub use power::PowerState;
pub use source::{MEDIA_MODE_INPUTS, NORMAL_INPUTS, SourceTable};
pub use volume::Volume;
