// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for receiver state changes.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::StateChange;
use crate::types::{PowerState, Volume};

/// Unique identifier for a subscription.
///
/// IDs are unique within a receiver's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type StateChangedCallback = Arc<dyn Fn(&StateChange) + Send + Sync>;
type PowerCallback = Arc<dyn Fn(PowerState) + Send + Sync>;
type VolumeCallback = Arc<dyn Fn(Volume) + Send + Sync>;
type SourceCallback = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// Registry of state change callbacks.
///
/// Thread-safe through `parking_lot::RwLock`. Callbacks are wrapped in
/// `Arc` and called outside the lock, so a callback may register or
/// unregister others.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    state_changed: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    power: RwLock<HashMap<SubscriptionId, PowerCallback>>,
    volume: RwLock<HashMap<SubscriptionId, VolumeCallback>>,
    source: RwLock<HashMap<SubscriptionId, SourceCallback>>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_changed: RwLock::new(HashMap::new()),
            power: RwLock::new(HashMap::new()),
            volume: RwLock::new(HashMap::new()),
            source: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a callback receiving every change.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for power changes.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.power.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for volume changes.
    pub fn on_volume_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Volume) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.volume.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for input changes.
    ///
    /// The callback receives the wire code and, if known, the input name.
    pub fn on_source_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.source.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state_changed.write().remove(&id).is_some()
            || self.power.write().remove(&id).is_some()
            || self.volume.write().remove(&id).is_some()
            || self.source.write().remove(&id).is_some()
    }

    /// Removes every callback.
    pub fn clear(&self) {
        self.state_changed.write().clear();
        self.power.write().clear();
        self.volume.write().clear();
        self.source.write().clear();
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state_changed.read().len()
            + self.power.read().len()
            + self.volume.read().len()
            + self.source.read().len()
    }

    /// Returns `true` if no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Calls every callback interested in `change`.
    pub fn dispatch(&self, change: &StateChange) {
        let generic: Vec<_> = self.state_changed.read().values().cloned().collect();
        for callback in generic {
            callback(change);
        }

        match change {
            StateChange::Power { state, .. } => {
                let callbacks: Vec<_> = self.power.read().values().cloned().collect();
                for callback in callbacks {
                    callback(*state);
                }
            }
            StateChange::Volume(volume) => {
                let callbacks: Vec<_> = self.volume.read().values().cloned().collect();
                for callback in callbacks {
                    callback(*volume);
                }
            }
            StateChange::Source { code, name } => {
                let callbacks: Vec<_> = self.source.read().values().cloned().collect();
                for callback in callbacks {
                    callback(code.as_str(), name.as_deref());
                }
            }
            StateChange::Muted(_) | StateChange::MediaText(_) => {}
        }
    }

    /// Dispatches several changes in order.
    pub fn dispatch_all(&self, changes: &[StateChange]) {
        for change in changes {
            self.dispatch(change);
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.len())
            .finish_non_exhaustive()
    }
}
