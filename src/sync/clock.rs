//! Shared-clock contract between cooperating display processes.
//!
//! One participant is the time authority: it publishes the `started` flag and
//! the loop-relative frame time every tick. Followers read those values back
//! so every display shows the same instant. The transport that moves values
//! between processes lives outside this crate; [`SharedStore`] is the
//! in-process stand-in used by single-machine runs and tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Key of the shared start flag, published as `0.0` / `1.0`.
pub const STARTED_KEY: &str = "started";
/// Key of the shared loop-relative frame time, in seconds.
pub const FRAME_TIME_KEY: &str = "frameTime";

pub trait SharedClock {
    /// Latest value published under `key`, if any.
    fn get_shared_f64(&self, key: &str) -> Option<f64>;
    fn set_shared_f64(&mut self, key: &str, value: f64);
    fn is_time_authority(&self) -> bool;
    /// Monotonic local time in seconds from an arbitrary origin.
    fn local_monotonic_seconds(&self) -> f64;
}

impl<C: SharedClock + ?Sized> SharedClock for &mut C {
    fn get_shared_f64(&self, key: &str) -> Option<f64> {
        (**self).get_shared_f64(key)
    }

    fn set_shared_f64(&mut self, key: &str, value: f64) {
        (**self).set_shared_f64(key, value);
    }

    fn is_time_authority(&self) -> bool {
        (**self).is_time_authority()
    }

    fn local_monotonic_seconds(&self) -> f64 {
        (**self).local_monotonic_seconds()
    }
}

/// Authority publishes `local` and keeps it; a follower adopts the published
/// value, or `fallback` when nothing has been published yet.
pub fn exchange_f64(clock: &mut dyn SharedClock, key: &str, local: f64, fallback: f64) -> f64 {
    if clock.is_time_authority() {
        clock.set_shared_f64(key, local);
        local
    } else {
        clock.get_shared_f64(key).unwrap_or(fallback)
    }
}

/// Key/value table shared by every participant attached to it.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    values: Arc<Mutex<BTreeMap<String, f64>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    pub fn set(&self, key: &str, value: f64) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// Wall-clock participant backed by [`Instant`].
#[derive(Clone, Debug)]
pub struct LocalClock {
    origin: Instant,
    store: SharedStore,
    authority: bool,
}

impl LocalClock {
    /// A lone display: its own authority with a private store.
    pub fn standalone() -> Self {
        Self::attached(SharedStore::new(), true)
    }

    pub fn attached(store: SharedStore, authority: bool) -> Self {
        Self {
            origin: Instant::now(),
            store,
            authority,
        }
    }
}

impl SharedClock for LocalClock {
    fn get_shared_f64(&self, key: &str) -> Option<f64> {
        self.store.get(key)
    }

    fn set_shared_f64(&mut self, key: &str, value: f64) {
        self.store.set(key, value);
    }

    fn is_time_authority(&self) -> bool {
        self.authority
    }

    fn local_monotonic_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Participant whose local time only moves when told to.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: f64,
    store: SharedStore,
    authority: bool,
}

impl ManualClock {
    pub fn authority(store: SharedStore) -> Self {
        Self {
            now: 0.0,
            store,
            authority: true,
        }
    }

    pub fn follower(store: SharedStore) -> Self {
        Self {
            now: 0.0,
            store,
            authority: false,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn set_now(&mut self, secs: f64) {
        self.now = secs;
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }
}

impl SharedClock for ManualClock {
    fn get_shared_f64(&self, key: &str) -> Option<f64> {
        self.store.get(key)
    }

    fn set_shared_f64(&mut self, key: &str, value: f64) {
        self.store.set(key, value);
    }

    fn is_time_authority(&self) -> bool {
        self.authority
    }

    fn local_monotonic_seconds(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/clock.rs"]
mod tests;
