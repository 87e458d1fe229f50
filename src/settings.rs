//! The settings seam: well-known keys, user scoping, the store and observer
//! traits, and an in-process store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A well-known settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingKey(pub &'static str);

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The user preference governing whether any haptic feedback is produced.
pub const HAPTIC_FEEDBACK_ENABLED: SettingKey = SettingKey("haptic_feedback_enabled");

/// A user scope for settings reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i32);

impl UserId {
    /// The user the calling process is currently running as.
    pub const CURRENT: Self = Self(-2);
}

/// Receives change notifications for a subscribed key.
///
/// Invoked on whatever thread the store delivers notifications from; the
/// callback must not block.
pub trait SettingObserver: Send + Sync {
    /// A subscribed key changed. `self_change` is true when the write came
    /// from the observer's own component.
    fn on_change(&self, self_change: bool);
}

/// Read and subscribe access to integer-valued settings.
pub trait SettingsStore: Send + Sync {
    /// Read `key` for `user`, or `default` if the key is unset.
    fn read_int(&self, key: SettingKey, default: i32, user: UserId) -> i32;

    /// Register `observer` for change notifications on `key`.
    fn subscribe(&self, key: SettingKey, observer: Arc<dyn SettingObserver>);
}

/// An in-process [`SettingsStore`].
///
/// Writes notify that key's subscribers synchronously on the writer's
/// thread.
#[derive(Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<(SettingKey, UserId), i32>>,
    observers: Mutex<HashMap<SettingKey, Vec<Arc<dyn SettingObserver>>>>,
}

impl MemorySettings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `key` for `user` and notify that key's subscribers.
    pub fn set_int(&self, key: SettingKey, value: i32, user: UserId) {
        self.values
            .lock()
            .expect("settings mutex poisoned")
            .insert((key, user), value);

        let observers = {
            let map = self.observers.lock().expect("observer mutex poisoned");
            map.get(&key).cloned().unwrap_or_default()
        };
        for observer in observers {
            observer.on_change(false);
        }
    }
}

impl fmt::Debug for MemorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.lock().expect("settings mutex poisoned");
        f.debug_struct("MemorySettings")
            .field("values", &*values)
            .finish_non_exhaustive()
    }
}

impl SettingsStore for MemorySettings {
    fn read_int(&self, key: SettingKey, default: i32, user: UserId) -> i32 {
        self.values
            .lock()
            .expect("settings mutex poisoned")
            .get(&(key, user))
            .copied()
            .unwrap_or(default)
    }

    fn subscribe(&self, key: SettingKey, observer: Arc<dyn SettingObserver>) {
        self.observers
            .lock()
            .expect("observer mutex poisoned")
            .entry(key)
            .or_default()
            .push(observer);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingObserver(AtomicUsize);

    impl SettingObserver for CountingObserver {
        fn on_change(&self, _self_change: bool) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn unset_key_reads_default() {
        let store = MemorySettings::new();
        assert_eq!(store.read_int(HAPTIC_FEEDBACK_ENABLED, 0, UserId::CURRENT), 0);
        assert_eq!(store.read_int(HAPTIC_FEEDBACK_ENABLED, 7, UserId::CURRENT), 7);
    }

    #[test]
    fn writes_are_scoped_per_user() {
        let store = MemorySettings::new();
        store.set_int(HAPTIC_FEEDBACK_ENABLED, 1, UserId(10));
        assert_eq!(store.read_int(HAPTIC_FEEDBACK_ENABLED, 0, UserId(10)), 1);
        assert_eq!(store.read_int(HAPTIC_FEEDBACK_ENABLED, 0, UserId::CURRENT), 0);
    }

    #[test]
    fn write_notifies_subscribers_of_that_key() {
        let store = MemorySettings::new();
        let observer = Arc::new(CountingObserver(AtomicUsize::new(0)));
        store.subscribe(HAPTIC_FEEDBACK_ENABLED, observer.clone());

        store.set_int(HAPTIC_FEEDBACK_ENABLED, 1, UserId::CURRENT);
        store.set_int(SettingKey("screen_brightness"), 50, UserId::CURRENT);

        assert_eq!(observer.0.load(Ordering::SeqCst), 1);
    }
}
