//! Preference-gated dispatch for platform vibration services.
//!
//! This crate sits between code that wants haptic feedback and the host
//! platform's vibration service. It caches the user's haptic-feedback
//! preference, checks hardware capability on every call, and hands passing
//! requests off to a background executor. Callers never block and never
//! learn whether a request was skipped: a disabled preference or absent
//! hardware is a silent no-op, not an error.
//!
//! The vibration service, the settings store, and the executor are
//! collaborators injected at construction, so a composition root can wire
//! [`HapticDispatcher`] to whatever platform services it owns.

#![warn(missing_docs)]

mod dispatcher;
mod effect;
pub mod settings;

pub use dispatcher::HapticDispatcher;
pub use effect::{ContentType, Usage, VibrationAttributes, VibrationEffect, VibrationRequest};
pub use settings::{
    HAPTIC_FEEDBACK_ENABLED, MemorySettings, SettingKey, SettingObserver, SettingsStore, UserId,
};

/// A unit of work handed to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send>;

/// Background execution context for platform calls.
///
/// Submission is fire-and-forget: no handle is returned, and ordering and
/// fairness among submitted tasks are the executor's contract, not the
/// dispatcher's.
pub trait Executor: Send + Sync {
    /// Submit a task for asynchronous execution.
    fn execute(&self, task: Task);
}

impl<F> Executor for F
where
    F: Fn(Task) + Send + Sync,
{
    fn execute(&self, task: Task) {
        self(task);
    }
}

/// Handle to a platform vibration service.
///
/// The service may be absent entirely on devices without an actuator;
/// [`HapticDispatcher`] models that as `None` and treats the absence as
/// permanent.
pub trait Vibrator: Send + Sync {
    /// Whether a vibration actuator is present.
    ///
    /// Queried live on every dispatched call, never cached.
    fn has_vibrator(&self) -> bool;

    /// Perform the vibration described by `request`.
    fn vibrate(&self, request: VibrationRequest);

    /// Cancel any ongoing vibration.
    fn cancel(&self);
}
