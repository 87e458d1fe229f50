//! The preference-gated dispatcher.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use crate::effect::{VibrationAttributes, VibrationEffect, VibrationRequest};
use crate::settings::{HAPTIC_FEEDBACK_ENABLED, SettingObserver, SettingsStore, UserId};
use crate::{Executor, Vibrator};

/// Gates vibration requests behind the user's haptic-feedback preference
/// and hardware capability, then forwards them to a background executor.
///
/// The preference is cached and refreshed by a settings observer; hardware
/// capability is queried live on every call. The cached flag is read and
/// written with relaxed atomics: a delayed refresh only postpones when a
/// toggle takes effect by one notification, which is acceptable for a
/// settings switch.
pub struct HapticDispatcher {
    vibrator: Option<Arc<dyn Vibrator>>,
    executor: Arc<dyn Executor>,
    enabled: Arc<AtomicBool>,
}

impl HapticDispatcher {
    /// Wire a dispatcher to its collaborators.
    ///
    /// Subscribes to [`HAPTIC_FEEDBACK_ENABLED`] for the current user and
    /// performs one synchronous read to seed the cached preference before
    /// any request can be gated. `vibrator` is `None` on devices without a
    /// vibration service; the absence is treated as permanent.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        vibrator: Option<Arc<dyn Vibrator>>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        let enabled = Arc::new(AtomicBool::new(false));
        let observer = Arc::new(PreferenceObserver {
            settings: settings.clone(),
            enabled: enabled.clone(),
        });
        settings.subscribe(HAPTIC_FEEDBACK_ENABLED, observer.clone());
        observer.on_change(false);

        Self {
            vibrator,
            executor,
            enabled,
        }
    }

    /// Vibrate with a platform-predefined effect identifier.
    ///
    /// The identifier is resolved with no fallback substitution and
    /// classified as an assistance sonification.
    pub fn vibrate_effect_id(&self, effect_id: i32) {
        self.dispatch(VibrationRequest::ByEffectId { effect_id });
    }

    /// Vibrate on behalf of an identified caller, forwarding all fields
    /// verbatim.
    pub fn vibrate_with_identity(
        &self,
        uid: u32,
        package: impl Into<String>,
        effect: VibrationEffect,
        reason: impl Into<String>,
        attributes: VibrationAttributes,
    ) {
        self.dispatch(VibrationRequest::WithIdentity {
            uid,
            package: package.into(),
            effect,
            reason: reason.into(),
            attributes,
        });
    }

    /// Vibrate with an explicit effect and attribute classification.
    pub fn vibrate_with_attributes(
        &self,
        effect: VibrationEffect,
        attributes: VibrationAttributes,
    ) {
        self.dispatch(VibrationRequest::WithAttributes { effect, attributes });
    }

    /// Vibrate with a pre-built effect.
    pub fn vibrate(&self, effect: VibrationEffect) {
        self.dispatch(VibrationRequest::EffectOnly { effect });
    }

    /// Whether a vibration actuator is present.
    ///
    /// Never consults the haptic-feedback preference.
    #[must_use]
    pub fn has_vibrator(&self) -> bool {
        self.vibrator.as_ref().is_some_and(|v| v.has_vibrator())
    }

    /// Cancel any ongoing vibration. Gated like the vibrate variants.
    pub fn cancel(&self) {
        let Some(vibrator) = self.gate() else { return };
        self.executor.execute(Box::new(move || vibrator.cancel()));
    }

    fn dispatch(&self, request: VibrationRequest) {
        let Some(vibrator) = self.gate() else { return };
        self.executor
            .execute(Box::new(move || vibrator.vibrate(request)));
    }

    /// The shared gate: preference on, service present, actuator reported.
    /// Returns the service handle to move into the scheduled task.
    fn gate(&self) -> Option<Arc<dyn Vibrator>> {
        if !self.enabled.load(Ordering::Relaxed) {
            trace!("haptic feedback disabled, dropping request");
            return None;
        }
        let vibrator = self.vibrator.as_ref()?;
        if !vibrator.has_vibrator() {
            trace!("no vibration actuator, dropping request");
            return None;
        }
        Some(vibrator.clone())
    }
}

impl fmt::Debug for HapticDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HapticDispatcher")
            .field("service_present", &self.vibrator.is_some())
            .field("enabled", &self.enabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Re-reads the preference and overwrites the cached flag whenever the
/// store signals a change.
struct PreferenceObserver {
    settings: Arc<dyn SettingsStore>,
    enabled: Arc<AtomicBool>,
}

impl SettingObserver for PreferenceObserver {
    fn on_change(&self, _self_change: bool) {
        let value = self
            .settings
            .read_int(HAPTIC_FEEDBACK_ENABLED, 0, UserId::CURRENT);
        debug!("haptic feedback preference now {value}");
        self.enabled.store(value != 0, Ordering::Relaxed);
    }
}
