//! Vibration effects, their policy classification, and the request shapes
//! the dispatcher forwards to the platform service.

/// An opaque description of a vibration pattern recognized by the platform
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationEffect {
    /// A platform-predefined effect looked up by identifier.
    Predefined {
        /// Platform effect identifier.
        id: i32,
        /// Whether the platform may substitute a generic pattern when the
        /// hardware does not support this identifier.
        fallback: bool,
    },
    /// A single vibration of fixed length and strength.
    OneShot {
        /// Duration in milliseconds.
        duration_ms: u64,
        /// Amplitude, 1 (weakest) to 255 (strongest).
        amplitude: u8,
    },
    /// A timed amplitude pattern.
    Waveform {
        /// Segment durations in milliseconds.
        timings_ms: Vec<u64>,
        /// Amplitude per segment, same length as `timings_ms`.
        amplitudes: Vec<u8>,
        /// Segment index to repeat from, or `None` to play once.
        repeat: Option<usize>,
    },
}

impl VibrationEffect {
    /// A predefined effect with no fallback substitution.
    #[must_use]
    pub const fn predefined(id: i32) -> Self {
        Self::Predefined { id, fallback: false }
    }
}

/// What a vibration is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    /// Touch or key-press feedback.
    Touch,
    /// Feedback accompanying an assistance sonification, such as status-bar
    /// gestures.
    AssistanceSonification,
    /// Notification vibration.
    Notification,
    /// Alarm vibration.
    Alarm,
    /// Ringtone vibration.
    Ringtone,
    /// Accessibility feedback.
    Accessibility,
}

/// What a vibration accompanies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Unclassified.
    Unknown,
    /// Accompanies speech.
    Speech,
    /// Accompanies music.
    Music,
    /// Accompanies a short system sound.
    Sonification,
}

/// Classification tag the platform uses to apply volume and policy rules to
/// a vibration, analogous to audio stream classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VibrationAttributes {
    /// What the vibration is for.
    pub usage: Usage,
    /// What the vibration accompanies.
    pub content_type: ContentType,
}

impl VibrationAttributes {
    /// The fixed profile applied to effect-id dispatches: a sonification
    /// accompanying assistance feedback.
    #[must_use]
    pub const fn sonification() -> Self {
        Self {
            usage: Usage::AssistanceSonification,
            content_type: ContentType::Sonification,
        }
    }
}

/// A vibration request, one of the four shapes callers can dispatch.
///
/// Immutable once built; the dispatcher forwards it verbatim and does not
/// retain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationRequest {
    /// A platform effect identifier alone.
    ByEffectId {
        /// Platform effect identifier.
        effect_id: i32,
    },
    /// A fully-specified request carrying the caller's identity.
    WithIdentity {
        /// Calling uid.
        uid: u32,
        /// Calling package name.
        package: String,
        /// Effect to play.
        effect: VibrationEffect,
        /// Human-readable reason, for attribution.
        reason: String,
        /// Policy classification.
        attributes: VibrationAttributes,
    },
    /// An effect paired with explicit attributes.
    WithAttributes {
        /// Effect to play.
        effect: VibrationEffect,
        /// Policy classification.
        attributes: VibrationAttributes,
    },
    /// A pre-built effect alone.
    EffectOnly {
        /// Effect to play.
        effect: VibrationEffect,
    },
}

impl VibrationRequest {
    /// The effect the platform call should play.
    ///
    /// `ByEffectId` resolves to the predefined effect with no fallback
    /// substitution.
    #[must_use]
    pub fn effect(&self) -> VibrationEffect {
        match self {
            Self::ByEffectId { effect_id } => VibrationEffect::predefined(*effect_id),
            Self::WithIdentity { effect, .. }
            | Self::WithAttributes { effect, .. }
            | Self::EffectOnly { effect } => effect.clone(),
        }
    }

    /// The attributes the platform call should carry, if the shape defines
    /// any.
    ///
    /// `ByEffectId` always carries the fixed sonification/assistance
    /// profile.
    #[must_use]
    pub fn attributes(&self) -> Option<VibrationAttributes> {
        match self {
            Self::ByEffectId { .. } => Some(VibrationAttributes::sonification()),
            Self::WithIdentity { attributes, .. } | Self::WithAttributes { attributes, .. } => {
                Some(*attributes)
            }
            Self::EffectOnly { .. } => None,
        }
    }
}
