//! Playback speed for narration and term audio.
//!
//! Speeds are kept within 0.5x–2.0x and move in 0.1x steps.

use serde::{Deserialize, Serialize};

/// Slowest allowed playback speed.
pub const MIN_PLAYBACK_SPEED: f32 = 0.5;
/// Fastest allowed playback speed.
pub const MAX_PLAYBACK_SPEED: f32 = 2.0;
/// Increment used by the speed buttons.
pub const PLAYBACK_SPEED_STEP: f32 = 0.1;

/// Playback speed, guaranteed to be within 0.5x–2.0x.
///
/// ```
/// use storyreader::media::PlaybackSpeed;
///
/// assert_eq!(PlaybackSpeed::new(3.0).value(), 2.0);
/// assert_eq!(PlaybackSpeed::new(0.1).value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "f32", from = "f32")]
pub struct PlaybackSpeed(f32);

impl PlaybackSpeed {
    /// Creates a speed, clamping to the valid range. Non-finite input
    /// gives normal speed.
    #[must_use]
    pub fn new(speed: f32) -> Self {
        if !speed.is_finite() {
            return Self::default();
        }
        Self(speed.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// One step faster, rounded to the step grid.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(snap(self.0 + PLAYBACK_SPEED_STEP))
    }

    /// One step slower, rounded to the step grid.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(snap(self.0 - PLAYBACK_SPEED_STEP))
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_PLAYBACK_SPEED
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_PLAYBACK_SPEED
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f32> for PlaybackSpeed {
    fn from(speed: f32) -> Self {
        Self::new(speed)
    }
}

impl From<PlaybackSpeed> for f32 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.0
    }
}

impl std::fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}×", self.0)
    }
}

fn snap(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
