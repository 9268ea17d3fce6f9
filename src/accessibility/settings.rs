//! Range-checked reading preferences.

use serde::{Deserialize, Serialize};

/// Contrast theme selector, 0 (normal) to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ContrastLevel(u8);

impl ContrastLevel {
    pub const MAX: u8 = 4;

    pub fn new(level: i32) -> Self {
        Self(level.clamp(0, i32::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Body text size in pixels, 24 to 48 in steps of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TextSize(u16);

impl TextSize {
    pub const MIN: u16 = 24;
    pub const MAX: u16 = 48;
    pub const STEP: u16 = 2;

    /// Clamp into range and snap to the nearest step (ties round up).
    pub fn new(px: i32) -> Self {
        let min = i32::from(Self::MIN);
        let max = i32::from(Self::MAX);
        let step = i32::from(Self::STEP);
        let clamped = px.clamp(min, max);
        let snapped = min + ((clamped - min + step / 2) / step) * step;
        Self(snapped.min(max) as u16)
    }

    pub fn px(self) -> u16 {
        self.0
    }

    pub fn increase(self) -> Self {
        Self::new(i32::from(self.0 + Self::STEP))
    }

    pub fn decrease(self) -> Self {
        Self::new(i32::from(self.0) - i32::from(Self::STEP))
    }
}

impl Default for TextSize {
    fn default() -> Self {
        Self(32)
    }
}

/// Illustration zoom, 0.5 to 2.0 in steps of 0.1.
///
/// Stored in tenths so that "exactly 1.0" is an integer comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "f32")]
pub struct ImageScale(u8);

impl ImageScale {
    const MIN_TENTHS: u8 = 5;
    const MAX_TENTHS: u8 = 20;
    const DEFAULT_TENTHS: u8 = 10;

    /// Clamp into range and snap to the nearest tenth. Non-finite input
    /// gives the default scale.
    pub fn new(scale: f32) -> Self {
        if !scale.is_finite() {
            return Self::default();
        }
        let tenths = (scale * 10.0).round().clamp(
            f32::from(Self::MIN_TENTHS),
            f32::from(Self::MAX_TENTHS),
        );
        Self(tenths as u8)
    }

    pub fn value(self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// Whether this is the unzoomed scale.
    pub fn is_default(self) -> bool {
        self.0 == Self::DEFAULT_TENTHS
    }

    pub fn increase(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX_TENTHS))
    }

    pub fn decrease(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN_TENTHS))
    }
}

impl Default for ImageScale {
    fn default() -> Self {
        Self(Self::DEFAULT_TENTHS)
    }
}

impl From<ImageScale> for f32 {
    fn from(scale: ImageScale) -> Self {
        scale.value()
    }
}

/// Partial update of the reading preferences. Absent fields are unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityPatch {
    pub contrast_level: Option<i32>,
    pub text_size_px: Option<i32>,
    pub image_scale: Option<f32>,
    /// Forwarded to the media coordinator
    pub narration_speed: Option<f32>,
}

impl AccessibilityPatch {
    pub fn contrast_level(level: i32) -> Self {
        Self {
            contrast_level: Some(level),
            ..Self::default()
        }
    }

    pub fn text_size_px(px: i32) -> Self {
        Self {
            text_size_px: Some(px),
            ..Self::default()
        }
    }

    pub fn image_scale(scale: f32) -> Self {
        Self {
            image_scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn narration_speed(speed: f32) -> Self {
        Self {
            narration_speed: Some(speed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
