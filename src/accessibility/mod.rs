//! Accessibility module.
//!
//! Reading preferences for a session: contrast theme, text size and
//! illustration zoom. Preferences live only as long as the session.

pub mod contrast;
pub mod settings;

use serde::Serialize;

// Re-export primary types
pub use contrast::{ContrastTheme, Rgb, CONTRAST_THEMES};
pub use settings::{AccessibilityPatch, ContrastLevel, ImageScale, TextSize};

/// How the page is laid out, selected by the image scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLayout {
    /// Centred page at its natural size
    Fixed,
    /// Scrollable, zoomed illustration
    Zoomed,
}

/// Glossary font sizes derived from the body text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlossaryTypography {
    pub title_px: u16,
    pub word_px: u16,
    pub definition_px: u16,
    pub footer_px: u16,
}

impl GlossaryTypography {
    pub fn for_text_size(text_size: TextSize) -> Self {
        let t = text_size.px();
        Self {
            title_px: (t + 4).max(28),
            word_px: t.saturating_sub(4).max(18),
            definition_px: t.saturating_sub(8).max(16),
            footer_px: t.saturating_sub(12).max(14),
        }
    }
}

/// The reader's accessibility preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessibilitySettings {
    pub contrast: ContrastLevel,
    pub text_size: TextSize,
    pub image_scale: ImageScale,
}

impl AccessibilitySettings {
    /// Apply the display fields of a patch. Narration speed is not handled
    /// here.
    pub fn apply(&mut self, patch: &AccessibilityPatch) {
        if let Some(level) = patch.contrast_level {
            self.contrast = ContrastLevel::new(level);
        }
        if let Some(px) = patch.text_size_px {
            self.text_size = TextSize::new(px);
        }
        if let Some(scale) = patch.image_scale {
            self.image_scale = ImageScale::new(scale);
        }
        tracing::debug!(
            "Accessibility: contrast {}, text {}px, scale {:.1}",
            self.contrast.value(),
            self.text_size.px(),
            self.image_scale.value()
        );
    }

    /// Restore the unzoomed view. Contrast and text size are kept.
    pub fn reset_to_default(&mut self) {
        self.image_scale = ImageScale::default();
    }

    /// Whether the illustration is unzoomed.
    pub fn is_default_view(&self) -> bool {
        self.image_scale.is_default()
    }

    pub fn layout(&self) -> ReadingLayout {
        if self.is_default_view() {
            ReadingLayout::Fixed
        } else {
            ReadingLayout::Zoomed
        }
    }

    pub fn theme(&self) -> &'static ContrastTheme {
        self.contrast.theme()
    }

    pub fn glossary_typography(&self) -> GlossaryTypography {
        GlossaryTypography::for_text_size(self.text_size)
    }
}
