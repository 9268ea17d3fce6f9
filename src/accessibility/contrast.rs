//! Contrast themes.
//!
//! Five fixed themes selected by contrast level. Levels 1 and 2 meet WCAG
//! AAA (7:1) for body text.

use super::ContrastLevel;
use serde::Serialize;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Relative luminance.
    /// https://www.w3.org/TR/WCAG21/#dfn-relative-luminance
    pub fn relative_luminance(self) -> f32 {
        let r = linearize(self.0 as f32 / 255.0);
        let g = linearize(self.1 as f32 / 255.0);
        let b = linearize(self.2 as f32 / 255.0);

        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

fn linearize(value: f32) -> f32 {
    if value <= 0.03928 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Contrast ratio between two colours, from 1 to 21.
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f32 {
    let fg_lum = fg.relative_luminance();
    let bg_lum = bg.relative_luminance();

    let (lighter, darker) = if fg_lum > bg_lum {
        (fg_lum, bg_lum)
    } else {
        (bg_lum, fg_lum)
    };

    (lighter + 0.05) / (darker + 0.05)
}

/// A named colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContrastTheme {
    pub level: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub background: Rgb,
    pub text: Rgb,
}

impl ContrastTheme {
    /// Text against background, rounded to two decimals.
    pub fn contrast_ratio(&self) -> f32 {
        (contrast_ratio(self.text, self.background) * 100.0).round() / 100.0
    }
}

/// Themes indexed by contrast level.
pub const CONTRAST_THEMES: [ContrastTheme; 5] = [
    ContrastTheme {
        level: 0,
        name: "Normal",
        description: "Standard colours",
        background: Rgb::WHITE,
        text: Rgb(0x25, 0x63, 0xeb),
    },
    ContrastTheme {
        level: 1,
        name: "High Contrast Yellow",
        description: "Yellow background with black text",
        background: Rgb(0xea, 0xb3, 0x08),
        text: Rgb::BLACK,
    },
    ContrastTheme {
        level: 2,
        name: "High Contrast Black",
        description: "Black background with white text",
        background: Rgb::BLACK,
        text: Rgb::WHITE,
    },
    ContrastTheme {
        level: 3,
        name: "Grey Contrast",
        description: "Grey background with white text",
        background: Rgb(0x6b, 0x72, 0x80),
        text: Rgb::WHITE,
    },
    ContrastTheme {
        level: 4,
        name: "Green Contrast",
        description: "Green background with white text",
        background: Rgb(0x4a, 0xde, 0x80),
        text: Rgb::WHITE,
    },
];

impl ContrastLevel {
    /// The theme for this level.
    pub fn theme(self) -> &'static ContrastTheme {
        &CONTRAST_THEMES[usize::from(self.value())]
    }

    /// Value for the document-level `data-contrast` attribute; absent at
    /// level 0.
    pub fn document_attribute(self) -> Option<String> {
        match self.value() {
            0 => None,
            level => Some(level.to_string()),
        }
    }
}
