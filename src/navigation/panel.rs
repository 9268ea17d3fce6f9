//! Side panel exclusivity.
//!
//! At most one overlay panel is open at a time. The open panel is a single
//! tagged value, so "both open" is unrepresentable.

use serde::{Deserialize, Serialize};

/// The overlay panels the reader can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// Page list
    TableOfContents,
    /// Reading options
    Accessibility,
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Panel::TableOfContents => write!(f, "Table of Contents"),
            Panel::Accessibility => write!(f, "Accessibility"),
        }
    }
}

/// Which panel, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "open", content = "panel")]
pub enum PanelState {
    #[default]
    None,
    Open(Panel),
}

impl PanelState {
    /// Open `which`, or close it if it is already the open panel.
    pub fn toggle(&mut self, which: Panel) {
        *self = match *self {
            PanelState::Open(current) if current == which => PanelState::None,
            _ => PanelState::Open(which),
        };
    }

    /// Close whichever panel is open.
    pub fn close(&mut self) {
        *self = PanelState::None;
    }

    /// Close `which` if it is the open panel. Returns whether it was open.
    pub fn dismiss(&mut self, which: Panel) -> bool {
        if self.is_open(which) {
            *self = PanelState::None;
            true
        } else {
            false
        }
    }

    pub fn is_open(&self, which: Panel) -> bool {
        *self == PanelState::Open(which)
    }

    /// The open panel, if any.
    pub fn open_panel(&self) -> Option<Panel> {
        match self {
            PanelState::None => None,
            PanelState::Open(panel) => Some(*panel),
        }
    }
}
