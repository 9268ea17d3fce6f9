//! Commands a presentation layer sends to a reading session.

use crate::accessibility::AccessibilityPatch;
use crate::content::TermId;
use crate::navigation::{NavAction, Panel};
use serde::{Deserialize, Serialize};

/// Direction of a narration skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Every user-level operation on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "arg")]
pub enum SessionCommand {
    Navigate(NavAction),
    /// Pick a page from the table of contents
    SelectPage(i64),
    /// Pick the glossary from the table of contents
    SelectGlossary,
    ToggleNarration,
    SkipNarration(SkipDirection),
    SetSpeed(f32),
    ToggleVideo,
    ToggleVideoExpanded,
    ToggleVideoPlayback,
    SetAccessibility(AccessibilityPatch),
    /// Restore the unzoomed illustration
    ResetView,
    TogglePanel(Panel),
    ClosePanel,
    ToggleTermAudio(TermId),
    ToggleTermVideo(TermId),
}
