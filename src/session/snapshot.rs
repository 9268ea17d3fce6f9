//! Read-only view of a session for rendering.

use crate::accessibility::{GlossaryTypography, ReadingLayout};
use crate::content::{Glossary, Page};
use crate::media::{
    GlossaryMediaState, MediaChannel, MediaError, NarrationState, UnavailableReason,
    VideoOverlayState,
};
use crate::navigation::{PanelState, Progress, SessionPosition, TocEntry};
use serde::Serialize;

/// A transient, non-fatal message for the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SessionNotice {
    /// Narration could not be started or could not continue
    NarrationUnavailable { reason: UnavailableReason },
    /// The sign-language video could not be shown
    VideoUnavailable { reason: UnavailableReason },
    /// Glossary term media could not be played
    TermMediaUnavailable { reason: UnavailableReason },
    /// The player rejected a play request
    PlaybackFailed { channel: MediaChannel, message: String },
}

impl SessionNotice {
    /// Notice for a media error on a channel.
    pub fn from_error(channel: MediaChannel, error: MediaError) -> Self {
        match error {
            MediaError::Unavailable(reason) => match channel {
                MediaChannel::Narration => SessionNotice::NarrationUnavailable { reason },
                MediaChannel::SignVideo => SessionNotice::VideoUnavailable { reason },
                MediaChannel::TermAudio | MediaChannel::TermVideo => {
                    SessionNotice::TermMediaUnavailable { reason }
                }
            },
            other => SessionNotice::PlaybackFailed {
                channel,
                message: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for SessionNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionNotice::NarrationUnavailable { reason }
            | SessionNotice::VideoUnavailable { reason }
            | SessionNotice::TermMediaUnavailable { reason } => write!(f, "{}", reason),
            SessionNotice::PlaybackFailed { channel, message } => {
                write!(f, "{} could not play: {}", channel, message)
            }
        }
    }
}

/// Accessibility preferences as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityView {
    pub contrast_level: u8,
    pub theme_name: &'static str,
    /// Theme colours as `#rrggbb`
    pub background: String,
    pub text_colour: String,
    /// WCAG contrast ratio of the theme's text
    pub contrast_ratio: f32,
    /// `data-contrast` attribute value, absent at level 0
    pub contrast_attribute: Option<String>,
    pub text_size_px: u16,
    pub image_scale: f32,
    pub is_default_view: bool,
    pub layout: ReadingLayout,
    pub glossary_typography: GlossaryTypography,
}

/// Everything a presentation layer needs to draw the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub book_id: String,
    pub book_title: String,
    pub position: SessionPosition,
    /// The current page, absent on the glossary
    pub page: Option<Page>,
    /// The glossary, present only on the glossary view
    pub glossary: Option<Glossary>,
    pub progress: Progress,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub table_of_contents: Vec<TocEntry>,
    pub narration: NarrationState,
    pub video: VideoOverlayState,
    pub glossary_media: GlossaryMediaState,
    pub panel: PanelState,
    pub accessibility: AccessibilityView,
    pub notice: Option<SessionNotice>,
}
