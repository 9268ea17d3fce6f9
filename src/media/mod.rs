//! Media Module
//!
//! Narration audio, the sign-language overlay and glossary term media.
//!
//! The session never plays anything itself. It sends [`MediaCommand`]s to a
//! [`MediaBackend`] and receives completions back as [`MediaEvent`]s. Every
//! play request carries a [`PlaybackToken`]; a completion whose token is no
//! longer the channel's current one is stale and ignored.

pub mod backend;
pub mod coordinator;
pub mod glossary;
pub mod player;
pub mod speed;

use crate::content::MediaSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export main types
pub use backend::{ChannelBackend, MediaBackend};
pub use coordinator::{MediaCoordinator, NarrationContinuation, NarrationState, VideoOverlayState};
pub use glossary::{GlossaryMediaCoordinator, GlossaryMediaState, TermAudioState};
pub use player::{PlayerConfig, SimulatedPlayer};
pub use speed::{PlaybackSpeed, MAX_PLAYBACK_SPEED, MIN_PLAYBACK_SPEED, PLAYBACK_SPEED_STEP};

/// Why a media request could not be honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Narration is not available on the glossary view
    OnGlossary,
    /// The current page has no narration audio
    NoNarrationAudio,
    /// The current page has no sign-language video
    NoSignVideo,
    /// The sign-language overlay is not shown
    OverlayHidden,
    /// Term media only plays on the glossary view
    NotOnGlossary,
    /// No glossary term with that id
    UnknownTerm,
    /// The term has no audio
    NoTermAudio,
    /// The term has no video
    NoTermVideo,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UnavailableReason::OnGlossary => "narration is not available in the glossary",
            UnavailableReason::NoNarrationAudio => "this page has no narration",
            UnavailableReason::NoSignVideo => "this page has no sign-language video",
            UnavailableReason::OverlayHidden => "the sign-language video is not shown",
            UnavailableReason::NotOnGlossary => "open the glossary to play term media",
            UnavailableReason::UnknownTerm => "no such glossary term",
            UnavailableReason::NoTermAudio => "this term has no audio",
            UnavailableReason::NoTermVideo => "this term has no video",
        };
        f.write_str(text)
    }
}

/// Media errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Media unavailable: {0}")]
    Unavailable(UnavailableReason),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Nothing loaded on {0}")]
    NotLoaded(MediaChannel),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// The independent playback channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaChannel {
    /// Page narration audio
    Narration,
    /// Page sign-language overlay
    SignVideo,
    /// Glossary term pronunciation
    TermAudio,
    /// Glossary term sign video
    TermVideo,
}

impl MediaChannel {
    pub const ALL: [MediaChannel; 4] = [
        MediaChannel::Narration,
        MediaChannel::SignVideo,
        MediaChannel::TermAudio,
        MediaChannel::TermVideo,
    ];
}

impl std::fmt::Display for MediaChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaChannel::Narration => write!(f, "narration"),
            MediaChannel::SignVideo => write!(f, "sign video"),
            MediaChannel::TermAudio => write!(f, "term audio"),
            MediaChannel::TermVideo => write!(f, "term video"),
        }
    }
}

/// Identifies one play request on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaybackToken(u64);

impl PlaybackToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues increasing playback tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn issue(&mut self) -> PlaybackToken {
        self.last += 1;
        PlaybackToken(self.last)
    }
}

/// Instruction for a media backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    /// Replace the channel's source. Position resets to zero, paused.
    Load {
        channel: MediaChannel,
        source: MediaSource,
        speed: PlaybackSpeed,
        muted: bool,
    },
    /// Start or resume playback; answered by `Started` or `Failed`.
    Play {
        channel: MediaChannel,
        token: PlaybackToken,
    },
    /// Pause, keeping the position
    Pause { channel: MediaChannel },
    /// Pause and rewind to zero
    Stop { channel: MediaChannel },
    /// Jump to an absolute position
    Seek {
        channel: MediaChannel,
        position_secs: f64,
    },
    /// Move relative to the current position, clamped to the clip
    SeekBy {
        channel: MediaChannel,
        delta_secs: f64,
    },
    /// Change the playback rate
    SetSpeed {
        channel: MediaChannel,
        speed: PlaybackSpeed,
    },
}

impl MediaCommand {
    pub fn channel(&self) -> MediaChannel {
        match self {
            MediaCommand::Load { channel, .. }
            | MediaCommand::Play { channel, .. }
            | MediaCommand::Pause { channel }
            | MediaCommand::Stop { channel }
            | MediaCommand::Seek { channel, .. }
            | MediaCommand::SeekBy { channel, .. }
            | MediaCommand::SetSpeed { channel, .. } => *channel,
        }
    }
}

/// What happened to a play request.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// The play request resolved and playback is running
    Started,
    /// The play request was rejected
    Failed(MediaError),
    /// Playback reached the end of the clip
    Ended,
}

/// Completion reported by a media backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub channel: MediaChannel,
    pub token: PlaybackToken,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn started(channel: MediaChannel, token: PlaybackToken) -> Self {
        Self {
            channel,
            token,
            kind: MediaEventKind::Started,
        }
    }

    pub fn failed(channel: MediaChannel, token: PlaybackToken, error: MediaError) -> Self {
        Self {
            channel,
            token,
            kind: MediaEventKind::Failed(error),
        }
    }

    pub fn ended(channel: MediaChannel, token: PlaybackToken) -> Self {
        Self {
            channel,
            token,
            kind: MediaEventKind::Ended,
        }
    }
}
