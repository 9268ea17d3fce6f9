//! Glossary term media.
//!
//! Term audio is pessimistic: a term only counts as playing once the backend
//! confirms it. At most one term plays audio and at most one shows video.

use super::{
    MediaBackend, MediaChannel, MediaCommand, MediaError, MediaEvent, MediaEventKind,
    PlaybackSpeed, PlaybackToken, TokenSource, UnavailableReason,
};
use crate::content::{Glossary, TermId};
use serde::Serialize;

/// Term audio as the reader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "term")]
pub enum TermAudioState {
    #[default]
    Idle,
    /// Requested, not yet confirmed
    Pending(TermId),
    /// Confirmed playing
    Playing(TermId),
}

impl TermAudioState {
    /// The term whose audio is pending or playing.
    pub fn term(&self) -> Option<TermId> {
        match self {
            TermAudioState::Idle => None,
            TermAudioState::Pending(id) | TermAudioState::Playing(id) => Some(*id),
        }
    }

    pub fn is_playing(&self, id: TermId) -> bool {
        *self == TermAudioState::Playing(id)
    }
}

/// Glossary media as the reader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GlossaryMediaState {
    pub audio: TermAudioState,
    /// Term whose sign video is shown
    pub video: Option<TermId>,
}

/// Drives the term audio and term video channels.
#[derive(Debug, Clone, Default)]
pub struct GlossaryMediaCoordinator {
    state: GlossaryMediaState,
    audio_token: Option<PlaybackToken>,
    video_token: Option<PlaybackToken>,
    tokens: TokenSource,
}

impl GlossaryMediaCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GlossaryMediaState {
        self.state
    }

    /// Play a term's audio, or stop it if that term is already active.
    /// Returns whether a play request was issued.
    pub fn toggle_term_audio(
        &mut self,
        glossary: &Glossary,
        term: TermId,
        speed: PlaybackSpeed,
        backend: &mut impl MediaBackend,
    ) -> Result<bool, MediaError> {
        let active = self.state.audio.term();
        self.stop_audio(backend);

        if active == Some(term) {
            tracing::debug!("Term {} audio stopped", term);
            return Ok(false);
        }

        let entry = glossary
            .term(term)
            .ok_or(MediaError::Unavailable(UnavailableReason::UnknownTerm))?;
        let source = entry
            .audio
            .as_ref()
            .ok_or(MediaError::Unavailable(UnavailableReason::NoTermAudio))?;

        backend.submit(MediaCommand::Load {
            channel: MediaChannel::TermAudio,
            source: source.clone(),
            speed,
            muted: false,
        });
        let token = self.tokens.issue();
        backend.submit(MediaCommand::Play {
            channel: MediaChannel::TermAudio,
            token,
        });

        self.audio_token = Some(token);
        self.state.audio = TermAudioState::Pending(term);
        tracing::debug!("Term {} audio requested", entry.word);
        Ok(true)
    }

    /// Show a term's sign video, or hide it if that term is already shown.
    /// Returns whether a video is now shown.
    pub fn toggle_term_video(
        &mut self,
        glossary: &Glossary,
        term: TermId,
        backend: &mut impl MediaBackend,
    ) -> Result<bool, MediaError> {
        let shown = self.state.video;
        self.stop_video(backend);

        if shown == Some(term) {
            return Ok(false);
        }

        let entry = glossary
            .term(term)
            .ok_or(MediaError::Unavailable(UnavailableReason::UnknownTerm))?;
        let source = entry
            .video
            .as_ref()
            .ok_or(MediaError::Unavailable(UnavailableReason::NoTermVideo))?;

        // Term videos autoplay without sound
        backend.submit(MediaCommand::Load {
            channel: MediaChannel::TermVideo,
            source: source.clone(),
            speed: PlaybackSpeed::default(),
            muted: true,
        });
        let token = self.tokens.issue();
        backend.submit(MediaCommand::Play {
            channel: MediaChannel::TermVideo,
            token,
        });

        self.video_token = Some(token);
        self.state.video = Some(term);
        Ok(true)
    }

    /// Retune active term audio to a new speed.
    pub fn set_speed(&mut self, speed: PlaybackSpeed, backend: &mut impl MediaBackend) {
        if self.state.audio != TermAudioState::Idle {
            backend.submit(MediaCommand::SetSpeed {
                channel: MediaChannel::TermAudio,
                speed,
            });
        }
    }

    /// Stop all term media, e.g. when the reader leaves the glossary.
    pub fn reset(&mut self, backend: &mut impl MediaBackend) {
        self.stop_audio(backend);
        self.stop_video(backend);
    }

    /// Apply a completion on a term channel. Returns the error to surface.
    pub fn handle_event(&mut self, event: &MediaEvent) -> Option<MediaError> {
        match event.channel {
            MediaChannel::TermAudio => {
                if self.audio_token != Some(event.token) {
                    tracing::debug!("Ignoring stale term audio event {:?}", event.kind);
                    return None;
                }
                match &event.kind {
                    MediaEventKind::Started => {
                        if let TermAudioState::Pending(term) = self.state.audio {
                            self.state.audio = TermAudioState::Playing(term);
                        }
                        None
                    }
                    MediaEventKind::Failed(error) => {
                        tracing::warn!("Term audio failed: {}", error);
                        self.state.audio = TermAudioState::Idle;
                        self.audio_token = None;
                        Some(error.clone())
                    }
                    MediaEventKind::Ended => {
                        self.state.audio = TermAudioState::Idle;
                        self.audio_token = None;
                        None
                    }
                }
            }
            MediaChannel::TermVideo => {
                if self.video_token != Some(event.token) {
                    tracing::debug!("Ignoring stale term video event {:?}", event.kind);
                    return None;
                }
                match &event.kind {
                    MediaEventKind::Failed(error) => {
                        tracing::warn!("Term video failed: {}", error);
                        self.state.video = None;
                        self.video_token = None;
                        Some(error.clone())
                    }
                    // An ended term video stays on screen
                    MediaEventKind::Started | MediaEventKind::Ended => None,
                }
            }
            MediaChannel::Narration | MediaChannel::SignVideo => None,
        }
    }

    fn stop_audio(&mut self, backend: &mut impl MediaBackend) {
        if self.state.audio != TermAudioState::Idle {
            backend.submit(MediaCommand::Stop {
                channel: MediaChannel::TermAudio,
            });
        }
        self.state.audio = TermAudioState::Idle;
        self.audio_token = None;
    }

    fn stop_video(&mut self, backend: &mut impl MediaBackend) {
        if self.state.video.is_some() {
            backend.submit(MediaCommand::Stop {
                channel: MediaChannel::TermVideo,
            });
        }
        self.state.video = None;
        self.video_token = None;
    }
}
