//! Narration and sign-language overlay coordination.
//!
//! Keeps the observable narration and overlay state consistent with what the
//! backend has been told, across page changes and late completions.

use super::{
    MediaBackend, MediaChannel, MediaCommand, MediaError, MediaEvent, MediaEventKind,
    PlaybackSpeed, PlaybackToken, TokenSource, UnavailableReason,
};
use crate::content::Page;
use crate::navigation::SessionPosition;
use serde::Serialize;

/// Default narration skip distance in seconds.
pub const DEFAULT_SKIP_SECONDS: f64 = 5.0;

/// Narration as the reader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NarrationState {
    /// Narration is switched on. Stays on after a clip ends.
    pub on: bool,
    /// Playback speed for narration and term audio
    pub speed: PlaybackSpeed,
}

impl Default for NarrationState {
    fn default() -> Self {
        Self {
            on: false,
            speed: PlaybackSpeed::default(),
        }
    }
}

/// Sign-language overlay as the reader sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VideoOverlayState {
    /// Overlay is shown
    pub visible: bool,
    /// Video is running
    pub playing: bool,
    /// Overlay is enlarged
    pub expanded: bool,
}

/// What happened to narration when the position changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationContinuation {
    /// Narration was off and stays off
    Idle,
    /// Narration continues with the new page's audio
    Resumed,
    /// Narration was switched off because the new position cannot be narrated
    Stopped(UnavailableReason),
}

/// Drives the narration and sign-video channels.
#[derive(Debug, Clone)]
pub struct MediaCoordinator {
    narration: NarrationState,
    overlay: VideoOverlayState,
    /// Current narration play request
    narration_token: Option<PlaybackToken>,
    /// Current sign-video play request
    video_token: Option<PlaybackToken>,
    /// Page whose narration is loaded on the backend
    loaded_narration: Option<usize>,
    tokens: TokenSource,
    skip_seconds: f64,
}

impl Default for MediaCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_SECONDS)
    }
}

impl MediaCoordinator {
    pub fn new(skip_seconds: f64) -> Self {
        Self {
            narration: NarrationState::default(),
            overlay: VideoOverlayState::default(),
            narration_token: None,
            video_token: None,
            loaded_narration: None,
            tokens: TokenSource::default(),
            skip_seconds: skip_seconds.abs(),
        }
    }

    pub fn narration(&self) -> NarrationState {
        self.narration
    }

    pub fn overlay(&self) -> VideoOverlayState {
        self.overlay
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.narration.speed
    }

    /// Switch narration on or off for the current position.
    ///
    /// Turning on is optimistic: `on` is set as soon as the play request is
    /// issued and reverted if the backend rejects it. Returns the new `on`.
    pub fn toggle_narration(
        &mut self,
        position: SessionPosition,
        page: Option<&Page>,
        backend: &mut impl MediaBackend,
    ) -> Result<bool, MediaError> {
        if self.narration.on {
            backend.submit(MediaCommand::Pause {
                channel: MediaChannel::Narration,
            });
            self.narration.on = false;
            self.narration_token = None;
            tracing::info!("Narration paused");
            return Ok(false);
        }

        let index = position
            .page_index()
            .ok_or(MediaError::Unavailable(UnavailableReason::OnGlossary))?;
        let page = page.ok_or(MediaError::Unavailable(UnavailableReason::NoNarrationAudio))?;

        self.start_narration(index, page, backend)?;
        tracing::info!("Narration started on page {}", index + 1);
        Ok(true)
    }

    /// Reconcile media with a position change.
    ///
    /// The overlay is always reset. Narration that was on follows the reader
    /// to the new page, or switches off if the new position has no audio.
    pub fn on_position_changed(
        &mut self,
        to: SessionPosition,
        page: Option<&Page>,
        backend: &mut impl MediaBackend,
    ) -> NarrationContinuation {
        self.deactivate_video(backend);

        if self.loaded_narration.take().is_some() {
            backend.submit(MediaCommand::Stop {
                channel: MediaChannel::Narration,
            });
        }
        self.narration_token = None;

        if !self.narration.on {
            return NarrationContinuation::Idle;
        }

        let result = match (to.page_index(), page) {
            (None, _) => Err(MediaError::Unavailable(UnavailableReason::OnGlossary)),
            (Some(_), None) => Err(MediaError::Unavailable(UnavailableReason::NoNarrationAudio)),
            (Some(index), Some(page)) => self.start_narration(index, page, backend),
        };

        match result {
            Ok(()) => NarrationContinuation::Resumed,
            Err(MediaError::Unavailable(reason)) => {
                self.narration.on = false;
                tracing::info!("Narration switched off: {}", reason);
                NarrationContinuation::Stopped(reason)
            }
            Err(e) => {
                self.narration.on = false;
                tracing::warn!("Narration could not continue: {}", e);
                NarrationContinuation::Stopped(UnavailableReason::NoNarrationAudio)
            }
        }
    }

    /// Set the narration speed, applying it to loaded narration.
    pub fn set_speed(&mut self, speed: f32, backend: &mut impl MediaBackend) -> PlaybackSpeed {
        let speed = PlaybackSpeed::new(speed);
        self.narration.speed = speed;
        if self.loaded_narration.is_some() {
            backend.submit(MediaCommand::SetSpeed {
                channel: MediaChannel::Narration,
                speed,
            });
        }
        tracing::debug!("Narration speed set to {}", speed);
        speed
    }

    /// Skip loaded narration forwards or backwards. Returns false if there
    /// is nothing loaded to skip in.
    pub fn skip_narration(&mut self, forward: bool, backend: &mut impl MediaBackend) -> bool {
        if self.loaded_narration.is_none() {
            return false;
        }
        let delta_secs = if forward {
            self.skip_seconds
        } else {
            -self.skip_seconds
        };
        backend.submit(MediaCommand::SeekBy {
            channel: MediaChannel::Narration,
            delta_secs,
        });
        true
    }

    /// Show or hide the sign-language overlay. Returns the new visibility.
    pub fn toggle_video(
        &mut self,
        page: Option<&Page>,
        backend: &mut impl MediaBackend,
    ) -> Result<bool, MediaError> {
        if self.overlay.visible {
            self.deactivate_video(backend);
            return Ok(false);
        }
        self.activate_video(page, backend)?;
        Ok(true)
    }

    /// Show the overlay and start its video from the beginning.
    pub fn activate_video(
        &mut self,
        page: Option<&Page>,
        backend: &mut impl MediaBackend,
    ) -> Result<(), MediaError> {
        let source = page
            .and_then(|p| p.video.as_ref())
            .ok_or(MediaError::Unavailable(UnavailableReason::NoSignVideo))?;

        backend.submit(MediaCommand::Load {
            channel: MediaChannel::SignVideo,
            source: source.clone(),
            speed: PlaybackSpeed::default(),
            muted: false,
        });
        let token = self.tokens.issue();
        backend.submit(MediaCommand::Play {
            channel: MediaChannel::SignVideo,
            token,
        });

        self.video_token = Some(token);
        self.overlay = VideoOverlayState {
            visible: true,
            playing: true,
            expanded: false,
        };
        tracing::info!("Sign-language video shown");
        Ok(())
    }

    /// Hide the overlay and stop its video.
    pub fn deactivate_video(&mut self, backend: &mut impl MediaBackend) {
        if self.overlay.visible {
            backend.submit(MediaCommand::Stop {
                channel: MediaChannel::SignVideo,
            });
            tracing::debug!("Sign-language video hidden");
        }
        self.overlay = VideoOverlayState::default();
        self.video_token = None;
    }

    /// Pause or replay the overlay video. Returns whether it is now playing.
    pub fn toggle_video_playback(
        &mut self,
        backend: &mut impl MediaBackend,
    ) -> Result<bool, MediaError> {
        if !self.overlay.visible {
            return Err(MediaError::Unavailable(UnavailableReason::OverlayHidden));
        }

        if self.overlay.playing {
            backend.submit(MediaCommand::Pause {
                channel: MediaChannel::SignVideo,
            });
            self.overlay.playing = false;
            self.video_token = None;
            return Ok(false);
        }

        let token = self.tokens.issue();
        backend.submit(MediaCommand::Play {
            channel: MediaChannel::SignVideo,
            token,
        });
        self.video_token = Some(token);
        self.overlay.playing = true;
        Ok(true)
    }

    /// Enlarge or shrink the overlay. Returns the new expanded flag.
    pub fn toggle_video_expanded(&mut self) -> bool {
        if self.overlay.visible {
            self.overlay.expanded = !self.overlay.expanded;
        }
        self.overlay.expanded
    }

    /// Apply a completion on the narration or sign-video channel.
    ///
    /// Stale completions are ignored. Returns the error to surface, if any.
    pub fn handle_event(
        &mut self,
        event: &MediaEvent,
        backend: &mut impl MediaBackend,
    ) -> Option<MediaError> {
        match event.channel {
            MediaChannel::Narration => self.handle_narration_event(event),
            MediaChannel::SignVideo => self.handle_video_event(event, backend),
            MediaChannel::TermAudio | MediaChannel::TermVideo => None,
        }
    }

    fn handle_narration_event(&mut self, event: &MediaEvent) -> Option<MediaError> {
        if self.narration_token != Some(event.token) {
            tracing::debug!("Ignoring stale narration event {:?}", event.kind);
            return None;
        }

        match &event.kind {
            MediaEventKind::Started => None,
            MediaEventKind::Failed(error) => {
                tracing::warn!("Narration failed: {}", error);
                self.narration.on = false;
                self.narration_token = None;
                Some(error.clone())
            }
            MediaEventKind::Ended => {
                // Narration stays armed; the next page picks it up
                tracing::debug!("Narration clip ended");
                self.narration_token = None;
                None
            }
        }
    }

    fn handle_video_event(
        &mut self,
        event: &MediaEvent,
        backend: &mut impl MediaBackend,
    ) -> Option<MediaError> {
        if self.video_token != Some(event.token) {
            tracing::debug!("Ignoring stale sign video event {:?}", event.kind);
            return None;
        }

        match &event.kind {
            MediaEventKind::Started => None,
            MediaEventKind::Failed(error) => {
                tracing::warn!("Sign-language video failed: {}", error);
                self.overlay.playing = false;
                self.video_token = None;
                Some(error.clone())
            }
            MediaEventKind::Ended => {
                backend.submit(MediaCommand::Seek {
                    channel: MediaChannel::SignVideo,
                    position_secs: 0.0,
                });
                self.overlay.playing = false;
                self.video_token = None;
                None
            }
        }
    }

    fn start_narration(
        &mut self,
        index: usize,
        page: &Page,
        backend: &mut impl MediaBackend,
    ) -> Result<(), MediaError> {
        let source = page
            .audio
            .as_ref()
            .ok_or(MediaError::Unavailable(UnavailableReason::NoNarrationAudio))?;

        if self.loaded_narration != Some(index) {
            backend.submit(MediaCommand::Load {
                channel: MediaChannel::Narration,
                source: source.clone(),
                speed: self.narration.speed,
                muted: false,
            });
            self.loaded_narration = Some(index);
        }

        let token = self.tokens.issue();
        backend.submit(MediaCommand::Play {
            channel: MediaChannel::Narration,
            token,
        });
        self.narration_token = Some(token);
        self.narration.on = true;
        Ok(())
    }
}
