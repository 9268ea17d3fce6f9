//! Reading Session Module
//!
//! Owns one reader's session over one book: position, panels, media and
//! accessibility preferences. All input arrives as [`SessionCommand`]s or
//! media completions; all output is a [`SessionSnapshot`] plus the commands
//! sent to the media backend.

pub mod command;
pub mod runtime;
pub mod snapshot;

use crate::accessibility::{AccessibilityPatch, AccessibilitySettings};
use crate::content::{BookContent, ContentLoadError, ContentProvider, Glossary, Page, TermId};
use crate::media::{
    GlossaryMediaCoordinator, GlossaryMediaState, MediaBackend, MediaChannel, MediaCoordinator,
    MediaError, MediaEvent, NarrationContinuation, NarrationState, PlaybackSpeed,
    UnavailableReason, VideoOverlayState,
};
use crate::navigation::{Move, NavAction, Navigator, Panel, PanelState, SessionPosition, TocEntry};
use std::sync::Arc;

pub use command::{SessionCommand, SkipDirection};
pub use runtime::{SessionError, SessionHandle};
pub use snapshot::{AccessibilityView, SessionNotice, SessionSnapshot};

/// A reader's session over a single book.
pub struct ReadingSession<B: MediaBackend> {
    book: Arc<BookContent>,
    navigator: Navigator,
    media: MediaCoordinator,
    glossary_media: GlossaryMediaCoordinator,
    accessibility: AccessibilitySettings,
    /// Cleared by the next user command
    notice: Option<SessionNotice>,
    backend: B,
}

impl<B: MediaBackend> ReadingSession<B> {
    /// Start a session at the first page with default preferences.
    pub fn new(book: impl Into<Arc<BookContent>>, backend: B) -> Self {
        let book = book.into();
        tracing::info!(
            "Opening '{}' ({} pages, glossary: {})",
            book.title,
            book.page_count(),
            book.has_glossary()
        );
        Self {
            navigator: Navigator::for_book(&book),
            book,
            media: MediaCoordinator::default(),
            glossary_media: GlossaryMediaCoordinator::new(),
            accessibility: AccessibilitySettings::default(),
            notice: None,
            backend,
        }
    }

    /// Load a book through a provider and start a session on it.
    pub async fn open<P: ContentProvider>(
        provider: &P,
        book_id: &str,
        backend: B,
    ) -> Result<Self, ContentLoadError> {
        let book = provider.load(book_id).await?;
        Ok(Self::new(book, backend))
    }

    /// Set how far a narration skip moves, in seconds.
    pub fn with_skip_seconds(mut self, seconds: f64) -> Self {
        self.media = MediaCoordinator::new(seconds);
        self
    }

    pub fn book(&self) -> &BookContent {
        &self.book
    }

    pub fn position(&self) -> SessionPosition {
        self.navigator.position()
    }

    pub fn current_page(&self) -> Option<&Page> {
        page_at(&self.book, self.navigator.position())
    }

    pub fn narration(&self) -> NarrationState {
        self.media.narration()
    }

    pub fn video(&self) -> VideoOverlayState {
        self.media.overlay()
    }

    pub fn glossary_media(&self) -> GlossaryMediaState {
        self.glossary_media.state()
    }

    pub fn panel(&self) -> PanelState {
        self.navigator.panel()
    }

    pub fn accessibility(&self) -> &AccessibilitySettings {
        &self.accessibility
    }

    pub fn notice(&self) -> Option<&SessionNotice> {
        self.notice.as_ref()
    }

    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        self.navigator.table_of_contents(&self.book)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Apply a user command.
    pub fn apply(&mut self, command: SessionCommand) {
        tracing::debug!("Command: {:?}", command);
        match command {
            SessionCommand::Navigate(action) => {
                self.navigate(action);
            }
            SessionCommand::SelectPage(index) => {
                self.select_page_from_index(index);
            }
            SessionCommand::SelectGlossary => {
                self.select_glossary();
            }
            SessionCommand::ToggleNarration => {
                self.toggle_narration();
            }
            SessionCommand::SkipNarration(direction) => {
                self.skip_narration(direction);
            }
            SessionCommand::SetSpeed(speed) => {
                self.set_speed(speed);
            }
            SessionCommand::ToggleVideo => {
                self.toggle_video();
            }
            SessionCommand::ToggleVideoExpanded => {
                self.toggle_video_expanded();
            }
            SessionCommand::ToggleVideoPlayback => {
                self.toggle_video_playback();
            }
            SessionCommand::SetAccessibility(patch) => self.set_accessibility(patch),
            SessionCommand::ResetView => self.reset_view(),
            SessionCommand::TogglePanel(which) => self.toggle_panel(which),
            SessionCommand::ClosePanel => self.close_panel(),
            SessionCommand::ToggleTermAudio(term) => {
                self.toggle_term_audio(term);
            }
            SessionCommand::ToggleTermVideo(term) => {
                self.toggle_term_video(term);
            }
        }
    }

    /// Navigate. Returns whether the position changed.
    pub fn navigate(&mut self, action: NavAction) -> bool {
        self.notice = None;
        self.transition(|nav| nav.apply(action))
    }

    /// Jump to a page picked from the table of contents, closing it.
    pub fn select_page_from_index(&mut self, index: i64) -> bool {
        self.notice = None;
        self.transition(|nav| nav.go_to(index))
    }

    /// Jump to the glossary picked from the table of contents, closing it.
    pub fn select_glossary(&mut self) -> bool {
        self.notice = None;
        let moved = self.transition(Navigator::open_glossary);
        self.navigator.dismiss_panel(Panel::TableOfContents);
        moved
    }

    /// Switch narration on or off. Returns whether narration is now on.
    pub fn toggle_narration(&mut self) -> bool {
        self.notice = None;
        let book = Arc::clone(&self.book);
        let position = self.navigator.position();
        let result =
            self.media
                .toggle_narration(position, page_at(&book, position), &mut self.backend);
        self.settle(MediaChannel::Narration, result).unwrap_or(false)
    }

    /// Skip narration. Returns false when nothing is loaded.
    pub fn skip_narration(&mut self, direction: SkipDirection) -> bool {
        self.notice = None;
        self.media
            .skip_narration(direction == SkipDirection::Forward, &mut self.backend)
    }

    /// Set narration and term audio speed, clamped to 0.5–2.0.
    pub fn set_speed(&mut self, speed: f32) -> PlaybackSpeed {
        self.notice = None;
        self.apply_speed(speed)
    }

    /// Show or hide the sign-language overlay. Returns whether it is shown.
    pub fn toggle_video(&mut self) -> bool {
        self.notice = None;
        let book = Arc::clone(&self.book);
        let page = page_at(&book, self.navigator.position());
        let result = self.media.toggle_video(page, &mut self.backend);
        self.settle(MediaChannel::SignVideo, result).unwrap_or(false)
    }

    pub fn toggle_video_expanded(&mut self) -> bool {
        self.notice = None;
        self.media.toggle_video_expanded()
    }

    /// Pause or replay the overlay video. Returns whether it is playing.
    pub fn toggle_video_playback(&mut self) -> bool {
        self.notice = None;
        let result = self.media.toggle_video_playback(&mut self.backend);
        self.settle(MediaChannel::SignVideo, result).unwrap_or(false)
    }

    /// Update accessibility preferences. A narration speed in the patch is
    /// forwarded to the media coordinator.
    pub fn set_accessibility(&mut self, patch: AccessibilityPatch) {
        self.notice = None;
        self.accessibility.apply(&patch);
        if let Some(speed) = patch.narration_speed {
            self.apply_speed(speed);
        }
    }

    /// Restore the unzoomed illustration.
    pub fn reset_view(&mut self) {
        self.notice = None;
        self.accessibility.reset_to_default();
    }

    pub fn toggle_panel(&mut self, which: Panel) {
        self.notice = None;
        self.navigator.toggle_panel(which);
    }

    pub fn close_panel(&mut self) {
        self.notice = None;
        self.navigator.close_panel();
    }

    /// Play or stop a glossary term's audio. Only effective on the glossary.
    pub fn toggle_term_audio(&mut self, term: TermId) -> bool {
        self.notice = None;
        let book = Arc::clone(&self.book);
        let speed = self.media.speed();
        let result = glossary_in_view(&book, self.navigator.position()).and_then(|glossary| {
            self.glossary_media
                .toggle_term_audio(glossary, term, speed, &mut self.backend)
        });
        self.settle(MediaChannel::TermAudio, result).unwrap_or(false)
    }

    /// Show or hide a glossary term's video. Only effective on the glossary.
    pub fn toggle_term_video(&mut self, term: TermId) -> bool {
        self.notice = None;
        let book = Arc::clone(&self.book);
        let result = glossary_in_view(&book, self.navigator.position()).and_then(|glossary| {
            self.glossary_media
                .toggle_term_video(glossary, term, &mut self.backend)
        });
        self.settle(MediaChannel::TermVideo, result).unwrap_or(false)
    }

    /// Route a backend completion to the coordinator that owns its channel.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        let failure = match event.channel {
            MediaChannel::Narration | MediaChannel::SignVideo => {
                self.media.handle_event(&event, &mut self.backend)
            }
            MediaChannel::TermAudio | MediaChannel::TermVideo => {
                self.glossary_media.handle_event(&event)
            }
        };
        if let Some(error) = failure {
            self.notice = Some(SessionNotice::from_error(event.channel, error));
        }
    }

    /// Current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let settings = &self.accessibility;
        SessionSnapshot {
            book_id: self.book.id.clone(),
            book_title: self.book.title.clone(),
            position: self.navigator.position(),
            page: self.current_page().cloned(),
            glossary: glossary_in_view(&self.book, self.navigator.position())
                .ok()
                .cloned(),
            progress: self.navigator.progress(),
            can_go_previous: self.navigator.can_go_previous(),
            can_go_next: self.navigator.can_go_next(),
            table_of_contents: self.table_of_contents(),
            narration: self.media.narration(),
            video: self.media.overlay(),
            glossary_media: self.glossary_media.state(),
            panel: self.navigator.panel(),
            accessibility: AccessibilityView {
                contrast_level: settings.contrast.value(),
                theme_name: settings.theme().name,
                background: settings.theme().background.hex(),
                text_colour: settings.theme().text.hex(),
                contrast_ratio: settings.theme().contrast_ratio(),
                contrast_attribute: settings.contrast.document_attribute(),
                text_size_px: settings.text_size.px(),
                image_scale: settings.image_scale.value(),
                is_default_view: settings.is_default_view(),
                layout: settings.layout(),
                glossary_typography: settings.glossary_typography(),
            },
            notice: self.notice.clone(),
        }
    }

    /// The single place a position change happens. Position, media and
    /// glossary media are reconciled together.
    fn transition(&mut self, step: impl FnOnce(&mut Navigator) -> Option<Move>) -> bool {
        let Some(mv) = step(&mut self.navigator) else {
            return false;
        };

        let book = Arc::clone(&self.book);
        let page = page_at(&book, mv.to);
        if let NarrationContinuation::Stopped(reason) =
            self.media.on_position_changed(mv.to, page, &mut self.backend)
        {
            self.notice = Some(SessionNotice::NarrationUnavailable { reason });
        }

        if mv.from.is_glossary() {
            self.glossary_media.reset(&mut self.backend);
        }

        tracing::info!("Now at {}", self.navigator.progress());
        true
    }

    fn apply_speed(&mut self, speed: f32) -> PlaybackSpeed {
        let speed = self.media.set_speed(speed, &mut self.backend);
        self.glossary_media.set_speed(speed, &mut self.backend);
        speed
    }

    /// Turn a soft media error into a notice.
    fn settle<T>(&mut self, channel: MediaChannel, result: Result<T, MediaError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::info!("{} request not honoured: {}", channel, error);
                self.notice = Some(SessionNotice::from_error(channel, error));
                None
            }
        }
    }
}

fn page_at(book: &BookContent, position: SessionPosition) -> Option<&Page> {
    position.page_index().and_then(|index| book.page(index))
}

/// The glossary, if the reader is looking at it.
fn glossary_in_view(book: &BookContent, position: SessionPosition) -> Result<&Glossary, MediaError> {
    if !position.is_glossary() {
        return Err(MediaError::Unavailable(UnavailableReason::NotOnGlossary));
    }
    book.glossary()
        .ok_or(MediaError::Unavailable(UnavailableReason::NotOnGlossary))
}
