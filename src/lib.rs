//! StoryReader - Accessible Picture Book Reader
//!
//! Reading session controller for narrated picture books with sign-language
//! video, a glossary of terms and per-session accessibility preferences.
//! Presentation is left to the caller: it sends commands and renders
//! snapshots.

pub mod accessibility;
pub mod content;
pub mod media;
pub mod navigation;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use accessibility::{AccessibilityPatch, AccessibilitySettings};
pub use content::{BookContent, ContentLoadError, ContentProvider, FileContentProvider};
pub use media::{MediaBackend, MediaCommand, MediaEvent, PlaybackSpeed};
pub use navigation::{NavAction, Panel, PanelState, SessionPosition};
pub use session::{ReadingSession, SessionCommand, SessionHandle, SessionNotice, SessionSnapshot};
pub use storage::config::AppConfig;
