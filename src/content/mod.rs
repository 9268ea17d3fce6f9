//! Book Content Module
//!
//! Read-only model of a picture book: ordered pages, optional glossary,
//! and the descriptor format they are loaded from.

pub mod descriptor;
pub mod provider;

use serde::Serialize;
use thiserror::Error;

// Re-export main types
pub use descriptor::BookDescriptor;
pub use provider::{ContentProvider, FileContentProvider, StaticContentProvider};

/// Identifier of a book page as given by the descriptor.
pub type PageId = u32;

/// Identifier of a glossary term as given by the descriptor.
pub type TermId = u32;

/// Errors that can occur while loading book content.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid content descriptor: {0}")]
    Parse(String),

    #[error("Book has no pages: {0}")]
    NoPages(String),
}

/// A playable resource, with an optional alternative encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    /// Preferred reference
    pub primary: String,
    /// Tried when the primary cannot be played
    pub fallback: Option<String>,
}

impl MediaSource {
    /// Create a source with a single reference.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: None,
        }
    }

    /// Add a fallback reference.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Build a source from two optional references, keeping whichever exist.
    pub fn from_pair(primary: Option<String>, fallback: Option<String>) -> Option<Self> {
        let primary = primary.filter(|r| !r.trim().is_empty());
        let fallback = fallback.filter(|r| !r.trim().is_empty());
        match (primary, fallback) {
            (Some(primary), fallback) => Some(Self { primary, fallback }),
            (None, Some(only)) => Some(Self::new(only)),
            (None, None) => None,
        }
    }

    /// References in the order a player should try them.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallback.as_deref())
    }
}

/// Where the narration text sits on top of the page image.
///
/// Offsets are CSS length strings (e.g. `"10%"`). Missing offsets fall back
/// to the reader's standard placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct TextAnchor {
    pub top: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
}

impl TextAnchor {
    pub const DEFAULT_TOP: &'static str = "10%";
    pub const DEFAULT_LEFT: &'static str = "5%";
    pub const DEFAULT_RIGHT: &'static str = "5%";
    pub const DEFAULT_BOTTOM: &'static str = "auto";

    /// Offsets with defaults filled in, as `(top, left, right, bottom)`.
    pub fn resolved(&self) -> (&str, &str, &str, &str) {
        (
            self.top.as_deref().unwrap_or(Self::DEFAULT_TOP),
            self.left.as_deref().unwrap_or(Self::DEFAULT_LEFT),
            self.right.as_deref().unwrap_or(Self::DEFAULT_RIGHT),
            self.bottom.as_deref().unwrap_or(Self::DEFAULT_BOTTOM),
        )
    }
}

/// A single book page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Descriptor id
    pub id: PageId,
    /// Title shown in the table of contents
    pub title: String,
    /// Page illustration
    pub image_ref: String,
    /// Narration text, one entry per displayed line
    pub narration_lines: Vec<String>,
    /// Narration audio
    pub audio: Option<MediaSource>,
    /// Sign-language video (webm primary, mp4 fallback)
    pub video: Option<MediaSource>,
    /// Text placement hint
    pub text_anchor: TextAnchor,
    /// Text background colour hint
    pub text_background: Option<String>,
}

impl Page {
    /// Whether this page can be narrated.
    pub fn has_narration(&self) -> bool {
        self.audio.is_some()
    }

    /// Whether this page has a sign-language video.
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }
}

/// A glossary term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlossaryEntry {
    pub id: TermId,
    pub word: String,
    pub definition: String,
    pub pictogram_ref: String,
    pub audio: Option<MediaSource>,
    pub video: Option<MediaSource>,
}

/// The glossary appended after the last page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glossary {
    pub title: String,
    pub terms: Vec<GlossaryEntry>,
}

impl Glossary {
    /// Look up a term by id.
    pub fn term(&self, id: TermId) -> Option<&GlossaryEntry> {
        self.terms.iter().find(|t| t.id == id)
    }
}

/// Descriptive book metadata, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookMetadata {
    pub author: Option<String>,
    pub illustrator: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub age_range: Option<String>,
}

/// A loaded book. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookContent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub metadata: BookMetadata,
    pages: Vec<Page>,
    glossary: Option<Glossary>,
}

impl BookContent {
    /// Create a book. Fails if there are no pages.
    ///
    /// A glossary without terms is dropped, so it never becomes an
    /// addressable position.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        pages: Vec<Page>,
        glossary: Option<Glossary>,
    ) -> Result<Self, ContentLoadError> {
        let id = id.into();
        if pages.is_empty() {
            return Err(ContentLoadError::NoPages(id));
        }
        Ok(Self {
            id,
            title: title.into(),
            description: None,
            metadata: BookMetadata::default(),
            pages,
            glossary: glossary.filter(|g| !g.terms.is_empty()),
        })
    }

    /// Attach descriptive metadata.
    pub fn with_metadata(mut self, description: Option<String>, metadata: BookMetadata) -> Self {
        self.description = description;
        self.metadata = metadata;
        self
    }

    /// All pages in reading order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of real pages (never zero).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at the given index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// The glossary, if the book has one.
    pub fn glossary(&self) -> Option<&Glossary> {
        self.glossary.as_ref()
    }

    pub fn has_glossary(&self) -> bool {
        self.glossary.is_some()
    }
}
