//! Content descriptor format.
//!
//! Books are published as JSON documents with camelCase field names.
//! These types mirror that document; [`BookDescriptor::into_book`] turns it
//! into the immutable [`BookContent`] the session works with.

use super::{
    BookContent, BookMetadata, ContentLoadError, Glossary, GlossaryEntry, MediaSource, Page,
    PageId, TermId, TextAnchor,
};
use serde::Deserialize;

/// Top-level book document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDescriptor {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<MetadataDescriptor>,
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
    #[serde(default)]
    pub glossary: Option<GlossaryDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDescriptor {
    pub author: Option<String>,
    pub illustrator: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub age_range: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub id: PageId,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub text_position: Option<TextAnchor>,
    #[serde(default)]
    pub text_bg_color: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub video_webm_url: Option<String>,
    #[serde(default)]
    pub video_mp4_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryDescriptor {
    pub title: String,
    #[serde(default)]
    pub terms: Vec<TermDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDescriptor {
    pub id: TermId,
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub pictogram: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl BookDescriptor {
    /// Parse a descriptor from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ContentLoadError> {
        serde_json::from_str(json).map_err(|e| ContentLoadError::Parse(e.to_string()))
    }

    /// Convert into book content.
    ///
    /// `fallback_id` is used when the document does not carry its own id.
    pub fn into_book(self, fallback_id: &str) -> Result<BookContent, ContentLoadError> {
        let id = if self.id.is_empty() {
            fallback_id.to_string()
        } else {
            self.id
        };

        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| page.into_page(index))
            .collect();

        let glossary = self.glossary.map(|g| Glossary {
            title: g.title,
            terms: g.terms.into_iter().map(TermDescriptor::into_entry).collect(),
        });

        let metadata = self.metadata.unwrap_or_default();
        let metadata = BookMetadata {
            author: metadata.author,
            illustrator: metadata.illustrator,
            language: metadata.language,
            category: metadata.category,
            age_range: metadata.age_range,
        };

        Ok(BookContent::new(id, self.title, pages, glossary)?
            .with_metadata(self.description, metadata))
    }
}

impl PageDescriptor {
    fn into_page(self, index: usize) -> Page {
        Page {
            id: self.id,
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| format!("Page {}", index + 1)),
            image_ref: self.image_url,
            narration_lines: self.text.split('\n').map(str::to_string).collect(),
            audio: MediaSource::from_pair(self.audio_url, None),
            video: MediaSource::from_pair(self.video_webm_url, self.video_mp4_url),
            text_anchor: self.text_position.unwrap_or_default(),
            text_background: self.text_bg_color,
        }
    }
}

impl TermDescriptor {
    fn into_entry(self) -> GlossaryEntry {
        // Term audio is published as wav with an mp3 twin
        let audio = MediaSource::from_pair(self.audio_url, None).map(|source| {
            match source.primary.strip_suffix(".wav") {
                Some(stem) => {
                    let mp3 = format!("{}.mp3", stem);
                    source.with_fallback(mp3)
                }
                None => source,
            }
        });

        GlossaryEntry {
            id: self.id,
            word: self.word,
            definition: self.definition,
            pictogram_ref: self.pictogram,
            audio,
            video: MediaSource::from_pair(self.video_url, None),
        }
    }
}
