//! Shared builders for integration tests.

use storyreader::content::{BookContent, Glossary, GlossaryEntry, MediaSource, Page, TextAnchor};
use storyreader::media::{MediaChannel, MediaCommand, PlaybackToken};
use storyreader::ReadingSession;

pub type RecordingSession = ReadingSession<Vec<MediaCommand>>;

pub fn page(id: u32, audio: bool, video: bool) -> Page {
    Page {
        id,
        title: format!("Page {}", id),
        image_ref: format!("/images/{}.jpg", id),
        narration_lines: vec![format!("Line on page {}", id)],
        audio: audio.then(|| MediaSource::new(format!("/audio/{}.wav", id))),
        video: video.then(|| {
            MediaSource::new(format!("/video/{}.webm", id)).with_fallback(format!("/video/{}.mp4", id))
        }),
        text_anchor: TextAnchor::default(),
        text_background: None,
    }
}

pub fn term(id: u32) -> GlossaryEntry {
    GlossaryEntry {
        id,
        word: format!("word{}", id),
        definition: format!("meaning {}", id),
        pictogram_ref: format!("/pictograms/{}.png", id),
        audio: Some(MediaSource::new(format!("/audio/term{}.wav", id))),
        video: Some(MediaSource::new(format!("/video/term{}.mp4", id))),
    }
}

pub fn book(pages: Vec<Page>, terms: u32) -> BookContent {
    let glossary = (terms > 0).then(|| Glossary {
        title: "Glossary".to_string(),
        terms: (1..=terms).map(term).collect(),
    });
    BookContent::new("test-book", "Test Book", pages, glossary).unwrap()
}

pub fn session(pages: Vec<Page>, terms: u32) -> RecordingSession {
    ReadingSession::new(book(pages, terms), Vec::new())
}

/// Token of the most recent play request on a channel.
pub fn last_play(session: &RecordingSession, channel: MediaChannel) -> PlaybackToken {
    session
        .backend()
        .iter()
        .rev()
        .find_map(|command| match command {
            MediaCommand::Play { channel: ch, token } if *ch == channel => Some(*token),
            _ => None,
        })
        .expect("no play request on channel")
}
