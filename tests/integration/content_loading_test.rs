//! Opening sessions from content on disk.

use storyreader::content::{ContentLoadError, FileContentProvider};
use storyreader::media::MediaCommand;
use storyreader::navigation::SessionPosition;
use storyreader::ReadingSession;
use tempfile::tempdir;

const BOOK: &str = r#"{
    "id": "la-tortuga",
    "title": "La Tortuga",
    "pages": [
        { "id": 1, "title": "Inicio", "imageUrl": "/img/1.jpg", "text": "Una tortuga\ncaminaba", "audioUrl": "/audio/1.wav" },
        { "id": 2, "imageUrl": "/img/2.jpg", "text": "Fin", "videoMp4Url": "/video/2.mp4" }
    ],
    "glossary": {
        "title": "Glosario",
        "terms": [
            { "id": 1, "word": "tortuga", "definition": "Reptil", "pictogram": "/p/t.png", "audioUrl": "/audio/t.wav" }
        ]
    }
}"#;

#[tokio::test]
async fn test_open_session_from_disk() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("books")).unwrap();
    std::fs::write(dir.path().join("books").join("la-tortuga.json"), BOOK).unwrap();

    let provider = FileContentProvider::new(dir.path());
    let mut session = ReadingSession::open(&provider, "la-tortuga", Vec::<MediaCommand>::new())
        .await
        .unwrap();

    let snap = session.snapshot();
    assert_eq!(snap.book_title, "La Tortuga");
    assert_eq!(snap.progress.to_string(), "page 1/3");
    assert_eq!(snap.page.as_ref().unwrap().narration_lines.len(), 2);
    assert_eq!(snap.table_of_contents[0].title, "Inicio");
    assert_eq!(snap.table_of_contents[1].title, "Page 2");

    // Page 2 only has an mp4, which becomes the primary source
    session.select_page_from_index(1);
    assert!(session.toggle_video());
    assert_eq!(session.position(), SessionPosition::Page(1));
}

#[tokio::test]
async fn test_open_missing_book() {
    let dir = tempdir().unwrap();
    let provider = FileContentProvider::new(dir.path());
    let result = ReadingSession::open(&provider, "nope", Vec::<MediaCommand>::new()).await;
    assert!(matches!(result, Err(ContentLoadError::NotFound(_))));
}

#[tokio::test]
async fn test_open_malformed_book() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("books")).unwrap();
    std::fs::write(dir.path().join("books").join("bad.json"), "{ \"title\": 3 }").unwrap();

    let provider = FileContentProvider::new(dir.path());
    let result = ReadingSession::open(&provider, "bad", Vec::<MediaCommand>::new()).await;
    assert!(matches!(result, Err(ContentLoadError::Parse(_))));
}
