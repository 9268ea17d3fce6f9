//! Content Providers
//!
//! Fetch a book's content descriptor by id.

use super::{BookContent, BookDescriptor, ContentLoadError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Trait for content provider implementations
pub trait ContentProvider: Send + Sync {
    /// Load the book with the given id
    fn load(
        &self,
        book_id: &str,
    ) -> impl std::future::Future<Output = Result<BookContent, ContentLoadError>> + Send;
}

/// Reads `<root>/books/<id>.json` from disk.
#[derive(Debug, Clone)]
pub struct FileContentProvider {
    root: PathBuf,
}

impl FileContentProvider {
    /// Create a provider rooted at the given content directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the descriptor for a book id
    pub fn descriptor_path(&self, book_id: &str) -> PathBuf {
        self.root.join("books").join(format!("{}.json", book_id))
    }
}

impl ContentProvider for FileContentProvider {
    async fn load(&self, book_id: &str) -> Result<BookContent, ContentLoadError> {
        // Ids are file stems; anything path-like is not a valid book id
        if book_id.is_empty() || book_id.contains(['/', '\\']) || book_id.contains("..") {
            return Err(ContentLoadError::NotFound(book_id.to_string()));
        }

        let path = self.descriptor_path(book_id);
        tracing::info!("Loading book {} from {:?}", book_id, path);

        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ContentLoadError::NotFound(book_id.to_string()),
                _ => ContentLoadError::Io(e.to_string()),
            })?;

        let book = BookDescriptor::from_json(&json)?.into_book(book_id)?;

        tracing::debug!(
            "Loaded book '{}': {} pages, glossary: {}",
            book.title,
            book.page_count(),
            book.has_glossary()
        );

        Ok(book)
    }
}

/// In-memory provider, for embedded books and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    books: HashMap<String, BookContent>,
}

impl StaticContentProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a book under its own id
    pub fn with_book(mut self, book: BookContent) -> Self {
        self.books.insert(book.id.clone(), book);
        self
    }
}

impl ContentProvider for StaticContentProvider {
    async fn load(&self, book_id: &str) -> Result<BookContent, ContentLoadError> {
        self.books
            .get(book_id)
            .cloned()
            .ok_or_else(|| ContentLoadError::NotFound(book_id.to_string()))
    }
}
