//! Navigation Module
//!
//! Tracks the reader's position in the book and which side panel is open.
//!
//! Positions are indices `0..page_count` for real pages plus, when the book
//! has a glossary, one virtual position `page_count` for the glossary view.
//! Every move is clamped; out-of-range targets are never an error.

pub mod panel;

use crate::content::BookContent;
use serde::{Deserialize, Serialize};

pub use panel::{Panel, PanelState};

/// Where the reader currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum SessionPosition {
    /// A real page, by index
    Page(usize),
    /// The glossary virtual page
    Glossary,
}

impl SessionPosition {
    pub fn is_glossary(&self) -> bool {
        matches!(self, SessionPosition::Glossary)
    }

    /// Page index, if on a real page.
    pub fn page_index(&self) -> Option<usize> {
        match self {
            SessionPosition::Page(index) => Some(*index),
            SessionPosition::Glossary => None,
        }
    }
}

/// A navigation request from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    Next,
    Previous,
    /// Jump to an index; clamped into range
    GoTo(i64),
    /// Jump to the glossary, if any
    Glossary,
}

/// A change of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: SessionPosition,
    pub to: SessionPosition,
}

/// Reading progress, one-based, counting the glossary as a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}/{}", self.current, self.total)
    }
}

/// One row of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub index: usize,
    pub title: String,
    pub is_glossary: bool,
    pub is_current: bool,
}

/// Position and panel state machine.
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Current index into the addressable positions
    index: usize,
    /// Number of real pages
    page_count: usize,
    /// Whether the glossary position exists
    has_glossary: bool,
    /// Open side panel
    panel: PanelState,
}

impl Navigator {
    /// Create a navigator at the first page. A zero page count is treated
    /// as one page.
    pub fn new(page_count: usize, has_glossary: bool) -> Self {
        Self {
            index: 0,
            page_count: page_count.max(1),
            has_glossary,
            panel: PanelState::None,
        }
    }

    /// Create a navigator for a loaded book.
    pub fn for_book(book: &BookContent) -> Self {
        Self::new(book.page_count(), book.has_glossary())
    }

    /// Current position.
    pub fn position(&self) -> SessionPosition {
        self.position_of(self.index)
    }

    /// Current raw index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Highest addressable index.
    pub fn last_index(&self) -> usize {
        if self.has_glossary {
            self.page_count
        } else {
            self.page_count - 1
        }
    }

    pub fn can_go_next(&self) -> bool {
        self.index < self.last_index()
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    /// Move to `target`, clamped into range.
    ///
    /// Always dismisses the table of contents, since picking a destination
    /// is what the table of contents is for. Returns the move if the position
    /// actually changed.
    pub fn go_to(&mut self, target: i64) -> Option<Move> {
        self.panel.dismiss(Panel::TableOfContents);

        let last = self.last_index() as i64;
        let clamped = target.clamp(0, last) as usize;
        if clamped == self.index {
            return None;
        }

        let from = self.position();
        self.index = clamped;
        let to = self.position();
        tracing::debug!("Navigated {:?} -> {:?}", from, to);
        Some(Move { from, to })
    }

    /// Advance one position. No-op at the last position.
    pub fn next(&mut self) -> Option<Move> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to(self.index as i64 + 1)
    }

    /// Go back one position. No-op at the first position.
    pub fn previous(&mut self) -> Option<Move> {
        if !self.can_go_previous() {
            return None;
        }
        self.go_to(self.index as i64 - 1)
    }

    /// Jump to the glossary. No-op if the book has none.
    pub fn open_glossary(&mut self) -> Option<Move> {
        if !self.has_glossary {
            return None;
        }
        self.go_to(self.page_count as i64)
    }

    /// Apply a navigation action.
    pub fn apply(&mut self, action: NavAction) -> Option<Move> {
        match action {
            NavAction::Next => self.next(),
            NavAction::Previous => self.previous(),
            NavAction::GoTo(target) => self.go_to(target),
            NavAction::Glossary => self.open_glossary(),
        }
    }

    /// Open side panel.
    pub fn panel(&self) -> PanelState {
        self.panel
    }

    /// Toggle a side panel, closing any other.
    pub fn toggle_panel(&mut self, which: Panel) {
        self.panel.toggle(which);
    }

    /// Close whichever side panel is open.
    pub fn close_panel(&mut self) {
        self.panel.close();
    }

    /// Close `which` if it is the open panel.
    pub fn dismiss_panel(&mut self, which: Panel) -> bool {
        self.panel.dismiss(which)
    }

    /// Reading progress for the footer.
    pub fn progress(&self) -> Progress {
        Progress {
            current: self.index + 1,
            total: self.last_index() + 1,
        }
    }

    /// Table of contents rows for a book.
    pub fn table_of_contents(&self, book: &BookContent) -> Vec<TocEntry> {
        let mut entries: Vec<TocEntry> = book
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| TocEntry {
                index,
                title: page.title.clone(),
                is_glossary: false,
                is_current: index == self.index,
            })
            .collect();

        if let Some(glossary) = book.glossary() {
            entries.push(TocEntry {
                index: self.page_count,
                title: glossary.title.clone(),
                is_glossary: true,
                is_current: self.position().is_glossary(),
            });
        }

        entries
    }

    fn position_of(&self, index: usize) -> SessionPosition {
        if index < self.page_count {
            SessionPosition::Page(index)
        } else {
            SessionPosition::Glossary
        }
    }
}
