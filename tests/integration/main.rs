//! Integration tests for reading sessions.

mod common;
mod content_loading_test;
mod glossary_media_test;
mod navigation_test;
mod narration_test;
mod runtime_test;
mod video_overlay_test;
