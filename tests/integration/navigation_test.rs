//! Navigation and panel behaviour through the session.

use crate::common::{page, session};
use storyreader::navigation::{NavAction, Panel, PanelState, SessionPosition};
use storyreader::{AccessibilityPatch, SessionCommand};

#[test]
fn test_go_to_clamps_into_range() {
    let mut s = session(vec![page(1, false, false), page(2, false, false)], 1);

    s.select_page_from_index(99);
    assert_eq!(s.position(), SessionPosition::Glossary);

    s.select_page_from_index(-5);
    assert_eq!(s.position(), SessionPosition::Page(0));
}

#[test]
fn test_negative_index_same_as_zero() {
    let mut a = session(vec![page(1, false, false), page(2, false, false)], 0);
    let mut b = session(vec![page(1, false, false), page(2, false, false)], 0);
    a.navigate(NavAction::Next);
    b.navigate(NavAction::Next);

    a.navigate(NavAction::GoTo(-5));
    b.navigate(NavAction::GoTo(0));
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_extreme_page_indices_clamp() {
    let mut s = session(vec![page(1, false, false), page(2, false, false)], 0);

    s.apply(SessionCommand::SelectPage(i64::MAX));
    assert_eq!(s.position(), SessionPosition::Page(1));

    s.apply(SessionCommand::SelectPage(i64::MIN));
    assert_eq!(s.position(), SessionPosition::Page(0));
}

#[test]
fn test_single_page_with_glossary() {
    let mut s = session(vec![page(1, false, false)], 2);

    assert!(s.select_glossary());
    let snap = s.snapshot();
    assert_eq!(snap.position, SessionPosition::Glossary);
    assert_eq!(snap.progress.current, 2);
    assert!(snap.glossary.is_some());
    assert!(snap.page.is_none());

    assert!(!s.navigate(NavAction::Next));
    assert_eq!(s.position(), SessionPosition::Glossary);
}

#[test]
fn test_boundaries_report_disabled() {
    let mut s = session(vec![page(1, false, false), page(2, false, false)], 0);
    let snap = s.snapshot();
    assert!(!snap.can_go_previous);
    assert!(snap.can_go_next);

    assert!(!s.navigate(NavAction::Previous));
    s.navigate(NavAction::Next);
    assert!(!s.snapshot().can_go_next);
}

#[test]
fn test_panels_are_exclusive() {
    let mut s = session(vec![page(1, false, false)], 0);
    s.apply(SessionCommand::TogglePanel(Panel::TableOfContents));
    s.apply(SessionCommand::TogglePanel(Panel::Accessibility));
    assert_eq!(s.panel(), PanelState::Open(Panel::Accessibility));

    s.apply(SessionCommand::TogglePanel(Panel::Accessibility));
    assert_eq!(s.panel(), PanelState::None);
}

#[test]
fn test_selecting_from_toc_closes_it() {
    let mut s = session(vec![page(1, false, false), page(2, false, false)], 0);
    s.toggle_panel(Panel::TableOfContents);
    s.apply(SessionCommand::SelectPage(1));
    assert_eq!(s.panel(), PanelState::None);
    assert_eq!(s.position(), SessionPosition::Page(1));
}

#[test]
fn test_close_panel() {
    let mut s = session(vec![page(1, false, false)], 0);
    s.toggle_panel(Panel::Accessibility);
    s.apply(SessionCommand::ClosePanel);
    assert_eq!(s.panel(), PanelState::None);
}

#[test]
fn test_image_scale_drives_default_view() {
    let mut s = session(vec![page(1, false, false)], 0);

    s.set_accessibility(AccessibilityPatch::image_scale(1.5));
    assert!(!s.snapshot().accessibility.is_default_view);

    s.set_accessibility(AccessibilityPatch::image_scale(1.0));
    assert!(s.snapshot().accessibility.is_default_view);

    s.set_accessibility(AccessibilityPatch::image_scale(0.6));
    s.apply(SessionCommand::ResetView);
    assert!(s.snapshot().accessibility.is_default_view);
}

#[test]
fn test_accessibility_patch_is_clamped() {
    let mut s = session(vec![page(1, false, false)], 0);
    s.set_accessibility(AccessibilityPatch {
        contrast_level: Some(7),
        text_size_px: Some(31),
        image_scale: Some(9.0),
        narration_speed: Some(4.0),
    });

    let snap = s.snapshot();
    assert_eq!(snap.accessibility.contrast_level, 4);
    assert_eq!(snap.accessibility.contrast_attribute.as_deref(), Some("4"));
    assert_eq!(snap.accessibility.text_size_px, 32);
    assert_eq!(snap.accessibility.image_scale, 2.0);
    assert_eq!(snap.narration.speed.value(), 2.0);
}

#[test]
fn test_table_of_contents_lists_glossary() {
    let s = session(vec![page(1, false, false), page(2, false, false)], 3);
    let toc = s.table_of_contents();
    assert_eq!(toc.len(), 3);
    assert!(toc[0].is_current);
    assert_eq!(toc[2].title, "Glossary");
    assert!(toc[2].is_glossary);
}
