//! Narration across page changes and media completions.

use crate::common::{last_play, page, session};
use storyreader::media::{
    MediaChannel, MediaCommand, MediaError, MediaEvent, UnavailableReason,
};
use storyreader::navigation::NavAction;
use storyreader::session::SkipDirection;
use storyreader::SessionNotice;

#[test]
fn test_narration_needs_page_audio() {
    // Page 0 has no audio, page 1 does
    let mut s = session(vec![page(1, false, false), page(2, true, false)], 0);

    assert!(!s.toggle_narration());
    assert!(!s.narration().on);
    assert!(s.backend().is_empty());

    s.navigate(NavAction::Next);
    assert!(s.toggle_narration());
    assert!(s.narration().on);

    s.navigate(NavAction::Previous);
    assert!(!s.narration().on);
    assert_eq!(
        s.notice(),
        Some(&SessionNotice::NarrationUnavailable {
            reason: UnavailableReason::NoNarrationAudio
        })
    );
}

#[test]
fn test_narration_never_on_at_glossary() {
    let mut s = session(vec![page(1, true, false)], 2);
    s.toggle_narration();
    assert!(s.narration().on);

    s.select_glossary();
    assert!(!s.narration().on);

    assert!(!s.toggle_narration());
    assert!(!s.narration().on);
}

#[test]
fn test_narration_stays_armed_after_end() {
    let mut s = session(vec![page(1, true, false), page(2, true, false)], 0);
    s.toggle_narration();
    let token = last_play(&s, MediaChannel::Narration);

    s.handle_media_event(MediaEvent::ended(MediaChannel::Narration, token));
    assert!(s.narration().on);

    // Turning the page picks narration back up
    s.navigate(NavAction::Next);
    assert!(s.narration().on);
    assert!(matches!(
        s.backend().last(),
        Some(MediaCommand::Play { channel: MediaChannel::Narration, .. })
    ));

    // Manual pause switches it off
    assert!(!s.toggle_narration());
    assert!(!s.narration().on);
}

#[test]
fn test_stale_completion_is_ignored() {
    let mut s = session(vec![page(1, true, false), page(2, true, false)], 0);
    s.toggle_narration();
    let stale = last_play(&s, MediaChannel::Narration);

    s.navigate(NavAction::Next);
    let before = s.snapshot();

    s.handle_media_event(MediaEvent::failed(
        MediaChannel::Narration,
        stale,
        MediaError::PlaybackFailed("interrupted".into()),
    ));
    s.handle_media_event(MediaEvent::ended(MediaChannel::Narration, stale));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_current_failure_reverts_and_notifies() {
    let mut s = session(vec![page(1, true, false)], 0);
    s.toggle_narration();
    let token = last_play(&s, MediaChannel::Narration);

    s.handle_media_event(MediaEvent::failed(
        MediaChannel::Narration,
        token,
        MediaError::SourceNotFound("/audio/1.wav".into()),
    ));
    assert!(!s.narration().on);
    assert!(matches!(
        s.notice(),
        Some(SessionNotice::PlaybackFailed {
            channel: MediaChannel::Narration,
            ..
        })
    ));
}

#[test]
fn test_pause_supersedes_pending_play() {
    let mut s = session(vec![page(1, true, false)], 0);
    s.toggle_narration();
    let token = last_play(&s, MediaChannel::Narration);
    s.toggle_narration();

    // The play resolving late must not switch narration back on
    s.handle_media_event(MediaEvent::started(MediaChannel::Narration, token));
    assert!(!s.narration().on);
}

#[test]
fn test_resume_on_same_page_does_not_reload() {
    let mut s = session(vec![page(1, true, false)], 0);
    s.toggle_narration();
    s.toggle_narration();
    s.toggle_narration();

    let loads = s
        .backend()
        .iter()
        .filter(|c| matches!(c, MediaCommand::Load { .. }))
        .count();
    assert_eq!(loads, 1);
}

#[test]
fn test_speed_applies_to_loaded_narration() {
    let mut s = session(vec![page(1, true, false), page(2, true, false)], 0);
    s.toggle_narration();
    s.set_speed(1.5);
    assert!(matches!(
        s.backend().last(),
        Some(MediaCommand::SetSpeed { channel: MediaChannel::Narration, speed })
            if speed.value() == 1.5
    ));

    // New pages load at the remembered speed
    s.navigate(NavAction::Next);
    let load_speed = s.backend().iter().rev().find_map(|c| match c {
        MediaCommand::Load { speed, .. } => Some(speed.value()),
        _ => None,
    });
    assert_eq!(load_speed, Some(1.5));
}

#[test]
fn test_skip_moves_loaded_narration() {
    let mut s = session(vec![page(1, true, false)], 0);
    assert!(!s.skip_narration(SkipDirection::Forward));

    s.toggle_narration();
    assert!(s.skip_narration(SkipDirection::Forward));
    assert!(matches!(
        s.backend().last(),
        Some(MediaCommand::SeekBy { delta_secs, .. }) if *delta_secs == 5.0
    ));
}
