//! Sign-language overlay behaviour.

use crate::common::{last_play, page, session};
use storyreader::media::{MediaChannel, MediaCommand, MediaError, MediaEvent, UnavailableReason};
use storyreader::navigation::NavAction;
use storyreader::{SessionCommand, SessionNotice};

#[test]
fn test_overlay_hidden_after_page_change() {
    let mut s = session(vec![page(1, false, true), page(2, false, true)], 0);
    s.apply(SessionCommand::ToggleVideo);
    assert!(s.video().visible);

    s.navigate(NavAction::Next);
    assert!(!s.video().visible);
    assert!(!s.video().playing);
}

#[test]
fn test_overlay_loads_both_encodings() {
    let mut s = session(vec![page(1, false, true)], 0);
    s.toggle_video();

    let source = s.backend().iter().find_map(|c| match c {
        MediaCommand::Load {
            channel: MediaChannel::SignVideo,
            source,
            ..
        } => Some(source.clone()),
        _ => None,
    });
    let source = source.unwrap();
    assert_eq!(source.primary, "/video/1.webm");
    assert_eq!(source.fallback.as_deref(), Some("/video/1.mp4"));
}

#[test]
fn test_overlay_unavailable_without_video() {
    let mut s = session(vec![page(1, true, false)], 0);
    assert!(!s.toggle_video());
    assert!(!s.video().visible);
    assert_eq!(
        s.notice(),
        Some(&SessionNotice::VideoUnavailable {
            reason: UnavailableReason::NoSignVideo
        })
    );
}

#[test]
fn test_video_end_rewinds_and_replays() {
    let mut s = session(vec![page(1, false, true)], 0);
    s.toggle_video();
    let token = last_play(&s, MediaChannel::SignVideo);

    s.handle_media_event(MediaEvent::ended(MediaChannel::SignVideo, token));
    assert!(s.video().visible);
    assert!(!s.video().playing);

    assert!(s.toggle_video_playback());
    assert!(s.video().playing);
    assert_ne!(last_play(&s, MediaChannel::SignVideo), token);
}

#[test]
fn test_video_failure_reverts_playing() {
    let mut s = session(vec![page(1, false, true)], 0);
    s.toggle_video();
    let token = last_play(&s, MediaChannel::SignVideo);

    s.handle_media_event(MediaEvent::failed(
        MediaChannel::SignVideo,
        token,
        MediaError::SourceNotFound("/video/1.webm".into()),
    ));
    assert!(!s.video().playing);
    assert!(s.notice().is_some());
}

#[test]
fn test_expand_only_while_visible() {
    let mut s = session(vec![page(1, false, true)], 0);
    assert!(!s.toggle_video_expanded());

    s.toggle_video();
    assert!(s.toggle_video_expanded());
    s.toggle_video();
    assert!(!s.video().expanded);
}

#[test]
fn test_video_and_narration_are_independent() {
    let mut s = session(vec![page(1, true, true)], 0);
    s.toggle_narration();
    s.toggle_video();
    assert!(s.narration().on);
    assert!(s.video().visible);

    s.toggle_video();
    assert!(s.narration().on);
}
