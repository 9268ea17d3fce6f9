//! Glossary term audio and video.

use crate::common::{last_play, page, session};
use storyreader::media::{
    GlossaryMediaState, MediaChannel, MediaCommand, MediaEvent, TermAudioState,
};
use storyreader::navigation::NavAction;
use storyreader::SessionCommand;

#[test]
fn test_term_audio_lifecycle() {
    let mut s = session(vec![page(1, false, false)], 2);
    s.select_glossary();

    s.apply(SessionCommand::ToggleTermAudio(1));
    assert_eq!(s.glossary_media().audio, TermAudioState::Pending(1));

    let token = last_play(&s, MediaChannel::TermAudio);
    s.handle_media_event(MediaEvent::started(MediaChannel::TermAudio, token));
    assert_eq!(s.glossary_media().audio, TermAudioState::Playing(1));

    s.handle_media_event(MediaEvent::ended(MediaChannel::TermAudio, token));
    assert_eq!(s.glossary_media().audio, TermAudioState::Idle);
}

#[test]
fn test_same_term_twice_stops() {
    let mut s = session(vec![page(1, false, false)], 2);
    s.select_glossary();
    s.toggle_term_audio(1);
    assert!(!s.toggle_term_audio(1));
    assert_eq!(s.glossary_media().audio, TermAudioState::Idle);
}

#[test]
fn test_other_term_supersedes() {
    let mut s = session(vec![page(1, false, false)], 2);
    s.select_glossary();
    s.toggle_term_audio(1);
    let first = last_play(&s, MediaChannel::TermAudio);
    s.toggle_term_audio(2);

    s.handle_media_event(MediaEvent::started(MediaChannel::TermAudio, first));
    assert_eq!(s.glossary_media().audio, TermAudioState::Pending(2));
}

#[test]
fn test_term_audio_uses_narration_speed() {
    let mut s = session(vec![page(1, false, false)], 1);
    s.set_speed(0.7);
    s.select_glossary();
    s.toggle_term_audio(1);

    let speed = s.backend().iter().rev().find_map(|c| match c {
        MediaCommand::Load {
            channel: MediaChannel::TermAudio,
            speed,
            ..
        } => Some(speed.value()),
        _ => None,
    });
    assert_eq!(speed, Some(0.7));
}

#[test]
fn test_leaving_glossary_resets_term_media() {
    let mut s = session(vec![page(1, false, false)], 2);
    s.select_glossary();
    s.toggle_term_audio(1);
    s.toggle_term_video(2);

    s.navigate(NavAction::Previous);
    assert_eq!(s.glossary_media(), GlossaryMediaState::default());
    assert!(s.backend().contains(&MediaCommand::Stop {
        channel: MediaChannel::TermAudio
    }));
    assert!(s.backend().contains(&MediaCommand::Stop {
        channel: MediaChannel::TermVideo
    }));
}

#[test]
fn test_term_media_ignored_off_glossary() {
    let mut s = session(vec![page(1, false, false)], 2);
    assert!(!s.toggle_term_video(1));
    assert_eq!(s.glossary_media().video, None);
    assert!(s.backend().is_empty());
}
