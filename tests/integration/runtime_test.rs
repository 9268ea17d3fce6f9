//! Sessions running on the runtime against the simulated player.

use crate::common::{book, page};
use std::time::Duration;
use storyreader::media::{MediaChannel, PlayerConfig, TermAudioState};
use storyreader::navigation::{NavAction, SessionPosition};
use storyreader::{SessionCommand, SessionHandle, SessionNotice, SessionSnapshot};
use tempfile::tempdir;
use tokio::time::timeout;

fn fast_player() -> PlayerConfig {
    PlayerConfig {
        media_root: None,
        play_latency: Duration::from_millis(5),
        clip_length: Duration::from_millis(60),
    }
}

async fn wait_for(
    handle: &mut SessionHandle,
    predicate: impl Fn(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    timeout(Duration::from_secs(2), handle.wait_for(predicate))
        .await
        .expect("condition reached in time")
        .expect("session still running")
}

#[tokio::test]
async fn test_commands_update_snapshot() {
    let mut handle = SessionHandle::launch(
        book(vec![page(1, false, false), page(2, false, false)], 1),
        fast_player(),
        5.0,
    );

    handle.send(SessionCommand::Navigate(NavAction::Next)).unwrap();
    let snap = wait_for(&mut handle, |s| s.position == SessionPosition::Page(1)).await;
    assert!(snap.can_go_next);

    handle.send(SessionCommand::SelectGlossary).unwrap();
    wait_for(&mut handle, |s| s.position.is_glossary()).await;

    let session = handle.shutdown().await.unwrap();
    assert_eq!(session.position(), SessionPosition::Glossary);
}

#[tokio::test]
async fn test_narration_survives_clip_end() {
    let mut handle = SessionHandle::launch(book(vec![page(1, true, false)], 0), fast_player(), 5.0);

    handle.send(SessionCommand::ToggleNarration).unwrap();
    wait_for(&mut handle, |s| s.narration.on).await;

    // Well past the clip length
    tokio::time::sleep(Duration::from_millis(200)).await;
    let snap = handle.snapshot();
    assert!(snap.narration.on);
    assert!(snap.notice.is_none());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_media_reverts_narration() {
    let media = tempdir().unwrap();
    let player = PlayerConfig {
        media_root: Some(media.path().to_path_buf()),
        ..fast_player()
    };
    let mut handle = SessionHandle::launch(book(vec![page(1, true, false)], 0), player, 5.0);

    handle.send(SessionCommand::ToggleNarration).unwrap();
    let snap = wait_for(&mut handle, |s| s.notice.is_some()).await;
    assert!(!snap.narration.on);
    assert!(matches!(
        snap.notice,
        Some(SessionNotice::PlaybackFailed {
            channel: MediaChannel::Narration,
            ..
        })
    ));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_term_audio_confirms_then_ends() {
    let mut handle = SessionHandle::launch(book(vec![page(1, false, false)], 2), fast_player(), 5.0);

    handle.send(SessionCommand::SelectGlossary).unwrap();
    handle.send(SessionCommand::ToggleTermAudio(2)).unwrap();

    wait_for(&mut handle, |s| s.glossary_media.audio == TermAudioState::Playing(2)).await;
    wait_for(&mut handle, |s| s.glossary_media.audio == TermAudioState::Idle).await;

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscription_closes_on_shutdown() {
    let handle = SessionHandle::launch(book(vec![page(1, false, false)], 0), fast_player(), 5.0);
    let updates = handle.subscribe();
    handle.shutdown().await.unwrap();
    assert!(updates.has_changed().is_err());
}
