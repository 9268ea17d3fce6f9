//! Session runtime.
//!
//! Runs a [`ReadingSession`] on its own task. User commands and media
//! completions are serialized through one `select!` loop, and every change is
//! published as a snapshot on a watch channel.

use super::{ReadingSession, SessionCommand, SessionSnapshot};
use crate::content::BookContent;
use crate::media::{ChannelBackend, MediaEvent, PlayerConfig, SimulatedPlayer};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Session runtime errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session has shut down")]
    Closed,

    #[error("Session task failed: {0}")]
    TaskFailed(String),
}

/// Handle to a running session.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<ReadingSession<ChannelBackend>>,
    player: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Run `session` on a new task, consuming completions from `media_events`.
    pub fn spawn(
        session: ReadingSession<ChannelBackend>,
        media_events: mpsc::UnboundedReceiver<MediaEvent>,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(session.snapshot());
        let task = tokio::spawn(run(session, command_rx, media_events, snapshot_tx));
        Self {
            commands,
            snapshots,
            task,
            player: None,
        }
    }

    /// Start a session on `book` wired to a simulated player.
    pub fn launch(book: impl Into<Arc<BookContent>>, player: PlayerConfig, skip_seconds: f64) -> Self {
        let (backend, media_commands) = ChannelBackend::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let player = SimulatedPlayer::new(player, event_tx).spawn(media_commands);

        let session = ReadingSession::new(book, backend).with_skip_seconds(skip_seconds);
        let mut handle = Self::spawn(session, event_rx);
        handle.player = Some(player);
        handle
    }

    /// Queue a command.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next published snapshot.
    pub async fn changed(&mut self) -> Result<SessionSnapshot, SessionError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Wait until a snapshot satisfies `predicate`, returning it.
    pub async fn wait_for(
        &mut self,
        predicate: impl Fn(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot, SessionError> {
        let snapshot = self
            .snapshots
            .wait_for(|s| predicate(s))
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.clone())
    }

    /// A receiver for observing snapshots elsewhere.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the session and return it.
    pub async fn shutdown(self) -> Result<ReadingSession<ChannelBackend>, SessionError> {
        drop(self.commands);
        let session = self
            .task
            .await
            .map_err(|e| SessionError::TaskFailed(e.to_string()))?;
        if let Some(player) = self.player {
            player.abort();
        }
        Ok(session)
    }
}

async fn run(
    mut session: ReadingSession<ChannelBackend>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    mut media_events: mpsc::UnboundedReceiver<MediaEvent>,
    snapshots: watch::Sender<SessionSnapshot>,
) -> ReadingSession<ChannelBackend> {
    tracing::info!("Session '{}' running", session.book().id);
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => session.apply(command),
                None => break,
            },
            Some(event) = media_events.recv() => session.handle_media_event(event),
        }
        snapshots.send_replace(session.snapshot());
    }
    tracing::info!("Session '{}' closed", session.book().id);
    session
}
