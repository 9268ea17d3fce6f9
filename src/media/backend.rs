//! Media backends.
//!
//! A backend accepts commands and, asynchronously, reports completions on an
//! event channel owned by whoever drives the session.

use super::MediaCommand;
use tokio::sync::mpsc;

/// Trait for media backend implementations
pub trait MediaBackend {
    /// Submit a command. Never blocks; completions arrive as media events.
    fn submit(&mut self, command: MediaCommand);
}

impl<B: MediaBackend + ?Sized> MediaBackend for &mut B {
    fn submit(&mut self, command: MediaCommand) {
        (**self).submit(command);
    }
}

/// Records commands in order. Useful for driving a session by hand.
impl MediaBackend for Vec<MediaCommand> {
    fn submit(&mut self, command: MediaCommand) {
        self.push(command);
    }
}

/// Forwards commands to a player task over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelBackend {
    commands: mpsc::UnboundedSender<MediaCommand>,
}

impl ChannelBackend {
    /// Create a backend and the receiver a player should consume.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MediaCommand>) {
        let (commands, rx) = mpsc::unbounded_channel();
        (Self { commands }, rx)
    }

    /// Whether the player side is still listening.
    pub fn is_connected(&self) -> bool {
        !self.commands.is_closed()
    }
}

impl MediaBackend for ChannelBackend {
    fn submit(&mut self, command: MediaCommand) {
        tracing::trace!("Media command: {:?}", command);
        if self.commands.send(command).is_err() {
            tracing::warn!("Media player has shut down, command dropped");
        }
    }
}
