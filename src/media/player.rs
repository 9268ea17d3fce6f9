//! Simulated media player.
//!
//! Stands in for a real audio/video device. Sources are resolved against a
//! media directory (primary first, then fallback); play requests settle after
//! a short latency and clips end after a fixed length scaled by speed.

use super::{
    MediaChannel, MediaCommand, MediaError, MediaEvent, PlaybackSpeed, PlaybackToken,
};
use crate::content::MediaSource;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Player settings
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Directory media references are resolved against; `None` accepts all
    pub media_root: Option<PathBuf>,
    /// Delay before a play request settles
    pub play_latency: Duration,
    /// Length of every clip at normal speed
    pub clip_length: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            media_root: None,
            play_latency: Duration::from_millis(50),
            clip_length: Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Idle,
    Starting,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug)]
struct ChannelState {
    source: Option<MediaSource>,
    token: Option<PlaybackToken>,
    status: Status,
    /// Position at `resumed_at`, in clip time
    position: Duration,
    resumed_at: Option<Instant>,
    speed: PlaybackSpeed,
    muted: bool,
    /// Bumped on every change; timers from older epochs are ignored
    epoch: u64,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            source: None,
            token: None,
            status: Status::Idle,
            position: Duration::ZERO,
            resumed_at: None,
            speed: PlaybackSpeed::default(),
            muted: false,
            epoch: 0,
        }
    }
}

impl ChannelState {
    /// Fold elapsed play time into `position`.
    fn settle_position(&mut self, clip_length: Duration) {
        if let Some(resumed_at) = self.resumed_at.take() {
            let played = resumed_at.elapsed().mul_f64(f64::from(self.speed.value()));
            self.position = (self.position + played).min(clip_length);
        }
    }

    fn invalidate(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }
}

#[derive(Debug, Clone, Copy)]
enum Timer {
    Settle { channel: MediaChannel, epoch: u64 },
    End { channel: MediaChannel, epoch: u64 },
}

/// Plays media commands in simulation and reports completions.
pub struct SimulatedPlayer {
    config: PlayerConfig,
    channels: HashMap<MediaChannel, ChannelState>,
    events: mpsc::UnboundedSender<MediaEvent>,
    timer_tx: mpsc::UnboundedSender<Timer>,
    timer_rx: mpsc::UnboundedReceiver<Timer>,
}

impl SimulatedPlayer {
    /// Create a player that reports completions on `events`.
    pub fn new(config: PlayerConfig, events: mpsc::UnboundedSender<MediaEvent>) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            config,
            channels: MediaChannel::ALL
                .iter()
                .map(|channel| (*channel, ChannelState::default()))
                .collect(),
            events,
            timer_tx,
            timer_rx,
        }
    }

    /// Process commands until the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<MediaCommand>) {
        tracing::info!("Simulated media player started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(timer) = self.timer_rx.recv() => self.handle_timer(timer),
            }
        }
        tracing::info!("Simulated media player stopped");
    }

    /// Spawn the player on the current runtime.
    pub fn spawn(
        self,
        commands: mpsc::UnboundedReceiver<MediaCommand>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(commands))
    }

    fn handle_command(&mut self, command: MediaCommand) {
        let clip_length = self.config.clip_length;
        let channel = command.channel();
        let Some(state) = self.channels.get_mut(&channel) else {
            return;
        };

        match command {
            MediaCommand::Load {
                source,
                speed,
                muted,
                ..
            } => {
                tracing::debug!("Loading {} on {}", source.primary, channel);
                state.invalidate();
                *state = ChannelState {
                    source: Some(source),
                    speed,
                    muted,
                    epoch: state.epoch,
                    ..ChannelState::default()
                };
            }
            MediaCommand::Play { token, .. } => {
                if state.source.is_none() {
                    let _ = self.events.send(MediaEvent::failed(
                        channel,
                        token,
                        MediaError::NotLoaded(channel),
                    ));
                    return;
                }
                state.settle_position(clip_length);
                if state.status == Status::Ended {
                    state.position = Duration::ZERO;
                }
                state.token = Some(token);
                state.status = Status::Starting;
                let epoch = state.invalidate();
                self.schedule(
                    Timer::Settle { channel, epoch },
                    self.config.play_latency,
                );
            }
            MediaCommand::Pause { .. } => {
                state.settle_position(clip_length);
                if matches!(state.status, Status::Starting | Status::Playing) {
                    state.status = Status::Paused;
                }
                state.invalidate();
            }
            MediaCommand::Stop { .. } => {
                state.resumed_at = None;
                state.position = Duration::ZERO;
                state.status = Status::Idle;
                state.token = None;
                state.invalidate();
            }
            MediaCommand::Seek { position_secs, .. } => {
                let target = Duration::from_secs_f64(position_secs.max(0.0));
                self.reposition(channel, target);
            }
            MediaCommand::SeekBy { delta_secs, .. } => {
                state.settle_position(clip_length);
                let current = state.position.as_secs_f64();
                let target = Duration::from_secs_f64((current + delta_secs).max(0.0));
                self.reposition(channel, target);
            }
            MediaCommand::SetSpeed { speed, .. } => {
                state.settle_position(clip_length);
                state.speed = speed;
                if state.status == Status::Playing {
                    self.resume(channel);
                }
            }
        }
    }

    fn handle_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Settle { channel, epoch } => {
                let media_root = self.config.media_root.clone();
                let Some(state) = self.channels.get_mut(&channel) else {
                    return;
                };
                if state.epoch != epoch || state.status != Status::Starting {
                    return;
                }
                let Some(token) = state.token else {
                    return;
                };

                let resolved = state
                    .source
                    .as_ref()
                    .and_then(|source| resolve(source, media_root.as_ref()));

                match resolved {
                    Some(reference) => {
                        tracing::debug!(
                            "Playing {} on {} at {}{}",
                            reference,
                            channel,
                            state.speed,
                            if state.muted { " (muted)" } else { "" }
                        );
                        let _ = self.events.send(MediaEvent::started(channel, token));
                        self.resume(channel);
                    }
                    None => {
                        let missing = state
                            .source
                            .as_ref()
                            .map(|s| s.primary.clone())
                            .unwrap_or_default();
                        tracing::warn!("Cannot play {} on {}: not found", missing, channel);
                        state.status = Status::Idle;
                        state.token = None;
                        let _ = self.events.send(MediaEvent::failed(
                            channel,
                            token,
                            MediaError::SourceNotFound(missing),
                        ));
                    }
                }
            }
            Timer::End { channel, epoch } => {
                let Some(state) = self.channels.get_mut(&channel) else {
                    return;
                };
                if state.epoch != epoch || state.status != Status::Playing {
                    return;
                }
                state.resumed_at = None;
                state.position = self.config.clip_length;
                state.status = Status::Ended;
                if let Some(token) = state.token.take() {
                    let _ = self.events.send(MediaEvent::ended(channel, token));
                }
            }
        }
    }

    /// Start (or restart) the clock for a playing channel.
    fn resume(&mut self, channel: MediaChannel) {
        let clip_length = self.config.clip_length;
        let Some(state) = self.channels.get_mut(&channel) else {
            return;
        };
        state.status = Status::Playing;
        state.resumed_at = Some(Instant::now());
        let remaining = clip_length.saturating_sub(state.position);
        let wall = remaining.div_f64(f64::from(state.speed.value()));
        let epoch = state.invalidate();
        self.schedule(Timer::End { channel, epoch }, wall);
    }

    fn reposition(&mut self, channel: MediaChannel, target: Duration) {
        let clip_length = self.config.clip_length;
        let Some(state) = self.channels.get_mut(&channel) else {
            return;
        };
        state.resumed_at = None;
        state.position = target.min(clip_length);
        if state.status == Status::Ended {
            state.status = Status::Paused;
        }
        if state.status == Status::Playing {
            self.resume(channel);
        }
    }

    fn schedule(&self, timer: Timer, after: Duration) {
        let tx = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(timer);
        });
    }
}

/// First candidate reference that exists under `media_root`.
fn resolve(source: &MediaSource, media_root: Option<&PathBuf>) -> Option<String> {
    match media_root {
        None => Some(source.primary.clone()),
        Some(root) => source
            .candidates()
            .find(|reference| root.join(reference.trim_start_matches('/')).is_file())
            .map(str::to_string),
    }
}
