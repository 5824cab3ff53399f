//! Mirrors render the last snapshot they received and never mutate it
//! themselves: every user action becomes an intent for the owner.

use std::time::Duration;

use crate::bus::{Hub, Port, Poster, Role};
use crate::catalog::Track;
use crate::error::SyncError;
use crate::protocol::Message;

/// Best-effort cache of the owner's state. Fields are adopted one message at
/// a time, so a combination seen here may never have existed on the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorState {
    /// `None` until the first `TRACK_UPDATE`; nothing else is renderable before that.
    pub track: Option<Track>,
    pub is_playing: bool,
    pub current_time: u32,
    pub volume: u32,
}

impl Default for MirrorState {
    fn default() -> Self {
        Self {
            track: None,
            is_playing: false,
            current_time: 0,
            volume: 80,
        }
    }
}

impl MirrorState {
    pub fn is_loading(&self) -> bool {
        self.track.is_none()
    }

    /// Adopt the field carried by an owner update. Returns false for intents.
    pub fn apply(&mut self, msg: &Message) -> bool {
        match msg {
            Message::TrackUpdate { track } => self.track = Some(track.clone()),
            Message::PlaybackUpdate { is_playing } => self.is_playing = *is_playing,
            Message::TimeUpdate { current_time } => self.current_time = *current_time,
            Message::VolumeUpdate { volume } => self.volume = *volume,
            _ => return false,
        }
        true
    }
}

pub struct Mirror {
    port: Port,
    state: MirrorState,
}

impl Mirror {
    /// Join `channel` as a mirror and ask the owner for its state.
    pub fn connect(hub: &Hub, channel: &str) -> Result<Self, SyncError> {
        let mirror = Self {
            port: hub.join(channel, Role::Mirror)?,
            state: MirrorState::default(),
        };
        mirror.request_state();
        Ok(mirror)
    }

    pub fn state(&self) -> &MirrorState {
        &self.state
    }

    pub fn poster(&self) -> Poster {
        self.port.poster()
    }

    /// Adopt everything queued. Returns how many updates were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.port.try_recv() {
            applied += usize::from(self.adopt(msg));
        }
        applied
    }

    /// Wait up to `timeout` for one message and adopt it.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.port.recv_timeout(timeout) {
            Some(msg) => self.adopt(msg),
            None => false,
        }
    }

    pub fn request_state(&self) {
        self.send(Message::RequestState);
    }

    pub fn toggle_play_pause(&self) {
        self.send(Message::TogglePlay);
    }

    pub fn previous(&self) {
        self.send(Message::PreviousTrack);
    }

    pub fn next(&self) {
        self.send(Message::NextTrack);
    }

    pub fn seek(&self, time: u32) {
        self.send(Message::Seek { time });
    }

    pub fn set_volume(&self, volume: u32) {
        self.send(Message::Volume { volume });
    }

    fn adopt(&mut self, msg: Message) -> bool {
        if msg.is_intent() {
            log::trace!("mirror ignoring intent {}", msg.kind());
            return false;
        }
        self.state.apply(&msg)
    }

    fn send(&self, msg: Message) {
        match self.port.post(&msg) {
            Ok(0) => log::debug!("{} sent but nobody is listening", msg.kind()),
            Ok(_) => log::debug!("mirror sent {}", msg.kind()),
            Err(e) => log::warn!("mirror failed to send {}: {e}", msg.kind()),
        }
    }
}

#[cfg(test)]
mod tests;
