//! The state owner: single writer of `PlayerState`.
//!
//! Mutations come from the owner's own UI (direct method calls) or from
//! intents relayed over the channel (`pump`/`handle`). Every mutation is
//! followed by one full snapshot broadcast. While playing, a `Ticker` drives
//! `tick` once per period.

mod state;

pub use state::*;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::bus::{Hub, Port, Role};
use crate::catalog::{Catalog, Track};
use crate::error::SyncError;
use crate::protocol::Message;
use crate::ticker::{Tick, Ticker};

pub struct Owner {
    catalog: Catalog,
    state: PlayerState,
    port: Port,
    tick_period: Duration,
    tick_tx: Sender<Tick>,
    tick_rx: Receiver<Tick>,
    ticker: Option<Ticker>,
}

impl Owner {
    /// Join `channel` as its owner with fresh default state.
    pub fn join(
        hub: &Hub,
        channel: &str,
        catalog: Catalog,
        volume: u32,
        tick_period: Duration,
    ) -> Result<Self, SyncError> {
        let port = hub.join(channel, Role::Owner)?;
        let (tick_tx, tick_rx) = mpsc::channel();
        Ok(Self {
            state: PlayerState::initial(&catalog, volume),
            catalog,
            port,
            tick_period,
            tick_tx,
            tick_rx,
            ticker: None,
        })
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn toggle_play_pause(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        self.restart_ticker();
        log::info!(
            "{}",
            if self.state.is_playing { "playing" } else { "paused" }
        );
        log::debug!("ticker running: {}", self.is_ticking());
        self.publish();
    }

    pub fn previous(&mut self) {
        let track = self
            .catalog
            .previous_before(self.state.current_track.id)
            .clone();
        self.change_track(track);
        self.publish();
    }

    pub fn next(&mut self) {
        let track = self.catalog.next_after(self.state.current_track.id).clone();
        self.change_track(track);
        self.publish();
    }

    /// Jump to `time` seconds. Out-of-range values are taken as given.
    pub fn seek(&mut self, time: u32) {
        self.state.current_time = time;
        self.publish();
    }

    /// Set volume percent. Out-of-range values are taken as given.
    pub fn set_volume(&mut self, volume: u32) {
        self.state.volume = volume;
        self.publish();
    }

    /// Apply one message received from the channel.
    pub fn handle(&mut self, msg: Message) {
        log::debug!("owner received {}", msg.kind());
        match msg {
            Message::RequestState => self.publish(),
            Message::TogglePlay => self.toggle_play_pause(),
            Message::PreviousTrack => self.previous(),
            Message::NextTrack => self.next(),
            Message::Seek { time } => self.seek(time),
            Message::Volume { volume } => self.set_volume(volume),
            other => log::debug!("owner ignoring update {}", other.kind()),
        }
    }

    /// Apply pending channel messages in arrival order, then pending ticks.
    /// Returns how many were applied.
    ///
    /// Intents go first so a queued pause or track change cancels the ticks
    /// that were waiting behind it.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.port.try_recv() {
            self.handle(msg);
            applied += 1;
        }
        while self.tick_rx.try_recv().is_ok() {
            if self.state.is_playing {
                self.tick();
                applied += 1;
            }
        }
        applied
    }

    /// Broadcast the full snapshot.
    pub fn publish(&self) {
        for msg in self.state.snapshot() {
            if let Err(e) = self.port.post(&msg) {
                log::warn!("failed to broadcast {}: {e}", msg.kind());
            }
        }
    }

    pub(crate) fn tick(&mut self) {
        self.state.current_time = self.state.current_time.saturating_add(1);
        if self.state.current_time >= self.state.current_track.duration {
            let track = self.catalog.next_after(self.state.current_track.id).clone();
            log::info!("'{}' finished", self.state.current_track.title);
            self.change_track(track);
        }
        self.publish();
    }

    fn change_track(&mut self, track: Track) {
        log::info!("now playing #{} '{}'", track.id, track.display());
        self.state.current_track = track;
        self.state.current_time = 0;
        if self.state.is_playing {
            self.restart_ticker();
        }
    }

    /// Drop any running ticker (and stale ticks), then start a fresh one if playing.
    fn restart_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        while self.tick_rx.try_recv().is_ok() {}

        if !self.state.is_playing {
            return;
        }
        match Ticker::start(self.tick_period, self.tick_tx.clone()) {
            Ok(ticker) => self.ticker = Some(ticker),
            Err(e) => {
                // No timer, no playback.
                log::error!("playback timer unavailable, pausing: {e}");
                self.state.is_playing = false;
            }
        }
    }
}
