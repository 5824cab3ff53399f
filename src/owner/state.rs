use crate::catalog::{Catalog, Track};
use crate::protocol::Message;

/// Canonical "now playing" state. Only the owner ever holds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub current_track: Track,
    pub is_playing: bool,
    /// Elapsed seconds into `current_track`.
    pub current_time: u32,
    /// Percent; nominally 0..=100 but not clamped.
    pub volume: u32,
}

impl PlayerState {
    /// First catalog track, paused, at time zero.
    pub fn initial(catalog: &Catalog, volume: u32) -> Self {
        Self {
            current_track: catalog.first().clone(),
            is_playing: false,
            current_time: 0,
            volume,
        }
    }

    /// The four update messages that make up a full snapshot, in send order.
    pub fn snapshot(&self) -> [Message; 4] {
        [
            Message::TrackUpdate {
                track: self.current_track.clone(),
            },
            Message::PlaybackUpdate {
                is_playing: self.is_playing,
            },
            Message::TimeUpdate {
                current_time: self.current_time,
            },
            Message::VolumeUpdate {
                volume: self.volume,
            },
        ]
    }
}
