//! Messages exchanged over the player channel.
//!
//! Every frame is a JSON envelope `{ "type": KIND, "data"?: payload }`. Intents
//! flow from mirrors to the owner; updates flow from the owner to mirrors.

use serde::{Deserialize, Serialize};

use crate::catalog::Track;

/// Well-known channel every participant joins unless configured otherwise.
pub const CHANNEL_NAME: &str = "music_player_channel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Ask the owner to re-broadcast its full snapshot.
    RequestState,
    TogglePlay,
    PreviousTrack,
    NextTrack,
    Seek {
        time: u32,
    },
    Volume {
        volume: u32,
    },
    TrackUpdate {
        track: Track,
    },
    #[serde(rename_all = "camelCase")]
    PlaybackUpdate {
        is_playing: bool,
    },
    #[serde(rename_all = "camelCase")]
    TimeUpdate {
        current_time: u32,
    },
    VolumeUpdate {
        volume: u32,
    },
}

impl Message {
    /// True for mirror→owner messages.
    pub fn is_intent(&self) -> bool {
        matches!(
            self,
            Message::RequestState
                | Message::TogglePlay
                | Message::PreviousTrack
                | Message::NextTrack
                | Message::Seek { .. }
                | Message::Volume { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::RequestState => "REQUEST_STATE",
            Message::TogglePlay => "TOGGLE_PLAY",
            Message::PreviousTrack => "PREVIOUS_TRACK",
            Message::NextTrack => "NEXT_TRACK",
            Message::Seek { .. } => "SEEK",
            Message::Volume { .. } => "VOLUME",
            Message::TrackUpdate { .. } => "TRACK_UPDATE",
            Message::PlaybackUpdate { .. } => "PLAYBACK_UPDATE",
            Message::TimeUpdate { .. } => "TIME_UPDATE",
            Message::VolumeUpdate { .. } => "VOLUME_UPDATE",
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(frame: &str) -> serde_json::Result<Self> {
        serde_json::from_str(frame)
    }
}
