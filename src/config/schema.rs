use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::{Track, default_tracks};
use crate::protocol::CHANNEL_NAME;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tandem/config.toml` or `~/.config/tandem/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TANDEM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub channel: ChannelSettings,
    pub popout: PopoutSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub mpris: MprisSettings,
    pub log: LogSettings,
    /// Tracks in play order. Ids must be unique and durations non-zero.
    pub catalog: Vec<Track>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            channel: ChannelSettings::default(),
            popout: PopoutSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            mpris: MprisSettings::default(),
            log: LogSettings::default(),
            catalog: default_tracks(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume percent the player starts with.
    pub default_volume: u32,
    /// Length of one simulated playback second (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_volume: 80,
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    /// Name of the channel owner and mirrors meet on.
    pub name: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            name: CHANNEL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopoutSettings {
    /// Set to false to behave as if popups were blocked.
    pub allowed: bool,
    /// Name of the popout target window.
    pub target: String,
    /// Window width in pixels (10 px per terminal column).
    pub width: u32,
    /// Window height in pixels (25 px per terminal row).
    pub height: u32,
    /// Gap between the window and the bottom of the screen, in pixels.
    pub bottom_margin: u32,
    /// How often the opener checks whether the popout was closed (milliseconds).
    pub closed_poll_ms: u64,
}

impl Default for PopoutSettings {
    fn default() -> Self {
        Self {
            allowed: true,
            target: "MusicPlayerPopout".to_string(),
            width: 400,
            height: 500,
            bottom_margin: 100,
            closed_poll_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds the progress slider moves per `H` / `L`.
    pub scrub_seconds: u32,
    /// Percent the volume slider moves per `-` / `+`.
    pub volume_step: u32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Line shown under the player.
    pub footer_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tandem ~ ".to_string(),
            footer_text: "Currently playing from your local library".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MprisSettings {
    /// Expose the player on the session bus for media keys.
    pub enabled: bool,
}

impl Default for MprisSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file. Logging is off when unset (the terminal belongs to the UI).
    pub file: Option<PathBuf>,
    pub level: LogLevel,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Off,
    Error,
    #[serde(alias = "warning")]
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
