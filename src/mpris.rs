//! MPRIS bridge for desktop media keys and `playerctl`.
//!
//! The bridge is one more mirror on the player channel: it caches the
//! owner's snapshots for property reads and turns D-Bus method calls into
//! intents. It never touches the owner directly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::thread;
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::bus::{Hub, Poster};
use crate::error::SyncError;
use crate::mirror::{Mirror, MirrorState};
use crate::protocol::Message;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.tandem";
const MIRROR_POLL: Duration = Duration::from_millis(500);

/// Requests the bridge cannot express as channel intents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
}

type SharedState = Arc<Mutex<MirrorState>>;

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "tandem"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    poster: Poster,
    state: SharedState,
}

impl PlayerIface {
    fn snapshot(&self) -> MirrorState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn intent(&self, msg: Message) {
        if let Err(e) = self.poster.post(&msg) {
            log::warn!(
                "MPRIS: failed to forward {} on '{}': {e}",
                msg.kind(),
                self.poster.channel()
            );
        }
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.intent(Message::NextTrack);
    }

    fn previous(&self) {
        self.intent(Message::PreviousTrack);
    }

    fn play(&self) {
        if !self.snapshot().is_playing {
            self.intent(Message::TogglePlay);
        }
    }

    fn pause(&self) {
        if self.snapshot().is_playing {
            self.intent(Message::TogglePlay);
        }
    }

    fn play_pause(&self) {
        self.intent(Message::TogglePlay);
    }

    fn stop(&self) {
        // There is no stopped state; stopping pauses.
        self.pause();
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        playback_status(&self.snapshot())
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        i64::from(self.snapshot().current_time) * 1_000_000
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        f64::from(self.snapshot().volume) / 100.0
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        metadata(&self.snapshot())
    }
}

/// MPRIS `PlaybackStatus` for a mirrored state. A mirror with no track yet reports stopped.
fn playback_status(state: &MirrorState) -> &'static str {
    if state.is_loading() {
        "Stopped"
    } else if state.is_playing {
        "Playing"
    } else {
        "Paused"
    }
}

fn metadata(state: &MirrorState) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();
    let Some(track) = state.track.as_ref() else {
        return map;
    };

    let mut put = |key: &str, value: Value<'_>| {
        if let Ok(v) = OwnedValue::try_from(value) {
            map.insert(key.to_string(), v);
        }
    };

    if let Ok(path) = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", track.id)) {
        put("mpris:trackid", Value::from(path));
    }
    put("xesam:title", Value::from(track.title.clone()));
    put("xesam:artist", Value::from(vec![track.artist.clone()]));
    put("xesam:album", Value::from(track.album.clone()));
    put("mpris:artUrl", Value::from(track.cover.clone()));
    put(
        "mpris:length",
        Value::from(i64::from(track.duration) * 1_000_000),
    );
    map
}

/// Join `channel` as a mirror and serve it on the session bus.
///
/// Joining happens here so channel errors surface to the caller; session-bus
/// problems are only logged since media keys are optional.
pub fn spawn_mpris(hub: &Hub, channel: &str, tx: Sender<ControlCmd>) -> Result<(), SyncError> {
    let mirror = Mirror::connect(hub, channel)?;
    let state: SharedState = Arc::new(Mutex::new(mirror.state().clone()));
    let poster = mirror.poster();

    // Set once the D-Bus side is gone so the mirror leaves the channel.
    let done = Arc::new(AtomicBool::new(false));

    let state_for_mirror = state.clone();
    let done_for_mirror = done.clone();
    thread::Builder::new()
        .name("mpris-mirror".into())
        .spawn(move || run_mirror(mirror, &state_for_mirror, &done_for_mirror))
        .map_err(|source| SyncError::Spawn {
            what: "MPRIS mirror",
            source,
        })?;

    let done_for_dbus = done.clone();
    thread::Builder::new()
        .name("mpris-dbus".into())
        .spawn(move || {
            block_on(serve(tx, poster, state));
            done_for_dbus.store(true, Ordering::Relaxed);
        })
        .map_err(|source| {
            done.store(true, Ordering::Relaxed);
            SyncError::Spawn {
                what: "MPRIS D-Bus",
                source,
            }
        })?;

    Ok(())
}

/// Keep `state` in step with the channel until `done` is set.
fn run_mirror(mut mirror: Mirror, state: &SharedState, done: &AtomicBool) {
    while !done.load(Ordering::Relaxed) {
        if mirror.wait(MIRROR_POLL) {
            mirror.pump();
            if let Ok(mut s) = state.lock() {
                *s = mirror.state().clone();
            }
        }
    }
    log::debug!("MPRIS: mirror stopped");
}

async fn serve(tx: Sender<ControlCmd>, poster: Poster, state: SharedState) {
    let connection = match Connection::session().await {
        Ok(c) => c,
        Err(e) => {
            log::warn!("MPRIS: failed to connect to session bus: {e}");
            return;
        }
    };

    if let Err(e) = connection.request_name(BUS_NAME).await {
        log::warn!("MPRIS: failed to acquire name: {e}");
        return;
    }

    let object_server = connection.object_server();

    if let Err(e) = object_server.at(OBJECT_PATH, RootIface { tx }).await {
        log::warn!("MPRIS: failed to register root iface: {e}");
        return;
    }

    if let Err(e) = object_server
        .at(OBJECT_PATH, PlayerIface { poster, state })
        .await
    {
        log::warn!("MPRIS: failed to register player iface: {e}");
        return;
    }

    log::info!("MPRIS: serving as {BUS_NAME}");
    // Keep the service alive.
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

#[cfg(test)]
mod tests;
