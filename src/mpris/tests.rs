use super::*;
use crate::bus::Role;
use crate::catalog::Track;
use std::sync::mpsc;

const CH: &str = "mpris_tests";

fn playing_state() -> MirrorState {
    MirrorState {
        track: Some(Track::new(3, "Sunset Drive", "FM-84", "Atlas", 267)),
        is_playing: true,
        current_time: 12,
        volume: 40,
    }
}

fn iface(hub: &Hub, state: MirrorState) -> PlayerIface {
    PlayerIface {
        poster: hub.join(CH, Role::Mirror).unwrap().poster(),
        state: Arc::new(Mutex::new(state)),
    }
}

#[test]
fn playback_status_follows_track_and_play_flag() {
    let mut s = MirrorState::default();
    assert_eq!(playback_status(&s), "Stopped");

    s = playing_state();
    assert_eq!(playback_status(&s), "Playing");

    s.is_playing = false;
    assert_eq!(playback_status(&s), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_a_track_is_known() {
    let map = metadata(&playing_state());
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_is_empty_while_loading() {
    assert!(metadata(&MirrorState::default()).is_empty());
}

#[test]
fn properties_read_the_mirrored_state() {
    let hub = Hub::new();
    let iface = iface(&hub, playing_state());
    assert_eq!(iface.playback_status(), "Playing");
    assert_eq!(iface.position(), 12_000_000);
    assert!((iface.volume() - 0.4).abs() < f64::EPSILON);
}

#[test]
fn methods_forward_intents_to_the_owner() {
    let hub = Hub::new();
    let owner = hub.join(CH, Role::Owner).unwrap();
    let iface = iface(&hub, playing_state());

    iface.next();
    iface.previous();
    iface.play_pause();
    // Already playing: Play is a no-op, Pause and Stop both toggle.
    iface.play();
    iface.pause();
    iface.stop();

    assert_eq!(
        owner.drain(),
        vec![
            Message::NextTrack,
            Message::PreviousTrack,
            Message::TogglePlay,
            Message::TogglePlay,
            Message::TogglePlay,
        ]
    );
}

#[test]
fn quit_is_forwarded_to_the_ui_loop() {
    let (tx, rx) = mpsc::channel();
    let root = RootIface { tx };
    root.quit();
    assert_eq!(rx.try_recv(), Ok(ControlCmd::Quit));
}

#[test]
fn mirror_loop_follows_the_owner_and_leaves_when_done() {
    let hub = Hub::new();
    let owner = hub.join(CH, Role::Owner).unwrap();
    let mirror = Mirror::connect(&hub, CH).unwrap();
    assert_eq!(hub.listeners(CH), 2);

    let state: SharedState = Arc::new(Mutex::new(MirrorState::default()));
    let done = Arc::new(AtomicBool::new(false));
    let handle = {
        let (state, done) = (state.clone(), done.clone());
        thread::spawn(move || run_mirror(mirror, &state, &done))
    };

    let track = playing_state().track.unwrap();
    owner.post(&Message::TrackUpdate { track }).unwrap();
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while state.lock().unwrap().is_loading() && std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(!state.lock().unwrap().is_loading());

    done.store(true, Ordering::Relaxed);
    handle.join().unwrap();
    assert_eq!(hub.listeners(CH), 1);
}
