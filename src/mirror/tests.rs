use super::*;
use crate::catalog::Catalog;
use crate::owner::Owner;

const CH: &str = "mirror_tests";
const SLOW: Duration = Duration::from_secs(3600);

fn owner(hub: &Hub) -> Owner {
    Owner::join(hub, CH, Catalog::default(), 80, SLOW).unwrap()
}

#[test]
fn starts_loading_with_defaults() {
    let hub = Hub::new();
    let mirror = Mirror::connect(&hub, CH).unwrap();
    assert!(mirror.state().is_loading());
    assert_eq!(mirror.state(), &MirrorState::default());
    assert_eq!(mirror.state().volume, 80);
}

#[test]
fn connect_bootstraps_from_the_owner() {
    let hub = Hub::new();
    let mut owner = owner(&hub);
    let mut mirror = Mirror::connect(&hub, CH).unwrap();

    owner.pump();
    assert_eq!(mirror.pump(), 4);

    let s = mirror.state();
    assert_eq!(s.track.as_ref().map(|t| t.id), Some(1));
    assert_eq!(s.track.as_ref().map(|t| t.duration), Some(245));
    assert!(!s.is_playing);
    assert_eq!(s.current_time, 0);
    assert_eq!(s.volume, 80);
}

#[test]
fn stays_loading_when_no_owner_answers() {
    let hub = Hub::new();
    let mut mirror = Mirror::connect(&hub, CH).unwrap();
    assert!(!mirror.wait(Duration::from_millis(20)));
    assert_eq!(mirror.pump(), 0);
    assert!(mirror.state().is_loading());
}

#[test]
fn operations_send_intents_without_touching_local_state() {
    let hub = Hub::new();
    let listener = hub.join(CH, Role::Owner).unwrap();
    let mirror = Mirror::connect(&hub, CH).unwrap();
    let before = mirror.state().clone();

    mirror.toggle_play_pause();
    mirror.previous();
    mirror.next();
    mirror.seek(12);
    mirror.set_volume(33);

    assert_eq!(mirror.state(), &before);
    assert_eq!(
        listener.drain(),
        vec![
            Message::RequestState,
            Message::TogglePlay,
            Message::PreviousTrack,
            Message::NextTrack,
            Message::Seek { time: 12 },
            Message::Volume { volume: 33 },
        ]
    );
}

#[test]
fn fields_are_adopted_independently() {
    let mut state = MirrorState::default();
    assert!(state.apply(&Message::TimeUpdate { current_time: 99 }));
    assert!(state.is_loading());
    assert_eq!(state.current_time, 99);

    assert!(state.apply(&Message::TrackUpdate {
        track: Track::new(2, "Crystallize", "Synthwave Dreams", "Neon Horizons", 198),
    }));
    // The time from before the track arrived is kept as-is.
    assert_eq!(state.current_time, 99);
    assert_eq!(state.track.as_ref().map(|t| t.id), Some(2));

    assert!(!state.apply(&Message::TogglePlay));
    assert!(!state.is_playing);
}

#[test]
fn intents_from_other_mirrors_are_ignored() {
    let hub = Hub::new();
    let mut a = Mirror::connect(&hub, CH).unwrap();
    let b = Mirror::connect(&hub, CH).unwrap();
    b.next();
    assert_eq!(a.pump(), 0);
    assert!(a.state().is_loading());
}

#[test]
fn playing_scenario_round_trip() {
    let hub = Hub::new();
    let mut owner = owner(&hub);
    let mut mirror = Mirror::connect(&hub, CH).unwrap();
    owner.pump();
    mirror.pump();

    mirror.toggle_play_pause();
    owner.pump();
    mirror.pump();
    assert!(owner.state().is_playing);
    assert!(mirror.state().is_playing);

    for _ in 0..245 {
        owner.tick();
    }
    mirror.pump();
    assert_eq!(owner.state().current_track.id, 2);
    assert_eq!(owner.state().current_time, 0);
    assert_eq!(mirror.state().track.as_ref().map(|t| t.id), Some(2));
    assert_eq!(mirror.state().current_time, 0);
}

#[test]
fn mirror_seek_past_duration_is_kept_by_owner() {
    let hub = Hub::new();
    let catalog = Catalog::new(vec![Track::new(1, "Short", "A", "B", 100)]).unwrap();
    let mut owner = Owner::join(&hub, CH, catalog, 80, SLOW).unwrap();
    let mut mirror = Mirror::connect(&hub, CH).unwrap();

    mirror.seek(120);
    owner.pump();
    mirror.pump();
    assert_eq!(owner.state().current_time, 120);
    assert_eq!(mirror.state().current_time, 120);
}

#[test]
fn next_from_last_track_wraps_for_the_mirror() {
    let hub = Hub::new();
    let mut owner = owner(&hub);
    owner.previous();
    assert_eq!(owner.state().current_track.id, 4);

    let mut mirror = Mirror::connect(&hub, CH).unwrap();
    mirror.next();
    owner.pump();
    mirror.pump();
    assert_eq!(mirror.state().track.as_ref().map(|t| t.id), Some(1));
    assert_eq!(mirror.state().current_time, 0);
}
