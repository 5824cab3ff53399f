use super::*;

fn t(id: u32, duration: u32) -> Track {
    Track::new(id, &format!("Track {id}"), "Artist", "Album", duration)
}

#[test]
fn default_catalog_matches_shipped_tracks() {
    let c = Catalog::default();
    assert_eq!(c.len(), 4);
    assert_eq!(c.first().id, 1);
    assert_eq!(c.first().duration, 245);
    assert_eq!(c.tracks()[3].title, "Digital Love");
    assert!(Catalog::new(default_tracks()).is_ok());
}

#[test]
fn next_and_previous_wrap_at_both_ends() {
    let c = Catalog::default();
    assert_eq!(c.next_after(4).id, 1);
    assert_eq!(c.previous_before(1).id, 4);
    assert_eq!(c.next_after(2).id, 3);
    assert_eq!(c.previous_before(3).id, 2);
}

#[test]
fn next_then_previous_returns_to_start() {
    let c = Catalog::default();
    for track in c.tracks() {
        let next = c.next_after(track.id).id;
        assert_eq!(c.previous_before(next).id, track.id);
    }
}

#[test]
fn single_track_catalog_cycles_onto_itself() {
    let c = Catalog::new(vec![t(9, 10)]).unwrap();
    assert_eq!(c.next_after(9).id, 9);
    assert_eq!(c.previous_before(9).id, 9);
}

#[test]
fn new_rejects_empty_duplicate_and_zero_length() {
    assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    assert_eq!(
        Catalog::new(vec![t(1, 10), t(2, 10), t(1, 20)]).unwrap_err(),
        CatalogError::DuplicateId(1)
    );
    assert_eq!(
        Catalog::new(vec![t(1, 10), t(5, 0)]).unwrap_err(),
        CatalogError::ZeroDuration(5)
    );
}

#[test]
fn display_prefers_artist_dash_title() {
    let mut track = t(1, 10);
    assert_eq!(track.display(), "Artist - Track 1");
    track.artist = "   ".into();
    assert_eq!(track.display(), "Track 1");
}
