use serde::{Deserialize, Serialize};

const PLACEHOLDER_COVER: &str = "/placeholder.svg?height=300&width=300";

/// A single catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// URI of the cover art.
    #[serde(default = "placeholder_cover")]
    pub cover: String,
    /// Length in whole seconds.
    pub duration: u32,
}

fn placeholder_cover() -> String {
    PLACEHOLDER_COVER.to_string()
}

impl Track {
    pub fn new(id: u32, title: &str, artist: &str, album: &str, duration: u32) -> Self {
        Self {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            cover: placeholder_cover(),
            duration,
        }
    }

    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            artist => format!("{} - {}", artist, self.title),
        }
    }
}

/// The tracks shipped with the player when the config names none.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new(1, "Breathe", "The Midnight", "Days of Thunder", 245),
        Track::new(2, "Crystallize", "Synthwave Dreams", "Neon Horizons", 198),
        Track::new(3, "Sunset Drive", "FM-84", "Atlas", 267),
        Track::new(4, "Digital Love", "Daft Punk", "Discovery", 301),
    ]
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("the catalog has no tracks")]
    Empty,
    #[error("track id {0} appears more than once")]
    DuplicateId(u32),
    #[error("track id {0} has a zero duration")]
    ZeroDuration(u32),
}

/// Fixed, ordered, non-empty sequence of tracks with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, track) in tracks.iter().enumerate() {
            if track.duration == 0 {
                return Err(CatalogError::ZeroDuration(track.id));
            }
            if tracks[..i].iter().any(|t| t.id == track.id) {
                return Err(CatalogError::DuplicateId(track.id));
            }
        }
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Track after `id`, wrapping to the first. Unknown ids restart the cycle.
    pub fn next_after(&self, id: u32) -> &Track {
        match self.position_of(id) {
            Some(p) => &self.tracks[(p + 1) % self.tracks.len()],
            None => self.first(),
        }
    }

    /// Track before `id`, wrapping to the last. Unknown ids land on the last.
    pub fn previous_before(&self, id: u32) -> &Track {
        let last = self.tracks.len() - 1;
        match self.position_of(id) {
            Some(0) | None => &self.tracks[last],
            Some(p) => &self.tracks[p - 1],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            tracks: default_tracks(),
        }
    }
}
