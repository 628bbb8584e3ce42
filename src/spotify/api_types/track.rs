use serde::Deserialize;

use crate::catalog::{ARTIST_SEPARATOR, CandidateTrack, TrackDescriptor};

#[derive(Deserialize)]
pub struct SearchRoot {
    pub(in crate::spotify) tracks: SearchTracks,
}

#[derive(Deserialize)]
pub struct SearchTracks {
    /// Spotify occasionally returns `null` entries here
    pub(in crate::spotify) items: Vec<Option<Track>>,
}

/// Also used for playlist items, which can be episodes or local files
#[derive(Deserialize)]
pub struct Track {
    /// `None` for local files
    pub(in crate::spotify) id: Option<String>,
    pub(in crate::spotify) uri: String,
    pub(in crate::spotify) name: String,
    #[serde(default)]
    pub(in crate::spotify) artists: Vec<Artist>,
    pub(in crate::spotify) album: Option<Album>,
    pub(in crate::spotify) duration_ms: Option<u64>,
    /// `track` or `episode`
    #[serde(rename = "type")]
    pub(in crate::spotify) kind: String,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::spotify) name: String,
}

#[derive(Deserialize)]
pub struct Album {
    pub(in crate::spotify) name: String,
}

impl Track {
    pub fn is_track(&self) -> bool {
        self.kind == "track"
    }
}

impl From<Track> for CandidateTrack {
    fn from(track: Track) -> Self {
        let artists: Vec<String> = track.artists.into_iter().map(|a| a.name).collect();
        CandidateTrack {
            track: TrackDescriptor {
                title: track.name,
                artist: artists.join(ARTIST_SEPARATOR),
                album: track.album.map(|a| a.name).unwrap_or_default(),
                duration_ms: track.duration_ms,
                source_id: track.id.unwrap_or_default(),
            },
            artists,
            reference: track.uri,
        }
    }
}
