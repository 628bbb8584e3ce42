use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Upper bound on references accepted by a single [`DestinationPlaylistWriter::add_tracks`] call
pub const MAX_BATCH_SIZE: usize = 100;

/// Separator used when flattening performer names into [`TrackDescriptor::artist`]
pub const ARTIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    /// All of the track's artists, in credit order
    pub artist: String,
    /// Empty when the catalog has no album for the track
    pub album: String,
    pub duration_ms: Option<u64>,
    /// Identifier in the catalog the track was read from
    pub source_id: String,
}

#[cfg(test)]
impl TrackDescriptor {
    pub fn new(title: &str, artist: &str) -> Self {
        Self {
            title: title.to_owned(),
            artist: artist.to_owned(),
            album: String::new(),
            duration_ms: None,
            source_id: String::new(),
        }
    }
}

impl std::fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// A destination search or listing result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTrack {
    /// `source_id` holds the destination-local identifier
    pub track: TrackDescriptor,
    pub artists: Vec<String>,
    /// Handle accepted by [`DestinationPlaylistWriter::add_tracks`]
    pub reference: String,
}

#[cfg(test)]
impl CandidateTrack {
    pub fn new(title: &str, artists: &[&str], reference: &str) -> Self {
        let artists: Vec<String> = artists.iter().map(|&a| a.to_owned()).collect();
        Self {
            track: TrackDescriptor {
                title: title.to_owned(),
                artist: artists.join(ARTIST_SEPARATOR),
                album: String::new(),
                duration_ms: None,
                source_id: String::new(),
            },
            artists,
            reference: reference.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_count: u32,
}

pub trait SourceCatalogReader {
    async fn list_liked_tracks(&self) -> Result<Vec<TrackDescriptor>>;
}

pub trait DestinationSearcher {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CandidateTrack>>;
}

pub trait DestinationPlaylistReader {
    async fn list_user_playlists(&self) -> Result<Vec<PlaylistSummary>>;

    async fn list_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<CandidateTrack>>;
}

pub trait DestinationPlaylistWriter {
    /// Returns the id of the new playlist
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String>;

    /// `references` holds at most [`MAX_BATCH_SIZE`] entries
    async fn add_tracks(&self, playlist_id: &str, references: &[String]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_track_joins_artists_in_order() {
        let candidate = CandidateTrack::new("Under Pressure", &["Queen", "David Bowie"], "ref");
        assert_eq!(candidate.track.artist, "Queen, David Bowie");
        assert_eq!(candidate.artists, vec!["Queen", "David Bowie"]);
    }

    #[test]
    fn test_track_descriptor_display() {
        let track = TrackDescriptor::new("Bohemian Rhapsody", "Queen");
        assert_eq!(track.to_string(), "Queen - Bohemian Rhapsody");
    }
}
