use serde::{Deserialize, Serialize};

use crate::catalog::PlaylistSummary;
use crate::spotify::api_types::track::Track;

#[derive(Deserialize)]
pub struct Page<T> {
    pub(in crate::spotify) items: Vec<T>,
    /// URL of the next page
    pub(in crate::spotify) next: Option<String>,
}

#[derive(Deserialize)]
pub struct SimplifiedPlaylist {
    pub(in crate::spotify) id: String,
    pub(in crate::spotify) name: String,
    pub(in crate::spotify) tracks: Option<PlaylistTracksRef>,
}

#[derive(Deserialize)]
pub struct PlaylistTracksRef {
    pub(in crate::spotify) total: u32,
}

#[derive(Deserialize)]
pub struct PlaylistItem {
    /// `None` when the track was removed from the catalog
    pub(in crate::spotify) track: Option<Track>,
}

#[derive(Deserialize)]
pub struct CreatedPlaylist {
    pub(in crate::spotify) id: String,
}

#[derive(Deserialize)]
pub struct User {
    pub(in crate::spotify) id: String,
}

#[derive(Serialize)]
pub struct CreatePlaylistBody<'a> {
    pub(in crate::spotify) name: &'a str,
    pub(in crate::spotify) description: &'a str,
    pub(in crate::spotify) public: bool,
}

#[derive(Serialize)]
pub struct AddTracksBody<'a> {
    pub(in crate::spotify) uris: &'a [String],
}

impl From<SimplifiedPlaylist> for PlaylistSummary {
    fn from(playlist: SimplifiedPlaylist) -> Self {
        PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
            track_count: playlist.tracks.map_or(0, |t| t.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_page_deserialize() {
        let json = r#"{
            "href": "https://api.spotify.com/v1/me/playlists?offset=0&limit=50",
            "items": [
                {
                    "id": "37i9dQZF1DXcBWIGoYBM5M",
                    "name": "Liked (imported)",
                    "public": false,
                    "tracks": { "href": "...", "total": 120 }
                }
            ],
            "next": "https://api.spotify.com/v1/me/playlists?offset=50&limit=50"
        }"#;
        let page: Page<SimplifiedPlaylist> = serde_json::from_str(json).unwrap();
        assert!(page.next.is_some());
        let summary = PlaylistSummary::from(page.items.into_iter().next().unwrap());
        assert_eq!(
            summary,
            PlaylistSummary {
                id: "37i9dQZF1DXcBWIGoYBM5M".to_owned(),
                name: "Liked (imported)".to_owned(),
                track_count: 120,
            },
        );
    }

    #[test]
    fn test_playlist_items_with_removed_track() {
        let json = r#"{
            "items": [
                { "added_at": "2024-01-01T00:00:00Z", "track": null },
                {
                    "added_at": "2024-01-02T00:00:00Z",
                    "track": {
                        "id": null,
                        "uri": "spotify:local:Artist:Album:Title:180",
                        "name": "Title",
                        "type": "track",
                        "duration_ms": 180000,
                        "album": { "name": "Album" },
                        "artists": [{ "name": "Artist" }]
                    }
                }
            ],
            "next": null
        }"#;
        let page: Page<PlaylistItem> = serde_json::from_str(json).unwrap();
        assert!(page.next.is_none());
        assert!(page.items[0].track.is_none());
        let track = page.items[1].track.as_ref().unwrap();
        assert!(track.id.is_none());
        assert!(track.is_track());
    }

    #[test]
    fn test_add_tracks_body() {
        let uris = vec!["spotify:track:4u7EnebtmKWzUH433cf5Qv".to_owned()];
        let body = serde_json::to_value(AddTracksBody { uris: &uris }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "uris": ["spotify:track:4u7EnebtmKWzUH433cf5Qv"] }),
        );
    }
}
