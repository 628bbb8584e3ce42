use anyhow::{Result, ensure};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::{
    CandidateTrack, DestinationPlaylistReader, DestinationPlaylistWriter, DestinationSearcher,
    MAX_BATCH_SIZE, PlaylistSummary,
};
use crate::spotify::api_types::playlist::{
    AddTracksBody, CreatePlaylistBody, CreatedPlaylist, Page, PlaylistItem, SimplifiedPlaylist,
    User,
};
use crate::spotify::api_types::track::SearchRoot;
use crate::spotify::validate_track_uri;

const API_BASE: &str = "https://api.spotify.com/v1";

pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn new(access_token: &str) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {}", access_token).try_into()?,
            );
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    async fn get<T: DeserializeOwned>(&self, url: impl reqwest::IntoUrl) -> Result<T> {
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Follows `next` links until the last page
    async fn get_all<T: DeserializeOwned>(&self, first_page: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_page);
        while let Some(url) = next {
            let page: Page<T> = self.get(url).await?;
            items.extend(page.items);
            next = page.next;
        }
        Ok(items)
    }

    pub async fn current_user_id(&self) -> Result<String> {
        let user: User = self.get(format!("{API_BASE}/me")).await?;
        Ok(user.id)
    }
}

impl DestinationSearcher for Client {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CandidateTrack>> {
        let limit = limit.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{API_BASE}/search"),
            &[("q", query), ("type", "track"), ("limit", limit.as_str())],
        )?;
        let root: SearchRoot = self.get(url).await?;
        Ok(root
            .tracks
            .items
            .into_iter()
            .flatten()
            .map(CandidateTrack::from)
            .collect())
    }
}

impl DestinationPlaylistReader for Client {
    async fn list_user_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        let playlists: Vec<SimplifiedPlaylist> = self
            .get_all(format!("{API_BASE}/me/playlists?limit=50"))
            .await?;
        Ok(playlists.into_iter().map(PlaylistSummary::from).collect())
    }

    async fn list_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<CandidateTrack>> {
        let items: Vec<PlaylistItem> = self
            .get_all(format!("{API_BASE}/playlists/{playlist_id}/tracks?limit=100"))
            .await?;
        let total = items.len();
        let tracks: Vec<CandidateTrack> = items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| track.is_track())
            .map(CandidateTrack::from)
            .collect();
        debug!(
            "playlist {playlist_id}: {} tracks, {} other items skipped",
            tracks.len(),
            total - tracks.len(),
        );
        Ok(tracks)
    }
}

impl DestinationPlaylistWriter for Client {
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String> {
        let user_id = self.current_user_id().await?;
        let created: CreatedPlaylist = self
            .client
            .post(format!("{API_BASE}/users/{user_id}/playlists"))
            .json(&CreatePlaylistBody {
                name,
                description,
                public: false,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created.id)
    }

    async fn add_tracks(&self, playlist_id: &str, references: &[String]) -> Result<()> {
        ensure!(
            references.len() <= MAX_BATCH_SIZE,
            "at most {MAX_BATCH_SIZE} tracks can be added at once, got {}",
            references.len(),
        );
        if let Some(invalid) = references.iter().find(|uri| !validate_track_uri(uri)) {
            anyhow::bail!("invalid track URI: {invalid}");
        }
        self.client
            .post(format!("{API_BASE}/playlists/{playlist_id}/tracks"))
            .json(&AddTracksBody { uris: references })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
