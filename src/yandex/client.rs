use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::catalog::{SourceCatalogReader, TrackDescriptor};
use crate::yandex::api_types::{self, AccountStatus, Likes, Root};

const API_BASE: &str = "https://api.music.yandex.net";

/// Track ids sent per details request
const DETAILS_CHUNK: usize = 100;

pub struct Client {
    client: reqwest::Client,
}

impl Client {
    /// Accepts the token with or without the `OAuth ` prefix of a copied header
    pub fn new(token: &str) -> Result<Self> {
        let token = token.strip_prefix("OAuth ").unwrap_or(token);
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("Authorization", format!("OAuth {}", token).try_into()?);
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let root: Root<T> = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(root.result)
    }

    pub async fn user_id(&self) -> Result<u64> {
        let status: AccountStatus = self.get(format!("{API_BASE}/account/status")).await?;
        status
            .account
            .uid
            .context("account status has no uid, is the token valid?")
    }

    async fn get_tracks(&self, ids: &[String]) -> Result<Vec<api_types::Track>> {
        let root: Root<Vec<api_types::Track>> = self
            .client
            .post(format!("{API_BASE}/tracks"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("track-ids={}", ids.join(",")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(root.result)
    }
}

impl SourceCatalogReader for Client {
    async fn list_liked_tracks(&self) -> Result<Vec<TrackDescriptor>> {
        let uid = self.user_id().await?;
        let likes: Likes = self
            .get(format!("{API_BASE}/users/{uid}/likes/tracks"))
            .await?;
        let ids: Vec<String> = likes
            .library
            .tracks
            .iter()
            .map(|track| track.id.to_string())
            .collect();
        info!("{} liked tracks", ids.len());

        let mut details: HashMap<String, api_types::Track> = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(DETAILS_CHUNK) {
            for track in self.get_tracks(chunk).await? {
                details.insert(track.id.to_string(), track);
            }
        }

        // Keep the order of the likes list, not of the details responses
        let mut tracks = Vec::with_capacity(ids.len());
        for id in &ids {
            match details.remove(id).and_then(api_types::Track::into_descriptor) {
                Some(track) => tracks.push(track),
                None => debug!("liked track {id} is unavailable, skipping"),
            }
        }
        Ok(tracks)
    }
}
