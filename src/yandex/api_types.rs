use std::fmt;

use serde::Deserialize;

use crate::catalog::{ARTIST_SEPARATOR, TrackDescriptor};

#[derive(Deserialize)]
pub struct Root<T> {
    pub(in crate::yandex) result: T,
}

#[derive(Deserialize)]
pub struct AccountStatus {
    pub(in crate::yandex) account: Account,
}

#[derive(Deserialize)]
pub struct Account {
    /// Missing when the token is not authorized
    pub(in crate::yandex) uid: Option<u64>,
}

#[derive(Deserialize)]
pub struct Likes {
    pub(in crate::yandex) library: Library,
}

#[derive(Deserialize)]
pub struct Library {
    pub(in crate::yandex) tracks: Vec<LikedTrack>,
}

#[derive(Deserialize)]
pub struct LikedTrack {
    pub(in crate::yandex) id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub(in crate::yandex) id: Id,
    pub(in crate::yandex) title: Option<String>,
    #[serde(default)]
    pub(in crate::yandex) artists: Vec<Artist>,
    #[serde(default)]
    pub(in crate::yandex) albums: Vec<Album>,
    pub(in crate::yandex) duration_ms: Option<u64>,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::yandex) name: String,
}

#[derive(Deserialize)]
pub struct Album {
    pub(in crate::yandex) title: Option<String>,
}

/// Track ids come back as numbers in some responses and strings in others
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Id {
    Number(u64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(id) => write!(f, "{id}"),
            Id::Text(id) => f.write_str(id),
        }
    }
}

impl Track {
    /// `None` for tracks without a title, which the service returns for removed content
    pub fn into_descriptor(self) -> Option<TrackDescriptor> {
        let title = self.title.filter(|title| !title.is_empty())?;
        let artist = self
            .artists
            .into_iter()
            .map(|artist| artist.name)
            .collect::<Vec<_>>()
            .join(ARTIST_SEPARATOR);
        let album = self
            .albums
            .into_iter()
            .next()
            .and_then(|album| album.title)
            .unwrap_or_default();
        Some(TrackDescriptor {
            title,
            artist,
            album,
            duration_ms: self.duration_ms,
            source_id: self.id.to_string(),
        })
    }
}
