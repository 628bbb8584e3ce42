mod api_types;
mod client;

pub use client::Client;

/// Base62 catalog ID, as used for tracks and playlists
pub fn validate_id(id: &str) -> bool {
    id.len() == 22 && id.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_track_uri(uri: &str) -> bool {
    uri.strip_prefix("spotify:track:").is_some_and(validate_id)
}

/// Only checks the token is usable as a header value; expiry is reported by the API
pub fn validate_access_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_graphic())
}
