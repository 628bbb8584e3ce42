use crate::catalog::{CandidateTrack, TrackDescriptor};
use crate::matching::normalize::normalize;

pub const TITLE_WEIGHT: f64 = 0.7;
pub const ARTIST_WEIGHT: f64 = 0.3;

pub const DEFAULT_PRESENCE_THRESHOLD: f64 = 0.85;

/// Normalized edit-distance ratio in `[0, 1]`, symmetric in its arguments
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Ranking score used when choosing among search results.
///
/// Artist strings are noisier than titles (joined credit lists, localized names), so the
/// title dominates and the artist term takes the best of the candidate's individual artists.
pub fn title_artist_score(target: &TrackDescriptor, candidate: &CandidateTrack) -> f64 {
    let title_score = similarity(
        &target.title.to_lowercase(),
        &candidate.track.title.to_lowercase(),
    );

    let target_artist = target.artist.to_lowercase();
    let artist_score = candidate
        .artists
        .iter()
        .map(|artist| similarity(&target_artist, &artist.to_lowercase()))
        .fold(0.0, f64::max);

    TITLE_WEIGHT * title_score + ARTIST_WEIGHT * artist_score
}

/// Coarse "already there" check over the normalized keys of both tracks
pub fn track_similarity(a: &TrackDescriptor, b: &TrackDescriptor, threshold: f64) -> bool {
    let a = normalize(&a.title, &a.artist);
    let b = normalize(&b.title, &b.artist);
    similarity(a.as_str(), b.as_str()) >= threshold
}
