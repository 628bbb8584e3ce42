mod progress;
pub mod report;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::catalog::{
    DestinationPlaylistReader, DestinationPlaylistWriter, DestinationSearcher, MAX_BATCH_SIZE,
    PlaylistSummary, TrackDescriptor,
};
use crate::error::SyncError;
use crate::matching::{self, DEFAULT_MIN_SCORE, DEFAULT_PRESENCE_THRESHOLD};

pub use progress::{LogProgress, ProgressSink, Stage};

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Results requested per search query
    pub search_limit: u32,
    /// Exclusive lower bound for accepting a search result
    pub min_score: f64,
    /// Inclusive lower bound for treating a destination track as already present
    pub presence_threshold: f64,
    /// Clamped to `1..=MAX_BATCH_SIZE`
    pub batch_size: usize,
    /// Slept after every track search and every batch write
    pub pause: Duration,
    /// Where unresolved tracks are dumped; `None` skips the dump
    pub report_path: Option<PathBuf>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
            batch_size: MAX_BATCH_SIZE,
            pause: DEFAULT_PAUSE,
            report_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// A new playlist was created from the whole source catalog
    Transfer,
    /// Only tracks missing from an existing playlist were added
    Update,
}

impl SyncMode {
    /// The mode [`Synchronizer::synchronize`] takes for the given playlist
    pub fn for_playlist(existing_playlist_id: Option<&str>) -> Self {
        match existing_playlist_id {
            Some(_) => SyncMode::Update,
            None => SyncMode::Transfer,
        }
    }
}

#[derive(Debug)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub playlist_id: String,
    /// Tracks that went through search in this run
    pub searched: usize,
    pub resolved_references: Vec<String>,
    pub unresolved_tracks: Vec<TrackDescriptor>,
    /// Source tracks that resolved to a reference already queued or already in the playlist
    pub duplicates: usize,
    /// Playlist size before the run, for updates
    pub tracks_before: Option<usize>,
    /// Set when the unresolved dump was written
    pub report_path: Option<PathBuf>,
}

impl SyncReport {
    pub fn resolved_count(&self) -> usize {
        self.resolved_references.len()
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved_tracks.len()
    }

    pub fn tracks_after(&self) -> Option<usize> {
        self.tracks_before
            .map(|before| before + self.resolved_references.len())
    }
}

#[derive(Debug, Default)]
struct Resolution {
    references: Vec<String>,
    unresolved: Vec<TrackDescriptor>,
    duplicates: usize,
}

/// First playlist whose name matches case-insensitively
pub fn find_playlist_by_name<'a>(
    playlists: &'a [PlaylistSummary],
    name: &str,
) -> Option<&'a PlaylistSummary> {
    let name = name.to_lowercase();
    playlists
        .iter()
        .find(|playlist| playlist.name.to_lowercase() == name)
}

pub async fn locate_playlist<D: DestinationPlaylistReader>(
    destination: &D,
    name: &str,
) -> Result<Option<PlaylistSummary>, SyncError> {
    let playlists = destination
        .list_user_playlists()
        .await
        .map_err(SyncError::destination_unavailable)?;
    Ok(find_playlist_by_name(&playlists, name).cloned())
}

/// Destination queries for a track, from most to least specific
pub fn search_queries(track: &TrackDescriptor) -> Vec<String> {
    let TrackDescriptor { title, artist, .. } = track;
    let mut queries = vec![
        format!("track:\"{title}\" artist:\"{artist}\""),
        format!("\"{title}\" \"{artist}\""),
        format!("{title} {artist}"),
    ];
    if title.chars().count() > 3 {
        queries.push(format!("track:\"{title}\""));
    }
    queries
}

pub struct Synchronizer<'a, D> {
    destination: &'a D,
    options: SyncOptions,
    progress: &'a dyn ProgressSink,
}

impl<'a, D> Synchronizer<'a, D>
where
    D: DestinationSearcher + DestinationPlaylistReader + DestinationPlaylistWriter,
{
    pub fn new(destination: &'a D, options: SyncOptions, progress: &'a dyn ProgressSink) -> Self {
        Self {
            destination,
            options,
            progress,
        }
    }

    /// Updates `existing_playlist_id` when given, otherwise creates `playlist_name` if allowed
    pub async fn synchronize(
        &self,
        source_tracks: &[TrackDescriptor],
        playlist_name: &str,
        existing_playlist_id: Option<&str>,
        create_if_missing: bool,
    ) -> Result<SyncReport, SyncError> {
        match existing_playlist_id {
            Some(playlist_id) => self.update(source_tracks, playlist_id).await,
            None if create_if_missing => self.transfer(source_tracks, playlist_name).await,
            None => Err(SyncError::PlaylistNotFound(playlist_name.to_owned())),
        }
    }

    pub async fn transfer(
        &self,
        source_tracks: &[TrackDescriptor],
        playlist_name: &str,
    ) -> Result<SyncReport, SyncError> {
        info!("searching destination for {} tracks", source_tracks.len());
        let resolution = self.resolve(source_tracks, HashSet::new()).await;
        if resolution.references.is_empty() {
            self.persist_unresolved(&resolution.unresolved);
            return Err(SyncError::NoTracksResolved {
                attempted: source_tracks.len(),
            });
        }

        let description = format!(
            "Synchronized from liked tracks. Matched {}/{} tracks",
            resolution.references.len(),
            source_tracks.len(),
        );
        let playlist_id = self
            .destination
            .create_playlist(playlist_name, &description)
            .await
            .map_err(|error| SyncError::DestinationWrite {
                playlist: playlist_name.to_owned(),
                action: "create playlist".to_owned(),
                source: error.into(),
            })?;
        info!("created playlist \"{playlist_name}\" ({playlist_id})");

        self.apply_in_batches(&playlist_id, &resolution.references)
            .await?;
        let report_path = self.persist_unresolved(&resolution.unresolved);

        Ok(SyncReport {
            mode: SyncMode::Transfer,
            playlist_id,
            searched: source_tracks.len(),
            resolved_references: resolution.references,
            unresolved_tracks: resolution.unresolved,
            duplicates: resolution.duplicates,
            tracks_before: None,
            report_path,
        })
    }

    pub async fn update(
        &self,
        source_tracks: &[TrackDescriptor],
        playlist_id: &str,
    ) -> Result<SyncReport, SyncError> {
        let (present, existing): (HashSet<String>, Vec<TrackDescriptor>) = self
            .destination
            .list_playlist_tracks(playlist_id)
            .await
            .map_err(SyncError::destination_unavailable)?
            .into_iter()
            .map(|candidate| (candidate.reference, candidate.track))
            .unzip();

        info!(
            "comparing {} source tracks against {} playlist tracks",
            source_tracks.len(),
            existing.len(),
        );
        let missing =
            matching::find_missing(source_tracks, &existing, self.options.presence_threshold);
        self.progress
            .on_progress(Stage::Comparing, source_tracks.len(), source_tracks.len());
        info!("{} tracks missing from the playlist", missing.len());

        let mut report = SyncReport {
            mode: SyncMode::Update,
            playlist_id: playlist_id.to_owned(),
            searched: missing.len(),
            resolved_references: Vec::new(),
            unresolved_tracks: Vec::new(),
            duplicates: 0,
            tracks_before: Some(existing.len()),
            report_path: None,
        };
        if missing.is_empty() {
            return Ok(report);
        }

        // Fuzzy misses can still resolve to a reference the playlist already holds
        let resolution = self.resolve(&missing, present).await;
        if resolution.references.is_empty() && resolution.duplicates == 0 {
            self.persist_unresolved(&resolution.unresolved);
            return Err(SyncError::NoTracksResolved {
                attempted: missing.len(),
            });
        }

        self.apply_in_batches(playlist_id, &resolution.references)
            .await?;
        report.report_path = self.persist_unresolved(&resolution.unresolved);
        report.resolved_references = resolution.references;
        report.unresolved_tracks = resolution.unresolved;
        report.duplicates = resolution.duplicates;
        Ok(report)
    }

    /// References in `seen` count as duplicates and are not queued again
    async fn resolve(&self, tracks: &[TrackDescriptor], mut seen: HashSet<String>) -> Resolution {
        let mut resolution = Resolution::default();

        for (i, track) in tracks.iter().enumerate() {
            self.progress.on_progress(Stage::Resolving, i + 1, tracks.len());

            match self.search_track(track).await {
                Ok(Some(reference)) => {
                    if seen.insert(reference.clone()) {
                        resolution.references.push(reference);
                    } else {
                        debug!("{track} resolved to already present {reference}, skipping");
                        resolution.duplicates += 1;
                    }
                }
                Ok(None) => {
                    debug!("no match for {track}");
                    resolution.unresolved.push(track.clone());
                }
                Err(error) => {
                    warn!("search failed for {track}: {error:#}");
                    resolution.unresolved.push(track.clone());
                }
            }

            self.pause().await;
        }

        info!(
            "resolved {}/{} tracks",
            resolution.references.len(),
            tracks.len(),
        );
        resolution
    }

    /// Tries each query in turn and stops at the first one that yields a match
    async fn search_track(&self, track: &TrackDescriptor) -> Result<Option<String>> {
        for query in search_queries(track) {
            let candidates = self
                .destination
                .search(&query, self.options.search_limit)
                .await?;
            if let Some(best) = matching::select_best(track, &candidates, self.options.min_score) {
                debug!(
                    "{track} matched {} ({:.3}) with query {query}",
                    best.candidate.track, best.score,
                );
                return Ok(Some(best.candidate.reference.clone()));
            }
        }
        Ok(None)
    }

    async fn apply_in_batches(
        &self,
        playlist_id: &str,
        references: &[String],
    ) -> Result<(), SyncError> {
        let batch_size = self.options.batch_size.clamp(1, MAX_BATCH_SIZE);
        let batches = references.len().div_ceil(batch_size);
        let mut added = 0;

        for (i, batch) in references.chunks(batch_size).enumerate() {
            self.destination
                .add_tracks(playlist_id, batch)
                .await
                .map_err(|error| SyncError::DestinationWrite {
                    playlist: playlist_id.to_owned(),
                    action: format!("add batch {} of {batches}", i + 1),
                    source: error.into(),
                })?;
            added += batch.len();
            info!("added {} tracks ({added}/{})", batch.len(), references.len());
            self.progress.on_progress(Stage::Applying, i + 1, batches);

            self.pause().await;
        }

        Ok(())
    }

    fn persist_unresolved(&self, tracks: &[TrackDescriptor]) -> Option<PathBuf> {
        if tracks.is_empty() {
            return None;
        }
        let path = self.options.report_path.clone()?;
        match report::write_unresolved(&path, tracks) {
            Ok(()) => {
                info!(
                    "saved {} unresolved tracks to {}",
                    tracks.len(),
                    path.display(),
                );
                Some(path)
            }
            Err(error) => {
                warn!("failed to save unresolved tracks: {error:#}");
                None
            }
        }
    }

    async fn pause(&self) {
        if !self.options.pause.is_zero() {
            tokio::time::sleep(self.options.pause).await;
        }
    }
}
