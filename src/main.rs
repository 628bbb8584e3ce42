mod catalog;
mod error;
mod matching;
mod spotify;
mod sync;
mod yandex;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, ensure};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::{DestinationPlaylistReader, SourceCatalogReader, TrackDescriptor};
use crate::error::SyncError;
use crate::matching::{DEFAULT_MIN_SCORE, DEFAULT_PRESENCE_THRESHOLD};
use crate::sync::{LogProgress, SyncMode, SyncOptions, SyncReport, Synchronizer};

const DEFAULT_PLAYLIST_NAME: &str = "Liked (from Yandex Music)";

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Creates a new Spotify playlist from all liked Yandex Music tracks
    Transfer {
        #[command(flatten)]
        tokens: Tokens,

        #[command(flatten)]
        tuning: Tuning,

        /// Name of the playlist to create
        #[arg(short = 'p', long, default_value = DEFAULT_PLAYLIST_NAME)]
        playlist: String,
    },

    /// Adds liked Yandex Music tracks that are missing from an existing Spotify playlist
    Update {
        #[command(flatten)]
        tokens: Tokens,

        #[command(flatten)]
        tuning: Tuning,

        /// Name of the playlist to update (case-insensitive)
        #[arg(short = 'p', long, default_value = DEFAULT_PLAYLIST_NAME)]
        playlist: String,

        /// ID of the playlist to update, skips the lookup by name
        #[arg(long, conflicts_with = "create_if_missing")]
        playlist_id: Option<String>,

        /// Create the playlist when no playlist has the given name
        #[arg(long)]
        create_if_missing: bool,
    },

    /// Lists the Spotify playlists of the current user
    Playlists {
        /// Spotify Web API access token
        #[arg(short = 'S', long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
        spotify_token: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[derive(Args)]
struct Tokens {
    /// Yandex Music OAuth token
    #[arg(short = 'Y', long, env = "YANDEX_MUSIC_TOKEN", hide_env_values = true)]
    yandex_token: String,

    /// Spotify Web API access token with the playlist-modify scopes
    #[arg(short = 'S', long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    spotify_token: String,
}

#[derive(Args)]
struct Tuning {
    /// File for tracks that could not be found (default depends on the command)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Pause after every search and every playlist write, in milliseconds
    #[arg(long, default_value_t = 100)]
    pause_ms: u64,

    /// Score a search result has to exceed to be accepted (0-1)
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    min_score: f64,

    /// Similarity at which a playlist track counts as already present (0-1)
    #[arg(long, default_value_t = DEFAULT_PRESENCE_THRESHOLD)]
    presence_threshold: f64,
}

impl Tokens {
    fn validate(&self) -> Result<()> {
        ensure!(
            yandex::validate_token(&self.yandex_token),
            "invalid Yandex Music token",
        );
        ensure!(
            spotify::validate_access_token(&self.spotify_token),
            "invalid Spotify access token",
        );
        Ok(())
    }
}

impl Tuning {
    fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.min_score),
            "min score must be between 0 and 1",
        );
        ensure!(
            (0.0..=1.0).contains(&self.presence_threshold),
            "presence threshold must be between 0 and 1",
        );
        Ok(())
    }

    /// The default report file depends on the mode actually run
    fn into_options(self, mode: SyncMode) -> SyncOptions {
        SyncOptions {
            min_score: self.min_score,
            presence_threshold: self.presence_threshold,
            pause: Duration::from_millis(self.pause_ms),
            report_path: Some(
                self.report
                    .unwrap_or_else(|| sync::report::default_path(mode)),
            ),
            ..SyncOptions::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transfer {
            tokens,
            tuning,
            playlist,
        } => {
            tokens.validate()?;
            tuning.validate()?;
            ensure!(!playlist.trim().is_empty(), "playlist name is empty");
            let options = tuning.into_options(SyncMode::Transfer);

            let source_tracks = liked_tracks(&tokens).await?;
            let destination = spotify::Client::new(&tokens.spotify_token)?;
            let report = Synchronizer::new(&destination, options, &LogProgress)
                .transfer(&source_tracks, &playlist)
                .await?;

            print_report(Some(&playlist), source_tracks.len(), &report);
        }
        Commands::Update {
            tokens,
            tuning,
            playlist,
            playlist_id,
            create_if_missing,
        } => {
            tokens.validate()?;
            tuning.validate()?;
            if let Some(playlist_id) = &playlist_id {
                ensure!(spotify::validate_id(playlist_id), "invalid playlist ID");
            }
            // With an explicit ID the playlist's real name is unknown
            let display_name = playlist_id.is_none().then_some(playlist.as_str());

            let source_tracks = liked_tracks(&tokens).await?;
            let destination = spotify::Client::new(&tokens.spotify_token)?;

            let playlist_id = match playlist_id {
                Some(playlist_id) => Some(playlist_id),
                None => sync::locate_playlist(&destination, &playlist)
                    .await?
                    .map(|found| found.id),
            };
            let options = tuning.into_options(SyncMode::for_playlist(playlist_id.as_deref()));
            let report = Synchronizer::new(&destination, options, &LogProgress)
                .synchronize(
                    &source_tracks,
                    &playlist,
                    playlist_id.as_deref(),
                    create_if_missing,
                )
                .await?;

            print_report(display_name, source_tracks.len(), &report);
        }
        Commands::Playlists { spotify_token } => {
            ensure!(
                spotify::validate_access_token(&spotify_token),
                "invalid Spotify access token",
            );
            let destination = spotify::Client::new(&spotify_token)?;
            let playlists = destination.list_user_playlists().await?;
            if playlists.is_empty() {
                println!("No playlists.");
            }
            for (i, playlist) in playlists.iter().enumerate() {
                println!(
                    "{:>3}. {} ({} tracks) [{}]",
                    i + 1,
                    playlist.name,
                    playlist.track_count,
                    playlist.id,
                );
            }
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}

async fn liked_tracks(tokens: &Tokens) -> Result<Vec<TrackDescriptor>> {
    let source = yandex::Client::new(&tokens.yandex_token)?;
    let tracks = source
        .list_liked_tracks()
        .await
        .map_err(SyncError::source_unavailable)?;
    ensure!(!tracks.is_empty(), "no liked tracks found");
    Ok(tracks)
}

fn playlist_label(name: Option<&str>, id: &str) -> String {
    match name {
        Some(name) => format!("\"{name}\" ({id})"),
        None => format!("playlist {id}"),
    }
}

fn print_report(playlist: Option<&str>, source_total: usize, report: &SyncReport) {
    let label = playlist_label(playlist, &report.playlist_id);
    println!();
    match report.mode {
        SyncMode::Transfer => {
            println!("Created {label}");
            println!("  Liked tracks: {source_total}");
        }
        SyncMode::Update => {
            println!("Updated {label}");
            println!("  Liked tracks: {source_total}");
            println!("  Missing from playlist: {}", report.searched);
        }
    }
    println!("  Added: {}", report.resolved_count());
    println!("  Not found: {}", report.unresolved_count());
    if report.duplicates > 0 {
        println!("  Duplicates skipped: {}", report.duplicates);
    }
    if let (Some(before), Some(after)) = (report.tracks_before, report.tracks_after()) {
        println!("  Playlist tracks: {before} \u{2192} {after}");
    }
    if let Some(path) = &report.report_path {
        println!("  Not found tracks saved to {}", path.display());
    }
}
