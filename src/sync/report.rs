use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::catalog::TrackDescriptor;
use crate::sync::SyncMode;

pub const TRANSFER_REPORT_FILE: &str = "not_found_tracks.json";

/// `not_found_tracks.json` for transfers, `update_not_found_tracks_<unix-secs>.json` for updates
pub fn default_path(mode: SyncMode) -> PathBuf {
    match mode {
        SyncMode::Transfer => PathBuf::from(TRANSFER_REPORT_FILE),
        SyncMode::Update => {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs());
            PathBuf::from(format!("update_not_found_tracks_{secs}.json"))
        }
    }
}

/// Writes the tracks as a pretty-printed JSON array, keeping non-ASCII text verbatim
pub fn write_unresolved(path: &Path, tracks: &[TrackDescriptor]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, tracks)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_unresolved_round_trips_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let tracks = vec![TrackDescriptor {
            title: "Группа крови".to_owned(),
            artist: "КИНО".to_owned(),
            album: "Группа крови".to_owned(),
            duration_ms: Some(286_000),
            source_id: "12345".to_owned(),
        }];

        write_unresolved(&path, &tracks).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"title\": \"Группа крови\""));
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        for key in ["title", "artist", "album"] {
            assert!(rows[0].get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_write_unresolved_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("report.json");
        assert!(write_unresolved(&path, &[]).is_err());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            default_path(SyncMode::Transfer),
            PathBuf::from("not_found_tracks.json"),
        );
        let update = default_path(SyncMode::Update);
        let name = update.to_str().unwrap();
        assert!(name.starts_with("update_not_found_tracks_"));
        assert!(name.ends_with(".json"));
    }
}
