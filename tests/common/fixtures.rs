//! Test fixture creation for catalog and feature files

use super::constants::*;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary catalog of 6 tracks with 2 features each.
/// Returns (temp_dir, catalog_csv_path, features_csv_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new()?;

    let tracks = [
        (TRACK_1_ID, "Opening Track", ARTIST_1_NAME, "rock", [0.0, 0.0]),
        (TRACK_2_ID, "Second Song", ARTIST_1_NAME, "rock", [1.0, 0.0]),
        (TRACK_3_ID, "Blue Note", ARTIST_2_NAME, "jazz", [2.0, 0.0]),
        (TRACK_4_ID, "Blue Note", ARTIST_2_NAME, "jazz", [2.5, 0.0]),
        (TRACK_5_ID, "Late Night", ARTIST_2_NAME, "jazz", [4.0, 0.0]),
        (TRACK_6_ID, "Quiet Hours", "Solo Pianist", "classical", [0.0, 3.0]),
    ];

    let mut catalog_csv = String::from("track_id,track_name,artist_name,artist_genres_key\n");
    let mut features_csv = String::from("energy,acousticness\n");
    for (id, name, artist, genres, features) in tracks.iter() {
        catalog_csv.push_str(&format!("{},{},{},{}\n", id, name, artist, genres));
        features_csv.push_str(&format!("{},{}\n", features[0], features[1]));
    }

    let catalog_path = dir.path().join("catalog.csv");
    let features_path = dir.path().join("features.csv");
    fs::write(&catalog_path, catalog_csv)?;
    fs::write(&features_path, features_csv)?;

    Ok((dir, catalog_path, features_path))
}
