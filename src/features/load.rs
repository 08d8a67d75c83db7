use super::{ensure_aligned, FeatureMatrix};
use crate::catalog::{load_catalog, Catalog};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reads one feature vector per record, the first line holds the feature names.
pub fn read_feature_matrix<R: Read>(reader: R) -> Result<FeatureMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for (row, record) in csv_reader.deserialize::<Vec<f32>>().enumerate() {
        let values = record.with_context(|| format!("Invalid feature row {}", row))?;
        rows.push(values);
    }
    Ok(FeatureMatrix::from_rows(rows)?)
}

pub fn load_feature_matrix<P: AsRef<Path>>(path: P) -> Result<FeatureMatrix> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open features file {}", path.display()))?;
    let matrix = read_feature_matrix(file)
        .with_context(|| format!("Could not read features file {}", path.display()))?;
    info!(
        "Feature matrix has {} rows of {} dimensions",
        matrix.len(),
        matrix.dim()
    );
    Ok(matrix)
}

/// Loads both artifacts and fails unless every catalog row has exactly one
/// feature row.
pub fn load_aligned<P: AsRef<Path>, Q: AsRef<Path>>(
    catalog_path: P,
    features_path: Q,
) -> Result<(Catalog, FeatureMatrix)> {
    let catalog = load_catalog(catalog_path)?;
    let matrix = load_feature_matrix(features_path)?;
    ensure_aligned(&catalog, &matrix)?;
    Ok((catalog, matrix))
}
