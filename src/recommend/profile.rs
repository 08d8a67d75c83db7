use super::RecommendError;
use crate::catalog::Catalog;
use crate::features::FeatureMatrix;

/// Maps liked identifiers to catalog rows, in the same order.
///
/// An identifier shared by several catalog rows expands to all of them.
/// Unknown identifiers are skipped, duplicated likes are kept. Fails only
/// when nothing resolves at all.
pub fn resolve_liked_rows<T: AsRef<str>>(
    catalog: &Catalog,
    liked_ids: &[T],
) -> Result<Vec<usize>, RecommendError> {
    let rows: Vec<usize> = liked_ids
        .iter()
        .flat_map(|id| catalog.resolve_all(id).iter().copied())
        .collect();

    if rows.is_empty() {
        return Err(RecommendError::EmptyResolution {
            requested: liked_ids.len(),
        });
    }
    Ok(rows)
}

/// Componentwise mean of the given rows' feature vectors.
///
/// Rows missing from the matrix are ignored. Returns `None` if no row
/// contributes.
pub fn mean_profile(matrix: &FeatureMatrix, rows: &[usize]) -> Option<Vec<f32>> {
    let mut sums = vec![0.0f64; matrix.dim()];
    let mut count = 0usize;

    for features in rows.iter().filter_map(|row| matrix.row(*row)) {
        for (sum, value) in sums.iter_mut().zip(features) {
            *sum += *value as f64;
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(sums.into_iter().map(|s| (s / count as f64) as f32).collect())
}
