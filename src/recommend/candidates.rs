use crate::index::{Neighbor, SimilarityIndex};

pub const DEFAULT_POOL_MARGIN: usize = 300;

/// How many neighbors to ask the index for so that, after removing liked
/// rows and visible duplicates, `top_n` results are still likely to remain.
pub fn pool_size(catalog_size: usize, top_n: usize, liked_count: usize, pool_margin: usize) -> usize {
    let wanted = top_n
        .saturating_add(liked_count)
        .saturating_add(pool_margin);
    catalog_size.min(wanted)
}

pub fn retrieve_candidates(
    index: &dyn SimilarityIndex,
    profile: &[f32],
    pool_size: usize,
) -> Vec<Neighbor> {
    if pool_size == 0 {
        return vec![];
    }
    index.query(profile, pool_size)
}
