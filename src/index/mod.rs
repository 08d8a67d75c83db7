//! Nearest-neighbor retrieval over the feature matrix.

mod brute_force;
mod metric;

pub use brute_force::BruteForceIndex;
pub use metric::Metric;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f32,
}

/// A pure K-nearest oracle. It knows nothing about liked tracks or display
/// names, all exclusion and deduplication happens in the recommender.
pub trait SimilarityIndex: Send + Sync {
    /// Returns up to `k` rows ordered nearest-first.
    fn query(&self, vector: &[f32], k: usize) -> Vec<Neighbor>;

    /// Number of indexed rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metric(&self) -> Metric;
}
