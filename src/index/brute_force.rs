use super::{Metric, Neighbor, SimilarityIndex};
use crate::features::FeatureMatrix;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::warn;

/// Exact nearest neighbors by scanning every row of the matrix.
pub struct BruteForceIndex {
    matrix: Arc<FeatureMatrix>,
    metric: Metric,
}

impl BruteForceIndex {
    pub fn new(matrix: Arc<FeatureMatrix>, metric: Metric) -> BruteForceIndex {
        BruteForceIndex { matrix, metric }
    }
}

impl SimilarityIndex for BruteForceIndex {
    fn query(&self, vector: &[f32], k: usize) -> Vec<Neighbor> {
        if k == 0 || self.matrix.is_empty() {
            return vec![];
        }
        if vector.len() != self.matrix.dim() {
            warn!(
                "Query vector has {} dimensions, the index has {}",
                vector.len(),
                self.matrix.dim()
            );
            return vec![];
        }

        let metric = self.metric;
        let mut neighbors: Vec<Neighbor> = self
            .matrix
            .rows()
            .collect::<Vec<&[f32]>>()
            .par_iter()
            .enumerate()
            .map(|(row, features)| Neighbor {
                row,
                distance: metric.distance(vector, features),
            })
            .collect();

        let k = k.min(neighbors.len());
        let by_distance_then_row = |a: &Neighbor, b: &Neighbor| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.row.cmp(&b.row))
        };
        if k < neighbors.len() {
            neighbors.select_nth_unstable_by(k - 1, by_distance_then_row);
            neighbors.truncate(k);
        }
        neighbors.sort_unstable_by(by_distance_then_row);
        neighbors
    }

    fn len(&self) -> usize {
        self.matrix.len()
    }

    fn metric(&self) -> Metric {
        self.metric
    }
}
