use crate::catalog::Catalog;
use crate::index::Neighbor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    pub track_name: String,
    pub artist_name: String,
    pub distance: f32,
}

/// Turns raw neighbors into the final list: drop liked rows, sort by
/// distance, keep the closest entry per (track name, artist name), truncate
/// to `top_n` and number the survivors from 1.
///
/// Fewer than `top_n` results is a legitimate outcome, not an error.
pub fn rank_candidates(
    catalog: &Catalog,
    neighbors: Vec<Neighbor>,
    liked_rows: &[usize],
    top_n: usize,
) -> Vec<Recommendation> {
    let liked: HashSet<usize> = liked_rows.iter().copied().collect();

    let mut candidates: Vec<Neighbor> = neighbors
        .into_iter()
        .filter(|n| !liked.contains(&n.row))
        .collect();

    // stable, equal distances keep the index order
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut out = Vec::with_capacity(top_n.min(candidates.len()));
    for candidate in candidates {
        if out.len() >= top_n {
            break;
        }
        let item = match catalog.lookup(candidate.row) {
            Some(item) => item,
            None => {
                warn!("Index returned row {} which is not in the catalog", candidate.row);
                continue;
            }
        };
        if !seen.insert((item.track_name.as_str(), item.artist_name.as_str())) {
            continue;
        }
        out.push(Recommendation {
            rank: out.len() + 1,
            track_name: item.track_name.clone(),
            artist_name: item.artist_name.clone(),
            distance: candidate.distance,
        });
    }
    out
}
