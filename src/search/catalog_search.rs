use crate::catalog::Catalog;
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_SEARCH_LIMIT: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub label: String,
}

/// Case-insensitive substring search over track and artist names.
///
/// Names are lowercased once when the search is built, results come back in
/// catalog order.
pub struct CatalogSearch {
    catalog: Arc<Catalog>,
    lowercase_names: Vec<(String, String)>,
}

impl CatalogSearch {
    pub fn new(catalog: Arc<Catalog>) -> CatalogSearch {
        let lowercase_names = catalog
            .iter()
            .map(|item| (item.track_name.to_lowercase(), item.artist_name.to_lowercase()))
            .collect();
        CatalogSearch {
            catalog,
            lowercase_names,
        }
    }

    pub fn search<T: AsRef<str>>(&self, query: T, limit: usize) -> Vec<SearchHit> {
        let query = query.as_ref().trim().to_lowercase();

        self.lowercase_names
            .iter()
            .enumerate()
            .filter(|(_, (track, artist))| {
                query.is_empty() || track.contains(&query) || artist.contains(&query)
            })
            .filter_map(|(row, _)| self.catalog.lookup(row))
            .take(limit)
            .map(|item| SearchHit {
                track_id: item.track_id.clone(),
                track_name: item.track_name.clone(),
                artist_name: item.artist_name.clone(),
                label: item.label(),
            })
            .collect()
    }
}
