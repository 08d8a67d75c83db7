use super::candidates::{pool_size, retrieve_candidates, DEFAULT_POOL_MARGIN};
use super::profile::{mean_profile, resolve_liked_rows};
use super::ranking::{rank_candidates, Recommendation};
use super::RecommendError;
use crate::catalog::Catalog;
use crate::features::FeatureMatrix;
use crate::index::SimilarityIndex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub liked_ids: Vec<String>,
    pub top_n: usize,
    #[serde(default = "default_pool_margin")]
    pub pool_margin: usize,
}

fn default_pool_margin() -> usize {
    DEFAULT_POOL_MARGIN
}

impl RecommendRequest {
    pub fn new(liked_ids: Vec<String>, top_n: usize) -> RecommendRequest {
        RecommendRequest {
            liked_ids,
            top_n,
            pool_margin: DEFAULT_POOL_MARGIN,
        }
    }
}

/// Recommends tracks close to the average of a set of liked tracks.
///
/// The engine only holds read-only artifacts, the liked set is passed on
/// every call, so a single instance can serve any number of callers.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    features: Arc<FeatureMatrix>,
    index: Arc<dyn SimilarityIndex>,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        features: Arc<FeatureMatrix>,
        index: Arc<dyn SimilarityIndex>,
    ) -> RecommendationEngine {
        RecommendationEngine {
            catalog,
            features,
            index,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn index(&self) -> &dyn SimilarityIndex {
        self.index.as_ref()
    }

    pub fn recommend<T: AsRef<str>>(
        &self,
        liked_ids: &[T],
        top_n: usize,
        pool_margin: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        validate(liked_ids, top_n)?;

        let liked_rows = resolve_liked_rows(&self.catalog, liked_ids)?;
        let profile = mean_profile(&self.features, &liked_rows).ok_or(
            RecommendError::EmptyResolution {
                requested: liked_ids.len(),
            },
        )?;

        let pool = pool_size(self.catalog.size(), top_n, liked_rows.len(), pool_margin);
        let neighbors = retrieve_candidates(self.index.as_ref(), &profile, pool);
        let retrieved = neighbors.len();
        let recommendations = rank_candidates(&self.catalog, neighbors, &liked_rows, top_n);

        debug!(
            "Recommended {} tracks from {} liked ({} resolved), pool {} retrieved {}",
            recommendations.len(),
            liked_ids.len(),
            liked_rows.len(),
            pool,
            retrieved
        );
        Ok(recommendations)
    }

    pub fn recommend_request(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        self.recommend(&request.liked_ids, request.top_n, request.pool_margin)
    }
}

fn validate<T: AsRef<str>>(liked_ids: &[T], top_n: usize) -> Result<(), RecommendError> {
    if top_n == 0 {
        return Err(RecommendError::InvalidRequest(
            "top_n must be at least 1".to_string(),
        ));
    }
    if liked_ids.is_empty() {
        return Err(RecommendError::InvalidRequest(
            "at least one liked track is required".to_string(),
        ));
    }
    if let Some(position) = liked_ids.iter().position(|id| id.as_ref().trim().is_empty()) {
        return Err(RecommendError::InvalidRequest(format!(
            "liked track at position {} has a blank identifier",
            position
        )));
    }
    Ok(())
}
