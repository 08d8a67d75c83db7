//! Pezzottify Recommender Library
//!
//! Content-based track recommendations: a listener's liked tracks are averaged
//! into a profile vector and the nearest catalog tracks are returned.

pub mod catalog;
pub mod config;
pub mod export;
pub mod features;
pub mod index;
pub mod liked;
pub mod recommend;
pub mod search;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, CatalogItem};
pub use features::{load_feature_matrix, FeatureMatrix};
pub use index::{BruteForceIndex, Metric, SimilarityIndex};
pub use recommend::{RecommendError, Recommendation, RecommendationEngine};
pub use search::CatalogSearch;
pub use server::{run_server, RequestsLoggingLevel};
