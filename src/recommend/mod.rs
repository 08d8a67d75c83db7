//! Track recommendations from a set of liked tracks.
//!
//! A request flows through independent stages:
//! resolve liked ids to rows, average their feature vectors into a profile,
//! ask the similarity index for an over-sized pool of neighbors, then
//! exclude, sort, deduplicate and truncate that pool.

mod candidates;
mod engine;
mod error;
mod profile;
mod ranking;

pub use candidates::{pool_size, retrieve_candidates, DEFAULT_POOL_MARGIN};
pub use engine::{RecommendRequest, RecommendationEngine};
pub use error::RecommendError;
pub use profile::{mean_profile, resolve_liked_rows};
pub use ranking::{rank_candidates, Recommendation};
