use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    /// None of the liked identifiers is in the catalog.
    #[error("None of the {requested} liked tracks could be found in the catalog")]
    EmptyResolution { requested: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
