mod load;
mod matrix;

pub use load::{load_aligned, load_feature_matrix, read_feature_matrix};
pub use matrix::{ensure_aligned, FeatureMatrix, FeatureMatrixError};
