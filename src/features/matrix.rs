use crate::catalog::Catalog;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FeatureMatrixError {
    #[error("Feature vectors must have at least one dimension")]
    ZeroDimension,

    #[error("Row {row} has {actual} features, expected {expected}")]
    InconsistentDimension {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} has a non-finite value at column {column}")]
    NonFiniteValue { row: usize, column: usize },

    #[error("Catalog has {catalog_rows} tracks but the feature matrix has {matrix_rows} rows")]
    Misaligned {
        catalog_rows: usize,
        matrix_rows: usize,
    },
}

/// Dense row-major matrix, row `i` is the feature vector of catalog row `i`.
#[derive(Debug, Clone, Default)]
pub struct FeatureMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl FeatureMatrix {
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<FeatureMatrix, FeatureMatrixError> {
        let dim = match rows.first() {
            Some(first) => first.len(),
            None => return Ok(FeatureMatrix::default()),
        };
        if dim == 0 {
            return Err(FeatureMatrixError::ZeroDimension);
        }

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(FeatureMatrixError::InconsistentDimension {
                    row,
                    expected: dim,
                    actual: values.len(),
                });
            }
            if let Some(column) = values.iter().position(|v| !v.is_finite()) {
                return Err(FeatureMatrixError::NonFiniteValue { row, column });
            }
            data.extend(values);
        }

        Ok(FeatureMatrix { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, position: usize) -> Option<&[f32]> {
        if position >= self.len() {
            return None;
        }
        let start = position * self.dim;
        Some(&self.data[start..start + self.dim])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0, an empty matrix has no data anyway
        self.data.chunks_exact(self.dim.max(1))
    }
}

/// Every catalog item must have exactly one feature vector at the same row.
pub fn ensure_aligned(catalog: &Catalog, matrix: &FeatureMatrix) -> Result<(), FeatureMatrixError> {
    if catalog.size() != matrix.len() {
        return Err(FeatureMatrixError::Misaligned {
            catalog_rows: catalog.size(),
            matrix_rows: matrix.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    #[test]
    fn builds_row_major_matrix() {
        let matrix =
            FeatureMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]])
                .unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.row(1), Some(&[2.0f32, 3.0][..]));
        assert_eq!(matrix.row(3), None);
        assert_eq!(matrix.rows().count(), 3);
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let matrix = FeatureMatrix::from_rows(vec![]).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.row(0), None);
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn rejects_inconsistent_rows() {
        let result = FeatureMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0]]);
        assert_eq!(
            result.unwrap_err(),
            FeatureMatrixError::InconsistentDimension {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_non_finite_and_zero_dimension() {
        let result = FeatureMatrix::from_rows(vec![vec![0.0, f32::NAN]]);
        assert_eq!(
            result.unwrap_err(),
            FeatureMatrixError::NonFiniteValue { row: 0, column: 1 }
        );

        let result = FeatureMatrix::from_rows(vec![vec![]]);
        assert_eq!(result.unwrap_err(), FeatureMatrixError::ZeroDimension);
    }

    #[test]
    fn checks_alignment_with_catalog() {
        let catalog = Catalog::build(vec![CatalogItem {
            track_id: "t1".to_string(),
            track_name: "One".to_string(),
            artist_name: "A".to_string(),
            artist_genres_key: String::new(),
        }])
        .catalog
        .unwrap();

        let aligned = FeatureMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert!(ensure_aligned(&catalog, &aligned).is_ok());

        let misaligned = FeatureMatrix::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(
            ensure_aligned(&catalog, &misaligned).unwrap_err(),
            FeatureMatrixError::Misaligned {
                catalog_rows: 1,
                matrix_rows: 2
            }
        );
    }
}
