use super::CatalogItem;
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq)]
pub enum Problem {
    /// An item without identifier, it could never be liked nor excluded.
    EmptyTrackId { row: usize },

    /// The identifier was already used by an earlier row. Single-item
    /// lookups return `first_row`, resolving a liked id yields every row.
    DuplicateTrackId {
        track_id: String,
        first_row: usize,
        row: usize,
    },
}

impl Problem {
    fn is_fatal(&self) -> bool {
        matches!(self, Problem::EmptyTrackId { .. })
    }
}

pub struct CatalogBuildResult {
    pub catalog: Option<Catalog>,
    pub problems: Vec<Problem>,
}

/// Ordered, immutable collection of tracks. Row positions are stable and
/// match the rows of the feature matrix loaded alongside.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    rows_by_id: HashMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn build(items: Vec<CatalogItem>) -> CatalogBuildResult {
        let mut problems = vec![];
        let mut rows_by_id: HashMap<String, Vec<usize>> = HashMap::with_capacity(items.len());

        for (row, item) in items.iter().enumerate() {
            if item.track_id.trim().is_empty() {
                problems.push(Problem::EmptyTrackId { row });
                continue;
            }
            let rows = rows_by_id.entry(item.track_id.clone()).or_default();
            if let Some(first_row) = rows.first() {
                problems.push(Problem::DuplicateTrackId {
                    track_id: item.track_id.clone(),
                    first_row: *first_row,
                    row,
                });
            }
            rows.push(row);
        }

        let catalog = if problems.iter().any(Problem::is_fatal) {
            None
        } else {
            Some(Catalog { items, rows_by_id })
        };

        CatalogBuildResult { catalog, problems }
    }

    /// First row carrying the identifier.
    pub fn resolve<T: AsRef<str>>(&self, track_id: T) -> Option<usize> {
        self.resolve_all(track_id).first().copied()
    }

    /// Every row carrying the identifier, in catalog order.
    pub fn resolve_all<T: AsRef<str>>(&self, track_id: T) -> &[usize] {
        self.rows_by_id
            .get(track_id.as_ref())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lookup(&self, row: usize) -> Option<&CatalogItem> {
        self.items.get(row)
    }

    pub fn get_track<T: AsRef<str>>(&self, track_id: T) -> Option<&CatalogItem> {
        self.resolve(track_id).and_then(|row| self.lookup(row))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }
}
