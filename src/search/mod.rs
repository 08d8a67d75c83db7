mod catalog_search;

pub use catalog_search::{CatalogSearch, SearchHit, DEFAULT_SEARCH_LIMIT};
