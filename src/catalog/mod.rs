mod catalog;
mod item;
mod load;

pub use catalog::{Catalog, CatalogBuildResult, Problem as LoadCatalogProblem};
pub use item::CatalogItem;
pub use load::{load_catalog, read_catalog_items};
